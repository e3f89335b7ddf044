#![warn(missing_docs)]
//! Voxel placement engine: world state, placement rules, history, targeting
//! and persistence behind a single command surface.

mod command;
mod ghost;
mod history;
mod persist;
mod placement;
mod session;
mod status;
mod store;
mod world;

pub use command::*;
pub use ghost::*;
pub use history::*;
pub use persist::*;
pub use placement::*;
pub use session::*;
pub use status::*;
pub use store::*;
pub use world::*;
