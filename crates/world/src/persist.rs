//! Project save/load in the JSON payload format.
//!
//! ```text
//! { "blocks": [ { "x": 0, "y": 0, "z": 0, "material": "wood" }, ... ],
//!   "material": "wood" }
//! ```

use blockcraft_core::{Block, Coordinate, GridBounds, Material};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{KeyValueStore, StoreError};
use crate::world::WorldState;

/// Storage key projects are saved under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "blocks-builder-v1";

/// Errors emitted while saving or loading a project.
#[derive(Debug, Error)]
pub enum PersistError {
    /// No project exists under the storage key.
    #[error("no saved project")]
    NothingSaved,
    /// Wrap storage backend failures.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Wrap JSON encode/decode failures.
    #[error("failed to parse project: {0}")]
    Parse(#[from] serde_json::Error),
    /// The payload contains a block outside the session grid.
    #[error("saved block at {0} lies outside the grid")]
    OutOfBounds(Coordinate),
}

#[derive(Debug, Serialize, Deserialize)]
struct BlockRecord {
    x: i32,
    y: i32,
    z: i32,
    material: Material,
}

#[derive(Debug, Serialize, Deserialize)]
struct ProjectPayload {
    blocks: Vec<BlockRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    material: Option<Material>,
}

/// A decoded project ready to be swapped into a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedProject {
    /// Blocks in payload order.
    pub blocks: Vec<Block>,
    /// Selected material, when the payload carried one.
    pub material: Option<Material>,
}

/// Serialize the world and selected material.
pub fn encode_project(world: &WorldState, material: Material) -> Result<String, PersistError> {
    let payload = ProjectPayload {
        blocks: world
            .blocks()
            .map(|block| BlockRecord {
                x: block.coordinate.x,
                y: block.coordinate.y,
                z: block.coordinate.z,
                material: block.material,
            })
            .collect(),
        material: Some(material),
    };
    Ok(serde_json::to_string(&payload)?)
}

/// Parse a payload and check every block against `bounds`.
pub fn decode_project(raw: &str, bounds: GridBounds) -> Result<LoadedProject, PersistError> {
    let payload: ProjectPayload = serde_json::from_str(raw)?;
    let blocks = payload
        .blocks
        .into_iter()
        .map(|record| {
            let coordinate = Coordinate::new(record.x, record.y, record.z);
            if bounds.contains(coordinate) {
                Ok(Block::new(coordinate, record.material))
            } else {
                Err(PersistError::OutOfBounds(coordinate))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(LoadedProject {
        blocks,
        material: payload.material,
    })
}

/// Write the project under `key`. Returns the number of blocks saved.
pub fn save_project(
    store: &mut impl KeyValueStore,
    key: &str,
    world: &WorldState,
    material: Material,
) -> Result<usize, PersistError> {
    let encoded = encode_project(world, material)?;
    store.set(key, &encoded)?;
    Ok(world.len())
}

/// Read and decode the project under `key`.
pub fn load_project(
    store: &impl KeyValueStore,
    key: &str,
    bounds: GridBounds,
) -> Result<LoadedProject, PersistError> {
    let raw = store.get(key)?.ok_or(PersistError::NothingSaved)?;
    decode_project(&raw, bounds)
}
