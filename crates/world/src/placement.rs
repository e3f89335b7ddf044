//! Placement rules: support, adjacency fallback and committed edits.
//!
//! `resolve_placement` is pure; `place_block` and `remove_block` apply a
//! decision to the world and record it in the history.

use blockcraft_core::{Block, Coordinate, Delta, Material};
use thiserror::Error;
use tracing::debug;

use crate::history::{History, HistoryEntry};
use crate::world::WorldState;

/// Lateral neighbours, in the order the adjacency fallback tries them.
pub const NEIGHBOR_ORDER: [Delta; 4] = [
    Delta::RIGHT,
    Delta::LEFT,
    Delta::BACK,
    Delta::FORWARD,
];

/// Reasons a placement is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The target was occupied and every lateral neighbour was blocked,
    /// out of bounds or unsupported.
    #[error("cell {target} is occupied and no supported neighbor is free")]
    OccupiedNoNeighbor {
        /// Requested cell.
        target: Coordinate,
    },
    /// The target is free but nothing holds it up.
    #[error("cell {target} has no support below or beside it")]
    NoSupport {
        /// Requested cell.
        target: Coordinate,
    },
    /// The target lies outside the grid.
    #[error("cell {target} is outside the grid")]
    OutOfBounds {
        /// Requested cell.
        target: Coordinate,
    },
}

/// Reasons a removal is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RemoveError {
    /// No block occupies the target cell.
    #[error("no block at {target}")]
    NothingToRemove {
        /// Requested cell.
        target: Coordinate,
    },
}

/// A cell is supported when it sits on the floor, on top of a block, or
/// beside a block on the same level.
pub fn is_supported(world: &WorldState, c: Coordinate) -> bool {
    c.z == 0
        || world.is_occupied(c.below())
        || NEIGHBOR_ORDER
            .iter()
            .any(|delta| world.is_occupied(c.offset(*delta)))
}

/// Decide which cell a placement at `target` commits to.
///
/// A free target must be in bounds and supported. An occupied target falls
/// back to the first free, in-bounds, supported neighbour in
/// [`NEIGHBOR_ORDER`].
pub fn resolve_placement(
    world: &WorldState,
    target: Coordinate,
) -> Result<Coordinate, PlacementError> {
    if world.is_occupied(target) {
        let bounds = world.bounds();
        return NEIGHBOR_ORDER
            .iter()
            .map(|delta| target.offset(*delta))
            .find(|candidate| {
                bounds.contains(*candidate)
                    && !world.is_occupied(*candidate)
                    && is_supported(world, *candidate)
            })
            .ok_or(PlacementError::OccupiedNoNeighbor { target });
    }

    if !world.bounds().contains(target) {
        return Err(PlacementError::OutOfBounds { target });
    }
    if !is_supported(world, target) {
        return Err(PlacementError::NoSupport { target });
    }
    Ok(target)
}

/// Resolve and commit a placement, recording it for undo.
pub fn place_block(
    world: &mut WorldState,
    history: &mut History,
    target: Coordinate,
    material: Material,
) -> Result<Block, PlacementError> {
    let resolved = resolve_placement(world, target)?;
    let block = Block::new(resolved, material);
    world.insert(block);
    history.record(HistoryEntry::Place(block));
    debug!(
        x = resolved.x,
        y = resolved.y,
        z = resolved.z,
        material = material.as_str(),
        fallback = resolved != target,
        "block placed"
    );
    Ok(block)
}

/// Remove the block at `target`, recording it for undo.
///
/// Blocks resting on the removed one are left where they are.
pub fn remove_block(
    world: &mut WorldState,
    history: &mut History,
    target: Coordinate,
) -> Result<Block, RemoveError> {
    let block = world
        .get(target)
        .ok_or(RemoveError::NothingToRemove { target })?;
    world.delete(target);
    history.record(HistoryEntry::Remove(block));
    debug!(
        x = target.x,
        y = target.y,
        z = target.z,
        material = block.material.as_str(),
        "block removed"
    );
    Ok(block)
}
