use blockcraft_core::{Coordinate, Delta, Material};
use glam::{Vec2, Vec3};

/// Every operation the command surface accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Place a block at `target` (or the ghost) using `material` (or the current one).
    Place {
        /// Explicit cell; defaults to the ghost.
        target: Option<Coordinate>,
        /// Explicit material; defaults to the selected one.
        material: Option<Material>,
    },
    /// Remove the block at `target` (or the ghost).
    Remove {
        /// Explicit cell; defaults to the ghost.
        target: Option<Coordinate>,
    },
    /// Revert the most recent edit.
    Undo,
    /// Re-apply the most recently undone edit.
    Redo,
    /// Save the project to the store.
    Save,
    /// Replace the project with the saved one.
    Load,
    /// Clear the world and history.
    Reset,
    /// Select the material used by subsequent placements.
    SetMaterial(Material),
    /// Show or hide the floor grid.
    ToggleGrid,
    /// Step the ghost.
    MoveGhost(Delta),
    /// Jump the ghost to a cell.
    SetGhost(Coordinate),
    /// Retarget the ghost from a ground-plane hit (x width, y depth).
    TargetPlane(Vec2),
    /// Retarget the ghost across a block face.
    TargetFace {
        /// Block that was hit.
        block: Coordinate,
        /// Face normal in grid axes.
        normal: Vec3,
    },
}

/// Result of a command: a success flag plus the message to announce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Whether the command changed anything it was asked to change.
    pub success: bool,
    /// Human-readable status for the announcer.
    pub message: String,
}

impl CommandOutcome {
    /// Successful outcome.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Rejected outcome; the session carries on unchanged.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
