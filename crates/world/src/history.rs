//! Undo/redo history.

use blockcraft_core::Block;
use thiserror::Error;
use tracing::debug;

use crate::world::WorldState;

/// One reversible edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEntry {
    /// A block was placed.
    Place(Block),
    /// A block was removed.
    Remove(Block),
}

impl HistoryEntry {
    /// Block touched by this edit.
    pub fn block(&self) -> Block {
        match self {
            Self::Place(block) | Self::Remove(block) => *block,
        }
    }
}

/// Returned when the relevant stack is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// The undo stack is empty.
    #[error("nothing to undo")]
    NothingToUndo,
    /// The redo stack is empty.
    #[error("nothing to redo")]
    NothingToRedo,
}

/// Undo and redo stacks of committed edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
}

impl History {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fresh edit. Any redoable entries are discarded.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);
        self.redo_stack.clear();
    }

    /// Revert the most recent edit and move it onto the redo stack.
    pub fn undo(&mut self, world: &mut WorldState) -> Result<HistoryEntry, HistoryError> {
        let entry = self.undo_stack.pop().ok_or(HistoryError::NothingToUndo)?;
        match entry {
            HistoryEntry::Place(block) => {
                world.delete(block.coordinate);
            }
            HistoryEntry::Remove(block) => world.insert(block),
        }
        self.redo_stack.push(entry);
        debug!(?entry, "undo");
        Ok(entry)
    }

    /// Re-apply the most recently undone edit and move it back onto the undo stack.
    pub fn redo(&mut self, world: &mut WorldState) -> Result<HistoryEntry, HistoryError> {
        let entry = self.redo_stack.pop().ok_or(HistoryError::NothingToRedo)?;
        match entry {
            HistoryEntry::Place(block) => world.insert(block),
            HistoryEntry::Remove(block) => {
                world.delete(block.coordinate);
            }
        }
        self.undo_stack.push(entry);
        debug!(?entry, "redo");
        Ok(entry)
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Returns true when `undo` would do something.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true when `redo` would do something.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Entries available to undo, oldest first.
    pub fn undo_entries(&self) -> &[HistoryEntry] {
        &self.undo_stack
    }

    /// Entries available to redo; the last one is redone first.
    pub fn redo_entries(&self) -> &[HistoryEntry] {
        &self.redo_stack
    }
}
