use std::collections::BTreeMap;

use blockcraft_core::{Block, Coordinate, GridBounds, Material};

/// Authoritative map of occupied cells.
///
/// Uses a BTreeMap so `blocks()` iterates in coordinate order, which keeps
/// saved payloads and snapshots byte-stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldState {
    bounds: GridBounds,
    cells: BTreeMap<Coordinate, Material>,
}

impl WorldState {
    /// Create an empty world for the given bounds.
    pub fn new(bounds: GridBounds) -> Self {
        Self {
            bounds,
            cells: BTreeMap::new(),
        }
    }

    /// Bounds every stored coordinate lies within.
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Returns true when a block occupies `c`.
    pub fn is_occupied(&self, c: Coordinate) -> bool {
        self.cells.contains_key(&c)
    }

    /// Block at `c`, if any.
    pub fn get(&self, c: Coordinate) -> Option<Block> {
        self.cells.get(&c).map(|material| Block::new(c, *material))
    }

    /// Iterate over placed blocks in coordinate order.
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.cells
            .iter()
            .map(|(coordinate, material)| Block::new(*coordinate, *material))
    }

    /// Number of placed blocks.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true when nothing has been placed.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Store `block`. The caller guarantees the cell is free and in bounds.
    pub(crate) fn insert(&mut self, block: Block) {
        debug_assert!(self.bounds.contains(block.coordinate));
        debug_assert!(!self.is_occupied(block.coordinate));
        self.cells.insert(block.coordinate, block.material);
    }

    /// Drop the block at `c`. The caller guarantees the cell is occupied.
    pub(crate) fn delete(&mut self, c: Coordinate) -> Option<Block> {
        let removed = self.cells.remove(&c).map(|material| Block::new(c, material));
        debug_assert!(removed.is_some());
        removed
    }

    /// Swap in a whole new block set. Later duplicates overwrite earlier ones.
    pub(crate) fn replace_all(&mut self, blocks: impl IntoIterator<Item = Block>) {
        self.cells = blocks
            .into_iter()
            .map(|block| (block.coordinate, block.material))
            .collect();
        debug_assert!(self.cells.keys().all(|c| self.bounds.contains(*c)));
    }

    /// Remove every block.
    pub(crate) fn clear(&mut self) {
        self.cells.clear();
    }
}
