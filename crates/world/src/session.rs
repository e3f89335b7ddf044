//! Builder session: the command surface over world, history and ghost.
//!
//! Input and presentation layers hold a session and dispatch commands; they
//! never touch the world or history directly. Every command runs to
//! completion and reports a [`CommandOutcome`]; rule violations and storage
//! failures come back as rejected outcomes, never as errors.

use std::time::{Duration, Instant};

use blockcraft_core::{Block, Coordinate, Delta, GridBounds, Material};
use glam::{Vec2, Vec3};
use tracing::{info, warn};

use crate::command::{Command, CommandOutcome};
use crate::ghost::Ghost;
use crate::history::{History, HistoryEntry, HistoryError};
use crate::persist::{self, PersistError, DEFAULT_STORAGE_KEY};
use crate::placement::{self, PlacementError, RemoveError};
use crate::status::{StatusLine, DEFAULT_STATUS_TTL};
use crate::store::KeyValueStore;
use crate::world::WorldState;

/// Construction parameters for a [`BuilderSession`].
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Grid envelope.
    pub bounds: GridBounds,
    /// Key the project is saved under.
    pub storage_key: String,
    /// How long status messages stay visible.
    pub status_ttl: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            bounds: GridBounds::DEFAULT,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            status_ttl: DEFAULT_STATUS_TTL,
        }
    }
}

/// One user's building session.
pub struct BuilderSession<S> {
    world: WorldState,
    history: History,
    ghost: Ghost,
    material: Material,
    grid_visible: bool,
    status: StatusLine,
    store: S,
    storage_key: String,
}

impl<S: KeyValueStore> BuilderSession<S> {
    /// Empty session using `store` for save/load.
    pub fn new(options: SessionOptions, store: S) -> Self {
        Self {
            world: WorldState::new(options.bounds),
            history: History::new(),
            ghost: Ghost::new(options.bounds),
            material: Material::default(),
            grid_visible: true,
            status: StatusLine::new(options.status_ttl),
            store,
            storage_key: options.storage_key,
        }
    }

    /// Grid envelope.
    pub fn bounds(&self) -> GridBounds {
        self.world.bounds()
    }

    /// Read-only world view.
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Placed blocks in coordinate order.
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.world.blocks()
    }

    /// Read-only history view.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Currently targeted cell.
    pub fn ghost(&self) -> Coordinate {
        self.ghost.position()
    }

    /// Material used when a placement does not name one.
    pub fn material(&self) -> Material {
        self.material
    }

    /// Whether the floor grid should be drawn.
    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    /// Status message still visible at `now`.
    pub fn status_at(&self, now: Instant) -> Option<&str> {
        self.status.current_at(now)
    }

    /// Backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable backing store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Route a [`Command`] to the matching operation.
    pub fn dispatch(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::Place { target, material } => self.place(target, material),
            Command::Remove { target } => self.remove(target),
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::Save => self.save(),
            Command::Load => self.load(),
            Command::Reset => self.reset(),
            Command::SetMaterial(material) => self.set_material(material),
            Command::ToggleGrid => self.toggle_grid(),
            Command::MoveGhost(delta) => self.move_ghost(delta),
            Command::SetGhost(c) => self.set_ghost(c),
            Command::TargetPlane(point) => self.target_plane(point),
            Command::TargetFace { block, normal } => self.target_face(block, normal),
        }
    }

    /// Place a block at `target` (default: ghost) made of `material`
    /// (default: selected material).
    pub fn place(
        &mut self,
        target: Option<Coordinate>,
        material: Option<Material>,
    ) -> CommandOutcome {
        let target = target.unwrap_or(self.ghost.position());
        let material = material.unwrap_or(self.material);
        let outcome = match placement::place_block(
            &mut self.world,
            &mut self.history,
            target,
            material,
        ) {
            Ok(block) => CommandOutcome::ok(format!(
                "Block placed: {} at {}",
                block.material.label(),
                block.coordinate
            )),
            Err(err) => CommandOutcome::rejected(placement_message(&err)),
        };
        self.announce(outcome)
    }

    /// Remove the block at `target` (default: ghost).
    pub fn remove(&mut self, target: Option<Coordinate>) -> CommandOutcome {
        let target = target.unwrap_or(self.ghost.position());
        let outcome = match placement::remove_block(&mut self.world, &mut self.history, target)
        {
            Ok(block) => {
                CommandOutcome::ok(format!("Block removed ({})", block.material.label()))
            }
            Err(RemoveError::NothingToRemove { .. }) => {
                CommandOutcome::rejected("No block in that cell")
            }
        };
        self.announce(outcome)
    }

    /// Revert the most recent edit.
    pub fn undo(&mut self) -> CommandOutcome {
        let outcome = match self.history.undo(&mut self.world) {
            Ok(HistoryEntry::Place(_)) => CommandOutcome::ok("Undo: block removed"),
            Ok(HistoryEntry::Remove(_)) => CommandOutcome::ok("Undo: block restored"),
            Err(err) => CommandOutcome::rejected(history_message(err)),
        };
        self.announce(outcome)
    }

    /// Re-apply the most recently undone edit.
    pub fn redo(&mut self) -> CommandOutcome {
        let outcome = match self.history.redo(&mut self.world) {
            Ok(HistoryEntry::Place(_)) => CommandOutcome::ok("Redo: block placed"),
            Ok(HistoryEntry::Remove(_)) => CommandOutcome::ok("Redo: block removed"),
            Err(err) => CommandOutcome::rejected(history_message(err)),
        };
        self.announce(outcome)
    }

    /// Save blocks and selected material under the storage key.
    pub fn save(&mut self) -> CommandOutcome {
        let outcome = match persist::save_project(
            &mut self.store,
            &self.storage_key,
            &self.world,
            self.material,
        ) {
            Ok(count) => {
                info!(blocks = count, key = %self.storage_key, "project saved");
                CommandOutcome::ok("Project saved")
            }
            Err(err) => {
                warn!(%err, key = %self.storage_key, "failed to save project");
                CommandOutcome::rejected("Save failed")
            }
        };
        self.announce(outcome)
    }

    /// Replace the world with the saved project and clear the history.
    ///
    /// On any failure the session is left exactly as it was.
    pub fn load(&mut self) -> CommandOutcome {
        let outcome =
            match persist::load_project(&self.store, &self.storage_key, self.world.bounds()) {
                Ok(project) => {
                    self.world.replace_all(project.blocks);
                    if let Some(material) = project.material {
                        self.material = material;
                    }
                    self.history.clear();
                    info!(blocks = self.world.len(), key = %self.storage_key, "project loaded");
                    CommandOutcome::ok(format!("Project loaded ({} blocks)", self.world.len()))
                }
                Err(PersistError::NothingSaved) => CommandOutcome::rejected("No saved project"),
                Err(err) => {
                    warn!(%err, key = %self.storage_key, "failed to load project");
                    CommandOutcome::rejected("Load failed")
                }
            };
        self.announce(outcome)
    }

    /// Clear the world and both history stacks.
    pub fn reset(&mut self) -> CommandOutcome {
        self.world.clear();
        self.history.clear();
        self.announce(CommandOutcome::ok("Canvas reset"))
    }

    /// Select the material for subsequent placements.
    pub fn set_material(&mut self, material: Material) -> CommandOutcome {
        self.material = material;
        self.announce(CommandOutcome::ok(format!("Material: {}", material.label())))
    }

    /// Flip grid visibility and report the new state.
    pub fn toggle_grid(&mut self) -> CommandOutcome {
        self.grid_visible = !self.grid_visible;
        let message = if self.grid_visible {
            "Grid visible"
        } else {
            "Grid hidden"
        };
        self.announce(CommandOutcome::ok(message))
    }

    /// Step the ghost, clamped to the grid.
    pub fn move_ghost(&mut self, delta: Delta) -> CommandOutcome {
        self.ghost.move_by(delta);
        self.ghost_moved()
    }

    /// Jump the ghost to `c`, clamped to the grid.
    pub fn set_ghost(&mut self, c: Coordinate) -> CommandOutcome {
        self.ghost.set(c);
        self.ghost_moved()
    }

    /// Retarget the ghost from a ground-plane hit.
    pub fn target_plane(&mut self, point: Vec2) -> CommandOutcome {
        self.ghost.set_from_plane_hit(point);
        self.ghost_moved()
    }

    /// Retarget the ghost to the cell across a block face.
    pub fn target_face(&mut self, block: Coordinate, normal: Vec3) -> CommandOutcome {
        self.ghost.set_from_block_face_hit(block, normal);
        self.ghost_moved()
    }

    fn ghost_moved(&mut self) -> CommandOutcome {
        let message = format!("Ghost at {}", self.ghost.position());
        self.announce(CommandOutcome::ok(message))
    }

    fn announce(&mut self, outcome: CommandOutcome) -> CommandOutcome {
        self.status.post_at(outcome.message.clone(), Instant::now());
        outcome
    }
}

fn placement_message(err: &PlacementError) -> String {
    match err {
        PlacementError::OccupiedNoNeighbor { .. } => {
            "Cell occupied and no supported neighbor is free".to_string()
        }
        PlacementError::NoSupport { .. } => {
            "That block would float: nothing below or beside it".to_string()
        }
        PlacementError::OutOfBounds { target } => format!("Cell {target} is outside the grid"),
    }
}

fn history_message(err: HistoryError) -> &'static str {
    match err {
        HistoryError::NothingToUndo => "Nothing to undo",
        HistoryError::NothingToRedo => "Nothing to redo",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};

    fn session() -> BuilderSession<MemoryStore> {
        BuilderSession::new(SessionOptions::default(), MemoryStore::new())
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Rejected("offline".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Rejected("quota exceeded".into()))
        }
    }

    #[test]
    fn place_defaults_to_ghost_and_selected_material() {
        let mut s = session();
        s.set_material(Material::Glass);
        let out = s.place(None, None);
        assert!(out.success);
        assert_eq!(out.message, "Block placed: Glass at 8,8,0");
        assert_eq!(
            s.world().get(Coordinate::new(8, 8, 0)).map(|b| b.material),
            Some(Material::Glass)
        );
    }

    #[test]
    fn rejected_place_reports_reason() {
        let mut s = session();
        let out = s.place(Some(Coordinate::new(5, 5, 1)), None);
        assert!(!out.success);
        assert_eq!(out.message, "That block would float: nothing below or beside it");
        let out = s.place(Some(Coordinate::new(99, 0, 0)), None);
        assert_eq!(out.message, "Cell 99,0,0 is outside the grid");
    }

    #[test]
    fn remove_messages() {
        let mut s = session();
        let out = s.remove(None);
        assert_eq!(out, CommandOutcome::rejected("No block in that cell"));
        s.place(Some(Coordinate::ORIGIN), Some(Material::Oak));
        let out = s.remove(Some(Coordinate::ORIGIN));
        assert_eq!(out, CommandOutcome::ok("Block removed (Oak)"));
    }

    #[test]
    fn undo_redo_messages() {
        let mut s = session();
        assert_eq!(s.undo(), CommandOutcome::rejected("Nothing to undo"));
        assert_eq!(s.redo(), CommandOutcome::rejected("Nothing to redo"));
        s.place(Some(Coordinate::ORIGIN), None);
        s.remove(Some(Coordinate::ORIGIN));
        assert_eq!(s.undo().message, "Undo: block restored");
        assert_eq!(s.undo().message, "Undo: block removed");
        assert_eq!(s.redo().message, "Redo: block placed");
        assert_eq!(s.redo().message, "Redo: block removed");
    }

    #[test]
    fn toggle_grid_reports_new_state() {
        let mut s = session();
        assert!(s.grid_visible());
        assert_eq!(s.toggle_grid().message, "Grid hidden");
        assert!(!s.grid_visible());
        assert_eq!(s.toggle_grid().message, "Grid visible");
    }

    #[test]
    fn status_line_tracks_last_outcome() {
        let mut s = session();
        s.set_material(Material::Stone);
        assert_eq!(s.status_at(Instant::now()), Some("Material: Stone"));
        s.undo();
        assert_eq!(s.status_at(Instant::now()), Some("Nothing to undo"));
        assert_eq!(
            s.status_at(Instant::now() + DEFAULT_STATUS_TTL + Duration::from_millis(1)),
            None
        );
    }

    #[test]
    fn storage_failures_are_not_fatal() {
        let mut s = BuilderSession::new(SessionOptions::default(), FailingStore);
        s.place(Some(Coordinate::ORIGIN), None);
        assert_eq!(s.save(), CommandOutcome::rejected("Save failed"));
        assert_eq!(s.load(), CommandOutcome::rejected("Load failed"));
        assert_eq!(s.world().len(), 1);
        assert!(s.history().can_undo());
    }

    #[test]
    fn load_without_save_leaves_state_untouched() {
        let mut s = session();
        s.place(Some(Coordinate::ORIGIN), None);
        assert_eq!(s.load(), CommandOutcome::rejected("No saved project"));
        assert_eq!(s.world().len(), 1);
        assert!(s.history().can_undo());
    }

    #[test]
    fn corrupt_payload_leaves_state_untouched() {
        let mut s = session();
        s.store_mut()
            .set(DEFAULT_STORAGE_KEY, "{\"blocks\": 7}")
            .unwrap();
        s.place(Some(Coordinate::ORIGIN), None);
        s.set_material(Material::Grass);
        assert_eq!(s.load(), CommandOutcome::rejected("Load failed"));
        assert_eq!(s.world().len(), 1);
        assert_eq!(s.material(), Material::Grass);
        assert!(s.history().can_undo());
    }

    #[test]
    fn ghost_commands_clamp() {
        let mut s = session();
        assert_eq!(s.move_ghost(Delta::new(100, 0, 0)).message, "Ghost at 15,8,0");
        s.target_plane(Vec2::new(2.5, 3.5));
        assert_eq!(s.ghost(), Coordinate::new(2, 3, 0));
        s.target_face(Coordinate::new(2, 3, 0), Vec3::Z);
        assert_eq!(s.ghost(), Coordinate::new(2, 3, 1));
        s.set_ghost(Coordinate::new(-4, -4, -4));
        assert_eq!(s.ghost(), Coordinate::ORIGIN);
    }

    #[test]
    fn dispatch_routes_commands() {
        let mut s = session();
        let out = s.dispatch(Command::Place {
            target: Some(Coordinate::ORIGIN),
            material: Some(Material::Stone),
        });
        assert!(out.success);
        assert!(s.dispatch(Command::Undo).success);
        assert!(s.world().is_empty());
        assert!(s.dispatch(Command::Redo).success);
        assert_eq!(s.world().len(), 1);
        assert!(s.dispatch(Command::Reset).success);
        assert!(s.world().is_empty());
        assert!(!s.history().can_undo());
        assert!(!s.history().can_redo());
    }
}
