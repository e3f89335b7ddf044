#![warn(missing_docs)]
//! Window input translated into builder commands.
//!
//! [`InputRouter`] consumes winit window events, keeps the held modifiers and
//! the cursor position, and emits at most one [`Command`] per event.

mod gesture;
mod keymap;

pub use gesture::{
    Gesture, GestureConfig, GestureTracker, PointerButton, DEFAULT_MAX_DURATION,
    DEFAULT_MAX_TRAVEL_PX,
};
pub use keymap::command_for_key;

use blockcraft_world::Command;
use glam::Vec2;
use std::time::Instant;
use tracing::trace;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

/// Routes window events to builder commands.
#[derive(Debug, Default)]
pub struct InputRouter {
    modifiers: ModifiersState,
    cursor: Vec2,
    gestures: GestureTracker,
}

impl InputRouter {
    /// Create a router with the given click thresholds.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            modifiers: ModifiersState::empty(),
            cursor: Vec2::ZERO,
            gestures: GestureTracker::new(config),
        }
    }

    /// Last known cursor position in physical pixels.
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Currently held modifiers.
    pub fn modifiers(&self) -> ModifiersState {
        self.modifiers
    }

    /// Process a window event, timestamped now.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<Command> {
        self.handle_event_at(event, Instant::now())
    }

    /// Process a window event that happened at `now`.
    pub fn handle_event_at(&mut self, event: &WindowEvent, now: Instant) -> Option<Command> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
                None
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(keycode),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => self.key_pressed(*keycode),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32));
                None
            }
            WindowEvent::CursorLeft { .. } | WindowEvent::Focused(false) => {
                self.gestures.cancel();
                None
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = PointerButton::from_mouse(*button)?;
                match state {
                    ElementState::Pressed => {
                        self.pointer_pressed(button, now);
                        None
                    }
                    ElementState::Released => self.pointer_released(button, now),
                }
            }
            _ => None,
        }
    }

    /// Key press with the currently held modifiers.
    pub fn key_pressed(&mut self, key: KeyCode) -> Option<Command> {
        let command = command_for_key(key, self.modifiers);
        trace!(?key, ?command, "key pressed");
        command
    }

    /// Record a cursor move.
    pub fn cursor_moved(&mut self, position: Vec2) {
        self.cursor = position;
        self.gestures.pointer_moved(position);
    }

    /// Pointer button went down at the current cursor position.
    pub fn pointer_pressed(&mut self, button: PointerButton, now: Instant) {
        self.gestures.pointer_down(button, self.cursor, now);
    }

    /// Pointer button went up; a click produces an edit at the ghost.
    pub fn pointer_released(&mut self, button: PointerButton, now: Instant) -> Option<Command> {
        let gesture = self.gestures.pointer_up(button, self.cursor, now)?;
        trace!(?gesture, "pointer released");
        gesture.command()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn router_click_places_and_drag_does_nothing() {
        let mut router = InputRouter::new(GestureConfig::default());
        let t0 = Instant::now();

        router.cursor_moved(Vec2::new(100.0, 100.0));
        router.pointer_pressed(PointerButton::Primary, t0);
        assert_eq!(
            router.pointer_released(PointerButton::Primary, t0 + Duration::from_millis(50)),
            Some(Command::Place {
                target: None,
                material: None
            })
        );

        router.pointer_pressed(PointerButton::Primary, t0);
        router.cursor_moved(Vec2::new(140.0, 100.0));
        assert_eq!(
            router.pointer_released(PointerButton::Primary, t0 + Duration::from_millis(50)),
            None
        );
        assert_eq!(router.cursor(), Vec2::new(140.0, 100.0));
    }

    #[test]
    fn router_keys_use_held_modifiers() {
        let mut router = InputRouter::default();
        assert_eq!(
            router.key_pressed(KeyCode::KeyZ),
            None,
            "plain Z is unbound"
        );
        router.modifiers = ModifiersState::CONTROL;
        assert_eq!(router.key_pressed(KeyCode::KeyZ), Some(Command::Undo));
    }
}
