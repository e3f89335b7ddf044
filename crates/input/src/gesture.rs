//! Click versus drag classification for pointer input.
//!
//! A camera orbit starts with the same button press as a placement click, so
//! a press only counts as a click when the pointer barely moved and was
//! released quickly.

use blockcraft_world::Command;
use glam::Vec2;
use std::time::{Duration, Instant};
use winit::event::MouseButton;

/// Default maximum pointer travel for a click, in physical pixels.
pub const DEFAULT_MAX_TRAVEL_PX: f32 = 5.0;
/// Default maximum press duration for a click.
pub const DEFAULT_MAX_DURATION: Duration = Duration::from_millis(300);

/// Pointer buttons the builder distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Usually the left mouse button.
    Primary,
    /// Usually the right mouse button.
    Secondary,
    /// Middle button or wheel press.
    Middle,
}

impl PointerButton {
    /// Map a winit button; extra buttons are not tracked.
    pub fn from_mouse(button: MouseButton) -> Option<Self> {
        match button {
            MouseButton::Left => Some(Self::Primary),
            MouseButton::Right => Some(Self::Secondary),
            MouseButton::Middle => Some(Self::Middle),
            _ => None,
        }
    }
}

/// Click thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Accumulated travel must stay below this.
    pub max_travel_px: f32,
    /// Press duration must stay below this.
    pub max_duration: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            max_travel_px: DEFAULT_MAX_TRAVEL_PX,
            max_duration: DEFAULT_MAX_DURATION,
        }
    }
}

/// Classified pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Short, nearly stationary press.
    Click(PointerButton),
    /// Anything else; left to the camera controller.
    Drag(PointerButton),
}

impl Gesture {
    /// Grid command triggered by this gesture, if any.
    pub fn command(self) -> Option<Command> {
        match self {
            Gesture::Click(PointerButton::Primary) => Some(Command::Place {
                target: None,
                material: None,
            }),
            Gesture::Click(PointerButton::Secondary) => Some(Command::Remove { target: None }),
            Gesture::Click(PointerButton::Middle) | Gesture::Drag(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Press {
    button: PointerButton,
    last: Vec2,
    travel: f32,
    started: Instant,
}

/// Tracks one pointer press at a time.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    config: GestureConfig,
    press: Option<Press>,
}

impl GestureTracker {
    /// Tracker with the given thresholds.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            press: None,
        }
    }

    /// Active thresholds.
    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// Returns true while a press is being tracked.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Start tracking a press. A second down replaces the first.
    pub fn pointer_down(&mut self, button: PointerButton, position: Vec2, now: Instant) {
        self.press = Some(Press {
            button,
            last: position,
            travel: 0.0,
            started: now,
        });
    }

    /// Accumulate path length while pressed.
    pub fn pointer_moved(&mut self, position: Vec2) {
        if let Some(press) = self.press.as_mut() {
            press.travel += press.last.distance(position);
            press.last = position;
        }
    }

    /// Finish the press. Returns `None` when no press of `button` is active.
    pub fn pointer_up(
        &mut self,
        button: PointerButton,
        position: Vec2,
        now: Instant,
    ) -> Option<Gesture> {
        match self.press {
            Some(press) if press.button == button => {}
            _ => return None,
        }
        self.pointer_moved(position);
        let press = self.press.take()?;
        let elapsed = now.saturating_duration_since(press.started);
        if press.travel < self.config.max_travel_px && elapsed < self.config.max_duration {
            Some(Gesture::Click(button))
        } else {
            Some(Gesture::Drag(button))
        }
    }

    /// Forget any active press (e.g. the cursor left the window).
    pub fn cancel(&mut self) {
        self.press = None;
    }
}
