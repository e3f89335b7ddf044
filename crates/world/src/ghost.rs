//! Ghost cursor targeting.
//!
//! The ghost is the cell the next place/remove acts on when no explicit
//! target is given. Every update clamps into the grid, so out-of-range input
//! is absorbed silently.

use blockcraft_core::{Coordinate, Delta, GridBounds};
use glam::{Vec2, Vec3};

/// Currently targeted cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ghost {
    bounds: GridBounds,
    position: Coordinate,
}

impl Ghost {
    /// Ghost at the centre of the floor.
    pub fn new(bounds: GridBounds) -> Self {
        Self::at(bounds, bounds.center_floor())
    }

    /// Ghost at `position` (clamped).
    pub fn at(bounds: GridBounds, position: Coordinate) -> Self {
        Self {
            bounds,
            position: bounds.clamp(position),
        }
    }

    /// Targeted cell.
    pub fn position(&self) -> Coordinate {
        self.position
    }

    /// Jump to `c`, clamped into the grid.
    pub fn set(&mut self, c: Coordinate) {
        self.position = self.bounds.clamp(c);
    }

    /// Step by `delta`, clamping each axis.
    pub fn move_by(&mut self, delta: Delta) {
        self.set(self.position.offset(delta));
    }

    /// Retarget from a ground-plane hit.
    ///
    /// `point.x` is the width axis and `point.y` the depth axis. Only the
    /// horizontal position changes; the ghost keeps its height. Non-finite
    /// hits are ignored.
    pub fn set_from_plane_hit(&mut self, point: Vec2) {
        if !point.is_finite() {
            return;
        }
        let cell = point.floor();
        self.set(Coordinate::new(
            float_to_cell(cell.x),
            float_to_cell(cell.y),
            self.position.z,
        ));
    }

    /// Retarget to the cell adjacent to `block` across the face with `normal`.
    ///
    /// `normal` is in grid axes (x width, y depth, z height). Non-finite
    /// normals are ignored.
    pub fn set_from_block_face_hit(&mut self, block: Coordinate, normal: Vec3) {
        if !normal.is_finite() {
            return;
        }
        let step = normal.round();
        self.set(block.offset(Delta::new(
            float_to_cell(step.x),
            float_to_cell(step.y),
            float_to_cell(step.z),
        )));
    }
}

/// Convert a point from a Y-up renderer (x, up, z) into grid axes
/// (x width, y depth, z height).
pub fn render_to_grid(point: Vec3) -> Vec3 {
    Vec3::new(point.x, point.z, point.y)
}

// `as` saturates for out-of-range floats; clamping happens afterwards.
fn float_to_cell(value: f32) -> i32 {
    value as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> GridBounds {
        GridBounds::new(16, 16, 8).unwrap()
    }

    #[test]
    fn starts_at_floor_centre() {
        assert_eq!(Ghost::new(bounds()).position(), Coordinate::new(8, 8, 0));
    }

    #[test]
    fn move_by_clamps_silently() {
        let mut ghost = Ghost::at(bounds(), Coordinate::new(0, 15, 7));
        ghost.move_by(Delta::new(-1, 1, 1));
        assert_eq!(ghost.position(), Coordinate::new(0, 15, 7));
        ghost.move_by(Delta::new(100, -100, -100));
        assert_eq!(ghost.position(), Coordinate::new(15, 0, 0));
    }

    #[test]
    fn plane_hit_floors_and_keeps_height() {
        let mut ghost = Ghost::at(bounds(), Coordinate::new(0, 0, 3));
        ghost.set_from_plane_hit(Vec2::new(4.9, 2.1));
        assert_eq!(ghost.position(), Coordinate::new(4, 2, 3));
        ghost.set_from_plane_hit(Vec2::new(-0.5, 99.0));
        assert_eq!(ghost.position(), Coordinate::new(0, 15, 3));
    }

    #[test]
    fn plane_hit_ignores_nan() {
        let mut ghost = Ghost::at(bounds(), Coordinate::new(2, 2, 0));
        ghost.set_from_plane_hit(Vec2::new(f32::NAN, 1.0));
        assert_eq!(ghost.position(), Coordinate::new(2, 2, 0));
    }

    #[test]
    fn face_hit_steps_across_rounded_normal() {
        let mut ghost = Ghost::new(bounds());
        ghost.set_from_block_face_hit(Coordinate::new(3, 3, 0), Vec3::new(0.0, 0.0, 0.98));
        assert_eq!(ghost.position(), Coordinate::new(3, 3, 1));
        ghost.set_from_block_face_hit(Coordinate::new(3, 3, 0), Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(ghost.position(), Coordinate::new(2, 3, 0));
    }

    #[test]
    fn face_hit_clamps_at_the_edge() {
        let mut ghost = Ghost::new(bounds());
        ghost.set_from_block_face_hit(Coordinate::new(15, 0, 7), Vec3::new(1.0, -1.0, 1.0));
        assert_eq!(ghost.position(), Coordinate::new(15, 0, 7));
    }

    #[test]
    fn render_points_swap_up_axis() {
        let grid = render_to_grid(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(grid, Vec3::new(1.0, 3.0, 2.0));
    }
}
