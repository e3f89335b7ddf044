//! Grid bounds.
//!
//! The building grid is a fixed box of `width × depth × height` cells. Every
//! coordinate that reaches the world map, and every ghost position, has to fall
//! inside it.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::Coordinate;

/// Error returned when constructing bounds with a zero-sized axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("grid bounds must be positive on every axis (got {width}x{depth}x{height})")]
pub struct BoundsError {
    /// Requested width.
    pub width: u32,
    /// Requested depth.
    pub depth: u32,
    /// Requested height.
    pub height: u32,
}

/// Legal coordinate envelope for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBounds", into = "RawBounds")]
pub struct GridBounds {
    width: u32,
    depth: u32,
    height: u32,
}

#[derive(Serialize, Deserialize)]
struct RawBounds {
    width: u32,
    depth: u32,
    height: u32,
}

impl TryFrom<RawBounds> for GridBounds {
    type Error = BoundsError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        GridBounds::new(raw.width, raw.depth, raw.height)
    }
}

impl From<GridBounds> for RawBounds {
    fn from(bounds: GridBounds) -> Self {
        Self {
            width: bounds.width,
            depth: bounds.depth,
            height: bounds.height,
        }
    }
}

impl GridBounds {
    /// Default board used by the building module (16 × 16 × 8).
    pub const DEFAULT: Self = Self {
        width: 16,
        depth: 16,
        height: 8,
    };

    /// Create bounds, rejecting any zero dimension.
    ///
    /// Dimensions are capped at `i32::MAX` so every in-bounds cell fits a
    /// [`Coordinate`] component.
    pub fn new(width: u32, depth: u32, height: u32) -> Result<Self, BoundsError> {
        let max = i32::MAX as u32;
        let valid = |extent: u32| extent > 0 && extent <= max;
        if !(valid(width) && valid(depth) && valid(height)) {
            return Err(BoundsError {
                width,
                depth,
                height,
            });
        }
        Ok(Self {
            width,
            depth,
            height,
        })
    }

    /// Number of cells along the width (x) axis.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of cells along the depth (y) axis.
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of cells along the height (z) axis.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells in the grid.
    pub fn volume(&self) -> u64 {
        u64::from(self.width) * u64::from(self.depth) * u64::from(self.height)
    }

    /// Returns true when `c` lies inside the grid.
    pub fn contains(&self, c: Coordinate) -> bool {
        axis_contains(c.x, self.width)
            && axis_contains(c.y, self.depth)
            && axis_contains(c.z, self.height)
    }

    /// Clamp every component of `c` into the grid.
    pub fn clamp(&self, c: Coordinate) -> Coordinate {
        Coordinate {
            x: clamp_axis(c.x, self.width),
            y: clamp_axis(c.y, self.depth),
            z: clamp_axis(c.z, self.height),
        }
    }

    /// Ground-level cell at the centre of the board; the initial ghost position.
    pub fn center_floor(&self) -> Coordinate {
        Coordinate::new((self.width / 2) as i32, (self.depth / 2) as i32, 0)
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for GridBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.depth, self.height)
    }
}

fn axis_contains(value: i32, extent: u32) -> bool {
    value >= 0 && (value as u32) < extent
}

fn clamp_axis(value: i32, extent: u32) -> i32 {
    value.clamp(0, extent as i32 - 1)
}
