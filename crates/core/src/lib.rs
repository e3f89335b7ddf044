#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod bounds;
pub mod material;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// Re-export commonly used types
pub use bounds::{BoundsError, GridBounds};
pub use material::{Material, MaterialParseError};

/// Integer cell address inside the voxel grid.
///
/// `x` runs along the width axis, `y` along the depth axis and `z` is height.
/// Ordering is lexicographic by `(x, y, z)`, which gives deterministic
/// iteration when coordinates key a `BTreeMap`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Coordinate {
    /// Width axis.
    pub x: i32,
    /// Depth axis.
    pub y: i32,
    /// Height axis.
    pub z: i32,
}

impl Coordinate {
    /// The grid origin.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Create a coordinate from its components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Offset by `delta`, saturating at the `i32` range.
    pub fn offset(self, delta: Delta) -> Self {
        Self {
            x: self.x.saturating_add(delta.dx),
            y: self.y.saturating_add(delta.dy),
            z: self.z.saturating_add(delta.dz),
        }
    }

    /// The cell directly underneath this one (`z - 1`).
    pub fn below(self) -> Self {
        self.offset(Delta::DOWN)
    }

    /// Composite `"x,y,z"` key used by the persisted world map.
    pub fn key(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// Error returned when parsing an invalid `"x,y,z"` key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateParseError {
    /// The key did not have exactly three comma-separated parts.
    #[error("expected 3 components in coordinate key, found {0}")]
    Arity(usize),
    /// One of the parts was not an integer.
    #[error("invalid coordinate component: {0:?}")]
    Component(String),
}

impl FromStr for Coordinate {
    type Err = CoordinateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(CoordinateParseError::Arity(parts.len()));
        }
        let component = |part: &str| {
            part.parse::<i32>()
                .map_err(|_| CoordinateParseError::Component(part.to_string()))
        };
        Ok(Self::new(
            component(parts[0])?,
            component(parts[1])?,
            component(parts[2])?,
        ))
    }
}

/// Discrete cursor movement along the three grid axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Delta {
    /// Width-axis step.
    pub dx: i32,
    /// Depth-axis step.
    pub dy: i32,
    /// Height-axis step.
    pub dz: i32,
}

impl Delta {
    /// One step towards `x - 1`.
    pub const LEFT: Self = Self::new(-1, 0, 0);
    /// One step towards `x + 1`.
    pub const RIGHT: Self = Self::new(1, 0, 0);
    /// One step towards `y - 1` (away from the viewer).
    pub const FORWARD: Self = Self::new(0, -1, 0);
    /// One step towards `y + 1` (towards the viewer).
    pub const BACK: Self = Self::new(0, 1, 0);
    /// One step up.
    pub const UP: Self = Self::new(0, 0, 1);
    /// One step down.
    pub const DOWN: Self = Self::new(0, 0, -1);

    /// Create a delta from its components.
    pub const fn new(dx: i32, dy: i32, dz: i32) -> Self {
        Self { dx, dy, dz }
    }
}

/// A placed block: a cell plus the material occupying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    /// Cell occupied by the block.
    pub coordinate: Coordinate,
    /// Material tag (rendered by the presentation layer).
    pub material: Material,
}

impl Block {
    /// Create a block at `coordinate` made of `material`.
    pub const fn new(coordinate: Coordinate, material: Material) -> Self {
        Self {
            coordinate,
            material,
        }
    }
}
