//! Block materials.
//!
//! The palette is a closed set of five materials. Their lowercase labels are
//! part of the persisted project format and must stay stable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Material tag carried by every block.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    /// Grey stone.
    Stone,
    /// Light wooden planks.
    #[default]
    Wood,
    /// Dark oak planks.
    Oak,
    /// Translucent glass.
    Glass,
    /// Grass turf.
    Grass,
}

/// Error returned when a label does not name a material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown material: {0:?}")]
pub struct MaterialParseError(pub String);

impl Material {
    /// Every material in palette order (the order of the number-key shortcuts).
    pub const ALL: [Material; 5] = [
        Material::Stone,
        Material::Wood,
        Material::Oak,
        Material::Glass,
        Material::Grass,
    ];

    /// Stable storage label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stone => "stone",
            Self::Wood => "wood",
            Self::Oak => "oak",
            Self::Glass => "glass",
            Self::Grass => "grass",
        }
    }

    /// Human-readable label for status messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stone => "Stone",
            Self::Wood => "Wood",
            Self::Oak => "Oak",
            Self::Glass => "Glass",
            Self::Grass => "Grass",
        }
    }

    /// Zero-based position in [`Material::ALL`].
    pub const fn palette_index(self) -> usize {
        match self {
            Self::Stone => 0,
            Self::Wood => 1,
            Self::Oak => 2,
            Self::Glass => 3,
            Self::Grass => 4,
        }
    }

    /// Look up a material by zero-based palette position.
    pub fn from_palette_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Material {
    type Err = MaterialParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MaterialParseError(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        let labels: Vec<&str> = Material::ALL.iter().map(|m| m.as_str()).collect();
        assert_eq!(labels, ["stone", "wood", "oak", "glass", "grass"]);
        assert_eq!(Material::default(), Material::Wood);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Glass".parse::<Material>(), Ok(Material::Glass));
        assert_eq!(" OAK ".parse::<Material>(), Ok(Material::Oak));
        assert!("lava".parse::<Material>().is_err());
    }

    #[test]
    fn serde_uses_storage_labels() {
        assert_eq!(serde_json::to_string(&Material::Grass).unwrap(), "\"grass\"");
        let m: Material = serde_json::from_str("\"stone\"").unwrap();
        assert_eq!(m, Material::Stone);
    }

    #[test]
    fn palette_index_roundtrips() {
        for (i, m) in Material::ALL.iter().enumerate() {
            assert_eq!(m.palette_index(), i);
            assert_eq!(Material::from_palette_index(i), Some(*m));
        }
        assert_eq!(Material::from_palette_index(5), None);
    }
}
