use blockcraft_core::GridBounds;
use blockcraft_input::{GestureConfig, DEFAULT_MAX_DURATION, DEFAULT_MAX_TRAVEL_PX};
use blockcraft_world::{SessionOptions, DEFAULT_STATUS_TTL, DEFAULT_STORAGE_KEY};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/blockcraft.toml";
const DEFAULT_SAVE_DIR: &str = "saves";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BuilderConfig {
    pub grid: GridConfig,
    pub storage: StorageConfig,
    pub status: StatusConfig,
    pub gesture: GestureSection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: u32,
    pub depth: u32,
    pub height: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        let bounds = GridBounds::DEFAULT;
        Self {
            width: bounds.width(),
            depth: bounds.depth(),
            height: bounds.height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Key the project is saved under.
    pub key: String,
    /// Directory holding one JSON file per key.
    pub directory: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
            directory: PathBuf::from(DEFAULT_SAVE_DIR),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StatusConfig {
    /// How long a status message stays visible.
    pub ttl_ms: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_STATUS_TTL.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GestureSection {
    pub max_travel_px: f32,
    pub max_duration_ms: u64,
}

impl Default for GestureSection {
    fn default() -> Self {
        Self {
            max_travel_px: DEFAULT_MAX_TRAVEL_PX,
            max_duration_ms: DEFAULT_MAX_DURATION.as_millis() as u64,
        }
    }
}

impl BuilderConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_lenient(&contents, path),
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "Builder config not found at {}. Using defaults",
                        path.display()
                    );
                }
                BuilderConfig::default()
            }
        }
    }

    fn from_toml_lenient(contents: &str, path: &Path) -> Self {
        match toml::from_str::<BuilderConfig>(contents) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!("Failed to parse {}: {err}. Using defaults", path.display());
                BuilderConfig::default()
            }
        }
    }

    /// Grid bounds, or the default grid when the configured one is invalid.
    pub fn bounds(&self) -> GridBounds {
        let GridConfig {
            width,
            depth,
            height,
        } = self.grid;
        match GridBounds::new(width, depth, height) {
            Ok(bounds) => bounds,
            Err(err) => {
                warn!("{err}. Using the default {} grid", GridBounds::DEFAULT);
                GridBounds::DEFAULT
            }
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        let storage_key = if self.storage.key.trim().is_empty() {
            warn!("Empty storage key. Using {DEFAULT_STORAGE_KEY}");
            DEFAULT_STORAGE_KEY.to_string()
        } else {
            self.storage.key.clone()
        };
        SessionOptions {
            bounds: self.bounds(),
            storage_key,
            status_ttl: Duration::from_millis(self.status.ttl_ms),
        }
    }

    pub fn gesture_config(&self) -> GestureConfig {
        let defaults = GestureConfig::default();
        let max_travel_px = if self.gesture.max_travel_px.is_finite()
            && self.gesture.max_travel_px > 0.0
        {
            self.gesture.max_travel_px
        } else {
            warn!(
                value = self.gesture.max_travel_px,
                "Invalid gesture.max_travel_px. Using default"
            );
            defaults.max_travel_px
        };
        let max_duration = if self.gesture.max_duration_ms > 0 {
            Duration::from_millis(self.gesture.max_duration_ms)
        } else {
            warn!("Invalid gesture.max_duration_ms of 0. Using default");
            defaults.max_duration
        };
        GestureConfig {
            max_travel_px,
            max_duration,
        }
    }
}
