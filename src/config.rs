//! TOML configuration for the dock host.
//!
//! Config keys: `logging.level`, `animation.duration_ms`, `animation.lifted_scale`,
//! `animation.easing`, `gesture.hold_delay_ms`, `gesture.slop`, `dock.items`,
//! `dock.item_size`, `dock.spacing`.
//!
//! The item order is never written back; the file is read-only input.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::app_dirs;
use crate::dock::DockSettings;
use crate::drag::{DRAG_SLOP, GestureSettings};
use crate::feedback::{DEFAULT_LIFTED_SCALE, Easing, FeedbackSettings, REST_SCALE};

/// File name of the config inside the app directory.
pub const CONFIG_FILE_NAME: &str = "dockshift.toml";

const MAX_LIFTED_SCALE: f32 = 2.0;
const MAX_DURATION_MS: u64 = 5_000;
const MAX_HOLD_DELAY_MS: u64 = 2_000;

/// Errors that may occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The app directory could not be resolved.
    #[error("No usable config directory: {0}")]
    Dir(#[from] app_dirs::AppDirError),
    /// Failed to read the config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
}

/// Aggregate configuration loaded from `dockshift.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DockConfig {
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub animation: AnimationSettings,
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub dock: LayoutSettings,
}

/// Config keys: `level`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Config keys: `duration_ms`, `lifted_scale`, `easing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSettings {
    /// Length of a full lift or settle transition.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    /// Scale of a lifted item.
    #[serde(default = "default_lifted_scale")]
    pub lifted_scale: f32,
    #[serde(default)]
    pub easing: Easing,
}

/// Config keys: `hold_delay_ms`, `slop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Press duration before an item lifts (0 = lift on press).
    #[serde(default)]
    pub hold_delay_ms: u64,
    /// Pointer travel allowed while a press is pending.
    #[serde(default = "default_slop")]
    pub slop: f32,
}

/// Config keys: `items`, `item_size`, `spacing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    /// Item names, left to right. Names double as item keys.
    #[serde(default = "default_items")]
    pub items: Vec<String>,
    /// Edge length of a resting item in logical pixels.
    #[serde(default = "default_item_size")]
    pub item_size: f32,
    /// Gap between items in logical pixels.
    #[serde(default = "default_spacing")]
    pub spacing: f32,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_duration_ms() -> u64 {
    200
}

fn default_lifted_scale() -> f32 {
    DEFAULT_LIFTED_SCALE
}

fn default_slop() -> f32 {
    DRAG_SLOP
}

fn default_items() -> Vec<String> {
    ["person", "message", "call", "camera", "photo"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn default_item_size() -> f32 {
    48.0
}

fn default_spacing() -> f32 {
    8.0
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            lifted_scale: default_lifted_scale(),
            easing: Easing::default(),
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            hold_delay_ms: 0,
            slop: default_slop(),
        }
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            items: default_items(),
            item_size: default_item_size(),
            spacing: default_spacing(),
        }
    }
}

impl DockConfig {
    /// Clamp out-of-range values and drop duplicate item names.
    pub fn normalized(mut self) -> Self {
        let animation = &mut self.animation;
        animation.duration_ms = animation.duration_ms.min(MAX_DURATION_MS);
        animation.lifted_scale = clamp_or(
            animation.lifted_scale,
            REST_SCALE,
            MAX_LIFTED_SCALE,
            DEFAULT_LIFTED_SCALE,
        );

        let gesture = &mut self.gesture;
        gesture.hold_delay_ms = gesture.hold_delay_ms.min(MAX_HOLD_DELAY_MS);
        gesture.slop = clamp_or(gesture.slop, 0.0, f32::MAX, DRAG_SLOP);

        let layout = &mut self.dock;
        let mut seen = std::collections::BTreeSet::new();
        layout.items.retain(|name| {
            let fresh = seen.insert(name.clone());
            if !fresh {
                warn!("Ignoring duplicate dock item {name:?}");
            }
            fresh
        });
        if layout.items.is_empty() {
            layout.items = default_items();
        }
        layout.item_size = clamp_or(layout.item_size, 16.0, 256.0, default_item_size());
        layout.spacing = clamp_or(layout.spacing, 0.0, 128.0, default_spacing());
        self
    }

    /// Tunables for the feedback animator.
    pub fn feedback_settings(&self) -> FeedbackSettings {
        FeedbackSettings {
            duration: Duration::from_millis(self.animation.duration_ms),
            lifted_scale: self.animation.lifted_scale,
            easing: self.animation.easing,
        }
    }

    /// Tunables for press qualification.
    pub fn gesture_settings(&self) -> GestureSettings {
        GestureSettings {
            hold_delay: Duration::from_millis(self.gesture.hold_delay_ms),
            slop: self.gesture.slop,
        }
    }

    /// Combined behavioural settings for a dock.
    pub fn dock_settings(&self) -> DockSettings {
        DockSettings {
            feedback: self.feedback_settings(),
            gesture: self.gesture_settings(),
        }
    }
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

/// Path of the config file inside the app directory.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::AppDirs::resolve()?.file(CONFIG_FILE_NAME))
}

/// Load the config from the app directory, returning defaults if missing.
pub fn load_or_default() -> Result<DockConfig, ConfigError> {
    let path = config_path()?;
    load_from(&path)
}

/// Load the config at `path`; a missing file yields defaults.
pub fn load_from(path: &Path) -> Result<DockConfig, ConfigError> {
    if !path.exists() {
        info!("No config at {}; using defaults", path.display());
        return Ok(DockConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: DockConfig = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(config.normalized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(dir: &Path, text: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, DockConfig::default());
        assert_eq!(config.dock.items.len(), 5);
        assert_eq!(
            config.feedback_settings().duration,
            Duration::from_millis(200)
        );
    }

    #[test]
    fn partial_file_fills_remaining_defaults() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "[animation]\neasing = \"ease_out_cubic\"\n\n[gesture]\nhold_delay_ms = 150\n",
        );
        let config = load_from(&path).unwrap();
        assert_eq!(config.animation.easing, Easing::EaseOutCubic);
        assert_eq!(config.animation.duration_ms, 200);
        assert_eq!(
            config.gesture_settings().hold_delay,
            Duration::from_millis(150)
        );
        assert_eq!(config.gesture.slop, DRAG_SLOP);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "[animation]\nlifted_scale = 0.4\nduration_ms = 90000\n\n[dock]\nitems = []\nitem_size = 2.0\n",
        );
        let config = load_from(&path).unwrap();
        assert_eq!(config.animation.lifted_scale, REST_SCALE);
        assert_eq!(config.animation.duration_ms, MAX_DURATION_MS);
        assert_eq!(config.dock.items, default_items());
        assert_eq!(config.dock.item_size, 16.0);
    }

    #[test]
    fn duplicate_items_are_dropped() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "[dock]\nitems = [\"call\", \"photo\", \"call\"]\n");
        let config = load_from(&path).unwrap();
        assert_eq!(config.dock.items, vec!["call", "photo"]);
    }

    #[test]
    fn invalid_toml_reports_path() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "[animation\nduration_ms = ");
        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { path: ref p, .. } if p == &path));
    }

    #[test]
    fn unknown_easing_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "[animation]\neasing = \"bounce\"\n");
        assert!(matches!(
            load_from(&path),
            Err(ConfigError::ParseToml { .. })
        ));
    }
}
