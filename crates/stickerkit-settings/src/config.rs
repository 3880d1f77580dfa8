//! Configuration for the sticker editor
//!
//! Provides configuration file handling, defaults, and validation.
//! Supports JSON and TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Cluster settings (button metrics used for hit-testing)
//! - Gesture settings (degenerate-geometry tolerance, size clamp)
//! - Logging settings (default filter directive)

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "stickerkit";
const CONFIG_FILE: &str = "editor.toml";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Action cluster metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterSettings {
    /// Diameter of one action button
    pub button_size: f64,
    /// Extra radius around a button that still counts as a hit
    pub hit_slop: f64,
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            button_size: 48.0,
            hit_slop: 8.0,
        }
    }
}

impl ClusterSettings {
    /// Radius within which a pointer hits a button.
    pub fn hit_radius(&self) -> f64 {
        self.button_size / 2.0 + self.hit_slop
    }
}

/// Gesture tolerances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    /// Distances below this count as "pointer exactly at center"
    pub degenerate_epsilon: f64,
    /// Lower bound for width and height produced by a resize (0 disables)
    pub min_size: f64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            degenerate_epsilon: 1e-6,
            min_size: 0.0,
        }
    }
}

/// Logging preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorConfig {
    pub cluster: ClusterSettings,
    pub gesture: GestureSettings,
    pub logging: LoggingSettings,
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location: `<config_dir>/stickerkit/editor.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load the config from the default location, falling back to defaults
    /// when no file exists yet.
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        config.validate()?;
        tracing::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SettingsError::SaveError(format!("{}: {}", parent.display(), e)))?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.cluster.button_size.is_finite() && self.cluster.button_size > 0.0) {
            return Err(out_of_range("cluster.button_size", self.cluster.button_size));
        }
        if !(self.cluster.hit_slop.is_finite() && self.cluster.hit_slop >= 0.0) {
            return Err(out_of_range("cluster.hit_slop", self.cluster.hit_slop));
        }
        if !(self.gesture.degenerate_epsilon.is_finite() && self.gesture.degenerate_epsilon > 0.0)
        {
            return Err(out_of_range(
                "gesture.degenerate_epsilon",
                self.gesture.degenerate_epsilon,
            ));
        }
        if !(self.gesture.min_size.is_finite() && self.gesture.min_size >= 0.0) {
            return Err(out_of_range("gesture.min_size", self.gesture.min_size));
        }
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::UnknownLogLevel(self.logging.level.clone()));
        }
        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn out_of_range(key: &str, value: f64) -> ConfigError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cluster.hit_radius(), 32.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = EditorConfig::default();
        config.cluster.button_size = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange { .. })
        ));

        let mut config = EditorConfig::default();
        config.gesture.degenerate_epsilon = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = EditorConfig::default();
        config.logging.level = "chatty".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownLogLevel(_))
        ));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: EditorConfig = toml::from_str("[cluster]\nbutton_size = 64.0\n").unwrap();
        assert_eq!(config.cluster.button_size, 64.0);
        assert_eq!(config.cluster.hit_slop, 8.0);
        assert_eq!(config.gesture, GestureSettings::default());
    }
}
