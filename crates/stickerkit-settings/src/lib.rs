//! StickerKit Settings Crate
//!
//! Handles editor configuration: action cluster metrics, gesture tolerances
//! and the default log filter.

pub mod config;
pub mod error;

pub use config::{ClusterSettings, EditorConfig, GestureSettings, LoggingSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
