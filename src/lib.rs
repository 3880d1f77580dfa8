//! # StickerKit
//!
//! An editing overlay for stickers placed on a canvas. Tapping an element
//! focuses it and shows an action cluster that follows the element as it
//! is moved, resized and rotated.
//!
//! ## Architecture
//!
//! StickerKit is organized as a workspace with multiple crates:
//!
//! 1. **stickerkit-core** - Element ids, 2D primitives, action roles, errors
//! 2. **stickerkit-settings** - Editor configuration (TOML/JSON)
//! 3. **stickerkit-editor** - Placement engine, drag gestures, edit coordinator
//! 4. **stickerkit** - This crate: re-exports, logging setup and a headless demo
//!
//! The editor never draws. A host view tree implements
//! [`EditorHost`](stickerkit_editor::EditorHost), feeds pointer events into an
//! [`EditCoordinator`] and applies the [`CommitBatch`]es it gets back.

pub use stickerkit_editor as editor;
pub use stickerkit_settings as settings;

pub use stickerkit_core::{
    ActionRole, Bounds, EditorError, ElementId, Point, Visibility,
};

pub use stickerkit_editor::{
    normalize_angle, pointer_angle, recompute, ClusterLayout, CommitBatch, EditCoordinator,
    EditorHost, ElementPose, HostCommand, LayoutPhase, PoseUpdate, SceneHost, TransformState,
};

pub use stickerkit_settings::{EditorConfig, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, defaulting to `info`
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with("info")
}

/// Initialize logging with `default_directive` as the base filter.
///
/// `RUST_LOG` directives are layered on top, so `RUST_LOG=stickerkit_editor=debug`
/// still enables gesture tracing when the configured level is `warn`.
pub fn init_logging_with(default_directive: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_directive.parse()?)
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
