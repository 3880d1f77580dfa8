//! # StickerKit Core
//!
//! Core types and errors shared by the StickerKit crates.
//! Provides the element identifiers, the 2D primitives the transform engine
//! works in, and the error taxonomy of the editing overlay.

pub mod error;
pub mod types;

pub use error::EditorError;
pub use types::{ActionRole, Bounds, ElementId, Point, Visibility};
