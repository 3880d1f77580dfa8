//! Error handling for StickerKit
//!
//! The taxonomy is narrow: the editor is a pure-geometry core and every
//! fault is recovered locally. These types describe what went wrong so the
//! caller can log it; they are never surfaced to the end user.
//!
//! Uses `thiserror` for the `Display` and `Error` impls.

use crate::types::{ActionRole, ElementId};
use thiserror::Error;

/// Editor error type
///
/// Raised by the edit session when an event cannot be honoured.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// The operation targets an element that is not in the host tree
    #[error("Unknown element {id}")]
    UnknownElement {
        /// The id that could not be resolved.
        id: ElementId,
    },

    /// An action was triggered while no element is focused
    #[error("No element is focused")]
    NotFocused,

    /// A pointer-down arrived while another gesture session is live
    #[error("Gesture already in progress on the {role} handle")]
    GestureInProgress {
        /// The role holding the live session.
        role: ActionRole,
    },

    /// A move/up/cancel arrived without a preceding down
    #[error("No active gesture on the {role} handle")]
    NoActiveGesture {
        /// The role the stray event was addressed to.
        role: ActionRole,
    },

    /// The role is not bound to the requested kind of interaction
    #[error("The {role} handle does not accept this interaction")]
    UnsupportedInteraction {
        /// The role that rejected the interaction.
        role: ActionRole,
    },

    /// Geometry that would produce NaN or infinite values
    #[error("Degenerate geometry: {reason}")]
    DegenerateGeometry {
        /// What made the geometry degenerate.
        reason: String,
    },
}
