//! Drag gesture controllers.
//!
//! Each controller is a small state machine: idle until a pointer-down,
//! dragging while it holds a session, idle again after pointer-up or cancel.
//! Controllers never touch the host. They read the focused element's
//! [`TransformState`] at down-time and turn each pointer-move into a
//! [`PoseUpdate`] that the coordinator commits.
//!
//! Cancel behaves exactly like up: the session is dropped and the last
//! applied pose stays, nothing is rolled back.

mod move_action;
mod resize_rotate;

pub use move_action::MoveGesture;
pub use resize_rotate::ResizeRotateGesture;

use crate::pose::{PoseUpdate, TransformState};
use stickerkit_core::{ActionRole, EditorError, Point};

/// Phase of a drag controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Dragging,
}

/// A pointer-driven drag on one action handle.
pub trait GestureController: std::fmt::Debug {
    /// The handle this controller is bound to.
    fn role(&self) -> ActionRole;

    fn phase(&self) -> GesturePhase;

    fn is_active(&self) -> bool {
        self.phase() == GesturePhase::Dragging
    }

    /// Opens a session from a fresh snapshot of the target.
    fn on_down(&mut self, pointer: Point, state: &TransformState) -> Result<(), EditorError>;

    /// Computes the pose change for the current pointer, if any.
    fn on_move(&mut self, pointer: Point) -> Result<Option<PoseUpdate>, EditorError>;

    /// Closes the session; the last applied pose is kept.
    fn on_up(&mut self, pointer: Point) -> Result<(), EditorError>;

    /// Drops the session without touching the pose.
    fn cancel(&mut self);
}
