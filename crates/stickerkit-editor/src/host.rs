//! Boundary between the editor and the view tree that hosts it.
//!
//! The host owns layout, rendering and event delivery. It answers geometry
//! queries about its elements and applies the editor's [`CommitBatch`]es;
//! it calls back into the editor through [`LayoutPhase`] when its own
//! layout pass moves things.

use crate::command::CommitBatch;
use crate::pose::ElementPose;
use stickerkit_core::{Bounds, ElementId, Point};

/// Queries and commands the editor needs from its host.
pub trait EditorHost {
    /// Pre-transform top-left corner of an element, in the parent's
    /// coordinates. `None` when the element is not in the tree.
    fn layout_origin(&self, id: ElementId) -> Option<Point>;

    /// Current pose of an element.
    fn pose(&self, id: ElementId) -> Option<ElementPose>;

    /// Top-left corner of the editing surface on screen.
    fn parent_origin(&self) -> Point;

    /// Commits a batch of changes in one pass.
    fn apply(&mut self, batch: CommitBatch);

    fn contains(&self, id: ElementId) -> bool {
        self.layout_origin(id).is_some()
    }

    /// Pre-transform layout box of an element.
    fn layout_bounds(&self, id: ElementId) -> Option<Bounds> {
        let origin = self.layout_origin(id)?;
        let pose = self.pose(id)?;
        Some(Bounds::from_origin_size(origin, pose.width, pose.height))
    }
}

/// Layout callbacks the host drives on the editor.
pub trait LayoutPhase {
    /// The host measured its children; layout origins may have moved.
    fn on_children_bounds_known(&mut self);

    /// The host is about to redraw and wants the overlay state re-sent.
    fn on_request_redraw(&mut self);

    /// The host finished a layout pass.
    fn on_post_layout(&mut self);
}
