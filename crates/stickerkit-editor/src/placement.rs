//! Action-cluster placement.
//!
//! Every button sits on a circle around the target's layout center,
//! expressed as a radius and a cluster-convention angle (clockwise from
//! "up"). The cluster container then receives the target's translation and
//! rotation, pivoting on the target's center, so the whole group follows
//! the target rigidly.
//!
//! Corner labels are fixed to the target's unrotated local frame: the
//! delete button stays on the corner that was top-left before rotation, and
//! turns with the element. The left-bottom corner has no button; the move
//! button sits top-center at half the target's height instead.
//!
//! [`recompute`] is a pure function of the transform state. Nothing is
//! cached between calls.

use crate::geometry::{corner_angle, diagonal, polar_offset, rotate_about};
use crate::pose::{ElementPose, TransformState};
use serde::{Deserialize, Serialize};
use stickerkit_core::{ActionRole, Bounds, ElementId, Point};

/// Polar position of one button relative to the target's center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionSlot {
    pub role: ActionRole,
    pub radius: f64,
    /// Cluster-convention degrees.
    pub angle: f64,
}

/// Cluster-convention angles of the four corners of a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerAngles {
    pub left_top: f64,
    pub right_top: f64,
    pub left_bottom: f64,
    pub right_bottom: f64,
}

impl CornerAngles {
    pub fn of(bounds: &Bounds) -> Self {
        let center = bounds.center();
        Self {
            left_top: corner_angle(center, bounds.left_top()),
            right_top: corner_angle(center, bounds.right_top()),
            left_bottom: corner_angle(center, bounds.left_bottom()),
            right_bottom: corner_angle(center, bounds.right_bottom()),
        }
    }
}

/// Post-layout transform of the cluster container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterTransform {
    pub translation: Point,
    /// Degrees, clockwise.
    pub rotation: f64,
    /// Rotation pivot in the parent's coordinates (the target's layout center).
    pub pivot: Point,
}

impl ClusterTransform {
    /// Maps a point from the cluster's layout frame to the parent's frame:
    /// rotate about the pivot, then translate.
    pub fn apply(&self, point: Point) -> Point {
        rotate_about(point, self.pivot, self.rotation) + self.translation
    }
}

/// Everything the host needs to place the cluster around one target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterLayout {
    pub target: ElementId,
    /// Target's layout center in the parent's coordinates; slot anchor.
    pub anchor: Point,
    pub parent_origin: Point,
    /// Indexed in [`ActionRole::ALL`] order.
    pub slots: [ActionSlot; 4],
    pub transform: ClusterTransform,
}

impl ClusterLayout {
    pub fn slot(&self, role: ActionRole) -> &ActionSlot {
        &self.slots[slot_index(role)]
    }

    /// Center of a button on screen, with the cluster transform applied.
    pub fn button_center(&self, role: ActionRole) -> Point {
        let slot = self.slot(role);
        let local = self.anchor + polar_offset(slot.radius, slot.angle);
        self.parent_origin + self.transform.apply(local)
    }

    /// Screen centers of all buttons, in [`ActionRole::ALL`] order.
    pub fn button_centers(&self) -> [(ActionRole, Point); 4] {
        ActionRole::ALL.map(|role| (role, self.button_center(role)))
    }

    /// The button nearest to `point` within `hit_radius`, if any.
    pub fn role_at(&self, point: Point, hit_radius: f64) -> Option<ActionRole> {
        self.button_centers()
            .into_iter()
            .map(|(role, center)| (role, center.distance_to(point)))
            .filter(|(_, distance)| *distance <= hit_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(role, _)| role)
    }
}

fn slot_index(role: ActionRole) -> usize {
    match role {
        ActionRole::Delete => 0,
        ActionRole::Pin => 1,
        ActionRole::Move => 2,
        ActionRole::ResizeRotate => 3,
    }
}

/// Computes the slots for a target laid out at `target_box`.
pub fn slots_for(target_box: &Bounds) -> [ActionSlot; 4] {
    let corners = CornerAngles::of(target_box);
    let corner_radius = diagonal(target_box.width(), target_box.height()) / 2.0;

    [
        ActionSlot {
            role: ActionRole::Delete,
            radius: corner_radius,
            angle: corners.left_top,
        },
        ActionSlot {
            role: ActionRole::Pin,
            radius: corner_radius,
            angle: corners.right_top,
        },
        ActionSlot {
            role: ActionRole::Move,
            radius: target_box.height() / 2.0,
            angle: 0.0,
        },
        ActionSlot {
            role: ActionRole::ResizeRotate,
            radius: corner_radius,
            angle: corners.right_bottom,
        },
    ]
}

/// Lays out the cluster for a target given its pre-transform box and pose.
pub fn layout_for(
    target: ElementId,
    target_box: &Bounds,
    pose: &ElementPose,
    parent_origin: Point,
) -> ClusterLayout {
    let anchor = target_box.center();
    ClusterLayout {
        target,
        anchor,
        parent_origin,
        slots: slots_for(target_box),
        transform: ClusterTransform {
            translation: pose.translation(),
            rotation: pose.rotation,
            pivot: anchor,
        },
    }
}

/// Recomputes the cluster layout from the focused element's state.
pub fn recompute(state: &TransformState) -> ClusterLayout {
    layout_for(
        state.id,
        &state.layout_bounds(),
        &state.pose,
        state.parent_origin,
    )
}
