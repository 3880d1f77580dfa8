//! Angle and distance helpers for the transform engine.
//!
//! Two angle conventions live here and must never be mixed in one
//! computation:
//!
//! - **Cluster convention** ([`normalize_angle`], [`corner_angle`],
//!   [`polar_offset`]): degrees measured clockwise from "up" (negative Y),
//!   which is how a circular placement constraint expresses angles.
//! - **Drag convention** ([`pointer_angle`]): raw `atan2(dx, dy)` of the
//!   pivot-to-pointer offset wrapped into `[0, 360)`. Only differences of two
//!   drag angles are meaningful; they grow when the pointer turns
//!   counter-clockwise on screen.

use nalgebra::{Rotation2, Vector2};
use stickerkit_core::Point;

/// Wraps an angle into `[0, 360)` and shifts it by +90 degrees into the
/// cluster convention.
///
/// Non-finite input maps to `0.0` so callers never see NaN.
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = (angle.rem_euclid(360.0) + 90.0) % 360.0;
    // rem_euclid may round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Cluster-convention angle from `center` to `corner`.
///
/// A corner that coincides with the center yields `normalize_angle(0) = 90`.
pub fn corner_angle(center: Point, corner: Point) -> f64 {
    let dx = corner.x - center.x;
    let dy = corner.y - center.y;
    if dx == 0.0 && dy == 0.0 {
        return normalize_angle(0.0);
    }
    normalize_angle(dy.atan2(dx).to_degrees())
}

/// Drag-convention angle of `pointer` around `pivot`, in `[0, 360)`.
///
/// A pointer exactly on the pivot yields `0.0`; use [`try_pointer_angle`]
/// when the caller needs to keep its previous angle instead.
pub fn pointer_angle(pointer: Point, pivot: Point) -> f64 {
    let dx = pivot.x - pointer.x;
    let dy = pivot.y - pointer.y;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    let degrees = (dx.atan2(dy).to_degrees() + 360.0) % 360.0;
    if degrees >= 360.0 {
        degrees - 360.0
    } else {
        degrees
    }
}

/// Like [`pointer_angle`], but `None` when the pointer is within `epsilon`
/// of the pivot and the angle is undefined.
pub fn try_pointer_angle(pointer: Point, pivot: Point, epsilon: f64) -> Option<f64> {
    if pointer.distance_to(pivot) <= epsilon {
        None
    } else {
        Some(pointer_angle(pointer, pivot))
    }
}

/// Length of the diagonal of a `width` x `height` box.
pub fn diagonal(width: f64, height: f64) -> f64 {
    width.hypot(height)
}

/// Offset of a point at `radius` and cluster-convention `angle` from its
/// anchor.
pub fn polar_offset(radius: f64, angle: f64) -> Point {
    let theta = angle.to_radians();
    Point::new(radius * theta.sin(), -radius * theta.cos())
}

/// Rotates `point` about `pivot` by `degrees` (clockwise on screen).
pub fn rotate_about(point: Point, pivot: Point, degrees: f64) -> Point {
    if degrees == 0.0 {
        return point;
    }
    let rotation = Rotation2::new(degrees.to_radians());
    let v = rotation * Vector2::new(point.x - pivot.x, point.y - pivot.y);
    Point::new(pivot.x + v.x, pivot.y + v.y)
}
