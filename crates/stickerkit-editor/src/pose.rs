//! Element pose and the transform state of the focused element.
//!
//! An element is laid out by the host at a fixed layout origin with a
//! width and height; translation, rotation and scale are applied after
//! layout. Rotation and scale pivot on the element's own center, so the
//! visual center only depends on origin, size and translation.

use serde::{Deserialize, Serialize};
use stickerkit_core::{Bounds, ElementId, Point};

/// Current visual placement of one element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementPose {
    pub width: f64,
    pub height: f64,
    pub translation_x: f64,
    pub translation_y: f64,
    /// Degrees, clockwise; accumulates without wrapping.
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for ElementPose {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            translation_x: 0.0,
            translation_y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl ElementPose {
    /// Creates an untransformed pose of the given size.
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            ..Self::default()
        }
    }

    pub fn translation(&self) -> Point {
        Point::new(self.translation_x, self.translation_y)
    }

    /// Applies every field present in `update`.
    pub fn apply(&mut self, update: &PoseUpdate) {
        if let Some(width) = update.width {
            self.width = width.max(0.0);
        }
        if let Some(height) = update.height {
            self.height = height.max(0.0);
        }
        if let Some(tx) = update.translation_x {
            self.translation_x = tx;
        }
        if let Some(ty) = update.translation_y {
            self.translation_y = ty;
        }
        if let Some(rotation) = update.rotation {
            self.rotation = rotation;
        }
        if let Some(sx) = update.scale_x {
            self.scale_x = sx;
        }
        if let Some(sy) = update.scale_y {
            self.scale_y = sy;
        }
    }
}

/// A partial pose change sent to the host; `None` fields are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
}

impl PoseUpdate {
    /// A translation-only update.
    pub fn translation(x: f64, y: f64) -> Self {
        Self {
            translation_x: Some(x),
            translation_y: Some(y),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when every present field is a finite number.
    pub fn is_finite(&self) -> bool {
        [
            self.width,
            self.height,
            self.translation_x,
            self.translation_y,
            self.rotation,
            self.scale_x,
            self.scale_y,
        ]
        .into_iter()
        .flatten()
        .all(f64::is_finite)
    }
}

/// Single source of truth for the focused element's geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub id: ElementId,
    /// Pre-transform top-left corner, in the parent's coordinates.
    pub layout_origin: Point,
    /// The parent's top-left corner on screen.
    pub parent_origin: Point,
    pub pose: ElementPose,
}

impl TransformState {
    pub fn new(id: ElementId, layout_origin: Point, parent_origin: Point, pose: ElementPose) -> Self {
        Self {
            id,
            layout_origin,
            parent_origin,
            pose,
        }
    }

    /// Pre-transform layout box, in the parent's coordinates.
    pub fn layout_bounds(&self) -> Bounds {
        Bounds::from_origin_size(self.layout_origin, self.pose.width, self.pose.height)
    }

    /// Layout box shifted by the current translation, in the parent's
    /// coordinates. Rotation and scale are not folded in.
    pub fn translated_bounds(&self) -> Bounds {
        self.layout_bounds()
            .translated(self.pose.translation_x, self.pose.translation_y)
    }

    /// Visual center in the parent's coordinates.
    pub fn center(&self) -> Point {
        self.translated_bounds().center()
    }

    /// Visual center on screen.
    pub fn screen_center(&self) -> Point {
        self.parent_origin + self.center()
    }

    pub fn apply(&mut self, update: &PoseUpdate) {
        self.pose.apply(update);
    }
}
