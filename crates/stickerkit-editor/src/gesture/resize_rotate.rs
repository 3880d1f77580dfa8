use super::{GestureController, GesturePhase};
use crate::geometry::{diagonal, try_pointer_angle};
use crate::pose::{ElementPose, PoseUpdate, TransformState};
use stickerkit_core::{ActionRole, EditorError, Point};
use stickerkit_settings::GestureSettings;
use tracing::debug;

/// Reference the scale ratio and the rotation delta are measured against.
#[derive(Debug, Clone, Copy)]
struct Anchor {
    diagonal: f64,
    angle: f64,
}

#[derive(Debug, Clone, Copy)]
struct ResizeRotateSession {
    initial: ElementPose,
    /// Target center on screen at down-time; fixed for the whole drag.
    center: Point,
    /// `None` while the pointer has not left the center yet.
    anchor: Option<Anchor>,
}

/// Combined uniform scale and rotation from one corner handle.
///
/// The pointer's offset from the target center is read as the half-extents
/// of a box: its diagonal against the down-time diagonal gives the scale
/// ratio, its angle against the down-time angle gives the rotation delta.
/// Translation compensates for the size change so the center stays put.
#[derive(Debug)]
pub struct ResizeRotateGesture {
    settings: GestureSettings,
    session: Option<ResizeRotateSession>,
}

impl ResizeRotateGesture {
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings,
            session: None,
        }
    }

    /// Diagonal of the box whose half-extents are the pointer's offset from
    /// `center`.
    fn extent_diagonal(pointer: Point, center: Point) -> f64 {
        let width = 2.0 * (pointer.x - center.x).abs();
        let height = 2.0 * (pointer.y - center.y).abs();
        diagonal(width, height)
    }

    fn anchor_at(&self, pointer: Point, center: Point) -> Option<Anchor> {
        let angle = try_pointer_angle(pointer, center, self.settings.degenerate_epsilon)?;
        let diagonal = Self::extent_diagonal(pointer, center);
        if diagonal <= self.settings.degenerate_epsilon || !diagonal.is_finite() {
            return None;
        }
        Some(Anchor { diagonal, angle })
    }

    /// Keeps the smaller side at or above `min_size` without breaking the
    /// aspect ratio.
    fn clamp_ratio(&self, initial: &ElementPose, ratio: f64) -> f64 {
        let min_size = self.settings.min_size;
        let smaller = initial.width.min(initial.height);
        if min_size <= 0.0 || smaller <= 0.0 {
            return ratio;
        }
        ratio.max(min_size / smaller)
    }
}

impl Default for ResizeRotateGesture {
    fn default() -> Self {
        Self::new(GestureSettings::default())
    }
}

impl GestureController for ResizeRotateGesture {
    fn role(&self) -> ActionRole {
        ActionRole::ResizeRotate
    }

    fn phase(&self) -> GesturePhase {
        if self.session.is_some() {
            GesturePhase::Dragging
        } else {
            GesturePhase::Idle
        }
    }

    fn on_down(&mut self, pointer: Point, state: &TransformState) -> Result<(), EditorError> {
        if self.session.is_some() {
            return Err(EditorError::GestureInProgress { role: self.role() });
        }
        let center = state.screen_center();
        let anchor = self.anchor_at(pointer, center);
        match anchor {
            Some(a) => debug!(
                "resize down {} target={} w/h({},{}) center={} diagonal={:.3} angle={:.3}",
                pointer, state.id, state.pose.width, state.pose.height, center, a.diagonal, a.angle
            ),
            None => debug!(
                "resize down {} at center {} of {}, waiting for the pointer to leave it",
                pointer, center, state.id
            ),
        }
        self.session = Some(ResizeRotateSession {
            initial: state.pose,
            center,
            anchor,
        });
        Ok(())
    }

    fn on_move(&mut self, pointer: Point) -> Result<Option<PoseUpdate>, EditorError> {
        let role = self.role();
        let Some(session) = self.session else {
            return Err(EditorError::NoActiveGesture { role });
        };

        let Some(anchor) = session.anchor else {
            // Down landed on the center: the first position off-center
            // becomes the reference, so nothing changes yet.
            let anchor = self.anchor_at(pointer, session.center);
            if let Some(s) = self.session.as_mut() {
                s.anchor = anchor;
            }
            return Ok(None);
        };

        let current = Self::extent_diagonal(pointer, session.center);
        let angle = match try_pointer_angle(pointer, session.center, self.settings.degenerate_epsilon)
        {
            Some(angle) if current > self.settings.degenerate_epsilon => angle,
            // Angle and ratio are undefined on the center; keep the last pose.
            _ => return Ok(None),
        };

        let initial = session.initial;
        let ratio = self.clamp_ratio(&initial, current / anchor.diagonal);
        let width = initial.width * ratio;
        let height = initial.height * ratio;
        let translation_x = initial.translation_x + (width - initial.width) * -0.5;
        let translation_y = initial.translation_y + (height - initial.height) * -0.5;
        let rotation = initial.rotation + (anchor.angle - angle);

        debug!(
            "resize move {} diagonal={:.3} ratio={:.4} w/h({:.2},{:.2}) angle={:.3} rotation={:.3}",
            pointer, current, ratio, width, height, angle, rotation
        );

        let update = PoseUpdate {
            width: Some(width),
            height: Some(height),
            translation_x: Some(translation_x),
            translation_y: Some(translation_y),
            rotation: Some(rotation),
            ..PoseUpdate::default()
        };
        if !update.is_finite() {
            return Err(EditorError::DegenerateGeometry {
                reason: format!("resize to {} overflows the pose (ratio {})", pointer, ratio),
            });
        }
        Ok(Some(update))
    }

    fn on_up(&mut self, pointer: Point) -> Result<(), EditorError> {
        if self.session.take().is_none() {
            return Err(EditorError::NoActiveGesture { role: self.role() });
        }
        debug!("resize up {}", pointer);
        Ok(())
    }

    fn cancel(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stickerkit_core::ElementId;

    /// 100x100 box centered at (200, 200).
    fn square() -> TransformState {
        TransformState::new(
            ElementId::new(3),
            Point::new(150.0, 150.0),
            Point::ZERO,
            ElementPose::with_size(100.0, 100.0),
        )
    }

    #[test]
    fn test_outward_drag_doubles_size_about_center() {
        let mut gesture = ResizeRotateGesture::default();
        let mut state = square();
        gesture.on_down(Point::new(250.0, 250.0), &state).unwrap();
        let update = gesture.on_move(Point::new(300.0, 300.0)).unwrap().unwrap();
        state.apply(&update);

        assert!((state.pose.width - 200.0).abs() < 1e-9);
        assert!((state.pose.height - 200.0).abs() < 1e-9);
        assert!(state.center().approx_eq(Point::new(200.0, 200.0), 1e-9));
        assert!(state.pose.rotation.abs() < 1e-9);
    }

    #[test]
    fn test_quarter_turn_rotates_clockwise() {
        let mut gesture = ResizeRotateGesture::default();
        let state = square();
        // From straight right of the center to straight below it
        gesture.on_down(Point::new(250.0, 200.0), &state).unwrap();
        let update = gesture.on_move(Point::new(200.0, 250.0)).unwrap().unwrap();
        assert!((update.rotation.unwrap() - 90.0).abs() < 1e-9);
        assert!((update.width.unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_down_on_center_is_a_no_op_until_pointer_leaves() {
        let mut gesture = ResizeRotateGesture::default();
        let state = square();
        gesture.on_down(Point::new(200.0, 200.0), &state).unwrap();
        assert_eq!(gesture.on_move(Point::new(200.0, 200.0)).unwrap(), None);
        // First move away becomes the reference
        assert_eq!(gesture.on_move(Point::new(220.0, 220.0)).unwrap(), None);

        let update = gesture.on_move(Point::new(240.0, 240.0)).unwrap().unwrap();
        assert!((update.width.unwrap() - 200.0).abs() < 1e-9);
        assert!(update.rotation.unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_pointer_crossing_center_keeps_last_pose() {
        let mut gesture = ResizeRotateGesture::default();
        gesture.on_down(Point::new(250.0, 250.0), &square()).unwrap();
        assert_eq!(gesture.on_move(Point::new(200.0, 200.0)).unwrap(), None);
    }

    #[test]
    fn test_overflowing_drag_keeps_last_pose() {
        let mut gesture = ResizeRotateGesture::default();
        gesture.on_down(Point::new(250.0, 250.0), &square()).unwrap();
        assert!(matches!(
            gesture.on_move(Point::new(1e308, 1e308)),
            Err(EditorError::DegenerateGeometry { .. })
        ));
        // The session survives and later moves still work
        assert!(gesture.is_active());
        let update = gesture.on_move(Point::new(300.0, 300.0)).unwrap().unwrap();
        assert!((update.width.unwrap() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_min_size_clamp_keeps_aspect() {
        let mut gesture = ResizeRotateGesture::new(GestureSettings {
            min_size: 20.0,
            ..GestureSettings::default()
        });
        let mut state = square();
        state.pose.width = 200.0;
        state.layout_origin = Point::new(100.0, 150.0);
        gesture.on_down(Point::new(300.0, 250.0), &state).unwrap();
        let update = gesture.on_move(Point::new(201.0, 200.5)).unwrap().unwrap();
        assert!((update.height.unwrap() - 20.0).abs() < 1e-9);
        assert!((update.width.unwrap() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_move_without_down() {
        let mut gesture = ResizeRotateGesture::default();
        assert!(gesture.on_move(Point::ZERO).is_err());
        assert!(gesture.on_up(Point::ZERO).is_err());
    }
}
