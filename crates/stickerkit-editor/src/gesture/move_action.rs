use super::{GestureController, GesturePhase};
use crate::pose::{PoseUpdate, TransformState};
use stickerkit_core::{ActionRole, EditorError, Point};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
struct MoveSession {
    initial_translation: Point,
    down_pointer: Point,
}

/// Pure translation drag.
///
/// The new translation is the down-time translation plus the pointer's
/// travel since down. Size and rotation are never touched.
#[derive(Debug, Default)]
pub struct MoveGesture {
    session: Option<MoveSession>,
}

impl MoveGesture {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GestureController for MoveGesture {
    fn role(&self) -> ActionRole {
        ActionRole::Move
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
        let initial_translation = state.pose.translation();
        debug!(
            "move down {} target={} translation={}",
            pointer, state.id, initial_translation
        );
        self.session = Some(MoveSession {
            initial_translation,
            down_pointer: pointer,
        });
        Ok(())
    }

    fn on_move(&mut self, pointer: Point) -> Result<Option<PoseUpdate>, EditorError> {
        let session = self
            .session
            .ok_or(EditorError::NoActiveGesture { role: self.role() })?;
        let delta = pointer - session.down_pointer;
        let translation = session.initial_translation + delta;
        if !translation.is_finite() {
            return Err(EditorError::DegenerateGeometry {
                reason: format!("move to {} overflows the translation", pointer),
            });
        }
        debug!("move {} delta={} translation={}", pointer, delta, translation);
        Ok(Some(PoseUpdate::translation(translation.x, translation.y)))
    }

    fn on_up(&mut self, pointer: Point) -> Result<(), EditorError> {
        if self.session.take().is_none() {
            return Err(EditorError::NoActiveGesture { role: self.role() });
        }
        debug!("move up {}", pointer);
        Ok(())
    }

    fn cancel(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::ElementPose;
    use stickerkit_core::ElementId;

    fn state_at(tx: f64, ty: f64) -> TransformState {
        let mut pose = ElementPose::with_size(40.0, 20.0);
        pose.translation_x = tx;
        pose.translation_y = ty;
        TransformState::new(ElementId::new(1), Point::ZERO, Point::ZERO, pose)
    }

    #[test]
    fn test_translation_follows_pointer() {
        let mut gesture = MoveGesture::new();
        gesture
            .on_down(Point::new(50.0, 50.0), &state_at(0.0, 0.0))
            .unwrap();
        let update = gesture.on_move(Point::new(80.0, 70.0)).unwrap().unwrap();
        assert_eq!(update, PoseUpdate::translation(30.0, 20.0));
        assert!(update.width.is_none() && update.height.is_none());
        gesture.on_up(Point::new(80.0, 70.0)).unwrap();
        assert_eq!(gesture.phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_second_gesture_reads_fresh_translation() {
        let mut gesture = MoveGesture::new();
        gesture.on_down(Point::ZERO, &state_at(0.0, 0.0)).unwrap();
        gesture.on_move(Point::new(10.0, 10.0)).unwrap();
        gesture.on_up(Point::new(10.0, 10.0)).unwrap();

        gesture
            .on_down(Point::new(100.0, 100.0), &state_at(10.0, 10.0))
            .unwrap();
        let update = gesture.on_move(Point::new(105.0, 100.0)).unwrap().unwrap();
        assert_eq!(update, PoseUpdate::translation(15.0, 10.0));
    }

    #[test]
    fn test_overflowing_translation_is_rejected() {
        let mut gesture = MoveGesture::new();
        gesture
            .on_down(Point::new(-1e308, 0.0), &state_at(0.0, 0.0))
            .unwrap();
        assert!(matches!(
            gesture.on_move(Point::new(1e308, 0.0)),
            Err(EditorError::DegenerateGeometry { .. })
        ));
        assert!(gesture.is_active());
    }

    #[test]
    fn test_out_of_order_events_are_rejected() {
        let mut gesture = MoveGesture::new();
        assert!(matches!(
            gesture.on_move(Point::ZERO),
            Err(EditorError::NoActiveGesture { .. })
        ));
        assert!(gesture.on_up(Point::ZERO).is_err());

        gesture.on_down(Point::ZERO, &state_at(0.0, 0.0)).unwrap();
        assert!(matches!(
            gesture.on_down(Point::ZERO, &state_at(0.0, 0.0)),
            Err(EditorError::GestureInProgress { .. })
        ));
        gesture.cancel();
        assert!(!gesture.is_active());
    }
}
