//! Property tests for the placement engine and the drag gestures.

use proptest::prelude::*;
use stickerkit_core::{ActionRole, Point};
use stickerkit_editor::{normalize_angle, recompute, EditCoordinator, SceneHost};

const TOLERANCE: f64 = 1e-6;

fn focused_editor(width: f64, height: f64, origin: Point) -> EditCoordinator<SceneHost> {
    let mut scene = SceneHost::new(Point::new(0.0, 24.0));
    let id = scene.add_element(origin, width, height);
    let mut editor = EditCoordinator::new(scene);
    editor.tap_element(id);
    editor
}

/// Delete and resize sit opposite each other on the bounding circle, so
/// their midpoint is the target's center.
fn assert_cluster_tracks(editor: &EditCoordinator<SceneHost>) {
    let layout = editor.cluster_layout().unwrap();
    let center = editor.transform_state().unwrap().screen_center();
    let mid = layout
        .button_center(ActionRole::Delete)
        .midpoint(layout.button_center(ActionRole::ResizeRotate));
    assert!(
        mid.approx_eq(center, TOLERANCE),
        "cluster midpoint {} drifted from center {}",
        mid,
        center
    );
}

fn size() -> impl Strategy<Value = f64> {
    10.0..400.0f64
}

fn delta() -> impl Strategy<Value = (f64, f64)> {
    (-300.0..300.0f64, -300.0..300.0f64)
}

proptest! {
    #[test]
    fn prop_cluster_tracks_target(
        width in size(),
        height in size(),
        moves in prop::collection::vec(delta(), 1..8),
        drags in prop::collection::vec(delta(), 1..8),
    ) {
        let mut editor = focused_editor(width, height, Point::new(100.0, 100.0));
        let start = Point::new(10.0, 10.0);

        editor.pointer_down(ActionRole::Move, start);
        for (dx, dy) in &moves {
            editor.pointer_move(ActionRole::Move, start + Point::new(*dx, *dy));
            assert_cluster_tracks(&editor);
        }
        editor.pointer_up(ActionRole::Move, start);

        let handle = editor.cluster_layout().unwrap().button_center(ActionRole::ResizeRotate);
        editor.pointer_down(ActionRole::ResizeRotate, handle);
        for (dx, dy) in &drags {
            editor.pointer_move(ActionRole::ResizeRotate, handle + Point::new(*dx, *dy));
            assert_cluster_tracks(&editor);
        }
        editor.pointer_up(ActionRole::ResizeRotate, handle);
    }

    #[test]
    fn prop_move_preserves_size(
        width in size(),
        height in size(),
        moves in prop::collection::vec(delta(), 1..10),
    ) {
        let mut editor = focused_editor(width, height, Point::ZERO);
        let id = editor.focused().unwrap();
        editor.pointer_down(ActionRole::Move, Point::ZERO);
        for (dx, dy) in moves {
            editor.pointer_move(ActionRole::Move, Point::new(dx, dy));
            let pose = editor.host().element(id).unwrap().pose;
            prop_assert_eq!(pose.width, width);
            prop_assert_eq!(pose.height, height);
            prop_assert!((pose.translation_x - dx).abs() < TOLERANCE);
            prop_assert!((pose.translation_y - dy).abs() < TOLERANCE);
        }
    }

    #[test]
    fn prop_resize_rotate_preserves_center(
        width in size(),
        height in size(),
        drags in prop::collection::vec(delta(), 1..10),
    ) {
        let mut editor = focused_editor(width, height, Point::new(250.0, 250.0));
        let center = editor.transform_state().unwrap().screen_center();
        let handle = editor.cluster_layout().unwrap().button_center(ActionRole::ResizeRotate);

        editor.pointer_down(ActionRole::ResizeRotate, handle);
        for (dx, dy) in drags {
            editor.pointer_move(ActionRole::ResizeRotate, handle + Point::new(dx, dy));
            let state = editor.transform_state().unwrap();
            prop_assert!(state.pose.width.is_finite() && state.pose.rotation.is_finite());
            prop_assert!(
                state.screen_center().approx_eq(center, TOLERANCE),
                "center moved from {} to {}",
                center,
                state.screen_center()
            );
            // Aspect ratio survives any drag
            prop_assert!((state.pose.width * height - state.pose.height * width).abs() < 1e-3);
        }
    }

    #[test]
    fn prop_recompute_is_idempotent(
        width in 0.0..400.0f64,
        height in 0.0..400.0f64,
        (dx, dy) in delta(),
    ) {
        let mut editor = focused_editor(width, height, Point::new(40.0, 40.0));
        editor.pointer_down(ActionRole::Move, Point::ZERO);
        editor.pointer_move(ActionRole::Move, Point::new(dx, dy));

        let state = *editor.transform_state().unwrap();
        let first = recompute(&state);
        let second = recompute(&state);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first.button_centers(), second.button_centers());
        prop_assert_eq!(Some(&first), editor.cluster_layout());
    }

    #[test]
    fn prop_normalize_angle_is_periodic(angle in -1.0e5..1.0e5f64, turns in -20i32..20) {
        let a = normalize_angle(angle);
        prop_assert!((0.0..360.0).contains(&a), "normalize_angle({}) = {}", angle, a);

        let b = normalize_angle(angle + 360.0 * f64::from(turns));
        let diff = (a - b).abs();
        prop_assert!(diff < 1e-6 || (360.0 - diff) < 1e-6, "{} vs {}", a, b);
    }
}
