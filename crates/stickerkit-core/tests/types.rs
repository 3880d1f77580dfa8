use proptest::prelude::*;
use stickerkit_core::{ActionRole, Bounds, ElementId, Point, Visibility};

#[test]
fn test_wire_names() {
    assert_eq!(
        serde_json::to_string(&ActionRole::ResizeRotate).unwrap(),
        "\"resize-rotate\""
    );
    assert_eq!(serde_json::to_string(&ElementId::new(3)).unwrap(), "3");
    assert_eq!(
        serde_json::to_string(&Visibility::Hidden).unwrap(),
        "\"hidden\""
    );

    let role: ActionRole = serde_json::from_str("\"pin\"").unwrap();
    assert_eq!(role, ActionRole::Pin);
}

#[test]
fn test_default_visibility_is_hidden() {
    assert_eq!(Visibility::default(), Visibility::Hidden);
    assert!(!Visibility::default().is_visible());
}

proptest! {
    #[test]
    fn prop_translation_moves_center_by_delta(
        left in -500.0f64..500.0,
        top in -500.0f64..500.0,
        w in 0.0f64..400.0,
        h in 0.0f64..400.0,
        dx in -300.0f64..300.0,
        dy in -300.0f64..300.0,
    ) {
        let b = Bounds::from_origin_size(Point::new(left, top), w, h);
        let moved = b.translated(dx, dy);
        let expected = b.center() + Point::new(dx, dy);
        prop_assert!(moved.center().approx_eq(expected, 1e-9));
        prop_assert!((moved.width() - w).abs() < 1e-9);
        prop_assert!((moved.height() - h).abs() < 1e-9);
    }
}
