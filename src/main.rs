use stickerkit::{
    init_logging_with, ActionRole, EditCoordinator, EditorConfig, Point, SceneHost, BUILD_DATE,
    VERSION,
};
use tracing::{info, warn};

/// Replays a short editing session against an in-memory scene and logs every
/// batch the editor commits.
fn main() -> anyhow::Result<()> {
    let (config, load_error) = match EditorConfig::load_or_default() {
        Ok(config) => (config, None),
        Err(err) => (EditorConfig::default(), Some(err)),
    };

    init_logging_with(&config.logging.level)?;
    info!("StickerKit {} (built {})", VERSION, BUILD_DATE);
    if let Some(err) = load_error {
        warn!("Falling back to default editor config: {}", err);
    }

    let mut scene = SceneHost::new(Point::new(0.0, 56.0));
    let heart = scene.add_element(Point::new(40.0, 60.0), 120.0, 80.0);
    let star = scene.add_element(Point::new(220.0, 160.0), 64.0, 64.0);
    let mut editor = EditCoordinator::with_config(scene, config);

    editor.tap_element(heart);

    if let Some(layout) = editor.cluster_layout() {
        for (role, center) in layout.button_centers() {
            info!("{} button at {}", role, center);
        }
    }

    // Drag the heart by its move handle
    let grip = Point::new(100.0, 116.0);
    editor.pointer_down(ActionRole::Move, grip);
    for step in 1..=4 {
        let t = f64::from(step);
        editor.pointer_move(ActionRole::Move, grip + Point::new(10.0 * t, 5.0 * t));
    }
    editor.pointer_up(ActionRole::Move, grip + Point::new(40.0, 20.0));

    // Grow and turn it from the resize-rotate handle
    if let Some(handle) = editor
        .cluster_layout()
        .map(|layout| layout.button_center(ActionRole::ResizeRotate))
    {
        editor.pointer_down(ActionRole::ResizeRotate, handle);
        editor.pointer_move(ActionRole::ResizeRotate, handle + Point::new(30.0, 0.0));
        editor.pointer_move(ActionRole::ResizeRotate, handle + Point::new(30.0, 45.0));
        editor.pointer_up(ActionRole::ResizeRotate, handle + Point::new(30.0, 45.0));
    }

    if let Some(state) = editor.transform_state() {
        info!(
            "{} is now {:.1}x{:.1} at rotation {:.1} centered on {}",
            state.id,
            state.pose.width,
            state.pose.height,
            state.pose.rotation,
            state.screen_center()
        );
    }

    editor.tap_action(ActionRole::Pin);
    editor.tap_element(star);
    editor.tap_action(ActionRole::Delete);
    editor.tap_background();

    let scene = editor.into_host();
    for (index, batch) in scene.batches().iter().enumerate() {
        info!("batch {} ({} commands)", index, batch.len());
        for command in batch {
            info!("  {}", serde_json::to_string(command)?);
        }
    }
    info!(
        "{} element(s) left, paint order {:?}",
        scene.len(),
        scene.paint_order()
    );

    Ok(())
}
