//! TRS gizmo demo entry point
//!
//! Builds a small scene, drives a scripted translate drag through the
//! viewport, then undoes and redoes it. Usage: `trs [settings.ron]`.

use std::path::PathBuf;

use glam::{Quat, Vec2, Vec3};
use trs_core::{NodeStore, Settings, Trs};
use trs_frontend::EditorContext;
use trs_renderer::GizmoConfig;

fn load_settings() -> Settings {
    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        return Settings::default();
    };
    match Settings::load(&path) {
        Ok(settings) => {
            tracing::info!("Loaded settings from {}", path.display());
            settings
        }
        Err(e) => {
            tracing::warn!("Failed to load settings from {}: {}", path.display(), e);
            Settings::default()
        }
    }
}

fn main() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trs_frontend=debug,trs_renderer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting TRS gizmo demo");

    let settings = load_settings();
    let mut editor = EditorContext::new(settings, &GizmoConfig::default(), Vec2::new(1280.0, 720.0));

    let base = editor.scene.add_node("base", None, Trs::IDENTITY);
    let arm = editor.scene.add_node(
        "arm",
        Some(base),
        Trs::new(Vec3::new(0.0, 0.0, 1.0), Quat::from_rotation_z(0.3), Vec3::ONE),
    );
    editor.select([arm]);
    editor.frame();

    let Some(anchor) = editor.tool.anchor() else {
        tracing::error!("Selection has no anchor");
        return;
    };
    let scale = editor.tool.visualizations().with(|v| v.scale()).unwrap_or(1.0);
    let project = |editor: &EditorContext, point: Vec3| editor.view.as_ref().and_then(|v| v.project(point));

    let grab = project(&editor, anchor.translation + Vec3::X * 2.2 * scale);
    let target = project(&editor, anchor.translation + Vec3::X * 3.7 * scale);
    let (Some(grab), Some(target)) = (grab, target) else {
        tracing::error!("Gizmo is not on screen");
        return;
    };

    editor.pointer_moved(Some(grab));
    tracing::info!("Hovering {}", editor.tool.hover_handle());
    if !editor.drag_pressed() {
        tracing::warn!("Drag did not start");
        return;
    }
    for step in 1..=10 {
        let t = step as f32 / 10.0;
        editor.pointer_moved(Some(grab.lerp(target, t)));
    }
    editor.drag_released();

    if let Some(world) = editor.scene.world_transform(arm) {
        tracing::info!("Arm moved to {:?}", world.translation);
    }
    if let Some(operation) = editor.history.last() {
        tracing::info!("Recorded \"{}\"", operation.description);
    }

    editor.undo();
    if let Some(world) = editor.scene.world_transform(arm) {
        tracing::info!("After undo: {:?}", world.translation);
    }
    editor.redo();
    if let Some(world) = editor.scene.world_transform(arm) {
        tracing::info!("After redo: {:?}", world.translation);
    }
}
