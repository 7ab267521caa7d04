//! Floating overlays drawn on top of the viewport

mod gizmo_toolbar;

pub use gizmo_toolbar::render_gizmo_toolbar;
