//! TRS gizmo frontend
//!
//! Transform tool state machine, editor context and egui panels for the
//! translate / rotate / scale gizmo.

pub mod panels;
pub mod state;

pub use panels::{PropertiesPanel, ViewportPanel};
pub use state::{
    DragError, EditorContext, SharedEditorContext, ToolContext, ToolEvent, ToolState, TransformTool,
    ViewportSceneView, create_shared_editor_context,
};
