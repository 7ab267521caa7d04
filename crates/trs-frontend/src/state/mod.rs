//! Editor state
//!
//! [`EditorContext`] owns everything the transform tool talks to: the scene,
//! the selection, the undo history and the viewport. Hosts feed it pointer
//! and selection input; it turns that input into [`ToolEvent`]s.

pub mod transform;
mod viewport;

pub use transform::{DragError, ToolContext, ToolEvent, ToolState, TransformTool};
pub use viewport::ViewportSceneView;

use std::sync::Arc;

use glam::Vec2;
use parking_lot::Mutex;
use trs_core::{NodeId, OperationStack, Scene, SceneView, Selection, Settings, Trs};
use trs_renderer::GizmoConfig;

/// Editor state shared between the UI and background work
pub type SharedEditorContext = Arc<Mutex<EditorContext>>;

/// Create a new shared editor context
pub fn create_shared_editor_context(
    settings: Settings,
    config: &GizmoConfig,
    viewport_size: Vec2,
) -> SharedEditorContext {
    Arc::new(Mutex::new(EditorContext::new(settings, config, viewport_size)))
}

/// Scene, selection, history, viewport and the transform tool
pub struct EditorContext {
    pub scene: Scene,
    pub selection: Selection,
    pub history: OperationStack,
    pub tool: TransformTool,
    /// `None` while the viewport is detached (e.g. a closed dock tab)
    pub view: Option<ViewportSceneView>,
}

impl EditorContext {
    pub fn new(settings: Settings, config: &GizmoConfig, viewport_size: Vec2) -> Self {
        Self {
            scene: Scene::new(),
            selection: Selection::new(),
            history: OperationStack::new(),
            tool: TransformTool::new(settings, config),
            view: Some(ViewportSceneView::new(viewport_size)),
        }
    }

    /// Run `f` with the tool and its collaborators borrowed together
    fn with_tool<R>(&mut self, f: impl FnOnce(&mut TransformTool, &mut ToolContext<'_>) -> R) -> R {
        let Self {
            scene,
            selection,
            history,
            tool,
            view,
        } = self;
        let mut cx = ToolContext {
            view: view.as_ref().map(|view| view as &dyn SceneView),
            nodes: scene,
            selection: selection.nodes(),
            undo: history,
        };
        f(tool, &mut cx)
    }

    /// Send one event to the transform tool
    pub fn dispatch(&mut self, event: ToolEvent) -> bool {
        self.with_tool(|tool, cx| tool.step(cx, event))
    }

    /// Move the selection so its anchor becomes `anchor`, starting an edit if needed
    pub fn edit_anchor(&mut self, anchor: Trs) -> bool {
        self.with_tool(|tool, cx| tool.begin_anchor_edit(cx) && tool.edit_anchor(cx, anchor))
    }

    /// Commit a numeric anchor edit to the history
    pub fn end_anchor_edit(&mut self) {
        self.with_tool(|tool, cx| tool.end_anchor_edit(cx));
    }

    /// Replace the selection
    pub fn select(&mut self, nodes: impl IntoIterator<Item = NodeId>) -> bool {
        if !self.selection.set(nodes) {
            return false;
        }
        self.dispatch(ToolEvent::SelectionChanged)
    }

    pub fn clear_selection(&mut self) -> bool {
        if !self.selection.clear() {
            return false;
        }
        self.dispatch(ToolEvent::SelectionChanged)
    }

    /// Pointer position in viewport pixels; `None` when it left the viewport
    pub fn pointer_moved(&mut self, pointer: Option<Vec2>) -> bool {
        let Some(view) = self.view.as_mut() else {
            return self.dispatch(ToolEvent::PointerLost);
        };
        view.set_pointer(pointer);

        if self.tool.is_active() {
            let event = match pointer {
                Some(_) => ToolEvent::DragMoved,
                None => ToolEvent::PointerLost,
            };
            return self.dispatch(event);
        }
        view.refresh_hover(self.tool.visualizations());
        self.dispatch(ToolEvent::HoverChanged)
    }

    pub fn drag_pressed(&mut self) -> bool {
        self.dispatch(ToolEvent::DragPressed)
    }

    pub fn drag_released(&mut self) -> bool {
        if let Some(view) = self.view.as_mut() {
            view.refresh_hover(self.tool.visualizations());
        }
        self.dispatch(ToolEvent::DragReleased)
    }

    /// Refresh gizmo placement before drawing
    pub fn frame(&mut self) -> bool {
        self.dispatch(ToolEvent::RenderView)
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.tool.set_settings(settings);
        self.dispatch(ToolEvent::RenderView);
    }

    /// Detach the viewport; an active drag ends on the next pointer event
    pub fn detach_view(&mut self) -> Option<ViewportSceneView> {
        self.view.take()
    }

    pub fn attach_view(&mut self, view: ViewportSceneView) {
        self.view = Some(view);
        self.dispatch(ToolEvent::RenderView);
    }

    pub fn undo(&mut self) -> bool {
        if self.tool.is_active() {
            self.dispatch(ToolEvent::PointerLost);
        }
        match self.history.undo(&mut self.scene) {
            Ok(nodes) => self.touch_nodes(nodes),
            Err(e) => {
                tracing::warn!("Undo failed: {}", e);
                false
            }
        }
    }

    pub fn redo(&mut self) -> bool {
        if self.tool.is_active() {
            self.dispatch(ToolEvent::PointerLost);
        }
        match self.history.redo(&mut self.scene) {
            Ok(nodes) => self.touch_nodes(nodes),
            Err(e) => {
                tracing::warn!("Redo failed: {}", e);
                false
            }
        }
    }

    fn touch_nodes(&mut self, nodes: Vec<NodeId>) -> bool {
        let mut changed = false;
        for node in nodes {
            changed |= self.dispatch(ToolEvent::NodeTouched(node));
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use trs_core::{Handle, NodeStore};

    fn editor() -> (EditorContext, NodeId) {
        let mut editor = EditorContext::new(Settings::default(), &GizmoConfig::default(), Vec2::new(800.0, 600.0));
        let node = editor.scene.add_node("box", None, Trs::IDENTITY);
        editor.select([node]);
        editor.frame();
        (editor, node)
    }

    fn screen(editor: &EditorContext, point: Vec3) -> Vec2 {
        editor.view.as_ref().unwrap().project(point).unwrap()
    }

    #[test]
    fn test_select_sets_anchor() {
        let (mut editor, node) = editor();
        assert_eq!(editor.tool.anchor(), Some(Trs::IDENTITY));
        assert!(editor.clear_selection());
        assert!(editor.tool.anchor().is_none());
        assert!(!editor.clear_selection());
        assert!(editor.select([node]));
    }

    #[test]
    fn test_drag_through_viewport_and_undo() {
        let (mut editor, node) = editor();
        let scale = editor.tool.visualizations().with(|v| v.scale()).unwrap();

        // Grab the +X arrow shaft halfway out and drag it further out
        let grab = screen(&editor, Vec3::new(1.5 * scale, 0.0, 0.0));
        editor.pointer_moved(Some(grab));
        assert_eq!(editor.tool.hover_handle(), Handle::TranslatePosX);
        assert!(editor.drag_pressed());
        let target = screen(&editor, Vec3::new(2.5 * scale, 0.0, 0.0));
        assert!(editor.pointer_moved(Some(target)));
        assert!(editor.drag_released());

        let moved = editor.scene.world_transform(node).unwrap();
        assert!((moved.translation.x - scale).abs() < 0.05 * scale);
        assert_eq!(moved.translation.y, 0.0);
        assert_eq!(moved.translation.z, 0.0);
        assert_eq!(editor.history.len(), 1);

        assert!(editor.undo());
        assert_eq!(editor.scene.world_transform(node), Some(Trs::IDENTITY));
        assert_eq!(editor.tool.anchor(), Some(Trs::IDENTITY));
        assert!(editor.redo());
        assert_eq!(editor.tool.anchor().unwrap().translation, moved.translation);
    }

    #[test]
    fn test_detached_view_ends_drag() {
        let (mut editor, _) = editor();
        let scale = editor.tool.visualizations().with(|v| v.scale()).unwrap();
        let grab = screen(&editor, Vec3::new(1.5 * scale, 0.0, 0.0));
        editor.pointer_moved(Some(grab));
        assert!(editor.drag_pressed());

        let view = editor.detach_view().unwrap();
        editor.pointer_moved(Some(grab));
        assert!(!editor.tool.is_active());
        editor.attach_view(view);
        assert!(editor.history.is_empty());
    }

    #[test]
    fn test_anchor_edit_is_one_undo_step() {
        let (mut editor, node) = editor();
        assert!(editor.edit_anchor(Trs::from_translation(Vec3::new(1.0, 0.0, 0.0))));
        assert!(editor.edit_anchor(Trs::from_translation(Vec3::new(2.0, 0.0, 0.0))));
        editor.end_anchor_edit();

        assert_eq!(editor.scene.world_transform(node).unwrap().translation, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(editor.history.len(), 1);
        assert!(editor.undo());
        assert_eq!(editor.scene.world_transform(node), Some(Trs::IDENTITY));
    }

    #[test]
    fn test_shared_context() {
        let shared = create_shared_editor_context(Settings::default(), &GizmoConfig::default(), Vec2::new(640.0, 480.0));
        let node = shared.lock().scene.add_node("n", None, Trs::IDENTITY);
        assert!(shared.lock().select([node]));
    }
}
