//! Transform tool
//!
//! Owns the gizmo lifecycle: resolving the hovered handle, snapshotting the
//! selection when a drag starts, dispatching pointer motion to the move /
//! rotate / scale subtool and recording one undo operation when the drag
//! ends. All input arrives through [`TransformTool::step`].

mod move_tool;
mod rotate_tool;
mod scale_tool;
mod session;
mod subtool;
#[cfg(test)]
pub(crate) mod test_support;

pub use move_tool::MoveTool;
pub use rotate_tool::RotateTool;
pub use scale_tool::{ScaleTool, scale_vector};
pub use session::{TransformEntry, TransformSession, compute_anchor};
pub use subtool::Subtool;

use std::sync::Arc;
use std::thread::JoinHandle;

use trs_core::{Handle, HoverSlot, NodeId, NodeStore, SceneView, Settings, Trs, UndoSink};
use trs_renderer::{GizmoConfig, HandleRegistry, OverlayLine, VisualizationInput, VisualizationSlot};

/// Reasons a drag could not start
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DragError {
    #[error("No scene view")]
    NoSceneView,
    #[error("Scene view has no camera")]
    NoCamera,
    #[error("Camera is not attached to a node")]
    NoCameraNode,
    #[error("No gizmo handle under the pointer")]
    NotHovering,
    #[error("Nothing selected")]
    NoSelection,
    #[error("Handle has no axis constraint")]
    EmptyAxisMask,
}

/// A drag in progress
#[derive(Debug)]
pub struct ActiveDrag {
    pub handle: Handle,
    pub subtool: Subtool,
    pub session: TransformSession,
}

/// Tool lifecycle state
#[derive(Debug, Default)]
pub enum ToolState {
    #[default]
    Idle,
    Hovering(Handle),
    /// Selection snapshotted, subtool not started yet
    Ready(Handle),
    Active(ActiveDrag),
}

/// Input delivered to the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolEvent {
    /// The view's hover results were refreshed
    HoverChanged,
    DragPressed,
    DragMoved,
    DragReleased,
    /// The pointer left the view or the drag was cancelled by the host
    PointerLost,
    SelectionChanged,
    /// A node was changed by someone other than this tool
    NodeTouched(NodeId),
    /// About to render the view; refresh gizmo placement
    RenderView,
}

/// Collaborators for one tool step
pub struct ToolContext<'a> {
    pub view: Option<&'a dyn SceneView>,
    pub nodes: &'a mut dyn NodeStore,
    pub selection: &'a [NodeId],
    pub undo: &'a mut dyn UndoSink,
}

/// Translate / rotate / scale gizmo tool
pub struct TransformTool {
    settings: Settings,
    registry: Arc<HandleRegistry>,
    visualizations: VisualizationSlot,
    state: ToolState,
    hover: Handle,
    /// Anchor of the current selection while no drag is active
    anchor: Option<Trs>,
    /// Numeric anchor edit from the properties panel
    anchor_edit: Option<TransformSession>,
}

impl TransformTool {
    /// Create the tool with visualizations built on the calling thread
    pub fn new(settings: Settings, config: &GizmoConfig) -> Self {
        let registry = Arc::new(HandleRegistry::with_handle_meshes(config));
        let visualizations = VisualizationSlot::build_now(registry.clone());
        Self::with_slot(settings, registry, visualizations)
    }

    /// Create the tool and build its visualizations in the background.
    ///
    /// Hover and drags work immediately; nothing is drawn until the build finishes.
    pub fn with_background_build(settings: Settings, config: &GizmoConfig) -> (Self, JoinHandle<()>) {
        let registry = Arc::new(HandleRegistry::with_handle_meshes(config));
        let (visualizations, handle) = VisualizationSlot::spawn(registry.clone());
        (Self::with_slot(settings, registry, visualizations), handle)
    }

    fn with_slot(settings: Settings, registry: Arc<HandleRegistry>, visualizations: VisualizationSlot) -> Self {
        Self {
            settings,
            registry,
            visualizations,
            state: ToolState::Idle,
            hover: Handle::None,
            anchor: None,
            anchor_edit: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings; placement catches up on the next [`ToolEvent::RenderView`].
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn registry(&self) -> &Arc<HandleRegistry> {
        &self.registry
    }

    pub fn visualizations(&self) -> &VisualizationSlot {
        &self.visualizations
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    pub fn hover_handle(&self) -> Handle {
        self.hover
    }

    pub fn active_handle(&self) -> Handle {
        match &self.state {
            ToolState::Active(active) => active.handle,
            _ => Handle::None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Active(_))
    }

    /// Snapshot of the drag in progress
    pub fn session(&self) -> Option<&TransformSession> {
        match &self.state {
            ToolState::Active(active) => Some(&active.session),
            _ => None,
        }
    }

    /// Current gizmo anchor; `None` when nothing is selected
    pub fn anchor(&self) -> Option<Trs> {
        if let Some(session) = self.session() {
            return Some(session.anchor);
        }
        match &self.anchor_edit {
            Some(edit) => Some(edit.anchor),
            None => self.anchor,
        }
    }

    /// Handle one input event. Returns true when the view needs a redraw.
    pub fn step(&mut self, cx: &mut ToolContext<'_>, event: ToolEvent) -> bool {
        match event {
            ToolEvent::HoverChanged => self.update_hover(cx.view),
            ToolEvent::DragPressed => match self.begin_drag(cx) {
                Ok(()) => true,
                Err(e) => {
                    tracing::trace!("Drag not started: {}", e);
                    false
                }
            },
            ToolEvent::DragMoved => self.drag(cx),
            ToolEvent::DragReleased | ToolEvent::PointerLost => {
                let was_active = self.is_active();
                self.end_drag(cx);
                was_active
            }
            ToolEvent::SelectionChanged => {
                self.selection_changed(cx);
                true
            }
            ToolEvent::NodeTouched(node) => self.node_touched(cx, node),
            ToolEvent::RenderView => {
                self.update_visualization(cx.view);
                true
            }
        }
    }

    fn resolve_hover(&self, view: &dyn SceneView) -> Handle {
        let entry = view.hover(HoverSlot::Tool);
        if !entry.valid {
            return Handle::None;
        }
        let handle = entry
            .pickable
            .map(|id| self.registry.resolve(id))
            .unwrap_or_default();
        match handle.kind() {
            Some(kind) if self.settings.is_shown(kind) => handle,
            _ => Handle::None,
        }
    }

    fn update_hover(&mut self, view: Option<&dyn SceneView>) -> bool {
        let handle = view.map(|view| self.resolve_hover(view)).unwrap_or_default();
        let changed = handle != self.hover;
        if changed {
            tracing::trace!("Gizmo hover: {}", handle);
            self.hover = handle;
        }
        if matches!(self.state, ToolState::Idle | ToolState::Hovering(_)) {
            self.state = self.rest_state();
        }
        if changed {
            self.update_visualization(view);
        }
        changed
    }

    fn rest_state(&self) -> ToolState {
        if self.hover.is_none() {
            ToolState::Idle
        } else {
            ToolState::Hovering(self.hover)
        }
    }

    /// Check every drag precondition and snapshot the selection.
    ///
    /// On failure nothing changes; on success the tool is [`ToolState::Ready`].
    pub fn try_ready(&mut self, cx: &ToolContext<'_>) -> Result<TransformSession, DragError> {
        let view = cx.view.ok_or(DragError::NoSceneView)?;
        let camera = view.camera().ok_or(DragError::NoCamera)?;
        let camera_position = camera.node_position.ok_or(DragError::NoCameraNode)?;
        if self.hover.is_none() {
            return Err(DragError::NotHovering);
        }
        let hover = view.hover(HoverSlot::Tool);
        let position = hover
            .position
            .filter(|_| hover.valid)
            .ok_or(DragError::NotHovering)?;
        if cx.selection.is_empty() {
            return Err(DragError::NoSelection);
        }
        let session = TransformSession::capture(&*cx.nodes, cx.selection)
            .ok_or(DragError::NoSelection)?
            .with_drag_start(position, camera_position);

        self.state = ToolState::Ready(self.hover);
        Ok(session)
    }

    fn begin_drag(&mut self, cx: &mut ToolContext<'_>) -> Result<(), DragError> {
        if self.is_active() {
            return Ok(());
        }
        if self.anchor_edit.is_some() {
            self.end_anchor_edit(cx);
        }
        let session = self.try_ready(cx)?;
        let handle = self.hover;
        let result = match (cx.view, handle.kind()) {
            (Some(view), Some(kind)) => {
                Subtool::begin(kind, handle.axis_mask(), view, &session, &self.settings)
            }
            (None, _) => Err(DragError::NoSceneView),
            (_, None) => Err(DragError::NotHovering),
        };
        match result {
            Ok(subtool) => {
                tracing::debug!("Begin {} drag on {} node(s)", handle, session.entries.len());
                self.state = ToolState::Active(ActiveDrag {
                    handle,
                    subtool,
                    session,
                });
                self.update_visualization(cx.view);
                Ok(())
            }
            Err(e) => {
                self.state = self.rest_state();
                Err(e)
            }
        }
    }

    /// Apply pointer motion to the active drag.
    ///
    /// Ends the drag when the view, its camera or the pointer ray is gone.
    /// Returns true when node transforms were recomputed.
    pub fn drag(&mut self, cx: &mut ToolContext<'_>) -> bool {
        if !self.is_active() {
            return false;
        }
        let view = cx.view.filter(|view| {
            view.camera().is_some()
                && view.control_ray_origin_in_world().is_some()
                && view.control_ray_direction_in_world().is_some()
        });
        let Some(view) = view else {
            tracing::debug!("Pointer ray lost, ending drag");
            self.end_drag(cx);
            return false;
        };

        let ToolState::Active(active) = &mut self.state else {
            return false;
        };
        let updated = active
            .subtool
            .update(view, &mut active.session, &self.settings, cx.nodes);
        if updated {
            self.update_visualization(Some(view));
        }
        updated
    }

    /// Finish the active drag and record its undo operation if anything moved.
    pub fn end_drag(&mut self, cx: &mut ToolContext<'_>) {
        if !self.is_active() {
            if matches!(self.state, ToolState::Ready(_)) {
                self.state = self.rest_state();
            }
            return;
        }
        let ToolState::Active(mut active) = std::mem::take(&mut self.state) else {
            return;
        };
        active.subtool.end();

        let description = format!("Transform: {}", active.handle);
        match active.session.into_operation(&*cx.nodes, description) {
            Some(operation) => {
                tracing::debug!("{} ({} node(s))", operation.description, operation.changes.len());
                cx.undo.push(operation);
            }
            None => tracing::trace!("Drag ended without changes"),
        }

        // The pointer may be far from the handle that was grabbed
        self.hover = cx.view.map(|view| self.resolve_hover(view)).unwrap_or_default();
        self.state = self.rest_state();
        self.anchor = compute_anchor(&*cx.nodes, cx.selection);
        self.update_visualization(cx.view);
    }

    fn selection_changed(&mut self, cx: &mut ToolContext<'_>) {
        if self.is_active() {
            self.end_drag(cx);
        }
        if self.anchor_edit.is_some() {
            self.end_anchor_edit(cx);
        }
        self.anchor = compute_anchor(&*cx.nodes, cx.selection);
        self.update_visualization(cx.view);
    }

    fn node_touched(&mut self, cx: &mut ToolContext<'_>, node: NodeId) -> bool {
        if let ToolState::Active(active) = &mut self.state {
            return active.session.refresh(&*cx.nodes, node);
        }
        if !cx.selection.contains(&node) {
            return false;
        }
        if let Some(edit) = self.anchor_edit.as_mut() {
            edit.refresh(&*cx.nodes, node);
        }
        self.anchor = compute_anchor(&*cx.nodes, cx.selection);
        self.update_visualization(cx.view);
        true
    }

    fn update_visualization(&self, view: Option<&dyn SceneView>) {
        let anchor = self.anchor();
        let input = VisualizationInput {
            anchor: anchor.unwrap_or_default(),
            camera_position: view
                .and_then(|view| view.camera())
                .and_then(|camera| camera.node_position),
            selection_empty: anchor.is_none(),
            active: self.active_handle(),
            hover: self.hover,
        };
        self.visualizations
            .with_mut(|visualizations| visualizations.update(&input, &self.settings));
    }

    /// Protractor lines while a rotate drag is active
    pub fn overlay_lines(&self) -> Vec<OverlayLine> {
        let ToolState::Active(active) = &self.state else {
            return Vec::new();
        };
        let scale = self.visualizations.with(|v| v.scale()).unwrap_or(1.0);
        active
            .subtool
            .protractor(&self.settings, scale)
            .map(|protractor| protractor.lines())
            .unwrap_or_default()
    }

    /// Start a numeric anchor edit. Ignored while dragging.
    pub fn begin_anchor_edit(&mut self, cx: &ToolContext<'_>) -> bool {
        if self.is_active() {
            return false;
        }
        if self.anchor_edit.is_none() {
            self.anchor_edit = TransformSession::capture(&*cx.nodes, cx.selection);
        }
        self.anchor_edit.is_some()
    }

    /// Move the selection so its anchor becomes `anchor`.
    ///
    /// Every node keeps its pose relative to the anchor it had when the edit began.
    pub fn edit_anchor(&mut self, cx: &mut ToolContext<'_>, anchor: Trs) -> bool {
        let Some(edit) = self.anchor_edit.as_mut() else {
            return false;
        };
        let initial = edit.anchor_initial;
        if anchor.rotation == initial.rotation && anchor.scale == initial.scale {
            let delta = anchor.translation - initial.translation;
            edit.apply(cx.nodes, anchor, |entry| entry.world_from_node_before.translated(delta));
        } else {
            let delta = anchor.matrix() * initial.matrix().inverse();
            edit.apply(cx.nodes, anchor, |entry| {
                Trs::from_matrix(delta * entry.world_from_node_before.matrix())
            });
        }
        self.update_visualization(cx.view);
        true
    }

    /// Finish the numeric edit and record its undo operation if anything moved.
    pub fn end_anchor_edit(&mut self, cx: &mut ToolContext<'_>) {
        let Some(edit) = self.anchor_edit.take() else {
            return;
        };
        if let Some(operation) = edit.into_operation(&*cx.nodes, "Transform: Anchor") {
            tracing::debug!("{} ({} node(s))", operation.description, operation.changes.len());
            cx.undo.push(operation);
        }
        self.anchor = compute_anchor(&*cx.nodes, cx.selection);
        self.update_visualization(cx.view);
    }

    pub fn is_editing_anchor(&self) -> bool {
        self.anchor_edit.is_some()
    }
}
