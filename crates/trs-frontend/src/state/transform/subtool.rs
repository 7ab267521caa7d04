//! Subtool dispatch and constraint frame helpers

use glam::{Mat3, Vec3};
use trs_core::{AxisMask, HandleKind, NodeStore, SceneView, Settings};
use trs_renderer::Protractor;

use super::DragError;
use super::move_tool::MoveTool;
use super::rotate_tool::RotateTool;
use super::scale_tool::ScaleTool;
use super::session::TransformSession;

/// Constraint frame: anchor axes in local mode, world axes otherwise.
pub(crate) fn constraint_basis(settings: &Settings, session: &TransformSession) -> Option<Mat3> {
    settings.local.then(|| session.anchor_initial.basis())
}

/// Direction of a single-axis mask.
///
/// # Panics
/// On masks that do not name exactly one axis.
pub(crate) fn axis_direction(mask: AxisMask, basis: Option<Mat3>) -> Vec3 {
    match mask.single_axis() {
        Some(axis) => axis.direction(basis),
        None => panic!("axis direction requested for mask {:#05b}", mask.bits()),
    }
}

/// Plane normal of a mask: the axis itself for one axis, the missing axis for two.
///
/// # Panics
/// On empty or three-axis masks.
pub(crate) fn plane_normal(mask: AxisMask, basis: Option<Mat3>) -> Vec3 {
    match (mask.single_axis(), mask.missing_axis()) {
        (Some(axis), _) | (None, Some(axis)) => axis.direction(basis),
        (None, None) => panic!("plane normal requested for mask {:#05b}", mask.bits()),
    }
}

/// In-plane zero-angle direction of a single-axis rotation (X -> Y, Y -> Z, Z -> X).
///
/// # Panics
/// On masks that do not name exactly one axis.
pub(crate) fn plane_side(mask: AxisMask, basis: Option<Mat3>) -> Vec3 {
    match mask.single_axis() {
        Some(axis) => axis.side().direction(basis),
        None => panic!("plane side requested for mask {:#05b}", mask.bits()),
    }
}

/// Pointer projection shared by move and scale: onto the axis line or the
/// constraint plane through the initial drag position.
pub(crate) fn project_pointer(
    view: &dyn SceneView,
    mask: AxisMask,
    basis: Option<Mat3>,
    through: Vec3,
) -> Option<Vec3> {
    match mask.count() {
        1 => {
            let direction = axis_direction(mask, basis);
            view.closest_point_on_line(through - direction, through + direction)
        }
        2 => view.closest_point_on_plane(plane_normal(mask, basis), through),
        3 => {
            let facing = view.control_ray_direction_in_world()?;
            view.closest_point_on_plane(facing, through)
        }
        _ => None,
    }
}

/// Active manipulation strategy
#[derive(Debug, Clone)]
pub enum Subtool {
    Move(MoveTool),
    Rotate(RotateTool),
    Scale(ScaleTool),
}

impl Subtool {
    pub fn begin(
        kind: HandleKind,
        mask: AxisMask,
        view: &dyn SceneView,
        session: &TransformSession,
        settings: &Settings,
    ) -> Result<Self, DragError> {
        if mask.is_empty() {
            return Err(DragError::EmptyAxisMask);
        }
        let subtool = match kind {
            HandleKind::Translate => Self::Move(MoveTool::begin(mask)),
            HandleKind::Rotate => Self::Rotate(RotateTool::begin(mask, view, session, settings)),
            HandleKind::Scale => Self::Scale(ScaleTool::begin(mask, session)),
        };
        Ok(subtool)
    }

    /// Recompute node transforms from the pointer. Returns false when the
    /// pointer could not be projected this frame.
    pub fn update(
        &mut self,
        view: &dyn SceneView,
        session: &mut TransformSession,
        settings: &Settings,
        nodes: &mut dyn NodeStore,
    ) -> bool {
        match self {
            Self::Move(tool) => tool.update(view, session, settings, nodes),
            Self::Rotate(tool) => tool.update(view, session, settings, nodes),
            Self::Scale(tool) => tool.update(view, session, settings, nodes),
        }
    }

    pub fn end(&mut self) {
        match self {
            Self::Move(tool) => tool.end(),
            Self::Rotate(tool) => tool.end(),
            Self::Scale(tool) => tool.end(),
        }
    }

    /// Protractor overlay while rotating
    pub fn protractor(&self, settings: &Settings, scale: f32) -> Option<Protractor> {
        match self {
            Self::Rotate(tool) => Some(tool.protractor(settings, scale)),
            _ => None,
        }
    }
}
