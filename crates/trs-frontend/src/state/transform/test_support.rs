//! Scripted scene view for tool tests

use glam::Vec3;
use trs_core::{HoverEntry, HoverSlot, PickableId, SceneView, ViewCamera};

#[derive(Debug, Clone)]
pub struct FakeView {
    pub camera: Option<ViewCamera>,
    pub origin: Option<Vec3>,
    pub direction: Option<Vec3>,
    pub tool_hover: HoverEntry,
}

impl FakeView {
    /// Pointer ray with a camera node at the ray origin
    pub fn ray(origin: Vec3, direction: Vec3) -> Self {
        Self {
            camera: Some(ViewCamera {
                node_position: Some(origin),
            }),
            origin: Some(origin),
            direction: Some(direction),
            tool_hover: HoverEntry::default(),
        }
    }

    /// Straight-down ray at `(x, y)` from `z = 10`
    pub fn down_at(x: f32, y: f32) -> Self {
        Self::ray(Vec3::new(x, y, 10.0), Vec3::NEG_Z)
    }

    pub fn hovering(mut self, pickable: PickableId, position: Vec3) -> Self {
        self.tool_hover = HoverEntry::hit(pickable, position);
        self
    }
}

impl SceneView for FakeView {
    fn camera(&self) -> Option<ViewCamera> {
        self.camera
    }

    fn control_ray_origin_in_world(&self) -> Option<Vec3> {
        self.origin
    }

    fn control_ray_direction_in_world(&self) -> Option<Vec3> {
        self.direction
    }

    fn hover(&self, slot: HoverSlot) -> HoverEntry {
        match slot {
            HoverSlot::Tool => self.tool_hover,
            HoverSlot::Content => HoverEntry::default(),
        }
    }
}
