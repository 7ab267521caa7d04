//! Viewport state: orbit camera, pointer and gizmo hover

use glam::{Vec2, Vec3};
use trs_core::{HoverEntry, HoverSlot, SceneView, ViewCamera};
use trs_renderer::{Camera, VisualizationSlot};

/// Scene view backed by an orbit camera and a pointer position in pixels.
#[derive(Debug, Clone)]
pub struct ViewportSceneView {
    camera: Camera,
    size: Vec2,
    pointer: Option<Vec2>,
    ray: Option<(Vec3, Vec3)>,
    tool_hover: HoverEntry,
}

impl ViewportSceneView {
    pub fn new(size: Vec2) -> Self {
        Self {
            camera: Camera::new(size.x / size.y.max(1.0)),
            size,
            pointer: None,
            ray: None,
            tool_hover: HoverEntry::default(),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera access; the pointer ray is recomputed from the last pointer.
    pub fn update_camera(&mut self, f: impl FnOnce(&mut Camera)) {
        f(&mut self.camera);
        self.update_ray();
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_size(&mut self, size: Vec2) {
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        self.size = size;
        self.camera.aspect = size.x / size.y;
        self.update_ray();
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Pointer position in viewport pixels; `None` when the pointer left the viewport.
    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer;
        self.update_ray();
    }

    fn update_ray(&mut self) {
        self.ray = self
            .pointer
            .map(|pointer| self.camera.screen_to_ray(pointer, self.size))
            .filter(|(origin, direction)| origin.is_finite() && direction.is_finite());
    }

    /// Hit-test the gizmo under the pointer. Returns true when the hover entry changed.
    pub fn refresh_hover(&mut self, visualizations: &VisualizationSlot) -> bool {
        let hit = self.ray.and_then(|(origin, direction)| {
            visualizations
                .with(|v| v.hit_test(origin, direction))
                .flatten()
        });
        let entry = hit
            .map(|hit| HoverEntry::hit(hit.pickable, hit.position))
            .unwrap_or_default();
        let changed = entry != self.tool_hover;
        self.tool_hover = entry;
        changed
    }

    /// Screen position of a world point, for overlay drawing
    pub fn project(&self, point: Vec3) -> Option<Vec2> {
        self.camera.world_to_screen(point, self.size)
    }
}

impl SceneView for ViewportSceneView {
    fn camera(&self) -> Option<ViewCamera> {
        Some(ViewCamera {
            node_position: Some(self.camera.position),
        })
    }

    fn control_ray_origin_in_world(&self) -> Option<Vec3> {
        self.ray.map(|(origin, _)| origin)
    }

    fn control_ray_direction_in_world(&self) -> Option<Vec3> {
        self.ray.map(|(_, direction)| direction)
    }

    fn hover(&self, slot: HoverSlot) -> HoverEntry {
        match slot {
            HoverSlot::Tool => self.tool_hover,
            HoverSlot::Content => HoverEntry::default(),
        }
    }
}
