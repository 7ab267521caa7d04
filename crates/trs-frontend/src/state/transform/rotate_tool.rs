//! Rotate about a single constraint axis

use glam::{Quat, Vec3};
use trs_core::constants::ROTATE_PARALLEL_COSINE;
use trs_core::math::{angle_of_rotation, project_point_to_plane, snap_value};
use trs_core::{AxisMask, NodeStore, SceneView, Settings};
use trs_renderer::Protractor;
use trs_renderer::overlay::axis_color;

use super::session::TransformSession;
use super::subtool::{constraint_basis, plane_normal, plane_side};

#[derive(Debug, Clone)]
pub struct RotateTool {
    mask: AxisMask,
    center: Vec3,
    normal: Vec3,
    /// Zero-angle direction, from the center towards the pointer at drag start
    reference: Vec3,
    angle: f32,
    snapped_angle: f32,
}

impl RotateTool {
    pub fn begin(
        mask: AxisMask,
        view: &dyn SceneView,
        session: &TransformSession,
        settings: &Settings,
    ) -> Self {
        let basis = constraint_basis(settings, session);
        let normal = plane_normal(mask, basis);
        let side = plane_side(mask, basis);
        let center = session.anchor_initial.translation;

        let start = view
            .closest_point_on_plane(normal, center)
            .unwrap_or_else(|| project_point_to_plane(normal, center, session.initial_drag_position));
        let reference = match (start - center).try_normalize() {
            Some(reference) => reference,
            None => side,
        };

        Self {
            mask,
            center,
            normal,
            reference,
            angle: 0.0,
            snapped_angle: 0.0,
        }
    }

    /// Applied (snapped) rotation angle in radians
    pub fn angle(&self) -> f32 {
        self.snapped_angle
    }

    /// Pointer position in the rotation plane. Close to edge-on, the ray is
    /// walked out to the initial drag distance and projected instead.
    fn pointer_on_plane(&self, view: &dyn SceneView, session: &TransformSession) -> Option<Vec3> {
        let origin = view.control_ray_origin_in_world()?;
        let direction = view.control_ray_direction_in_world()?.try_normalize()?;
        if direction.dot(self.normal).abs() >= ROTATE_PARALLEL_COSINE {
            if let Some(point) = view.closest_point_on_plane(self.normal, self.center) {
                return Some(point);
            }
        }
        let along = origin + direction * session.initial_drag_distance;
        Some(project_point_to_plane(self.normal, self.center, along))
    }

    pub fn update(
        &mut self,
        view: &dyn SceneView,
        session: &mut TransformSession,
        settings: &Settings,
        nodes: &mut dyn NodeStore,
    ) -> bool {
        let Some(point) = self.pointer_on_plane(view, session) else {
            return false;
        };
        let Some(direction) = (point - self.center).try_normalize() else {
            return false;
        };

        let angle = angle_of_rotation(direction, self.normal, self.reference);
        let snapped = match settings.rotate_snap_step() {
            Some(step) => snap_value(angle, step),
            None => angle,
        };
        self.angle = angle;
        self.snapped_angle = snapped;

        let rotation = Quat::from_axis_angle(self.normal, snapped);
        let center = self.center;
        let anchor_initial = session.anchor_initial;
        if rotation == Quat::IDENTITY {
            session.apply(nodes, anchor_initial, |entry| entry.world_from_node_before);
            return true;
        }

        let anchor = anchor_initial.rotated_about(center, rotation);
        if settings.local && session.is_single() {
            session.apply(nodes, anchor, |entry| entry.world_from_node_before.rotated_in_place(rotation));
        } else {
            session.apply(nodes, anchor, |entry| entry.world_from_node_before.rotated_about(center, rotation));
        }
        true
    }

    pub fn end(&mut self) {
        self.angle = 0.0;
        self.snapped_angle = 0.0;
    }

    pub fn protractor(&self, settings: &Settings, scale: f32) -> Protractor {
        Protractor {
            center: self.center,
            normal: self.normal,
            reference: self.reference,
            angle: self.angle,
            snapped_angle: self.snapped_angle,
            snap: settings.rotate_snap_step(),
            scale,
            axis_color: axis_color(self.mask),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::transform::test_support::FakeView;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
    use trs_core::{NodeId, Scene, Trs};

    fn two_nodes() -> (Scene, NodeId, NodeId) {
        let mut scene = Scene::new();
        let a = scene.add_node("a", None, Trs::from_translation(Vec3::new(1.0, 0.0, 0.0)));
        let b = scene.add_node("b", None, Trs::from_translation(Vec3::new(-1.0, 0.0, 0.0)));
        (scene, a, b)
    }

    #[test]
    fn test_reference_from_pointer() {
        let (scene, a, b) = two_nodes();
        let session = TransformSession::capture(&scene, &[a, b])
            .unwrap()
            .with_drag_start(Vec3::new(4.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 10.0));
        let tool = RotateTool::begin(AxisMask::Z, &FakeView::down_at(4.0, 0.0), &session, &Settings::default());
        assert!(tool.reference.abs_diff_eq(Vec3::X, 1e-6));
        assert_eq!(tool.center, Vec3::ZERO);
    }

    #[test]
    fn test_reference_falls_back_to_side() {
        let (scene, a, b) = two_nodes();
        let session = TransformSession::capture(&scene, &[a, b]).unwrap();
        // Pointer straight down the center: no usable direction
        let tool = RotateTool::begin(AxisMask::Z, &FakeView::down_at(0.0, 0.0), &session, &Settings::default());
        assert_eq!(tool.reference, Vec3::X);
    }

    #[test]
    fn test_rotation_is_absolute() {
        let (mut scene, a, b) = two_nodes();
        let mut session = TransformSession::capture(&scene, &[a, b])
            .unwrap()
            .with_drag_start(Vec3::new(4.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 10.0));
        let settings = Settings::default();
        let mut tool = RotateTool::begin(AxisMask::Z, &FakeView::down_at(4.0, 0.0), &session, &settings);

        assert!(tool.update(&FakeView::down_at(0.0, 4.0), &mut session, &settings, &mut scene));
        assert_relative_eq!(tool.angle(), FRAC_PI_2, epsilon = 1e-5);
        assert!(tool.update(&FakeView::down_at(-4.0, 4.0), &mut session, &settings, &mut scene));
        assert_relative_eq!(tool.angle(), 3.0 * FRAC_PI_4, epsilon = 1e-5);

        let expected = Quat::from_rotation_z(3.0 * FRAC_PI_4) * Vec3::X;
        let world_a = scene.world_transform(a).unwrap();
        let world_b = scene.world_transform(b).unwrap();
        assert!(world_a.translation.abs_diff_eq(expected, 1e-5));
        assert!(world_b.translation.abs_diff_eq(-expected, 1e-5));
        assert!(world_a.rotation.abs_diff_eq(Quat::from_rotation_z(3.0 * FRAC_PI_4), 1e-5));
    }

    #[test]
    fn test_snapped_rotation() {
        let (mut scene, a, b) = two_nodes();
        let mut session = TransformSession::capture(&scene, &[a, b])
            .unwrap()
            .with_drag_start(Vec3::new(4.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 10.0));
        let settings = Settings {
            rotate_snap_enable: true,
            rotate_snap: 45.0,
            ..Settings::default()
        };
        let mut tool = RotateTool::begin(AxisMask::Z, &FakeView::down_at(4.0, 0.0), &session, &settings);

        // ~30 degrees snaps to 45
        assert!(tool.update(&FakeView::down_at(4.0, 2.4), &mut session, &settings, &mut scene));
        assert_relative_eq!(tool.angle(), FRAC_PI_4, epsilon = 1e-5);
        let protractor = tool.protractor(&settings, 1.0);
        assert_eq!(protractor.tick_count(), 8);
        assert!(protractor.angle < protractor.snapped_angle);
    }

    #[test]
    fn test_zero_angle_leaves_nodes_untouched() {
        let (mut scene, a, b) = two_nodes();
        let mut session = TransformSession::capture(&scene, &[a, b])
            .unwrap()
            .with_drag_start(Vec3::new(4.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 10.0));
        let settings = Settings::default();
        let mut tool = RotateTool::begin(AxisMask::Z, &FakeView::down_at(4.0, 0.0), &session, &settings);

        assert!(tool.update(&FakeView::down_at(5.0, 0.0), &mut session, &settings, &mut scene));
        assert!(!session.touched);
        assert_eq!(scene.world_transform(a).unwrap().translation, Vec3::X);
    }

    #[test]
    fn test_local_single_node_rotates_in_place() {
        let mut scene = Scene::new();
        let node = scene.add_node("n", None, Trs::from_translation(Vec3::new(2.0, 0.0, 0.0)));
        let mut session = TransformSession::capture(&scene, &[node])
            .unwrap()
            .with_drag_start(Vec3::new(6.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 10.0));
        let settings = Settings {
            local: true,
            ..Settings::default()
        };
        let mut tool = RotateTool::begin(AxisMask::Z, &FakeView::down_at(6.0, 0.0), &session, &settings);

        assert!(tool.update(&FakeView::down_at(2.0, 4.0), &mut session, &settings, &mut scene));
        let world = scene.world_transform(node).unwrap();
        assert_eq!(world.translation, Vec3::new(2.0, 0.0, 0.0));
        assert!(world.rotation.abs_diff_eq(Quat::from_rotation_z(FRAC_PI_2), 1e-5));
    }

    #[test]
    fn test_edge_on_ray_projects_at_drag_distance() {
        let (mut scene, a, b) = two_nodes();
        let mut session = TransformSession::capture(&scene, &[a, b])
            .unwrap()
            .with_drag_start(Vec3::new(4.0, 0.0, 0.0), Vec3::new(4.0, -10.0, 0.0));
        let settings = Settings::default();
        let view = FakeView::ray(Vec3::new(4.0, -10.0, 0.0), Vec3::Y);
        let mut tool = RotateTool::begin(AxisMask::Z, &view, &session, &settings);
        assert!(tool.reference.abs_diff_eq(Vec3::X, 1e-6));

        // Ray lies in the plane; the point at the drag distance is (0, -4, 0)
        let view = FakeView::ray(Vec3::new(-10.0, -4.0, 0.0), Vec3::X);
        assert!(tool.update(&view, &mut session, &settings, &mut scene));
        assert_relative_eq!(tool.angle().abs(), FRAC_PI_2, epsilon = 1e-5);
    }
}
