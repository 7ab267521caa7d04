//! Scale along axes, within a plane, or uniformly

use glam::{Mat4, Quat, Vec3};
use trs_core::constants::GEOMETRY_EPSILON;
use trs_core::{Axis, AxisMask, NodeStore, SceneView, Settings, Trs};

use super::session::TransformSession;
use super::subtool::{constraint_basis, project_pointer};

/// Per-axis factors for a mask: `s` on masked axes, `1` elsewhere.
pub fn scale_vector(mask: AxisMask, s: f32) -> Vec3 {
    let pick = |axis: Axis| if mask.contains(axis) { s } else { 1.0 };
    Vec3::new(pick(Axis::X), pick(Axis::Y), pick(Axis::Z))
}

#[derive(Debug, Clone)]
pub struct ScaleTool {
    mask: AxisMask,
    pivot: Vec3,
    initial_distance: f32,
    factor: Vec3,
}

impl ScaleTool {
    pub fn begin(mask: AxisMask, session: &TransformSession) -> Self {
        let pivot = session.anchor_initial.translation;
        Self {
            mask,
            pivot,
            initial_distance: pivot.distance(session.initial_drag_position),
            factor: Vec3::ONE,
        }
    }

    pub fn factor(&self) -> Vec3 {
        self.factor
    }

    /// Ratio of pointer distances from the pivot; 1 when the start is degenerate.
    fn ratio(&self, point: Vec3) -> f32 {
        if self.initial_distance <= GEOMETRY_EPSILON || !self.initial_distance.is_finite() {
            return 1.0;
        }
        let s = self.pivot.distance(point) / self.initial_distance;
        if s.is_finite() { s } else { 1.0 }
    }

    pub fn update(
        &mut self,
        view: &dyn SceneView,
        session: &mut TransformSession,
        settings: &Settings,
        nodes: &mut dyn NodeStore,
    ) -> bool {
        let basis = constraint_basis(settings, session);
        let Some(point) = project_pointer(view, self.mask, basis, session.initial_drag_position) else {
            return false;
        };
        let factor = scale_vector(self.mask, self.ratio(point));
        // A collapsed axis has no inverse; keep the previous frame for nodes and anchor alike
        if factor.abs().min_element() <= GEOMETRY_EPSILON {
            return false;
        }
        self.factor = factor;

        let anchor_initial = session.anchor_initial;
        if factor == Vec3::ONE {
            session.apply(nodes, anchor_initial, |entry| entry.world_from_node_before);
            return true;
        }

        if settings.local && session.is_single() {
            let anchor = anchor_initial.scaled_local(factor);
            session.apply(nodes, anchor, |entry| entry.world_from_node_before.scaled_local(factor));
            return true;
        }

        // Scale about the pivot in the constraint frame
        let rotation = if settings.local { anchor_initial.rotation } else { Quat::IDENTITY };
        let frame = Mat4::from_rotation_translation(rotation, self.pivot);
        let world_scale = frame * Mat4::from_scale(factor) * frame.inverse();
        let anchor = Trs {
            scale: anchor_initial.scale * factor,
            ..anchor_initial
        };
        session.apply(nodes, anchor, |entry| {
            Trs::from_matrix(world_scale * entry.world_from_node_before.matrix())
        });
        true
    }

    pub fn end(&mut self) {
        self.factor = Vec3::ONE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::transform::test_support::FakeView;
    use approx::assert_relative_eq;
    use trs_core::{NodeId, Scene};

    fn single(scene: &mut Scene, start: Vec3) -> (NodeId, TransformSession) {
        let node = scene.add_node("n", None, Trs::IDENTITY);
        let session = TransformSession::capture(scene, &[node])
            .unwrap()
            .with_drag_start(start, Vec3::new(0.0, 0.0, 10.0));
        (node, session)
    }

    #[test]
    fn test_scale_vector() {
        assert_eq!(scale_vector(AxisMask::X, 2.0), Vec3::new(2.0, 1.0, 1.0));
        assert_eq!(scale_vector(AxisMask::YZ, 2.0), Vec3::new(1.0, 2.0, 2.0));
        assert_eq!(scale_vector(AxisMask::XYZ, 2.0), Vec3::splat(2.0));
        assert_eq!(scale_vector(AxisMask::NONE, 2.0), Vec3::ONE);
    }

    #[test]
    fn test_axis_scale_doubles() {
        let mut scene = Scene::new();
        let (node, mut session) = single(&mut scene, Vec3::new(2.0, 0.0, 0.0));
        let mut tool = ScaleTool::begin(AxisMask::X, &session);
        let view = FakeView::ray(Vec3::new(4.0, 0.5, 10.0), Vec3::NEG_Z);

        assert!(tool.update(&view, &mut session, &Settings::default(), &mut scene));
        let world = scene.world_transform(node).unwrap();
        assert_relative_eq!(world.scale.x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(world.scale.y, 1.0, epsilon = 1e-5);
        assert_eq!(tool.factor(), Vec3::new(2.0, 1.0, 1.0));
    }

    #[test]
    fn test_ratio_depends_only_on_projection() {
        let mut scene = Scene::new();
        let (_, mut session) = single(&mut scene, Vec3::new(2.0, 0.0, 0.0));
        let mut tool = ScaleTool::begin(AxisMask::X, &session);
        let settings = Settings::default();

        tool.update(&FakeView::ray(Vec3::new(7.0, 0.0, 10.0), Vec3::NEG_Z), &mut session, &settings, &mut scene);
        tool.update(&FakeView::ray(Vec3::new(3.0, 1.0, 10.0), Vec3::NEG_Z), &mut session, &settings, &mut scene);
        assert_relative_eq!(tool.factor().x, 1.5, epsilon = 1e-5);
    }

    #[test]
    fn test_degenerate_start_is_identity() {
        let mut scene = Scene::new();
        let (node, mut session) = single(&mut scene, Vec3::ZERO);
        let mut tool = ScaleTool::begin(AxisMask::X, &session);
        let view = FakeView::ray(Vec3::new(5.0, 0.0, 10.0), Vec3::NEG_Z);

        assert!(tool.update(&view, &mut session, &Settings::default(), &mut scene));
        assert_eq!(tool.factor(), Vec3::ONE);
        assert!(!session.touched);
        assert_eq!(scene.world_transform(node), Some(Trs::IDENTITY));
    }

    #[test]
    fn test_scale_through_pivot_keeps_last_frame() {
        let mut scene = Scene::new();
        let a = scene.add_node("a", None, Trs::from_translation(Vec3::new(1.0, 0.0, 0.0)));
        let b = scene.add_node("b", None, Trs::from_translation(Vec3::new(-1.0, 0.0, 0.0)));
        let mut session = TransformSession::capture(&scene, &[a, b])
            .unwrap()
            .with_drag_start(Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 10.0));
        let mut tool = ScaleTool::begin(AxisMask::X, &session);
        let settings = Settings::default();

        let half = FakeView::ray(Vec3::new(1.0, 0.5, 10.0), Vec3::NEG_Z);
        assert!(tool.update(&half, &mut session, &settings, &mut scene));
        assert_relative_eq!(scene.world_transform(a).unwrap().scale.x, 0.5, epsilon = 1e-5);

        let pivot = FakeView::ray(Vec3::new(0.0, 0.5, 10.0), Vec3::NEG_Z);
        assert!(!tool.update(&pivot, &mut session, &settings, &mut scene));
        let world_a = scene.world_transform(a).unwrap();
        assert_relative_eq!(world_a.scale.x, 0.5, epsilon = 1e-5);
        assert_relative_eq!(world_a.translation.x, 0.5, epsilon = 1e-5);
        assert_relative_eq!(session.anchor.scale.x, 0.5, epsilon = 1e-5);
        assert_eq!(tool.factor(), Vec3::new(0.5, 1.0, 1.0));
    }

    #[test]
    fn test_uniform_scale_about_anchor() {
        let mut scene = Scene::new();
        let a = scene.add_node("a", None, Trs::from_translation(Vec3::new(1.0, 0.0, 0.0)));
        let b = scene.add_node("b", None, Trs::from_translation(Vec3::new(-1.0, 0.0, 0.0)));
        let mut session = TransformSession::capture(&scene, &[a, b])
            .unwrap()
            .with_drag_start(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, 10.0));
        let mut tool = ScaleTool::begin(AxisMask::XYZ, &session);
        // Uniform projection uses the plane facing the ray through the drag start
        let view = FakeView::ray(Vec3::new(0.0, 3.0, 10.0), Vec3::NEG_Z);

        assert!(tool.update(&view, &mut session, &Settings::default(), &mut scene));
        let world_a = scene.world_transform(a).unwrap();
        let world_b = scene.world_transform(b).unwrap();
        assert!(world_a.translation.abs_diff_eq(Vec3::new(1.5, 0.0, 0.0), 1e-5));
        assert!(world_b.translation.abs_diff_eq(Vec3::new(-1.5, 0.0, 0.0), 1e-5));
        assert!(world_a.scale.abs_diff_eq(Vec3::splat(1.5), 1e-5));
        assert!(session.anchor.scale.abs_diff_eq(Vec3::splat(1.5), 1e-5));
    }
}
