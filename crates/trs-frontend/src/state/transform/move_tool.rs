//! Translate along an axis or within a plane

use glam::Vec3;
use trs_core::math::snap_value;
use trs_core::{AxisMask, NodeStore, SceneView, Settings};

use super::session::TransformSession;
use super::subtool::{constraint_basis, project_pointer};

#[derive(Debug, Clone)]
pub struct MoveTool {
    mask: AxisMask,
    /// Last applied world translation
    translation: Vec3,
}

impl MoveTool {
    pub fn begin(mask: AxisMask) -> Self {
        Self {
            mask,
            translation: Vec3::ZERO,
        }
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn update(
        &mut self,
        view: &dyn SceneView,
        session: &mut TransformSession,
        settings: &Settings,
        nodes: &mut dyn NodeStore,
    ) -> bool {
        let basis = constraint_basis(settings, session);
        let start = session.initial_drag_position;
        let Some(point) = project_pointer(view, self.mask, basis, start) else {
            return false;
        };

        // Components outside the mask are zeroed in the constraint frame. Root
        // nodes keep the exact bits of locked axes; children go through the
        // parent inverse and may round.
        let constrain = |v: Vec3| {
            let v = self.mask.select(v);
            match settings.translate_snap_step() {
                Some(step) => Vec3::new(
                    snap_value(v.x, step),
                    snap_value(v.y, step),
                    snap_value(v.z, step),
                ),
                None => v,
            }
        };
        let delta = point - start;
        let translation = match basis {
            None => constrain(delta),
            Some(basis) => basis * constrain(basis.transpose() * delta),
        };
        if !translation.is_finite() {
            return false;
        }

        self.translation = translation;
        let anchor = session.anchor_initial.translated(translation);
        session.apply(nodes, anchor, |entry| entry.world_from_node_before.translated(translation));
        true
    }

    pub fn end(&mut self) {
        self.translation = Vec3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::transform::test_support::FakeView;
    use approx::assert_relative_eq;
    use glam::Quat;
    use trs_core::{Scene, Trs};

    fn session(scene: &Scene, nodes: &[trs_core::NodeId], start: Vec3) -> TransformSession {
        TransformSession::capture(scene, nodes)
            .unwrap()
            .with_drag_start(start, Vec3::new(0.0, 0.0, 10.0))
    }

    #[test]
    fn test_axis_move_keeps_root_components_bitwise() {
        let mut scene = Scene::new();
        let node = scene.add_node(
            "n",
            None,
            Trs::new(Vec3::new(0.1, 0.2, 0.3), Quat::from_rotation_y(0.2), Vec3::ONE),
        );
        let mut session = session(&scene, &[node], Vec3::new(1.1, 0.2, 0.3));
        let mut tool = MoveTool::begin(AxisMask::X);
        let view = FakeView::ray(Vec3::new(2.6, 0.9, 10.0), Vec3::NEG_Z);

        assert!(tool.update(&view, &mut session, &Settings::default(), &mut scene));
        let world = scene.world_transform(node).unwrap();
        assert_relative_eq!(world.translation.x, 1.6, epsilon = 1e-5);
        assert_eq!(world.translation.y.to_bits(), 0.2_f32.to_bits());
        assert_eq!(world.translation.z.to_bits(), 0.3_f32.to_bits());
        assert!(session.touched);
    }

    #[test]
    fn test_plane_move_stays_in_plane() {
        let mut scene = Scene::new();
        let node = scene.add_node("n", None, Trs::from_translation(Vec3::new(0.0, 0.0, 0.5)));
        let mut session = session(&scene, &[node], Vec3::new(1.0, 1.0, 0.5));
        let mut tool = MoveTool::begin(AxisMask::XY);
        let view = FakeView::ray(Vec3::new(3.0, -2.0, 10.0), Vec3::new(0.01, 0.0, -1.0).normalize());

        assert!(tool.update(&view, &mut session, &Settings::default(), &mut scene));
        let world = scene.world_transform(node).unwrap();
        assert_eq!(world.translation.z.to_bits(), 0.5_f32.to_bits());
        assert!(world.translation.x > 1.9);
        assert_relative_eq!(world.translation.y, -3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_snapped_move() {
        let mut scene = Scene::new();
        let node = scene.add_node("n", None, Trs::IDENTITY);
        let mut session = session(&scene, &[node], Vec3::new(1.0, 0.0, 0.0));
        let mut tool = MoveTool::begin(AxisMask::X);
        let settings = Settings {
            translate_snap_enable: true,
            translate_snap: 1.0,
            ..Settings::default()
        };
        let view = FakeView::ray(Vec3::new(3.37, 0.0, 5.0), Vec3::NEG_Z);

        assert!(tool.update(&view, &mut session, &settings, &mut scene));
        assert_eq!(scene.world_transform(node).unwrap().translation, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(session.anchor.translation, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(tool.translation(), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_local_axis_follows_anchor_rotation() {
        let mut scene = Scene::new();
        let rotation = Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
        let node = scene.add_node("n", None, Trs::from_rotation(rotation));
        let mut session = session(&scene, &[node], Vec3::new(0.0, 1.0, 0.0));
        let mut tool = MoveTool::begin(AxisMask::X);
        let settings = Settings {
            local: true,
            ..Settings::default()
        };
        let view = FakeView::ray(Vec3::new(0.5, 3.0, 10.0), Vec3::NEG_Z);

        assert!(tool.update(&view, &mut session, &settings, &mut scene));
        let world = scene.world_transform(node).unwrap();
        assert_relative_eq!(world.translation.y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(world.translation.x, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_parallel_ray_is_skipped() {
        let mut scene = Scene::new();
        let node = scene.add_node("n", None, Trs::IDENTITY);
        let mut session = session(&scene, &[node], Vec3::X);
        let mut tool = MoveTool::begin(AxisMask::X);
        let view = FakeView::ray(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_X);

        assert!(!tool.update(&view, &mut session, &Settings::default(), &mut scene));
        assert!(!session.touched);
    }
}
