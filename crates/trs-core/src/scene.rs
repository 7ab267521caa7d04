//! Scene collaborator contracts and an in-memory node hierarchy
//!
//! The manipulation core talks to the scene only through [`NodeStore`]
//! (node transforms and flags) and [`SceneView`] (camera, pointer ray and
//! hover results). [`Scene`] and [`Selection`] are small reference
//! implementations used by the editor context and tests.

use std::collections::HashMap;

use glam::Vec3;
use uuid::Uuid;

use crate::math;
use crate::transform::Trs;

/// Scene node identifier
pub type NodeId = Uuid;

/// Dense integer id of a pickable mesh, assigned by the handle registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PickableId(pub u32);

impl PickableId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Per-node boolean flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeFlag {
    /// The node must not be moved by viewport manipulation
    LockViewportTransform,
}

/// Node transform access.
pub trait NodeStore {
    fn world_transform(&self, node: NodeId) -> Option<Trs>;

    /// Transform relative to the node's parent (world transform for root nodes)
    fn parent_transform(&self, node: NodeId) -> Option<Trs>;

    fn set_world_transform(&mut self, node: NodeId, world: Trs) -> Result<(), SceneError>;

    fn set_parent_transform(&mut self, node: NodeId, local: Trs) -> Result<(), SceneError>;

    fn has_flag(&self, node: NodeId, flag: NodeFlag) -> bool;

    fn is_transform_locked(&self, node: NodeId) -> bool {
        self.has_flag(node, NodeFlag::LockViewportTransform)
    }
}

/// Hover result slots reported by the scene view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoverSlot {
    /// Regular scene content
    Content,
    /// Tool geometry (gizmo handles)
    Tool,
}

/// Result of hit-testing one hover slot under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoverEntry {
    pub valid: bool,
    pub pickable: Option<PickableId>,
    /// World-space hit position
    pub position: Option<Vec3>,
}

impl HoverEntry {
    pub fn hit(pickable: PickableId, position: Vec3) -> Self {
        Self {
            valid: true,
            pickable: Some(pickable),
            position: Some(position),
        }
    }
}

/// Camera as seen by the manipulation core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewCamera {
    /// World position of the camera node; `None` when the camera is not attached to a node
    pub node_position: Option<Vec3>,
}

/// Viewport the pointer interacts with.
pub trait SceneView {
    fn camera(&self) -> Option<ViewCamera>;

    /// Pointer ray origin, `None` when the pointer ray is undefined
    fn control_ray_origin_in_world(&self) -> Option<Vec3>;

    /// Pointer ray direction, `None` when the pointer ray is undefined
    fn control_ray_direction_in_world(&self) -> Option<Vec3>;

    fn hover(&self, slot: HoverSlot) -> HoverEntry;

    /// Point on the line `p0 -> p1` closest to the pointer ray.
    fn closest_point_on_line(&self, p0: Vec3, p1: Vec3) -> Option<Vec3> {
        let q0 = self.control_ray_origin_in_world()?;
        let q1 = q0 + self.control_ray_direction_in_world()?;
        math::closest_points(p0, p1, q0, q1).map(|c| c.p)
    }

    /// Intersection of the pointer ray with the plane through `point`.
    fn closest_point_on_plane(&self, normal: Vec3, point: Vec3) -> Option<Vec3> {
        let origin = self.control_ray_origin_in_world()?;
        let direction = self.control_ray_direction_in_world()?;
        let t = math::intersect_plane(normal, point, origin, direction)?;
        Some(origin + direction * t)
    }
}

/// Scene errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),
}

/// A node of the in-memory scene
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub parent: Option<NodeId>,
    /// Transform relative to the parent
    pub local: Trs,
    pub locked: bool,
}

/// In-memory node hierarchy implementing [`NodeStore`].
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: HashMap<NodeId, SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with a parent-relative transform
    pub fn add_node(&mut self, name: impl Into<String>, parent: Option<NodeId>, local: Trs) -> NodeId {
        let id = Uuid::new_v4();
        self.nodes.insert(
            id,
            SceneNode {
                name: name.into(),
                parent,
                local,
                locked: false,
            },
        );
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn set_locked(&mut self, id: NodeId, locked: bool) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(&id).ok_or(SceneError::NodeNotFound(id))?;
        node.locked = locked;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn parent_world(&self, node: &SceneNode) -> Option<Trs> {
        node.parent.and_then(|parent| self.world_transform(parent))
    }
}

impl NodeStore for Scene {
    fn world_transform(&self, id: NodeId) -> Option<Trs> {
        let node = self.nodes.get(&id)?;
        match self.parent_world(node) {
            Some(parent) => Some(parent.mul_trs(&node.local)),
            None => Some(node.local),
        }
    }

    fn parent_transform(&self, id: NodeId) -> Option<Trs> {
        self.nodes.get(&id).map(|node| node.local)
    }

    fn set_world_transform(&mut self, id: NodeId, world: Trs) -> Result<(), SceneError> {
        let node = self.nodes.get(&id).ok_or(SceneError::NodeNotFound(id))?;
        let local = match self.parent_world(node) {
            Some(parent) => parent.inverse().mul_trs(&world),
            None => world,
        };
        self.set_parent_transform(id, local)
    }

    fn set_parent_transform(&mut self, id: NodeId, local: Trs) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(&id).ok_or(SceneError::NodeNotFound(id))?;
        node.local = local;
        Ok(())
    }

    fn has_flag(&self, id: NodeId, flag: NodeFlag) -> bool {
        match flag {
            NodeFlag::LockViewportTransform => self.nodes.get(&id).is_some_and(|n| n.locked),
        }
    }
}

/// Ordered selection set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    nodes: Vec<NodeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection; returns true when it changed
    pub fn set(&mut self, nodes: impl IntoIterator<Item = NodeId>) -> bool {
        let mut next = Vec::new();
        for node in nodes {
            if !next.contains(&node) {
                next.push(node);
            }
        }
        let changed = next != self.nodes;
        self.nodes = next;
        changed
    }

    /// Append a node; returns true when it was not selected yet
    pub fn add(&mut self, node: NodeId) -> bool {
        if self.nodes.contains(&node) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.nodes.is_empty();
        self.nodes.clear();
        changed
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Quat;

    #[test]
    fn test_world_transform_follows_parent() {
        let mut scene = Scene::new();
        let parent = scene.add_node(
            "parent",
            None,
            Trs::new(Vec3::new(1.0, 0.0, 0.0), Quat::from_rotation_z(std::f32::consts::FRAC_PI_2), Vec3::ONE),
        );
        let child = scene.add_node("child", Some(parent), Trs::from_translation(Vec3::X));

        let world = scene.world_transform(child).unwrap();
        assert_relative_eq!(world.translation.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(world.translation.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_set_world_transform_on_child() {
        let mut scene = Scene::new();
        let parent = scene.add_node("parent", None, Trs::from_translation(Vec3::new(0.0, 0.0, 2.0)));
        let child = scene.add_node("child", Some(parent), Trs::IDENTITY);

        scene
            .set_world_transform(child, Trs::from_translation(Vec3::new(1.0, 0.0, 2.0)))
            .unwrap();
        let local = scene.parent_transform(child).unwrap();
        assert!(local.translation.abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn test_root_world_transform_is_exact() {
        let mut scene = Scene::new();
        let node = scene.add_node("root", None, Trs::IDENTITY);
        let target = Trs::new(Vec3::new(0.1, 0.2, 0.3), Quat::from_rotation_y(0.7), Vec3::splat(1.5));
        scene.set_world_transform(node, target).unwrap();
        assert_eq!(scene.world_transform(node), Some(target));
    }

    #[test]
    fn test_missing_node() {
        let mut scene = Scene::new();
        let id = Uuid::new_v4();
        assert_eq!(
            scene.set_world_transform(id, Trs::IDENTITY),
            Err(SceneError::NodeNotFound(id))
        );
        assert!(!scene.is_transform_locked(id));
    }

    #[test]
    fn test_lock_flag() {
        let mut scene = Scene::new();
        let node = scene.add_node("n", None, Trs::IDENTITY);
        scene.set_locked(node, true).unwrap();
        assert!(scene.has_flag(node, NodeFlag::LockViewportTransform));
    }

    #[test]
    fn test_selection_order_and_dedup() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut selection = Selection::new();
        assert!(selection.set([b, a, b]));
        assert_eq!(selection.nodes(), &[b, a]);
        assert!(!selection.set([b, a]));
        assert!(!selection.add(a));
        assert!(selection.clear());
        assert!(selection.is_empty());
    }

    struct RayView {
        origin: Vec3,
        direction: Vec3,
    }

    impl SceneView for RayView {
        fn camera(&self) -> Option<ViewCamera> {
            None
        }
        fn control_ray_origin_in_world(&self) -> Option<Vec3> {
            Some(self.origin)
        }
        fn control_ray_direction_in_world(&self) -> Option<Vec3> {
            Some(self.direction)
        }
        fn hover(&self, _slot: HoverSlot) -> HoverEntry {
            HoverEntry::default()
        }
    }

    #[test]
    fn test_default_projections() {
        let view = RayView {
            origin: Vec3::new(2.0, 3.0, 10.0),
            direction: -Vec3::Z,
        };
        let on_plane = view.closest_point_on_plane(Vec3::Z, Vec3::ZERO).unwrap();
        assert_eq!(on_plane, Vec3::new(2.0, 3.0, 0.0));

        let on_line = view.closest_point_on_line(Vec3::ZERO, Vec3::X).unwrap();
        assert_relative_eq!(on_line.x, 2.0, epsilon = 1e-5);
        assert_eq!(on_line.y, 0.0);
    }
}
