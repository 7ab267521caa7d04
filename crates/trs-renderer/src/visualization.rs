//! Per-frame placement, visibility and coloring of the gizmo handle meshes

use std::sync::Arc;

use glam::{Mat4, Vec3};
use trs_core::{Handle, HandleKind, PickableId, Settings, Trs};

use crate::constants::SCALE_DIVISOR;
use crate::gizmo::{HandleMeshSpec, HandleShape, ShapeGeometry};
use crate::registry::{HandleRegistry, Material, MaterialId, MaterialMode};

/// A placed handle mesh instance
#[derive(Debug, Clone)]
pub struct HandleMeshInstance {
    /// Pickable id of this mesh
    pub pickable: PickableId,
    /// Static description (handle, shape, placement)
    pub spec: HandleMeshSpec,
    /// Whether the mesh is drawn and pickable this frame
    pub visible: bool,
    /// Current material
    pub material: Option<MaterialId>,
    /// World from shape space
    pub world_from_mesh: Mat4,
}

/// Tool state the updater reads every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualizationInput {
    /// Current anchor transform
    pub anchor: Trs,
    /// World position of the camera node, if any
    pub camera_position: Option<Vec3>,
    /// True when nothing is selected
    pub selection_empty: bool,
    /// Handle being dragged
    pub active: Handle,
    /// Handle under the pointer
    pub hover: Handle,
}

/// Nearest handle under a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleHit {
    /// Pickable id of the hit mesh
    pub pickable: PickableId,
    /// Handle driven by the hit mesh
    pub handle: Handle,
    /// World-space hit point
    pub position: Vec3,
    /// Ray parameter of the hit
    pub t: f32,
}

/// Handle visualization: shared shape geometry plus one instance per handle mesh.
#[derive(Debug, Clone)]
pub struct HandleVisualizations {
    registry: Arc<HandleRegistry>,
    shapes: Vec<ShapeGeometry>,
    meshes: Vec<HandleMeshInstance>,
    world_from_root: Mat4,
    scale: f32,
}

/// True when `handle` takes part in a drag of `active`.
///
/// Translate and scale drags also engage same-kind handles whose axes are a
/// subset of the active mask (e.g. the X and Y arrows during an XY drag).
pub fn is_engaged(handle: Handle, active: Handle) -> bool {
    if handle.is_none() || active.is_none() {
        return false;
    }
    if handle == active {
        return true;
    }
    match (active.kind(), handle.kind()) {
        (Some(HandleKind::Translate), Some(HandleKind::Translate))
        | (Some(HandleKind::Scale), Some(HandleKind::Scale)) => {
            active.axis_mask().covers(handle.axis_mask())
        }
        _ => false,
    }
}

impl HandleVisualizations {
    /// Build shared shapes and one instance per registered mesh
    pub fn new(registry: Arc<HandleRegistry>) -> Self {
        let shapes = HandleShape::ALL
            .into_iter()
            .map(ShapeGeometry::build)
            .collect();
        let meshes = registry
            .meshes()
            .iter()
            .enumerate()
            .map(|(i, spec)| HandleMeshInstance {
                pickable: PickableId(i as u32),
                spec: *spec,
                visible: false,
                material: registry.material_for(spec.handle, MaterialMode::Normal),
                world_from_mesh: spec.placement,
            })
            .collect();

        tracing::debug!(
            "Built gizmo visualization: {} shapes, {} meshes",
            HandleShape::ALL.len(),
            registry.meshes().len()
        );

        Self {
            registry,
            shapes,
            meshes,
            world_from_root: Mat4::IDENTITY,
            scale: 1.0,
        }
    }

    /// Run the full per-frame update
    pub fn update(&mut self, input: &VisualizationInput, settings: &Settings) {
        self.update_scale(&input.anchor, input.camera_position, settings);
        self.update_transforms(&input.anchor, settings);
        self.update_visibility(input, settings);
    }

    /// Screen-constant scale from the camera distance to the anchor
    pub fn update_scale(&mut self, anchor: &Trs, camera_position: Option<Vec3>, settings: &Settings) {
        let Some(camera_position) = camera_position else {
            return;
        };
        let distance = camera_position.distance(anchor.translation);
        let scale = settings.gizmo_scale * distance / SCALE_DIVISOR;
        if !scale.is_finite() {
            tracing::error!(
                "Non-finite gizmo scale (gizmo_scale {}, distance {})",
                settings.gizmo_scale,
                distance
            );
            return;
        }
        self.scale = scale;
    }

    /// Place the gizmo root at the anchor and every mesh relative to it
    pub fn update_transforms(&mut self, anchor: &Trs, settings: &Settings) {
        if !anchor.is_finite() {
            tracing::error!("Non-finite anchor transform {:?}", anchor);
            return;
        }
        let root = if settings.local {
            anchor.rigid_matrix()
        } else {
            Mat4::from_translation(anchor.translation)
        };
        self.world_from_root = root * Mat4::from_scale(Vec3::splat(self.scale));

        for mesh in &mut self.meshes {
            mesh.world_from_mesh = self.world_from_root * mesh.spec.placement;
        }
    }

    /// Visibility and material of every mesh
    pub fn update_visibility(&mut self, input: &VisualizationInput, settings: &Settings) {
        for mesh in &mut self.meshes {
            let handle = mesh.spec.handle;
            let shown = handle.kind().is_some_and(|kind| settings.is_shown(kind));
            let engaged = is_engaged(handle, input.active);

            mesh.visible = !input.selection_empty
                && shown
                && (engaged || !settings.hide_inactive || input.active.is_none());

            let mode = if engaged {
                MaterialMode::Active
            } else if handle == input.hover {
                MaterialMode::Hover
            } else {
                MaterialMode::Normal
            };
            mesh.material = self.registry.material_for(handle, mode);
        }
    }

    /// Current screen-constant scale
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// World from gizmo root (anchor placement times scale)
    pub fn world_from_root(&self) -> Mat4 {
        self.world_from_root
    }

    /// All mesh instances
    pub fn meshes(&self) -> &[HandleMeshInstance] {
        &self.meshes
    }

    /// Meshes to draw this frame
    pub fn visible_meshes(&self) -> impl Iterator<Item = &HandleMeshInstance> {
        self.meshes.iter().filter(|m| m.visible)
    }

    /// Shared geometry of a shape
    pub fn shape(&self, shape: HandleShape) -> &ShapeGeometry {
        &self.shapes[shape.index()]
    }

    /// Material of a mesh instance
    pub fn material(&self, mesh: &HandleMeshInstance) -> Option<&Material> {
        mesh.material.and_then(|id| self.registry.material(id))
    }

    /// True when any mesh of `handle` is visible
    pub fn is_handle_visible(&self, handle: Handle) -> bool {
        self.meshes
            .iter()
            .any(|m| m.spec.handle == handle && m.visible)
    }

    /// Nearest visible handle mesh hit by the ray
    pub fn hit_test(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<HandleHit> {
        let mut best: Option<HandleHit> = None;
        for mesh in self.visible_meshes() {
            let mesh_from_world = mesh.world_from_mesh.inverse();
            if !mesh_from_world.is_finite() {
                continue;
            }
            let local_origin = mesh_from_world.transform_point3(ray_origin);
            let local_dir = mesh_from_world.transform_vector3(ray_dir);
            let Some(t) = self
                .shape(mesh.spec.shape)
                .collision
                .intersect(local_origin, local_dir)
            else {
                continue;
            };
            if best.is_none_or(|b| t < b.t) {
                best = Some(HandleHit {
                    pickable: mesh.pickable,
                    handle: mesh.spec.handle,
                    position: ray_origin + ray_dir * t,
                    t,
                });
            }
        }
        best
    }
}
