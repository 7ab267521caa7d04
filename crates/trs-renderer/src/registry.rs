//! Handle registry
//!
//! Maps dense [`PickableId`]s to [`Handle`]s and owns the handle material
//! table (one material per axis color per interaction mode).

use trs_core::{Axis, Handle, HandleClass, PickableId};

use crate::config::GizmoConfig;
use crate::gizmo::{HandleMeshSpec, handle_mesh_table};

/// Interaction mode selecting a handle's material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialMode {
    /// Idle
    Normal,
    /// Under the pointer
    Hover,
    /// Being dragged
    Active,
}

impl MaterialMode {
    const COUNT: usize = 3;

    fn index(self) -> usize {
        match self {
            MaterialMode::Normal => 0,
            MaterialMode::Hover => 1,
            MaterialMode::Active => 2,
        }
    }
}

/// Color slot of a handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialAxis {
    /// X axis color (also YZ planes)
    X,
    /// Y axis color (also XZ planes)
    Y,
    /// Z axis color (also XY planes)
    Z,
    /// Neutral color for uniform handles
    Uniform,
}

impl MaterialAxis {
    const ALL: [MaterialAxis; 4] = [
        MaterialAxis::X,
        MaterialAxis::Y,
        MaterialAxis::Z,
        MaterialAxis::Uniform,
    ];

    fn index(self) -> usize {
        match self {
            MaterialAxis::X => 0,
            MaterialAxis::Y => 1,
            MaterialAxis::Z => 2,
            MaterialAxis::Uniform => 3,
        }
    }

    fn from_axis(axis: Axis) -> Self {
        match axis {
            Axis::X => MaterialAxis::X,
            Axis::Y => MaterialAxis::Y,
            Axis::Z => MaterialAxis::Z,
        }
    }

    /// Color slot of a handle: its axis, or the normal axis for plane handles
    pub fn for_handle(handle: Handle) -> Option<Self> {
        let mask = handle.axis_mask();
        match handle.class()? {
            HandleClass::Axis => mask.single_axis().map(Self::from_axis),
            HandleClass::Plane => mask.missing_axis().map(Self::from_axis),
            HandleClass::Uniform => Some(MaterialAxis::Uniform),
        }
    }

    fn base_color(self, config: &GizmoConfig) -> [f32; 3] {
        match self {
            MaterialAxis::X => config.x_axis_color,
            MaterialAxis::Y => config.y_axis_color,
            MaterialAxis::Z => config.z_axis_color,
            MaterialAxis::Uniform => config.uniform_color,
        }
    }

    fn name(self) -> &'static str {
        match self {
            MaterialAxis::X => "x",
            MaterialAxis::Y => "y",
            MaterialAxis::Z => "z",
            MaterialAxis::Uniform => "xyz",
        }
    }
}

/// Index into the registry's material table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

/// Handle material
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Debug name, e.g. `"x hover"`
    pub name: String,
    /// Linear RGBA color (may exceed 1.0 for hover glow)
    pub color: [f32; 4],
}

/// Dense pickable-id to handle map plus handle materials.
#[derive(Debug, Clone)]
pub struct HandleRegistry {
    handles: Vec<Option<Handle>>,
    meshes: Vec<HandleMeshSpec>,
    materials: Vec<Material>,
}

impl HandleRegistry {
    /// Registry with materials only; no pickables registered
    pub fn new(config: &GizmoConfig) -> Self {
        let mut materials = Vec::with_capacity(MaterialAxis::ALL.len() * MaterialMode::COUNT);
        for axis in MaterialAxis::ALL {
            let [r, g, b] = axis.base_color(config);
            let m = config.hover_multiplier;
            let [ar, ag, ab] = config.active_color;
            materials.push(Material {
                name: format!("{} normal", axis.name()),
                color: [r, g, b, 1.0],
            });
            materials.push(Material {
                name: format!("{} hover", axis.name()),
                color: [r * m, g * m, b * m, 1.0],
            });
            materials.push(Material {
                name: format!("{} active", axis.name()),
                color: [ar, ag, ab, 1.0],
            });
        }

        Self {
            handles: Vec::new(),
            meshes: Vec::new(),
            materials,
        }
    }

    /// Registry with every gizmo mesh registered; mesh `i` of the table gets `PickableId(i)`
    pub fn with_handle_meshes(config: &GizmoConfig) -> Self {
        let mut registry = Self::new(config);
        for spec in handle_mesh_table() {
            registry.allocate(spec.handle);
            registry.meshes.push(spec);
        }
        registry
    }

    /// Assign the next free id to `handle`
    pub fn allocate(&mut self, handle: Handle) -> PickableId {
        let id = PickableId(self.handles.len() as u32);
        self.handles.push(Some(handle));
        id
    }

    /// Bind `handle` to an externally chosen id, growing the arena as needed
    pub fn register(&mut self, id: PickableId, handle: Handle) {
        let index = id.index();
        if index >= self.handles.len() {
            self.handles.resize(index + 1, None);
        }
        self.handles[index] = Some(handle);
    }

    /// Handle for a pickable id; [`Handle::None`] for ids that are not gizmo meshes
    pub fn resolve(&self, id: PickableId) -> Handle {
        self.handles
            .get(id.index())
            .copied()
            .flatten()
            .unwrap_or(Handle::None)
    }

    /// Number of id slots
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// True when no id is registered
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Mesh instances registered by [`HandleRegistry::with_handle_meshes`]
    pub fn meshes(&self) -> &[HandleMeshSpec] {
        &self.meshes
    }

    /// Material of `handle` in `mode`; `None` for [`Handle::None`]
    pub fn material_for(&self, handle: Handle, mode: MaterialMode) -> Option<MaterialId> {
        let axis = MaterialAxis::for_handle(handle)?;
        Some(MaterialId(axis.index() * MaterialMode::COUNT + mode.index()))
    }

    /// Material by id
    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    /// All materials
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_registered_meshes() {
        let registry = HandleRegistry::with_handle_meshes(&GizmoConfig::default());
        assert_eq!(registry.len(), registry.meshes().len());
        for (i, spec) in registry.meshes().iter().enumerate() {
            assert_eq!(registry.resolve(PickableId(i as u32)), spec.handle);
        }
        assert_eq!(registry.resolve(PickableId(10_000)), Handle::None);
    }

    #[test]
    fn test_register_grows_arena() {
        let mut registry = HandleRegistry::new(&GizmoConfig::default());
        registry.register(PickableId(5), Handle::RotateY);
        assert_eq!(registry.len(), 6);
        assert_eq!(registry.resolve(PickableId(5)), Handle::RotateY);
        assert_eq!(registry.resolve(PickableId(2)), Handle::None);

        let next = registry.allocate(Handle::ScaleX);
        assert_eq!(next, PickableId(6));
    }

    #[test]
    fn test_material_table() {
        let registry = HandleRegistry::new(&GizmoConfig::default());
        assert_eq!(registry.materials().len(), 12);

        let normal = registry.material_for(Handle::TranslatePosX, MaterialMode::Normal).unwrap();
        let hover = registry.material_for(Handle::TranslatePosX, MaterialMode::Hover).unwrap();
        let active = registry.material_for(Handle::TranslatePosX, MaterialMode::Active).unwrap();
        assert_eq!(registry.material(normal).unwrap().color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(registry.material(hover).unwrap().color, [2.0, 0.0, 0.0, 1.0]);
        assert_eq!(registry.material(active).unwrap().color, [1.0, 0.7, 0.1, 1.0]);
        assert_eq!(registry.material(hover).unwrap().name, "x hover");
        assert!(registry.material_for(Handle::None, MaterialMode::Normal).is_none());
    }

    #[test]
    fn test_plane_handles_use_normal_axis_color() {
        let registry = HandleRegistry::new(&GizmoConfig::default());
        let xy = registry.material_for(Handle::TranslateXy, MaterialMode::Normal);
        let z = registry.material_for(Handle::RotateZ, MaterialMode::Normal);
        assert_eq!(xy, z);
        let yz = registry.material_for(Handle::ScaleYz, MaterialMode::Normal);
        let x = registry.material_for(Handle::ScaleX, MaterialMode::Normal);
        assert_eq!(yz, x);
        let uniform = registry.material_for(Handle::ScaleXyz, MaterialMode::Normal).unwrap();
        assert_eq!(registry.material(uniform).unwrap().name, "xyz normal");
    }
}
