//! Gizmo handle meshes
//!
//! The handle mesh table lists every pickable mesh instance of the gizmo:
//! which handle it drives, which shared shape it draws and where that shape
//! is placed relative to the gizmo root.

pub mod collision;
pub mod geometry;

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Vec3};
use trs_core::Handle;

use crate::constants::handle as dims;
pub use geometry::{CollisionShape, HandleShape, HandleVertex, MeshData, ShapeGeometry};

/// One pickable mesh instance of the gizmo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleMeshSpec {
    /// Debug name
    pub name: &'static str,
    /// Handle driven by this mesh
    pub handle: Handle,
    /// Shared shape drawn by this mesh
    pub shape: HandleShape,
    /// Gizmo root from shape space
    pub placement: Mat4,
}

impl HandleMeshSpec {
    fn new(name: &'static str, handle: Handle, shape: HandleShape, placement: Mat4) -> Self {
        Self {
            name,
            handle,
            shape,
            placement,
        }
    }
}

fn rotate_x_pos_90() -> Mat4 {
    Mat4::from_rotation_x(FRAC_PI_2)
}
fn rotate_y_pos_90() -> Mat4 {
    Mat4::from_rotation_y(FRAC_PI_2)
}
fn rotate_y_neg_90() -> Mat4 {
    Mat4::from_rotation_y(-FRAC_PI_2)
}
fn rotate_y_180() -> Mat4 {
    Mat4::from_rotation_y(PI)
}
fn rotate_z_pos_90() -> Mat4 {
    Mat4::from_rotation_z(FRAC_PI_2)
}
fn rotate_z_neg_90() -> Mat4 {
    Mat4::from_rotation_z(-FRAC_PI_2)
}

/// Placement of a plane box in the XY plane, offset diagonally from the origin
fn plane_offset(offset: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(offset, offset, 0.0))
}

/// Every gizmo mesh instance.
///
/// Arrows are modelled along +X: Y arrows rotate +90° about Z, Z arrows
/// rotate -90° about Y and negative cones use the opposite rotation. Plane
/// boxes are modelled in XY: XZ rotates +90° about X, YZ rotates -90° about
/// Y. Rings are modelled in XZ (normal Y): the X ring rotates +90° about Z,
/// the Z ring +90° about X.
pub fn handle_mesh_table() -> Vec<HandleMeshSpec> {
    use HandleShape::*;

    let scale_cube = |direction: Vec3| Mat4::from_translation(direction * dims::SCALE_CUBE_DISTANCE);

    vec![
        // Translate
        HandleMeshSpec::new("translate x cylinder", Handle::TranslatePosX, ArrowCylinder, Mat4::IDENTITY),
        HandleMeshSpec::new("translate y cylinder", Handle::TranslatePosY, ArrowCylinder, rotate_z_pos_90()),
        HandleMeshSpec::new("translate z cylinder", Handle::TranslatePosZ, ArrowCylinder, rotate_y_neg_90()),
        HandleMeshSpec::new("translate +x cone", Handle::TranslatePosX, ArrowCone, Mat4::IDENTITY),
        HandleMeshSpec::new("translate +y cone", Handle::TranslatePosY, ArrowCone, rotate_z_pos_90()),
        HandleMeshSpec::new("translate +z cone", Handle::TranslatePosZ, ArrowCone, rotate_y_neg_90()),
        HandleMeshSpec::new("translate -x cone", Handle::TranslateNegX, ArrowCone, rotate_y_180()),
        HandleMeshSpec::new("translate -y cone", Handle::TranslateNegY, ArrowCone, rotate_z_neg_90()),
        HandleMeshSpec::new("translate -z cone", Handle::TranslateNegZ, ArrowCone, rotate_y_pos_90()),
        HandleMeshSpec::new("translate xy box", Handle::TranslateXy, PlaneBox, plane_offset(dims::BOX_OFFSET)),
        HandleMeshSpec::new(
            "translate xz box",
            Handle::TranslateXz,
            PlaneBox,
            rotate_x_pos_90() * plane_offset(dims::BOX_OFFSET),
        ),
        HandleMeshSpec::new(
            "translate yz box",
            Handle::TranslateYz,
            PlaneBox,
            rotate_y_neg_90() * plane_offset(dims::BOX_OFFSET),
        ),
        // Rotate
        HandleMeshSpec::new("rotate x ring", Handle::RotateX, Ring, rotate_z_pos_90()),
        HandleMeshSpec::new("rotate y ring", Handle::RotateY, Ring, Mat4::IDENTITY),
        HandleMeshSpec::new("rotate z ring", Handle::RotateZ, Ring, rotate_x_pos_90()),
        // Scale
        HandleMeshSpec::new("scale +x cube", Handle::ScaleX, ScaleCube, scale_cube(Vec3::X)),
        HandleMeshSpec::new("scale -x cube", Handle::ScaleX, ScaleCube, scale_cube(-Vec3::X)),
        HandleMeshSpec::new("scale +y cube", Handle::ScaleY, ScaleCube, scale_cube(Vec3::Y)),
        HandleMeshSpec::new("scale -y cube", Handle::ScaleY, ScaleCube, scale_cube(-Vec3::Y)),
        HandleMeshSpec::new("scale +z cube", Handle::ScaleZ, ScaleCube, scale_cube(Vec3::Z)),
        HandleMeshSpec::new("scale -z cube", Handle::ScaleZ, ScaleCube, scale_cube(-Vec3::Z)),
        HandleMeshSpec::new("scale xy box", Handle::ScaleXy, PlaneBox, plane_offset(dims::SCALE_BOX_OFFSET)),
        HandleMeshSpec::new(
            "scale xz box",
            Handle::ScaleXz,
            PlaneBox,
            rotate_x_pos_90() * plane_offset(dims::SCALE_BOX_OFFSET),
        ),
        HandleMeshSpec::new(
            "scale yz box",
            Handle::ScaleYz,
            PlaneBox,
            rotate_y_neg_90() * plane_offset(dims::SCALE_BOX_OFFSET),
        ),
        HandleMeshSpec::new("scale xyz cube", Handle::ScaleXyz, UniformCube, Mat4::IDENTITY),
    ]
}
