//! Gizmo geometry generation
//!
//! Every handle shape has one render mesh and one simplified collision
//! shape. Shapes are built in a canonical orientation (arrows along +X,
//! planes in XY, rings in XZ) and placed per handle instance by a matrix.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::collision::{ray_box_intersection, ray_cylinder_intersection, ray_torus_intersection};
use crate::constants::handle as dims;

/// Handle mesh vertex data
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct HandleVertex {
    /// Position in shape space
    pub position: [f32; 3],
    /// Unit normal
    pub normal: [f32; 3],
}

impl HandleVertex {
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.into(),
            normal: normal.normalize_or_zero().into(),
        }
    }
}

/// Indexed triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertices
    pub vertices: Vec<HandleVertex>,
    /// Triangle list indices
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds of the vertex positions
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.vertices.iter().map(|v| Vec3::from(v.position));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }
}

/// Shared handle shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleShape {
    /// Translate arrow shaft along X, through the origin
    ArrowCylinder,
    /// Translate arrow head at the +X end of the shaft
    ArrowCone,
    /// Thin square in the XY plane, centered at the origin
    PlaneBox,
    /// Small cube for per-axis scale handles
    ScaleCube,
    /// Cube at the origin for uniform scale
    UniformCube,
    /// Rotate ring lying in the XZ plane
    Ring,
}

impl HandleShape {
    /// All shapes, in mesh table order
    pub const ALL: [HandleShape; 6] = [
        HandleShape::ArrowCylinder,
        HandleShape::ArrowCone,
        HandleShape::PlaneBox,
        HandleShape::ScaleCube,
        HandleShape::UniformCube,
        HandleShape::Ring,
    ];

    /// Dense index for per-shape tables
    pub fn index(self) -> usize {
        match self {
            HandleShape::ArrowCylinder => 0,
            HandleShape::ArrowCone => 1,
            HandleShape::PlaneBox => 2,
            HandleShape::ScaleCube => 3,
            HandleShape::UniformCube => 4,
            HandleShape::Ring => 5,
        }
    }

    /// Build the render mesh
    pub fn render_mesh(self) -> MeshData {
        match self {
            HandleShape::ArrowCylinder => generate_cylinder_x(
                -dims::ARROW_CYLINDER_LENGTH,
                dims::ARROW_CYLINDER_LENGTH,
                dims::ARROW_CYLINDER_RADIUS_RENDER,
                dims::SLICES,
            ),
            HandleShape::ArrowCone => generate_cone_x(
                dims::ARROW_CYLINDER_LENGTH,
                dims::ARROW_TIP,
                dims::ARROW_CONE_RADIUS,
                dims::SLICES,
            ),
            HandleShape::PlaneBox => generate_box(Vec3::new(
                dims::BOX_HALF_LENGTH_RENDER,
                dims::BOX_HALF_LENGTH_RENDER,
                dims::BOX_HALF_THICKNESS,
            )),
            HandleShape::ScaleCube => generate_box(Vec3::splat(dims::SCALE_CUBE_HALF_SIZE_RENDER)),
            HandleShape::UniformCube => generate_box(Vec3::splat(dims::UNIFORM_CUBE_HALF_SIZE)),
            HandleShape::Ring => generate_torus_y(
                dims::RING_MAJOR_RADIUS,
                dims::RING_MINOR_RADIUS_RENDER,
                dims::RING_MAJOR_STEPS,
                dims::RING_MINOR_STEPS,
            ),
        }
    }

    /// Simplified pick volume, slightly larger than the render mesh
    pub fn collision_shape(self) -> CollisionShape {
        match self {
            HandleShape::ArrowCylinder => CollisionShape::Cylinder {
                start: Vec3::new(-dims::ARROW_CYLINDER_LENGTH, 0.0, 0.0),
                end: Vec3::new(dims::ARROW_CYLINDER_LENGTH, 0.0, 0.0),
                radius: dims::ARROW_CYLINDER_RADIUS_COLLISION,
            },
            HandleShape::ArrowCone => CollisionShape::Cylinder {
                start: Vec3::new(dims::ARROW_CYLINDER_LENGTH, 0.0, 0.0),
                end: Vec3::new(dims::ARROW_TIP, 0.0, 0.0),
                radius: dims::ARROW_CONE_RADIUS,
            },
            HandleShape::PlaneBox => CollisionShape::Box {
                half_extents: Vec3::new(
                    dims::BOX_HALF_LENGTH_COLLISION,
                    dims::BOX_HALF_LENGTH_COLLISION,
                    dims::BOX_HALF_THICKNESS,
                ),
            },
            HandleShape::ScaleCube => CollisionShape::Box {
                half_extents: Vec3::splat(dims::SCALE_CUBE_HALF_SIZE_COLLISION),
            },
            HandleShape::UniformCube => CollisionShape::Box {
                half_extents: Vec3::splat(dims::UNIFORM_CUBE_HALF_SIZE),
            },
            HandleShape::Ring => CollisionShape::Torus {
                major_radius: dims::RING_MAJOR_RADIUS,
                minor_radius: dims::RING_MINOR_RADIUS_COLLISION,
            },
        }
    }
}

/// Pick volume of a handle shape, in shape space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionShape {
    /// Finite cylinder (cones are tested as their bounding cylinder)
    Cylinder {
        /// Axis start
        start: Vec3,
        /// Axis end
        end: Vec3,
        /// Radius
        radius: f32,
    },
    /// Box centered at the origin
    Box {
        /// Half size along each axis
        half_extents: Vec3,
    },
    /// Torus around the Y axis
    Torus {
        /// Ring radius
        major_radius: f32,
        /// Tube radius
        minor_radius: f32,
    },
}

impl CollisionShape {
    /// Ray parameter of the nearest hit in front of the ray origin
    pub fn intersect(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<f32> {
        match *self {
            CollisionShape::Cylinder { start, end, radius } => {
                ray_cylinder_intersection(ray_origin, ray_dir, start, end, radius)
            }
            CollisionShape::Box { half_extents } => {
                ray_box_intersection(ray_origin, ray_dir, -half_extents, half_extents)
            }
            CollisionShape::Torus {
                major_radius,
                minor_radius,
            } => ray_torus_intersection(
                ray_origin,
                ray_dir,
                major_radius,
                minor_radius,
                dims::RING_MAJOR_STEPS,
            ),
        }
    }
}

/// Render mesh and pick volume of one shape, shared by all its handle instances
#[derive(Debug, Clone)]
pub struct ShapeGeometry {
    /// Shape identifier
    pub shape: HandleShape,
    /// Render mesh
    pub render: MeshData,
    /// Pick volume
    pub collision: CollisionShape,
}

impl ShapeGeometry {
    /// Build render mesh and collision shape
    pub fn build(shape: HandleShape) -> Self {
        Self {
            shape,
            render: shape.render_mesh(),
            collision: shape.collision_shape(),
        }
    }
}

fn ring_point(i: u32, slices: u32) -> (f32, f32) {
    let angle = (i as f32 / slices as f32) * std::f32::consts::TAU;
    (angle.cos(), angle.sin())
}

/// Capped cylinder along the X axis from `x0` to `x1`.
pub fn generate_cylinder_x(x0: f32, x1: f32, radius: f32, slices: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let slices = slices.max(3);

    // Side
    for i in 0..=slices {
        let (c, s) = ring_point(i, slices);
        let normal = Vec3::new(0.0, c, s);
        mesh.vertices
            .push(HandleVertex::new(Vec3::new(x0, c * radius, s * radius), normal));
        mesh.vertices
            .push(HandleVertex::new(Vec3::new(x1, c * radius, s * radius), normal));
    }
    for i in 0..slices {
        let i0 = i * 2;
        let i1 = i * 2 + 1;
        let i2 = (i + 1) * 2;
        let i3 = (i + 1) * 2 + 1;
        mesh.indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
    }

    add_disc_x(&mut mesh, x0, radius, slices, -Vec3::X);
    add_disc_x(&mut mesh, x1, radius, slices, Vec3::X);
    mesh
}

/// Cone along the X axis with its base at `x0` and tip at `x1`.
pub fn generate_cone_x(x0: f32, x1: f32, radius: f32, slices: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let slices = slices.max(3);
    let slope = radius / (x1 - x0).abs().max(f32::EPSILON);

    let tip_index = 0;
    mesh.vertices
        .push(HandleVertex::new(Vec3::new(x1, 0.0, 0.0), Vec3::X));
    for i in 0..=slices {
        let (c, s) = ring_point(i, slices);
        let normal = Vec3::new(slope, c, s);
        mesh.vertices
            .push(HandleVertex::new(Vec3::new(x0, c * radius, s * radius), normal));
    }
    for i in 0..slices {
        mesh.indices.extend_from_slice(&[tip_index, 1 + i, 2 + i]);
    }

    add_disc_x(&mut mesh, x0, radius, slices, -Vec3::X);
    mesh
}

fn add_disc_x(mesh: &mut MeshData, x: f32, radius: f32, slices: u32, normal: Vec3) {
    let center_index = mesh.vertices.len() as u32;
    mesh.vertices
        .push(HandleVertex::new(Vec3::new(x, 0.0, 0.0), normal));
    for i in 0..=slices {
        let (c, s) = ring_point(i, slices);
        mesh.vertices
            .push(HandleVertex::new(Vec3::new(x, c * radius, s * radius), normal));
    }
    for i in 0..slices {
        let i0 = center_index + 1 + i;
        let i1 = center_index + 2 + i;
        if normal.x < 0.0 {
            mesh.indices.extend_from_slice(&[center_index, i1, i0]);
        } else {
            mesh.indices.extend_from_slice(&[center_index, i0, i1]);
        }
    }
}

/// Box centered at the origin with flat-shaded faces.
pub fn generate_box(half_extents: Vec3) -> MeshData {
    let mut mesh = MeshData::default();
    let h = half_extents;

    // (normal, u axis, v axis) per face; u × v = normal keeps CCW winding
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (-Vec3::X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (-Vec3::Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (-Vec3::Z, Vec3::Y, Vec3::X),
    ];

    for (normal, u, v) in faces {
        let base = mesh.vertices.len() as u32;
        let center = normal * h;
        let du = u * h;
        let dv = v * h;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            mesh.vertices
                .push(HandleVertex::new(center + du * su + dv * sv, normal));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// Torus around the Y axis (ring in the XZ plane).
pub fn generate_torus_y(
    major_radius: f32,
    minor_radius: f32,
    major_steps: u32,
    minor_steps: u32,
) -> MeshData {
    let mut mesh = MeshData::default();
    let major_steps = major_steps.max(3);
    let minor_steps = minor_steps.max(3);

    for i in 0..=major_steps {
        let (cu, su) = ring_point(i, major_steps);
        let radial = Vec3::new(cu, 0.0, su);
        for j in 0..=minor_steps {
            let (cv, sv) = ring_point(j, minor_steps);
            let normal = radial * cv + Vec3::Y * sv;
            let position = radial * major_radius + normal * minor_radius;
            mesh.vertices.push(HandleVertex::new(position, normal));
        }
    }

    let row = minor_steps + 1;
    for i in 0..major_steps {
        for j in 0..minor_steps {
            let i0 = i * row + j;
            let i1 = i0 + 1;
            let i2 = i0 + row;
            let i3 = i2 + 1;
            mesh.indices.extend_from_slice(&[i0, i1, i2, i1, i3, i2]);
        }
    }
    mesh
}
