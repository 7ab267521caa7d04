//! Global constants for trs-core

/// Squared-length / determinant threshold below which geometry is treated as degenerate
pub const GEOMETRY_EPSILON: f32 = 1e-6;

/// Below this |cos| between the pointer ray and the rotation plane normal,
/// rotate drags stop intersecting the plane and project along the ray instead
pub const ROTATE_PARALLEL_COSINE: f32 = 0.02;

/// Default screen-constant gizmo size factor
pub const DEFAULT_GIZMO_SCALE: f32 = 4.0;

/// Default translate snap step (world units)
pub const DEFAULT_TRANSLATE_SNAP: f32 = 0.1;

/// Default rotate snap step (degrees)
pub const DEFAULT_ROTATE_SNAP_DEGREES: f32 = 15.0;

/// Translate snap steps offered by the snap settings UI
pub const TRANSLATE_SNAP_PRESETS: [f32; 11] = [
    0.001, 0.01, 0.1, 0.2, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0, 100.0,
];

/// Rotate snap steps (degrees) offered by the snap settings UI
pub const ROTATE_SNAP_PRESETS: [f32; 8] = [5.0, 10.0, 15.0, 20.0, 30.0, 45.0, 60.0, 90.0];
