//! Global constants for trs-renderer
//!
//! All lengths are in gizmo units, before the screen-constant scale is applied.

/// Handle dimensions
pub mod handle {
    /// Half length of the translate arrow shaft (the shaft spans both sides of the origin)
    pub const ARROW_CYLINDER_LENGTH: f32 = 2.5;
    /// Rendered shaft radius
    pub const ARROW_CYLINDER_RADIUS_RENDER: f32 = 0.04;
    /// Pickable shaft radius
    pub const ARROW_CYLINDER_RADIUS_COLLISION: f32 = 0.22;
    /// Cone length
    pub const ARROW_CONE_LENGTH: f32 = 0.8;
    /// Cone base radius
    pub const ARROW_CONE_RADIUS: f32 = 0.25;
    /// Distance from the origin to the cone tip
    pub const ARROW_TIP: f32 = ARROW_CYLINDER_LENGTH + ARROW_CONE_LENGTH;

    /// Half thickness of plane handle boxes
    pub const BOX_HALF_THICKNESS: f32 = 0.1;
    /// Distance from the origin to the plane handle center along each in-plane axis
    pub const BOX_OFFSET: f32 = 1.25;
    /// Rendered half extent of plane handle boxes
    pub const BOX_HALF_LENGTH_RENDER: f32 = 0.5;
    /// Pickable half extent of plane handle boxes
    pub const BOX_HALF_LENGTH_COLLISION: f32 = 0.6;

    /// Scale plane handles sit further out than translate plane handles
    pub const SCALE_BOX_OFFSET: f32 = 2.25;
    /// Distance from the origin to the per-axis scale cubes
    pub const SCALE_CUBE_DISTANCE: f32 = 4.6;
    /// Rendered half size of scale cubes
    pub const SCALE_CUBE_HALF_SIZE_RENDER: f32 = 0.2;
    /// Pickable half size of scale cubes
    pub const SCALE_CUBE_HALF_SIZE_COLLISION: f32 = 0.3;
    /// Half size of the uniform scale cube at the origin
    pub const UNIFORM_CUBE_HALF_SIZE: f32 = 0.3;

    /// Rotate ring radius
    pub const RING_MAJOR_RADIUS: f32 = 4.0;
    /// Rendered ring tube radius
    pub const RING_MINOR_RADIUS_RENDER: f32 = 0.1;
    /// Pickable ring tube radius
    pub const RING_MINOR_RADIUS_COLLISION: f32 = 0.3;
    /// Segments around the ring
    pub const RING_MAJOR_STEPS: u32 = 80;
    /// Segments around the ring tube
    pub const RING_MINOR_STEPS: u32 = 12;

    /// Segments around cylinders and cones
    pub const SLICES: u32 = 24;
}

/// Rotate protractor overlay
pub mod protractor {
    /// Number of ring segments
    pub const RING_SEGMENTS: u32 = 80;
    /// Tick count when not snapping (one every 10 degrees)
    pub const DEFAULT_TICKS: u32 = 36;
    /// Inner radius of major ticks
    pub const MAJOR_TICK_INNER: f32 = 5.0;
    /// Inner radius of minor ticks
    pub const MINOR_TICK_INNER: f32 = 5.5;
    /// Outer radius of ticks, radius lines and ring
    pub const OUTER_RADIUS: f32 = 6.0;
    /// Half length of the rotation axis line
    pub const AXIS_HALF_LENGTH: f32 = 10.0;
    /// Upper bound for snap-driven tick counts
    pub const MAX_TICKS: u32 = 720;
    /// Tick interval between major ticks
    pub const MAJOR_TICK_EVERY: u32 = 10;

    /// Overlay colors (RGBA)
    pub mod colors {
        /// Ring and ticks
        pub const TICKS: [f32; 4] = [1.0, 0.5, 0.0, 0.8];
        /// Unsnapped pointer direction
        pub const POINTER: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
        /// Snapped direction
        pub const SNAPPED: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
        /// Axis line for X rotations / YZ constraints
        pub const AXIS_X: [f32; 4] = [2.0, 0.0, 0.0, 1.0];
        /// Axis line for Y rotations / XZ constraints
        pub const AXIS_Y: [f32; 4] = [0.0, 2.0, 0.0, 1.0];
        /// Axis line for Z rotations / XY constraints
        pub const AXIS_Z: [f32; 4] = [0.0, 0.0, 2.0, 1.0];
        /// Axis line for uniform constraints
        pub const AXIS_UNIFORM: [f32; 4] = [0.7, 0.7, 0.7, 1.0];
    }
}

/// Screen-constant scale divisor: `gizmo_scale * camera_distance / SCALE_DIVISOR`
pub const SCALE_DIVISOR: f32 = 100.0;
