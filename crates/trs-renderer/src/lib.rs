//! TRS gizmo renderer
//!
//! Geometry, materials, picking and per-frame placement of the transform
//! gizmo handles. GPU submission is left to the host application; this crate
//! produces meshes, matrices, materials and overlay lines.
//!
//! # Module Structure
//!
//! ```text
//! trs-renderer/
//! ├── gizmo/           # Handle mesh table, shape geometry, collision
//! ├── registry.rs      # PickableId -> Handle map and materials
//! ├── visualization.rs # Per-frame placement, visibility, hit testing
//! ├── slot.rs          # Background construction slot
//! ├── overlay.rs       # Rotate protractor lines
//! ├── camera.rs        # Orbit camera
//! └── config.rs        # Handle colors
//! ```

pub mod camera;
pub mod config;
pub mod constants;
pub mod gizmo;
pub mod overlay;
pub mod registry;
pub mod slot;
pub mod visualization;

pub use camera::Camera;
pub use config::GizmoConfig;
pub use gizmo::{HandleMeshSpec, HandleShape, handle_mesh_table};
pub use overlay::{OverlayLine, Protractor, axis_color};
pub use registry::{HandleRegistry, Material, MaterialId, MaterialMode};
pub use slot::VisualizationSlot;
pub use visualization::{HandleHit, HandleVisualizations, VisualizationInput, is_engaged};
