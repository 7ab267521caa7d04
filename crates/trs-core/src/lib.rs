//! TRS gizmo core
//!
//! Math, transform values, handle identifiers, settings and the scene /
//! undo contracts shared by the renderer and the manipulation tools.

pub mod constants;
pub mod handle;
pub mod math;
pub mod operation;
pub mod scene;
pub mod settings;
pub mod transform;

pub use handle::{Axis, AxisMask, Handle, HandleClass, HandleKind};
pub use operation::{NodeTransformChange, OperationStack, TransformOperation, UndoSink};
pub use scene::{
    HoverEntry, HoverSlot, NodeFlag, NodeId, NodeStore, PickableId, Scene, SceneError, SceneView,
    Selection, ViewCamera,
};
pub use settings::{Settings, SettingsError};
pub use transform::Trs;
