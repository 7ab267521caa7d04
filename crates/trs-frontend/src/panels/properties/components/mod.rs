//! Property components

mod snap;
mod transform;

pub use snap::SnapComponent;
pub use transform::TransformComponent;
