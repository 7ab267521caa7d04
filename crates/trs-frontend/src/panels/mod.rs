//! UI panels

pub mod properties;
pub mod viewport;

pub use properties::PropertiesPanel;
pub use viewport::ViewportPanel;
