//! Gizmo appearance configuration
//!
//! Handle colors can be serialized and loaded alongside the tool settings.

use serde::{Deserialize, Serialize};

/// Gizmo handle color configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GizmoConfig {
    /// X axis handle color (RGB)
    pub x_axis_color: [f32; 3],
    /// Y axis handle color (RGB)
    pub y_axis_color: [f32; 3],
    /// Z axis handle color (RGB)
    pub z_axis_color: [f32; 3],
    /// Uniform (all axes) handle color (RGB)
    pub uniform_color: [f32; 3],
    /// Multiplier applied to the base color while hovered
    pub hover_multiplier: f32,
    /// Color of the handle being dragged (RGB)
    pub active_color: [f32; 3],
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self {
            x_axis_color: [1.0, 0.0, 0.0],
            y_axis_color: [0.23, 1.0, 0.0],
            z_axis_color: [0.0, 0.23, 1.0],
            uniform_color: [0.7, 0.7, 0.7],
            hover_multiplier: 2.0,
            active_color: [1.0, 0.7, 0.1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_colors() {
        let config = GizmoConfig::default();
        assert_eq!(config.x_axis_color, [1.0, 0.0, 0.0]);
        assert_eq!(config.hover_multiplier, 2.0);
        assert_eq!(config.active_color, [1.0, 0.7, 0.1]);
    }
}
