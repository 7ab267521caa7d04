//! Persistent gizmo settings

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GIZMO_SCALE, DEFAULT_ROTATE_SNAP_DEGREES, DEFAULT_TRANSLATE_SNAP};
use crate::handle::HandleKind;

/// Gizmo behavior and visibility settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Constrain along the anchor's own axes instead of world axes
    pub local: bool,
    /// Show translate handles
    pub show_translate: bool,
    /// Show rotate rings
    pub show_rotate: bool,
    /// Show scale handles
    pub show_scale: bool,
    /// During a drag, hide every handle except the active one
    pub hide_inactive: bool,
    /// Screen-constant size factor (`gizmo_scale * distance / 100`)
    pub gizmo_scale: f32,
    pub translate_snap_enable: bool,
    /// Translate snap step in world units
    pub translate_snap: f32,
    pub rotate_snap_enable: bool,
    /// Rotate snap step in degrees
    pub rotate_snap: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            local: false,
            show_translate: true,
            show_rotate: false,
            show_scale: false,
            hide_inactive: true,
            gizmo_scale: DEFAULT_GIZMO_SCALE,
            translate_snap_enable: false,
            translate_snap: DEFAULT_TRANSLATE_SNAP,
            rotate_snap_enable: false,
            rotate_snap: DEFAULT_ROTATE_SNAP_DEGREES,
        }
    }
}

impl Settings {
    /// Active translate snap step, if snapping is enabled
    pub fn translate_snap_step(&self) -> Option<f32> {
        (self.translate_snap_enable && self.translate_snap > 0.0).then_some(self.translate_snap)
    }

    /// Active rotate snap step in radians, if snapping is enabled
    pub fn rotate_snap_step(&self) -> Option<f32> {
        (self.rotate_snap_enable && self.rotate_snap > 0.0).then(|| self.rotate_snap.to_radians())
    }

    pub fn is_shown(&self, kind: HandleKind) -> bool {
        match kind {
            HandleKind::Translate => self.show_translate,
            HandleKind::Rotate => self.show_rotate,
            HandleKind::Scale => self.show_scale,
        }
    }

    pub fn to_ron(&self) -> Result<String, SettingsError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SettingsError::Serialize(e.to_string()))
    }

    pub fn from_ron(content: &str) -> Result<Self, SettingsError> {
        ron::from_str(content).map_err(|e| SettingsError::Deserialize(e.to_string()))
    }

    /// Save settings to a RON file
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let content = self.to_ron()?;
        std::fs::write(path, content).map_err(|e| SettingsError::Io(e.to_string()))?;
        tracing::debug!("Saved gizmo settings to {}", path.display());
        Ok(())
    }

    /// Load settings from a RON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::Io(e.to_string()))?;
        Self::from_ron(&content)
    }
}

/// Settings persistence errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.local);
        assert!(settings.show_translate);
        assert_eq!(settings.gizmo_scale, 4.0);
        assert_eq!(settings.translate_snap_step(), None);
        assert_eq!(settings.rotate_snap_step(), None);
    }

    #[test]
    fn test_snap_steps() {
        let settings = Settings {
            translate_snap_enable: true,
            translate_snap: 0.25,
            rotate_snap_enable: true,
            rotate_snap: 90.0,
            ..Default::default()
        };
        assert_eq!(settings.translate_snap_step(), Some(0.25));
        let rotate = settings.rotate_snap_step().unwrap();
        approx::assert_relative_eq!(rotate, std::f32::consts::FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gizmo.ron");

        let settings = Settings {
            local: true,
            show_scale: true,
            translate_snap: 0.5,
            ..Default::default()
        };
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let loaded = Settings::from_ron("(local: true)").unwrap();
        assert!(loaded.local);
        assert_eq!(loaded.rotate_snap, 15.0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Settings::load(&dir.path().join("nope.ron"));
        assert!(matches!(result, Err(SettingsError::Io(_))));
    }
}
