//! Transform component - numeric editing of the gizmo anchor

use egui::Ui;
use glam::{EulerRot, Quat, Vec3};
use trs_core::Trs;

use crate::panels::properties::helpers::{rotation_row, vector3_row};
use crate::panels::properties::{PropertyComponent, PropertyContext};

/// Anchor position, rotation and scale of the selection
#[derive(Default)]
pub struct TransformComponent {
    /// Euler angles shown while editing, so they do not jump between representations
    rotation_deg: Option<[f32; 3]>,
}

impl TransformComponent {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PropertyComponent for TransformComponent {
    fn name(&self) -> &str {
        "Transform"
    }

    fn ui(&mut self, ui: &mut Ui, ctx: &mut PropertyContext) -> bool {
        let editor = &mut *ctx.editor;
        let Some(anchor) = editor.tool.anchor() else {
            ui.weak("Nothing selected");
            self.rotation_deg = None;
            return false;
        };
        let dragging = editor.tool.is_active();

        let mut pos = anchor.translation.to_array();
        let mut rot_deg = self.rotation_deg.unwrap_or_else(|| {
            let (x, y, z) = anchor.rotation.to_euler(EulerRot::XYZ);
            [x.to_degrees(), y.to_degrees(), z.to_degrees()]
        });
        let mut scale = anchor.scale.to_array();

        let (pos_changed, rot_changed, scale_changed) = ui
            .add_enabled_ui(!dragging, |ui| {
                (
                    vector3_row(ui, "Position", &mut pos, 0.01),
                    rotation_row(ui, "Rotation", &mut rot_deg, 1.0),
                    vector3_row(ui, "Scale", &mut scale, 0.01),
                )
            })
            .inner;

        let changed = pos_changed || rot_changed || scale_changed;
        if changed {
            let rotation = if rot_changed {
                self.rotation_deg = Some(rot_deg);
                Quat::from_euler(
                    EulerRot::XYZ,
                    rot_deg[0].to_radians(),
                    rot_deg[1].to_radians(),
                    rot_deg[2].to_radians(),
                )
            } else {
                anchor.rotation
            };
            let updated = Trs::new(Vec3::from_array(pos), rotation, Vec3::from_array(scale));
            editor.edit_anchor(updated);
        } else if editor.tool.is_editing_anchor() && !ui.input(|i| i.pointer.any_down()) {
            editor.end_anchor_edit();
            self.rotation_deg = None;
        }
        changed
    }
}
