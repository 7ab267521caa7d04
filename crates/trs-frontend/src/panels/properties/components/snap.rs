//! Snap and gizmo settings component

use egui::Ui;
use trs_core::Settings;
use trs_core::constants::{ROTATE_SNAP_PRESETS, TRANSLATE_SNAP_PRESETS};

use crate::panels::properties::{PropertyComponent, PropertyContext};

/// Translate / rotate snapping and gizmo size
#[derive(Default)]
pub struct SnapComponent;

impl SnapComponent {
    pub fn new() -> Self {
        Self
    }
}

fn preset_combo(ui: &mut Ui, id: &str, value: &mut f32, presets: &[f32], suffix: &str) -> bool {
    let mut changed = false;
    egui::ComboBox::from_id_salt(id)
        .selected_text(format!("{}{}", value, suffix))
        .show_ui(ui, |ui| {
            for &preset in presets {
                changed |= ui
                    .selectable_value(value, preset, format!("{}{}", preset, suffix))
                    .changed();
            }
        });
    changed
}

impl PropertyComponent for SnapComponent {
    fn name(&self) -> &str {
        "Snapping"
    }

    fn ui(&mut self, ui: &mut Ui, ctx: &mut PropertyContext) -> bool {
        let mut settings: Settings = ctx.editor.tool.settings().clone();
        let mut changed = false;

        ui.horizontal(|ui| {
            changed |= ui.checkbox(&mut settings.translate_snap_enable, "Move").changed();
            ui.add_enabled_ui(settings.translate_snap_enable, |ui| {
                changed |= preset_combo(ui, "translate_snap", &mut settings.translate_snap, &TRANSLATE_SNAP_PRESETS, "");
            });
        });
        ui.horizontal(|ui| {
            changed |= ui.checkbox(&mut settings.rotate_snap_enable, "Rotate").changed();
            ui.add_enabled_ui(settings.rotate_snap_enable, |ui| {
                changed |= preset_combo(ui, "rotate_snap", &mut settings.rotate_snap, &ROTATE_SNAP_PRESETS, "°");
            });
        });
        ui.horizontal(|ui| {
            ui.label("Gizmo size");
            changed |= ui
                .add(egui::DragValue::new(&mut settings.gizmo_scale).speed(0.1).range(0.5..=20.0))
                .changed();
        });

        if changed {
            ctx.editor.set_settings(settings);
        }
        changed
    }
}
