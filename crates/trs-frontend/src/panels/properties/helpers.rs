//! Property row helpers

use egui::{DragValue, Ui};

/// Render a labeled XYZ row of drag values
/// Returns true if any value was changed
pub fn vector3_row(ui: &mut Ui, label: &str, values: &mut [f32; 3], speed: f32) -> bool {
    ui.label(label);
    ui.horizontal(|ui| {
        let mut changed = false;
        for (axis, value) in ["X", "Y", "Z"].into_iter().zip(values.iter_mut()) {
            ui.label(axis);
            changed |= ui.add(DragValue::new(value).speed(speed)).changed();
        }
        changed
    })
    .inner
}

/// Render rotation row with degree suffix
/// Returns true if any value was changed
pub fn rotation_row(ui: &mut Ui, label: &str, rot_deg: &mut [f32; 3], speed: f32) -> bool {
    ui.label(label);
    ui.horizontal(|ui| {
        let mut changed = false;
        for (axis, value) in ["X", "Y", "Z"].into_iter().zip(rot_deg.iter_mut()) {
            ui.label(axis);
            changed |= ui
                .add(DragValue::new(value).speed(speed).suffix("°"))
                .changed();
        }
        changed
    })
    .inner
}
