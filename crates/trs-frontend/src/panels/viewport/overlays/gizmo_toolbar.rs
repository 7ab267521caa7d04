//! Gizmo toolbar overlay for the viewport

use trs_core::{HandleKind, Settings};

/// Render the gizmo toolbar in the top-left corner of `rect` (floating UI).
///
/// Edits `settings` in place. Returns `(changed, hovered)`; while the toolbar
/// is hovered the viewport should not hit-test the gizmo underneath it.
pub fn render_gizmo_toolbar(
    ui: &mut egui::Ui,
    rect: egui::Rect,
    settings: &mut Settings,
    multiselect: bool,
) -> (bool, bool) {
    let panel_margin = 10.0;
    let toolbar_pos = egui::pos2(rect.left() + panel_margin, rect.top() + panel_margin);
    let mut changed = false;

    let response = egui::Area::new(egui::Id::new("gizmo_toolbar"))
        .fixed_pos(toolbar_pos)
        .order(egui::Order::Foreground)
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style())
                .rounding(4.0)
                .inner_margin(2.0)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 2.0;

                        let modes = [
                            (HandleKind::Translate, "↔", "Move"),
                            (HandleKind::Rotate, "⟳", "Rotate"),
                            (HandleKind::Scale, "⤢", "Scale"),
                        ];
                        for (kind, icon, tooltip) in modes {
                            let shown = settings.is_shown(kind);
                            let button = egui::Button::new(icon)
                                .selected(shown)
                                .min_size(egui::vec2(24.0, 24.0));
                            if ui.add(button).on_hover_text(tooltip).clicked() {
                                set_shown(settings, kind, !shown);
                                changed = true;
                            }
                        }

                        ui.add_space(4.0);
                        ui.separator();
                        ui.add_space(4.0);

                        // Local space only makes sense for a single node
                        let local = settings.local && !multiselect;
                        let (space_icon, space_text) = if local {
                            ("📦", "Local")
                        } else {
                            ("🌐", "World")
                        };
                        let space_btn = egui::Button::new(space_icon).min_size(egui::vec2(24.0, 24.0));
                        let space = ui.add_enabled(!multiselect, space_btn);
                        if space.on_hover_text(space_text).clicked() {
                            settings.local = !settings.local;
                            changed = true;
                        }

                        let inactive_btn = egui::Button::new("◐")
                            .selected(settings.hide_inactive)
                            .min_size(egui::vec2(24.0, 24.0));
                        if ui
                            .add(inactive_btn)
                            .on_hover_text("Hide inactive handles while dragging")
                            .clicked()
                        {
                            settings.hide_inactive = !settings.hide_inactive;
                            changed = true;
                        }
                    });
                });
        });

    let hovered = response.response.contains_pointer();
    (changed, hovered)
}

fn set_shown(settings: &mut Settings, kind: HandleKind, shown: bool) {
    match kind {
        HandleKind::Translate => settings.show_translate = shown,
        HandleKind::Rotate => settings.show_rotate = shown,
        HandleKind::Scale => settings.show_scale = shown,
    }
}
