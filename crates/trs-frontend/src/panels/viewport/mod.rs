//! 3D viewport panel: gizmo input, handle drawing and overlays

pub mod overlays;

use glam::{Vec2, Vec3};
use trs_renderer::OverlayLine;

use crate::state::EditorContext;

/// Convert an over-bright linear color to a displayable egui color
fn color32(color: [f32; 4]) -> egui::Color32 {
    let [r, g, b, a] = color.map(|c| c.clamp(0.0, 1.0));
    egui::Rgba::from_rgba_unmultiplied(r, g, b, a).into()
}

/// Viewport panel drawing the gizmo with egui's painter
#[derive(Default)]
pub struct ViewportPanel {
    toolbar_hovered: bool,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle input and draw. Returns true when a repaint is needed.
    pub fn ui(&mut self, ui: &mut egui::Ui, editor: &mut EditorContext) -> bool {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        let mut repaint = false;

        if let Some(view) = editor.view.as_mut() {
            view.set_size(Vec2::new(rect.width(), rect.height()));
        }

        // The toolbar floats over the viewport; the gizmo under it is not reachable
        let pointer = response
            .hover_pos()
            .filter(|_| !self.toolbar_hovered || editor.tool.is_active())
            .map(|pos| Vec2::new(pos.x - rect.left(), pos.y - rect.top()));
        repaint |= editor.pointer_moved(pointer);

        if response.drag_started_by(egui::PointerButton::Primary) {
            repaint |= editor.drag_pressed();
        }
        if response.drag_stopped_by(egui::PointerButton::Primary) {
            repaint |= editor.drag_released();
        }
        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta();
            if let Some(view) = editor.view.as_mut() {
                view.update_camera(|camera| camera.orbit(-delta.x * 0.01, delta.y * 0.01));
            }
            repaint = true;
        }
        editor.frame();

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::from_gray(30));
        self.paint_handles(&painter, rect, editor);
        self.paint_overlay_lines(&painter, rect, editor, &editor.tool.overlay_lines());

        let mut settings = editor.tool.settings().clone();
        let (changed, hovered) =
            overlays::render_gizmo_toolbar(ui, rect, &mut settings, editor.selection.len() > 1);
        self.toolbar_hovered = hovered;
        if changed {
            editor.set_settings(settings);
            repaint = true;
        }
        repaint
    }

    fn project(editor: &EditorContext, rect: egui::Rect, point: Vec3) -> Option<egui::Pos2> {
        let screen = editor.view.as_ref()?.project(point)?;
        Some(egui::pos2(rect.left() + screen.x, rect.top() + screen.y))
    }

    /// Draw visible handle meshes as flat-colored triangles (no depth test)
    fn paint_handles(&self, painter: &egui::Painter, rect: egui::Rect, editor: &EditorContext) {
        let visualizations = editor.tool.visualizations();
        visualizations.with(|v| {
            for instance in v.visible_meshes() {
                let Some(material) = v.material(instance) else {
                    continue;
                };
                let color = color32(material.color);
                let render = &v.shape(instance.spec.shape).render;
                let mut mesh = egui::Mesh::default();
                let mut projected = Vec::with_capacity(render.vertices.len());
                for vertex in &render.vertices {
                    let world = instance
                        .world_from_mesh
                        .transform_point3(Vec3::from_array(vertex.position));
                    projected.push(Self::project(editor, rect, world));
                }
                for triangle in render.indices.chunks_exact(3) {
                    let corners = [
                        projected[triangle[0] as usize],
                        projected[triangle[1] as usize],
                        projected[triangle[2] as usize],
                    ];
                    let [Some(a), Some(b), Some(c)] = corners else {
                        continue;
                    };
                    let base = mesh.vertices.len() as u32;
                    for pos in [a, b, c] {
                        mesh.colored_vertex(pos, color);
                    }
                    mesh.add_triangle(base, base + 1, base + 2);
                }
                painter.add(egui::Shape::mesh(mesh));
            }
        });
    }

    fn paint_overlay_lines(
        &self,
        painter: &egui::Painter,
        rect: egui::Rect,
        editor: &EditorContext,
        lines: &[OverlayLine],
    ) {
        for line in lines {
            let (Some(start), Some(end)) = (
                Self::project(editor, rect, line.start),
                Self::project(editor, rect, line.end),
            ) else {
                continue;
            };
            painter.line_segment([start, end], egui::Stroke::new(1.5, color32(line.color)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trs_core::{Settings, Trs};
    use trs_renderer::GizmoConfig;

    #[test]
    fn test_color_is_clamped() {
        assert_eq!(color32([2.0, 0.0, 0.0, 1.0]), egui::Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_viewport_renders_headless() {
        let mut editor = EditorContext::new(Settings::default(), &GizmoConfig::default(), Vec2::new(640.0, 480.0));
        let node = editor.scene.add_node("n", None, Trs::IDENTITY);
        editor.select([node]);

        let mut panel = ViewportPanel::new();
        let ctx = egui::Context::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                panel.ui(ui, &mut editor);
            });
        });
        assert!(!output.shapes.is_empty());
        assert!(!editor.tool.is_active());
    }
}
