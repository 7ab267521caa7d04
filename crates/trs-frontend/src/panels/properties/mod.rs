//! Properties panel with collapsible component sections

mod component;
mod components;
mod helpers;

pub use component::{PropertyComponent, PropertyContext};

use components::{SnapComponent, TransformComponent};

use crate::state::EditorContext;

/// Properties panel for the current selection and tool settings
pub struct PropertiesPanel {
    transform: TransformComponent,
    snap: SnapComponent,
}

impl PropertiesPanel {
    pub fn new() -> Self {
        Self {
            transform: TransformComponent::new(),
            snap: SnapComponent::new(),
        }
    }

    /// Render every component. Returns true if anything changed.
    pub fn ui(&mut self, ui: &mut egui::Ui, editor: &mut EditorContext) -> bool {
        let mut ctx = PropertyContext { editor };
        let mut changed = false;
        let components: [&mut dyn PropertyComponent; 2] = [&mut self.transform, &mut self.snap];
        for component in components {
            egui::CollapsingHeader::new(component.name().to_string())
                .default_open(component.default_open())
                .show(ui, |ui| {
                    changed |= component.ui(ui, &mut ctx);
                });
        }
        changed
    }
}

impl Default for PropertiesPanel {
    fn default() -> Self {
        Self::new()
    }
}
