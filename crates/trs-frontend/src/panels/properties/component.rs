//! PropertyComponent trait definition

use egui::Ui;

use crate::state::EditorContext;

/// Context passed to property components for rendering
pub struct PropertyContext<'a> {
    pub editor: &'a mut EditorContext,
}

/// Trait for property panel sections
pub trait PropertyComponent {
    /// Component display name shown in the header
    fn name(&self) -> &str;

    /// Render the component UI
    /// Returns true if any value was changed
    fn ui(&mut self, ui: &mut Ui, ctx: &mut PropertyContext) -> bool;

    /// Whether the component is open by default (default: true)
    fn default_open(&self) -> bool {
        true
    }
}
