use eframe::egui;

use crate::command::Command;
use crate::state::EditorContext;

/// A square toolbar button bound to one canvas command.
///
/// The button greys out when the command cannot run in the current
/// interaction state or with the current selection.
pub struct ToolButton {
    pub command: Command,
    pub icon: &'static str,
    pub tooltip: &'static str,
}

impl ToolButton {
    pub fn new(command: Command, icon: &'static str, tooltip: &'static str) -> Self {
        Self { command, icon, tooltip }
    }

    /// Draw the button. Returns the command when it was clicked while available.
    pub fn show(&self, ui: &mut egui::Ui, ctx: &EditorContext) -> Option<Command> {
        let enabled = self.command.is_available(ctx);
        let button_size = egui::vec2(32.0, 32.0);
        let sense = if enabled { egui::Sense::click() } else { egui::Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(button_size, sense);

        if ui.is_rect_visible(rect) {
            let bg_color = if !enabled {
                egui::Color32::from_gray(235)
            } else if response.hovered() {
                egui::Color32::from_gray(210)
            } else {
                egui::Color32::from_gray(225)
            };
            let text_color = if enabled {
                egui::Color32::from_rgb(75, 60, 47)
            } else {
                egui::Color32::from_gray(170)
            };

            ui.painter().rect_filled(rect, 4.0, bg_color);
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.icon,
                egui::FontId::proportional(18.0),
                text_color,
            );
        }

        let response = response.on_hover_text(self.tooltip);
        (enabled && response.clicked()).then_some(self.command)
    }
}
