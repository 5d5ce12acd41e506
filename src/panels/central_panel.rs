use eframe::egui;

use crate::SiluetApp;
use crate::asset::AssetHandle;
use crate::command::Command;
use crate::components::ToolButton;
use crate::geometry::hit_testing;
use crate::input::{InputEvent, InputLocation, canvas_hit_area};
use crate::widgets::ResizeHandle;

pub fn central_panel(app: &mut SiluetApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        toolbar(app, ui);
        ui.separator();

        let canvas_size = egui::Vec2::from(app.session.config().canvas_size);
        ui.vertical_centered(|ui| {
            let hit_size = canvas_hit_area(egui::Rect::from_min_size(egui::Pos2::ZERO, canvas_size)).size();
            let (response, painter) = ui.allocate_painter(hit_size, egui::Sense::click_and_drag());
            let canvas_rect = egui::Rect::from_center_size(response.rect.center(), canvas_size);

            for event in collect_input(ui, &response, canvas_rect) {
                if let Err(err) = app.session.handle_input(&event) {
                    log::debug!("Input {:?} ignored: {}", event, err);
                }
            }

            if let Some(item) = app.session.editor.composition.selected_item() {
                ResizeHandle::new(hit_testing::handle_center(item) + canvas_rect.min.to_vec2())
                    .update_cursor(&response);
            }

            let silhouette = AssetHandle::new(app.session.config().silhouette_image.clone());
            app.renderer.render(
                ui.ctx(),
                &painter,
                canvas_rect,
                &silhouette,
                &app.session.editor.composition,
            );
        });
    });
}

/// Canvas toolbar. Buttons grey out when their command is unavailable.
fn toolbar(app: &mut SiluetApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        // An out-of-range index keeps the button disabled without a selection
        let front_index = app.session.editor.composition.selected().unwrap_or(usize::MAX);
        let buttons = [
            ToolButton::new(Command::grow(), "+", "Agrandir"),
            ToolButton::new(Command::shrink(), "-", "Réduire"),
            ToolButton::new(Command::BringToFront(front_index), "⬆", "Premier plan"),
            ToolButton::new(Command::DeleteSelected, "🗑", "Supprimer"),
            ToolButton::new(Command::Reset, "🔄", "Réinitialiser"),
        ];

        let mut clicked = None;
        for button in &buttons {
            if let Some(command) = button.show(ui, &app.session.editor) {
                clicked = Some(command);
            }
        }
        if let Some(command) = clicked {
            // Rejections are logged by the session
            let _ = app.session.execute(command);
        }

        ui.separator();
        if ui.button("💾 Enregistrer").clicked() {
            let lookbook = app.session.lookbooks.first().to_owned();
            app.ui.open_save(&lookbook);
        }
        if ui.button("📁 Projets").clicked() {
            app.ui.projects_open = true;
        }
    });
}

/// Reduce this frame's pointer state to canvas input events, in the order they happened
fn collect_input(ui: &egui::Ui, response: &egui::Response, canvas_rect: egui::Rect) -> Vec<InputEvent> {
    let mut events = Vec::new();

    if let Some(payload) = response.dnd_release_payload::<AssetHandle>() {
        if let Some(pos) = ui.input(|i| i.pointer.interact_pos()) {
            events.push(InputEvent::AssetDropped {
                location: InputLocation::new(pos, canvas_rect),
                payload: Some((*payload).clone()),
            });
        }
    } else if response.contains_pointer() && egui::DragAndDrop::has_any_payload(ui.ctx()) {
        let released_at = ui.input(|i| if i.pointer.any_released() { i.pointer.interact_pos() } else { None });
        if let Some(pos) = released_at {
            events.push(InputEvent::AssetDropped {
                location: InputLocation::new(pos, canvas_rect),
                payload: None,
            });
        }
    }

    let (pressed, moving, released, press_origin, latest) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.is_moving(),
            i.pointer.primary_released(),
            i.pointer.press_origin(),
            i.pointer.latest_pos(),
        )
    });

    // Windows drawn over the canvas keep their own clicks
    if pressed && response.contains_pointer() {
        if let Some(pos) = press_origin {
            events.push(InputEvent::PointerDown {
                location: InputLocation::new(pos, canvas_rect),
            });
        }
    }
    if moving {
        if let Some(pos) = latest {
            events.push(InputEvent::PointerMove {
                location: InputLocation::new(pos, canvas_rect),
            });
        }
    }
    if released {
        events.push(InputEvent::PointerUp);
    }
    events
}
