use eframe::egui;

use crate::SiluetApp;
use crate::asset::AssetHandle;
use crate::dressing::DressingId;
use crate::renderer::Renderer;

const THUMBNAIL_HEIGHT: f32 = 72.0;

/// Left panel: the dressing picker and the thumbnails of every active dressing
pub fn tools_panel(app: &mut SiluetApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.heading("Dressings");

            // Collect first so the checkboxes can mutate the selection
            let entries: Vec<(DressingId, String, usize)> = app
                .session
                .assets
                .catalog()
                .into_iter()
                .map(|dressing| (dressing.id.clone(), dressing.name.clone(), dressing.len()))
                .collect();
            for (id, name, len) in &entries {
                let mut checked = app.session.assets.is_selected(id);
                let mut response = ui.checkbox(&mut checked, format!("{} ({})", name, len));
                if id.is_ephemeral() {
                    response = response.on_hover_text("Non enregistré, disparaît à la fermeture");
                }
                if response.changed() {
                    app.session.toggle_dressing(id);
                }
            }
            if app.session.assets.is_storage_unreadable() {
                ui.colored_label(
                    egui::Color32::RED,
                    "Dressings enregistrés illisibles : les nouveaux dressings ne seront pas sauvegardés.",
                );
            }

            ui.separator();
            ui.weak("Déposez des images sur la fenêtre pour les importer.");
            ui.separator();

            let mut removal = None;
            egui::ScrollArea::vertical().show(ui, |ui| {
                for dressing in app.session.assets.active() {
                    ui.strong(&dressing.name);
                    ui.horizontal_wrapped(|ui| {
                        for (index, asset) in dressing.items.iter().enumerate() {
                            ui.vertical(|ui| {
                                thumbnail(ui, &mut app.renderer, &dressing.id, index, asset);
                                if !dressing.id.is_default()
                                    && ui.small_button("×").on_hover_text("Retirer").clicked()
                                {
                                    removal = Some((dressing.id.clone(), index));
                                }
                            });
                        }
                    });
                    ui.add_space(8.0);
                }
            });

            if let Some((id, index)) = removal {
                if let Ok(outcome) = app.session.remove_dressing_item(&id, index) {
                    log::debug!("Removed item {} from {}: {:?}", index, id, outcome);
                }
            }
        });
}

/// A draggable thumbnail carrying its asset reference as the drag payload
fn thumbnail(ui: &mut egui::Ui, renderer: &mut Renderer, dressing: &DressingId, index: usize, asset: &AssetHandle) {
    let ctx = ui.ctx().clone();
    let id = egui::Id::new(("thumbnail", dressing, index));
    ui.dnd_drag_source(id, asset.clone(), |ui| match renderer.thumbnail(&ctx, asset, THUMBNAIL_HEIGHT) {
        Some((texture, size)) => {
            ui.add(egui::Image::new((texture, size)));
        }
        None => {
            ui.add_sized([THUMBNAIL_HEIGHT, THUMBNAIL_HEIGHT], egui::Label::new("?"));
        }
    })
    .response
    .on_hover_text(asset.displayable_ref());
}
