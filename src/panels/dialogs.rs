use eframe::egui;

use crate::SiluetApp;
use crate::asset::AssetHandle;
use crate::import::ImportOptions;
use crate::project::SaveRequest;

const PREVIEW_SCALE: f32 = 0.5;

fn modal(title: &str) -> egui::Window<'_> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
}

/// Shown while an import batch is staged
pub fn import_dialog(app: &mut SiluetApp, ctx: &egui::Context) {
    let Some(pending) = app.session.import.pending() else {
        return;
    };
    let names: Vec<String> = pending.files.iter().map(|(name, _)| name.clone()).collect();
    let suggested_name = pending.suggested_name.clone();

    let mut confirm = false;
    let mut cancel = false;
    modal("Importer des vêtements").show(ctx, |ui| {
        if names.is_empty() {
            ui.weak("Aucun fichier sélectionné.");
        } else {
            ui.label(format!("{} image(s)", names.len()));
            egui::ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
                for name in &names {
                    ui.monospace(name);
                }
            });
        }

        ui.add_space(8.0);
        ui.checkbox(&mut app.ui.import_create_dressing, "Enregistrer dans un dressing");
        if app.ui.import_create_dressing {
            ui.add(egui::TextEdit::singleline(&mut app.ui.import_name).hint_text(suggested_name.as_str()));
        }

        ui.separator();
        ui.horizontal(|ui| {
            cancel = ui.button("Annuler").clicked();
            confirm = ui.button("Importer").clicked();
        });
    });

    if confirm {
        let options = if app.ui.import_create_dressing {
            ImportOptions::new_dressing(app.ui.import_name.clone())
        } else {
            ImportOptions::ephemeral()
        };
        let outcome = app.session.confirm_import(options);
        log::debug!("Import confirmed: {:?}", outcome);
    } else if cancel {
        let discarded = app.session.cancel_import();
        for asset in &discarded {
            app.renderer.textures().forget(asset);
        }
        log::info!("Import cancelled, {} file(s) discarded", discarded.len());
    }
}

/// Save the current outfit to a lookbook
pub fn save_dialog(app: &mut SiluetApp, ctx: &egui::Context) {
    if !app.ui.save_open {
        return;
    }

    let item_count = app.session.editor.composition.len();
    let labels = app.session.lookbooks.labels().to_vec();
    let mut confirm = false;
    let mut cancel = false;
    let mut add_label = false;

    let canvas_size = egui::Vec2::from(app.session.config().canvas_size);
    let silhouette = AssetHandle::new(app.session.config().silhouette_image.clone());

    modal("Aperçu de la tenue").show(ctx, |ui| {
        let (rect, _) = ui.allocate_exact_size(canvas_size * PREVIEW_SCALE, egui::Sense::hover());
        app.renderer.render_preview(
            ui.ctx(),
            &ui.painter_at(rect),
            rect,
            canvas_size,
            &silhouette,
            &app.session.editor.composition,
        );
        ui.weak(format!("{} image(s)", item_count));
        ui.add_space(8.0);

        ui.weak("Enregistrer dans un lookbook");
        egui::ComboBox::from_id_salt("lookbook_select")
            .selected_text(app.ui.save_lookbook.as_str())
            .show_ui(ui, |ui| {
                for label in &labels {
                    ui.selectable_value(&mut app.ui.save_lookbook, label.clone(), label);
                }
            });
        ui.horizontal(|ui| {
            ui.add(egui::TextEdit::singleline(&mut app.ui.new_lookbook).hint_text("Nouveau lookbook"));
            add_label = ui.button("Ajouter").clicked();
        });

        ui.separator();
        ui.horizontal(|ui| {
            cancel = ui.button("Annuler").clicked();
            confirm = ui.button("Enregistrer la tenue").clicked();
        });
    });

    if add_label {
        let label = app.ui.new_lookbook.trim().to_owned();
        if let Ok(true) = app.session.add_lookbook(&label) {
            app.ui.save_lookbook = label;
            app.ui.new_lookbook.clear();
        }
    }

    if confirm {
        let request = SaveRequest {
            lookbook_label: app.ui.save_lookbook.clone(),
            dressing_label: None,
        };
        // Keep the dialog open on failure so the save can be retried
        if app.session.save_project(&request).is_ok() {
            app.ui.save_open = false;
        }
    } else if cancel {
        app.ui.save_open = false;
    }
}

/// Saved projects, newest first
pub fn projects_window(app: &mut SiluetApp, ctx: &egui::Context) {
    if !app.ui.projects_open {
        return;
    }

    let mut open = app.ui.projects_open;
    egui::Window::new("Projets").open(&mut open).show(ctx, |ui| match app.session.projects() {
        Ok(projects) if projects.is_empty() => {
            ui.weak("Aucune tenue enregistrée.");
        }
        Ok(projects) => {
            egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                egui::Grid::new("projects_grid").num_columns(3).striped(true).show(ui, |ui| {
                    for project in &projects {
                        ui.label(project.created_at.format("%d.%m.%Y %H:%M").to_string());
                        ui.label(&project.lookbook_label);
                        ui.label(format!("{} image(s)", project.items.len()));
                        ui.end_row();
                    }
                });
            });
        }
        Err(err) => {
            ui.colored_label(egui::Color32::RED, format!("Projets illisibles : {}", err));
        }
    });
    app.ui.projects_open = open;
}
