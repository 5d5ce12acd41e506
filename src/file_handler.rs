use eframe::egui;

use crate::import::RawFile;

/// Picks up files dropped onto the window and turns the usable ones into import candidates.
#[derive(Debug, Default)]
pub struct FileHandler {
    skipped: Vec<String>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files dropped this frame that look like images.
    ///
    /// Returns an empty list on frames without a drop.
    pub fn take_dropped_files(&mut self, ctx: &egui::Context) -> Vec<RawFile> {
        self.skipped.clear();
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return Vec::new();
        }

        let mut files = Vec::with_capacity(dropped.len());
        for file in &dropped {
            match raw_file_from_dropped(file) {
                Some(raw) if raw.is_image() => files.push(raw),
                Some(raw) => {
                    log::warn!("Dropped file is not a supported image: {}", raw.name);
                    self.skipped.push(raw.name);
                }
                None => {
                    log::warn!("Dropped file has no readable path: {}", file.name);
                    self.skipped.push(file.name.clone());
                }
            }
        }
        log::debug!("Accepted {} of {} dropped file(s)", files.len(), dropped.len());
        files
    }

    /// Names of the files rejected during the last [`FileHandler::take_dropped_files`] call
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Dim the window while files hover over it
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order, TextStyle};

        let hovered = ctx.input(|i| i.raw.hovered_files.len());
        if hovered == 0 {
            return;
        }

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(160));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            format!("Importer {} fichier(s)", hovered),
            TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}

/// A dropped file is usable only when it has a path the texture loader can open
fn raw_file_from_dropped(file: &egui::DroppedFile) -> Option<RawFile> {
    let path = file.path.as_ref()?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.name.clone());
    Some(RawFile::new(name, path.display().to_string()))
}
