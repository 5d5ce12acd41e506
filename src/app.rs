use crate::event::ToastLevel;
use crate::file_handler::FileHandler;
use crate::panels::{self, UiState};
use crate::renderer::Renderer;
use crate::session::Session;

/// The desktop shell around a [`Session`].
///
/// Durable state lives in the session's key/value store, so nothing here is
/// persisted through eframe.
pub struct SiluetApp {
    pub(crate) session: Session,
    pub(crate) renderer: Renderer,
    pub(crate) file_handler: FileHandler,
    pub(crate) ui: UiState,
}

impl SiluetApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, session: Session) -> Self {
        Self::with_session(session)
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session,
            renderer: Renderer::new(),
            file_handler: FileHandler::new(),
            ui: UiState::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Stage files dropped on the window and open the import dialog
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let files = self.file_handler.take_dropped_files(ctx);
        let skipped = self.file_handler.skipped().len();
        if skipped > 0 {
            self.session
                .notifications()
                .push(format!("{} fichier(s) ignoré(s) : images uniquement", skipped), ToastLevel::Error);
        }
        if files.is_empty() {
            return;
        }
        let suggested_name = self.session.stage_import(files).suggested_name.clone();
        self.ui.open_import(&suggested_name);
    }
}

impl eframe::App for SiluetApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.file_handler.preview_files_being_dropped(ctx);
        self.handle_dropped_files(ctx);

        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);
        panels::import_dialog(self, ctx);
        panels::save_dialog(self, ctx);
        panels::projects_window(self, ctx);
        panels::toasts(self.session.notifications(), ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Last chance to retry a dressing write that failed earlier
        if self.session.assets.is_dirty() && !self.session.sync_dressings() {
            log::error!("Dressings could not be saved before exit");
        }
    }
}
