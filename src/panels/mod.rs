mod central_panel;
mod dialogs;
mod toasts;
mod tools_panel;

pub use central_panel::central_panel;
pub use dialogs::{import_dialog, projects_window, save_dialog};
pub use toasts::toasts;
pub use tools_panel::tools_panel;

/// Widget state that lives only as long as the window: dialog fields and visibility
#[derive(Debug, Default)]
pub struct UiState {
    /// "Enregistrer dans un dressing" in the import dialog
    pub import_create_dressing: bool,
    pub import_name: String,
    pub save_open: bool,
    pub save_lookbook: String,
    pub new_lookbook: String,
    pub projects_open: bool,
}

impl UiState {
    /// Reset the import dialog for a freshly staged batch
    pub fn open_import(&mut self, suggested_name: &str) {
        self.import_create_dressing = false;
        self.import_name = suggested_name.to_owned();
    }

    pub fn open_save(&mut self, lookbook: &str) {
        self.save_open = true;
        self.save_lookbook = lookbook.to_owned();
        self.new_lookbook.clear();
    }
}
