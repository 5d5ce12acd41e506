mod bus;
mod events;
mod handlers;

pub use bus::EventBus;
pub use events::{CanvasEvent, DressingEvent, EditorEvent};
pub use handlers::{NotificationCenter, Toast, ToastLevel};

/// Receives every event emitted on an [`EventBus`].
///
/// Handlers run synchronously on the UI thread.
pub trait EventHandler {
    fn handle_event(&mut self, event: &EditorEvent);
}
