mod editor_state;
pub mod context;
pub mod persistence;

pub use editor_state::InteractionState;
pub use context::EditorContext;
pub use persistence::{FileStore, KeyValueStore, MemoryStore};
