use uuid::Uuid;

use crate::dressing::DressingId;
use crate::state::InteractionState;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    StateChanged {
        old: InteractionState,
        new: InteractionState,
    },
    Canvas(CanvasEvent),
    Dressing(DressingEvent),
    ProjectSaved {
        id: Uuid,
        lookbook: String,
    },
    /// A durable write failed; the in-memory state is intact and the write can be retried
    StorageFailed {
        operation: &'static str,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    ItemPlaced { index: usize },
    ItemMoved { index: usize, x: f32, y: f32 },
    ItemResized { index: usize, size: f32 },
    BroughtToFront { index: usize, stack_order: u64 },
    SelectionChanged { index: Option<usize> },
    ItemRemoved { index: usize },
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DressingEvent {
    Created {
        id: DressingId,
        name: String,
        count: usize,
    },
    AddedToEphemeral {
        count: usize,
    },
    ItemRemoved {
        id: DressingId,
        index: usize,
    },
    /// A persisted dressing was deleted because it became empty
    Removed {
        id: DressingId,
        name: String,
    },
}
