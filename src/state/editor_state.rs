//! The pointer interaction state machine.
//!
//! ```text
//!              pointer-down on item
//!        ┌──────────────────────────► Dragging(index) ──┐
//!        │                               │ pointer-move │
//! ┌──────┴───┐                           └──────◄───────┘
//! │   Idle   ◄──────────── pointer-up ──────────────────┤
//! └──────┬───┘                                          │
//!        │        pointer-down on resize handle         │
//!        └──────────────────────────► Resizing(index) ──┘
//! ```
//!
//! Drops of external assets and toolbar actions happen in `Idle` and leave it there.
//! Only one gesture is active at a time.

use egui::Pos2;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum InteractionState {
    /// No gesture in progress
    #[default]
    Idle,
    /// The item follows the pointer, grabbed by its center
    Dragging { index: usize },
    /// The item's size follows the pointer's offset from where the gesture began
    Resizing {
        index: usize,
        origin: Pos2,
        start_size: f32,
    },
}

impl InteractionState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: &InteractionState) -> bool {
        match (self, new_state) {
            // A gesture can only start from Idle
            (InteractionState::Idle, _) => true,
            // Any gesture ends by going back to Idle
            (_, InteractionState::Idle) => true,
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "Idle",
            InteractionState::Dragging { .. } => "Dragging",
            InteractionState::Resizing { .. } => "Resizing",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, InteractionState::Dragging { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, InteractionState::Resizing { .. })
    }

    /// Index of the item under an active gesture
    pub fn active_index(&self) -> Option<usize> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Dragging { index } | InteractionState::Resizing { index, .. } => {
                Some(*index)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gestures_are_exclusive() {
        let dragging = InteractionState::Dragging { index: 0 };
        let resizing = InteractionState::Resizing {
            index: 0,
            origin: Pos2::ZERO,
            start_size: 120.0,
        };

        assert!(InteractionState::Idle.can_transition_to(&dragging));
        assert!(InteractionState::Idle.can_transition_to(&resizing));
        assert!(!dragging.can_transition_to(&resizing));
        assert!(!resizing.can_transition_to(&dragging));
        assert!(!dragging.can_transition_to(&InteractionState::Dragging { index: 1 }));
        assert!(dragging.can_transition_to(&InteractionState::Idle));
        assert!(resizing.can_transition_to(&InteractionState::Idle));
    }

    #[test]
    fn test_active_index() {
        assert_eq!(InteractionState::Idle.active_index(), None);
        assert_eq!(InteractionState::Dragging { index: 3 }.active_index(), Some(3));
    }
}
