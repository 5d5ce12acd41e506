//! The editing context: the composition, the interaction state and the event bus.
//!
//! All pointer and toolbar input goes through [`EditorContext`], which validates
//! the state transition, mutates the composition and emits the matching events.

use egui::{Pos2, Vec2};

use super::InteractionState;
use crate::asset::AssetHandle;
use crate::canvas::{Composition, PlacedItem};
use crate::error::{CanvasError, TransitionError};
use crate::event::{CanvasEvent, EditorEvent, EventBus};

#[derive(Debug, Default)]
pub struct EditorContext {
    pub composition: Composition,
    state: InteractionState,
    pub event_bus: EventBus,
}

impl EditorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event_bus(event_bus: EventBus) -> Self {
        Self {
            composition: Composition::new(),
            state: InteractionState::Idle,
            event_bus,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Validates and performs a transition, emitting `StateChanged` on success
    pub fn transition_to(&mut self, new_state: InteractionState) -> Result<(), TransitionError> {
        if !self.state.can_transition_to(&new_state) {
            return Err(TransitionError::InvalidStateTransition {
                from: self.state.name(),
                to: new_state.name(),
            });
        }
        if self.state == new_state {
            return Ok(());
        }

        let old = std::mem::replace(&mut self.state, new_state);
        self.event_bus.emit(EditorEvent::StateChanged {
            old,
            new: self.state.clone(),
        });
        Ok(())
    }

    /// Pointer pressed on an item body: select it, raise it and start dragging
    pub fn pointer_down_on_item(&mut self, index: usize) -> Result<(), TransitionError> {
        self.require_idle("Dragging")?;
        self.select_and_raise(index)?;
        self.transition_to(InteractionState::Dragging { index })
    }

    /// Pointer pressed on an item's resize handle: select it, raise it and start resizing
    pub fn pointer_down_on_handle(&mut self, index: usize, pointer: Pos2) -> Result<(), TransitionError> {
        self.require_idle("Resizing")?;
        self.select_and_raise(index)?;
        let start_size = self.composition.items()[index].size;
        self.transition_to(InteractionState::Resizing {
            index,
            origin: pointer,
            start_size,
        })
    }

    /// Pointer moved to a canvas-local position. Ignored unless a gesture is active.
    pub fn pointer_move(&mut self, pointer: Pos2) -> Result<(), TransitionError> {
        match self.state.clone() {
            InteractionState::Idle => Ok(()),
            InteractionState::Dragging { index } => {
                let half = self.composition.items()[index].size / 2.0;
                self.move_selected(pointer - Vec2::splat(half))
            }
            InteractionState::Resizing {
                index,
                origin,
                start_size,
            } => {
                let delta = pointer - origin;
                let size = self
                    .composition
                    .set_size(index, start_size + delta.x.max(delta.y))?;
                self.event_bus
                    .emit(EditorEvent::Canvas(CanvasEvent::ItemResized { index, size }));
                Ok(())
            }
        }
    }

    /// Move the dragged item's top-left corner. No-op when nothing is being dragged.
    pub fn move_selected(&mut self, pos: Pos2) -> Result<(), TransitionError> {
        let InteractionState::Dragging { index } = self.state else {
            return Ok(());
        };
        self.composition.move_item(index, pos)?;
        self.event_bus.emit(EditorEvent::Canvas(CanvasEvent::ItemMoved {
            index,
            x: pos.x,
            y: pos.y,
        }));
        Ok(())
    }

    /// Ends whatever gesture is active
    pub fn pointer_up(&mut self) {
        if let Some(index) = self.state.active_index() {
            log::debug!("{} of item {} finished", self.state.name(), index);
        }
        // Every state may return to Idle
        let _ = self.transition_to(InteractionState::Idle);
    }

    /// An external asset dropped at a canvas-local position.
    ///
    /// Returns the new item's index, or `None` for a drop without an asset reference.
    pub fn drop_asset(&mut self, asset_ref: AssetHandle, pos: Pos2) -> Result<Option<usize>, TransitionError> {
        self.require_idle("Idle")?;
        let placed = self.composition.place(asset_ref, pos);
        if let Some(index) = placed {
            self.event_bus
                .emit(EditorEvent::Canvas(CanvasEvent::ItemPlaced { index }));
            self.event_bus
                .emit(EditorEvent::Canvas(CanvasEvent::SelectionChanged { index: Some(index) }));
        }
        Ok(placed)
    }

    /// Toolbar grow/shrink of the selected item
    pub fn nudge_size(&mut self, delta: f32) -> Result<f32, TransitionError> {
        self.require_idle("Idle")?;
        let index = self.composition.selected().ok_or(CanvasError::NoSelection)?;
        let size = self.composition.resize_selected(delta)?;
        self.event_bus
            .emit(EditorEvent::Canvas(CanvasEvent::ItemResized { index, size }));
        Ok(size)
    }

    pub fn bring_to_front(&mut self, index: usize) -> Result<u64, TransitionError> {
        self.require_idle("Idle")?;
        let stack_order = self.composition.bring_to_front(index)?;
        self.event_bus
            .emit(EditorEvent::Canvas(CanvasEvent::BroughtToFront { index, stack_order }));
        Ok(stack_order)
    }

    pub fn delete_selected(&mut self) -> Result<PlacedItem, TransitionError> {
        self.require_idle("Idle")?;
        let index = self.composition.selected().ok_or(CanvasError::NoSelection)?;
        let removed = self.composition.delete_selected()?;
        log::info!("Removed item {} ({})", index, removed.asset_ref);
        self.event_bus
            .emit(EditorEvent::Canvas(CanvasEvent::ItemRemoved { index }));
        self.event_bus
            .emit(EditorEvent::Canvas(CanvasEvent::SelectionChanged { index: None }));
        Ok(removed)
    }

    /// Clear the canvas, with or without a selection
    pub fn reset(&mut self) -> Result<(), TransitionError> {
        self.require_idle("Idle")?;
        let count = self.composition.len();
        self.composition.reset();
        log::info!("Reset composition ({} item(s) removed)", count);
        self.event_bus.emit(EditorEvent::Canvas(CanvasEvent::Reset));
        Ok(())
    }

    fn select_and_raise(&mut self, index: usize) -> Result<(), TransitionError> {
        self.composition.select(index)?;
        self.event_bus
            .emit(EditorEvent::Canvas(CanvasEvent::SelectionChanged { index: Some(index) }));
        self.bring_to_front(index)?;
        Ok(())
    }

    fn require_idle(&self, to: &'static str) -> Result<(), TransitionError> {
        if self.state.is_idle() {
            Ok(())
        } else {
            Err(TransitionError::InvalidStateTransition {
                from: self.state.name(),
                to,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{MAX_ITEM_SIZE, MIN_ITEM_SIZE};
    use egui::pos2;

    fn context_with_item() -> EditorContext {
        let mut ctx = EditorContext::new();
        ctx.drop_asset(AssetHandle::new("coat.png"), pos2(50.0, 50.0)).unwrap();
        ctx
    }

    #[test]
    fn test_move_outside_gesture_is_ignored() {
        let mut ctx = context_with_item();
        ctx.pointer_move(pos2(200.0, 200.0)).unwrap();
        ctx.move_selected(pos2(0.0, 0.0)).unwrap();
        assert_eq!(ctx.composition.items()[0].x, 50.0);
        assert_eq!(ctx.composition.items()[0].y, 50.0);
    }

    #[test]
    fn test_resize_gesture_clamps() {
        let mut ctx = context_with_item();
        ctx.pointer_down_on_handle(0, pos2(170.0, 170.0)).unwrap();
        assert!(ctx.state().is_resizing());

        ctx.pointer_move(pos2(200.0, 180.0)).unwrap();
        assert_eq!(ctx.composition.items()[0].size, 150.0);

        ctx.pointer_move(pos2(5000.0, 170.0)).unwrap();
        assert_eq!(ctx.composition.items()[0].size, MAX_ITEM_SIZE);

        ctx.pointer_move(pos2(-5000.0, -5000.0)).unwrap();
        assert_eq!(ctx.composition.items()[0].size, MIN_ITEM_SIZE);

        ctx.pointer_up();
        assert!(ctx.state().is_idle());
    }

    #[test]
    fn test_no_second_gesture_while_dragging() {
        let mut ctx = context_with_item();
        ctx.pointer_down_on_item(0).unwrap();
        let err = ctx.pointer_down_on_handle(0, pos2(170.0, 170.0)).unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidStateTransition {
                from: "Dragging",
                to: "Resizing"
            }
        );
        assert!(ctx.state().is_dragging());
    }

    #[test]
    fn test_toolbar_needs_idle() {
        let mut ctx = context_with_item();
        ctx.pointer_down_on_item(0).unwrap();
        assert!(ctx.nudge_size(16.0).is_err());
        assert!(ctx.delete_selected().is_err());
        assert!(ctx.reset().is_err());
        assert!(ctx.bring_to_front(0).is_err());
        assert_eq!(ctx.composition.len(), 1);
    }

    #[test]
    fn test_pointer_down_out_of_range() {
        let mut ctx = context_with_item();
        assert_eq!(
            ctx.pointer_down_on_item(4),
            Err(TransitionError::Canvas(CanvasError::ItemOutOfRange { index: 4, len: 1 }))
        );
        assert!(ctx.state().is_idle());
    }
}
