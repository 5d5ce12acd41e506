//! The composition canvas: placed items anchored to the silhouette.
//!
//! Items keep their insertion order in storage; painting and hit-testing use the
//! ascending `stack_order` instead. Every stacking assignment draws a fresh value
//! from the composition's [`StackCounter`], so two items never tie.

mod common;
mod item;

pub use common::{
    DEFAULT_ITEM_SIZE, MAX_ITEM_SIZE, MIN_ITEM_SIZE, NUDGE_STEP, StackCounter, clamp_size,
};
pub use item::PlacedItem;

use egui::Pos2;

use crate::asset::AssetHandle;
use crate::error::CanvasError;
use crate::geometry::hit_testing;

/// Working canvas state
#[derive(Debug, Clone, Default)]
pub struct Composition {
    items: Vec<PlacedItem>,
    selected: Option<usize>,
    stack_counter: StackCounter,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PlacedItem> {
        self.items.get(index)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&PlacedItem> {
        self.selected.and_then(|index| self.items.get(index))
    }

    pub fn select(&mut self, index: usize) -> Result<(), CanvasError> {
        self.check_index(index)?;
        self.selected = Some(index);
        Ok(())
    }

    /// Place an asset with its top-left corner at `drop` and select it.
    ///
    /// An empty asset reference is an invalid drop and places nothing.
    pub fn place(&mut self, asset_ref: AssetHandle, drop: Pos2) -> Option<usize> {
        if asset_ref.is_empty() {
            log::debug!("Ignoring drop without an asset reference");
            return None;
        }

        let index = self.items.len();
        self.items.push(PlacedItem {
            asset_ref,
            x: drop.x,
            y: drop.y,
            size: DEFAULT_ITEM_SIZE,
            stack_order: self.stack_counter.next(),
        });
        self.selected = Some(index);
        log::debug!("Placed item {} at ({}, {})", index, drop.x, drop.y);
        Some(index)
    }

    /// Move an item's top-left corner
    pub fn move_item(&mut self, index: usize, pos: Pos2) -> Result<(), CanvasError> {
        let item = self.item_mut(index)?;
        item.x = pos.x;
        item.y = pos.y;
        Ok(())
    }

    /// Give the item a stack order above every other item
    pub fn bring_to_front(&mut self, index: usize) -> Result<u64, CanvasError> {
        self.check_index(index)?;
        let order = self.stack_counter.next();
        self.items[index].stack_order = order;
        Ok(order)
    }

    /// Set an item's size, clamped to the allowed range. The item comes to the front.
    pub fn set_size(&mut self, index: usize, size: f32) -> Result<f32, CanvasError> {
        let size = clamp_size(size);
        self.item_mut(index)?.size = size;
        self.bring_to_front(index)?;
        Ok(size)
    }

    /// Grow or shrink the selected item by `delta`
    pub fn resize_selected(&mut self, delta: f32) -> Result<f32, CanvasError> {
        let index = self.selected.ok_or(CanvasError::NoSelection)?;
        let current = self.item_mut(index)?.size;
        self.set_size(index, current + delta)
    }

    pub fn delete_selected(&mut self) -> Result<PlacedItem, CanvasError> {
        let index = self.selected.ok_or(CanvasError::NoSelection)?;
        self.check_index(index)?;
        self.selected = None;
        Ok(self.items.remove(index))
    }

    /// Remove every item. The stack counter keeps counting.
    pub fn reset(&mut self) {
        self.items.clear();
        self.selected = None;
    }

    /// Item indices in ascending stack order, back to front
    pub fn paint_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.items.len()).collect();
        order.sort_by_key(|&index| self.items[index].stack_order);
        order
    }

    /// Topmost item under a canvas-local point
    pub fn item_at(&self, pos: Pos2) -> Option<usize> {
        self.paint_order()
            .into_iter()
            .rev()
            .find(|&index| hit_testing::is_point_in_item(pos, &self.items[index]))
    }

    /// The selected item, if `pos` is on its resize handle
    pub fn handle_at(&self, pos: Pos2) -> Option<usize> {
        let index = self.selected?;
        let item = self.items.get(index)?;
        hit_testing::is_point_near_handle(pos, item).then_some(index)
    }

    /// Deep copy of the current items
    pub fn snapshot(&self) -> Vec<PlacedItem> {
        self.items.clone()
    }

    fn check_index(&self, index: usize) -> Result<(), CanvasError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(CanvasError::ItemOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut PlacedItem, CanvasError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(CanvasError::ItemOutOfRange { index, len })
    }
}
