use egui::{Pos2, Rect, Vec2};

use crate::canvas::PlacedItem;

/// Pointer distance from the bottom-right corner that still grabs the resize handle
pub const RESIZE_HANDLE_RADIUS: f32 = 10.0;

/// Canvas-local square covered by an item
pub fn item_rect(item: &PlacedItem) -> Rect {
    Rect::from_min_size(Pos2::new(item.x, item.y), Vec2::splat(item.size))
}

pub fn handle_center(item: &PlacedItem) -> Pos2 {
    item_rect(item).right_bottom()
}

pub fn is_point_in_item(pos: Pos2, item: &PlacedItem) -> bool {
    item_rect(item).contains(pos)
}

pub fn is_point_near_handle(pos: Pos2, item: &PlacedItem) -> bool {
    pos.distance(handle_center(item)) <= RESIZE_HANDLE_RADIUS
}
