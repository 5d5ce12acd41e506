use egui::{Pos2, Rect};

mod router;
pub use router::route_event;

use crate::asset::AssetHandle;
use crate::geometry::hit_testing::RESIZE_HANDLE_RADIUS;

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in screen coordinates
    pub position: Pos2,
    /// Screen rectangle of the silhouette canvas
    pub canvas_rect: Rect,
}

impl InputLocation {
    pub fn new(position: Pos2, canvas_rect: Rect) -> Self {
        Self {
            position,
            canvas_rect,
        }
    }

    /// Position translated to the canvas origin
    pub fn canvas_local(&self) -> Pos2 {
        (self.position - self.canvas_rect.min).to_pos2()
    }

    /// Inside the canvas, or close enough to grab a handle hanging over its edge
    pub fn is_in_canvas(&self) -> bool {
        canvas_hit_area(self.canvas_rect).contains(self.position)
    }
}

/// Area that must receive pointer presses for a canvas drawn at `canvas_rect`.
///
/// Handles of items touching the edge stick out by up to the handle radius.
pub fn canvas_hit_area(canvas_rect: Rect) -> Rect {
    canvas_rect.expand(RESIZE_HANDLE_RADIUS)
}

/// Pointer input, already reduced to what the canvas cares about
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed
    PointerDown { location: InputLocation },
    /// Pointer moved, with or without the button held
    PointerMove { location: InputLocation },
    /// Primary button released, anywhere
    PointerUp,
    /// Something was dropped on the canvas. `payload` is `None` when it carried no asset.
    AssetDropped {
        location: InputLocation,
        payload: Option<AssetHandle>,
    },
}
