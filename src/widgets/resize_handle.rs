use egui::{Color32, CursorIcon, Painter, Pos2, Response, Stroke};

use crate::geometry::hit_testing::RESIZE_HANDLE_RADIUS;

const HANDLE_FILL: Color32 = Color32::from_rgb(75, 60, 47);

/// The circular handle drawn at the bottom-right corner of the selected item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeHandle {
    center: Pos2,
    radius: f32,
}

impl ResizeHandle {
    pub fn new(center: Pos2) -> Self {
        Self {
            center,
            radius: RESIZE_HANDLE_RADIUS,
        }
    }

    pub fn center(&self) -> Pos2 {
        self.center
    }

    pub fn contains(&self, pos: Pos2) -> bool {
        self.center.distance(pos) <= self.radius
    }

    pub fn paint(&self, painter: &Painter) {
        painter.circle_filled(self.center, self.radius * 0.7, HANDLE_FILL);
        painter.circle_stroke(self.center, self.radius * 0.7, Stroke::new(1.5, Color32::WHITE));
    }

    /// Show the diagonal resize cursor while the pointer hovers the handle
    pub fn update_cursor(&self, response: &Response) {
        if response.hover_pos().is_some_and(|pos| self.contains(pos)) {
            response.ctx.set_cursor_icon(CursorIcon::ResizeNwSe);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_contains_uses_handle_radius() {
        let handle = ResizeHandle::new(pos2(100.0, 100.0));
        assert!(handle.contains(pos2(100.0, 100.0)));
        assert!(handle.contains(pos2(100.0 + RESIZE_HANDLE_RADIUS, 100.0)));
        assert!(!handle.contains(pos2(100.0 + RESIZE_HANDLE_RADIUS + 1.0, 100.0)));
    }
}
