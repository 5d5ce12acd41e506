use eframe::egui::{self, Color32, Pos2, Rect, Stroke, Vec2};

use crate::asset::AssetHandle;
use crate::canvas::{Composition, PlacedItem};
use crate::geometry::hit_testing;
use crate::texture_manager::TextureManager;
use crate::widgets::resize_handle::ResizeHandle;

const CANVAS_BACKGROUND: Color32 = Color32::from_gray(243);
const SELECTION_COLOR: Color32 = Color32::from_rgb(75, 60, 47);
const FULL_UV: Rect = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));

/// Paints the silhouette and the placed items
#[derive(Default)]
pub struct Renderer {
    textures: TextureManager,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn textures(&mut self) -> &mut TextureManager {
        &mut self.textures
    }

    /// Renders the canvas
    ///
    /// Items are painted in ascending stack order so the most recently touched
    /// item ends up on top. `canvas_rect` is in screen coordinates.
    pub fn render(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        canvas_rect: Rect,
        silhouette: &AssetHandle,
        composition: &Composition,
    ) {
        self.paint_scene(ctx, painter, canvas_rect, 1.0, silhouette, composition);

        if let Some(item) = composition.selected_item() {
            let rect = screen_rect(item, canvas_rect.min, 1.0);
            painter.rect_stroke(rect, 0.0, Stroke::new(1.5, SELECTION_COLOR));
            ResizeHandle::new(hit_testing::handle_center(item) + canvas_rect.min.to_vec2()).paint(painter);
        }
    }

    /// The same scene shrunk into `rect`, without selection decorations.
    ///
    /// `canvas_size` is the size the composition was laid out for.
    pub fn render_preview(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        rect: Rect,
        canvas_size: Vec2,
        silhouette: &AssetHandle,
        composition: &Composition,
    ) {
        let scale = preview_scale(rect.size(), canvas_size);
        let scene = Rect::from_min_size(rect.min, canvas_size * scale);
        self.paint_scene(ctx, painter, scene, scale, silhouette, composition);
    }

    fn paint_scene(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        scene: Rect,
        scale: f32,
        silhouette: &AssetHandle,
        composition: &Composition,
    ) {
        painter.rect_filled(scene, 4.0, CANVAS_BACKGROUND);
        if let Some(texture) = self.textures.get_or_load(ctx, silhouette) {
            painter.image(texture, scene, FULL_UV, Color32::WHITE);
        }

        for index in composition.paint_order() {
            let item = &composition.items()[index];
            let rect = screen_rect(item, scene.min, scale);

            match self.textures.get_or_load(ctx, &item.asset_ref) {
                Some(texture) => {
                    painter.image(texture, rect, FULL_UV, Color32::WHITE);
                }
                None => {
                    painter.rect_filled(rect, 0.0, Color32::from_gray(200));
                    painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::from_gray(100)));
                }
            }
        }
    }

    /// Texture and display size for a thumbnail of fixed height, keeping the aspect ratio
    pub fn thumbnail(&mut self, ctx: &egui::Context, asset: &AssetHandle, height: f32) -> Option<(egui::TextureId, Vec2)> {
        let texture = self.textures.get_or_load(ctx, asset)?;
        let size = match self.textures.size(asset) {
            Some(size) if size.y > 0.0 => Vec2::new(size.x * height / size.y, height),
            _ => Vec2::splat(height),
        };
        Some((texture, size))
    }
}

/// Item rectangle on screen for a scene whose top-left corner is `origin`
fn screen_rect(item: &PlacedItem, origin: Pos2, scale: f32) -> Rect {
    let local = hit_testing::item_rect(item);
    Rect::from_min_size(origin + local.min.to_vec2() * scale, local.size() * scale)
}

/// Largest uniform scale that fits `canvas_size` into `available`
fn preview_scale(available: Vec2, canvas_size: Vec2) -> f32 {
    if canvas_size.x <= 0.0 || canvas_size.y <= 0.0 {
        return 1.0;
    }
    (available.x / canvas_size.x).min(available.y / canvas_size.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetHandle;
    use egui::pos2;

    #[test]
    fn test_render_with_missing_textures() {
        let ctx = egui::Context::default();
        let rect = Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(320.0, 520.0));
        let painter = egui::Painter::new(ctx.clone(), egui::LayerId::background(), rect);

        let mut composition = Composition::new();
        composition.place(AssetHandle::new("missing.png"), pos2(10.0, 10.0));

        let mut renderer = Renderer::new();
        renderer.render(&ctx, &painter, rect, &AssetHandle::new("silhouette.png"), &composition);
        // Both the silhouette and the item were looked up once
        assert_eq!(renderer.textures().len(), 2);
    }

    #[test]
    fn test_preview_scales_items_from_scene_origin() {
        let mut composition = Composition::new();
        composition.place(AssetHandle::new("coat.png"), pos2(100.0, 40.0));
        let item = &composition.items()[0];

        let rect = screen_rect(item, pos2(10.0, 10.0), 0.5);
        assert_eq!(rect.min, pos2(60.0, 30.0));
        assert_eq!(rect.width(), item.size * 0.5);
    }

    #[test]
    fn test_preview_scale_keeps_aspect_ratio() {
        let canvas = egui::vec2(320.0, 520.0);
        assert_eq!(preview_scale(egui::vec2(160.0, 400.0), canvas), 0.5);
        assert_eq!(preview_scale(egui::vec2(320.0, 260.0), canvas), 0.5);
        assert_eq!(preview_scale(egui::vec2(100.0, 100.0), Vec2::ZERO), 1.0);
    }

    #[test]
    fn test_preview_with_missing_textures() {
        let ctx = egui::Context::default();
        let rect = Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(160.0, 260.0));
        let painter = egui::Painter::new(ctx.clone(), egui::LayerId::background(), rect);

        let mut composition = Composition::new();
        composition.place(AssetHandle::new("missing.png"), pos2(10.0, 10.0));
        assert!(composition.selected().is_some());

        let mut renderer = Renderer::new();
        let canvas = egui::vec2(320.0, 520.0);
        renderer.render_preview(&ctx, &painter, rect, canvas, &AssetHandle::new("silhouette.png"), &composition);
        assert_eq!(renderer.textures().len(), 2);
    }
}
