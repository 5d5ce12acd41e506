use std::collections::HashMap;
use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions, Vec2};
use thiserror::Error;

use crate::asset::AssetHandle;

/// Errors that can occur during texture generation
#[derive(Error, Debug)]
pub enum TextureGenerationError {
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// Decodes asset images into egui textures, once per asset reference.
///
/// A reference that fails to decode is remembered as missing so it is not
/// re-read every frame; the renderer draws a placeholder for it.
#[derive(Default)]
pub struct TextureManager {
    textures: HashMap<AssetHandle, Option<TextureHandle>>,
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture for an asset, decoding it on first use
    pub fn get_or_load(&mut self, ctx: &Context, asset: &AssetHandle) -> Option<TextureId> {
        if let Some(cached) = self.textures.get(asset) {
            return cached.as_ref().map(TextureHandle::id);
        }

        let handle = match decode(asset.displayable_ref()) {
            Ok(image) => Some(ctx.load_texture(asset.displayable_ref(), image, TextureOptions::LINEAR)),
            Err(err) => {
                log::warn!("{}", err);
                None
            }
        };
        let id = handle.as_ref().map(TextureHandle::id);
        self.textures.insert(asset.clone(), handle);
        id
    }

    /// Pixel size of an already loaded texture
    pub fn size(&self, asset: &AssetHandle) -> Option<Vec2> {
        self.textures.get(asset)?.as_ref().map(TextureHandle::size_vec2)
    }

    /// Release an asset's texture
    pub fn forget(&mut self, asset: &AssetHandle) {
        self.textures.remove(asset);
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

fn decode(path: &str) -> Result<ColorImage, TextureGenerationError> {
    let image = image::open(path).map_err(|source| TextureGenerationError::Decode {
        path: path.to_owned(),
        source,
    })?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_flat_samples().as_slice()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_cached_as_missing() {
        let ctx = Context::default();
        let mut manager = TextureManager::new();
        let asset = AssetHandle::new("/definitely/not/here.png");

        assert_eq!(manager.get_or_load(&ctx, &asset), None);
        assert_eq!(manager.len(), 1);

        manager.forget(&asset);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_decodes_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let ctx = Context::default();
        let mut manager = TextureManager::new();
        let asset = AssetHandle::new(path.to_string_lossy().into_owned());
        assert!(manager.get_or_load(&ctx, &asset).is_some());
        assert_eq!(manager.size(&asset), Some(egui::vec2(2.0, 2.0)));
    }
}
