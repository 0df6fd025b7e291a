use std::collections::HashMap;
use std::path::Path;

use egui::{ColorImage, Context, TextureHandle, TextureOptions};

use crate::error::{Result, ViewerError};
use crate::media::ImageRecord;

/// Decoded carousel screens, uploaded lazily the first time they scroll into view.
///
/// A screen that fails to decode is remembered as `None` so the failure is
/// logged once rather than every frame.
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<u32, Option<TextureHandle>>,
}

impl TextureCache {
    pub fn get(&mut self, ctx: &Context, image: &ImageRecord) -> Option<&TextureHandle> {
        self.textures
            .entry(image.file_index)
            .or_insert_with(|| match load_color_image(&image.asset_path) {
                Ok(color_image) => Some(ctx.load_texture(
                    format!("screen_{}", image.file_index),
                    color_image,
                    TextureOptions::LINEAR,
                )),
                Err(e) => {
                    log::warn!("{e}");
                    None
                }
            })
            .as_ref()
    }

    pub fn clear(&mut self) {
        self.textures.clear();
    }
}

impl std::fmt::Debug for TextureCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureCache")
            .field("textures", &self.textures.len())
            .finish()
    }
}

fn load_color_image(path: &Path) -> Result<ColorImage> {
    let decoded = image::open(path).map_err(|e| ViewerError::Image {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
