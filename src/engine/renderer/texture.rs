// Texture upload and storage

use crate::engine::assets::{AssetId, TextureHandle};
use anyhow::Result;
use image::RgbaImage;
use log::{debug, warn};

/// Colour used when page data cannot be decoded
const MISSING_TEXTURE_COLOR: [u8; 4] = [255, 0, 255, 255];

/// Receives texture page data and makes it drawable
///
/// Uploads are synchronous and always produce a usable handle.
pub trait TextureUploader {
    /// Upload `data` into `slot`, allocating a new slot when `slot` is `None`
    ///
    /// Returns the handle of the slot now holding the data.
    fn upload(&mut self, slot: Option<TextureHandle>, data: &[u8]) -> TextureHandle;
}

/// A decoded texture held in CPU memory
#[derive(Debug, Clone)]
pub struct Texture {
    pub pixels: RgbaImage,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Create a texture from encoded image bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)?;
        let pixels = img.to_rgba8();
        Ok(Self {
            width: pixels.width(),
            height: pixels.height(),
            pixels,
        })
    }

    /// Create a 1x1 solid color texture
    pub fn from_color(color: [u8; 4]) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(1, 1, image::Rgba(color)),
            width: 1,
            height: 1,
        }
    }
}

/// Software texture store: decodes pages with `image` and keeps them in slots
#[derive(Debug, Default)]
pub struct TextureManager {
    slots: Vec<Texture>,
    upload_count: usize,
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a texture by handle
    pub fn get(&self, handle: TextureHandle) -> Option<&Texture> {
        self.slots.get(handle.id().as_u64() as usize)
    }

    /// Number of allocated slots
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Total uploads performed
    pub fn upload_count(&self) -> usize {
        self.upload_count
    }
}

impl TextureUploader for TextureManager {
    fn upload(&mut self, slot: Option<TextureHandle>, data: &[u8]) -> TextureHandle {
        let texture = Texture::from_bytes(data).unwrap_or_else(|e| {
            warn!("Failed to decode texture page ({} bytes): {}", data.len(), e);
            Texture::from_color(MISSING_TEXTURE_COLOR)
        });
        self.upload_count += 1;

        let index = slot
            .map(|handle| handle.id().as_u64() as usize)
            .filter(|&index| index < self.slots.len());

        match index {
            Some(index) => {
                debug!("Replacing texture slot {} ({}x{})", index, texture.width, texture.height);
                self.slots[index] = texture;
                TextureHandle::new(AssetId::from_u64(index as u64))
            }
            None => {
                let index = self.slots.len();
                debug!("Allocating texture slot {} ({}x{})", index, texture.width, texture.height);
                self.slots.push(texture);
                TextureHandle::new(AssetId::from_u64(index as u64))
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use image::{ImageOutputFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    /// Encode a solid-colour PNG of the given size
    pub fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba(color));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageOutputFormat::Png)
            .expect("PNG encoding should succeed");
        out.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::png_bytes;
    use super::*;

    #[test]
    fn test_texture_from_bytes() {
        let texture = Texture::from_bytes(&png_bytes(4, 2, [10, 20, 30, 255])).unwrap();
        assert_eq!((texture.width, texture.height), (4, 2));
        assert_eq!(texture.pixels.get_pixel(3, 1).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_upload_allocates_then_reuses_slot() {
        let mut manager = TextureManager::new();

        let first = manager.upload(None, &png_bytes(2, 2, [255, 0, 0, 255]));
        assert_eq!(manager.slot_count(), 1);

        let second = manager.upload(Some(first), &png_bytes(8, 8, [0, 255, 0, 255]));
        assert_eq!(first, second);
        assert_eq!(manager.slot_count(), 1);
        assert_eq!(manager.get(second).unwrap().width, 8);
        assert_eq!(manager.upload_count(), 2);
    }

    #[test]
    fn test_undecodable_data_uses_placeholder() {
        let mut manager = TextureManager::new();
        let handle = manager.upload(None, &[]);

        let texture = manager.get(handle).unwrap();
        assert_eq!((texture.width, texture.height), (1, 1));
        assert_eq!(texture.pixels.get_pixel(0, 0).0, MISSING_TEXTURE_COLOR);
    }
}
