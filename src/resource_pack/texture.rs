//! Texture painting and PNG encoding.

use crate::error::Result;
use image::ImageEncoder;

/// An RGBA colour.
pub type Rgba = [u8; 4];

/// Raw RGBA texture data.
#[derive(Debug, Clone)]
pub struct TextureData {
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// RGBA8 pixel data (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl TextureData {
    /// Create a fully transparent texture.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    /// Set a pixel at (x, y). Out of range pixels are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, colour: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = ((y * self.width + x) * 4) as usize;
        self.pixels[idx..idx + 4].copy_from_slice(&colour);
    }

    /// Get a pixel at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Rgba {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Fill the rectangle `[x0, x1) × [y0, y1)`, clipped to the texture.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, colour: Rgba) {
        for y in y0..y1.min(self.height) {
            for x in x0..x1.min(self.width) {
                self.set_pixel(x, y, colour);
            }
        }
    }

    /// Encode the texture as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let cursor = std::io::Cursor::new(&mut bytes);
        let encoder = image::codecs::png::PngEncoder::new(cursor);

        encoder.write_image(
            &self.pixels,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )?;

        Ok(bytes)
    }
}
