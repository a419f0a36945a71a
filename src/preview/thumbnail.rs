//! Decoding and downsampling of the selected photo

use super::error::PreviewError;

/// Downsampled RGB thumbnail ready for half-block rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    pixels: Vec<[u8; 3]>,
}

impl PreviewImage {
    /// Alt text shown next to the rendered preview
    pub const ALT: &'static str = "Profile preview";

    /// Build from row-major RGB pixels; `None` if the length does not match
    pub fn from_rgb(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> Option<Self> {
        (pixels.len() == (width as usize) * (height as usize)).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get((y as usize) * (self.width as usize) + x as usize)
            .copied()
    }
}

/// Decode `bytes` and shrink the result to fit `max_width` x `max_height`
pub fn decode_preview(
    bytes: &[u8],
    max_width: u32,
    max_height: u32,
) -> Result<PreviewImage, PreviewError> {
    let img = image::load_from_memory(bytes).map_err(|e| PreviewError::Decode(e.to_string()))?;
    let thumb = img.thumbnail(max_width.max(1), max_height.max(1)).to_rgb8();
    let (width, height) = thumb.dimensions();
    let pixels = thumb.pixels().map(|p| p.0).collect();

    Ok(PreviewImage {
        width,
        height,
        pixels,
    })
}
