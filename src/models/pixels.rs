use crate::error::{InspectError, Result};
use crate::utils::grayscale::rgba_to_grayscale;

/// Borrowed row-major RGBA pixel buffer
#[derive(Debug, Clone, Copy)]
pub struct RgbaView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> RgbaView<'a> {
    /// Wrap a buffer of exactly `width * height * 4` bytes
    pub fn new(data: &'a [u8], width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(InspectError::EmptyImage { width, height });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(InspectError::BufferSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// R, G, B at integer pixel (x, y); `None` outside the image
    pub fn rgb(&self, x: i64, y: i64) -> Option<[u8; 3]> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        let offset = (y as usize * self.width + x as usize) * 4;
        Some([
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        ])
    }

    /// Luminance copy of the image
    pub fn to_grayscale(&self) -> Vec<u8> {
        rgba_to_grayscale(self.data, self.width, self.height)
    }
}
