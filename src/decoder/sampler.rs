//! Module sampling from a pixel buffer through a grid mapper

use crate::models::RgbaView;
use crate::utils::geometry::GridMapper;

/// Gray level below which a module reads as dark
pub const DARK_THRESHOLD: u32 = 128;

/// Reads individual modules of a located symbol
#[derive(Debug, Clone, Copy)]
pub struct ModuleSampler<'a> {
    image: RgbaView<'a>,
    mapper: &'a GridMapper,
}

impl<'a> ModuleSampler<'a> {
    /// Sample `image` through `mapper`
    pub fn new(image: RgbaView<'a>, mapper: &'a GridMapper) -> Self {
        Self { image, mapper }
    }

    /// Darkness of module (col, row) measured at its center.
    ///
    /// `None` when the center maps outside the image.
    pub fn sample(&self, col: usize, row: usize) -> Option<bool> {
        let (x, y) = self.mapper.map_f64(col as f64 + 0.5, row as f64 + 0.5);
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let [r, g, b] = self.image.rgb(x.floor() as i64, y.floor() as i64)?;
        // mean of the three channels < threshold, without the division
        Some((r as u32 + g as u32 + b as u32) < DARK_THRESHOLD * 3)
    }
}
