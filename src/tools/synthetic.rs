use crate::decoder::bch::encode_format;
use crate::decoder::format::FORMAT_BIT_LAYOUT;
use crate::models::{BitMatrix, CornerSet, ECLevel, MaskPattern, Point, Version};

/// Module grid with finder patterns, timing patterns and the top-left
/// format information. Data modules are left light.
#[derive(Debug, Clone)]
pub struct SyntheticSymbol {
    /// Symbol version
    pub version: Version,
    /// Module grid, `version.size()` square
    pub modules: BitMatrix,
}

/// A rendered RGBA image and the pixel corners of the symbol in it
#[derive(Debug, Clone)]
pub struct RenderedSymbol {
    /// RGBA bytes, row-major
    pub rgba: Vec<u8>,
    /// Image width
    pub width: usize,
    /// Image height
    pub height: usize,
    /// Outer symbol corners (may lie outside the image)
    pub corners: CornerSet,
}

impl SyntheticSymbol {
    /// Symbol whose format modules carry `codeword` (already masked)
    pub fn with_codeword(version: Version, codeword: u16) -> Self {
        let d = version.size();
        let mut modules = BitMatrix::new(d, d);

        for (ox, oy) in [(0, 0), (d - 7, 0), (0, d - 7)] {
            draw_finder(&mut modules, ox, oy);
        }
        for i in 8..d - 8 {
            modules.set(i, 6, i % 2 == 0);
            modules.set(6, i, i % 2 == 0);
        }
        modules.set(8, d - 8, true);

        for fbit in FORMAT_BIT_LAYOUT {
            modules.set(fbit.col, fbit.row, (codeword >> fbit.bit) & 1 == 1);
        }

        Self { version, modules }
    }

    /// Symbol carrying the valid format codeword for `ec_level` and `mask`
    pub fn with_format(version: Version, ec_level: ECLevel, mask: MaskPattern) -> Self {
        Self::with_codeword(version, encode_format(ec_level, mask))
    }

    /// Render on a white `width x height` canvas with the symbol's top-left
    /// corner at `origin` (pixels, may be negative) and square modules of
    /// `module_px` pixels. Parts falling outside the canvas are dropped.
    pub fn render_at(
        &self,
        width: usize,
        height: usize,
        origin: (i64, i64),
        module_px: usize,
    ) -> RenderedSymbol {
        let d = self.modules.width();
        let mut rgba = vec![255u8; width * height * 4];
        let m = module_px as i64;

        for row in 0..d {
            for col in 0..d {
                if !self.modules.get(col, row) {
                    continue;
                }
                let x0 = origin.0 + col as i64 * m;
                let y0 = origin.1 + row as i64 * m;
                for y in y0.max(0)..(y0 + m).min(height as i64) {
                    for x in x0.max(0)..(x0 + m).min(width as i64) {
                        let offset = (y as usize * width + x as usize) * 4;
                        rgba[offset..offset + 3].copy_from_slice(&[0, 0, 0]);
                    }
                }
            }
        }

        let side = (d as i64 * m) as f32;
        let (ox, oy) = (origin.0 as f32, origin.1 as f32);
        RenderedSymbol {
            rgba,
            width,
            height,
            corners: CornerSet::new(
                Point::new(ox, oy),
                Point::new(ox + side, oy),
                Point::new(ox + side, oy + side),
                Point::new(ox, oy + side),
            ),
        }
    }

    /// Render centered with a `quiet_zone` module margin on every side
    pub fn render(&self, module_px: usize, quiet_zone: usize) -> RenderedSymbol {
        let side = (self.modules.width() + 2 * quiet_zone) * module_px;
        let offset = (quiet_zone * module_px) as i64;
        self.render_at(side, side, (offset, offset), module_px)
    }
}

fn draw_finder(modules: &mut BitMatrix, ox: usize, oy: usize) {
    for dy in 0..7 {
        for dx in 0..7 {
            let ring = dx.min(dy).min(6 - dx).min(6 - dy);
            modules.set(ox + dx, oy + dy, ring != 1);
        }
    }
}
