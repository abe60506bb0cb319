use super::chunks::chunks_for_payload;
use super::{FormatHint, LocatedSymbol, SymbolLocator};
use crate::models::{CornerSet, ECLevel, MaskPattern, Point, RgbaView, Version};
use crate::utils::geometry::GridMapper;

/// Locator backed by the `rqrr` decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct RqrrLocator;

impl RqrrLocator {
    /// Create a locator
    pub fn new() -> Self {
        Self
    }
}

fn to_point(p: &::rqrr::Point) -> Point {
    Point::new(p.x as f32, p.y as f32)
}

/// Shrink rqrr's grid bounds to the symbol's own `size`-module square.
///
/// rqrr maps its bounds at grid coordinate `size + 1.0`, one module past
/// the right and bottom edges.
fn symbol_corners(bounds: CornerSet, size: usize) -> CornerSet {
    let mapper = GridMapper::new(bounds, size + 1);
    let d = size as f32;
    CornerSet::new(
        mapper.map_to_pixel(0.0, 0.0),
        mapper.map_to_pixel(d, 0.0),
        mapper.map_to_pixel(d, d),
        mapper.map_to_pixel(0.0, d),
    )
}

impl SymbolLocator for RqrrLocator {
    fn locate(&self, image: RgbaView<'_>) -> Option<LocatedSymbol> {
        let (width, height) = (image.width(), image.height());
        let gray = image.to_grayscale();
        let mut prepared =
            ::rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| gray[y * width + x]);
        let grids = prepared.detect_grids();
        log::debug!("rqrr: {} candidate grids", grids.len());

        for (idx, grid) in grids.iter().enumerate() {
            let mut bytes = Vec::new();
            let meta = match grid.decode_to(&mut bytes) {
                Ok(meta) => meta,
                Err(err) => {
                    log::debug!("rqrr: grid {idx} failed to decode: {err}");
                    continue;
                }
            };

            let text = String::from_utf8_lossy(&bytes).into_owned();
            let bounds = CornerSet::from_array(grid.bounds.each_ref().map(to_point));
            // out-of-range versions keep the raw bounds; the caller rejects them
            let corners = match Version::from_number(meta.version.0) {
                Some(version) => symbol_corners(bounds, version.size()),
                None => bounds,
            };

            return Some(LocatedSymbol {
                chunks: chunks_for_payload(&text),
                text,
                bytes,
                version: meta.version.0,
                corners,
                format_hint: Some(FormatHint {
                    ec_level: ECLevel::from_format_field(meta.ecc_level as u8),
                    mask_pattern: MaskPattern::from_bits(meta.mask as u8),
                }),
            });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_corners_eq(got: CornerSet, want: [(f32, f32); 4]) {
        for (p, (x, y)) in got.as_array().iter().zip(want) {
            assert_relative_eq!(p.x, x, epsilon = 1e-3);
            assert_relative_eq!(p.y, y, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_symbol_corners_drop_extra_module() {
        // v1 at 10 px per module: rqrr bounds span 22 modules from (40, 40)
        let bounds = CornerSet::new(
            Point::new(40.0, 40.0),
            Point::new(260.0, 40.0),
            Point::new(260.0, 260.0),
            Point::new(40.0, 260.0),
        );
        let corners = symbol_corners(bounds, 21);
        assert_corners_eq(
            corners,
            [(40.0, 40.0), (250.0, 40.0), (250.0, 250.0), (40.0, 250.0)],
        );
        assert_relative_eq!(GridMapper::new(corners, 21).module_pitch(), 15.0, epsilon = 1e-4);
    }

    #[test]
    fn test_symbol_corners_rotated() {
        // same symbol turned 90 degrees clockwise: top-left sits at the image's top-right
        let bounds = CornerSet::new(
            Point::new(289.0, 40.0),
            Point::new(289.0, 260.0),
            Point::new(69.0, 260.0),
            Point::new(69.0, 40.0),
        );
        let corners = symbol_corners(bounds, 21);
        assert_corners_eq(
            corners,
            [(289.0, 40.0), (289.0, 250.0), (79.0, 250.0), (79.0, 40.0)],
        );
    }

    #[test]
    fn test_locate_blank_is_none() {
        let data = vec![255u8; 64 * 48 * 4];
        let view = RgbaView::new(&data, 64, 48).expect("view");
        assert!(RqrrLocator::new().locate(view).is_none());
    }
}
