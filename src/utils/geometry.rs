//! Module-grid to pixel mapping for a located symbol

use crate::models::{CornerSet, Point};

/// Finder patterns span 7 modules, so the two top finder centers are
/// `dimension - 7` modules apart.
const FINDER_SPAN: f32 = 7.0;

/// Bilinear mapping from module-grid coordinates to pixel coordinates.
///
/// The four corners are the control points for grid positions (0,0),
/// (d,0), (d,d) and (0,d). This is an interpolation, not a homography:
/// exact at the corners and close to the true projection near them, which
/// is where the format modules sit. Under strong perspective interior
/// points drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMapper {
    corners: CornerSet,
    dimension: f32,
}

impl GridMapper {
    /// Build a mapper over a `dimension x dimension` module grid
    pub fn new(corners: CornerSet, dimension: usize) -> Self {
        Self {
            corners,
            dimension: dimension as f32,
        }
    }

    /// Map grid position (u, v) (any real values) to a pixel position
    pub fn map_to_pixel(&self, u: f32, v: f32) -> Point {
        let (x, y) = self.map_f64(f64::from(u), f64::from(v));
        Point::new(x as f32, y as f32)
    }

    /// Bilinear map evaluated in f64, so that flooring to a pixel index is
    /// stable on large frames.
    pub fn map_f64(&self, u: f64, v: f64) -> (f64, f64) {
        let d = f64::from(self.dimension);
        let nu = u / d;
        let nv = v / d;
        let [p0, p1, p2, p3] = self.corners.as_array().map(|p| (f64::from(p.x), f64::from(p.y)));

        let w0 = (1.0 - nu) * (1.0 - nv);
        let w1 = nu * (1.0 - nv);
        let w2 = nu * nv;
        let w3 = (1.0 - nu) * nv;

        (
            w0 * p0.0 + w1 * p1.0 + w2 * p2.0 + w3 * p3.0,
            w0 * p0.1 + w1 * p1.1 + w2 * p2.1 + w3 * p3.1,
        )
    }

    /// Module pitch in pixels, estimated along the top edge.
    ///
    /// Assumes no skew along that edge. Diagnostic only.
    pub fn module_pitch(&self) -> f32 {
        let span = self.dimension - FINDER_SPAN;
        if span <= 0.0 {
            return 0.0;
        }
        self.corners.top_left.distance(&self.corners.top_right) / span
    }
}

/// Round to 2 decimal places for reporting
pub fn round_to_hundredths(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn axis_square(origin: f32, side: f32) -> CornerSet {
        CornerSet::new(
            Point::new(origin, origin),
            Point::new(origin + side, origin),
            Point::new(origin + side, origin + side),
            Point::new(origin, origin + side),
        )
    }

    #[test]
    fn test_exact_at_corners() {
        let d = 21;
        let m = 4.0;
        let corners = axis_square(12.0, d as f32 * m);
        let mapper = GridMapper::new(corners, d);
        let df = d as f32;

        assert_eq!(mapper.map_to_pixel(0.0, 0.0), corners.top_left);
        assert_eq!(mapper.map_to_pixel(df, 0.0), corners.top_right);
        assert_eq!(mapper.map_to_pixel(df, df), corners.bottom_right);
        assert_eq!(mapper.map_to_pixel(0.0, df), corners.bottom_left);
    }

    #[test]
    fn test_exact_at_skewed_corners() {
        let corners = CornerSet::new(
            Point::new(10.0, 12.0),
            Point::new(205.0, 3.0),
            Point::new(190.0, 220.0),
            Point::new(4.0, 180.0),
        );
        let mapper = GridMapper::new(corners, 25);
        assert_eq!(mapper.map_to_pixel(25.0, 0.0), corners.top_right);
        assert_eq!(mapper.map_to_pixel(0.0, 25.0), corners.bottom_left);
    }

    #[test]
    fn test_module_centers_on_square() {
        let mapper = GridMapper::new(axis_square(0.0, 210.0), 21);
        let p = mapper.map_to_pixel(8.5, 0.5);
        assert_relative_eq!(p.x, 85.0, epsilon = 1e-3);
        assert_relative_eq!(p.y, 5.0, epsilon = 1e-3);
    }

    #[test]
    fn test_extrapolates_outside_grid() {
        let mapper = GridMapper::new(axis_square(0.0, 21.0), 21);
        let p = mapper.map_to_pixel(-1.0, 42.0);
        assert_relative_eq!(p.x, -1.0, epsilon = 1e-4);
        assert_relative_eq!(p.y, 42.0, epsilon = 1e-4);
    }

    #[test]
    fn test_module_pitch_between_finder_centers() {
        // corners on the finder centers, d - 7 modules apart at pitch m
        for (d, m) in [(21usize, 5.0f32), (25, 3.0), (177, 2.0)] {
            let span = (d as f32 - 7.0) * m;
            let mapper = GridMapper::new(axis_square(3.5 * m, span), d);
            assert_relative_eq!(mapper.module_pitch(), m, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_large_frame_precision() {
        // module centers of a v40 symbol far from the origin
        let mapper = GridMapper::new(axis_square(12_345.0, 177.0 * 3.0), 177);
        let (x, y) = mapper.map_f64(176.5, 0.5);
        assert_relative_eq!(x, 12_345.0 + 176.5 * 3.0, epsilon = 1e-9);
        assert_relative_eq!(y, 12_345.0 + 0.5 * 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_round_to_hundredths() {
        assert_relative_eq!(round_to_hundredths(9.04761), 9.05, epsilon = 1e-6);
        assert_relative_eq!(round_to_hundredths(2.0), 2.0);
    }
}
