use super::Point;
use serde::{Deserialize, Serialize};

/// Minimum separation (in pixels) between adjacent corners of a usable quad
const MIN_EDGE_PX: f32 = 1e-3;

/// Four corners of a symbol in pixel space, clockwise from top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerSet {
    /// Top-left corner
    pub top_left: Point,
    /// Top-right corner
    pub top_right: Point,
    /// Bottom-right corner
    pub bottom_right: Point,
    /// Bottom-left corner
    pub bottom_left: Point,
}

impl CornerSet {
    /// Create a corner set from the four corners in clockwise order
    pub fn new(top_left: Point, top_right: Point, bottom_right: Point, bottom_left: Point) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Build from a `[tl, tr, br, bl]` array
    pub fn from_array(points: [Point; 4]) -> Self {
        let [tl, tr, br, bl] = points;
        Self::new(tl, tr, br, bl)
    }

    /// Corners as a `[tl, tr, br, bl]` array
    pub fn as_array(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// True if adjacent corners coincide, any corner is non-finite,
    /// or the quad has (near) zero area.
    pub fn is_degenerate(&self) -> bool {
        let pts = self.as_array();
        if pts.iter().any(|p| !p.is_finite()) {
            return true;
        }
        for i in 0..4 {
            if pts[i].distance(&pts[(i + 1) % 4]) < MIN_EDGE_PX {
                return true;
            }
        }
        self.area().abs() < MIN_EDGE_PX
    }

    /// Signed shoelace area; positive for clockwise order in image coordinates
    pub fn area(&self) -> f32 {
        let pts = self.as_array();
        let mut sum = 0.0f32;
        for i in 0..4 {
            let a = pts[i];
            let b = pts[(i + 1) % 4];
            sum += a.x * b.y - b.x * a.y;
        }
        sum / 2.0
    }
}
