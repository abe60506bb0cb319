/// Four-corner symbol geometry
pub mod corners;
/// Packed module grid
pub mod matrix;
/// Borrowed RGBA pixel view
pub mod pixels;
/// 2D pixel point
pub mod point;
/// Inspection result and payload chunks
pub mod scan_result;
/// Version, EC level and mask pattern
pub mod symbol;

pub use corners::CornerSet;
pub use matrix::BitMatrix;
pub use pixels::RgbaView;
pub use point::Point;
pub use scan_result::{Chunk, ChunkKind, FormatSource, ScanResult};
pub use symbol::{ECLevel, MaskPattern, Version};
