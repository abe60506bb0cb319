//! Format information decoding
//!
//! - Module sampling through the bilinear grid mapper
//! - Format codeword assembly and unmasking (mask pattern, EC level)
//! - BCH(15,5) codeword table for read-quality diagnostics

/// BCH(15,5) format codeword table and distance check
pub mod bch;
/// Format information extraction (mask pattern, EC level)
pub mod format;
/// Module sampling from RGBA pixels
pub mod sampler;

pub use format::{FORMAT_INFO_MASK, FormatInfo, decode_format};
