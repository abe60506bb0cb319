//! Utility functions for image processing
//!
//! - Geometry (bilinear module-grid mapping, pitch estimate)
//! - Grayscale conversion (RGBA to luminance for the locator)

/// Bilinear grid mapping
pub mod geometry;
/// RGBA to luminance
pub mod grayscale;
