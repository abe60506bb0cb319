//! qr_inspect - QR code inspection
//!
//! Decodes a QR code from an RGBA frame and reports, besides the payload,
//! the symbol's structural parameters: version and grid dimension, error
//! correction level, data mask pattern and the raw 15-bit format codeword.
//!
//! Locating and decoding the symbol is delegated to a [`SymbolLocator`]
//! (by default [`RqrrLocator`]). The mask pattern and EC level are then
//! re-derived from the pixels: the module grid is mapped onto the image
//! bilinearly from the symbol's corners, the 15 format modules next to the
//! top-left finder are sampled, and the codeword is unmasked.
//!
//! ```no_run
//! let (rgba, width, height) = qr_inspect::tools::load_rgba("code.png")?;
//! if let Some(result) = qr_inspect::scan(&rgba, width, height) {
//!     println!("v{} {} mask {}", result.version, result.ec_level, result.mask_pattern);
//! }
//! # Ok::<(), qr_inspect::InspectError>(())
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Inspection settings (environment driven)
pub mod config;
/// Format information decoding (sampling, unmasking, BCH diagnostics)
pub mod decoder;
/// Error types
pub mod error;
/// Seam to the external QR decoding collaborator
pub mod locator;
/// Core data structures (Point, CornerSet, ScanResult, etc.)
pub mod models;
/// Image I/O and synthetic symbols for the CLI, tests and benches
pub mod tools;
/// Utility functions (geometry, grayscale)
pub mod utils;

pub use config::ScanConfig;
pub use decoder::{FormatInfo, decode_format};
pub use error::{InspectError, Result};
pub use locator::{FormatHint, LocatedSymbol, RqrrLocator, SymbolLocator};
pub use models::{
    BitMatrix, Chunk, ChunkKind, CornerSet, ECLevel, FormatSource, MaskPattern, Point, RgbaView,
    ScanResult, Version,
};
pub use utils::geometry::GridMapper;

use rayon::prelude::*;
use utils::geometry::round_to_hundredths;

/// Inspect an RGBA frame with the default locator and environment settings.
///
/// `Ok(None)` when no decodable symbol is present.
pub fn try_scan(pixels: &[u8], width: usize, height: usize) -> Result<Option<ScanResult>> {
    Inspector::new().inspect(pixels, width, height)
}

/// Like [`try_scan`], but malformed input is logged and reported as `None`
pub fn scan(pixels: &[u8], width: usize, height: usize) -> Option<ScanResult> {
    match try_scan(pixels, width, height) {
        Ok(result) => result,
        Err(err) => {
            log::warn!("scan rejected input: {err}");
            None
        }
    }
}

/// Decode only the format information, using caller-supplied geometry.
///
/// Useful with hand-labelled corners when the locator cannot find the
/// symbol. `version` must be 1-40.
pub fn read_format(
    pixels: &[u8],
    width: usize,
    height: usize,
    corners: CornerSet,
    version: usize,
) -> Result<FormatInfo> {
    let view = RgbaView::new(pixels, width, height)?;
    let version = Version::from_number(version).ok_or(InspectError::InvalidVersion(version))?;
    let mapper = GridMapper::new(corners, version.size());
    Ok(decode_format(view, &mapper))
}

/// One borrowed RGBA frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// RGBA bytes, row-major
    pub pixels: &'a [u8],
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

impl<'a> Frame<'a> {
    /// Create a frame
    pub fn new(pixels: &'a [u8], width: usize, height: usize) -> Self {
        Self {
            pixels,
            width,
            height,
        }
    }
}

/// Locator plus settings; holds no per-scan state
#[derive(Debug, Clone)]
pub struct Inspector<L = RqrrLocator> {
    locator: L,
    config: ScanConfig,
}

impl Inspector<RqrrLocator> {
    /// `rqrr` locator with settings from the environment
    pub fn new() -> Self {
        Self::with_locator(RqrrLocator::new())
    }
}

impl Default for Inspector<RqrrLocator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: SymbolLocator> Inspector<L> {
    /// Use a custom locator, settings from the environment
    pub fn with_locator(locator: L) -> Self {
        Self {
            locator,
            config: ScanConfig::from_env(),
        }
    }

    /// Replace the settings
    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    /// Current settings
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Inspect one frame. `Ok(None)` when no symbol is found.
    pub fn inspect(&self, pixels: &[u8], width: usize, height: usize) -> Result<Option<ScanResult>> {
        let view = RgbaView::new(pixels, width, height)?;
        self.inspect_view(view)
    }

    /// Inspect an already validated view
    pub fn inspect_view(&self, view: RgbaView<'_>) -> Result<Option<ScanResult>> {
        let Some(symbol) = self.locator.locate(view) else {
            log::debug!("no symbol in {}x{} frame", view.width(), view.height());
            return Ok(None);
        };
        self.assemble(view, symbol).map(Some)
    }

    /// Scan frames in order and stop at the first one holding a symbol.
    ///
    /// Returns the frame index with the result. Frames with malformed
    /// buffers are skipped with a warning.
    pub fn inspect_until_found<'a, I>(&self, frames: I) -> Option<(usize, ScanResult)>
    where
        I: IntoIterator<Item = Frame<'a>>,
    {
        for (idx, frame) in frames.into_iter().enumerate() {
            match self.inspect(frame.pixels, frame.width, frame.height) {
                Ok(Some(result)) => return Some((idx, result)),
                Ok(None) => {}
                Err(err) => log::warn!("frame {idx} skipped: {err}"),
            }
        }
        None
    }

    fn assemble(&self, view: RgbaView<'_>, symbol: LocatedSymbol) -> Result<ScanResult> {
        let version = Version::from_number(symbol.version)
            .ok_or(InspectError::InvalidVersion(symbol.version))?;
        let dimension = version.size();

        if symbol.corners.is_degenerate() {
            log::warn!("degenerate corner set {:?}, sampling anyway", symbol.corners);
        }

        let mapper = GridMapper::new(symbol.corners, dimension);
        let sampled = decode_format(view, &mapper);

        if let Some(hint) = symbol.format_hint {
            if hint.ec_level != sampled.ec_level || hint.mask_pattern != sampled.mask_pattern {
                log::debug!(
                    "format mismatch: locator {}/{} vs sampled {}/{} (raw 0x{:04X})",
                    hint.ec_level,
                    hint.mask_pattern,
                    sampled.ec_level,
                    sampled.mask_pattern,
                    sampled.raw_bits
                );
            }
        }

        let (ec_level, mask_pattern, format_source) =
            match (self.config.format_source, symbol.format_hint) {
                (FormatSource::Decoder, Some(hint)) => {
                    (hint.ec_level, hint.mask_pattern, FormatSource::Decoder)
                }
                _ => (sampled.ec_level, sampled.mask_pattern, FormatSource::Sampled),
            };

        Ok(ScanResult {
            text: symbol.text,
            bytes: symbol.bytes,
            chunks: symbol.chunks,
            version,
            dimension,
            corners: symbol.corners,
            module_size_px: round_to_hundredths(mapper.module_pitch()),
            mask_pattern,
            ec_level,
            format_bits: sampled.raw_bits,
            format_distance: sampled.distance,
            format_source,
        })
    }
}

impl<L: SymbolLocator + Sync> Inspector<L> {
    /// Inspect independent frames in parallel; results keep the input order
    pub fn inspect_frames(&self, frames: &[Frame<'_>]) -> Vec<Result<Option<ScanResult>>> {
        frames
            .par_iter()
            .map(|frame| self.inspect(frame.pixels, frame.width, frame.height))
            .collect()
    }
}
