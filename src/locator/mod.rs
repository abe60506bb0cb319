//! Seam to the external QR decoding collaborator
//!
//! The core never finds or decodes symbols itself. A [`SymbolLocator`]
//! hands back the payload, the version and the corner geometry; the core
//! re-derives the format information from the pixels.

/// Payload to chunk classification
pub mod chunks;
/// `rqrr` backed locator
pub mod rqrr;

pub use self::rqrr::RqrrLocator;

use crate::models::{Chunk, CornerSet, ECLevel, MaskPattern, RgbaView};

/// Format fields as reported by the collaborator, when it exposes them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatHint {
    /// Error correction level
    pub ec_level: ECLevel,
    /// Data mask pattern
    pub mask_pattern: MaskPattern,
}

/// A symbol found and decoded by the collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedSymbol {
    /// Decoded payload text
    pub text: String,
    /// Raw payload bytes
    pub bytes: Vec<u8>,
    /// Payload segments
    pub chunks: Vec<Chunk>,
    /// Version number as reported; validated by the caller
    pub version: usize,
    /// Symbol corners, clockwise from top-left
    pub corners: CornerSet,
    /// Collaborator's own format reading, if any
    pub format_hint: Option<FormatHint>,
}

/// Finds and decodes one QR symbol in an RGBA frame
pub trait SymbolLocator {
    /// First decodable symbol in `image`, `None` if there is none
    fn locate(&self, image: RgbaView<'_>) -> Option<LocatedSymbol>;
}

impl<F> SymbolLocator for F
where
    F: Fn(RgbaView<'_>) -> Option<LocatedSymbol>,
{
    fn locate(&self, image: RgbaView<'_>) -> Option<LocatedSymbol> {
        self(image)
    }
}
