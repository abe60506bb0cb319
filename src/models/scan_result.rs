use super::{CornerSet, ECLevel, MaskPattern, Version};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Encoding mode of a payload chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    /// Digits only
    Numeric,
    /// Digits, upper-case letters and ` $%*+-./:`
    Alphanumeric,
    /// Arbitrary bytes
    Byte,
    /// Shift JIS double-byte characters
    Kanji,
    /// Extended channel interpretation marker
    Eci,
}

impl ChunkKind {
    /// Lower-case mode name
    pub fn name(&self) -> &'static str {
        match self {
            ChunkKind::Numeric => "numeric",
            ChunkKind::Alphanumeric => "alphanumeric",
            ChunkKind::Byte => "byte",
            ChunkKind::Kanji => "kanji",
            ChunkKind::Eci => "eci",
        }
    }
}

impl fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One encoded segment of the payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// Segment mode
    #[serde(rename = "type")]
    pub kind: ChunkKind,
    /// Segment text
    pub text: String,
}

impl Chunk {
    /// Create a chunk
    pub fn new(kind: ChunkKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Where the reported mask pattern and EC level came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatSource {
    /// Re-derived by sampling the format modules
    #[default]
    Sampled,
    /// Taken from the symbol locator
    Decoder,
}

impl FromStr for FormatSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sampled" | "sample" => Ok(FormatSource::Sampled),
            "decoder" | "library" => Ok(FormatSource::Decoder),
            other => Err(format!("unknown format source `{other}`")),
        }
    }
}

/// Everything known about one inspected symbol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResult {
    /// Decoded payload text
    pub text: String,
    /// Raw payload bytes
    pub bytes: Vec<u8>,
    /// Payload segments
    pub chunks: Vec<Chunk>,
    /// Symbol version
    pub version: Version,
    /// Grid dimension in modules
    pub dimension: usize,
    /// Symbol corners in pixel space
    pub corners: CornerSet,
    /// Estimated module pitch in pixels, rounded to 2 decimals
    pub module_size_px: f32,
    /// Data mask pattern
    pub mask_pattern: MaskPattern,
    /// Error correction level
    pub ec_level: ECLevel,
    /// Sampled 15-bit format codeword before unmasking
    pub format_bits: u16,
    /// Hamming distance from `format_bits` to the nearest valid codeword
    pub format_distance: u32,
    /// Origin of `mask_pattern` and `ec_level`
    pub format_source: FormatSource,
}

impl ScanResult {
    /// Capitalized mode name of the first chunk, `Unknown` without chunks
    pub fn primary_encoding(&self) -> String {
        let Some(chunk) = self.chunks.first() else {
            return "Unknown".to_string();
        };
        let name = chunk.kind.name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Lower-case hex of the first `limit` payload bytes, ` ...` appended when truncated
    pub fn hex_dump(&self, limit: usize) -> String {
        let mut out = self
            .bytes
            .iter()
            .take(limit)
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(" ");
        if self.bytes.len() > limit {
            out.push_str(" ...");
        }
        out
    }
}
