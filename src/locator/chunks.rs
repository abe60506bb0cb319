use crate::models::{Chunk, ChunkKind};

const ALPHANUMERIC_EXTRA: &str = " $%*+-./:";

fn is_alphanumeric_char(c: char) -> bool {
    c.is_ascii_digit() || c.is_ascii_uppercase() || ALPHANUMERIC_EXTRA.contains(c)
}

/// Narrowest QR mode able to carry `text`
pub fn classify(text: &str) -> ChunkKind {
    if text.chars().all(|c| c.is_ascii_digit()) {
        ChunkKind::Numeric
    } else if text.chars().all(is_alphanumeric_char) {
        ChunkKind::Alphanumeric
    } else {
        ChunkKind::Byte
    }
}

/// Single-chunk list for collaborators that do not report segments.
///
/// This names the narrowest mode the text fits, which is what encoders
/// pick for single-segment payloads; a symbol that was encoded in a wider
/// mode on purpose is reported with the narrower one.
pub fn chunks_for_payload(text: &str) -> Vec<Chunk> {
    if text.is_empty() {
        return Vec::new();
    }
    vec![Chunk::new(classify(text), text)]
}
