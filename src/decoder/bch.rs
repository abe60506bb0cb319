//! BCH(15,5) format-information codewords

use crate::decoder::format::FORMAT_INFO_MASK;
use crate::models::{ECLevel, MaskPattern};

/// Generator polynomial x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
const GENERATOR: u16 = 0x537;

/// Masked codeword for a 5-bit data field (`ec_field << 3 | mask`)
const fn encode_data(data: u16) -> u16 {
    let data = data & 0x1F;
    let mut rem = data << 10;
    let mut i = 14;
    while i >= 10 {
        if rem & (1 << i) != 0 {
            rem ^= GENERATOR << (i - 10);
        }
        i -= 1;
    }
    ((data << 10) | rem) ^ FORMAT_INFO_MASK
}

const fn build_table() -> [u16; 32] {
    let mut table = [0u16; 32];
    let mut data = 0;
    while data < 32 {
        table[data] = encode_data(data as u16);
        data += 1;
    }
    table
}

/// All 32 valid masked format codewords, indexed by 5-bit data field
pub const VALID_FORMAT_CODEWORDS: [u16; 32] = build_table();

/// Masked format codeword as it appears in the symbol
pub fn encode_format(ec_level: ECLevel, mask: MaskPattern) -> u16 {
    let data = ((ec_level.format_field() << 3) | mask.index()) as u16;
    VALID_FORMAT_CODEWORDS[data as usize]
}

/// Hamming distance from `raw` to the closest valid codeword
pub fn nearest_distance(raw: u16) -> u32 {
    VALID_FORMAT_CODEWORDS
        .iter()
        .map(|&c| ((raw ^ c) & 0x7FFF).count_ones())
        .min()
        .unwrap_or(15)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codewords() {
        assert_eq!(encode_format(ECLevel::M, MaskPattern::Pattern0), 0x5412);
        assert_eq!(encode_format(ECLevel::L, MaskPattern::Pattern0), 0x77C4);
    }

    #[test]
    fn test_table_is_distinct_and_clean() {
        for (i, &a) in VALID_FORMAT_CODEWORDS.iter().enumerate() {
            assert_eq!(nearest_distance(a), 0);
            assert!(a < 0x8000);
            for &b in &VALID_FORMAT_CODEWORDS[i + 1..] {
                assert!((a ^ b).count_ones() >= 7);
            }
        }
    }

    #[test]
    fn test_single_flip_distance() {
        let word = encode_format(ECLevel::Q, MaskPattern::Pattern6);
        for bit in 0..15 {
            assert_eq!(nearest_distance(word ^ (1 << bit)), 1);
        }
    }
}
