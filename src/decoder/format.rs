//! Format information recovery from the modules around the top-left finder

use crate::decoder::bch;
use crate::decoder::sampler::ModuleSampler;
use crate::models::{ECLevel, MaskPattern, RgbaView};
use crate::utils::geometry::GridMapper;
use serde::Serialize;

/// XOR mask applied to every format codeword (101010000010010)
pub const FORMAT_INFO_MASK: u16 = 0x5412;

/// One format bit and the module that carries it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatBit {
    /// Bit index in the codeword (14 = MSB)
    pub bit: u8,
    /// Module column
    pub col: usize,
    /// Module row
    pub row: usize,
}

const fn fb(bit: u8, col: usize, row: usize) -> FormatBit {
    FormatBit { bit, col, row }
}

/// Format bits next to the top-left finder, MSB first.
///
/// Column 8 top-down, then row 8 right-to-left. (8,6) and (6,8) are
/// timing modules and carry no format data.
pub const FORMAT_BIT_LAYOUT: [FormatBit; 15] = [
    fb(14, 8, 0),
    fb(13, 8, 1),
    fb(12, 8, 2),
    fb(11, 8, 3),
    fb(10, 8, 4),
    fb(9, 8, 5),
    fb(8, 8, 7),
    fb(7, 8, 8),
    fb(6, 7, 8),
    fb(5, 5, 8),
    fb(4, 4, 8),
    fb(3, 3, 8),
    fb(2, 2, 8),
    fb(1, 1, 8),
    fb(0, 0, 8),
];

/// Decoded format information of one symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatInfo {
    /// Error correction level
    pub ec_level: ECLevel,
    /// Data mask pattern
    pub mask_pattern: MaskPattern,
    /// Codeword as sampled, before unmasking
    pub raw_bits: u16,
    /// Hamming distance from `raw_bits` to the nearest valid codeword
    pub distance: u32,
    /// Modules that mapped outside the image and were read as light
    pub clipped: u8,
}

impl FormatInfo {
    /// Unmask a sampled codeword and split it into its fields.
    ///
    /// No error correction is applied; a damaged read produces whatever
    /// the damaged bits say, with `distance` telling how far off it is.
    pub fn from_raw(raw_bits: u16) -> Self {
        let raw_bits = raw_bits & 0x7FFF;
        let unmasked = raw_bits ^ FORMAT_INFO_MASK;
        let ec_field = ((unmasked >> 13) & 0x03) as u8;
        let mask_field = ((unmasked >> 10) & 0x07) as u8;

        Self {
            ec_level: ECLevel::from_format_field(ec_field),
            mask_pattern: MaskPattern::from_bits(mask_field),
            raw_bits,
            distance: bch::nearest_distance(raw_bits),
            clipped: 0,
        }
    }

    /// True if the sampled codeword is exactly a valid one
    pub fn is_clean(&self) -> bool {
        self.distance == 0
    }
}

/// Assemble the 15-bit codeword, returning it with the count of clipped modules
pub fn read_format_bits(sampler: &ModuleSampler<'_>) -> (u16, u8) {
    let mut bits = 0u16;
    let mut clipped = 0u8;
    for FormatBit { bit, col, row } in FORMAT_BIT_LAYOUT {
        match sampler.sample(col, row) {
            Some(dark) => bits |= u16::from(dark) << bit,
            None => clipped += 1,
        }
    }
    (bits, clipped)
}

/// Sample and decode the format information of the symbol under `mapper`.
///
/// Never fails: modules outside the image count as light.
pub fn decode_format(image: RgbaView<'_>, mapper: &GridMapper) -> FormatInfo {
    let sampler = ModuleSampler::new(image, mapper);
    let (raw_bits, clipped) = read_format_bits(&sampler);

    if clipped > 0 {
        log::debug!("format read: {clipped} of 15 modules outside the image, read as light");
    }
    log::debug!("format read: raw=0b{raw_bits:015b} (0x{raw_bits:04X})");

    FormatInfo {
        clipped,
        ..FormatInfo::from_raw(raw_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CornerSet, Point};

    #[test]
    fn test_layout_covers_every_bit_once() {
        let mut seen = 0u16;
        for (i, fbit) in FORMAT_BIT_LAYOUT.iter().enumerate() {
            assert_eq!(fbit.bit as usize, 14 - i);
            seen |= 1 << fbit.bit;
            assert!(fbit.col <= 8 && fbit.row <= 8);
            assert!(!(fbit.col == 6 || fbit.row == 6), "timing module in layout");
        }
        assert_eq!(seen, 0x7FFF);
    }

    #[test]
    fn test_unmask_zero() {
        // 0 ^ 0x5412: ec field 10 (H), mask field 101
        let info = FormatInfo::from_raw(0);
        assert_eq!(info.ec_level, ECLevel::H);
        assert_eq!(info.mask_pattern, MaskPattern::Pattern5);
        assert_eq!(info.raw_bits, 0);
        assert!(!info.is_clean());
    }

    #[test]
    fn test_from_raw_all_valid_codewords() {
        for ec in ECLevel::ALL {
            for mask in MaskPattern::ALL {
                let info = FormatInfo::from_raw(bch::encode_format(ec, mask));
                assert_eq!(info.ec_level, ec);
                assert_eq!(info.mask_pattern, mask);
                assert!(info.is_clean());
            }
        }
    }

    #[test]
    fn test_high_bit_ignored() {
        let word = bch::encode_format(ECLevel::L, MaskPattern::Pattern2);
        assert_eq!(FormatInfo::from_raw(word | 0x8000), FormatInfo::from_raw(word));
    }

    #[test]
    fn test_decode_format_from_pixels() {
        // 21x21 symbol at 1 px per module, only bit 14 (8,0) dark
        let d = 21;
        let mut data = vec![255u8; d * d * 4];
        let offset = 8 * 4;
        data[offset..offset + 3].copy_from_slice(&[0, 0, 0]);
        let view = RgbaView::new(&data, d, d).expect("view");
        let mapper = GridMapper::new(
            CornerSet::new(
                Point::new(0.0, 0.0),
                Point::new(d as f32, 0.0),
                Point::new(d as f32, d as f32),
                Point::new(0.0, d as f32),
            ),
            d,
        );

        let info = decode_format(view, &mapper);
        assert_eq!(info.raw_bits, 1 << 14);
        assert_eq!(info.clipped, 0);
        // (0x4000 ^ 0x5412) >> 13 = 00 -> M, mask 101
        assert_eq!(info.ec_level, ECLevel::M);
        assert_eq!(info.mask_pattern, MaskPattern::Pattern5);
    }
}
