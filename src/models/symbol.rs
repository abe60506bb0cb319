use super::BitMatrix;
use serde::Serialize;
use std::fmt;

/// QR Model 2 symbol version (1-40)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Version(u8);

impl Version {
    /// Smallest Model 2 version
    pub const MIN: u8 = 1;
    /// Largest Model 2 version
    pub const MAX: u8 = 40;

    /// Create a version, `None` outside 1-40
    pub fn new(number: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&number).then_some(Self(number))
    }

    /// Create from a wider integer, `None` outside 1-40
    pub fn from_number(number: usize) -> Option<Self> {
        u8::try_from(number).ok().and_then(Self::new)
    }

    /// Version number
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Grid dimension in modules (`4 * version + 17`)
    pub fn size(&self) -> usize {
        4 * self.0 as usize + 17
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L,
    /// Medium (~15% recovery capacity)
    M,
    /// Quartile (~25% recovery capacity)
    Q,
    /// High (~30% recovery capacity)
    H,
}

impl ECLevel {
    /// All levels in order of increasing strength
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Level from the 2-bit format-information field.
    ///
    /// The field is not ordered by strength: 00=M, 01=L, 10=H, 11=Q.
    pub fn from_format_field(bits: u8) -> Self {
        match bits & 0x03 {
            0 => ECLevel::M,
            1 => ECLevel::L,
            2 => ECLevel::H,
            _ => ECLevel::Q,
        }
    }

    /// The 2-bit format-information field for this level
    pub fn format_field(&self) -> u8 {
        match self {
            ECLevel::M => 0,
            ECLevel::L => 1,
            ECLevel::H => 2,
            ECLevel::Q => 3,
        }
    }

    /// Approximate share of codewords that can be restored
    pub fn recovery_percent(&self) -> u8 {
        match self {
            ECLevel::L => 7,
            ECLevel::M => 15,
            ECLevel::Q => 25,
            ECLevel::H => 30,
        }
    }

    /// Single-letter label
    pub fn label(&self) -> &'static str {
        match self {
            ECLevel::L => "L",
            ECLevel::M => "M",
            ECLevel::Q => "Q",
            ECLevel::H => "H",
        }
    }

    /// Human readable description, e.g. `Low (~7%)`
    pub fn description(&self) -> String {
        let name = match self {
            ECLevel::L => "Low",
            ECLevel::M => "Medium",
            ECLevel::Q => "Quartile",
            ECLevel::H => "High",
        };
        format!("{} (~{}%)", name, self.recovery_percent())
    }
}

impl fmt::Display for ECLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Data mask pattern (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum MaskPattern {
    /// (i + j) % 2 == 0
    Pattern0 = 0,
    /// i % 2 == 0
    Pattern1 = 1,
    /// j % 3 == 0
    Pattern2 = 2,
    /// (i + j) % 3 == 0
    Pattern3 = 3,
    /// (i/2 + j/3) % 2 == 0
    Pattern4 = 4,
    /// (i*j)%2 + (i*j)%3 == 0
    Pattern5 = 5,
    /// ((i*j)%2 + (i*j)%3) % 2 == 0
    Pattern6 = 6,
    /// ((i+j)%2 + (i*j)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// All eight patterns in index order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Pattern from the low 3 bits of `bits`
    pub fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0x07) as usize]
    }

    /// Pattern index 0-7
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Whether the module at row `i`, column `j` is inverted by this mask
    pub fn is_masked(&self, i: usize, j: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (i + j) % 2 == 0,
            MaskPattern::Pattern1 => i % 2 == 0,
            MaskPattern::Pattern2 => j % 3 == 0,
            MaskPattern::Pattern3 => (i + j) % 3 == 0,
            MaskPattern::Pattern4 => (i / 2 + j / 3) % 2 == 0,
            MaskPattern::Pattern5 => ((i * j) % 2 + (i * j) % 3) == 0,
            MaskPattern::Pattern6 => (((i * j) % 2) + ((i * j) % 3)) % 2 == 0,
            MaskPattern::Pattern7 => (((i + j) % 2) + ((i * j) % 3)) % 2 == 0,
        }
    }

    /// Render the top-left `size x size` corner of the mask for display
    pub fn preview(&self, size: usize) -> BitMatrix {
        BitMatrix::from_fn(size, |col, row| self.is_masked(row, col))
    }
}

impl From<MaskPattern> for u8 {
    fn from(mask: MaskPattern) -> Self {
        mask.index()
    }
}

impl fmt::Display for MaskPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}
