//! Sign-based ray classification codes.
//!
//! Each axis contributes a (negative, non-zero) bit pair, packed MSB-first
//! in X, Y, Z order:
//!
//! ```text
//! bit 5  X negative      bit 4  X non-zero
//! bit 3  Y negative      bit 2  Y non-zero
//! bit 1  Z negative      bit 0  Z non-zero
//! ```
//!
//! A negative component sets both bits of its pair, a positive one only the
//! non-zero bit, and a zero (or NaN) component neither. So `MMM` (all
//! negative) is `0b111111` and `PMO` is `0b011100`.
//!
//! NaN components classify as zero. Intersection tests key off the
//! non-zero bit to skip whole families of slab tests, so this must not
//! change.

use std::fmt;

use raymesh_math::Vec3;

/// Sign of a direction component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisSign {
    /// Strictly negative (`M`).
    Negative,
    /// Zero, negative zero or NaN (`O`).
    Zero,
    /// Strictly positive (`P`).
    Positive,
}

impl AxisSign {
    /// Classify a single direction component.
    #[inline]
    pub fn of(component: f64) -> Self {
        if component < 0.0 {
            AxisSign::Negative
        } else if component > 0.0 {
            AxisSign::Positive
        } else {
            AxisSign::Zero
        }
    }

    /// Letter used in classification labels.
    pub fn letter(self) -> char {
        match self {
            AxisSign::Negative => 'M',
            AxisSign::Zero => 'O',
            AxisSign::Positive => 'P',
        }
    }

    #[inline]
    fn bits(self) -> u8 {
        match self {
            AxisSign::Negative => 0b11,
            AxisSign::Positive => 0b01,
            AxisSign::Zero => 0b00,
        }
    }
}

/// 6-bit ray classification code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification(u8);

impl Classification {
    /// Mask of the bits in use.
    pub const MASK: u8 = 0b11_1111;

    /// Classify a direction vector.
    pub fn from_direction(direction: &Vec3) -> Self {
        Self::from_signs([
            AxisSign::of(direction.x),
            AxisSign::of(direction.y),
            AxisSign::of(direction.z),
        ])
    }

    /// Pack per-axis signs (X, Y, Z).
    pub fn from_signs(signs: [AxisSign; 3]) -> Self {
        let code = signs
            .iter()
            .fold(0u8, |code, sign| (code << 2) | sign.bits());
        Self(code)
    }

    /// Wrap a raw code. Bits above bit 5 are dropped.
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    /// The raw 6-bit code.
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    fn pair(self, axis: usize) -> u8 {
        debug_assert!(axis < 3);
        (self.0 >> ((2 - axis) * 2)) & 0b11
    }

    /// Whether the direction component on `axis` (0 = X) is negative.
    pub fn is_negative(self, axis: usize) -> bool {
        self.pair(axis) & 0b10 != 0
    }

    /// Whether the direction component on `axis` (0 = X) is non-zero.
    pub fn is_nonzero(self, axis: usize) -> bool {
        self.pair(axis) & 0b01 != 0
    }

    /// Sign on `axis` (0 = X).
    pub fn sign(self, axis: usize) -> AxisSign {
        match (self.is_negative(axis), self.is_nonzero(axis)) {
            (true, _) => AxisSign::Negative,
            (false, true) => AxisSign::Positive,
            (false, false) => AxisSign::Zero,
        }
    }

    /// Three-letter label such as `MPO`.
    pub fn label(self) -> String {
        (0..3).map(|axis| self.sign(axis).letter()).collect()
    }
}

impl From<Classification> for u8 {
    fn from(c: Classification) -> u8 {
        c.0
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#08b})", self.label(), self.0)
    }
}
