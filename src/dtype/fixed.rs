//! Q16.16 fixed point element type
//!
//! Microcontrollers without a floating point unit usually run small models in
//! fixed point. `Q16` stores a signed value in 32 bits with 16 fractional bits:
//!
//! - Range: [-32768.0, 32767.99998]
//! - Resolution: 2^-16 ≈ 0.0000153
//!
//! Addition and subtraction wrap on overflow like release-mode integer
//! arithmetic. Multiplication and division are computed in 64 bits and
//! truncated toward zero. Use the clipped matrix products when saturation is
//! wanted.
//!
//! # Example
//!
//! ```
//! use mlmatrix::dtype::Q16;
//!
//! let a = Q16::from_f32(1.5);
//! let b = Q16::from_f32(2.0);
//! assert_eq!((a * b).to_f32(), 3.0);
//! ```

use bytemuck::{Pod, Zeroable};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Signed Q16.16 fixed point number.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Q16(pub i32);

// Safety: Q16 is a transparent wrapper around i32, which is Pod
unsafe impl Pod for Q16 {}
unsafe impl Zeroable for Q16 {}

impl Q16 {
    /// Number of fractional bits
    pub const FRAC_BITS: u32 = 16;
    /// Zero value
    pub const ZERO: Self = Self(0);
    /// One value
    pub const ONE: Self = Self(1 << Self::FRAC_BITS);
    /// Negative one
    pub const NEG_ONE: Self = Self(-(1 << Self::FRAC_BITS));
    /// Lowest representable value (-32768.0)
    pub const MIN: Self = Self(i32::MIN);
    /// Highest representable value (~32767.99998)
    pub const MAX: Self = Self(i32::MAX);
    /// Smallest positive value (2^-16)
    pub const EPSILON: Self = Self(1);

    const SCALE: f64 = (1u32 << Self::FRAC_BITS) as f64;

    /// Create from raw bits
    #[inline]
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// Get raw bits
    #[inline]
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Create from an integer, saturating at the representable range
    #[inline]
    pub fn from_int(v: i32) -> Self {
        Self::from_f64(v as f64)
    }

    /// Convert from f64, rounding to nearest and saturating
    ///
    /// NaN converts to zero.
    #[inline]
    pub fn from_f64(x: f64) -> Self {
        // float -> int `as` saturates and maps NaN to 0
        Self((x * Self::SCALE).round() as i32)
    }

    /// Convert to f64 (exact)
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE
    }

    /// Convert from f32, rounding to nearest and saturating
    #[inline]
    pub fn from_f32(x: f32) -> Self {
        Self::from_f64(x as f64)
    }

    /// Convert to f32
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    /// Absolute value, saturating at `MAX` for `MIN`
    #[inline]
    pub fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Saturating addition
    #[inline]
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction
    #[inline]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// Saturating multiplication
    #[inline]
    pub fn saturating_mul(self, rhs: Self) -> Self {
        let wide = (self.0 as i64 * rhs.0 as i64) >> Self::FRAC_BITS;
        Self(wide.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
    }
}

impl fmt::Debug for Q16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q16({})", self.to_f64())
    }
}

impl fmt::Display for Q16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f64(), f)
    }
}

impl PartialOrd for Q16 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Q16 {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Add for Q16 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Q16 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }
}

impl Mul for Q16 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let wide = (self.0 as i64 * rhs.0 as i64) / (1i64 << Self::FRAC_BITS);
        Self(wide as i32)
    }
}

impl Div for Q16 {
    type Output = Self;
    /// # Panics
    ///
    /// Panics if `rhs` is zero, like integer division.
    #[inline]
    fn div(self, rhs: Self) -> Self {
        let wide = ((self.0 as i64) << Self::FRAC_BITS) / rhs.0 as i64;
        Self(wide as i32)
    }
}

impl Neg for Q16 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self(self.0.wrapping_neg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_q16_constants() {
        assert_eq!(Q16::ZERO.to_f64(), 0.0);
        assert_eq!(Q16::ONE.to_f64(), 1.0);
        assert_eq!(Q16::NEG_ONE.to_f64(), -1.0);
        assert_eq!(Q16::MIN.to_f64(), -32768.0);
        assert!(Q16::MAX.to_f64() > 32767.99);
        assert_eq!(Q16::EPSILON.to_f64(), 1.0 / 65536.0);
    }

    #[test]
    fn test_q16_conversions() {
        assert_eq!(Q16::from_f32(0.5).to_bits(), 0x8000);
        assert_eq!(Q16::from_f64(-2.25).to_f64(), -2.25);
        assert_eq!(Q16::from_int(3), Q16::from_f64(3.0));
        // Saturation and NaN
        assert_eq!(Q16::from_f64(1.0e9), Q16::MAX);
        assert_eq!(Q16::from_f64(-1.0e9), Q16::MIN);
        assert_eq!(Q16::from_f64(f64::NAN), Q16::ZERO);
    }

    #[test]
    fn test_q16_arithmetic() {
        let a = Q16::from_f64(1.5);
        let b = Q16::from_f64(-0.25);
        assert_eq!((a + b).to_f64(), 1.25);
        assert_eq!((a - b).to_f64(), 1.75);
        assert_eq!((a * b).to_f64(), -0.375);
        assert_eq!((a / b).to_f64(), -6.0);
        assert_eq!((-a).to_f64(), -1.5);
        assert_eq!(b.abs().to_f64(), 0.25);
    }

    #[test]
    fn test_q16_saturating() {
        let big = Q16::from_f64(30000.0);
        assert_eq!(big.saturating_add(big), Q16::MAX);
        assert_eq!((-big).saturating_sub(big), Q16::MIN);
        assert_eq!(big.saturating_mul(big), Q16::MAX);
        assert_eq!(big.saturating_mul(-big), Q16::MIN);
    }

    #[test]
    fn test_q16_ordering_and_display() {
        assert!(Q16::from_f64(-1.0) < Q16::from_f64(0.5));
        assert_eq!(Q16::from_f64(2.5).to_string(), "2.5");
        assert_eq!(format!("{:?}", Q16::ONE), "Q16(1)");
    }
}
