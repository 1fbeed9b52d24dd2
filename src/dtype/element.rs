//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::{Pod, Zeroable};
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

/// Trait for types that can be elements of a numeric matrix
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - Plain value semantics
/// - `Pod + Zeroable` - The backing store is a flat, byte-castable buffer
/// - `Add + Sub + Mul + Div` - Arithmetic operations (Output = Self)
/// - `PartialOrd` - Comparison for min/max, clipping and sorting
///
/// Note: `Neg` is NOT required since unsigned types don't support it.
/// Sign-dependent operations go through `to_f64`/`from_f64`.
pub trait Element:
    Copy
    + Send
    + Sync
    + Pod
    + Zeroable
    + Debug
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + PartialOrd
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Lowest representable value (the most negative finite value for floats)
    const MIN: Self;

    /// Highest representable value
    const MAX: Self;

    /// Convert to f64 for generic numeric operations
    fn to_f64(self) -> f64;

    /// Convert from f64 to this type
    ///
    /// Integer types truncate toward zero and saturate at their bounds;
    /// NaN converts to zero.
    fn from_f64(v: f64) -> Self;

    /// Zero value
    fn zero() -> Self;

    /// One value
    fn one() -> Self;

    /// Convert from f64, clamping to `[MIN, MAX]` first
    ///
    /// Used by the clipped products so that fixed-width types saturate
    /// instead of overflowing.
    #[inline]
    fn saturating_from_f64(v: f64) -> Self {
        let lo = Self::MIN.to_f64();
        let hi = Self::MAX.to_f64();
        if v < lo {
            Self::MIN
        } else if v > hi {
            Self::MAX
        } else {
            Self::from_f64(v)
        }
    }

    /// Largest representable value strictly below `self`
    ///
    /// Returns `self` when nothing lies below it (`MIN`, negative infinity,
    /// NaN).
    fn next_down(self) -> Self;

    /// Exact integer image of the value for widened clipped arithmetic
    ///
    /// `None` for floating point types, whose clipped products go through f64.
    #[inline]
    fn to_wide(self) -> Option<i128> {
        None
    }

    /// Saturating conversion of an exact sum of [`Element::to_wide`] products
    ///
    /// The flag reports whether the value had to be clamped.
    #[inline]
    fn from_wide_product(v: i128) -> (Self, bool) {
        let v = v as f64;
        let saturated = v < Self::MIN.to_f64() || v > Self::MAX.to_f64();
        (Self::saturating_from_f64(v), saturated)
    }

    /// Returns true if the value equals zero
    #[inline]
    fn is_zero(self) -> bool {
        self == Self::zero()
    }

    /// Absolute value as f64
    #[inline]
    fn abs_f64(self) -> f64 {
        self.to_f64().abs()
    }
}

macro_rules! impl_float_element {
    ($t:ty, $dtype:expr) => {
        impl Element for $t {
            const DTYPE: DType = $dtype;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $t
            }

            #[inline]
            fn zero() -> Self {
                0.0
            }

            #[inline]
            fn one() -> Self {
                1.0
            }

            fn next_down(self) -> Self {
                if self.is_nan() || self == <$t>::NEG_INFINITY {
                    return self;
                }
                if self == 0.0 {
                    return -<$t>::from_bits(1);
                }
                let bits = self.to_bits();
                <$t>::from_bits(if self > 0.0 { bits - 1 } else { bits + 1 })
            }
        }
    };
}

macro_rules! impl_int_element {
    ($t:ty, $dtype:expr) => {
        impl Element for $t {
            const DTYPE: DType = $dtype;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                // `as` saturates and maps NaN to 0
                v as $t
            }

            #[inline]
            fn zero() -> Self {
                0
            }

            #[inline]
            fn one() -> Self {
                1
            }

            #[inline]
            fn next_down(self) -> Self {
                self.saturating_sub(1)
            }

            #[inline]
            fn to_wide(self) -> Option<i128> {
                Some(self as i128)
            }

            #[inline]
            fn from_wide_product(v: i128) -> (Self, bool) {
                let clamped = v.clamp(<$t>::MIN as i128, <$t>::MAX as i128);
                (clamped as $t, clamped != v)
            }
        }
    };
}

impl_float_element!(f64, DType::F64);
impl_float_element!(f32, DType::F32);

impl_int_element!(i64, DType::I64);
impl_int_element!(i32, DType::I32);
impl_int_element!(i16, DType::I16);
impl_int_element!(i8, DType::I8);
impl_int_element!(u64, DType::U64);
impl_int_element!(u32, DType::U32);
impl_int_element!(u16, DType::U16);
impl_int_element!(u8, DType::U8);

// Note: bool doesn't implement the arithmetic bounds, so it is not an Element.
// Matrix<bool> supports storage, access, equality and display only.

// ============================================================================
// Fixed point
// ============================================================================

impl Element for super::fixed::Q16 {
    const DTYPE: DType = DType::Q16;
    const MIN: Self = Self(i32::MIN);
    const MAX: Self = Self(i32::MAX);

    #[inline]
    fn to_f64(self) -> f64 {
        self.to_f64()
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        Self::from_f64(v)
    }

    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn one() -> Self {
        Self::ONE
    }

    #[inline]
    fn next_down(self) -> Self {
        Self::from_bits(self.to_bits().saturating_sub(1))
    }

    #[inline]
    fn to_wide(self) -> Option<i128> {
        Some(self.to_bits() as i128)
    }

    // A product of two raw values carries twice the fractional bits
    #[inline]
    fn from_wide_product(v: i128) -> (Self, bool) {
        let raw = v >> Self::FRAC_BITS;
        let clamped = raw.clamp(i32::MIN as i128, i32::MAX as i128);
        (Self::from_bits(clamped as i32), clamped != raw)
    }
}

// ============================================================================
// Half-precision floating point types (requires "f16" feature)
// ============================================================================

#[cfg(feature = "f16")]
impl Element for half::f16 {
    const DTYPE: DType = DType::F16;
    const MIN: Self = half::f16::MIN;
    const MAX: Self = half::f16::MAX;

    #[inline]
    fn to_f64(self) -> f64 {
        self.to_f64()
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        half::f16::from_f64(v)
    }

    #[inline]
    fn zero() -> Self {
        half::f16::ZERO
    }

    #[inline]
    fn one() -> Self {
        half::f16::ONE
    }

    fn next_down(self) -> Self {
        if self.is_nan() || self == half::f16::NEG_INFINITY {
            return self;
        }
        if self == half::f16::ZERO {
            return -half::f16::from_bits(1);
        }
        let bits = self.to_bits();
        half::f16::from_bits(if self > half::f16::ZERO { bits - 1 } else { bits + 1 })
    }
}

#[cfg(feature = "f16")]
impl Element for half::bf16 {
    const DTYPE: DType = DType::BF16;
    const MIN: Self = half::bf16::MIN;
    const MAX: Self = half::bf16::MAX;

    #[inline]
    fn to_f64(self) -> f64 {
        self.to_f64()
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        half::bf16::from_f64(v)
    }

    #[inline]
    fn zero() -> Self {
        half::bf16::ZERO
    }

    #[inline]
    fn one() -> Self {
        half::bf16::ONE
    }

    fn next_down(self) -> Self {
        if self.is_nan() || self == half::bf16::NEG_INFINITY {
            return self;
        }
        if self == half::bf16::ZERO {
            return -half::bf16::from_bits(1);
        }
        let bits = self.to_bits();
        half::bf16::from_bits(if self > half::bf16::ZERO { bits - 1 } else { bits + 1 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::Q16;

    #[test]
    fn test_element_dtype() {
        assert_eq!(f64::DTYPE, DType::F64);
        assert_eq!(f32::DTYPE, DType::F32);
        assert_eq!(i32::DTYPE, DType::I32);
        assert_eq!(u8::DTYPE, DType::U8);
        assert_eq!(Q16::DTYPE, DType::Q16);
    }

    #[test]
    fn test_element_conversions() {
        assert_eq!(f32::from_f64(2.5).to_f64(), 2.5f32 as f64);
        assert_eq!(i32::from_f64(42.9), 42);
        assert_eq!(i32::from_f64(-42.9), -42);
        assert_eq!(u8::from_f64(-3.0), 0);
        assert_eq!(i16::from_f64(f64::NAN), 0);
    }

    #[test]
    fn test_saturating_from_f64() {
        assert_eq!(i8::saturating_from_f64(1000.0), i8::MAX);
        assert_eq!(i8::saturating_from_f64(-1000.0), i8::MIN);
        assert_eq!(u16::saturating_from_f64(-1.0), 0);
        assert_eq!(i16::saturating_from_f64(123.0), 123);
        // Float bounds are the finite extremes, not the smallest positive value
        assert_eq!(f32::saturating_from_f64(f64::INFINITY), f32::MAX);
        assert_eq!(f32::saturating_from_f64(f64::NEG_INFINITY), f32::MIN);
        assert_eq!(f32::saturating_from_f64(-1.5), -1.5);
    }

    #[test]
    fn test_next_down() {
        assert_eq!(1.0f32.next_down(), 1.0 - f32::EPSILON / 2.0);
        assert!(0.0f64.next_down() < 0.0);
        assert!((-1.0f64).next_down() < -1.0);
        assert_eq!(f32::MIN.next_down(), f32::NEG_INFINITY);
        assert_eq!(10u8.next_down(), 9);
        assert_eq!(i8::MIN.next_down(), i8::MIN);
        assert_eq!(Q16::ONE.next_down(), Q16::from_bits(Q16::ONE.to_bits() - 1));
    }

    #[test]
    fn test_wide_products_are_exact() {
        let x = 3_037_000_499i64;
        let (p, saturated) = i64::from_wide_product(x.to_wide().unwrap() * x.to_wide().unwrap());
        assert_eq!(p, 9_223_372_030_926_249_001);
        assert!(!saturated);

        assert_eq!(u8::from_wide_product(300), (u8::MAX, true));
        assert_eq!(i8::from_wide_product(-300), (i8::MIN, true));
        assert_eq!(f32::to_wide(1.5), None);

        let half = Q16::from_f64(0.5).to_wide().unwrap();
        assert_eq!(Q16::from_wide_product(half * half), (Q16::from_f64(0.25), false));
    }

    #[test]
    fn test_is_zero_and_abs() {
        assert!(0i32.is_zero());
        assert!((-0.0f32).is_zero());
        assert!(!1u8.is_zero());
        assert_eq!((-3i32).abs_f64(), 3.0);
        assert_eq!(7u8.abs_f64(), 7.0);
    }
}
