//! Free functions over plain vectors and matrices
//!
//! Small helpers used by layer implementations next to [`Matrix`]:
//! identity construction, slice dot products and the cut-point search over a
//! sorted score distribution.

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// `dim x dim` identity matrix
///
/// ```
/// use mlmatrix::{identity, Matrix};
///
/// let id = identity::<i32>(2);
/// assert_eq!(id, Matrix::from_rows(&[vec![1, 0], vec![0, 1]]).unwrap());
/// ```
pub fn identity<T: Element>(dim: usize) -> Matrix<T> {
    Matrix::identity(dim)
}

/// Inner product of two equally long slices
///
/// Without `clip` the sum is accumulated in `T` with its native arithmetic.
/// With `clip` the exact sum is saturated once to `[T::MIN, T::MAX]`, so
/// integer and fixed point types cannot overflow and in-range results keep
/// every bit.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the lengths differ.
///
/// ```
/// use mlmatrix::dot_prod;
///
/// assert_eq!(dot_prod(&[1, 2, 3], &[4, 5, 6], false).unwrap(), 32);
/// assert!(dot_prod(&[1, 2], &[1, 2, 3], false).is_err());
/// ```
pub fn dot_prod<T: Element>(a: &[T], b: &[T], clip: bool) -> Result<T> {
    if a.len() != b.len() {
        return Err(Error::dimension_mismatch("dot_prod", (a.len(), 1), (b.len(), 1)));
    }

    if !clip {
        return Ok(a.iter().zip(b).fold(T::zero(), |acc, (&x, &y)| acc + x * y));
    }

    let (sum, saturated) = clipped_dot(a, b);
    if saturated {
        log::trace!("dot_prod: saturated sum to {sum:?} ({})", T::DTYPE);
    }
    Ok(sum)
}

/// Sum of `a[i] * b[i]` clamped once to `[T::MIN, T::MAX]`
///
/// Integer and fixed point elements accumulate exactly in i128; floats, and
/// integer sums that leave the i128 range, accumulate in f64. The flag
/// reports whether the result was clamped.
pub(crate) fn clipped_dot<T: Element>(a: &[T], b: &[T]) -> (T, bool) {
    let wide = a.iter().zip(b).try_fold(0i128, |acc, (x, y)| {
        acc.checked_add(x.to_wide()?.checked_mul(y.to_wide()?)?)
    });
    if let Some(sum) = wide {
        return T::from_wide_product(sum);
    }

    let sum: f64 = a.iter().zip(b).map(|(x, y)| x.to_f64() * y.to_f64()).sum();
    let saturated = sum < T::MIN.to_f64() || sum > T::MAX.to_f64();
    (T::saturating_from_f64(sum), saturated)
}

/// Index `i` maximizing `|v[i] - v[i + 1]|`
///
/// Meant for a slice sorted in descending order, typically the output of
/// [`Matrix::sort_values`]: the result is the natural cut point between the
/// high and low values. The ordering is a precondition and is not checked.
/// Ties keep the first index. Returns `None` when `v` has fewer than two
/// elements.
///
/// ```
/// use mlmatrix::index_max_diff;
///
/// assert_eq!(index_max_diff(&[9, 7, 6, 2, 1]), Some(2));
/// ```
pub fn index_max_diff<T: Element>(v: &[T]) -> Option<usize> {
    v.windows(2)
        .map(|w| (w[0].to_f64() - w[1].to_f64()).abs())
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
            Some((_, bd)) if d <= bd => best,
            _ => Some((i, d)),
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::Q16;

    #[test]
    fn test_identity() {
        let id = identity::<f32>(3);
        assert_eq!(id.shape(), (3, 3));
        assert_eq!(id.l0_norm(), 3);
        assert_eq!(id.diag_vec(), vec![1.0; 3]);
        assert!(identity::<u8>(0).is_empty());
    }

    #[test]
    fn test_dot_prod() {
        assert_eq!(dot_prod(&[1, 2, 3], &[4, 5, 6], false).unwrap(), 32);
        assert_eq!(dot_prod::<f64>(&[], &[], false).unwrap(), 0.0);
        assert_eq!(
            dot_prod(&[1, 2], &[1], false).unwrap_err(),
            Error::dimension_mismatch("dot_prod", (2, 1), (1, 1))
        );
    }

    #[test]
    fn test_dot_prod_clip() {
        assert_eq!(dot_prod(&[100i8, 100], &[2, 2], true).unwrap(), i8::MAX);
        assert_eq!(dot_prod(&[-100i8, -100], &[2, 2], true).unwrap(), i8::MIN);
        assert_eq!(dot_prod(&[10u8, 3], &[2, 2], true).unwrap(), 26);
        // Intermediate overflow that cancels out is fine
        assert_eq!(dot_prod(&[100i8, -100], &[2, 2], true).unwrap(), 0);

        let q = [Q16::from_f64(200.0); 2];
        assert_eq!(dot_prod(&q, &q, true).unwrap(), Q16::MAX);
    }

    #[test]
    fn test_dot_prod_clip_is_exact_for_wide_integers() {
        let x = 3_037_000_499i64;
        assert_eq!(dot_prod(&[x], &[x], true).unwrap(), 9_223_372_030_926_249_001);
        assert_eq!(dot_prod(&[x, 1], &[x, 1], true).unwrap(), 9_223_372_030_926_249_002);
        assert_eq!(dot_prod(&[i64::MAX, 2], &[2, -i64::MAX], true).unwrap(), 0);
        assert_eq!(dot_prod(&[u64::MAX], &[u64::MAX], true).unwrap(), u64::MAX);
        assert_eq!(dot_prod(&[u64::MAX, 1], &[1, 1], true).unwrap(), u64::MAX);
    }

    #[test]
    fn test_index_max_diff() {
        assert_eq!(index_max_diff(&[9, 7, 6, 2, 1]), Some(2));
        assert_eq!(index_max_diff(&[0.9f32, 0.85, 0.2, 0.1]), Some(1));
        // ties keep the first index
        assert_eq!(index_max_diff(&[5, 3, 1]), Some(0));
        assert_eq!(index_max_diff(&[4, 4, 4]), Some(0));
        assert_eq!(index_max_diff::<i32>(&[1]), None);
        assert_eq!(index_max_diff::<i32>(&[]), None);
    }

    #[test]
    fn test_index_max_diff_unsigned() {
        // |a - b| must not underflow for unsigned elements
        assert_eq!(index_max_diff(&[1u8, 10, 11]), Some(0));
    }
}
