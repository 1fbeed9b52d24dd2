//! Arithmetic: matrix/matrix, matrix/scalar and matrix/vector operations
//!
//! Matrix/matrix operations check operand shapes and return
//! [`Error::DimensionMismatch`] instead of panicking. Scalar operations are
//! infallible except division, which rejects a zero divisor; the infallible
//! ones are also available through `+`, `-`, `*` and their compound forms.
//!
//! Mutation is explicit in the name: `op` returns a new matrix, `op_inplace`
//! updates the receiver.

use super::Matrix;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::vector::clipped_dot;

impl<T: Copy> Matrix<T> {
    /// Transposed copy: element (i, j) of the result is element (j, i) of `self`
    pub fn transpose(&self) -> Self {
        let (rows, cols) = self.shape();
        let mut data = Vec::with_capacity(rows * cols);
        for j in 0..cols {
            for i in 0..rows {
                data.push(self.data[i * cols + j]);
            }
        }
        Self::from_parts(cols, rows, data)
    }

    /// Main diagonal, of length `min(rows, cols)`
    pub fn diag_vec(&self) -> Vec<T> {
        (0..self.rows.min(self.cols))
            .map(|i| self.data[i * self.cols + i])
            .collect()
    }
}

#[allow(clippy::should_implement_trait)]
impl<T: Element> Matrix<T> {
    fn zip_with(&self, rhs: &Self, op: &'static str, f: impl Fn(T, T) -> T) -> Result<Self> {
        self.check_same_shape(rhs, op)?;
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Self::from_parts(self.rows, self.cols, data))
    }

    fn zip_with_inplace(&mut self, rhs: &Self, op: &'static str, f: impl Fn(T, T) -> T) -> Result<()> {
        self.check_same_shape(rhs, op)?;
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a = f(*a, b);
        }
        Ok(())
    }

    /// Element-wise sum of two equally shaped matrices
    pub fn add(&self, rhs: &Self) -> Result<Self> {
        self.zip_with(rhs, "add", |a, b| a + b)
    }

    /// Element-wise difference of two equally shaped matrices
    pub fn sub(&self, rhs: &Self) -> Result<Self> {
        self.zip_with(rhs, "sub", |a, b| a - b)
    }

    /// `self += rhs`, element-wise
    pub fn add_inplace(&mut self, rhs: &Self) -> Result<()> {
        self.zip_with_inplace(rhs, "add_inplace", |a, b| a + b)
    }

    /// `self -= rhs`, element-wise
    pub fn sub_inplace(&mut self, rhs: &Self) -> Result<()> {
        self.zip_with_inplace(rhs, "sub_inplace", |a, b| a - b)
    }

    /// Matrix product `self * rhs`
    ///
    /// Requires `self.cols() == rhs.rows()`; the result is
    /// `self.rows() x rhs.cols()`.
    pub fn matmul(&self, rhs: &Self) -> Result<Self> {
        if self.cols != rhs.rows {
            return Err(Error::dimension_mismatch(
                "matmul",
                (self.cols, rhs.cols),
                rhs.shape(),
            ));
        }

        let (m, k, n) = (self.rows, self.cols, rhs.cols);
        let mut out = vec![T::zero(); m * n];

        // i-k-j order keeps both the rhs row and the output row contiguous
        for i in 0..m {
            let out_row = &mut out[i * n..(i + 1) * n];
            for p in 0..k {
                let a = self.data[i * k + p];
                let rhs_row = &rhs.data[p * n..(p + 1) * n];
                for (o, &b) in out_row.iter_mut().zip(rhs_row) {
                    *o = *o + a * b;
                }
            }
        }

        Ok(Self::from_parts(m, n, out))
    }

    /// `self = self * rhs`; the receiver is reshaped to `(rows, rhs.cols())`
    pub fn matmul_inplace(&mut self, rhs: &Self) -> Result<()> {
        *self = self.matmul(rhs)?;
        Ok(())
    }

    /// Element-wise (Hadamard) product
    ///
    /// With `clip`, each product is saturated to the representable range of
    /// `T` instead of overflowing. Integer and fixed point products are exact.
    #[doc(alias = "times")]
    pub fn hadamard(&self, rhs: &Self, clip: bool) -> Result<Self> {
        let mut out = self.clone();
        out.hadamard_inplace(rhs, clip)?;
        Ok(out)
    }

    /// In-place element-wise (Hadamard) product, see [`Matrix::hadamard`]
    pub fn hadamard_inplace(&mut self, rhs: &Self, clip: bool) -> Result<()> {
        if !clip {
            return self.zip_with_inplace(rhs, "hadamard", |a, b| a * b);
        }

        self.check_same_shape(rhs, "hadamard")?;
        let mut saturated = 0usize;
        for (a, b) in self.data.iter_mut().zip(rhs.data.iter()) {
            let (p, hit) = clipped_dot(std::slice::from_ref(a), std::slice::from_ref(b));
            saturated += usize::from(hit);
            *a = p;
        }
        if saturated > 0 {
            log::trace!("hadamard: saturated {saturated} of {} elements", self.len());
        }
        Ok(())
    }

    /// Dot product of the two matrices viewed as flat row-major vectors
    ///
    /// Both operands must hold the same number of elements. `clip` has the
    /// same meaning as in [`crate::vector::dot_prod`].
    pub fn mdot_prod(&self, rhs: &Self, clip: bool) -> Result<T> {
        if self.len() != rhs.len() {
            return Err(Error::dimension_mismatch("mdot_prod", self.shape(), rhs.shape()));
        }
        crate::vector::dot_prod(&self.data, &rhs.data, clip)
    }

    /// Matrix-vector product; `v.len()` must equal `self.cols()`
    pub fn mul_vec(&self, v: &[T]) -> Result<Vec<T>> {
        if v.len() != self.cols {
            return Err(Error::dimension_mismatch("mul_vec", (self.cols, 1), (v.len(), 1)));
        }
        Ok(self
            .row_iter()
            .map(|row| {
                row.iter()
                    .zip(v)
                    .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
            })
            .collect())
    }

    /// Add `s` to every element
    pub fn add_scalar(&self, s: T) -> Self {
        self.apply(|x| x + s)
    }

    /// Subtract `s` from every element
    pub fn sub_scalar(&self, s: T) -> Self {
        self.apply(|x| x - s)
    }

    /// Multiply every element by `s`
    pub fn mul_scalar(&self, s: T) -> Self {
        self.apply(|x| x * s)
    }

    /// Divide every element by `s`; a zero divisor is `DivideByZero`
    pub fn div_scalar(&self, s: T) -> Result<Self> {
        if s.is_zero() {
            return Err(Error::DivideByZero { op: "div_scalar" });
        }
        Ok(self.apply(|x| x / s))
    }

    /// Add `s` to every element in place
    pub fn add_scalar_inplace(&mut self, s: T) {
        self.apply_inplace(|x| x + s);
    }

    /// Subtract `s` from every element in place
    pub fn sub_scalar_inplace(&mut self, s: T) {
        self.apply_inplace(|x| x - s);
    }

    /// Multiply every element by `s` in place
    pub fn mul_scalar_inplace(&mut self, s: T) {
        self.apply_inplace(|x| x * s);
    }

    /// Divide every element by `s` in place; a zero divisor leaves the matrix untouched
    pub fn div_scalar_inplace(&mut self, s: T) -> Result<()> {
        if s.is_zero() {
            return Err(Error::DivideByZero { op: "div_scalar_inplace" });
        }
        self.apply_inplace(|x| x / s);
        Ok(())
    }

    /// New matrix with `f` applied to every element
    ///
    /// Typically used for activation functions.
    pub fn apply<F: FnMut(T) -> T>(&self, f: F) -> Self {
        self.map(f)
    }

    /// Apply `f` to every element in place and return the receiver for chaining
    pub fn apply_inplace<F: FnMut(T) -> T>(&mut self, mut f: F) -> &mut Self {
        for x in self.data.iter_mut() {
            *x = f(*x);
        }
        self
    }
}

// ============================================================================
// Operator overloads (scalar right-hand side)
// ============================================================================

macro_rules! impl_scalar_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $inplace:ident) => {
        impl<T: Element> std::ops::$trait<T> for Matrix<T> {
            type Output = Matrix<T>;

            fn $method(mut self, rhs: T) -> Matrix<T> {
                self.$inplace(rhs);
                self
            }
        }

        impl<T: Element> std::ops::$trait<T> for &Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, rhs: T) -> Matrix<T> {
                let mut out = self.clone();
                out.$inplace(rhs);
                out
            }
        }

        impl<T: Element> std::ops::$assign_trait<T> for Matrix<T> {
            fn $assign_method(&mut self, rhs: T) {
                self.$inplace(rhs);
            }
        }
    };
}

impl_scalar_op!(Add, add, AddAssign, add_assign, add_scalar_inplace);
impl_scalar_op!(Sub, sub, SubAssign, sub_assign, sub_scalar_inplace);
impl_scalar_op!(Mul, mul, MulAssign, mul_assign, mul_scalar_inplace);
