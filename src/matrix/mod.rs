//! Dense row-major matrix
//!
//! `Matrix<T>` owns a flat `Vec<T>` of `rows * cols` elements, stored row
//! after row. The operations are split by concern:
//!
//! - [`construct`]: constructors, conversions and the assignment family
//! - [`arithmetic`]: matrix/matrix, matrix/scalar and matrix/vector products
//! - [`compare`]: element-wise relational operators
//! - [`stats`]: norms, extrema, means and zero statistics
//! - [`edit`]: row/column extraction and in-place structural edits
//! - [`random`]: random construction, dropout and perturbation
//!
//! # Element access
//!
//! Three tiers are exposed:
//! - `m[(i, j)]` panics on out-of-bounds indices, like slice indexing
//! - [`Matrix::get`] / [`Matrix::get_mut`] return [`Error::OutOfRange`]
//! - [`Matrix::get_unchecked`] / [`Matrix::get_unchecked_mut`] skip the check
//!   entirely for hot loops; the caller guarantees the indices are valid

pub mod arithmetic;
pub mod compare;
pub mod construct;
mod display;
pub mod edit;
pub mod random;
pub mod stats;

use crate::error::{Axis, Error, Result};
use std::ops::{Index, IndexMut};

/// Dense 2-D matrix with row-major storage
///
/// Invariant: `data.len() == rows * cols` at all times.
///
/// # Example
///
/// ```
/// use mlmatrix::Matrix;
///
/// let m = Matrix::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
/// assert_eq!(m[(1, 0)], 3);
/// assert_eq!(m.shape(), (2, 2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMatrix<T>"))]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

/// Unchecked wire form; deserialization validates it into a [`Matrix`]
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMatrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawMatrix<T>> for Matrix<T> {
    type Error = Error;

    fn try_from(raw: RawMatrix<T>) -> Result<Self> {
        let expected = raw.rows.checked_mul(raw.cols);
        if expected != Some(raw.data.len()) {
            return Err(Error::dimension_mismatch(
                "deserialize",
                (raw.rows, raw.cols),
                (raw.data.len(), 1),
            ));
        }
        Ok(Self::from_parts(raw.rows, raw.cols, raw.data))
    }
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            rows: 0,
            cols: 0,
        }
    }
}

impl<T> Matrix<T> {
    /// Create an empty 0x0 matrix
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a matrix from parts already known to be consistent
    #[inline]
    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { data, rows, cols }
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows (alias kept for callers ported from `get_rows()`)
    #[inline]
    pub fn get_rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (alias kept for callers ported from `get_cols()`)
    #[inline]
    pub fn get_cols(&self) -> usize {
        self.cols
    }

    /// Shape as (rows, cols)
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the matrix holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if rows == cols
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row-major view of the backing store
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable row-major view of the backing store
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the matrix and return its row-major data
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterate over elements in row-major order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Iterate over rows as slices
    pub fn row_iter(&self) -> impl Iterator<Item = &[T]> {
        (0..self.rows).map(move |i| &self.data[i * self.cols..(i + 1) * self.cols])
    }

    /// Borrow row `i` as a slice
    pub fn row_slice(&self, i: usize) -> Result<&[T]> {
        self.check_row(i)?;
        let start = i * self.cols;
        Ok(&self.data[start..start + self.cols])
    }

    /// Reference to element (i, j), or `OutOfRange`
    pub fn get_ref(&self, i: usize, j: usize) -> Result<&T> {
        self.check_index(i, j)?;
        Ok(&self.data[i * self.cols + j])
    }

    /// Mutable reference to element (i, j), or `OutOfRange`
    pub fn get_mut(&mut self, i: usize, j: usize) -> Result<&mut T> {
        self.check_index(i, j)?;
        let cols = self.cols;
        Ok(&mut self.data[i * cols + j])
    }

    /// Reference to element (i, j) without bounds checking
    ///
    /// # Safety
    /// `i < self.rows()` and `j < self.cols()` must hold.
    #[inline]
    pub unsafe fn get_unchecked(&self, i: usize, j: usize) -> &T {
        // SAFETY: caller guarantees the index lies inside the store
        unsafe { self.data.get_unchecked(i * self.cols + j) }
    }

    /// Mutable reference to element (i, j) without bounds checking
    ///
    /// # Safety
    /// `i < self.rows()` and `j < self.cols()` must hold.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, i: usize, j: usize) -> &mut T {
        let cols = self.cols;
        // SAFETY: caller guarantees the index lies inside the store
        unsafe { self.data.get_unchecked_mut(i * cols + j) }
    }

    #[inline]
    pub(crate) fn check_row(&self, i: usize) -> Result<()> {
        if i < self.rows {
            Ok(())
        } else {
            Err(Error::out_of_range(Axis::Row, i, self.rows))
        }
    }

    #[inline]
    pub(crate) fn check_col(&self, j: usize) -> Result<()> {
        if j < self.cols {
            Ok(())
        } else {
            Err(Error::out_of_range(Axis::Col, j, self.cols))
        }
    }

    #[inline]
    pub(crate) fn check_index(&self, i: usize, j: usize) -> Result<()> {
        self.check_row(i)?;
        self.check_col(j)
    }

    #[inline]
    pub(crate) fn check_same_shape<U>(&self, other: &Matrix<U>, op: &'static str) -> Result<()> {
        if self.shape() == other.shape() {
            Ok(())
        } else {
            Err(Error::dimension_mismatch(op, self.shape(), other.shape()))
        }
    }
}

impl<T: Copy> Matrix<T> {
    /// Element (i, j), or `OutOfRange`
    pub fn get(&self, i: usize, j: usize) -> Result<T> {
        self.get_ref(i, j).copied()
    }

    /// Overwrite element (i, j), or `OutOfRange`
    pub fn set(&mut self, i: usize, j: usize, value: T) -> Result<()> {
        *self.get_mut(i, j)? = value;
        Ok(())
    }

    /// Discard the contents and reallocate as `rows x cols` filled with `fill`
    pub fn set_size(&mut self, rows: usize, cols: usize, fill: T) {
        self.data.clear();
        self.data.resize(rows * cols, fill);
        self.rows = rows;
        self.cols = cols;
    }

    /// Map every element through `f` into a new matrix of another type
    pub fn map<U, F: FnMut(T) -> U>(&self, f: F) -> Matrix<U> {
        Matrix::from_parts(self.rows, self.cols, self.data.iter().copied().map(f).collect())
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `i >= rows` or `j >= cols`.
    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[i * self.cols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        assert!(
            i < self.rows && j < self.cols,
            "index ({i}, {j}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        let cols = self.cols;
        &mut self.data[i * cols + j]
    }
}

impl<'a, T> IntoIterator for &'a Matrix<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
