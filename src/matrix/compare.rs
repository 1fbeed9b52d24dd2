//! Element-wise comparison producing boolean matrices
//!
//! Whole-matrix equality is `PartialEq` (shapes and every element equal).
//! The relational operators here compare two equally shaped matrices
//! element by element and return a `Matrix<bool>` of the same shape.

use super::Matrix;
use crate::error::Result;

impl<T: PartialOrd + Copy> Matrix<T> {
    fn compare_with(&self, rhs: &Self, op: &'static str, f: impl Fn(&T, &T) -> bool) -> Result<Matrix<bool>> {
        self.check_same_shape(rhs, op)?;
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(a, b)| f(a, b))
            .collect();
        Ok(Matrix::from_parts(self.rows, self.cols, data))
    }

    /// Element-wise `self < rhs`
    pub fn lt(&self, rhs: &Self) -> Result<Matrix<bool>> {
        self.compare_with(rhs, "lt", |a, b| a < b)
    }

    /// Element-wise `self <= rhs`
    pub fn le(&self, rhs: &Self) -> Result<Matrix<bool>> {
        self.compare_with(rhs, "le", |a, b| a <= b)
    }

    /// Element-wise `self > rhs`
    pub fn gt(&self, rhs: &Self) -> Result<Matrix<bool>> {
        self.compare_with(rhs, "gt", |a, b| a > b)
    }

    /// Element-wise `self >= rhs`
    pub fn ge(&self, rhs: &Self) -> Result<Matrix<bool>> {
        self.compare_with(rhs, "ge", |a, b| a >= b)
    }
}

impl Matrix<bool> {
    /// True if every element is true (vacuously true when empty)
    pub fn all(&self) -> bool {
        self.data.iter().all(|&b| b)
    }

    /// True if at least one element is true
    pub fn any(&self) -> bool {
        self.data.iter().any(|&b| b)
    }

    /// Number of true elements
    pub fn count_true(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }
}
