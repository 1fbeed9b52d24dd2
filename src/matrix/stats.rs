//! Norms and summary statistics
//!
//! Norms treat the matrix as one flat vector. Means and standard deviations
//! are computed in f64 whatever the element type.

use super::Matrix;
use crate::dtype::Element;
use crate::error::Result;
use std::cmp::Ordering;

impl<T: Element> Matrix<T> {
    /// L0 "norm": number of non-zero elements
    pub fn l0_norm(&self) -> usize {
        self.data.iter().filter(|x| !x.is_zero()).count()
    }

    /// L1 norm: sum of absolute values
    pub fn l1_norm(&self) -> T {
        T::from_f64(self.data.iter().map(|x| x.abs_f64()).sum())
    }

    /// L2 (Frobenius) norm: square root of the sum of squares
    pub fn l2_norm(&self) -> T {
        T::from_f64(self.l2_norm_f64())
    }

    pub(crate) fn l2_norm_f64(&self) -> f64 {
        self.data
            .iter()
            .map(|x| {
                let v = x.to_f64();
                v * v
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Sum of all elements
    pub fn sum(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, &x| acc + x)
    }

    /// Largest element, `None` if the matrix is empty
    pub fn max(&self) -> Option<T> {
        self.index_max().map(|(i, j)| self.data[i * self.cols + j])
    }

    /// Smallest element, `None` if the matrix is empty
    pub fn min(&self) -> Option<T> {
        self.index_min().map(|(i, j)| self.data[i * self.cols + j])
    }

    /// (row, col) of the largest element; the first occurrence in row-major order wins
    pub fn index_max(&self) -> Option<(usize, usize)> {
        self.index_extreme(|candidate, best| candidate > best)
    }

    /// (row, col) of the smallest element; the first occurrence in row-major order wins
    pub fn index_min(&self) -> Option<(usize, usize)> {
        self.index_extreme(|candidate, best| candidate < best)
    }

    fn index_extreme(&self, better: impl Fn(T, T) -> bool) -> Option<(usize, usize)> {
        let (first, rest) = self.data.split_first()?;
        let mut best = (0, *first);
        for (k, &x) in rest.iter().enumerate() {
            // strict comparison keeps the earliest index on ties
            if better(x, best.1) {
                best = (k + 1, x);
            }
        }
        Some((best.0 / self.cols, best.0 % self.cols))
    }

    /// Arithmetic mean of all elements (NaN for an empty matrix)
    pub fn mean(&self) -> f64 {
        mean_f64(self.data.iter().copied())
    }

    /// Population standard deviation around a precomputed `mean`
    ///
    /// NaN for an empty matrix.
    pub fn stdev(&self, mean: f64) -> f64 {
        let n = self.data.len() as f64;
        let var = self
            .data
            .iter()
            .map(|x| {
                let d = x.to_f64() - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        var.sqrt()
    }

    /// True if every element of row `i` is zero
    pub fn is_zero_row(&self, i: usize) -> Result<bool> {
        Ok(self.row_slice(i)?.iter().all(|x| x.is_zero()))
    }

    /// True if every element of column `j` is zero
    pub fn is_zero_col(&self, j: usize) -> Result<bool> {
        self.check_col(j)?;
        Ok(self.col_values(j).all(|x| x.is_zero()))
    }

    /// Number of zero elements in row `i`
    pub fn count_zero_row(&self, i: usize) -> Result<usize> {
        Ok(self.row_slice(i)?.iter().filter(|x| x.is_zero()).count())
    }

    /// Number of zero elements in column `j`
    pub fn count_zero_col(&self, j: usize) -> Result<usize> {
        self.check_col(j)?;
        Ok(self.col_values(j).filter(|x| x.is_zero()).count())
    }

    /// Arithmetic mean of row `i`
    pub fn mean_row(&self, i: usize) -> Result<f64> {
        Ok(mean_f64(self.row_slice(i)?.iter().copied()))
    }

    /// Arithmetic mean of column `j`
    pub fn mean_col(&self, j: usize) -> Result<f64> {
        self.check_col(j)?;
        Ok(mean_f64(self.col_values(j)))
    }

    /// All elements flattened and sorted, descending when `descending` is true
    ///
    /// Incomparable values (NaN) are placed last in either order.
    pub fn sort_values(&self, descending: bool) -> Vec<T> {
        let mut values = self.data.clone();
        values.sort_by(|a, b| {
            match (a.partial_cmp(a).is_some(), b.partial_cmp(b).is_some()) {
                (true, true) => {
                    let ord = a.partial_cmp(b).unwrap_or(Ordering::Equal);
                    if descending { ord.reverse() } else { ord }
                }
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (false, false) => Ordering::Equal,
            }
        });
        values
    }

    fn col_values(&self, j: usize) -> impl Iterator<Item = T> + '_ {
        self.data.iter().skip(j).step_by(self.cols.max(1)).copied()
    }
}

fn mean_f64<T: Element>(values: impl Iterator<Item = T>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), x| (s + x.to_f64(), n + 1));
    sum / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix<i32> {
        Matrix::from_rows(&[vec![-1, 2], vec![3, -4]]).unwrap()
    }

    #[test]
    fn test_norms() {
        let m = sample();
        assert_eq!(m.l0_norm(), 4);
        assert_eq!(m.l1_norm(), 10);

        let f = Matrix::from_rows(&[vec![3.0f64, 0.0], vec![0.0, 4.0]]).unwrap();
        assert_eq!(f.l0_norm(), 2);
        assert!((f.l2_norm() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_l1_norm_unsigned() {
        let m = Matrix::from_rows(&[vec![1u8, 2], vec![3, 4]]).unwrap();
        assert_eq!(m.l1_norm(), 10);
    }

    #[test]
    fn test_extrema() {
        let m = sample();
        assert_eq!(m.max(), Some(3));
        assert_eq!(m.min(), Some(-4));
        assert_eq!(m.index_max(), Some((1, 0)));
        assert_eq!(m.index_min(), Some((1, 1)));
        assert_eq!(m.sum(), 0);
    }

    #[test]
    fn test_extrema_ties_first_wins() {
        let m = Matrix::from_rows(&[vec![1, 7, 0], vec![7, 0, 1]]).unwrap();
        assert_eq!(m.index_max(), Some((0, 1)));
        assert_eq!(m.index_min(), Some((0, 2)));
    }

    #[test]
    fn test_extrema_empty() {
        let m = Matrix::<f32>::new();
        assert_eq!(m.max(), None);
        assert_eq!(m.index_min(), None);
        assert!(m.mean().is_nan());
    }

    #[test]
    fn test_mean_stdev() {
        let m = Matrix::from_rows(&[vec![2, 4, 4, 4], vec![5, 5, 7, 9]]).unwrap();
        let mean = m.mean();
        assert_eq!(mean, 5.0);
        assert_eq!(m.stdev(mean), 2.0);
    }

    #[test]
    fn test_zero_rows_cols() {
        let m = Matrix::from_rows(&[vec![0, 0, 1], vec![0, 0, 0]]).unwrap();
        assert!(!m.is_zero_row(0).unwrap());
        assert!(m.is_zero_row(1).unwrap());
        assert!(m.is_zero_col(0).unwrap());
        assert!(!m.is_zero_col(2).unwrap());
        assert_eq!(m.count_zero_row(0).unwrap(), 2);
        assert_eq!(m.count_zero_col(2).unwrap(), 1);
        assert!(m.is_zero_row(2).is_err());
        assert!(m.count_zero_col(3).is_err());
    }

    #[test]
    fn test_row_col_means() {
        let m = Matrix::from_rows(&[vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(m.mean_row(0).unwrap(), 2.0);
        assert_eq!(m.mean_row(1).unwrap(), 5.0);
        assert_eq!(m.mean_col(2).unwrap(), 4.5);
        assert!(m.mean_row(2).is_err());
    }

    #[test]
    fn test_sort_values() {
        let m = Matrix::from_column(vec![3, 1, 4, 1, 5]);
        assert_eq!(m.sort_values(true), vec![5, 4, 3, 1, 1]);
        assert_eq!(m.sort_values(false), vec![1, 1, 3, 4, 5]);
    }

    #[test]
    fn test_sort_values_nan_last() {
        let m = Matrix::from_column(vec![1.0f32, f32::NAN, 3.0]);
        let desc = m.sort_values(true);
        assert_eq!(&desc[..2], &[3.0, 1.0]);
        assert!(desc[2].is_nan());
        let asc = m.sort_values(false);
        assert_eq!(&asc[..2], &[1.0, 3.0]);
        assert!(asc[2].is_nan());
    }
}
