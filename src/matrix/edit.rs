//! Structural editing: extraction, removal and in-place row/column edits
//!
//! Extraction and removal return new matrices and leave `self` untouched.
//! The `set_*` and `clip_*` families mutate in place.

use super::Matrix;
use crate::dtype::Element;
use crate::error::{Axis, Error, Result};

impl<T: Copy> Matrix<T> {
    /// Copy of row `i` as a `1 x cols` matrix
    pub fn row(&self, i: usize) -> Result<Self> {
        Ok(Self::from_parts(1, self.cols, self.row_slice(i)?.to_vec()))
    }

    /// Copy of column `j` as a `rows x 1` matrix
    pub fn col(&self, j: usize) -> Result<Self> {
        self.check_col(j)?;
        let data = (0..self.rows).map(|i| self.data[i * self.cols + j]).collect();
        Ok(Self::from_parts(self.rows, 1, data))
    }

    /// Copy of the inclusive block rows `r0..=r1`, columns `c0..=c1`
    pub fn sub_matrix(&self, r0: usize, r1: usize, c0: usize, c1: usize) -> Result<Self> {
        if r0 > r1 || r1 >= self.rows {
            return Err(Error::InvalidRange {
                axis: Axis::Row,
                start: r0,
                end: r1,
                size: self.rows,
            });
        }
        if c0 > c1 || c1 >= self.cols {
            return Err(Error::InvalidRange {
                axis: Axis::Col,
                start: c0,
                end: c1,
                size: self.cols,
            });
        }

        let cols = c1 - c0 + 1;
        let mut data = Vec::with_capacity((r1 - r0 + 1) * cols);
        for i in r0..=r1 {
            let start = i * self.cols + c0;
            data.extend_from_slice(&self.data[start..start + cols]);
        }
        Ok(Self::from_parts(r1 - r0 + 1, cols, data))
    }

    /// New matrix without row `i`
    pub fn remove_row(&self, i: usize) -> Result<Self> {
        self.check_row(i)?;
        let mut data = Vec::with_capacity((self.rows - 1) * self.cols);
        data.extend_from_slice(&self.data[..i * self.cols]);
        data.extend_from_slice(&self.data[(i + 1) * self.cols..]);
        Ok(Self::from_parts(self.rows - 1, self.cols, data))
    }

    /// New matrix without column `j`
    pub fn remove_col(&self, j: usize) -> Result<Self> {
        self.check_col(j)?;
        let data = self
            .data
            .iter()
            .enumerate()
            .filter(|(k, _)| k % self.cols != j)
            .map(|(_, &x)| x)
            .collect();
        Ok(Self::from_parts(self.rows, self.cols - 1, data))
    }

    /// Set every element of row `i` to `value`
    pub fn set_row(&mut self, i: usize, value: T) -> Result<()> {
        self.check_row(i)?;
        let cols = self.cols;
        self.data[i * cols..(i + 1) * cols].fill(value);
        Ok(())
    }

    /// Set every element of column `j` to `value`
    pub fn set_col(&mut self, j: usize, value: T) -> Result<()> {
        self.check_col(j)?;
        let cols = self.cols;
        for x in self.data.iter_mut().skip(j).step_by(cols) {
            *x = value;
        }
        Ok(())
    }

    /// Copy a `1 x cols` matrix into row `i`
    pub fn set_row_matrix(&mut self, i: usize, row: &Self) -> Result<()> {
        self.check_row(i)?;
        if row.shape() != (1, self.cols) {
            return Err(Error::dimension_mismatch("set_row_matrix", (1, self.cols), row.shape()));
        }
        let cols = self.cols;
        self.data[i * cols..(i + 1) * cols].copy_from_slice(&row.data);
        Ok(())
    }

    /// Copy a `rows x 1` matrix into column `j`
    pub fn set_col_matrix(&mut self, j: usize, col: &Self) -> Result<()> {
        self.check_col(j)?;
        if col.shape() != (self.rows, 1) {
            return Err(Error::dimension_mismatch("set_col_matrix", (self.rows, 1), col.shape()));
        }
        let cols = self.cols;
        for (x, &v) in self.data.iter_mut().skip(j).step_by(cols).zip(col.data.iter()) {
            *x = v;
        }
        Ok(())
    }
}

impl<T: Element> Matrix<T> {
    /// Zero every element of row `i`
    pub fn set_zero_row(&mut self, i: usize) -> Result<()> {
        self.set_row(i, T::zero())
    }

    /// Zero every element of column `j`
    pub fn set_zero_col(&mut self, j: usize) -> Result<()> {
        self.set_col(j, T::zero())
    }

    /// Sign of every element: -1, 0 or +1
    ///
    /// Unsigned types never produce -1; NaN maps to 0.
    pub fn sgn(&self) -> Self {
        self.map(|x| {
            let v = x.to_f64();
            if v > 0.0 {
                T::one()
            } else if v < 0.0 {
                T::from_f64(-1.0)
            } else {
                T::zero()
            }
        })
    }

    /// Scaled copy whose L2 norm equals `target`, and whether scaling was needed
    ///
    /// See [`Matrix::norm_scale_inplace`] for the contract.
    pub fn norm_scaled(&self, target: f64) -> Result<(Self, bool)> {
        let mut out = self.clone();
        let changed = out.norm_scale_inplace(target)?;
        Ok((out, changed))
    }

    /// Rescale in place so that the L2 norm equals `target`
    ///
    /// Returns `false` without touching the matrix when the norm already
    /// equals `target`. A zero matrix cannot be rescaled to a non-zero norm
    /// and yields `DivideByZero`. For integer and fixed point types the
    /// scaled values are rounded toward zero, so the resulting norm is only
    /// approximately `target`.
    pub fn norm_scale_inplace(&mut self, target: f64) -> Result<bool> {
        if !target.is_finite() || target < 0.0 {
            return Err(Error::invalid_argument(
                "target",
                format!("norm target must be finite and non-negative, got {target}"),
            ));
        }

        let norm = self.l2_norm_f64();
        if (norm - target).abs() <= f64::EPSILON * target.max(1.0) {
            log::debug!("norm_scale: norm {norm} already at target {target}, skipping");
            return Ok(false);
        }
        if norm == 0.0 {
            return Err(Error::DivideByZero { op: "norm_scale" });
        }

        let factor = target / norm;
        self.apply_inplace(|x| T::from_f64(x.to_f64() * factor));
        Ok(true)
    }

    /// Set non-zero elements with `|x| < threshold` to zero; returns how many changed
    pub fn clip_to_zero(&mut self, threshold: T) -> usize {
        let t = threshold.to_f64();
        self.clip_with(|x| !x.is_zero() && x.abs_f64() < t, |_| T::zero())
    }

    /// Raise elements below `bound` to `bound`; returns how many changed
    pub fn clip_min(&mut self, bound: T) -> usize {
        self.clip_with(|x| x < bound, |_| bound)
    }

    /// Lower elements above `bound` to `bound`; returns how many changed
    pub fn clip_max(&mut self, bound: T) -> usize {
        self.clip_with(|x| x > bound, |_| bound)
    }

    fn clip_with(&mut self, hit: impl Fn(T) -> bool, replace: impl Fn(T) -> T) -> usize {
        let mut changed = 0;
        for x in self.data.iter_mut() {
            if hit(*x) {
                *x = replace(*x);
                changed += 1;
            }
        }
        changed
    }
}
