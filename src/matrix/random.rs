//! Random construction and stochastic edits
//!
//! Every operation comes in two forms: one drawing from the thread-local
//! generator (`rand::rng()`) and a `_with` variant taking any `Rng`, so that
//! callers can use a seeded generator for reproducible runs.
//!
//! Values are sampled in f64 and converted with `Element::from_f64`.

use super::Matrix;
use crate::dtype::Element;
use crate::error::{Error, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};

impl<T: Element> Matrix<T> {
    /// `rows x cols` matrix with elements drawn uniformly from `[min, max)`
    ///
    /// Integer types draw from `min..max` (upper bound excluded). When
    /// `min == max` every element equals `min`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `min > max`.
    pub fn random_uniform(rows: usize, cols: usize, min: T, max: T) -> Result<Self> {
        Self::random_uniform_with(rows, cols, min, max, &mut rand::rng())
    }

    /// [`Matrix::random_uniform`] with a caller-supplied generator
    pub fn random_uniform_with<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        min: T,
        max: T,
        rng: &mut R,
    ) -> Result<Self> {
        if min > max {
            return Err(Error::invalid_argument(
                "min",
                format!("lower bound {min:?} exceeds upper bound {max:?}"),
            ));
        }

        let (lo, hi) = (min.to_f64(), max.to_f64());
        let data = (0..rows * cols)
            .map(|_| {
                let u: f64 = rng.random();
                // Convex form stays finite for the full f64 range
                let v = lo * (1.0 - u) + hi * u;
                let x = T::from_f64(if T::DTYPE.is_int() { v.floor() } else { v });
                // Narrowing can round onto either bound
                if x < min {
                    min
                } else if x >= max && min < max {
                    max.next_down()
                } else {
                    x
                }
            })
            .collect();
        Ok(Self::from_parts(rows, cols, data))
    }

    /// Matrix of the same shape with elements drawn from `N(mean, stdev²)`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `stdev` is negative or not finite.
    pub fn random_normal(&self, mean: f64, stdev: f64) -> Result<Self> {
        self.random_normal_with(mean, stdev, &mut rand::rng())
    }

    /// [`Matrix::random_normal`] with a caller-supplied generator
    pub fn random_normal_with<R: Rng + ?Sized>(&self, mean: f64, stdev: f64, rng: &mut R) -> Result<Self> {
        let dist = Normal::new(mean, stdev)
            .map_err(|e| Error::invalid_argument("stdev", e.to_string()))?;
        let data = (0..self.len()).map(|_| T::from_f64(dist.sample(&mut *rng))).collect();
        Ok(Self::from_parts(self.rows, self.cols, data))
    }

    /// Zero each element independently with probability `rate`
    ///
    /// Returns the number of elements selected for zeroing. `rate = 0` never
    /// selects an element, `rate = 1` selects all of them.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `rate` is outside `[0, 1]`.
    pub fn dropout(&mut self, rate: f64) -> Result<usize> {
        self.dropout_with(rate, &mut rand::rng())
    }

    /// [`Matrix::dropout`] with a caller-supplied generator
    pub fn dropout_with<R: Rng + ?Sized>(&mut self, rate: f64, rng: &mut R) -> Result<usize> {
        Error::check_probability("rate", rate)?;
        let mut dropped = 0;
        for x in self.data.iter_mut() {
            if rng.random::<f64>() < rate {
                *x = T::zero();
                dropped += 1;
            }
        }
        log::trace!("dropout: zeroed {dropped} of {} elements", self.len());
        Ok(dropped)
    }

    /// Copy where each element is, with probability `rate`, shifted by a
    /// uniform delta in `[-1, 1)`
    pub fn random_change(&self, rate: f64) -> Result<Self> {
        self.random_change_with(rate, 1.0, &mut rand::rng())
    }

    /// Copy where each element is, with probability `rate`, shifted by a
    /// uniform delta in `[-amplitude, amplitude)`
    pub fn random_change_with<R: Rng + ?Sized>(&self, rate: f64, amplitude: f64, rng: &mut R) -> Result<Self> {
        Error::check_probability("rate", rate)?;
        if !amplitude.is_finite() || amplitude < 0.0 {
            return Err(Error::invalid_argument(
                "amplitude",
                format!("must be finite and non-negative, got {amplitude}"),
            ));
        }

        let mut out = self.clone();
        let mut changed = 0usize;
        for x in out.data.iter_mut() {
            if rng.random::<f64>() < rate {
                let delta = amplitude * (2.0 * rng.random::<f64>() - 1.0);
                *x = T::from_f64(x.to_f64() + delta);
                changed += 1;
            }
        }
        log::trace!("random_change: perturbed {changed} of {} elements", out.len());
        Ok(out)
    }
}
