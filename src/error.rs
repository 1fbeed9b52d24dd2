//! Error types for mlmatrix

use std::fmt;
use thiserror::Error;

/// Result type alias using mlmatrix's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Matrix axis named in range errors
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Row axis (first index)
    Row,
    /// Column axis (second index)
    Col,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => write!(f, "row"),
            Self::Col => write!(f, "column"),
        }
    }
}

/// Errors that can occur in matrix operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Operand shapes are incompatible with the requested operation
    #[error("Dimension mismatch in '{op}': expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        /// The operation that rejected the operands
        op: &'static str,
        /// Shape required by the operation, as (rows, cols)
        expected: (usize, usize),
        /// Shape actually supplied, as (rows, cols)
        got: (usize, usize),
    },

    /// Index outside the matrix bounds
    #[error("Index {index} out of range for {axis} of size {size}")]
    OutOfRange {
        /// Axis the index applies to
        axis: Axis,
        /// The invalid index
        index: usize,
        /// Size of the axis
        size: usize,
    },

    /// Inclusive index range that is reversed or exceeds the matrix bounds
    #[error("Invalid {axis} range {start}..={end} for size {size}")]
    InvalidRange {
        /// Axis the range applies to
        axis: Axis,
        /// First index of the range
        start: usize,
        /// Last index of the range (inclusive)
        end: usize,
        /// Size of the axis
        size: usize,
    },

    /// Division by a zero scalar or rescaling of a zero-norm matrix
    #[error("Division by zero in '{op}'")]
    DivideByZero {
        /// The operation that would have divided by zero
        op: &'static str,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

impl Error {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(op: &'static str, expected: (usize, usize), got: (usize, usize)) -> Self {
        Self::DimensionMismatch { op, expected, got }
    }

    /// Create an out-of-range error
    pub fn out_of_range(axis: Axis, index: usize, size: usize) -> Self {
        Self::OutOfRange { axis, index, size }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Reject probabilities outside `[0, 1]` (NaN included)
    pub(crate) fn check_probability(arg: &'static str, p: f64) -> Result<()> {
        if (0.0..=1.0).contains(&p) {
            Ok(())
        } else {
            Err(Self::invalid_argument(
                arg,
                format!("probability must be in [0, 1], got {p}"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::dimension_mismatch("add", (2, 3), (3, 2));
        assert_eq!(
            err.to_string(),
            "Dimension mismatch in 'add': expected (2, 3), got (3, 2)"
        );

        let err = Error::out_of_range(Axis::Col, 5, 4);
        assert_eq!(err.to_string(), "Index 5 out of range for column of size 4");

        let err = Error::DivideByZero { op: "div_scalar" };
        assert!(err.to_string().contains("div_scalar"));
    }

    #[test]
    fn test_check_probability() {
        assert!(Error::check_probability("rate", 0.0).is_ok());
        assert!(Error::check_probability("rate", 1.0).is_ok());
        assert!(Error::check_probability("rate", -0.1).is_err());
        assert!(Error::check_probability("rate", 1.5).is_err());
        assert!(Error::check_probability("rate", f64::NAN).is_err());
    }
}
