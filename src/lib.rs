//! # mlmatrix
//!
//! **Dense 2-D matrices with the linear algebra and statistics small
//! on-device ML models need.**
//!
//! mlmatrix targets memory-constrained devices running inference and light
//! training. A [`Matrix<T>`] owns a row-major buffer whose element type is
//! fixed at compile time: floating point, integer, or the [`dtype::Q16`]
//! fixed-point type.
//!
//! ## Features
//!
//! - **Construction**: constant, identity, uniform random, from rows/columns/arrays
//! - **Arithmetic**: matrix product, element-wise and scalar ops, matrix-vector
//!   product, Hadamard and dot products with optional saturation
//! - **Comparison**: element-wise relational ops producing `Matrix<bool>`
//! - **Statistics**: L0/L1/L2 norms, extrema and their indices, mean, stdev,
//!   per-row/column zero counts and means, sorting
//! - **Editing**: row/column extraction and removal, sub-matrices, dropout,
//!   random perturbation, clipping, norm rescaling
//!
//! Every shape or index violation is reported as an [`Error`]; nothing in
//! the library aborts the process.
//!
//! ## Quick Start
//!
//! ```
//! use mlmatrix::prelude::*;
//!
//! let a = Matrix::from_rows(&[vec![1.0f32, 2.0], vec![3.0, 4.0]])?;
//! let b = Matrix::<f32>::identity(2);
//!
//! let c = a.matmul(&b)?;
//! assert_eq!(c, a);
//!
//! let relu = c.sub_scalar(2.5).apply(|x| x.max(0.0));
//! assert_eq!(relu.l0_norm(), 2);
//! # Ok::<(), mlmatrix::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `f16`: Half-precision elements (`half::f16`, `half::bf16`)
//! - `serde`: `Serialize`/`Deserialize` for `Matrix` and `Q16`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dtype;
pub mod error;
pub mod matrix;
pub mod vector;

pub use error::{Error, Result};
pub use matrix::Matrix;
pub use vector::{dot_prod, identity, index_max_diff};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{DType, Element, Q16};
    pub use crate::error::{Axis, Error, Result};
    pub use crate::matrix::Matrix;
    pub use crate::vector::{dot_prod, identity, index_max_diff};
}
