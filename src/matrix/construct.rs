//! Matrix constructors, conversions and in-place assignment

use super::Matrix;
use crate::dtype::Element;
use crate::error::{Error, Result};

impl<T: Clone> Matrix<T> {
    /// Create a `rows x cols` matrix with every element set to `value`
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self::from_parts(rows, cols, vec![value; rows * cols])
    }

    /// Create a matrix with the shape of `other`, every element set to `value`
    pub fn filled_like<U>(other: &Matrix<U>, value: T) -> Self {
        Self::filled(other.rows(), other.cols(), value)
    }

    /// Create a single-column matrix from a vector
    pub fn from_column(data: Vec<T>) -> Self {
        let rows = data.len();
        Self::from_parts(rows, 1, data)
    }

    /// Create a matrix from row-major data
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::dimension_mismatch(
                "from_vec",
                (rows, cols),
                (data.len(), 1),
            ));
        }
        Ok(Self::from_parts(rows, cols, data))
    }

    /// Create a matrix from a sequence of rows
    ///
    /// The outer length gives the row count and the (common) inner length the
    /// column count. An empty outer sequence yields a 0x0 matrix.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the rows have different lengths.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::dimension_mismatch("from_rows", (i, cols), (i, row.len())));
            }
            data.extend_from_slice(row);
        }
        Ok(Self::from_parts(rows.len(), cols, data))
    }

    /// Create a single-column matrix from the first `dim` values of `data`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `dim > data.len()`.
    pub fn from_array(data: &[T], dim: usize) -> Result<Self> {
        if dim > data.len() {
            return Err(Error::invalid_argument(
                "dim",
                format!("dimension {dim} exceeds array length {}", data.len()),
            ));
        }
        Ok(Self::from_column(data[..dim].to_vec()))
    }

    /// Replace the contents with a deep copy of `other`, reusing the allocation
    pub fn assign(&mut self, other: &Self) {
        self.clone_from(other);
    }

    /// Replace the contents with a single column copied from `data`
    pub fn assign_column(&mut self, data: &[T]) {
        self.data.clear();
        self.data.extend_from_slice(data);
        self.rows = data.len();
        self.cols = 1;
    }

    /// Replace the contents with a sequence of rows
    ///
    /// On error the matrix is left unchanged.
    pub fn assign_rows(&mut self, rows: &[Vec<T>]) -> Result<()> {
        *self = Self::from_rows(rows)?;
        Ok(())
    }

    /// Replace the contents with a single column holding the first `dim` values
    ///
    /// On error the matrix is left unchanged.
    pub fn assign_array(&mut self, data: &[T], dim: usize) -> Result<()> {
        *self = Self::from_array(data, dim)?;
        Ok(())
    }
}

impl<T: Element> Matrix<T> {
    /// Create a `rows x cols` matrix of zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, T::zero())
    }

    /// Create a matrix from the raw native-endian bytes of its row-major data
    ///
    /// The inverse of [`Matrix::as_bytes`], for weights kept in flash or
    /// received over a bus.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `bytes.len()` is not
    /// `rows * cols * size_of::<T>()`.
    pub fn from_bytes(rows: usize, cols: usize, bytes: &[u8]) -> Result<Self> {
        let elem = std::mem::size_of::<T>();
        if bytes.len() != rows * cols * elem {
            return Err(Error::dimension_mismatch(
                "from_bytes",
                (rows, cols),
                (bytes.len() / elem.max(1), 1),
            ));
        }
        let mut data = vec![T::zero(); rows * cols];
        bytemuck::cast_slice_mut::<T, u8>(&mut data).copy_from_slice(bytes);
        Ok(Self::from_parts(rows, cols, data))
    }

    /// Row-major data viewed as native-endian bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Create a `dim x dim` identity matrix
    pub fn identity(dim: usize) -> Self {
        let mut m = Self::zeros(dim, dim);
        for i in 0..dim {
            m.data[i * dim + i] = T::one();
        }
        m
    }
}

impl<T> From<Vec<T>> for Matrix<T> {
    /// Single-column matrix
    fn from(data: Vec<T>) -> Self {
        let rows = data.len();
        Self::from_parts(rows, 1, data)
    }
}

impl<T: Clone> TryFrom<Vec<Vec<T>>> for Matrix<T> {
    type Error = Error;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_and_zeros() {
        let m = Matrix::filled(2, 3, 7i16);
        assert_eq!(m.shape(), (2, 3));
        assert!(m.iter().all(|&x| x == 7));

        let z = Matrix::<f32>::zeros(3, 2);
        assert!(z.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_filled_like() {
        let src = Matrix::filled(4, 5, 1.0f64);
        let m = Matrix::filled_like(&src, -2i32);
        assert_eq!(m.shape(), (4, 5));
        assert!(m.iter().all(|&x| x == -2));
    }

    #[test]
    fn test_identity() {
        let id = Matrix::<i32>::identity(3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(id[(i, j)], i32::from(i == j));
            }
        }
    }

    #[test]
    fn test_from_rows() {
        let m = Matrix::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(m[(1, 0)], 3);
        assert_eq!(m[(0, 1)], 2);

        let empty = Matrix::<i32>::from_rows(&[]).unwrap();
        assert_eq!(empty.shape(), (0, 0));
    }

    #[test]
    fn test_from_rows_jagged() {
        let err = Matrix::from_rows(&[vec![1, 2], vec![3]]).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { op: "from_rows", .. }));
    }

    #[test]
    fn test_column_constructors() {
        let m = Matrix::from_column(vec![1.0f32, 2.0, 3.0]);
        assert_eq!(m.shape(), (3, 1));
        assert_eq!(Matrix::from(vec![1u8, 2]).shape(), (2, 1));

        let a = Matrix::from_array(&[5, 6, 7, 8], 3).unwrap();
        assert_eq!(a.as_slice(), &[5, 6, 7]);
        assert!(Matrix::from_array(&[5, 6], 3).is_err());
    }

    #[test]
    fn test_bytes_roundtrip() {
        let m = Matrix::from_rows(&[vec![1i16, -2], vec![300, 4]]).unwrap();
        let bytes = m.as_bytes().to_vec();
        assert_eq!(bytes.len(), 8);
        assert_eq!(Matrix::<i16>::from_bytes(2, 2, &bytes).unwrap(), m);
        assert!(Matrix::<i16>::from_bytes(2, 2, &bytes[1..]).is_err());
    }

    #[test]
    fn test_from_vec() {
        let m = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(m[(1, 1)], 4);
        assert!(Matrix::from_vec(2, 2, vec![1, 2, 3]).is_err());
    }

    #[test]
    fn test_assignment_family() {
        let mut m = Matrix::filled(2, 2, 0i32);

        let src = Matrix::filled(3, 1, 4i32);
        m.assign(&src);
        assert_eq!(m, src);

        m.assign_column(&[1, 2, 3, 4]);
        assert_eq!(m.shape(), (4, 1));

        m.assign_rows(&[vec![1, 2, 3]]).unwrap();
        assert_eq!(m.shape(), (1, 3));

        // Failed assignment keeps the previous state
        let before = m.clone();
        assert!(m.assign_rows(&[vec![1], vec![1, 2]]).is_err());
        assert!(m.assign_array(&[1], 2).is_err());
        assert_eq!(m, before);

        m.assign_array(&[9, 8, 7], 2).unwrap();
        assert_eq!(m.as_slice(), &[9, 8]);
    }

    #[test]
    fn test_self_assignment_preserves_state() {
        let mut m = Matrix::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
        let snapshot = m.clone();
        m.assign(&snapshot);
        assert_eq!(m, snapshot);
    }

    #[test]
    fn test_clone_is_deep() {
        let a = Matrix::filled(2, 2, 1i32);
        let mut b = a.clone();
        b[(0, 0)] = 5;
        assert_eq!(a[(0, 0)], 1);
    }
}
