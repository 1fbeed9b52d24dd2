//! Text rendering for diagnostics

use super::Matrix;
use crate::dtype::Element;
use std::fmt;

/// One line per row, elements separated by a space.
///
/// Width and precision flags are forwarded to each element, so
/// `format!("{m:8.3}")` renders an aligned table.
impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.row_iter() {
            for (j, x) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                fmt::Display::fmt(x, f)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: fmt::Display> Matrix<T> {
    /// Write the matrix to stdout
    pub fn print(&self) {
        print!("{self}");
    }
}

impl<T: Element> Matrix<T> {
    /// Bytes held by the element store
    pub fn size_in_bytes(&self) -> usize {
        self.len() * T::DTYPE.size_in_bytes()
    }

    /// `"Matrix<dtype> rows x cols (n bytes)"`
    pub fn size_string(&self) -> String {
        format!(
            "Matrix<{}> {}x{} ({} bytes)",
            T::DTYPE,
            self.rows,
            self.cols,
            self.size_in_bytes()
        )
    }

    /// Write the element type and shape to stdout
    pub fn print_size(&self) {
        println!("{}", self.size_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::Q16;

    #[test]
    fn test_display() {
        let m = Matrix::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(m.to_string(), "1 2\n3 4\n");
        assert_eq!(Matrix::<i32>::new().to_string(), "");
    }

    #[test]
    fn test_display_precision() {
        let m = Matrix::from_rows(&[vec![0.5f32, 1.0 / 3.0]]).unwrap();
        assert_eq!(format!("{m:.2}"), "0.50 0.33\n");
    }

    #[test]
    fn test_display_bool() {
        let m = Matrix::from_rows(&[vec![true, false]]).unwrap();
        assert_eq!(m.to_string(), "true false\n");
    }

    #[test]
    fn test_size_string() {
        assert_eq!(Matrix::<f32>::zeros(3, 4).size_string(), "Matrix<f32> 3x4 (48 bytes)");
        assert_eq!(Matrix::<Q16>::zeros(1, 2).size_string(), "Matrix<q16> 1x2 (8 bytes)");
        assert_eq!(Matrix::<i16>::new().size_string(), "Matrix<i16> 0x0 (0 bytes)");
    }

    #[test]
    fn test_size_in_bytes_matches_byte_view() {
        let m = Matrix::<u16>::zeros(5, 3);
        assert_eq!(m.size_in_bytes(), m.as_bytes().len());
    }
}
