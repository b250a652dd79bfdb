use super::Matrix;

impl Matrix {
    /// Transpose into a new matrix: `dst = self^T`.
    ///
    /// Converts from row-major (rows × cols) to row-major (cols × rows).
    /// After transpose, what was column j of `self` becomes row j.
    ///
    /// # Example
    ///
    /// ```
    /// use concmul::Matrix;
    ///
    /// let src = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0,   // 2×3 matrix
    ///                                       4.0, 5.0, 6.0]).unwrap();
    ///
    /// let dst = src.transpose();
    ///
    /// assert_eq!(dst.as_slice(), &[1.0, 4.0,   // 3×2 matrix
    ///                              2.0, 5.0,
    ///                              3.0, 6.0]);
    /// ```
    pub fn transpose(&self) -> Matrix {
        let (rows, cols) = (self.rows(), self.cols());
        let src = self.as_slice();
        let mut dst = vec![0.0; rows * cols];

        for i in 0..rows {
            for j in 0..cols {
                dst[j * rows + i] = src[i * cols + j];
            }
        }

        Matrix {
            data: dst,
            rows: cols,
            cols: rows,
        }
    }
}
