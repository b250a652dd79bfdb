//! Sequential reference multiply.

use super::Matrix;
use crate::error::Result;
use crate::threaded::check_operands;

/// Dot product of two equal-length rows, summed in ascending index order.
///
/// Both the sequential baseline and the inner-product variant go through
/// this, which is what makes their outputs bit-identical.
#[inline]
pub fn dot(a_row: &[f64], bt_row: &[f64]) -> f64 {
    let mut acc = 0.0;
    for k in 0..a_row.len() {
        acc += a_row[k] * bt_row[k];
    }
    acc
}

/// Textbook triple loop: `C[i, j] = sum_k A[i, k] * B^T[j, k]`.
///
/// Single-threaded and with a fixed summation order, so its result is the
/// reference every concurrent variant is compared against. Because B is
/// pre-transposed, both operands are walked with stride 1 in the inner loop.
///
/// # Arguments
///
/// * `a` - Matrix A (p × q), row-major
/// * `bt` - Transposed matrix B^T (r × q), row-major
///
/// Returns a fresh p × r matrix, or [`DimensionMismatch`] when the column
/// counts of `a` and `bt` disagree.
///
/// [`DimensionMismatch`]: crate::MatmulError::DimensionMismatch
pub fn multiply_sequential(a: &Matrix, bt: &Matrix) -> Result<Matrix> {
    let (p, _q, r) = check_operands(a, bt)?;
    let mut out = Matrix::zeros(p, r)?;
    let c = out.as_mut_slice();

    for i in 0..p {
        let a_row = a.row(i);
        for j in 0..r {
            c[i * r + j] = dot(a_row, bt.row(j));
        }
    }

    Ok(out)
}
