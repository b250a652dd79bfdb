//! Tolerance-based equality for comparing multiplier outputs.
//!
//! Outer-product variants merge partial sums in whatever order the OS
//! schedules them, so their outputs can differ from the sequential result
//! in the last few bits. Comparisons therefore accept either a small
//! absolute or a small relative difference.

use super::Matrix;

/// Tolerance the harness uses when none is configured.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// True when `x` and `y` are within `tol` absolutely or relative to the
/// larger magnitude. Equal values (infinities included) always match and
/// NaN never does.
pub fn scalar_close(x: f64, y: f64, tol: f64) -> bool {
    if x == y {
        return true;
    }
    let diff = (x - y).abs();
    if diff <= tol {
        return true;
    }
    diff / x.abs().max(y.abs()) <= tol
}

/// Element-wise [`scalar_close`] over two slices of the same length.
pub fn slices_close(x: &[f64], y: &[f64], tol: f64) -> bool {
    x.len() == y.len() && x.iter().zip(y).all(|(&a, &b)| scalar_close(a, b, tol))
}

/// Same shape and every element within tolerance.
pub fn matrices_close(x: &Matrix, y: &Matrix, tol: f64) -> bool {
    x.rows() == y.rows() && x.cols() == y.cols() && slices_close(x.as_slice(), y.as_slice(), tol)
}
