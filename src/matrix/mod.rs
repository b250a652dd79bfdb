//! The dense row-major matrix type plus the single-threaded pieces built on it.
//!
//! [`naive`] holds the sequential baseline every concurrent variant is
//! checked against. [`generate`] fills operands with standard-normal
//! noise, [`transpose`] flips B into the B^T layout the multipliers expect,
//! and [`approx`] is the tolerance check the harness compares outputs with.

pub mod approx;
pub mod generate;
pub mod naive;
pub mod transpose;

use crate::error::{MatmulError, Result};
use std::ops::Index;

/// A dense `rows × cols` matrix of `f64`, stored row-major.
///
/// Element `(i, j)` lives at offset `i * cols + j`. The shape is fixed at
/// construction and the storage is never resized afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// A freshly allocated matrix of zeros.
    ///
    /// Fails with [`MatmulError::Allocation`] instead of aborting when the
    /// allocator can't satisfy the request.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        let data = alloc_zeroed(checked_len(rows, cols)?)?;
        Ok(Self { data, rows, cols })
    }

    /// Wraps `data` as a `rows × cols` matrix.
    ///
    /// # Example
    ///
    /// ```
    /// use concmul::Matrix;
    ///
    /// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0,
    ///                                     4.0, 5.0, 6.0]).unwrap();
    /// assert_eq!(m[(1, 0)], 4.0);
    /// assert!(Matrix::from_vec(2, 2, vec![1.0]).is_err());
    /// ```
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let expected = checked_len(rows, cols)?;
        if data.len() != expected {
            return Err(MatmulError::LengthMismatch {
                expected,
                found: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Row `i` as a contiguous slice of length `cols`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        assert!(
            i < self.rows && j < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            i,
            j,
            self.rows,
            self.cols
        );
        &self.data[i * self.cols + j]
    }
}

/// Element count of a `rows × cols` matrix, or [`MatmulError::Overflow`]
/// when it doesn't fit in a `usize`.
pub(crate) fn checked_len(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols)
        .ok_or(MatmulError::Overflow { rows, cols })
}

/// Zero-filled buffer of `len` elements, or an allocation error.
pub(crate) fn alloc_zeroed(len: usize) -> Result<Vec<f64>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|source| MatmulError::Allocation {
            elements: len,
            source,
        })?;
    buf.resize(len, 0.0);
    Ok(buf)
}
