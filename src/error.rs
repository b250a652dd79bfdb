//! Errors raised by matrix construction and the multipliers.

use std::collections::TryReserveError;
use thiserror::Error;

/// Everything that can make a multiply (or building its operands) fail.
///
/// Any of these is fatal to the call that produced it: no multiplier
/// returns a partially filled output.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MatmulError {
    #[error("dimension mismatch: A has {a_cols} columns but B^T has {bt_cols}")]
    DimensionMismatch { a_cols: usize, bt_cols: usize },

    #[error("invalid dimensions {rows} x {cols}: both must be positive")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("a {rows} x {cols} matrix has more than usize::MAX elements")]
    Overflow { rows: usize, cols: usize },

    #[error("length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("failed to allocate a buffer of {elements} elements")]
    Allocation {
        elements: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("reducer merged {received} of {expected} partial products before the channel closed")]
    IncompleteReduction { received: usize, expected: usize },

    #[error("reducer hung up before all partial products were handed off")]
    ReducerDisconnected,
}

pub type Result<T> = std::result::Result<T, MatmulError>;
