//! Concurrent multipliers.
//!
//! All four take A (p × q) and B^T (r × q) and return a fresh p × r matrix.
//! They differ in how work is split across the rayon pool and how the
//! shared output is protected:
//!
//! - `inner`: one task per output cell, disjoint writes, no locking
//! - `outer_contended`: one task per k, a lock around every scalar add
//! - `outer_batched`: one task per k, private rank-1 buffer, one locked merge per task
//! - `outer_reduced`: one task per k, buffers handed to a single reducer thread over a channel
//!
//! Every call validates its operands before any task is spawned and only
//! returns after all tasks have finished and been merged.

pub mod inner;
pub mod outer_batched;
pub mod outer_contended;
pub mod outer_reduced;

use crate::error::{MatmulError, Result};
use crate::matrix::{Matrix, alloc_zeroed, checked_len};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[cfg(test)]
thread_local! {
    static UNITS_STARTED: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Validates `a` (p × q) against `bt` (r × q) and returns `(p, q, r)`.
///
/// Also rejects shapes whose p × r output can't be indexed, so every
/// `p * r` computed after this call is in range.
pub(crate) fn check_operands(a: &Matrix, bt: &Matrix) -> Result<(usize, usize, usize)> {
    if a.cols() != bt.cols() {
        return Err(MatmulError::DimensionMismatch {
            a_cols: a.cols(),
            bt_cols: bt.cols(),
        });
    }
    checked_len(a.rows(), bt.rows())?;
    Ok((a.rows(), a.cols(), bt.rows()))
}

/// Marks the start of one unit of parallel work. Only counted in tests.
#[inline(always)]
pub(crate) fn unit_started() {
    #[cfg(test)]
    UNITS_STARTED.with(|n| n.set(n.get() + 1));
}

/// Rank-1 contribution of index `k`: `out[i, j] = A[i, k] * B^T[j, k]`,
/// written into a newly allocated private p × r buffer.
pub(crate) fn rank_one(a: &Matrix, bt: &Matrix, k: usize) -> Result<Vec<f64>> {
    let (p, r) = (a.rows(), bt.rows());
    let mut partial = alloc_zeroed(p * r)?;
    for i in 0..p {
        let aik = a[(i, k)];
        let row = &mut partial[i * r..(i + 1) * r];
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = aik * bt[(j, k)];
        }
    }
    Ok(partial)
}

/// `acc += partial`, element-wise.
pub(crate) fn add_into(acc: &mut [f64], partial: &[f64]) {
    debug_assert_eq!(acc.len(), partial.len());
    for (dst, src) in acc.iter_mut().zip(partial) {
        *dst += src;
    }
}

/// Locks the accumulator. A worker that panicked while holding the lock
/// re-raises its panic at the join, so poisoning carries no extra meaning.
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_one() {
        let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let bt = Matrix::from_vec(3, 2, vec![5.0, 6.0, 7.0, 8.0, 9.0, 10.0]).unwrap();

        // column 1 of A is [2, 4], column 1 of B^T is [6, 8, 10]
        let partial = rank_one(&a, &bt, 1).unwrap();
        assert_eq!(partial, vec![12.0, 16.0, 20.0, 24.0, 32.0, 40.0]);
    }

    #[test]
    fn test_add_into() {
        let mut acc = vec![1.0, 2.0, 3.0];
        add_into(&mut acc, &[0.5, 0.5, 0.5]);
        assert_eq!(acc, vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_check_operands() {
        let a = Matrix::zeros(4, 3).unwrap();
        assert_eq!(check_operands(&a, &Matrix::zeros(5, 3).unwrap()).unwrap(), (4, 3, 5));
        assert!(check_operands(&a, &Matrix::zeros(5, 4).unwrap()).is_err());
    }

    #[test]
    fn test_check_operands_output_overflow() {
        let huge = usize::MAX / 2;
        let a = Matrix::from_vec(huge, 0, vec![]).unwrap();
        let bt = Matrix::from_vec(huge, 0, vec![]).unwrap();
        assert!(matches!(
            check_operands(&a, &bt),
            Err(MatmulError::Overflow { .. })
        ));
    }

    #[test]
    fn test_mismatch_starts_no_units() {
        use crate::harness::Algorithm;
        use crate::matrix::generate::generate_seeded;

        // a private pool, so the per-thread counters only see this test
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .unwrap();
        let units = || -> usize {
            pool.broadcast(|_| UNITS_STARTED.with(|n| n.get()))
                .into_iter()
                .sum()
        };

        let a = generate_seeded(4, 3, 1).unwrap();
        let bad = generate_seeded(5, 4, 2).unwrap();
        let good = generate_seeded(5, 3, 2).unwrap();

        pool.install(|| {
            for algorithm in Algorithm::ALL {
                assert!(matches!(
                    algorithm.multiply(&a, &bad),
                    Err(MatmulError::DimensionMismatch { .. })
                ));
            }
        });
        assert_eq!(units(), 0);

        // the counter does see work when the operands are valid
        pool.install(|| {
            for algorithm in Algorithm::ALL {
                algorithm.multiply(&a, &good).unwrap();
            }
        });
        // 20 cells for the inner product, 3 units for each outer variant
        assert_eq!(units(), 20 + 3 * 3);
    }
}
