//! Outer-product decomposition reduced by a single owner of the output.

use crate::error::{MatmulError, Result};
use crate::matrix::{Matrix, alloc_zeroed};
use crate::threaded::{add_into, check_operands, rank_one, unit_started};
use rayon::prelude::*;
use std::sync::mpsc::{Receiver, sync_channel};
use std::thread;

/// Multiplies with one task per contraction index `k`, handing each task's
/// private rank-1 buffer to a dedicated reducer thread.
///
/// The reducer owns the output outright and is the only code that writes
/// it; buffers move to it through a bounded channel (ownership transfer,
/// no copy) and are added in arrival order. No lock is ever taken on the
/// output. The channel holds at most one buffer per pool thread, which
/// caps how many finished buffers can pile up waiting to be merged.
///
/// Arrival order depends on scheduling, so the result is equal to the
/// sequential baseline within tolerance, not bit for bit.
///
/// # Errors
///
/// An allocation failure in any task fails the call with [`Allocation`].
///
/// [`Allocation`]: crate::MatmulError::Allocation
pub fn multiply_outer_reduced(a: &Matrix, bt: &Matrix) -> Result<Matrix> {
    let (p, q, r) = check_operands(a, bt)?;
    let data = reduce_partials(p * r, q, |k| rank_one(a, bt, k))?;
    Matrix::from_vec(p, r, data)
}

/// Runs `produce(k)` for every `k` in `0..q` on the pool and sums the
/// returned `len`-element buffers on a dedicated reducer thread.
///
/// If any `produce` call fails, that error is returned even though the
/// reducer, short of buffers, fails too.
fn reduce_partials<F>(len: usize, q: usize, produce: F) -> Result<Vec<f64>>
where
    F: Fn(usize) -> Result<Vec<f64>> + Sync,
{
    let acc = alloc_zeroed(len)?;
    let capacity = rayon::current_num_threads();
    let (tx, rx) = sync_channel::<Vec<f64>>(capacity);

    log::debug!(
        "outer reduced: {} tasks, handoff capacity {}",
        q,
        capacity
    );

    let (produced, reduced) = thread::scope(|s| {
        let reducer = s.spawn(move || reduce(rx, acc, q));

        // every sender clone drops when the pool finishes, so a reducer
        // that is short of buffers sees a disconnect rather than blocking
        let produced = (0..q).into_par_iter().try_for_each_with(tx, |tx, k| -> Result<()> {
            unit_started();
            let partial = produce(k)?;
            tx.send(partial).map_err(|_| MatmulError::ReducerDisconnected)
        });

        let reduced = match reducer.join() {
            Ok(reduced) => reduced,
            Err(panic) => std::panic::resume_unwind(panic),
        };
        (produced, reduced)
    });

    produced?;
    reduced
}

/// Receives exactly `expected` buffers and folds them into `acc`.
fn reduce(rx: Receiver<Vec<f64>>, mut acc: Vec<f64>, expected: usize) -> Result<Vec<f64>> {
    for received in 0..expected {
        let partial = rx.recv().map_err(|_| MatmulError::IncompleteReduction {
            received,
            expected,
        })?;
        add_into(&mut acc, &partial);
        log::trace!("reducer merged {}/{}", received + 1, expected);
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::approx::matrices_close;
    use crate::matrix::generate::generate_seeded;
    use crate::matrix::naive::multiply_sequential;

    #[test]
    fn test_matches_sequential() {
        let a = generate_seeded(10, 40, 9).unwrap();
        let bt = generate_seeded(11, 40, 10).unwrap();

        let seq = multiply_sequential(&a, &bt).unwrap();
        let out = multiply_outer_reduced(&a, &bt).unwrap();

        assert!(matrices_close(&seq, &out, 1e-9));
    }

    #[test]
    fn test_worker_error_wins_over_short_reduction() {
        let result = reduce_partials(4, 8, |k| {
            if k == 3 {
                // a request this size can never be satisfied
                alloc_zeroed(usize::MAX / 8)
            } else {
                Ok(vec![1.0; 4])
            }
        });

        assert!(matches!(result, Err(MatmulError::Allocation { .. })));
    }

    #[test]
    fn test_reduce_partials_sums_every_buffer() {
        let acc = reduce_partials(3, 16, |k| Ok(vec![k as f64; 3])).unwrap();
        assert_eq!(acc, vec![120.0; 3]);
    }

    #[test]
    fn test_reducer_reports_short_stream() {
        let (tx, rx) = sync_channel(4);
        tx.send(vec![1.0, 1.0]).unwrap();
        drop(tx);

        let err = reduce(rx, vec![0.0; 2], 3).unwrap_err();
        assert!(matches!(
            err,
            MatmulError::IncompleteReduction {
                received: 1,
                expected: 3
            }
        ));
    }

    #[test]
    fn test_reducer_consumes_exactly_expected() {
        let (tx, rx) = sync_channel(4);
        for _ in 0..3 {
            tx.send(vec![1.0, 2.0]).unwrap();
        }
        // a fourth buffer stays in the channel
        tx.send(vec![100.0, 100.0]).unwrap();

        let acc = reduce(rx, vec![0.0; 2], 3).unwrap();
        assert_eq!(acc, vec![3.0, 6.0]);
    }
}
