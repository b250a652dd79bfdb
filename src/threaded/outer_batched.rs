//! Outer-product decomposition with one locked merge per task.

use crate::error::Result;
use crate::matrix::{Matrix, alloc_zeroed};
use crate::threaded::{add_into, check_operands, lock, rank_one, unit_started};
use rayon::prelude::*;
use std::sync::{Mutex, PoisonError};

/// Multiplies with one task per contraction index `k`.
///
/// Each task builds its full p × r rank-1 contribution in a private buffer
/// without touching shared state, then takes the output lock once to add
/// the buffer in. That is q lock acquisitions instead of p · q · r.
///
/// Merges happen in whatever order tasks finish, so the result is equal to
/// the sequential baseline within tolerance, not bit for bit.
///
/// # Errors
///
/// If any task fails to allocate its private buffer the whole call fails
/// with [`Allocation`] and the partially merged output is dropped.
///
/// [`Allocation`]: crate::MatmulError::Allocation
pub fn multiply_outer_batched(a: &Matrix, bt: &Matrix) -> Result<Matrix> {
    let (p, q, r) = check_operands(a, bt)?;
    let acc = Mutex::new(alloc_zeroed(p * r)?);

    log::debug!("outer batched: {} tasks, {} elements per merge", q, p * r);

    (0..q).into_par_iter().try_for_each(|k| -> Result<()> {
        unit_started();
        let partial = rank_one(a, bt, k)?;
        add_into(&mut lock(&acc), &partial);
        Ok(())
    })?;

    let data = acc.into_inner().unwrap_or_else(PoisonError::into_inner);
    Matrix::from_vec(p, r, data)
}
