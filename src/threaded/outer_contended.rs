//! Outer-product decomposition with a lock around every scalar update.
//!
//! This is the pathological baseline: q tasks each push p × r individual
//! additions through one mutex, for p · q · r lock acquisitions in total.
//! It exists to be measured. Do not coarsen the locking here, the batched
//! and reduced variants are the improved versions.

use crate::error::Result;
use crate::matrix::{Matrix, alloc_zeroed};
use crate::threaded::{check_operands, lock, unit_started};
use rayon::prelude::*;
use std::sync::{Mutex, PoisonError};

/// Multiplies with one task per contraction index `k`, each adding its
/// rank-1 contribution into the shared output one locked scalar at a time.
///
/// Tasks finish in scheduler order, so the result matches the sequential
/// baseline only within floating-point tolerance.
pub fn multiply_outer_contended(a: &Matrix, bt: &Matrix) -> Result<Matrix> {
    let (p, q, r) = check_operands(a, bt)?;
    let acc = Mutex::new(alloc_zeroed(p * r)?);

    log::debug!(
        "outer contended: {} tasks, {} lock acquisitions",
        q,
        p * q * r
    );

    (0..q).into_par_iter().for_each(|k| {
        unit_started();
        for i in 0..p {
            let aik = a[(i, k)];
            for j in 0..r {
                let contribution = aik * bt[(j, k)];
                let mut c = lock(&acc);
                c[i * r + j] += contribution;
            }
        }
    });

    let data = acc.into_inner().unwrap_or_else(PoisonError::into_inner);
    Matrix::from_vec(p, r, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::approx::matrices_close;
    use crate::matrix::generate::generate_seeded;
    use crate::matrix::naive::multiply_sequential;

    #[test]
    fn test_matches_sequential() {
        let a = generate_seeded(6, 9, 3).unwrap();
        let bt = generate_seeded(7, 9, 4).unwrap();

        let seq = multiply_sequential(&a, &bt).unwrap();
        let out = multiply_outer_contended(&a, &bt).unwrap();

        assert!(matrices_close(&seq, &out, 1e-9));
    }
}
