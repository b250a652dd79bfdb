//! Inner-product decomposition: one unit of work per output cell.

use crate::error::Result;
use crate::matrix::Matrix;
use crate::matrix::naive::dot;
use crate::threaded::{check_operands, unit_started};
use rayon::prelude::*;

/// Multiplies by computing every output cell as an independent task.
///
/// Each task owns exactly one `&mut` cell of the output and writes it once,
/// so no two tasks ever touch the same memory and nothing is locked. The
/// per-cell sum runs in ascending k through the same [`dot`] as the
/// sequential baseline, so the result is bit-identical to it.
///
/// Pays off when q is large relative to p and r: the fan-out/join cost is
/// per cell, the useful work per cell is q multiply-adds.
pub fn multiply_inner(a: &Matrix, bt: &Matrix) -> Result<Matrix> {
    let (p, q, r) = check_operands(a, bt)?;
    let mut out = Matrix::zeros(p, r)?;

    log::debug!("inner product: {} cell tasks of length {}", p * r, q);

    out.as_mut_slice()
        .par_iter_mut()
        .enumerate()
        .for_each(|(idx, cell)| {
            unit_started();
            let (i, j) = (idx / r, idx % r);
            *cell = dot(a.row(i), bt.row(j));
        });

    Ok(out)
}
