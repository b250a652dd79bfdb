//! Benchmark configuration.
//!
//! The benchmark binary takes no flags: it runs [`BenchConfig::default`].
//! Verbosity is controlled through `RUST_LOG` only.

use crate::harness::Algorithm;
use crate::matrix::approx::DEFAULT_TOLERANCE;
use std::sync::Once;

/// Rows of A (and of the output).
pub const P: usize = 1000;
/// Shared contraction dimension: columns of A and of B^T.
pub const Q: usize = 200;
/// Rows of B^T (columns of the output).
pub const R: usize = 3000;

pub const DEFAULT_SEED: u64 = 42;

/// What one benchmark run multiplies and how outputs are compared.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub p: usize,
    pub q: usize,
    pub r: usize,
    /// A is generated from `seed`, B^T from `seed + 1`.
    pub seed: u64,
    pub tolerance: f64,
    /// Worker threads for the rayon pool; `None` uses every core.
    pub threads: Option<usize>,
    /// Variants to run, in order. Output indices in mismatch lines refer
    /// to positions in this list.
    pub algorithms: Vec<Algorithm>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            p: P,
            q: Q,
            r: R,
            seed: DEFAULT_SEED,
            tolerance: DEFAULT_TOLERANCE,
            threads: None,
            algorithms: Algorithm::ALL.to_vec(),
        }
    }
}

static POOL_INIT: Once = Once::new();

/// Builds the global rayon pool with `threads` workers.
///
/// Only the first call does anything. If rayon already created its pool
/// lazily (some parallel iterator ran first), that pool is kept and the
/// requested size is ignored with a warning.
pub fn init_thread_pool(threads: Option<usize>) {
    POOL_INIT.call_once(|| {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(n) = threads {
            builder = builder.num_threads(n);
        }
        if let Err(err) = builder.build_global() {
            log::warn!("keeping existing rayon pool: {}", err);
        }
    });
    log::debug!("rayon pool has {} threads", rayon::current_num_threads());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_runs_everything() {
        let config = BenchConfig::default();
        assert_eq!((config.p, config.q, config.r), (1000, 200, 3000));
        assert_eq!(config.algorithms.len(), 5);
        assert_eq!(config.algorithms[0], Algorithm::Sequential);
    }

    #[test]
    fn test_init_thread_pool_is_idempotent() {
        init_thread_pool(None);
        init_thread_pool(Some(2));
        assert!(rayon::current_num_threads() >= 1);
    }
}
