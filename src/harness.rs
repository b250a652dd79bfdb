//! Runs every multiplier on the same inputs, times them, and cross-checks
//! the outputs.
//!
//! Variants run strictly one after another so they never compete for
//! cores. Output is one `Duration: <elapsed>` line per variant, followed
//! by one `Some results differ (i, j)` line for every pair of outputs that
//! disagree beyond the tolerance. A mismatch is reported, never raised:
//! every pair is checked.

use crate::config::BenchConfig;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::matrix::approx::matrices_close;
use crate::matrix::generate::generate_seeded;
use crate::{
    multiply_inner, multiply_outer_batched, multiply_outer_contended, multiply_outer_reduced,
    multiply_sequential,
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// The multiplier variants, in the order the benchmark runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Sequential,
    InnerProduct,
    OuterContended,
    OuterBatched,
    OuterReduced,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Sequential,
        Algorithm::InnerProduct,
        Algorithm::OuterContended,
        Algorithm::OuterBatched,
        Algorithm::OuterReduced,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Sequential => "sequential",
            Algorithm::InnerProduct => "inner product",
            Algorithm::OuterContended => "outer product (lock per scalar)",
            Algorithm::OuterBatched => "outer product (lock per merge)",
            Algorithm::OuterReduced => "outer product (channel reducer)",
        }
    }

    pub fn multiply(&self, a: &Matrix, bt: &Matrix) -> Result<Matrix> {
        match self {
            Algorithm::Sequential => multiply_sequential(a, bt),
            Algorithm::InnerProduct => multiply_inner(a, bt),
            Algorithm::OuterContended => multiply_outer_contended(a, bt),
            Algorithm::OuterBatched => multiply_outer_batched(a, bt),
            Algorithm::OuterReduced => multiply_outer_reduced(a, bt),
        }
    }
}

/// One timed multiply.
#[derive(Debug, Clone)]
pub struct Run {
    pub algorithm: Algorithm,
    pub elapsed: Duration,
    pub output: Matrix,
}

/// Everything a benchmark produced: the runs in order and the index pairs
/// of runs whose outputs diverged.
#[derive(Debug, Clone)]
pub struct Report {
    pub runs: Vec<Run>,
    pub mismatches: Vec<(usize, usize)>,
}

impl Report {
    pub fn all_agree(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Runs each algorithm once, one at a time, on the same operands.
///
/// The first multiply error stops the run; nothing after it is timed.
pub fn run_algorithms(algorithms: &[Algorithm], a: &Matrix, bt: &Matrix) -> Result<Vec<Run>> {
    let mut runs = Vec::with_capacity(algorithms.len());
    for &algorithm in algorithms {
        log::info!("running {}", algorithm.name());
        let start = Instant::now();
        let output = algorithm.multiply(a, bt)?;
        let elapsed = start.elapsed();

        let flops = 2.0 * a.rows() as f64 * a.cols() as f64 * bt.rows() as f64;
        log::info!(
            "{}: {:?} ({:.2} GFLOPS)",
            algorithm.name(),
            elapsed,
            flops / elapsed.as_secs_f64().max(f64::MIN_POSITIVE) / 1e9
        );

        runs.push(Run {
            algorithm,
            elapsed,
            output,
        });
    }
    Ok(runs)
}

/// Every pair `(i, j)` with `i < j` whose outputs are not within
/// `tolerance` of each other. Keeps going after the first divergence.
pub fn find_mismatches(outputs: &[&Matrix], tolerance: f64) -> Vec<(usize, usize)> {
    let mut mismatches = Vec::new();
    for i in 0..outputs.len() {
        for j in i + 1..outputs.len() {
            if !matrices_close(outputs[i], outputs[j], tolerance) {
                log::warn!("outputs {} and {} differ beyond {:e}", i, j, tolerance);
                mismatches.push((i, j));
            }
        }
    }
    mismatches
}

/// Writes the duration lines, then the mismatch lines.
pub fn write_report<W: Write>(
    writer: &mut W,
    runs: &[Run],
    mismatches: &[(usize, usize)],
) -> io::Result<()> {
    for run in runs {
        writeln!(writer, "Duration: {:?}", run.elapsed)?;
    }
    for (i, j) in mismatches {
        writeln!(writer, "Some results differ ({}, {})", i, j)?;
    }
    Ok(())
}

/// Compares and reports runs that were already collected.
pub fn report<W: Write>(writer: &mut W, runs: Vec<Run>, tolerance: f64) -> io::Result<Report> {
    let outputs: Vec<&Matrix> = runs.iter().map(|run| &run.output).collect();
    let mismatches = find_mismatches(&outputs, tolerance);
    write_report(writer, &runs, &mismatches)?;
    Ok(Report { runs, mismatches })
}

/// Full benchmark: generate A and B^T from the configured seed, run every
/// configured algorithm, compare, and write the report to `writer`.
pub fn run<W: Write>(config: &BenchConfig, writer: &mut W) -> anyhow::Result<Report> {
    log::info!(
        "multiplying {}x{} by {}x{} with {} rayon threads",
        config.p,
        config.q,
        config.q,
        config.r,
        rayon::current_num_threads()
    );

    let a = generate_seeded(config.p, config.q, config.seed)?;
    let bt = generate_seeded(config.r, config.q, config.seed.wrapping_add(1))?;

    let runs = run_algorithms(&config.algorithms, &a, &bt)?;
    Ok(report(writer, runs, config.tolerance)?)
}
