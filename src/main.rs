//! Benchmark runner for the concurrent multipliers.
//!
//! Takes no flags. Prints one `Duration:` line per variant and a
//! `Some results differ (i, j)` line for every pair of outputs that
//! disagree. Set `RUST_LOG=info` for GFLOPS and progress on stderr.

use anyhow::Result;
use concmul::BenchConfig;
use concmul::config::init_thread_pool;
use concmul::harness;
use std::io::{self, Write};

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();

    let config = BenchConfig::default();
    init_thread_pool(config.threads);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = harness::run(&config, &mut out)?;
    out.flush()?;

    if !report.all_agree() {
        log::warn!("{} pair(s) of outputs differ", report.mismatches.len());
    }

    Ok(())
}
