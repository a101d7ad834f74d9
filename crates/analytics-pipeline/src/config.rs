//! Pipeline configuration, built from CLI flags via [`clap`].

use std::path::PathBuf;

use clap::Args;

/// Runtime configuration for one pipeline run.
///
/// Defaults match the algorithmic constants named throughout the
/// individual stage crates (50ms grid, 500k row chunks, etc.); this
/// struct only carries the knobs that vary per invocation.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Root directory containing `<track>_<race>/*telemetry*.csv` trees.
    #[arg(long, value_name = "DIR")]
    pub raw_root: PathBuf,

    /// Output directory for the master store and export artifact tree.
    #[arg(long, value_name = "DIR")]
    pub processed_root: PathBuf,

    /// Number of worker threads for the L1 parallel ingestion pool.
    /// Defaults to the host's CPU count.
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Optional externally-produced driver profile file, copied
    /// unchanged into `<processed_root>/drivers/`.
    #[arg(long, value_name = "FILE")]
    pub driver_profiles: Option<PathBuf>,
}

impl Config {
    /// Resolves the worker pool size, falling back to the host's CPU
    /// count when not explicitly set.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }
}
