//! Shared `tracing-subscriber` setup for the pipeline binary.
//!
//! The teacher's tracing crate targets RT-hardware ETW/tracepoint
//! integration; this pipeline runs offline and batch, so it needs only a
//! single portable fmt layer honoring `RUST_LOG`, installed once from
//! the CLI's `main`.

#![warn(missing_docs, rust_2018_idioms)]

use tracing_subscriber::EnvFilter;

/// Installs a global `tracing` subscriber that writes leveled, human-
/// readable logs to stderr, filtered by `RUST_LOG` (defaulting to
/// `info` when unset).
///
/// Panics if a global subscriber has already been installed; callers
/// should invoke this exactly once, from `main`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}
