//! Pipeline Driver (L6).
//!
//! Runs the Time Grid Normalizer, Sector Discoverer, Event Detector,
//! Causal Analyzer, and Export Layer in sequence over one raw telemetry
//! tree, reporting progress through `tracing` the way the rest of the
//! pipeline does. This is the single entrypoint a thin CLI wrapper calls.
//!
//! ```no_run
//! use std::path::PathBuf;
//! use analytics_pipeline::Config;
//!
//! let config = Config {
//!     raw_root: PathBuf::from("./raw"),
//!     processed_root: PathBuf::from("./processed"),
//!     workers: None,
//!     driver_profiles: None,
//! };
//! analytics_pipeline::run(&config).unwrap();
//! ```

#![warn(missing_docs, rust_2018_idioms)]

mod config;

pub use config::Config;

use analytics_errors::common::AnalyticsError;
use analytics_schemas::store;

/// Runs the full pipeline end to end against `config`.
///
/// # Errors
///
/// Aborts with an error if L1 (ingestion) produces no input files or no
/// surviving rows, or if L2 (sector discovery) cannot label a single
/// track. Per-file and per-partition failures within a stage are logged
/// and skipped rather than propagated; a run that detects zero overtake
/// events is not an error, and export still runs over the unlabeled
/// result.
pub fn run(config: &Config) -> Result<(), AnalyticsError> {
    let workers = config.worker_count();
    tracing::info!(workers, raw_root = %config.raw_root.display(), "pipeline: starting");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|err| AnalyticsError::other(format!("failed to build L1 worker pool: {err}")))?;
    let mut table = pool.install(|| analytics_ingest::run(&config.raw_root))?;
    tracing::info!(rows = table.len(), "pipeline: L1 ingestion complete");

    analytics_sectors::run(&mut table)?;
    tracing::info!(tracks = table.tracks().len(), "pipeline: L2 sector discovery complete");

    let master_path = config.processed_root.join("master_timeline.parquet");
    store::save(&table, &master_path)?;

    let mut events_by_race = analytics_events::run(&table)?;
    let total_events: usize = events_by_race.values().map(Vec::len).sum();
    if total_events == 0 {
        tracing::info!("pipeline: L3 found no overtake events for this run");
    } else {
        tracing::info!(events = total_events, "pipeline: L3 event detection complete");
    }

    analytics_causal::run(&table, &mut events_by_race);
    tracing::info!("pipeline: L4 causal analysis complete");

    let event_metadata_dir = config.processed_root.join("event_metadata");
    for ((track, race), events) in &events_by_race {
        let path = event_metadata_dir.join(format!("{track}_{race}_Events.json"));
        analytics_events::writer::write_race_events(&path, events)?;
    }

    analytics_export::run(
        &table,
        &events_by_race,
        &config.processed_root,
        config.driver_profiles.as_deref(),
    )?;
    tracing::info!("pipeline: L5 export complete");

    Ok(())
}
