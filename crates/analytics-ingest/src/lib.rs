//! Time Grid Normalizer (L1).
//!
//! Walks a directory of raw per-race telemetry CSVs, detects each file's
//! shape (long or wide), canonicalizes vehicle identifiers, splits each
//! vehicle's readings into continuous segments, and resamples every
//! segment onto a fixed 50ms grid. Files are ingested independently and
//! in parallel; a single bad file is logged and skipped rather than
//! aborting the run. Only a run that produces zero files, or zero
//! surviving rows, is treated as fatal.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let table = analytics_ingest::run(Path::new("./raw")).unwrap();
//! println!("ingested {} rows", table.len());
//! ```

#![warn(missing_docs, rust_2018_idioms)]

mod constants;
mod discovery;
mod file_ingest;
mod resample;
mod shape;
mod timestamp;

use std::path::Path;

use analytics_errors::stages::IngestError;
use analytics_schemas::MasterTable;
use rayon::prelude::*;

pub use discovery::DiscoveredFile;
pub use file_ingest::ingest_file;
pub use shape::RawSample;

/// Ingests every telemetry CSV found under `root` into a single
/// [`MasterTable`].
///
/// # Errors
///
/// Returns [`IngestError::NoInputFiles`] if `root` has no CSV files at
/// all, and [`IngestError::NoRowsProduced`] if every file failed or
/// produced zero surviving rows.
pub fn run(root: &Path) -> Result<MasterTable, IngestError> {
    let files = discovery::discover_csv_files(root).map_err(|source| IngestError::FileRead {
        path: root.display().to_string(),
        source,
    })?;
    if files.is_empty() {
        return Err(IngestError::NoInputFiles {
            root: root.display().to_string(),
        });
    }

    let results: Vec<_> = files.par_iter().map(ingest_file).collect();

    let mut table = MasterTable::new();
    for (file, result) in files.iter().zip(results) {
        match result {
            Ok(fragment) => table.extend(fragment),
            Err(err) => {
                tracing::warn!(file = %file.path.display(), error = %err, "ingest: skipping file");
            }
        }
    }

    if table.is_empty() {
        return Err(IngestError::NoRowsProduced);
    }
    table.sort_by_timestamp();
    Ok(table)
}
