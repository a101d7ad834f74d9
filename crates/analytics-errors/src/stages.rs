//! Stage-specific error types.
//!
//! Each pipeline stage (L1-L5) gets its own error enum so that failures
//! can be classified and reported without a blanket `anyhow::Error`.
//! Per the propagation policy, most of these variants are trapped at a
//! per-file or per-partition boundary and only logged; the `NoInputFiles`
//! and `NoRowsProduced` variants of [`IngestError`] and
//! [`SectorError::NoTracksLabeled`] are the only ones that abort the run.

use thiserror::Error;

/// Errors from the Time Grid Normalizer (L1).
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("no telemetry CSV files found under {root}")]
    NoInputFiles { root: String },

    #[error("no rows survived ingestion across all input files")]
    NoRowsProduced,

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV row in {path}: {source}")]
    CsvParse {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("column {0} required for long-form pivot is missing")]
    MissingPivotColumn(String),
}

/// Errors from the Sector Discoverer (L2).
#[derive(Debug, Error)]
pub enum SectorError {
    #[error("no GPS latitude/longitude columns detected")]
    NoGpsColumns,

    #[error("no track produced any sector labels")]
    NoTracksLabeled,
}

/// Errors from the Event Detector (L3).
#[derive(Debug, Error)]
pub enum EventError {
    #[error("required column {0} is missing")]
    MissingColumn(String),

    #[error("failed to serialize event record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write event file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the Causal Analyzer (L4).
///
/// Per-event classification failures (`Data_Missing`, `Invalid_Sector`)
/// are represented as reason codes on the event record, not as `Err`
/// variants here -- this enum is only for infrastructure failures.
#[derive(Debug, Error)]
pub enum CausalError {
    #[error("failed to read event file {path}: {source}")]
    EventFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse event file {path}: {source}")]
    EventFileParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from the Export Layer (L5).
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write artifact {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize artifact: {0}")]
    Serialize(#[from] serde_json::Error),
}
