//! Common error types and utilities shared across all pipeline stages.
//!
//! This module provides the top-level error enum that wraps every
//! stage-specific error, along with severity classification and a
//! context-attaching helper trait.

use core::fmt;

use crate::{CausalError, EventError, ExportError, IngestError, SectorError};

/// Top-level error type returned by the pipeline driver.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// Ingestion (L1) failure.
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// Sector discovery (L2) failure.
    #[error("sector discovery error: {0}")]
    Sector(#[from] SectorError),

    /// Event detection (L3) failure.
    #[error("event detection error: {0}")]
    Event(#[from] EventError),

    /// Causal analysis (L4) failure.
    #[error("causal analysis error: {0}")]
    Causal(#[from] CausalError),

    /// Export (L5) failure.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O errors not attributable to a specific stage.
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    /// Configuration errors.
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic error with a free-form message.
    #[error("{0}")]
    Other(String),
}

impl AnalyticsError {
    /// Returns the error category for classification/logging.
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnalyticsError::Ingest(_) => ErrorCategory::Ingest,
            AnalyticsError::Sector(_) => ErrorCategory::Sector,
            AnalyticsError::Event(_) => ErrorCategory::Event,
            AnalyticsError::Causal(_) => ErrorCategory::Causal,
            AnalyticsError::Export(_) => ErrorCategory::Export,
            AnalyticsError::Io(_) => ErrorCategory::Io,
            AnalyticsError::Config(_) => ErrorCategory::Config,
            AnalyticsError::Other(_) => ErrorCategory::Other,
        }
    }

    /// Whether this error should abort the whole pipeline run.
    ///
    /// Per the error taxonomy, only an empty Master Table (L1) or a
    /// stage that cannot produce any sector labels at all (L2) are
    /// fatal; everything else is trapped at the stage boundary.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AnalyticsError::Ingest(IngestError::NoInputFiles { .. })
                | AnalyticsError::Ingest(IngestError::NoRowsProduced)
                | AnalyticsError::Sector(SectorError::NoTracksLabeled)
        )
    }

    /// Creates a configuration error with a message.
    pub fn config(msg: impl Into<String>) -> Self {
        AnalyticsError::Config(msg.into())
    }

    /// Creates a generic error with a message.
    pub fn other(msg: impl Into<String>) -> Self {
        AnalyticsError::Other(msg.into())
    }
}

impl From<std::io::Error> for AnalyticsError {
    fn from(e: std::io::Error) -> Self {
        AnalyticsError::Io(e)
    }
}

/// Error category, used for structured logging and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Ingest,
    Sector,
    Event,
    Causal,
    Export,
    Io,
    Config,
    Other,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCategory::Ingest => "ingest",
            ErrorCategory::Sector => "sector",
            ErrorCategory::Event => "event",
            ErrorCategory::Causal => "causal",
            ErrorCategory::Export => "export",
            ErrorCategory::Io => "io",
            ErrorCategory::Config => "config",
            ErrorCategory::Other => "other",
        };
        write!(f, "{s}")
    }
}

/// Context information attached to an error for easier debugging.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub operation: String,
    pub context: Vec<(String, String)>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            context: Vec::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation: {}", self.operation)?;
        for (key, value) in &self.context {
            write!(f, ", {key}: {value}")?;
        }
        Ok(())
    }
}

/// Extension trait for attaching context to a `Result`'s error.
pub trait ResultExt<T> {
    fn context(self, ctx: ErrorContext) -> Result<T, AnalyticsError>;
    fn with_context(self, operation: impl Into<String>) -> Result<T, AnalyticsError>;
}

impl<T, E: Into<AnalyticsError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, ctx: ErrorContext) -> Result<T, AnalyticsError> {
        self.map_err(|e| {
            let err: AnalyticsError = e.into();
            AnalyticsError::Other(format!("{ctx}: {err}"))
        })
    }

    fn with_context(self, operation: impl Into<String>) -> Result<T, AnalyticsError> {
        self.context(ErrorContext::new(operation))
    }
}
