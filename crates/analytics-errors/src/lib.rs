//! Centralized error types for the race telemetry analytics pipeline.
//!
//! Each stage (L1-L5) has its own error enum in [`stages`]; [`common`]
//! provides the top-level [`AnalyticsError`] that wraps them plus a
//! category classification used for logging.
//!
//! # Example
//!
//! ```
//! use analytics_errors::prelude::*;
//!
//! fn load(root: &str) -> Result<()> {
//!     if root.is_empty() {
//!         return Err(IngestError::NoInputFiles { root: root.into() }.into());
//!     }
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod common;
pub mod prelude;
pub mod stages;

pub use common::{AnalyticsError, ErrorCategory, ErrorContext, ResultExt};
pub use stages::{CausalError, EventError, ExportError, IngestError, SectorError};

/// A specialized `Result` type for analytics pipeline operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;
