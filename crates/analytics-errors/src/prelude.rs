//! Convenience re-exports for downstream crates.

pub use crate::common::{AnalyticsError, ErrorCategory, ErrorContext, ResultExt};
pub use crate::stages::{CausalError, EventError, ExportError, IngestError, SectorError};
pub use crate::Result;
