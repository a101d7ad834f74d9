//! Small streaming-write helper shared by every export artifact.

use std::path::Path;

use analytics_errors::stages::ExportError;
use serde::Serialize;

/// Pretty-prints `value` as JSON and writes it to `path`, creating
/// parent directories as needed.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ExportError::Write {
            path: path.display().to_string(),
            source,
        })?;
    }
    let bytes = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, bytes).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })
}
