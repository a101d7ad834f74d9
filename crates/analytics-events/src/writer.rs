//! Per-race JSON output for detected events.

use std::path::Path;

use analytics_errors::stages::EventError;
use analytics_schemas::OvertakeEvent;

/// Writes one race's events as a pretty-printed JSON array.
pub fn write_race_events(path: &Path, events: &[OvertakeEvent]) -> Result<(), EventError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| EventError::Write {
            path: path.display().to_string(),
            source,
        })?;
    }
    let json = serde_json::to_vec_pretty(events)?;
    std::fs::write(path, json).map_err(|source| EventError::Write {
        path: path.display().to_string(),
        source,
    })
}
