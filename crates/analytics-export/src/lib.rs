//! Export Layer (L5).
//!
//! Reads the Master Table and the per-race event map and writes the
//! query-friendly artifact tree consumed by downstream UIs: track and
//! sector geospatial boundaries, aggregate and per-track event lists, a
//! global timeline index, and an optional driver-profile passthrough.
//! Every artifact is a plain JSON file, written once per run.
//!
//! ```no_run
//! use std::collections::HashMap;
//! use std::path::Path;
//! use analytics_schemas::MasterTable;
//!
//! let table = MasterTable::new();
//! let events = HashMap::new();
//! analytics_export::run(&table, &events, Path::new("./processed"), None).unwrap();
//! ```

#![warn(missing_docs, rust_2018_idioms)]

mod drivers;
mod events;
mod gps;
mod sectors;
mod timeline;
mod tracks;
mod writer;

use std::collections::HashMap;
use std::path::Path;

use analytics_errors::stages::ExportError;
use analytics_schemas::{MasterTable, OvertakeEvent};

/// Writes every export artifact under `processed_root`.
///
/// # Errors
///
/// Returns [`ExportError`] if any artifact fails to serialize or write;
/// partial output from earlier artifacts in the same run is left on
/// disk.
pub fn run(
    table: &MasterTable,
    events_by_race: &HashMap<(String, String), Vec<OvertakeEvent>>,
    processed_root: &Path,
    driver_profile_passthrough: Option<&Path>,
) -> Result<(), ExportError> {
    tracks::export(table, &processed_root.join("tracks"))?;
    sectors::export(table, &processed_root.join("sectors"))?;
    events::export(events_by_race, &processed_root.join("events"))?;
    timeline::export(table, &processed_root.join("timeline"))?;
    drivers::export(driver_profile_passthrough, &processed_root.join("drivers"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_every_artifact_subtree() {
        let mut table = MasterTable::new();
        let row = table.push_row(0, "Barber", "R1", "12");
        table.set(row, "gps_lat", 1.0);
        table.set(row, "gps_long", 2.0);
        table.sector_id[row] = Some("S_001".to_string());

        let events_by_race = HashMap::new();
        let dir = tempfile::tempdir().unwrap();
        run(&table, &events_by_race, dir.path(), None).unwrap();

        assert!(dir.path().join("tracks/tracks_index.json").exists());
        assert!(dir.path().join("sectors/sectors_index.json").exists());
        assert!(dir.path().join("events/all_events.json").exists());
        assert!(dir.path().join("timeline/timeline_index.json").exists());
    }
}
