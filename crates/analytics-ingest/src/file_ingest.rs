//! Per-file ingestion: read, pivot, group by vehicle, segment, and
//! resample a single telemetry CSV into a [`MasterTable`] fragment.

use std::collections::HashMap;

use analytics_errors::stages::IngestError;
use analytics_schemas::MasterTable;

use crate::discovery::DiscoveredFile;
use crate::resample::resample_vehicle;
use crate::shape::{read_samples, RawSample};

/// Ingests one CSV file into a standalone [`MasterTable`] stamped with
/// its track, race, and per-row vehicle identifier.
pub fn ingest_file(file: &DiscoveredFile) -> Result<MasterTable, IngestError> {
    let samples = read_samples(&file.path)?;

    let mut by_vehicle: HashMap<String, Vec<RawSample>> = HashMap::new();
    for sample in samples {
        by_vehicle.entry(sample.vehicle_id.clone()).or_default().push(sample);
    }

    let mut table = MasterTable::new();
    let mut vehicle_ids: Vec<&String> = by_vehicle.keys().collect();
    vehicle_ids.sort();

    for vehicle_id in vehicle_ids {
        let samples = by_vehicle[vehicle_id].clone();
        for segment in resample_vehicle(samples) {
            for (i, &ts) in segment.timestamps_ms.iter().enumerate() {
                let row = table.push_row(ts, &file.track, &file.race, vehicle_id);
                for (channel, values) in &segment.channels {
                    table.set(row, channel, values[i]);
                }
            }
        }
    }

    Ok(table)
}
