//! Global timeline index: per-track race list, row/vehicle counts, and
//! the overall time range covered by the Master Table.

use std::collections::BTreeSet;
use std::path::Path;

use analytics_errors::stages::ExportError;
use analytics_schemas::MasterTable;
use serde::{Deserialize, Serialize};

use crate::writer::write_json;

#[derive(Debug, Serialize, Deserialize)]
struct TrackTimeline {
    #[serde(rename = "Track")]
    track: String,
    #[serde(rename = "Races")]
    races: Vec<String>,
    #[serde(rename = "Row_Count")]
    row_count: usize,
    #[serde(rename = "Vehicle_Count")]
    vehicle_count: usize,
    #[serde(rename = "Time_Range_Start_Ms")]
    time_range_start_ms: i64,
    #[serde(rename = "Time_Range_End_Ms")]
    time_range_end_ms: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct TimelineIndex {
    #[serde(rename = "Tracks")]
    tracks: Vec<TrackTimeline>,
    #[serde(rename = "Global_Time_Range_Start_Ms")]
    global_time_range_start_ms: i64,
    #[serde(rename = "Global_Time_Range_End_Ms")]
    global_time_range_end_ms: i64,
}

/// Writes `timeline/timeline_index.json`.
pub fn export(table: &MasterTable, out_dir: &Path) -> Result<(), ExportError> {
    let mut tracks = Vec::new();
    let mut global_start = i64::MAX;
    let mut global_end = i64::MIN;

    for track in table.tracks() {
        let rows: Vec<usize> = (0..table.len()).filter(|&i| table.track[i] == track).collect();
        if rows.is_empty() {
            continue;
        }

        let mut races: BTreeSet<String> = BTreeSet::new();
        let mut vehicles: BTreeSet<String> = BTreeSet::new();
        let mut start = i64::MAX;
        let mut end = i64::MIN;
        for &row in &rows {
            races.insert(table.race[row].clone());
            vehicles.insert(table.vehicle[row].clone());
            start = start.min(table.timestamps_ms[row]);
            end = end.max(table.timestamps_ms[row]);
        }
        global_start = global_start.min(start);
        global_end = global_end.max(end);

        tracks.push(TrackTimeline {
            track,
            races: races.into_iter().collect(),
            row_count: rows.len(),
            vehicle_count: vehicles.len(),
            time_range_start_ms: start,
            time_range_end_ms: end,
        });
    }

    let index = TimelineIndex {
        tracks,
        global_time_range_start_ms: if global_start == i64::MAX { 0 } else { global_start },
        global_time_range_end_ms: if global_end == i64::MIN { 0 } else { global_end },
    };
    write_json(&out_dir.join("timeline_index.json"), &index)
}
