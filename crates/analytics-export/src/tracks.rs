//! Per-track geospatial boundary export.

use std::path::Path;

use analytics_errors::stages::ExportError;
use analytics_schemas::{BoundingBox, MasterTable, TrackBoundary};
use serde::{Deserialize, Serialize};

use crate::gps::find_gps_channel_names;
use crate::writer::write_json;

/// Number of evenly-spaced boundary points sampled for rendering.
const BOUNDARY_SAMPLE_POINTS: usize = 20;

#[derive(Debug, Serialize, Deserialize)]
struct TracksIndexEntry {
    #[serde(rename = "Track")]
    track: String,
    #[serde(rename = "Center_Lat")]
    center_lat: f64,
    #[serde(rename = "Center_Long")]
    center_long: f64,
}

/// Computes every track's GPS boundary and writes one
/// `tracks/<track>_boundaries.json` file per track plus a combined
/// `tracks_index.json`.
///
/// Tracks with no recognizable GPS channel contribute no boundary and
/// are omitted from both outputs; this is not a fatal condition.
pub fn export(table: &MasterTable, out_dir: &Path) -> Result<(), ExportError> {
    let Some((lat_name, long_name)) = find_gps_channel_names(table) else {
        tracing::warn!("export: no GPS columns found, skipping track boundaries");
        return Ok(());
    };
    let lat = table.channel(&lat_name).expect("channel exists, looked up by name above");
    let long = table.channel(&long_name).expect("channel exists, looked up by name above");

    let mut index = Vec::new();
    for track in table.tracks() {
        let rows: Vec<usize> = (0..table.len())
            .filter(|&i| table.track[i] == track && !lat[i].is_nan() && !long[i].is_nan())
            .collect();
        if rows.is_empty() {
            continue;
        }

        let points: Vec<(f64, f64)> = rows.iter().map(|&i| (lat[i], long[i])).collect();
        let Some(bbox) = BoundingBox::from_points(points.iter().copied()) else {
            continue;
        };
        let (center_lat, center_long) = bbox.centroid();
        let boundary_points = sample_evenly(&points, BOUNDARY_SAMPLE_POINTS);

        let boundary = TrackBoundary {
            track: track.clone(),
            lat_min: bbox.lat_min,
            lat_max: bbox.lat_max,
            long_min: bbox.long_min,
            long_max: bbox.long_max,
            center_lat,
            center_long,
            boundary_points,
        };
        write_json(&out_dir.join(format!("{track}_boundaries.json")), &boundary)?;
        index.push(TracksIndexEntry {
            track,
            center_lat,
            center_long,
        });
    }

    write_json(&out_dir.join("tracks_index.json"), &index)
}

/// Picks up to `n` points evenly spaced by index through `points`.
pub(crate) fn sample_evenly(points: &[(f64, f64)], n: usize) -> Vec<(f64, f64)> {
    if points.is_empty() || n == 0 {
        return Vec::new();
    }
    if points.len() <= n {
        return points.to_vec();
    }
    (0..n)
        .map(|i| {
            let idx = i * (points.len() - 1) / (n - 1).max(1);
            points[idx]
        })
        .collect()
}
