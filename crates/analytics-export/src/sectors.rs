//! Per-critical-sector geospatial boundary export.

use std::collections::BTreeMap;
use std::path::Path;

use analytics_errors::stages::ExportError;
use analytics_schemas::{BoundingBox, MasterTable, SectorBoundary};
use serde::{Deserialize, Serialize};

use crate::gps::find_gps_channel_names;
use crate::tracks::sample_evenly;
use crate::writer::write_json;

/// Number of evenly-spaced sample points taken along each sector.
const SECTOR_SAMPLE_POINTS: usize = 20;

#[derive(Debug, Serialize, Deserialize)]
struct SectorsIndexEntry {
    #[serde(rename = "Track")]
    track: String,
    #[serde(rename = "Sector_ID")]
    sector_id: String,
    #[serde(rename = "Center_Lat")]
    center_lat: f64,
    #[serde(rename = "Center_Long")]
    center_long: f64,
}

/// Computes every `S_NNN` critical sector's GPS boundary and writes one
/// `sectors/<track>_sectors.json` file per track plus a combined
/// `sectors_index.json`. Tracks with no GPS or no labeled sectors
/// contribute nothing; this is not a fatal condition.
pub fn export(table: &MasterTable, out_dir: &Path) -> Result<(), ExportError> {
    let Some((lat_name, long_name)) = find_gps_channel_names(table) else {
        tracing::warn!("export: no GPS columns found, skipping sector boundaries");
        return Ok(());
    };
    let lat = table.channel(&lat_name).expect("channel exists, looked up by name above");
    let long = table.channel(&long_name).expect("channel exists, looked up by name above");

    let mut index = Vec::new();
    for track in table.tracks() {
        // Preserve first-seen order per sector id within this track.
        let mut by_sector: BTreeMap<String, Vec<(f64, f64)>> = BTreeMap::new();
        for i in 0..table.len() {
            if table.track[i] != track {
                continue;
            }
            let Some(sector_id) = &table.sector_id[i] else {
                continue;
            };
            if lat[i].is_nan() || long[i].is_nan() {
                continue;
            }
            by_sector.entry(sector_id.clone()).or_default().push((lat[i], long[i]));
        }
        if by_sector.is_empty() {
            continue;
        }

        let mut boundaries = Vec::new();
        for (sector_id, points) in &by_sector {
            let Some(bbox) = BoundingBox::from_points(points.iter().copied()) else {
                continue;
            };
            let (center_lat, center_long) = bbox.centroid();
            boundaries.push(SectorBoundary {
                track: track.clone(),
                sector_id: sector_id.clone(),
                lat_min: bbox.lat_min,
                lat_max: bbox.lat_max,
                long_min: bbox.long_min,
                long_max: bbox.long_max,
                center_lat,
                center_long,
                sample_points: sample_evenly(points, SECTOR_SAMPLE_POINTS),
            });
            index.push(SectorsIndexEntry {
                track: track.clone(),
                sector_id: sector_id.clone(),
                center_lat,
                center_long,
            });
        }
        write_json(&out_dir.join(format!("{track}_sectors.json")), &boundaries)?;
    }

    write_json(&out_dir.join("sectors_index.json"), &index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_boundary_per_sector_per_track() {
        let mut table = MasterTable::new();
        for (i, (lat, long)) in [(1.0, 2.0), (1.2, 2.2), (5.0, 5.0)].into_iter().enumerate() {
            let row = table.push_row(i as i64 * 50, "Barber", "R1", "12");
            table.set(row, "gps_lat", lat);
            table.set(row, "gps_long", long);
            table.sector_id[row] = Some("S_001".to_string());
        }

        let dir = tempfile::tempdir().unwrap();
        export(&table, dir.path()).unwrap();

        let boundaries: Vec<SectorBoundary> =
            serde_json::from_slice(&std::fs::read(dir.path().join("Barber_sectors.json")).unwrap()).unwrap();
        assert_eq!(boundaries.len(), 1);
        assert_eq!(boundaries[0].sector_id, "S_001");
        assert!(dir.path().join("sectors_index.json").exists());
    }

    #[test]
    fn straight_only_track_produces_no_sectors_file_entries() {
        let mut table = MasterTable::new();
        let row = table.push_row(0, "Barber", "R1", "12");
        table.set(row, "gps_lat", 1.0);
        table.set(row, "gps_long", 2.0);
        // sector_id left None (STRAIGHT).

        let dir = tempfile::tempdir().unwrap();
        export(&table, dir.path()).unwrap();
        let index: Vec<SectorsIndexEntry> =
            serde_json::from_slice(&std::fs::read(dir.path().join("sectors_index.json")).unwrap()).unwrap();
        assert!(index.is_empty());
    }
}
