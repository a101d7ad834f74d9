//! Sector Discoverer (L2).
//!
//! Finds the GPS latitude/longitude channels in a [`MasterTable`],
//! smooths each track's GPS trace, classifies every point as a straight
//! or a critical (cornering) sector by its per-step heading change, and
//! stamps the table's `Sector_ID` column with ordinal `S_NNN` labels for
//! every critical run. Straight-line points are left unlabeled.
//!
//! A track with no usable GPS trace is skipped and logged; the whole run
//! only fails if not a single track ends up with any sector labeled.

#![warn(missing_docs, rust_2018_idioms)]

mod bearing;
mod classify;
mod smoothing;

use analytics_errors::stages::SectorError;
use analytics_schemas::channels;
use analytics_schemas::MasterTable;

use classify::{assign_sector_labels, classify_points};
use smoothing::rolling_median;

/// Per-step heading-change threshold, degrees, above which a point is
/// classified as part of a critical (cornering) sector rather than a
/// straight.
pub const CURVATURE_THRESHOLD_DEG: f64 = 0.1;

/// Minimum number of valid GPS points a track needs before sector
/// classification is attempted at all.
const MIN_TRACE_POINTS: usize = 10;

fn find_gps_channel_names(table: &MasterTable) -> Option<(String, String)> {
    let lat = table.channel_names().iter().find(|name| channels::looks_like_latitude(name))?.clone();
    let long = table.channel_names().iter().find(|name| channels::looks_like_longitude(name))?.clone();
    Some((lat, long))
}

/// Labels every track's corner zones in place.
///
/// # Errors
///
/// Returns [`SectorError::NoGpsColumns`] if the table has no recognizable
/// latitude/longitude channel at all, and [`SectorError::NoTracksLabeled`]
/// if every individual track's trace was too short or degenerate to
/// classify.
pub fn run(table: &mut MasterTable) -> Result<(), SectorError> {
    let (lat_name, long_name) = find_gps_channel_names(table).ok_or(SectorError::NoGpsColumns)?;

    let tracks = table.tracks();
    let mut any_labeled = false;

    for track in tracks {
        let lat = table.channel(&lat_name).expect("channel exists, looked up by name above");
        let long = table.channel(&long_name).expect("channel exists, looked up by name above");

        let rows: Vec<usize> = (0..table.len())
            .filter(|&i| table.track[i] == track && !lat[i].is_nan() && !long[i].is_nan())
            .collect();

        if rows.len() < MIN_TRACE_POINTS {
            tracing::warn!(track, points = rows.len(), "sectors: not enough GPS points, skipping track");
            continue;
        }

        let raw_lat: Vec<f64> = rows.iter().map(|&i| lat[i]).collect();
        let raw_long: Vec<f64> = rows.iter().map(|&i| long[i]).collect();
        let smoothed_lat = rolling_median(&raw_lat);
        let smoothed_long = rolling_median(&raw_long);

        let classes = classify_points(&smoothed_lat, &smoothed_long, CURVATURE_THRESHOLD_DEG);
        let labels = assign_sector_labels(&classes);

        let labeled_here = labels.iter().any(Option::is_some);
        if !labeled_here {
            tracing::info!(track, "sectors: trace had no critical sectors above threshold");
            continue;
        }

        for (row, label) in rows.into_iter().zip(labels) {
            if label.is_some() {
                table.sector_id[row] = label;
            }
        }
        any_labeled = true;
    }

    if !any_labeled {
        return Err(SectorError::NoTracksLabeled);
    }
    Ok(())
}
