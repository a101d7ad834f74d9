//! Track-length estimation and lap-number derivation.
//!
//! The raw telemetry only carries a running `Laptrigger_lapdist_dls`
//! distance that resets to (near) zero at the start/finish line; there
//! is no separate lap-length or lap-number column, so track length is
//! estimated per race as the maximum observed reading.

use crate::constants::MIN_TRACK_LENGTH_M;

/// Estimates a race's track length as the maximum observed lap-distance
/// reading. Returns `None` if every reading is missing, or the estimate
/// is below [`MIN_TRACK_LENGTH_M`] — both cases mean the race should be
/// skipped rather than produce nonsense lap numbers.
pub fn estimate_track_length(lap_distances: impl IntoIterator<Item = f64>) -> Option<f64> {
    let max = lap_distances.into_iter().filter(|d| !d.is_nan()).fold(f64::NEG_INFINITY, f64::max);
    if max < MIN_TRACK_LENGTH_M {
        None
    } else {
        Some(max)
    }
}

/// Normalizes a raw, ever-increasing lap-distance reading into
/// `[0, track_length)`, undoing the start/finish-line reset so ranking
/// and gap comparisons aren't thrown off by a vehicle crossing the line
/// mid-sample-window.
pub fn normalize(lap_distance: f64, track_length: f64) -> f64 {
    lap_distance.rem_euclid(track_length)
}

/// Derives the 1-based lap number from a raw (non-normalized) lap
/// distance reading: `floor(lap_distance / track_length) + 1`.
pub fn lap_number(lap_distance: f64, track_length: f64) -> i64 {
    (lap_distance / track_length).floor() as i64 + 1
}
