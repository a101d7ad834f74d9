//! Segmentation and 50ms-grid resampling for one vehicle's samples.
//!
//! A vehicle's raw samples are split into continuous segments at any gap
//! larger than [`SEGMENT_GAP_MS`](crate::constants::SEGMENT_GAP_MS).
//! Segments longer than [`MAX_SEGMENT_MS`](crate::constants::MAX_SEGMENT_MS)
//! are dropped, and every surviving segment is resampled independently
//! onto its own 50ms grid: each bucket's channel value is the arithmetic
//! mean of samples nearest that grid point, internal gaps are filled by
//! linear interpolation, and the leading/trailing gaps are filled with
//! the nearest known value.

use std::collections::{BTreeSet, HashMap};

use crate::constants::{GRID_MS, MAX_SEGMENT_MS, SEGMENT_GAP_MS};
use crate::shape::RawSample;

/// One continuous, 50ms-gridded run of a single vehicle's telemetry.
#[derive(Debug, Default)]
pub struct ResampledSegment {
    pub timestamps_ms: Vec<i64>,
    pub channels: HashMap<String, Vec<f64>>,
}

fn floor_to_grid(t: i64) -> i64 {
    t.div_euclid(GRID_MS) * GRID_MS
}

fn ceil_to_grid(t: i64) -> i64 {
    let floored = floor_to_grid(t);
    if floored == t {
        floored
    } else {
        floored + GRID_MS
    }
}

/// Splits already-sorted samples into segments at any inter-sample gap
/// larger than the configured threshold.
fn split_into_segments(samples: &[RawSample]) -> Vec<&[RawSample]> {
    let mut segments = Vec::new();
    let mut start = 0;
    for i in 1..samples.len() {
        if samples[i].timestamp_ms - samples[i - 1].timestamp_ms > SEGMENT_GAP_MS {
            segments.push(&samples[start..i]);
            start = i;
        }
    }
    if start < samples.len() {
        segments.push(&samples[start..]);
    }
    segments
}

fn interpolate_and_fill(values: &mut [f64]) {
    let Some(first_known) = values.iter().position(|v| !v.is_nan()) else {
        return;
    };
    let last_known = values.iter().rposition(|v| !v.is_nan()).unwrap();

    for v in values.iter_mut().take(first_known) {
        *v = values[first_known];
    }
    for i in (last_known + 1)..values.len() {
        values[i] = values[last_known];
    }

    let mut i = first_known;
    while i < last_known {
        if values[i + 1].is_nan() {
            let mut j = i + 1;
            while values[j].is_nan() {
                j += 1;
            }
            let (start, end) = (values[i], values[j]);
            let span = (j - i) as f64;
            for k in 1..(j - i) {
                values[i + k] = start + (end - start) * (k as f64 / span);
            }
            i = j;
        } else {
            i += 1;
        }
    }
}

fn resample_segment(segment: &[RawSample]) -> ResampledSegment {
    let t0 = segment.first().map(|s| s.timestamp_ms).unwrap_or(0);
    let t1 = segment.last().map(|s| s.timestamp_ms).unwrap_or(0);
    let grid_start = floor_to_grid(t0);
    let grid_end = ceil_to_grid(t1);
    let points = ((grid_end - grid_start) / GRID_MS + 1).max(1) as usize;
    let timestamps_ms: Vec<i64> = (0..points).map(|i| grid_start + i as i64 * GRID_MS).collect();

    let mut channel_names: BTreeSet<&str> = BTreeSet::new();
    for sample in segment {
        channel_names.extend(sample.values.keys().map(String::as_str));
    }

    let mut channels = HashMap::with_capacity(channel_names.len());
    for name in channel_names {
        let mut sums = vec![0.0_f64; points];
        let mut counts = vec![0u32; points];
        for sample in segment {
            let Some(&value) = sample.values.get(name) else {
                continue;
            };
            let offset = (sample.timestamp_ms - grid_start) as f64 / GRID_MS as f64;
            let idx = offset.round().clamp(0.0, (points - 1) as f64) as usize;
            sums[idx] += value;
            counts[idx] += 1;
        }
        let mut means: Vec<f64> = sums
            .iter()
            .zip(&counts)
            .map(|(&sum, &count)| if count > 0 { sum / f64::from(count) } else { f64::NAN })
            .collect();
        interpolate_and_fill(&mut means);
        channels.insert(name.to_string(), means);
    }

    ResampledSegment { timestamps_ms, channels }
}

/// Sorts `samples` by timestamp, splits them into continuous segments,
/// discards segments longer than [`MAX_SEGMENT_MS`], and resamples each
/// surviving segment onto its own 50ms grid.
pub fn resample_vehicle(mut samples: Vec<RawSample>) -> Vec<ResampledSegment> {
    samples.sort_by_key(|s| s.timestamp_ms);
    split_into_segments(&samples)
        .into_iter()
        .filter(|segment| {
            let duration = segment.last().unwrap().timestamp_ms - segment.first().unwrap().timestamp_ms;
            duration <= MAX_SEGMENT_MS
        })
        .map(resample_segment)
        .collect()
}
