//! Event Detector (L3).
//!
//! Ranks vehicles by lap distance at every timestamp inside a labeled
//! critical sector, and raises an [`OvertakeEvent`] whenever a rank swap
//! survives a 2m hysteresis gap held for 300ms (see
//! [`constants`]). Each race's events are written as one JSON array.
//!
//! Reason codes and context are left `None` here; the Causal Analyzer
//! (L4) rewrites these files in place once it has classified each
//! event's cause.

#![warn(missing_docs, rust_2018_idioms)]

pub mod constants;
mod laps;
mod state_machine;
pub mod writer;

use std::collections::{BTreeMap, HashMap, HashSet};

use analytics_errors::stages::EventError;
use analytics_schemas::{channels, MasterTable, OvertakeEvent};
use chrono::{TimeZone, Utc};

use constants::{HYSTERESIS_GAP_M, PERSISTENCE_MS};
use laps::{estimate_track_length, lap_number, normalize};
use state_machine::PairTracker;

fn format_timestamp(ms: i64) -> String {
    Utc.timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| ms.to_string())
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Detects overtakes across the whole table, grouped by (track, race).
///
/// # Errors
///
/// Returns [`EventError::MissingColumn`] if the table has no lap-distance
/// channel at all.
pub fn run(table: &MasterTable) -> Result<HashMap<(String, String), Vec<OvertakeEvent>>, EventError> {
    if table.channel(channels::LAP_DISTANCE).is_none() {
        return Err(EventError::MissingColumn(channels::LAP_DISTANCE.to_string()));
    }

    let mut results = HashMap::new();
    for (track, race) in table.track_race_pairs() {
        let events = detect_race(table, &track, &race);
        results.insert((track, race), events);
    }
    Ok(results)
}

fn detect_race(table: &MasterTable, track: &str, race: &str) -> Vec<OvertakeEvent> {
    let race_rows = table.partition_rows_any_vehicle(track, race);

    let Some(track_length) =
        estimate_track_length(race_rows.iter().map(|&row| table.value(row, channels::LAP_DISTANCE)))
    else {
        tracing::warn!(track, race, "events: track length unusable, skipping race");
        return Vec::new();
    };

    let mut by_timestamp: BTreeMap<i64, HashMap<String, usize>> = BTreeMap::new();
    for row in race_rows {
        by_timestamp.entry(table.timestamps_ms[row]).or_default().insert(table.vehicle[row].clone(), row);
    }

    let mut pair_trackers: HashMap<(String, String), PairTracker> = HashMap::new();
    let mut emitted_ids: HashSet<String> = HashSet::new();
    let mut events = Vec::new();

    for (&ts, vehicles_at_ts) in &by_timestamp {
        let mut active: Vec<(String, f64, f64, String)> = Vec::new();
        for (vehicle, &row) in vehicles_at_ts {
            let raw_lapdist = table.value(row, channels::LAP_DISTANCE);
            if raw_lapdist.is_nan() {
                continue;
            }
            if let Some(sector) = &table.sector_id[row] {
                let normalized = normalize(raw_lapdist, track_length);
                active.push((vehicle.clone(), raw_lapdist, normalized, sector.clone()));
            }
        }

        if active.len() < 2 {
            continue;
        }
        active.sort_by(|a, b| a.0.cmp(&b.0));

        for i in 0..active.len() {
            for j in (i + 1)..active.len() {
                let (vehicle_a, raw_a, dist_a, sector_a) = &active[i];
                let (vehicle_b, raw_b, dist_b, _) = &active[j];
                if (dist_a - dist_b).abs() < f64::EPSILON {
                    continue;
                }
                let (leader, leader_raw, loser) = if dist_a > dist_b {
                    (vehicle_a.clone(), *raw_a, vehicle_b.clone())
                } else {
                    (vehicle_b.clone(), *raw_b, vehicle_a.clone())
                };
                let gap = (dist_a - dist_b).abs();

                let key = pair_key(vehicle_a, vehicle_b);
                let tracker = pair_trackers.entry(key).or_default();
                let Some(winner) = tracker.observe(&leader, gap, ts, HYSTERESIS_GAP_M, PERSISTENCE_MS) else {
                    continue;
                };
                let lap = lap_number(leader_raw, track_length);
                let composite_id = OvertakeEvent::composite_id(sector_a, lap, &winner, &loser);
                if !emitted_ids.insert(composite_id.clone()) {
                    continue;
                }
                events.push(OvertakeEvent {
                    timestamp: format_timestamp(ts),
                    winner_id: winner,
                    loser_id: loser,
                    sector_id: sector_a.clone(),
                    track: track.to_string(),
                    race_number: race.to_string(),
                    lap_number: lap,
                    critical_event_id: composite_id,
                    reason_code: None,
                    reason_value: None,
                    llm_context_input: None,
                });
            }
        }
    }

    events
}
