//! Causal Analyzer (L4).
//!
//! For each overtake event, slices a +/-1.5s window of winner and loser
//! telemetry restricted to the event's sector, computes the four
//! candidate deltas (brake pressure, brake timing, throttle commit,
//! gear), and tags the event with whichever delta's normalized
//! magnitude is largest. Events with an invalid sector id or an empty
//! telemetry window are tagged `Invalid_Sector`/`Data_Missing` rather
//! than dropped.
//!
//! ```no_run
//! use std::collections::HashMap;
//! use analytics_schemas::MasterTable;
//!
//! let table = MasterTable::new();
//! let mut events_by_race = HashMap::new();
//! analytics_causal::run(&table, &mut events_by_race);
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod constants;
mod deltas;
mod reason;
mod window;

use std::collections::HashMap;

use analytics_schemas::{LlmContextInput, MasterTable, OvertakeEvent, ReasonCode};
use chrono::DateTime;

use constants::WINDOW_MS;
use window::vehicle_window;

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn parse_event_timestamp_ms(event: &OvertakeEvent) -> Option<i64> {
    DateTime::parse_from_rfc3339(&event.timestamp).ok().map(|dt| dt.timestamp_millis())
}

fn tag(event: &mut OvertakeEvent, code: ReasonCode, value: f64) {
    let rounded = round2(value);
    event.llm_context_input = Some(LlmContextInput {
        sector: event.sector_id.clone(),
        error: code.as_str().to_string(),
        value: rounded,
        context: "Overtake".to_string(),
    });
    event.reason_code = Some(code);
    event.reason_value = Some(rounded);
}

/// Classifies a single event in place against `table`.
pub fn classify_event(table: &MasterTable, event: &mut OvertakeEvent) {
    if !event.sector_id.starts_with("S_") {
        tag(event, ReasonCode::InvalidSector, 0.0);
        return;
    }

    let Some(center_ms) = parse_event_timestamp_ms(event) else {
        tag(event, ReasonCode::DataMissing, 0.0);
        return;
    };

    let in_sector = |row: usize, table: &MasterTable| table.sector_id[row].as_deref() == Some(event.sector_id.as_str());

    let winner_rows: Vec<usize> = vehicle_window(table, &event.track, &event.race_number, &event.winner_id, center_ms)
        .into_iter()
        .filter(|&row| in_sector(row, table))
        .collect();
    let loser_rows: Vec<usize> = vehicle_window(table, &event.track, &event.race_number, &event.loser_id, center_ms)
        .into_iter()
        .filter(|&row| in_sector(row, table))
        .collect();

    if winner_rows.is_empty() || loser_rows.is_empty() {
        tag(event, ReasonCode::DataMissing, 0.0);
        return;
    }

    let window_start_ms = center_ms - WINDOW_MS;
    let computed = deltas::compute(table, &winner_rows, &loser_rows, window_start_ms);
    if computed.is_empty() {
        tag(event, ReasonCode::DataMissing, 0.0);
        return;
    }

    let (code, value) = reason::rank(&computed);
    tag(event, code, value);
}

/// Classifies every event in `events_by_race` in place.
pub fn run(table: &MasterTable, events_by_race: &mut HashMap<(String, String), Vec<OvertakeEvent>>) {
    for events in events_by_race.values_mut() {
        for event in events.iter_mut() {
            classify_event(table, event);
        }
    }
}
