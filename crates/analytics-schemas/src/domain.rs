//! The Master Table: an ordered, columnar, open-schema telemetry table.
//!
//! Per the redesign note in the specification, open-schema tabular data
//! is represented as a columnar table with a typed header map plus a
//! dynamic mapping from channel name to column index, rather than a
//! `HashMap<String, f64>` per row. Stage code looks channels up by name
//! and degrades gracefully when a channel is absent.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single numeric telemetry channel, stored as one column across all
/// rows of the table (`f64::NAN` signals "missing").
pub type Channel = Vec<f64>;

/// The authoritative, time-gridded, multi-vehicle, multi-channel table
/// produced by L1 and enriched with sector labels by L2.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MasterTable {
    /// Absolute timestamp, milliseconds since epoch.
    pub timestamps_ms: Vec<i64>,
    /// Track identifier, never empty on a valid row.
    pub track: Vec<String>,
    /// Race identifier, never empty on a valid row.
    pub race: Vec<String>,
    /// Vehicle identifier, never empty on a valid row.
    pub vehicle: Vec<String>,
    /// Sector label, `None` until L2 runs.
    pub sector_id: Vec<Option<String>>,
    channel_names: Vec<String>,
    channel_index: HashMap<String, usize>,
    channels: Vec<Channel>,
}

impl MasterTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows in the table.
    pub fn len(&self) -> usize {
        self.timestamps_ms.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.timestamps_ms.is_empty()
    }

    /// Returns the channel names currently present, in insertion order.
    pub fn channel_names(&self) -> &[String] {
        &self.channel_names
    }

    /// Returns the column index for `name`, allocating a new
    /// NaN-filled column (sized to the current row count) if it
    /// doesn't exist yet.
    pub fn ensure_channel(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.channel_index.get(name) {
            return idx;
        }
        let idx = self.channels.len();
        self.channels.push(vec![f64::NAN; self.len()]);
        self.channel_names.push(name.to_string());
        self.channel_index.insert(name.to_string(), idx);
        idx
    }

    /// Returns an immutable view of a channel's values, if present.
    pub fn channel(&self, name: &str) -> Option<&[f64]> {
        self.channel_index.get(name).map(|&idx| self.channels[idx].as_slice())
    }

    /// Returns a single value, or `NaN` if the channel is absent or the
    /// row is out of range.
    pub fn value(&self, row: usize, name: &str) -> f64 {
        self.channel(name)
            .and_then(|col| col.get(row))
            .copied()
            .unwrap_or(f64::NAN)
    }

    /// Sets a single value in `name`'s column at `row`, growing the
    /// column with `NaN` if it doesn't exist yet. Panics if `row` is out
    /// of bounds for the table's row count.
    pub fn set(&mut self, row: usize, name: &str, value: f64) {
        assert!(row < self.len(), "row {row} out of bounds");
        let idx = self.ensure_channel(name);
        self.channels[idx][row] = value;
    }

    /// Appends a new row with metadata only; every existing channel gets
    /// a trailing `NaN`. Returns the new row's index.
    pub fn push_row(&mut self, timestamp_ms: i64, track: &str, race: &str, vehicle: &str) -> usize {
        let row = self.len();
        self.timestamps_ms.push(timestamp_ms);
        self.track.push(track.to_string());
        self.race.push(race.to_string());
        self.vehicle.push(vehicle.to_string());
        self.sector_id.push(None);
        for col in &mut self.channels {
            col.push(f64::NAN);
        }
        row
    }

    /// Appends the rows of `other` after this table's rows, unioning
    /// channel sets (channels present in only one side are NaN-padded
    /// for the rows from the other side).
    pub fn extend(&mut self, other: MasterTable) {
        let base = self.len();
        for name in other.channel_names.clone() {
            self.ensure_channel(&name);
        }
        self.timestamps_ms.extend(other.timestamps_ms.iter().copied());
        self.track.extend(other.track.iter().cloned());
        self.race.extend(other.race.iter().cloned());
        self.vehicle.extend(other.vehicle.iter().cloned());
        self.sector_id.extend(other.sector_id.iter().cloned());
        let added = other.len();
        for col in &mut self.channels {
            let extra = base + added - col.len();
            if extra > 0 {
                col.extend(std::iter::repeat(f64::NAN).take(extra));
            }
        }
        for (name, idx) in &other.channel_index {
            let dst = self.channel_index[name];
            for (i, v) in other.channels[*idx].iter().enumerate() {
                self.channels[dst][base + i] = *v;
            }
        }
    }

    /// Sorts all rows (and their per-channel values in lock-step) by
    /// ascending timestamp.
    pub fn sort_by_timestamp(&mut self) {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by_key(|&i| self.timestamps_ms[i]);
        self.reorder(&order);
    }

    /// Reorders every column according to `order`, a permutation of row
    /// indices.
    pub fn reorder(&mut self, order: &[usize]) {
        self.timestamps_ms = order.iter().map(|&i| self.timestamps_ms[i]).collect();
        self.track = order.iter().map(|&i| self.track[i].clone()).collect();
        self.race = order.iter().map(|&i| self.race[i].clone()).collect();
        self.vehicle = order.iter().map(|&i| self.vehicle[i].clone()).collect();
        self.sector_id = order.iter().map(|&i| self.sector_id[i].clone()).collect();
        for col in &mut self.channels {
            *col = order.iter().map(|&i| col[i]).collect();
        }
    }

    /// Row indices belonging to (track, race, vehicle), preserving
    /// existing order.
    pub fn partition_rows(&self, track: &str, race: &str, vehicle: &str) -> Vec<usize> {
        (0..self.len())
            .filter(|&i| self.track[i] == track && self.race[i] == race && self.vehicle[i] == vehicle)
            .collect()
    }

    /// Row indices belonging to (track, race), across every vehicle,
    /// preserving existing order.
    pub fn partition_rows_any_vehicle(&self, track: &str, race: &str) -> Vec<usize> {
        (0..self.len()).filter(|&i| self.track[i] == track && self.race[i] == race).collect()
    }

    /// Distinct (track, race) pairs present in the table, in first-seen
    /// order.
    pub fn track_race_pairs(&self) -> Vec<(String, String)> {
        let mut seen = Vec::new();
        for i in 0..self.len() {
            let pair = (self.track[i].clone(), self.race[i].clone());
            if !seen.contains(&pair) {
                seen.push(pair);
            }
        }
        seen
    }

    /// Distinct track identifiers present in the table, in first-seen
    /// order.
    pub fn tracks(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for t in &self.track {
            if !seen.contains(t) {
                seen.push(t.clone());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_channel_is_idempotent_and_nan_padded() {
        let mut table = MasterTable::new();
        table.push_row(0, "Barber", "R1", "12");
        table.push_row(50, "Barber", "R1", "12");
        let idx_a = table.ensure_channel("speed");
        let idx_b = table.ensure_channel("speed");
        assert_eq!(idx_a, idx_b);
        assert!(table.value(0, "speed").is_nan());
    }

    #[test]
    fn set_and_value_roundtrip() {
        let mut table = MasterTable::new();
        table.push_row(0, "Barber", "R1", "12");
        table.set(0, "speed", 42.0);
        assert_eq!(table.value(0, "speed"), 42.0);
        assert!(table.value(0, "missing_channel").is_nan());
    }

    #[test]
    fn extend_unions_channels_with_nan_padding() {
        let mut a = MasterTable::new();
        a.push_row(0, "Barber", "R1", "12");
        a.set(0, "speed", 10.0);

        let mut b = MasterTable::new();
        b.push_row(50, "Barber", "R1", "12");
        b.set(0, "pbrake_f", 5.0);

        a.extend(b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.value(0, "speed"), 10.0);
        assert!(a.value(0, "pbrake_f").is_nan());
        assert!(a.value(1, "speed").is_nan());
        assert_eq!(a.value(1, "pbrake_f"), 5.0);
    }

    #[test]
    fn sort_by_timestamp_reorders_all_columns_together() {
        let mut table = MasterTable::new();
        table.push_row(100, "Barber", "R1", "12");
        table.push_row(0, "Barber", "R1", "12");
        table.set(0, "speed", 1.0);
        table.set(1, "speed", 2.0);

        table.sort_by_timestamp();

        assert_eq!(table.timestamps_ms, vec![0, 100]);
        assert_eq!(table.value(0, "speed"), 2.0);
        assert_eq!(table.value(1, "speed"), 1.0);
    }

    #[test]
    fn partition_rows_filters_by_track_race_vehicle() {
        let mut table = MasterTable::new();
        table.push_row(0, "Barber", "R1", "12");
        table.push_row(0, "Barber", "R1", "45");
        table.push_row(0, "Sonoma", "R1", "12");

        let rows = table.partition_rows("Barber", "R1", "12");
        assert_eq!(rows, vec![0]);
    }
}
