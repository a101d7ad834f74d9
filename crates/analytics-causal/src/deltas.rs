//! The four comparative deltas examined for each candidate overtake.

use analytics_schemas::{channels, MasterTable};

use crate::constants::{BRAKE_ONSET_BAR, THROTTLE_COMMIT_PCT};

/// The deltas computed for one event, each `None` if the channel or
/// window data needed to compute it wasn't available.
#[derive(Debug, Default, Clone, Copy)]
pub struct Deltas {
    /// Winner's peak brake pressure minus the loser's, bar.
    pub brake_pressure: Option<f64>,
    /// Lap distance at which the winner crossed the brake-onset
    /// threshold minus the loser's, meters. Positive means the winner
    /// carried speed further down the straight before braking.
    pub brake_timing: Option<f64>,
    /// Time (seconds after window start) the loser took to commit to
    /// throttle minus the winner's, or the mean-throttle delta
    /// (winner minus loser) if either side never crossed the
    /// threshold.
    pub throttle_commit: Option<f64>,
    /// Winner's modal gear minus the loser's modal gear.
    pub gear: Option<f64>,
}

impl Deltas {
    /// True if every delta came back `None`, meaning no usable
    /// telemetry was found for either vehicle in the window.
    pub fn is_empty(&self) -> bool {
        self.brake_pressure.is_none()
            && self.brake_timing.is_none()
            && self.throttle_commit.is_none()
            && self.gear.is_none()
    }
}

fn peak(table: &MasterTable, rows: &[usize], channel: &str) -> Option<f64> {
    rows.iter()
        .map(|&row| table.value(row, channel))
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
}

fn mean(table: &MasterTable, rows: &[usize], channel: &str) -> Option<f64> {
    let values: Vec<f64> = rows.iter().map(|&row| table.value(row, channel)).filter(|v| !v.is_nan()).collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// First row, in the given order, whose `channel` value is at or above
/// `threshold`.
fn onset_row(table: &MasterTable, rows: &[usize], channel: &str, threshold: f64) -> Option<usize> {
    rows.iter().copied().find(|&row| table.value(row, channel) >= threshold)
}

/// Most frequent integral gear value among `rows`, ties broken toward
/// whichever value was observed first.
fn modal_gear(table: &MasterTable, rows: &[usize]) -> Option<f64> {
    let mut counts: Vec<(i64, usize, usize)> = Vec::new(); // (gear, count, first_seen_index)
    for (i, &row) in rows.iter().enumerate() {
        let v = table.value(row, channels::GEAR);
        if v.is_nan() {
            continue;
        }
        let key = v.round() as i64;
        match counts.iter_mut().find(|(gear, _, _)| *gear == key) {
            Some(entry) => entry.1 += 1,
            None => counts.push((key, 1, i)),
        }
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.2.cmp(&a.2)))
        .map(|(gear, _, _)| gear as f64)
}

/// Computes every available delta between the winner's and loser's
/// windows. `window_start_ms` anchors the throttle-commit delta's
/// "seconds after window start" unit.
pub fn compute(table: &MasterTable, winner_rows: &[usize], loser_rows: &[usize], window_start_ms: i64) -> Deltas {
    let brake_pressure = peak(table, winner_rows, channels::BRAKE_PRESSURE)
        .zip(peak(table, loser_rows, channels::BRAKE_PRESSURE))
        .map(|(w, l)| w - l);

    let brake_timing = onset_row(table, winner_rows, channels::BRAKE_PRESSURE, BRAKE_ONSET_BAR)
        .zip(onset_row(table, loser_rows, channels::BRAKE_PRESSURE, BRAKE_ONSET_BAR))
        .map(|(w_row, l_row)| table.value(w_row, channels::LAP_DISTANCE) - table.value(l_row, channels::LAP_DISTANCE))
        .filter(|v| !v.is_nan());

    let winner_throttle_onset = onset_row(table, winner_rows, channels::THROTTLE, THROTTLE_COMMIT_PCT);
    let loser_throttle_onset = onset_row(table, loser_rows, channels::THROTTLE, THROTTLE_COMMIT_PCT);
    let throttle_commit = match (winner_throttle_onset, loser_throttle_onset) {
        (Some(w_row), Some(l_row)) => {
            let winner_t = (table.timestamps_ms[w_row] - window_start_ms) as f64 / 1000.0;
            let loser_t = (table.timestamps_ms[l_row] - window_start_ms) as f64 / 1000.0;
            Some(loser_t - winner_t)
        }
        _ => mean(table, winner_rows, channels::THROTTLE)
            .zip(mean(table, loser_rows, channels::THROTTLE))
            .map(|(w, l)| w - l),
    };

    let gear = modal_gear(table, winner_rows).zip(modal_gear(table, loser_rows)).map(|(w, l)| w - l);

    Deltas {
        brake_pressure,
        brake_timing,
        throttle_commit,
        gear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_brake_traces() -> (MasterTable, Vec<usize>, Vec<usize>) {
        let mut table = MasterTable::new();
        let mut winner_rows = Vec::new();
        let mut loser_rows = Vec::new();
        for (ts, dist, w_pressure, l_pressure) in [
            (-200, 100.0, 0.2, 0.8),
            (-100, 110.0, 0.6, 0.9),
            (0, 120.0, 0.9, 1.0),
        ] {
            let row = table.push_row(ts, "Barber", "R1", "winner");
            table.set(row, channels::LAP_DISTANCE, dist);
            table.set(row, channels::BRAKE_PRESSURE, w_pressure);
            winner_rows.push(row);

            let row = table.push_row(ts, "Barber", "R1", "loser");
            table.set(row, channels::LAP_DISTANCE, dist - 5.0);
            table.set(row, channels::BRAKE_PRESSURE, l_pressure);
            loser_rows.push(row);
        }
        (table, winner_rows, loser_rows)
    }

    #[test]
    fn brake_pressure_delta_is_winner_peak_minus_loser_peak() {
        let (table, winner, loser) = table_with_brake_traces();
        let deltas = compute(&table, &winner, &loser, -1500);
        assert_eq!(deltas.brake_pressure, Some(0.9 - 1.0));
    }

    #[test]
    fn brake_timing_delta_is_positive_when_winner_brakes_deeper() {
        let (table, winner, loser) = table_with_brake_traces();
        let deltas = compute(&table, &winner, &loser, -1500);
        // loser crosses 0.5 bar at t=-200 (dist 95.0), winner at t=-100
        // (dist 110.0): winner carried on 15m further before braking.
        assert_eq!(deltas.brake_timing, Some(15.0));
    }

    #[test]
    fn empty_windows_yield_no_deltas_at_all() {
        let table = MasterTable::new();
        let deltas = compute(&table, &[], &[], 0);
        assert!(deltas.is_empty());
    }

    #[test]
    fn throttle_commit_falls_back_to_mean_when_threshold_never_crossed() {
        let mut table = MasterTable::new();
        let row = table.push_row(0, "Barber", "R1", "winner");
        table.set(row, channels::THROTTLE, 70.0);
        let winner_rows = vec![row];
        let row = table.push_row(0, "Barber", "R1", "loser");
        table.set(row, channels::THROTTLE, 40.0);
        let loser_rows = vec![row];

        let deltas = compute(&table, &winner_rows, &loser_rows, 0);
        assert_eq!(deltas.throttle_commit, Some(30.0));
    }

    #[test]
    fn modal_gear_breaks_ties_toward_first_observed() {
        let mut table = MasterTable::new();
        let mut winner_rows = Vec::new();
        for gear in [3.0, 4.0, 3.0, 4.0] {
            let row = table.push_row(0, "Barber", "R1", "winner");
            table.set(row, channels::GEAR, gear);
            winner_rows.push(row);
        }
        let mut loser_rows = Vec::new();
        let row = table.push_row(0, "Barber", "R1", "loser");
        table.set(row, channels::GEAR, 2.0);
        loser_rows.push(row);

        let deltas = compute(&table, &winner_rows, &loser_rows, 0);
        assert_eq!(deltas.gear, Some(3.0 - 2.0));
    }
}
