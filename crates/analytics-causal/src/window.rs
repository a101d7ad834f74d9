//! Slices a vehicle's rows to the window around an event.

use analytics_schemas::MasterTable;

use crate::constants::WINDOW_MS;

/// Row indices for `vehicle` in (`track`, `race`) whose timestamp falls
/// within `WINDOW_MS` of `center_ms`, in ascending time order.
pub fn vehicle_window(table: &MasterTable, track: &str, race: &str, vehicle: &str, center_ms: i64) -> Vec<usize> {
    let mut rows: Vec<usize> = table
        .partition_rows(track, race, vehicle)
        .into_iter()
        .filter(|&row| (table.timestamps_ms[row] - center_ms).abs() <= WINDOW_MS)
        .collect();
    rows.sort_by_key(|&row| table.timestamps_ms[row]);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_rows_inside_the_window() {
        let mut table = MasterTable::new();
        table.push_row(-2000, "Barber", "R1", "12");
        table.push_row(-1000, "Barber", "R1", "12");
        table.push_row(0, "Barber", "R1", "12");
        table.push_row(1000, "Barber", "R1", "12");
        table.push_row(2000, "Barber", "R1", "12");

        let rows = vehicle_window(&table, "Barber", "R1", "12", 0);
        assert_eq!(rows.len(), 3);
        assert_eq!(table.timestamps_ms[rows[0]], -1000);
        assert_eq!(table.timestamps_ms[rows[2]], 1000);
    }
}
