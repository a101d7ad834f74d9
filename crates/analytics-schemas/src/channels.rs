//! Well-known telemetry channel names.
//!
//! The Master Table is open-schema: any column that isn't one of the
//! metadata columns is treated as a numeric channel. These constants name
//! the channels the analytical stages look for; absence of any of them
//! is expected and handled gracefully by the stage that needs it.

/// Vehicle speed.
pub const SPEED: &str = "speed";
/// Front brake pressure, bar.
pub const BRAKE_PRESSURE: &str = "pbrake_f";
/// Throttle position, 0-100.
pub const THROTTLE: &str = "ath";
/// Selected gear.
pub const GEAR: &str = "gear";
/// Engine speed, rpm.
pub const ENGINE_SPEED: &str = "nmot";
/// Steering wheel angle, degrees.
pub const STEERING_ANGLE: &str = "steering_angle";
/// Per-lap running distance counter.
pub const LAP_DISTANCE: &str = "Laptrigger_lapdist_dls";

/// Aliases accepted for the vehicle identifier column in raw CSVs; the
/// first match is canonicalized to `Vehicle_ID` during ingestion.
pub const VEHICLE_ID_ALIASES: &[&str] = &[
    "Vehicle_ID",
    "vehicle_id",
    "vehicle_number",
    "original_vehicle_id",
];

/// Column names accepted for the long-form value column.
pub const VALUE_COLUMN_ALIASES: &[&str] = &["value", "telemetry_value"];

/// Long-form channel-name column.
pub const TELEMETRY_NAME_COLUMN: &str = "telemetry_name";

/// Absolute-timestamp column, required on every input file.
pub const META_TIME_COLUMN: &str = "meta_time";

/// Canonical vehicle identifier column, post-ingestion.
pub const VEHICLE_ID: &str = "Vehicle_ID";
/// Track identifier metadata column.
pub const TRACK: &str = "Track";
/// Race identifier metadata column.
pub const RACE_NUMBER: &str = "Race_Number";
/// Derived sector-label column, added by L2.
pub const SECTOR_ID: &str = "Sector_ID";

/// Returns true if `name` looks like a latitude column: contains "lat"
/// but not "lap" (case-insensitive).
pub fn looks_like_latitude(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.contains("lat") && !lower.contains("lap")
}

/// Returns true if `name` looks like a longitude column: contains "long"
/// but not "lap" (case-insensitive).
pub fn looks_like_longitude(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.contains("long") && !lower.contains("lap")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latitude_heuristic_rejects_lap_columns() {
        assert!(looks_like_latitude("gps_lat"));
        assert!(looks_like_latitude("Latitude"));
        assert!(!looks_like_latitude("Laptrigger_lapdist_dls"));
        assert!(!looks_like_latitude("lap_count"));
    }

    #[test]
    fn longitude_heuristic_rejects_lap_columns() {
        assert!(looks_like_longitude("gps_long"));
        assert!(looks_like_longitude("Longitude"));
        assert!(!looks_like_longitude("lap_longest_time"));
    }
}
