//! Parsing for the `meta_time` column, which arrives either as a bare
//! number of seconds since the epoch (with optional fractional part) or
//! as an ISO-8601 string.

use chrono::{DateTime, NaiveDateTime};

/// Parses a raw `meta_time` cell into milliseconds since the epoch.
///
/// Returns `None` for blank or unparseable cells; the caller drops such
/// rows rather than failing the whole file.
pub fn parse_meta_time(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(secs) = raw.parse::<f64>() {
        if secs.is_finite() {
            return Some((secs * 1000.0).round() as i64);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    const FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
    for fmt in FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    None
}
