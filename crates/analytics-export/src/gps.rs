//! Shared GPS-channel lookup, mirroring the heuristic the Sector
//! Discoverer (L2) uses to find latitude/longitude columns.

use analytics_schemas::{channels, MasterTable};

/// Returns the `(latitude, longitude)` channel names present in
/// `table`, if both can be found by name.
pub fn find_gps_channel_names(table: &MasterTable) -> Option<(String, String)> {
    let lat = table.channel_names().iter().find(|name| channels::looks_like_latitude(name))?.clone();
    let long = table.channel_names().iter().find(|name| channels::looks_like_longitude(name))?.clone();
    Some((lat, long))
}
