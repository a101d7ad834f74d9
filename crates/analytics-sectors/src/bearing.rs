//! Great-circle bearing and heading-delta arithmetic.

/// Initial great-circle bearing from `(lat1, long1)` to `(lat2, long2)`,
/// in degrees, normalized to `[0, 360)`.
pub fn great_circle_bearing(lat1: f64, long1: f64, lat2: f64, long2: f64) -> f64 {
    let (lat1, lat2) = (lat1.to_radians(), lat2.to_radians());
    let delta_long = (long2 - long1).to_radians();

    let y = delta_long.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_long.cos();
    let bearing = y.atan2(x).to_degrees();
    (bearing + 360.0) % 360.0
}

/// Signed heading change from `from` to `to`, wrapped to `(-180, 180]`
/// so that e.g. 359 -> 1 reads as +2 degrees, not -358.
pub fn wrap_delta(from: f64, to: f64) -> f64 {
    let raw = to - from;
    let wrapped = ((raw + 180.0).rem_euclid(360.0)) - 180.0;
    if (wrapped + 180.0).abs() < f64::EPSILON {
        180.0
    } else {
        wrapped
    }
}
