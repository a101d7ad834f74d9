//! Thresholds and normalization scales used to classify an overtake's
//! primary cause.

/// Half-width of the window examined around an event's timestamp,
/// milliseconds.
pub const WINDOW_MS: i64 = 1_500;

/// Brake pressure, bar, at or above which a vehicle is considered to
/// have started braking.
pub const BRAKE_ONSET_BAR: f64 = 0.5;

/// Throttle position, percent, at or above which a vehicle is
/// considered to have committed back to full throttle.
pub const THROTTLE_COMMIT_PCT: f64 = 95.0;

/// Multiplier applied to the brake-pressure delta (bar) before ranking
/// it against the other candidate reasons.
pub const BRAKE_PRESSURE_SCALE: f64 = 10.0;

/// Multiplier applied to the brake-timing delta (meters of lap
/// distance) before ranking.
pub const BRAKE_TIMING_SCALE: f64 = 0.5;

/// Multiplier applied to the throttle-commit delta (seconds, or the
/// mean-throttle fallback, percent) before ranking.
pub const THROTTLE_COMMIT_SCALE: f64 = 0.1;

/// Multiplier applied to the gear delta (gear steps) before ranking.
pub const GEAR_SCALE: f64 = 5.0;
