//! Named thresholds for overtake detection.

/// Minimum lap-distance gap, meters, a new leader must hold over the
/// previous one before a position swap is treated as a real overtake
/// rather than side-by-side noise.
pub const HYSTERESIS_GAP_M: f64 = 2.0;

/// How long the gap must hold before the swap is confirmed and the
/// event is emitted, milliseconds.
pub const PERSISTENCE_MS: i64 = 300;

/// Minimum plausible track length, meters. A race whose estimated track
/// length (the maximum observed lap-distance reading) falls below this
/// is skipped entirely rather than producing nonsense lap numbers.
pub const MIN_TRACK_LENGTH_M: f64 = 1000.0;
