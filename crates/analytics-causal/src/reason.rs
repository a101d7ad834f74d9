//! Ranks the four candidate deltas and picks the primary reason code.

use analytics_schemas::ReasonCode;

use crate::constants::{BRAKE_PRESSURE_SCALE, BRAKE_TIMING_SCALE, GEAR_SCALE, THROTTLE_COMMIT_SCALE};
use crate::deltas::Deltas;

/// Ranks the available deltas in `d` by normalized absolute magnitude
/// and returns the winning reason code together with its raw signed
/// value. Deltas that are `None` don't compete. Ties are broken by the
/// fixed iteration order: brake pressure, brake timing, throttle
/// commit, gear.
pub fn rank(d: &Deltas) -> (ReasonCode, f64) {
    let candidates = [
        (ReasonCode::BrakePressureDelta, d.brake_pressure, BRAKE_PRESSURE_SCALE),
        (ReasonCode::BrakeTimingDelta, d.brake_timing, BRAKE_TIMING_SCALE),
        (ReasonCode::ThrottleCommitDelta, d.throttle_commit, THROTTLE_COMMIT_SCALE),
        (ReasonCode::GearDelta, d.gear, GEAR_SCALE),
    ];

    let mut best: Option<(ReasonCode, f64, f64)> = None;
    for (code, raw, scale) in candidates {
        let Some(raw) = raw else { continue };
        let normalized = (raw * scale).abs();
        let replace = match &best {
            Some((_, _, best_norm)) => normalized > *best_norm,
            None => true,
        };
        if replace {
            best = Some((code, raw, normalized));
        }
    }
    best.map(|(code, raw, _)| (code, raw)).unwrap_or((ReasonCode::DataMissing, 0.0))
}
