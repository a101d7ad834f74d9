//! Straight/critical-sector classification from a smoothed GPS trace,
//! and ordinal `S_NNN` labeling of the critical runs.

use crate::bearing::{great_circle_bearing, wrap_delta};

/// Curvature classification of a single GPS-trace point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Heading change per step is at or below the curvature threshold.
    Straight,
    /// Heading change per step exceeds the curvature threshold: a
    /// cornering zone, and therefore an overtaking opportunity.
    CriticalSector,
}

/// Classifies every point of a smoothed `(lat, long)` trace by the
/// per-step heading change, in degrees, against `threshold_deg`.
///
/// Traces shorter than 3 points have no measurable curvature and are
/// classified entirely [`Classification::Straight`].
pub fn classify_points(lat: &[f64], long: &[f64], threshold_deg: f64) -> Vec<Classification> {
    let n = lat.len();
    debug_assert_eq!(n, long.len());
    if n < 3 {
        return vec![Classification::Straight; n];
    }

    let bearings: Vec<f64> = (0..n - 1).map(|i| great_circle_bearing(lat[i], long[i], lat[i + 1], long[i + 1])).collect();
    let deltas: Vec<f64> = (0..bearings.len() - 1).map(|i| wrap_delta(bearings[i], bearings[i + 1]).abs()).collect();

    let mut classes = vec![Classification::Straight; n];
    for (i, &delta) in deltas.iter().enumerate() {
        classes[i + 1] = if delta > threshold_deg {
            Classification::CriticalSector
        } else {
            Classification::Straight
        };
    }
    classes[0] = classes[1];
    classes[n - 1] = classes[n - 2];
    classes
}

/// Walks `classes` and assigns a zero-padded ordinal label
/// (`S_001`, `S_002`, ...) to each maximal run of
/// [`Classification::CriticalSector`], in encounter order. Straight
/// points get `None`.
pub fn assign_sector_labels(classes: &[Classification]) -> Vec<Option<String>> {
    let mut labels = vec![None; classes.len()];
    let mut next_ordinal = 1usize;
    let mut i = 0;
    while i < classes.len() {
        if classes[i] == Classification::CriticalSector {
            let start = i;
            while i < classes.len() && classes[i] == Classification::CriticalSector {
                i += 1;
            }
            let label = format!("S_{next_ordinal:03}");
            for slot in &mut labels[start..i] {
                *slot = Some(label.clone());
            }
            next_ordinal += 1;
        } else {
            i += 1;
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn constant_curvature_circle_is_one_continuous_critical_sector() {
        // A point driven around a small circle: constant nonzero
        // per-step heading change everywhere, so the whole lap should
        // collapse to a single labeled sector.
        let n = 36;
        let radius = 0.01;
        let lat: Vec<f64> = (0..n).map(|i| radius * (2.0 * PI * i as f64 / n as f64).sin()).collect();
        let long: Vec<f64> = (0..n).map(|i| radius * (2.0 * PI * i as f64 / n as f64).cos()).collect();

        let classes = classify_points(&lat, &long, 0.1);
        assert!(classes.iter().all(|&c| c == Classification::CriticalSector));

        let labels = assign_sector_labels(&classes);
        assert!(labels.iter().all(|l| l.as_deref() == Some("S_001")));
    }

    #[test]
    fn a_straight_line_has_no_critical_sectors() {
        let lat: Vec<f64> = (0..20).map(|i| i as f64 * 0.0001).collect();
        let long = vec![0.0; 20];
        let classes = classify_points(&lat, &long, 0.1);
        let labels = assign_sector_labels(&classes);
        assert!(labels.iter().all(Option::is_none));
    }

    #[test]
    fn two_separate_corners_get_two_ordinals() {
        let classes = vec![
            Classification::Straight,
            Classification::CriticalSector,
            Classification::CriticalSector,
            Classification::Straight,
            Classification::Straight,
            Classification::CriticalSector,
            Classification::Straight,
        ];
        let labels = assign_sector_labels(&classes);
        assert_eq!(labels[1].as_deref(), Some("S_001"));
        assert_eq!(labels[2].as_deref(), Some("S_001"));
        assert_eq!(labels[5].as_deref(), Some("S_002"));
        assert!(labels[0].is_none());
        assert!(labels[3].is_none());
    }
}
