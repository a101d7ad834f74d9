//! The hysteresis/persistence state machine for one vehicle pair.
//!
//! Each unordered pair of vehicles gets its own tracker. A bare rank
//! swap is never enough: the new leader must hold a gap of at least
//! [`HYSTERESIS_GAP_M`](crate::constants::HYSTERESIS_GAP_M) continuously
//! for at least [`PERSISTENCE_MS`](crate::constants::PERSISTENCE_MS)
//! before the swap is confirmed as a real overtake.

/// Where a candidate swap stands.
#[derive(Debug, Clone, PartialEq)]
enum Phase {
    /// No swap in progress; `leader` is the last confirmed leader of
    /// the pair (`None` until the pair has been observed at all).
    Idle { leader: Option<String> },
    /// `candidate` has been ahead by at least the hysteresis gap since
    /// `since_ms`, but not yet for the full persistence window.
    Open { candidate: String, since_ms: i64 },
}

/// Tracks one vehicle pair's swap state across a race.
#[derive(Debug, Clone)]
pub struct PairTracker {
    phase: Phase,
}

impl Default for PairTracker {
    fn default() -> Self {
        PairTracker {
            phase: Phase::Idle { leader: None },
        }
    }
}

impl PairTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one timestamp's observation for this pair: who currently
    /// leads and by how much. Returns `Some(winner)` the instant a swap
    /// is confirmed; the tracker resets to `Idle` with the new leader.
    pub fn observe(
        &mut self,
        current_leader: &str,
        gap_m: f64,
        ts_ms: i64,
        hysteresis_gap_m: f64,
        persistence_ms: i64,
    ) -> Option<String> {
        match &self.phase {
            Phase::Idle { leader: None } => {
                self.phase = Phase::Idle {
                    leader: Some(current_leader.to_string()),
                };
                None
            }
            Phase::Idle { leader: Some(leader) } if leader.as_str() == current_leader => None,
            Phase::Idle { .. } => {
                // A different vehicle now leads: open a candidate window
                // if the gap already clears the hysteresis threshold.
                if gap_m >= hysteresis_gap_m {
                    self.phase = Phase::Open {
                        candidate: current_leader.to_string(),
                        since_ms: ts_ms,
                    };
                }
                None
            }
            Phase::Open { candidate, since_ms } => {
                if current_leader != candidate.as_str() || gap_m < hysteresis_gap_m {
                    // Either the gap collapsed or a third vehicle took
                    // the lead: the candidate swap is rejected.
                    self.phase = Phase::Idle { leader: None };
                    return None;
                }
                if ts_ms - *since_ms >= persistence_ms {
                    let winner = candidate.clone();
                    self.phase = Phase::Idle {
                        leader: Some(winner.clone()),
                    };
                    Some(winner)
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{HYSTERESIS_GAP_M, PERSISTENCE_MS};

    #[test]
    fn sustained_swap_emits_exactly_once() {
        let mut tracker = PairTracker::new();
        assert_eq!(tracker.observe("A", 5.0, 0, HYSTERESIS_GAP_M, PERSISTENCE_MS), None);
        assert_eq!(tracker.observe("B", 3.0, 100, HYSTERESIS_GAP_M, PERSISTENCE_MS), None);
        assert_eq!(tracker.observe("B", 3.0, 250, HYSTERESIS_GAP_M, PERSISTENCE_MS), None);
        assert_eq!(
            tracker.observe("B", 3.0, 450, HYSTERESIS_GAP_M, PERSISTENCE_MS),
            Some("B".to_string())
        );
        assert_eq!(tracker.observe("B", 3.0, 500, HYSTERESIS_GAP_M, PERSISTENCE_MS), None);
    }

    #[test]
    fn gap_collapsing_before_persistence_cancels_the_candidate() {
        let mut tracker = PairTracker::new();
        tracker.observe("A", 5.0, 0, HYSTERESIS_GAP_M, PERSISTENCE_MS);
        tracker.observe("B", 3.0, 100, HYSTERESIS_GAP_M, PERSISTENCE_MS);
        // Gap falls back under the hysteresis threshold before 300ms elapse.
        assert_eq!(tracker.observe("B", 0.5, 200, HYSTERESIS_GAP_M, PERSISTENCE_MS), None);
        assert_eq!(tracker.observe("B", 3.0, 450, HYSTERESIS_GAP_M, PERSISTENCE_MS), None);
    }

    #[test]
    fn insufficient_gap_never_opens_a_candidate() {
        let mut tracker = PairTracker::new();
        tracker.observe("A", 5.0, 0, HYSTERESIS_GAP_M, PERSISTENCE_MS);
        for ts in (100..=1000).step_by(100) {
            assert_eq!(tracker.observe("B", 1.0, ts, HYSTERESIS_GAP_M, PERSISTENCE_MS), None);
        }
    }
}
