//! Rolling-median smoothing, used to denoise raw GPS fixes before
//! bearing calculation.

/// Smooths `values` with a centered rolling median of window size 5,
/// shrinking the window near the edges rather than padding.
pub fn rolling_median(values: &[f64]) -> Vec<f64> {
    const HALF_WINDOW: usize = 2;
    let n = values.len();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let lo = i.saturating_sub(HALF_WINDOW);
        let hi = (i + HALF_WINDOW + 1).min(n);
        out.push(median(&values[lo..hi]));
    }
    out
}

fn median(window: &[f64]) -> f64 {
    let mut sorted: Vec<f64> = window.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("GPS coordinates are never NaN here"));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooths_a_single_outlier() {
        let values = vec![1.0, 1.0, 100.0, 1.0, 1.0];
        let smoothed = rolling_median(&values);
        assert_eq!(smoothed, vec![1.0, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn shrinks_the_window_at_the_edges() {
        let values = vec![5.0, 1.0, 2.0];
        let smoothed = rolling_median(&values);
        // index 0: window [5,1,2] -> median 2; matches a 3-wide centered window.
        assert_eq!(smoothed[0], 2.0);
    }

    #[test]
    fn passes_through_a_constant_sequence() {
        let values = vec![3.0; 10];
        assert_eq!(rolling_median(&values), values);
    }
}
