//! Small descriptive-statistics helpers shared by the simulators.
//!
//! Every function tolerates empty input and returns `0.0` rather than NaN.

use std::collections::HashMap;
use std::hash::Hash;

/// Arithmetic mean. Empty input yields 0.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation. Empty input yields 0.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Percentile `p` (0-100) of an already sorted slice, linearly interpolated
/// between the two nearest ranks.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let weight = rank - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * weight
        }
    }
}

/// Sort a copy of `values` ascending.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Standard deviation divided by mean.
///
/// A zero (or negative) mean has no meaningful relative spread; it is treated
/// as maximal instability and reported as `f64::MAX`.
pub fn coefficient_of_variation(mean: f64, std_dev: f64) -> f64 {
    if mean <= f64::EPSILON {
        f64::MAX
    } else {
        std_dev / mean
    }
}

/// Most frequent item. Ties go to the smallest item by `Ord`, so the result
/// does not depend on input order.
pub fn mode<T, I>(items: I) -> Option<T>
where
    T: Copy + Eq + Hash + Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, usize> = HashMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then_with(|| b.cmp(a)))
        .map(|(item, _)| item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&values) - 5.0).abs() < 1e-12);
        assert!((std_dev(&values) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_inputs_are_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(std_dev(&[]), 0.0);
        assert_eq!(percentile_sorted(&[], 50.0), 0.0);
    }

    #[test]
    fn test_percentile_interpolates() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(percentile_sorted(&values, 0.0), 10.0);
        assert_eq!(percentile_sorted(&values, 50.0), 30.0);
        assert_eq!(percentile_sorted(&values, 100.0), 50.0);
        // rank = 0.25 * 4 = 1.0 -> 20; rank for p=30 is 1.2 -> 22
        assert!((percentile_sorted(&values, 30.0) - 22.0).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_single_value() {
        assert_eq!(percentile_sorted(&[42.0], 95.0), 42.0);
    }

    #[test]
    fn test_coefficient_of_variation_zero_mean() {
        assert_eq!(coefficient_of_variation(0.0, 3.0), f64::MAX);
        assert!((coefficient_of_variation(50.0, 10.0) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_mode_breaks_ties_deterministically() {
        assert_eq!(mode([3, 1, 3, 1, 2]), Some(1));
        assert_eq!(mode([5, 5, 2]), Some(5));
        assert_eq!(mode(Vec::<u8>::new()), None);
    }
}
