//! Batch estimators over in-memory sample vectors
//!
//! Free functions operating on a complete, possibly-unsorted slice of
//! values. Each sorts its input in place when told it is not already
//! sorted; callers own that mutation. Degenerate inputs (empty slices, a
//! filter that excludes everything) yield zero-valued statistics rather
//! than errors.
//!
//! Note that [`median_absolute_deviation`] picks the element at index
//! `n / 2` as the median, while the histogram engine uses a
//! cumulative-frequency scan; the two rules disagree for even-length
//! inputs and both are kept deliberately.

use std::cmp::Ordering;

use log::debug;
use num_traits::{Float, Num, NumCast, ToPrimitive};

/// Numeric sample type accepted by the batch estimators.
///
/// Blanket-implemented for the primitive integers and floats. The outlier
/// filter in [`filtered_mean_stddev`] subtracts below the median, so
/// unsigned types are a poor fit there: a wide spread can underflow the
/// lower bound.
pub trait Sample: Copy + PartialOrd + Num + NumCast + ToPrimitive {}

impl<T> Sample for T where T: Copy + PartialOrd + Num + NumCast + ToPrimitive {}

fn sort_if_needed<T: Sample>(dist: &mut [T], is_sorted: bool) {
    if !is_sorted {
        dist.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    }
}

/// Outlier-filtered mean and unbiased standard deviation.
///
/// Approximates one sigma from the sorted sample, assuming rough
/// normality: the 1/3 and 2/3 quantiles sit about one standard deviation
/// apart around the median, so the larger of (median − oneThird) and
/// (twoThird − median) serves as the width estimate. Values outside
/// median ± 5 widths are discarded from both statistics entirely.
///
/// Returns `(0.0, 0.0)` for an empty slice or when no values survive the
/// filter.
pub fn filtered_mean_stddev<T: Sample>(dist: &mut [T], is_sorted: bool) -> (f64, f64) {
    if dist.is_empty() {
        return (0.0, 0.0);
    }

    sort_if_needed(dist, is_sorted);

    let n = dist.len();

    let median = dist[n / 2];
    let one_third = dist[n / 3];
    let two_third = dist[2 * n / 3];

    let below = median - one_third;
    let above = two_third - median;
    let approx_std = if below > above { below } else { above };

    let five: T = NumCast::from(5).unwrap();
    let biggest = median + approx_std * five;
    let smallest = median - approx_std * five;

    debug!(
        "filtered_mean_stddev: median={} approxStd={} bounds=[{}, {}]",
        median.to_f64().unwrap(),
        approx_std.to_f64().unwrap(),
        smallest.to_f64().unwrap(),
        biggest.to_f64().unwrap(),
    );

    let mut num_samples = 0usize;
    let mut mean = 0.0;

    for &x in dist.iter() {
        if smallest <= x && x <= biggest {
            num_samples += 1;
            mean += x.to_f64().unwrap();
        }
    }

    if num_samples == 0 {
        return (0.0, 0.0);
    }

    mean /= num_samples as f64;

    let mut stddev = 0.0;

    for &x in dist.iter() {
        if smallest <= x && x <= biggest {
            let dev = x.to_f64().unwrap() - mean;
            stddev += dev * dev;
        }
    }

    if num_samples > 1 {
        stddev = (stddev / (num_samples - 1) as f64).sqrt();
    }

    (mean, stddev)
}

/// Most common value, by scanning runs of equal values in the sorted
/// slice. The first maximal run wins ties, so for an ascending sort the
/// smallest of the tied values is returned. `T::zero()` for an empty
/// slice.
pub fn mode<T: Sample>(dist: &mut [T], is_sorted: bool) -> T {
    if dist.is_empty() {
        return T::zero();
    }

    sort_if_needed(dist, is_sorted);

    let mut best_val = dist[0];
    let mut best_cnt = 0usize;

    let mut run_val = dist[0];
    let mut run_cnt = 0usize;

    for &x in dist.iter() {
        if x != run_val {
            if run_cnt > best_cnt {
                best_cnt = run_cnt;
                best_val = run_val;
            }
            run_val = x;
            run_cnt = 0;
        }
        run_cnt += 1;
    }

    if run_cnt > best_cnt {
        best_val = run_val;
    }

    best_val
}

/// Median and median absolute deviation.
///
/// The median is the element at index `n / 2` (no averaging of the two
/// middle values for even-length input). The deviations `|x − median|`
/// are sorted and their `n / 2`-th element is the MAD. `(0, 0)` for an
/// empty slice.
pub fn median_absolute_deviation<T: Sample>(dist: &mut [T], is_sorted: bool) -> (T, T) {
    if dist.is_empty() {
        return (T::zero(), T::zero());
    }

    sort_if_needed(dist, is_sorted);

    let median = dist[dist.len() / 2];

    let mut m: Vec<T> = dist
        .iter()
        .map(|&x| if x < median { median - x } else { x - median })
        .collect();

    m.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    (median, m[m.len() / 2])
}

/// One step of an exponential moving average:
/// `alpha * value + (1 - alpha) * ema`.
///
/// # Panics
///
/// Panics unless `0 <= alpha <= 1`.
pub fn exponential_moving_average<T: Float>(alpha: T, ema: T, value: T) -> T {
    assert!(
        T::zero() <= alpha && alpha <= T::one(),
        "exponential_moving_average: alpha must be within [0, 1]"
    );

    alpha * value + (T::one() - alpha) * ema
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_filtered_excludes_outlier() {
        let mut dist = vec![1000i64, 1, 3, 2, 5, 4];
        let (mean, stddev) = filtered_mean_stddev(&mut dist, false);

        // Statistics of [1, 2, 3, 4, 5] alone.
        assert_relative_eq!(mean, 3.0, max_relative = 1e-12);
        assert_relative_eq!(stddev, 2.5f64.sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn test_filtered_empty_and_constant() {
        let mut empty: Vec<i64> = vec![];
        assert_eq!(filtered_mean_stddev(&mut empty, false), (0.0, 0.0));

        // Zero approximate sigma collapses the bounds onto the median.
        let mut constant = vec![4.0f64; 5];
        let (mean, stddev) = filtered_mean_stddev(&mut constant, true);
        assert_relative_eq!(mean, 4.0);
        assert_relative_eq!(stddev, 0.0);
    }

    #[test]
    fn test_filtered_on_floats() {
        let mut dist = vec![2.0f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let (mean, stddev) = filtered_mean_stddev(&mut dist, true);
        assert_relative_eq!(mean, 5.0, max_relative = 1e-12);
        assert_relative_eq!(stddev, (32.0f64 / 7.0).sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn test_mode_first_run_wins_ties() {
        let mut dist = vec![5i64, 0, 5, 0, 5, 0];
        assert_eq!(mode(&mut dist, false), 0);
    }

    #[test]
    fn test_mode_longest_run() {
        let mut dist = vec![5i64, 3, 5, 3, 7, 5];
        assert_eq!(mode(&mut dist, false), 5);

        let mut empty: Vec<i64> = vec![];
        assert_eq!(mode(&mut empty, false), 0);
    }

    #[test]
    fn test_mad_index_rule() {
        let mut dist = vec![5i64, 1, 3, 2, 4];
        let (median, mad) = median_absolute_deviation(&mut dist, false);
        assert_eq!(median, 3);
        assert_eq!(mad, 1);

        // Even length: pure index pick, the upper of the two middle values.
        let mut dist = vec![1i64, 2, 3, 4];
        let (median, mad) = median_absolute_deviation(&mut dist, true);
        assert_eq!(median, 3);
        assert_eq!(mad, 1);
    }

    #[test]
    fn test_mad_empty() {
        let mut empty: Vec<i64> = vec![];
        assert_eq!(median_absolute_deviation(&mut empty, false), (0, 0));
    }

    #[test]
    fn test_ema_endpoints() {
        assert_relative_eq!(exponential_moving_average(0.0, 10.0, 99.0), 10.0);
        assert_relative_eq!(exponential_moving_average(1.0, 10.0, 99.0), 99.0);
        assert_relative_eq!(exponential_moving_average(0.25, 8.0, 4.0), 7.0);
    }

    #[test]
    #[should_panic(expected = "alpha")]
    fn test_ema_rejects_alpha_above_one() {
        exponential_moving_average(1.5, 0.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "alpha")]
    fn test_ema_rejects_negative_alpha() {
        exponential_moving_average(-0.1, 0.0, 1.0);
    }
}
