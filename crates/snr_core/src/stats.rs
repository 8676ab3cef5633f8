//! Scalar reductions over region sample sets.
//!
//! All reductions take samples already promoted to f64. Callers own the
//! minimum-sample checks; the functions here only guard against the
//! degenerate cases that would otherwise panic or produce NaN.

/// Median of `data`, reordering it in place.
///
/// Even-length input returns the mean of the two central order statistics.
/// Any NaN sample makes the median NaN (NumPy `median` semantics).
/// Returns `None` for an empty slice.
pub fn median_in_place(data: &mut [f64]) -> Option<f64> {
    let len = data.len();
    if len == 0 {
        return None;
    }
    if data.iter().any(|v| v.is_nan()) {
        return Some(f64::NAN);
    }
    let mid = len / 2;

    // select_nth_unstable finds the median in O(n)
    let (left_part, &mut median, _) = data.select_nth_unstable_by(mid, f64::total_cmp);

    if len % 2 == 1 {
        Some(median)
    } else {
        // Everything before mid is <= median, so the lower central value is
        // the maximum of the left partition.
        let prev_median = left_part
            .iter()
            .copied()
            .max_by(f64::total_cmp)
            .unwrap_or(median);
        Some((prev_median + median) / 2.0)
    }
}

/// Median of `data` without disturbing its order.
pub fn median(data: &[f64]) -> Option<f64> {
    let mut scratch = data.to_vec();
    median_in_place(&mut scratch)
}

/// Arithmetic mean. Returns `None` for an empty slice.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Sum of squared deviations from `center`, clamped to be non-negative.
///
/// NaN passes through unchanged so non-finite input stays detectable.
pub fn sum_squared_deviations(data: &[f64], center: f64) -> f64 {
    let sum: f64 = data.iter().map(|&x| (x - center) * (x - center)).sum();
    if sum < 0.0 {
        0.0
    } else {
        sum
    }
}

/// Standard deviation about `center` with `ddof` delta degrees of freedom:
/// `sqrt(sum((x - center)^2) / (n - ddof))`.
///
/// Returns `None` when `n <= ddof` (the normalizer would be zero or negative).
pub fn dispersion_about(data: &[f64], center: f64, ddof: usize) -> Option<f64> {
    let n = data.len();
    if n <= ddof {
        return None;
    }
    let normalizer = (n - ddof) as f64;
    Some((sum_squared_deviations(data, center) / normalizer).sqrt())
}

/// Standard deviation about the arithmetic mean (NumPy `std(ddof=...)`).
pub fn std_dev(data: &[f64], ddof: usize) -> Option<f64> {
    let center = mean(data)?;
    dispersion_about(data, center, ddof)
}
