//! Statistical helper functions for the boreas indicator pipeline.
//!
//! Slice-based, allocation-light helpers shared by the outlier and
//! delta-change engines. Quantiles use the type-7 algorithm (linear
//! interpolation, R's default) so that group statistics match the
//! reference tooling the pipeline's thresholds were tuned with.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator. Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Population standard deviation (N denominator). Returns 0.0 if empty.
pub fn population_sd(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let nf = data.len() as f64;
    let mean = data.iter().sum::<f64>() / nf;
    (data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / nf).sqrt()
}

/// Type-7 quantile (linear interpolation between order statistics).
///
/// **Expects pre-sorted input** (caller's responsibility).
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_type7: input must not be empty"
    );
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Median of pre-sorted data. For even length, averages the middle two values.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn median(sorted: &[f64]) -> f64 {
    assert!(!sorted.is_empty(), "median: input must not be empty");
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Sorts a copy of `data` ascending, placing NaN last.
pub fn sorted_copy(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// Median absolute deviation with constant = 1: `median(|x - median(x)|)`.
///
/// Returns 0.0 if `data` is empty.
pub fn mad(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sorted = sorted_copy(data);
    let med = median(&sorted);
    let mut abs_devs: Vec<f64> = data.iter().map(|&x| (x - med).abs()).collect();
    abs_devs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    median(&abs_devs)
}

/// Standardizes `data` with the population SD (N denominator).
///
/// A constant slice (SD = 0) yields all-zero scores, so nothing can exceed
/// a positive z threshold.
pub fn zscores(data: &[f64]) -> Vec<f64> {
    let sd = population_sd(data);
    if sd == 0.0 {
        return vec![0.0; data.len()];
    }
    let m = mean(data);
    data.iter().map(|&x| (x - m) / sd).collect()
}
