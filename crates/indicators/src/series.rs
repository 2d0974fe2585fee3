//! Per-cell time-series reductions shared by the catalog.

use ndarray::Array2;

use boreas_grid::{AnnualField, DailyGrid};

use crate::error::IndicatorError;

/// Reduces each cell's daily series to one scalar.
///
/// The closure receives the cell's values in time order. The resulting
/// field is labeled with `id` and the year of the slice's last day.
pub(crate) fn reduce_cells<F>(
    id: &str,
    slice: &DailyGrid,
    f: F,
) -> Result<AnnualField, IndicatorError>
where
    F: Fn(&[f64]) -> f64,
{
    let data = slice.data();
    let n_lat = slice.lat().len();
    let n_lon = slice.lon().len();

    let mut out = Array2::zeros((n_lat, n_lon));
    let mut buffer = Vec::with_capacity(slice.n_days());
    for i in 0..n_lat {
        for j in 0..n_lon {
            buffer.clear();
            buffer.extend((0..slice.n_days()).map(|t| data[[t, i, j]]));
            out[[i, j]] = f(&buffer);
        }
    }

    AnnualField::new(
        id,
        slice.end_date().year(),
        slice.lat().to_vec(),
        slice.lon().to_vec(),
        out,
    )
    .map_err(IndicatorError::from)
}

/// Length of the longest run of values satisfying `pred`.
///
/// NaN never satisfies the predicate, so missing days break runs.
pub(crate) fn longest_run<P>(values: &[f64], pred: P) -> f64
where
    P: Fn(f64) -> bool,
{
    let mut best = 0usize;
    let mut current = 0usize;
    for &v in values {
        if !v.is_nan() && pred(v) {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best as f64
}

/// Total days belonging to runs of at least `min_len` values satisfying
/// `pred` (spell-duration construction).
pub(crate) fn spell_days<P>(values: &[f64], pred: P, min_len: usize) -> f64
where
    P: Fn(f64) -> bool,
{
    let mut total = 0usize;
    let mut current = 0usize;
    for &v in values {
        if !v.is_nan() && pred(v) {
            current += 1;
        } else {
            if current >= min_len {
                total += current;
            }
            current = 0;
        }
    }
    if current >= min_len {
        total += current;
    }
    total as f64
}

/// Maximum sum over a sliding window of `width` consecutive values.
///
/// Windows containing NaN are skipped; returns NaN when no complete
/// window is clean (or the series is shorter than the window).
pub(crate) fn max_rolling_sum(values: &[f64], width: usize) -> f64 {
    if values.len() < width || width == 0 {
        return f64::NAN;
    }
    let mut best = f64::NAN;
    for window in values.windows(width) {
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        let sum: f64 = window.iter().sum();
        if best.is_nan() || sum > best {
            best = sum;
        }
    }
    best
}

/// Count of non-NaN values satisfying `pred`.
pub(crate) fn count_days<P>(values: &[f64], pred: P) -> f64
where
    P: Fn(f64) -> bool,
{
    values
        .iter()
        .filter(|v| !v.is_nan() && pred(**v))
        .count() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_run_basic() {
        let v = [1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 0.0];
        assert_eq!(longest_run(&v, |x| x > 0.5), 3.0);
    }

    #[test]
    fn longest_run_broken_by_nan() {
        let v = [1.0, 1.0, f64::NAN, 1.0];
        assert_eq!(longest_run(&v, |x| x > 0.5), 2.0);
    }

    #[test]
    fn longest_run_none() {
        let v = [0.0, 0.0];
        assert_eq!(longest_run(&v, |x| x > 0.5), 0.0);
    }

    #[test]
    fn spell_days_counts_only_long_runs() {
        // Runs: 2 (too short), 6 (counted), 3 (too short).
        let mut v = vec![1.0, 1.0, 0.0];
        v.extend([1.0; 6]);
        v.push(0.0);
        v.extend([1.0; 3]);
        assert_eq!(spell_days(&v, |x| x > 0.5, 6), 6.0);
    }

    #[test]
    fn spell_days_run_at_end() {
        let v = [0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        assert_eq!(spell_days(&v, |x| x > 0.5, 6), 6.0);
    }

    #[test]
    fn max_rolling_sum_basic() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(max_rolling_sum(&v, 2), 7.0);
    }

    #[test]
    fn max_rolling_sum_skips_nan_windows() {
        let v = [10.0, f64::NAN, 1.0, 2.0, 3.0];
        assert_eq!(max_rolling_sum(&v, 2), 5.0);
    }

    #[test]
    fn max_rolling_sum_short_series() {
        assert!(max_rolling_sum(&[1.0], 5).is_nan());
    }

    #[test]
    fn count_days_skips_nan() {
        let v = [1.0, f64::NAN, 3.0];
        assert_eq!(count_days(&v, |x| x > 0.0), 2.0);
    }
}
