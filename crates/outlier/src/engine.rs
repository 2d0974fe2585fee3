//! Per-group detection and imputation.

use std::collections::BTreeMap;

use boreas_stats::{mad, mean, median, quantile_type7, sorted_copy, zscores};

use crate::config::{FillMethod, OutlierConfig, OutlierMethod};
use crate::error::OutlierError;

/// Result of cleaning one series.
///
/// `values` is index-aligned with the input. Flagged values are replaced
/// according to the fill policy (NaN for [`FillMethod::None`]). With
/// [`FillMethod::Drop`] the dropped rows are marked `false` in `kept` and
/// their values left untouched; callers filter on `kept`.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    values: Vec<f64>,
    kept: Vec<bool>,
    n_flagged: usize,
}

impl CleanOutcome {
    /// Returns the cleaned values, index-aligned with the input.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the kept-row mask (all true unless the fill policy drops).
    pub fn kept(&self) -> &[bool] {
        &self.kept
    }

    /// Returns the total number of flagged values across groups.
    pub fn n_flagged(&self) -> usize {
        self.n_flagged
    }

    /// Consumes the outcome, returning the cleaned values.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// Flags anomalous members of one group.
///
/// `members` are the group's non-NaN values; the returned mask is aligned
/// with them. NaN inputs are excluded before this point and never flagged.
fn flag_group(members: &[f64], method: OutlierMethod, threshold: f64) -> Vec<bool> {
    match method {
        OutlierMethod::None => vec![false; members.len()],
        OutlierMethod::Zscore => zscores(members)
            .iter()
            .map(|&z| z.abs() > threshold)
            .collect(),
        OutlierMethod::Iqr => {
            let sorted = sorted_copy(members);
            let q1 = quantile_type7(&sorted, 0.25);
            let q3 = quantile_type7(&sorted, 0.75);
            let iqr = q3 - q1;
            let lower = q1 - threshold * iqr;
            let upper = q3 + threshold * iqr;
            members.iter().map(|&x| x < lower || x > upper).collect()
        }
        OutlierMethod::Mad => {
            let sorted = sorted_copy(members);
            let med = median(&sorted);
            let scale = mad(members);
            members
                .iter()
                .map(|&x| (x - med).abs() > threshold * scale)
                .collect()
        }
    }
}

/// Cleans a long-form series grouped by `groups`, independently per group.
///
/// NaN values pass through untouched and are excluded from every group
/// statistic. The guard rejects the whole call as soon as any single
/// group flags more than `max_outlier` values, so the threshold grid
/// search can retry with a larger threshold.
///
/// # Errors
///
/// Returns [`OutlierError::TooManyOutliers`] when a group trips the
/// guard, and validation errors on malformed input.
pub fn clean_series(
    values: &[f64],
    groups: &[&str],
    config: &OutlierConfig,
) -> Result<CleanOutcome, OutlierError> {
    config.validate()?;
    if values.is_empty() {
        return Err(OutlierError::EmptyData);
    }
    if values.len() != groups.len() {
        return Err(OutlierError::LengthMismatch {
            n_values: values.len(),
            n_groups: groups.len(),
        });
    }

    // Group row indices by key, preserving input order within groups.
    let mut by_group: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (i, &g) in groups.iter().enumerate() {
        by_group.entry(g).or_default().push(i);
    }

    let mut out = values.to_vec();
    let mut kept = vec![true; values.len()];
    let mut n_flagged = 0;

    for (group, indices) in &by_group {
        let valid: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| !values[i].is_nan())
            .collect();
        if valid.is_empty() {
            continue;
        }

        let members: Vec<f64> = valid.iter().map(|&i| values[i]).collect();
        let flags = flag_group(&members, config.method(), config.threshold());
        let count = flags.iter().filter(|&&f| f).count();

        if count > config.max_outlier() {
            return Err(OutlierError::TooManyOutliers {
                group: group.to_string(),
                count,
                max_outlier: config.max_outlier(),
            });
        }
        if count == 0 {
            continue;
        }
        n_flagged += count;

        let survivors: Vec<f64> = members
            .iter()
            .zip(&flags)
            .filter(|&(_, &f)| !f)
            .map(|(&v, _)| v)
            .collect();

        let replacement = match config.fill() {
            FillMethod::Mean => {
                if survivors.is_empty() {
                    Some(f64::NAN)
                } else {
                    Some(mean(&survivors))
                }
            }
            FillMethod::Median => {
                if survivors.is_empty() {
                    Some(f64::NAN)
                } else {
                    Some(median(&sorted_copy(&survivors)))
                }
            }
            FillMethod::None => Some(f64::NAN),
            FillMethod::Drop => None,
        };

        for (&i, &flagged) in valid.iter().zip(&flags) {
            if !flagged {
                continue;
            }
            match replacement {
                Some(v) => out[i] = v,
                None => kept[i] = false,
            }
        }
    }

    Ok(CleanOutcome {
        values: out,
        kept,
        n_flagged,
    })
}
