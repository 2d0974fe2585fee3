//! Threshold grid search and per-column application.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::config::{FillMethod, OutlierConfig, ThresholdGrid};
use crate::engine::{CleanOutcome, clean_series};
use crate::error::OutlierError;

/// Retries cleaning over an ascending threshold grid.
///
/// A fixed threshold may flag more points than the guard tolerates for
/// some indicators, so the same detection/fill procedure is retried from
/// `grid.start()` upward in `grid.step()` increments. The **first**
/// (lowest) threshold whose guard holds wins; this selection order is
/// part of the engine's contract and must not be re-ordered. Returns
/// `None` when the whole grid is exhausted.
///
/// # Errors
///
/// Returns configuration validation errors. Guard trips are consumed by
/// the retry loop and logged, never returned.
pub fn grid_search(
    values: &[f64],
    groups: &[&str],
    config: &OutlierConfig,
    grid: &ThresholdGrid,
) -> Result<Option<(f64, CleanOutcome)>, OutlierError> {
    grid.validate()?;
    config.validate()?;

    for threshold in grid.thresholds() {
        let attempt = config.with_threshold(threshold);
        match clean_series(values, groups, &attempt) {
            Ok(outcome) => return Ok(Some((threshold, outcome))),
            Err(OutlierError::TooManyOutliers { group, count, .. }) => {
                info!(threshold, group = %group, count, "threshold rejected by guard");
                continue;
            }
            Err(other) => return Err(other),
        }
    }
    Ok(None)
}

/// Result of cleaning one column of a multi-indicator table.
#[derive(Debug, Clone)]
pub struct ColumnOutcome {
    /// Threshold accepted by the grid search, if any succeeded.
    pub threshold: Option<f64>,
    /// Cleaned column; the original values when the grid was exhausted.
    pub values: Vec<f64>,
}

/// Applies the grid search independently to every column of a
/// multi-indicator table.
///
/// Columns are rebuilt one indicator at a time against the shared group
/// keys. An indicator for which no threshold succeeds keeps its original
/// (unfiltered) values and is logged with a warning.
///
/// The fill policy must keep rows aligned across columns, so
/// [`FillMethod::Drop`] is rejected here.
///
/// # Errors
///
/// Returns [`OutlierError::InvalidConfig`] for a dropping fill policy,
/// plus any validation errors from the underlying search.
pub fn clean_columns(
    columns: &BTreeMap<String, Vec<f64>>,
    groups: &[&str],
    config: &OutlierConfig,
    grid: &ThresholdGrid,
) -> Result<BTreeMap<String, ColumnOutcome>, OutlierError> {
    if config.fill() == FillMethod::Drop {
        return Err(OutlierError::InvalidConfig {
            reason: "fill method 'drop' would misalign table columns".to_string(),
        });
    }

    let mut out = BTreeMap::new();
    for (name, values) in columns {
        match grid_search(values, groups, config, grid)? {
            Some((threshold, outcome)) => {
                info!(indicator = %name, threshold, "outlier cleaning succeeded");
                out.insert(
                    name.clone(),
                    ColumnOutcome {
                        threshold: Some(threshold),
                        values: outcome.into_values(),
                    },
                );
            }
            None => {
                warn!(
                    indicator = %name,
                    "threshold grid exhausted; keeping original column"
                );
                out.insert(
                    name.clone(),
                    ColumnOutcome {
                        threshold: None,
                        values: values.clone(),
                    },
                );
            }
        }
    }
    Ok(out)
}
