//! Day-of-year percentile baselines.

use ndarray::Array3;

use boreas_grid::DailyGrid;
use boreas_stats::quantile_type7;

use crate::error::IndicatorError;

/// Per-cell, per-day-of-year percentile thresholds fitted over a baseline
/// period.
///
/// Slot `d` (1-based day-of-year, up to 366) holds, for every grid cell,
/// the requested percentile of the values falling on day `d` ± half the
/// fitting window across all baseline years. This is the standard
/// climate-index construction for percentile-based exceedance indicators;
/// it is computed once per run and threaded through the evaluation
/// context rather than recomputed per indicator.
#[derive(Debug, Clone)]
pub struct DoyBaseline {
    variable: String,
    per: f64,
    /// (366 × lat × lon); slot `doy - 1`.
    thresholds: Array3<f64>,
}

impl DoyBaseline {
    /// Returns the baseline's source variable.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Returns the percentile (0..=100).
    pub fn per(&self) -> f64 {
        self.per
    }

    /// Returns the threshold for `doy` (1..=366) at cell `(i, j)`.
    pub fn threshold(&self, doy: u16, i: usize, j: usize) -> f64 {
        self.thresholds[[(doy - 1) as usize, i, j]]
    }
}

/// Fits day-of-year percentiles over a set of baseline-year grids.
///
/// `window` is the full width (in days) of the day-of-year pooling window;
/// 5 is the conventional choice. `per` is the percentile in 0..=100.
/// Values are pooled across all supplied years; NaN values are skipped.
/// A (doy, cell) slot with no finite samples gets NaN, which downstream
/// comparisons treat as "never exceeded".
///
/// # Errors
///
/// Returns [`IndicatorError::BaselineFit`] when no grids are supplied,
/// grids disagree in shape, or the parameters are out of range.
pub fn percentile_doy(
    grids: &[DailyGrid],
    window: usize,
    per: f64,
) -> Result<DoyBaseline, IndicatorError> {
    let first = grids.first().ok_or_else(|| IndicatorError::BaselineFit {
        reason: "no baseline grids supplied".to_string(),
    })?;
    if !(0.0..=100.0).contains(&per) {
        return Err(IndicatorError::BaselineFit {
            reason: format!("percentile must be in 0..=100, got {per}"),
        });
    }
    if window == 0 || window % 2 == 0 {
        return Err(IndicatorError::BaselineFit {
            reason: format!("window must be odd and positive, got {window}"),
        });
    }

    let n_lat = first.lat().len();
    let n_lon = first.lon().len();
    for grid in grids {
        if grid.lat() != first.lat() || grid.lon() != first.lon() {
            return Err(IndicatorError::BaselineFit {
                reason: "baseline grids have differing coordinates".to_string(),
            });
        }
        if grid.variable() != first.variable() {
            return Err(IndicatorError::BaselineFit {
                reason: format!(
                    "baseline grids mix variables '{}' and '{}'",
                    first.variable(),
                    grid.variable()
                ),
            });
        }
    }

    // Pool values by day-of-year across all years and window offsets.
    let half = (window / 2) as i32;
    let mut pools: Vec<Vec<Vec<f64>>> = vec![vec![Vec::new(); n_lat * n_lon]; 366];
    for grid in grids {
        let data = grid.data();
        for (t, date) in grid.dates().iter().enumerate() {
            let doy = date.day_of_year() as i32;
            for offset in -half..=half {
                // The sample at `doy` contributes to slots doy-offset via
                // wrap-around on the 366-slot ring.
                let slot = (doy - 1 + offset).rem_euclid(366) as usize;
                for i in 0..n_lat {
                    for j in 0..n_lon {
                        let v = data[[t, i, j]];
                        if v.is_nan() {
                            continue;
                        }
                        pools[slot][i * n_lon + j].push(v);
                    }
                }
            }
        }
    }

    let p = per / 100.0;
    let mut thresholds = Array3::from_elem((366, n_lat, n_lon), f64::NAN);
    for (slot, cells) in pools.iter().enumerate() {
        for i in 0..n_lat {
            for j in 0..n_lon {
                let pool = &cells[i * n_lon + j];
                if pool.is_empty() {
                    continue;
                }
                let sorted = boreas_stats::sorted_copy(pool);
                thresholds[[slot, i, j]] = quantile_type7(&sorted, p);
            }
        }
    }

    Ok(DoyBaseline {
        variable: first.variable().to_string(),
        per,
        thresholds,
    })
}
