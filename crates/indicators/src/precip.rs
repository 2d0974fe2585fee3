//! Precipitation indicators.

use ndarray::Array2;

use boreas_grid::{AnnualField, DailyGrid};

use crate::context::EvalContext;
use crate::error::IndicatorError;
use crate::indicator::{Indicator, single_input};
use crate::series::{count_days, longest_run, max_rolling_sum, reduce_cells};

/// A day with at least this much precipitation (mm) counts as wet.
pub const WET_DAY_MM: f64 = 1.0;

/// Maximum consecutive dry days (pr < 1 mm/day).
pub struct Cdd;

impl Indicator for Cdd {
    fn id(&self) -> &'static str {
        "cdd"
    }
    fn display_name(&self) -> &'static str {
        "Maximum consecutive dry days"
    }
    fn unit(&self) -> &'static str {
        "d"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["pr"]
    }
    // A wet sentinel in the padding breaks dry runs at the window edge.
    fn reindex_default(&self) -> Option<f64> {
        Some(10.0)
    }
    fn evaluate(
        &self,
        slices: &[DailyGrid],
        _ctx: &EvalContext,
    ) -> Result<AnnualField, IndicatorError> {
        let slice = single_input(self.id(), slices)?;
        reduce_cells(self.id(), slice, |v| longest_run(v, |x| x < WET_DAY_MM))
    }
}

/// Maximum consecutive wet days (pr >= 1 mm/day).
pub struct Cwd;

impl Indicator for Cwd {
    fn id(&self) -> &'static str {
        "cwd"
    }
    fn display_name(&self) -> &'static str {
        "Maximum consecutive wet days"
    }
    fn unit(&self) -> &'static str {
        "d"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["pr"]
    }
    // Dry padding breaks wet runs at the window edge.
    fn reindex_default(&self) -> Option<f64> {
        Some(0.0)
    }
    fn evaluate(
        &self,
        slices: &[DailyGrid],
        _ctx: &EvalContext,
    ) -> Result<AnnualField, IndicatorError> {
        let slice = single_input(self.id(), slices)?;
        reduce_cells(self.id(), slice, |v| longest_run(v, |x| x >= WET_DAY_MM))
    }
}

/// Days with precipitation of at least 10 mm.
pub struct R10;

impl Indicator for R10 {
    fn id(&self) -> &'static str {
        "r10"
    }
    fn display_name(&self) -> &'static str {
        "Heavy precipitation days (>= 10 mm)"
    }
    fn unit(&self) -> &'static str {
        "d"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["pr"]
    }
    fn evaluate(
        &self,
        slices: &[DailyGrid],
        _ctx: &EvalContext,
    ) -> Result<AnnualField, IndicatorError> {
        let slice = single_input(self.id(), slices)?;
        reduce_cells(self.id(), slice, |v| count_days(v, |x| x >= 10.0))
    }
}

/// Days with precipitation of at least 20 mm.
pub struct R20;

impl Indicator for R20 {
    fn id(&self) -> &'static str {
        "r20"
    }
    fn display_name(&self) -> &'static str {
        "Very heavy precipitation days (>= 20 mm)"
    }
    fn unit(&self) -> &'static str {
        "d"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["pr"]
    }
    fn evaluate(
        &self,
        slices: &[DailyGrid],
        _ctx: &EvalContext,
    ) -> Result<AnnualField, IndicatorError> {
        let slice = single_input(self.id(), slices)?;
        reduce_cells(self.id(), slice, |v| count_days(v, |x| x >= 20.0))
    }
}

/// Maximum 1-day precipitation.
pub struct Rx1day;

impl Indicator for Rx1day {
    fn id(&self) -> &'static str {
        "rx1day"
    }
    fn display_name(&self) -> &'static str {
        "Maximum 1-day precipitation"
    }
    fn unit(&self) -> &'static str {
        "mm"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["pr"]
    }
    fn evaluate(
        &self,
        slices: &[DailyGrid],
        _ctx: &EvalContext,
    ) -> Result<AnnualField, IndicatorError> {
        let slice = single_input(self.id(), slices)?;
        reduce_cells(self.id(), slice, |v| {
            v.iter().copied().fold(f64::NAN, f64::max)
        })
    }
}

/// Maximum 5-day rolling precipitation total.
pub struct Rx5day;

impl Indicator for Rx5day {
    fn id(&self) -> &'static str {
        "rx5day"
    }
    fn display_name(&self) -> &'static str {
        "Maximum 5-day precipitation"
    }
    fn unit(&self) -> &'static str {
        "mm"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["pr"]
    }
    fn evaluate(
        &self,
        slices: &[DailyGrid],
        _ctx: &EvalContext,
    ) -> Result<AnnualField, IndicatorError> {
        let slice = single_input(self.id(), slices)?;
        reduce_cells(self.id(), slice, |v| max_rolling_sum(v, 5))
    }
}

/// Simple daily intensity index: mean precipitation on wet days.
pub struct Sdii;

impl Indicator for Sdii {
    fn id(&self) -> &'static str {
        "sdii"
    }
    fn display_name(&self) -> &'static str {
        "Simple daily intensity index"
    }
    fn unit(&self) -> &'static str {
        "mm/d"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["pr"]
    }
    fn evaluate(
        &self,
        slices: &[DailyGrid],
        _ctx: &EvalContext,
    ) -> Result<AnnualField, IndicatorError> {
        let slice = single_input(self.id(), slices)?;
        reduce_cells(self.id(), slice, |v| {
            let wet: Vec<f64> = v
                .iter()
                .copied()
                .filter(|x| !x.is_nan() && *x >= WET_DAY_MM)
                .collect();
            if wet.is_empty() {
                f64::NAN
            } else {
                wet.iter().sum::<f64>() / wet.len() as f64
            }
        })
    }
}

/// Annual wet-day precipitation total.
pub struct Prcptot;

impl Indicator for Prcptot {
    fn id(&self) -> &'static str {
        "pr"
    }
    fn display_name(&self) -> &'static str {
        "Annual wet-day precipitation"
    }
    fn unit(&self) -> &'static str {
        "mm"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["pr"]
    }
    fn evaluate(
        &self,
        slices: &[DailyGrid],
        _ctx: &EvalContext,
    ) -> Result<AnnualField, IndicatorError> {
        let slice = single_input(self.id(), slices)?;
        reduce_cells(self.id(), slice, |v| {
            v.iter()
                .copied()
                .filter(|x| !x.is_nan() && *x >= WET_DAY_MM)
                .sum()
        })
    }
}

/// Days over the wet-day 95th-percentile baseline.
pub struct R95p;

impl Indicator for R95p {
    fn id(&self) -> &'static str {
        "r95p"
    }
    fn display_name(&self) -> &'static str {
        "Days over 95th-percentile precipitation"
    }
    fn unit(&self) -> &'static str {
        "d"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["pr"]
    }
    fn evaluate(
        &self,
        slices: &[DailyGrid],
        ctx: &EvalContext,
    ) -> Result<AnnualField, IndicatorError> {
        let slice = single_input(self.id(), slices)?;
        let baseline = ctx.pr_p95(self.id())?;

        let data = slice.data();
        let n_lat = slice.lat().len();
        let n_lon = slice.lon().len();
        let doys: Vec<u16> = slice.dates().iter().map(|d| d.day_of_year()).collect();

        let mut out = Array2::zeros((n_lat, n_lon));
        for i in 0..n_lat {
            for j in 0..n_lon {
                let mut count = 0.0;
                for (t, &doy) in doys.iter().enumerate() {
                    let v = data[[t, i, j]];
                    if v.is_nan() || v < WET_DAY_MM {
                        continue;
                    }
                    let threshold = baseline.threshold(doy, i, j);
                    if !threshold.is_nan() && v > threshold {
                        count += 1.0;
                    }
                }
                out[[i, j]] = count;
            }
        }

        AnnualField::new(
            self.id(),
            slice.end_date().year(),
            slice.lat().to_vec(),
            slice.lon().to_vec(),
            out,
        )
        .map_err(IndicatorError::from)
    }
}
