//! Humidity and radiation indicators.

use boreas_grid::{AnnualField, DailyGrid};

use crate::context::EvalContext;
use crate::error::IndicatorError;
use crate::indicator::{Indicator, single_input};
use crate::series::reduce_cells;

/// Annual mean relative humidity.
pub struct Hur;

impl Indicator for Hur {
    fn id(&self) -> &'static str {
        "hur"
    }
    fn display_name(&self) -> &'static str {
        "Mean relative humidity"
    }
    fn unit(&self) -> &'static str {
        "%"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["hur"]
    }
    fn evaluate(
        &self,
        slices: &[DailyGrid],
        _ctx: &EvalContext,
    ) -> Result<AnnualField, IndicatorError> {
        let slice = single_input(self.id(), slices)?;
        reduce_cells(self.id(), slice, |v| {
            let finite: Vec<f64> = v.iter().copied().filter(|x| !x.is_nan()).collect();
            if finite.is_empty() {
                f64::NAN
            } else {
                finite.iter().sum::<f64>() / finite.len() as f64
            }
        })
    }
}

/// Annual total surface solar radiation.
pub struct Rsds;

impl Indicator for Rsds {
    fn id(&self) -> &'static str {
        "rsds"
    }
    fn display_name(&self) -> &'static str {
        "Total surface solar radiation"
    }
    fn unit(&self) -> &'static str {
        "MJ/m2"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["rsds"]
    }
    fn evaluate(
        &self,
        slices: &[DailyGrid],
        _ctx: &EvalContext,
    ) -> Result<AnnualField, IndicatorError> {
        let slice = single_input(self.id(), slices)?;
        reduce_cells(self.id(), slice, |v| {
            let finite: Vec<f64> = v.iter().copied().filter(|x| !x.is_nan()).collect();
            if finite.is_empty() {
                f64::NAN
            } else {
                finite.iter().sum()
            }
        })
    }
}
