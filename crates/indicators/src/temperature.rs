//! Temperature indicators.

use ndarray::Array2;

use boreas_grid::{AnnualField, DailyGrid};
use boreas_region::ReduceMethod;

use crate::baseline::DoyBaseline;
use crate::context::EvalContext;
use crate::error::IndicatorError;
use crate::indicator::{Indicator, paired_input, single_input};
use crate::series::{count_days, reduce_cells, spell_days};

/// Annual maximum of daily maximum temperature.
pub struct Txx;

impl Indicator for Txx {
    fn id(&self) -> &'static str {
        "txx"
    }
    fn display_name(&self) -> &'static str {
        "Annual maximum temperature"
    }
    fn unit(&self) -> &'static str {
        "degC"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["tasmax"]
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

/// Annual minimum of daily minimum temperature.
pub struct Tnn;

impl Indicator for Tnn {
    fn id(&self) -> &'static str {
        "tnn"
    }
    fn display_name(&self) -> &'static str {
        "Annual minimum temperature"
    }
    fn unit(&self) -> &'static str {
        "degC"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["tasmin"]
    }
    fn evaluate(
        &self,
        slices: &[DailyGrid],
        _ctx: &EvalContext,
    ) -> Result<AnnualField, IndicatorError> {
        let slice = single_input(self.id(), slices)?;
        reduce_cells(self.id(), slice, |v| {
            v.iter().copied().fold(f64::NAN, f64::min)
        })
    }
}

/// Frost days: tasmin below 0 °C.
pub struct Fd;

impl Indicator for Fd {
    fn id(&self) -> &'static str {
        "fd"
    }
    fn display_name(&self) -> &'static str {
        "Frost days"
    }
    fn unit(&self) -> &'static str {
        "d"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["tasmin"]
    }
    fn evaluate(
        &self,
        slices: &[DailyGrid],
        _ctx: &EvalContext,
    ) -> Result<AnnualField, IndicatorError> {
        let slice = single_input(self.id(), slices)?;
        reduce_cells(self.id(), slice, |v| count_days(v, |x| x < 0.0))
    }
}

/// Ice days: tasmax below 0 °C.
pub struct Id;

impl Indicator for Id {
    fn id(&self) -> &'static str {
        "id"
    }
    fn display_name(&self) -> &'static str {
        "Ice days"
    }
    fn unit(&self) -> &'static str {
        "d"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["tasmax"]
    }
    fn evaluate(
        &self,
        slices: &[DailyGrid],
        _ctx: &EvalContext,
    ) -> Result<AnnualField, IndicatorError> {
        let slice = single_input(self.id(), slices)?;
        reduce_cells(self.id(), slice, |v| count_days(v, |x| x < 0.0))
    }
}

/// Summer days: tasmax above 25 °C.
pub struct Su;

impl Indicator for Su {
    fn id(&self) -> &'static str {
        "su"
    }
    fn display_name(&self) -> &'static str {
        "Summer days"
    }
    fn unit(&self) -> &'static str {
        "d"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["tasmax"]
    }
    fn evaluate(
        &self,
        slices: &[DailyGrid],
        _ctx: &EvalContext,
    ) -> Result<AnnualField, IndicatorError> {
        let slice = single_input(self.id(), slices)?;
        reduce_cells(self.id(), slice, |v| count_days(v, |x| x > 25.0))
    }
}

/// Growing degree days above 0 °C, reduced by regional maximum.
pub struct Gdd;

impl Indicator for Gdd {
    fn id(&self) -> &'static str {
        "gdd"
    }
    fn display_name(&self) -> &'static str {
        "Growing degree days"
    }
    fn unit(&self) -> &'static str {
        "degC d"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["tas"]
    }
    fn reduce_method(&self) -> ReduceMethod {
        ReduceMethod::Max
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
                .filter(|x| !x.is_nan() && *x > 0.0)
                .sum()
        })
    }
}

/// Mean diurnal temperature range.
pub struct Dtr;

impl Indicator for Dtr {
    fn id(&self) -> &'static str {
        "dtr"
    }
    fn display_name(&self) -> &'static str {
        "Mean diurnal temperature range"
    }
    fn unit(&self) -> &'static str {
        "degC"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["tasmax", "tasmin"]
    }
    fn evaluate(
        &self,
        slices: &[DailyGrid],
        _ctx: &EvalContext,
    ) -> Result<AnnualField, IndicatorError> {
        let (tasmax, tasmin) = paired_input(self.id(), slices)?;

        let max_data = tasmax.data();
        let min_data = tasmin.data();
        let n_lat = tasmax.lat().len();
        let n_lon = tasmax.lon().len();

        let mut out = Array2::zeros((n_lat, n_lon));
        for i in 0..n_lat {
            for j in 0..n_lon {
                let mut sum = 0.0;
                let mut n = 0usize;
                for t in 0..tasmax.n_days() {
                    let range = max_data[[t, i, j]] - min_data[[t, i, j]];
                    if range.is_nan() {
                        continue;
                    }
                    sum += range;
                    n += 1;
                }
                out[[i, j]] = if n == 0 { f64::NAN } else { sum / n as f64 };
            }
        }

        AnnualField::new(
            self.id(),
            tasmax.end_date().year(),
            tasmax.lat().to_vec(),
            tasmax.lon().to_vec(),
            out,
        )
        .map_err(IndicatorError::from)
    }
}

/// Shared construction for the percentile-exceedance family (tx90p,
/// tn90p, tn10p): percent of days beyond the day-of-year baseline.
fn percent_beyond(
    id: &'static str,
    slice: &DailyGrid,
    baseline: &DoyBaseline,
    above: bool,
) -> Result<AnnualField, IndicatorError> {
    let data = slice.data();
    let n_lat = slice.lat().len();
    let n_lon = slice.lon().len();
    let doys: Vec<u16> = slice.dates().iter().map(|d| d.day_of_year()).collect();

    let mut out = Array2::zeros((n_lat, n_lon));
    for i in 0..n_lat {
        for j in 0..n_lon {
            let mut hits = 0usize;
            let mut valid = 0usize;
            for (t, &doy) in doys.iter().enumerate() {
                let v = data[[t, i, j]];
                let threshold = baseline.threshold(doy, i, j);
                if v.is_nan() || threshold.is_nan() {
                    continue;
                }
                valid += 1;
                let beyond = if above { v > threshold } else { v < threshold };
                if beyond {
                    hits += 1;
                }
            }
            out[[i, j]] = if valid == 0 {
                f64::NAN
            } else {
                hits as f64 / valid as f64 * 100.0
            };
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

/// Percent of days with tasmax above the 90th-percentile baseline.
pub struct Tx90p;

impl Indicator for Tx90p {
    fn id(&self) -> &'static str {
        "tx90p"
    }
    fn display_name(&self) -> &'static str {
        "Warm days"
    }
    fn unit(&self) -> &'static str {
        "%"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["tasmax"]
    }
    fn evaluate(
        &self,
        slices: &[DailyGrid],
        ctx: &EvalContext,
    ) -> Result<AnnualField, IndicatorError> {
        let slice = single_input(self.id(), slices)?;
        percent_beyond(self.id(), slice, ctx.tasmax_p90(self.id())?, true)
    }
}

/// Percent of days with tasmin above the 90th-percentile baseline.
pub struct Tn90p;

impl Indicator for Tn90p {
    fn id(&self) -> &'static str {
        "tn90p"
    }
    fn display_name(&self) -> &'static str {
        "Warm nights"
    }
    fn unit(&self) -> &'static str {
        "%"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["tasmin"]
    }
    fn evaluate(
        &self,
        slices: &[DailyGrid],
        ctx: &EvalContext,
    ) -> Result<AnnualField, IndicatorError> {
        let slice = single_input(self.id(), slices)?;
        percent_beyond(self.id(), slice, ctx.tasmin_p90(self.id())?, true)
    }
}

/// Percent of days with tasmin below the 10th-percentile baseline.
pub struct Tn10p;

impl Indicator for Tn10p {
    fn id(&self) -> &'static str {
        "tn10p"
    }
    fn display_name(&self) -> &'static str {
        "Cold nights"
    }
    fn unit(&self) -> &'static str {
        "%"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["tasmin"]
    }
    fn evaluate(
        &self,
        slices: &[DailyGrid],
        ctx: &EvalContext,
    ) -> Result<AnnualField, IndicatorError> {
        let slice = single_input(self.id(), slices)?;
        percent_beyond(self.id(), slice, ctx.tasmin_p10(self.id())?, false)
    }
}

/// Cold-spell duration index: days in runs of at least six consecutive
/// days with tasmin below the 10th-percentile baseline.
pub struct Csdi;

impl Indicator for Csdi {
    fn id(&self) -> &'static str {
        "csdi"
    }
    fn display_name(&self) -> &'static str {
        "Cold-spell duration index"
    }
    fn unit(&self) -> &'static str {
        "d"
    }
    fn variables(&self) -> &'static [&'static str] {
        &["tasmin"]
    }
    fn evaluate(
        &self,
        slices: &[DailyGrid],
        ctx: &EvalContext,
    ) -> Result<AnnualField, IndicatorError> {
        let slice = single_input(self.id(), slices)?;
        let baseline = ctx.tasmin_p10(self.id())?;

        let data = slice.data();
        let n_lat = slice.lat().len();
        let n_lon = slice.lon().len();
        let doys: Vec<u16> = slice.dates().iter().map(|d| d.day_of_year()).collect();

        let mut out = Array2::zeros((n_lat, n_lon));
        let mut below = Vec::with_capacity(slice.n_days());
        for i in 0..n_lat {
            for j in 0..n_lon {
                below.clear();
                for (t, &doy) in doys.iter().enumerate() {
                    let v = data[[t, i, j]];
                    let threshold = baseline.threshold(doy, i, j);
                    // Encode "below threshold" as 1.0 so the shared spell
                    // counter applies; NaN stays NaN and breaks runs.
                    below.push(if v.is_nan() || threshold.is_nan() {
                        f64::NAN
                    } else if v < threshold {
                        1.0
                    } else {
                        0.0
                    });
                }
                out[[i, j]] = spell_days(&below, |x| x > 0.5, 6);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::percentile_doy;
    use boreas_calendar::{CivilDate, date_sequence};
    use ndarray::Array3;

    fn temp_grid(variable: &str, year: i32, daily: &[f64]) -> DailyGrid {
        let dates = date_sequence(CivilDate::new(year, 1, 1).unwrap(), daily.len());
        let data = Array3::from_shape_fn((daily.len(), 1, 1), |(t, _, _)| daily[t]);
        DailyGrid::new(variable, "degC", vec![43.0], vec![80.0], dates, data).unwrap()
    }

    #[test]
    fn txx_is_max() {
        let grid = temp_grid("tasmax", 2000, &[20.0, 35.5, 30.0]);
        let field = Txx.evaluate(&[grid], &EvalContext::new()).unwrap();
        assert_eq!(field.data()[[0, 0]], 35.5);
    }

    #[test]
    fn tnn_is_min() {
        let grid = temp_grid("tasmin", 2000, &[-5.0, -22.5, 3.0]);
        let field = Tnn.evaluate(&[grid], &EvalContext::new()).unwrap();
        assert_eq!(field.data()[[0, 0]], -22.5);
    }

    #[test]
    fn fd_su_id_counts() {
        let tasmin = temp_grid("tasmin", 2000, &[-5.0, -1.0, 2.0, 0.0]);
        let fd = Fd.evaluate(&[tasmin], &EvalContext::new()).unwrap();
        assert_eq!(fd.data()[[0, 0]], 2.0);

        let tasmax = temp_grid("tasmax", 2000, &[-2.0, 26.0, 30.0, 10.0]);
        let id = Id.evaluate(&[tasmax.clone()], &EvalContext::new()).unwrap();
        let su = Su.evaluate(&[tasmax], &EvalContext::new()).unwrap();
        assert_eq!(id.data()[[0, 0]], 1.0);
        assert_eq!(su.data()[[0, 0]], 2.0);
    }

    #[test]
    fn gdd_sums_positive_degrees() {
        let tas = temp_grid("tas", 2000, &[-3.0, 5.0, 10.0, 0.0]);
        let field = Gdd.evaluate(&[tas], &EvalContext::new()).unwrap();
        assert_eq!(field.data()[[0, 0]], 15.0);
        assert_eq!(Gdd.reduce_method(), ReduceMethod::Max);
    }

    #[test]
    fn dtr_mean_range() {
        let tasmax = temp_grid("tasmax", 2000, &[10.0, 12.0, 14.0]);
        let tasmin = temp_grid("tasmin", 2000, &[0.0, 4.0, 2.0]);
        let field = Dtr.evaluate(&[tasmax, tasmin], &EvalContext::new()).unwrap();
        assert_eq!(field.data()[[0, 0]], 10.0);
    }

    #[test]
    fn dtr_rejects_misaligned_inputs() {
        let tasmax = temp_grid("tasmax", 2000, &[10.0, 12.0]);
        let tasmin = temp_grid("tasmin", 2001, &[0.0, 4.0]);
        let err = Dtr.evaluate(&[tasmax, tasmin], &EvalContext::new()).unwrap_err();
        assert!(matches!(err, IndicatorError::SliceMismatch { .. }));
    }

    #[test]
    fn tx90p_percent_above() {
        let base = temp_grid("tasmax", 1961, &vec![20.0; 365]);
        let baseline = percentile_doy(&[base], 5, 90.0).unwrap();
        let ctx = EvalContext::new().with_tasmax_p90(baseline);

        let slice = temp_grid("tasmax", 2000, &[25.0, 15.0, 25.0, 15.0]);
        let field = Tx90p.evaluate(&[slice], &ctx).unwrap();
        assert_eq!(field.data()[[0, 0]], 50.0);
    }

    #[test]
    fn tn10p_percent_below() {
        let base = temp_grid("tasmin", 1961, &vec![0.0; 365]);
        let baseline = percentile_doy(&[base], 5, 10.0).unwrap();
        let ctx = EvalContext::new().with_tasmin_p10(baseline);

        let slice = temp_grid("tasmin", 2000, &[-5.0, 5.0, -1.0, 5.0]);
        let field = Tn10p.evaluate(&[slice], &ctx).unwrap();
        assert_eq!(field.data()[[0, 0]], 50.0);
    }

    #[test]
    fn csdi_counts_long_cold_spells() {
        let base = temp_grid("tasmin", 1961, &vec![0.0; 365]);
        let baseline = percentile_doy(&[base], 5, 10.0).unwrap();
        let ctx = EvalContext::new().with_tasmin_p10(baseline);

        // 7 cold days, 1 warm, 3 cold: only the 7-run counts.
        let mut daily = vec![-5.0; 7];
        daily.push(5.0);
        daily.extend([-5.0; 3]);
        let slice = temp_grid("tasmin", 2000, &daily);
        let field = Csdi.evaluate(&[slice], &ctx).unwrap();
        assert_eq!(field.data()[[0, 0]], 7.0);
    }

    #[test]
    fn percentile_indicators_require_baselines() {
        let slice = temp_grid("tasmax", 2000, &[25.0]);
        assert!(matches!(
            Tx90p.evaluate(&[slice], &EvalContext::new()).unwrap_err(),
            IndicatorError::MissingBaseline { .. }
        ));
    }
}
