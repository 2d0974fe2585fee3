//! Core delta-change transforms.

use std::collections::BTreeMap;

use tracing::debug;

use boreas_stats::mean;

use crate::config::{CorrectionMode, DeltaConfig};
use crate::error::DeltaError;
use crate::strategy::{correction_mode, scenario_offset};

/// Min and max over the finite members of a slice; `None` when there are
/// none.
fn finite_min_max(values: &[f64]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut seen = false;
    for &v in values {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
            seen = true;
        }
    }
    seen.then_some((min, max))
}

/// Finite values whose year falls in `[start, start + step)`.
fn window_values(years: &[i32], values: &[f64], start: i32, step: usize) -> Vec<f64> {
    let end = start + step as i32;
    years
        .iter()
        .zip(values)
        .filter(|&(&y, &v)| y >= start && y < end && v.is_finite())
        .map(|(_, &v)| v)
        .collect()
}

/// Rescales one projection series against its baseline.
///
/// **Scale mode** slides a `step`-year calibration window forward from the
/// configured start year until one has real variance (min ≠ max), derives
/// the affine map that carries the window's range onto the baseline's
/// range, and applies it to **every** year of the series, not just the
/// calibration window. The final absolute value guards against sign flips
/// from degenerate ranges. A series with no variance anywhere passes
/// through unchanged only when it is provably constant zero; any other
/// zero-variance series cannot be safely rescaled and is a hard error.
///
/// **Mean mode** shifts the series by `base_mean − window_mean`, then
/// takes the absolute value and adds the scenario-specific constant
/// offset, if any.
///
/// NaN values pass through unchanged and are excluded from every
/// statistic.
///
/// # Errors
///
/// Returns [`DeltaError::DegenerateCalibrationWindow`] as described above,
/// plus validation errors on malformed input.
pub fn correct_series(
    indicator: &str,
    group: &str,
    years: &[i32],
    values: &[f64],
    baseline: &[f64],
    mode: CorrectionMode,
    config: &DeltaConfig,
) -> Result<Vec<f64>, DeltaError> {
    config.validate()?;
    let label = format!("{indicator}/{group}");
    if values.is_empty() {
        return Err(DeltaError::EmptyData { label });
    }
    if years.len() != values.len() {
        return Err(DeltaError::LengthMismatch {
            label,
            n_years: years.len(),
            n_values: values.len(),
        });
    }

    match mode {
        CorrectionMode::Scale => correct_by_scale(&label, years, values, baseline, config, group),
        CorrectionMode::Mean => {
            correct_by_mean(&label, indicator, years, values, baseline, config, group)
        }
    }
}

fn correct_by_scale(
    label: &str,
    years: &[i32],
    values: &[f64],
    baseline: &[f64],
    config: &DeltaConfig,
    group: &str,
) -> Result<Vec<f64>, DeltaError> {
    let (base_min, base_max) =
        finite_min_max(baseline).ok_or_else(|| DeltaError::EmptyBaseline {
            group: group.to_string(),
        })?;

    // Slide the calibration window forward by `step` until one has
    // variance.
    let max_year = years.iter().copied().max().unwrap_or(config.calib_start_year());
    let mut window_start = config.calib_start_year();
    let mut calibration: Option<(f64, f64)> = None;
    while window_start <= max_year {
        let window = window_values(years, values, window_start, config.step());
        if let Some((min, max)) = finite_min_max(&window) {
            if min != max {
                calibration = Some((min, max));
                break;
            }
        }
        window_start += config.step() as i32;
    }

    let (win_min, win_max) = match calibration {
        Some(c) => c,
        None => {
            // No window anywhere has variance. A constant-zero series is
            // the explicit pass-through case; anything else is ambiguous.
            return match finite_min_max(values) {
                Some((min, max)) if min == 0.0 && max == 0.0 => Ok(values.to_vec()),
                _ => Err(DeltaError::DegenerateCalibrationWindow {
                    label: label.to_string(),
                }),
            };
        }
    };

    let scale_factor = (base_max - base_min) / (win_max - win_min);
    let offset = base_min - scale_factor * win_min * config.scale();
    debug!(
        label,
        window_start,
        scale_factor,
        offset,
        "scale-based delta change calibrated"
    );

    Ok(values
        .iter()
        .map(|&v| (v * scale_factor * config.scale() + offset).abs())
        .collect())
}

fn correct_by_mean(
    label: &str,
    indicator: &str,
    years: &[i32],
    values: &[f64],
    baseline: &[f64],
    config: &DeltaConfig,
    group: &str,
) -> Result<Vec<f64>, DeltaError> {
    let window = window_values(years, values, config.calib_start_year(), config.step());
    if window.is_empty() {
        return Err(DeltaError::DegenerateCalibrationWindow {
            label: label.to_string(),
        });
    }
    let finite_base: Vec<f64> = baseline.iter().copied().filter(|v| v.is_finite()).collect();
    if finite_base.is_empty() {
        return Err(DeltaError::EmptyBaseline {
            group: group.to_string(),
        });
    }

    let start_mean = mean(&window);
    let base_mean = mean(&finite_base);
    let extra = scenario_offset(indicator, config.scenario());
    debug!(label, start_mean, base_mean, extra, "mean-based delta change calibrated");

    Ok(values
        .iter()
        .map(|&v| (v - start_mean + base_mean).abs() + extra)
        .collect())
}

/// Corrects one indicator's projection table against a pre-split baseline.
///
/// The baseline is keyed by group (region); each projection group is
/// matched one-to-one against it. The correction strategy comes from the
/// static indicator table ([`correction_mode`]).
///
/// # Errors
///
/// Returns [`DeltaError::UnmatchedBaselineGroup`] when a projection group
/// has no baseline entry, plus any per-series correction error.
pub fn correct_indicator(
    indicator: &str,
    projection: &BTreeMap<String, (Vec<i32>, Vec<f64>)>,
    baseline: &BTreeMap<String, Vec<f64>>,
    config: &DeltaConfig,
) -> Result<BTreeMap<String, Vec<f64>>, DeltaError> {
    let mode = correction_mode(indicator);
    let mut out = BTreeMap::new();
    for (group, (years, values)) in projection {
        let base = baseline
            .get(group)
            .ok_or_else(|| DeltaError::UnmatchedBaselineGroup {
                group: group.clone(),
            })?;
        let corrected = correct_series(indicator, group, years, values, base, mode, config)?;
        out.insert(group.clone(), corrected);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Scenario;
    use approx::assert_relative_eq;

    fn cfg() -> DeltaConfig {
        DeltaConfig::new(2020, 6)
    }

    #[test]
    fn scale_maps_window_onto_baseline_range() {
        // Baseline [0, 10], calibration window [0, 5] → exact doubling.
        let years: Vec<i32> = (2020..2026).collect();
        let values = vec![0.0, 1.0, 2.5, 4.0, 5.0, 3.0];
        let baseline = vec![0.0, 4.0, 10.0, 7.0];

        let out = correct_series("cdd", "North Basin", &years, &values, &baseline,
            CorrectionMode::Scale, &cfg()).unwrap();

        assert_relative_eq!(out[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(out[2], 5.0, epsilon = 1e-12);
        assert_relative_eq!(out[4], 10.0, epsilon = 1e-12);
    }

    #[test]
    fn scale_applies_to_years_outside_window() {
        // Window 2020-2025 calibrates; 2026+ get the same affine map.
        let years: Vec<i32> = (2020..2030).collect();
        let values = vec![0.0, 5.0, 1.0, 2.0, 3.0, 4.0, 7.0, 8.0, 9.0, 10.0];
        let baseline = vec![0.0, 10.0];

        let out = correct_series("cdd", "g", &years, &values, &baseline,
            CorrectionMode::Scale, &cfg()).unwrap();

        // scale_factor = 2, offset = 0: 7 → 14.
        assert_relative_eq!(out[6], 14.0, epsilon = 1e-12);
    }

    #[test]
    fn scale_slides_past_flat_window() {
        // First window (2020-2025) is constant; the next (2026-2031) has
        // variance and must calibrate instead.
        let years: Vec<i32> = (2020..2032).collect();
        let mut values = vec![3.0; 6];
        values.extend([0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        let baseline = vec![0.0, 20.0];

        let out = correct_series("cdd", "g", &years, &values, &baseline,
            CorrectionMode::Scale, &cfg()).unwrap();

        // Window [0, 10] onto [0, 20]: factor 2, offset 0.
        assert_relative_eq!(out[6], 0.0, epsilon = 1e-12);
        assert_relative_eq!(out[11], 20.0, epsilon = 1e-12);
        // The flat head is rescaled with the same map.
        assert_relative_eq!(out[0], 6.0, epsilon = 1e-12);
    }

    #[test]
    fn scale_constant_zero_passes_through() {
        let years: Vec<i32> = (2020..2030).collect();
        let values = vec![0.0; 10];
        let baseline = vec![1.0, 9.0];

        let out = correct_series("fd", "g", &years, &values, &baseline,
            CorrectionMode::Scale, &cfg()).unwrap();
        assert_eq!(out, values);
    }

    #[test]
    fn scale_constant_nonzero_is_fatal() {
        let years: Vec<i32> = (2020..2030).collect();
        let values = vec![7.0; 10];
        let baseline = vec![1.0, 9.0];

        let err = correct_series("fd", "g", &years, &values, &baseline,
            CorrectionMode::Scale, &cfg()).unwrap_err();
        assert!(matches!(err, DeltaError::DegenerateCalibrationWindow { .. }));
    }

    #[test]
    fn scale_takes_absolute_value() {
        // A year outside the calibration window that maps below zero is
        // folded back by the absolute value.
        let years: Vec<i32> = (2020..2027).collect();
        let values = vec![10.0, 20.0, 12.0, 15.0, 18.0, 11.0, 2.0];
        let baseline = vec![0.0, 5.0];
        let out = correct_series("cdd", "g", &years, &values, &baseline,
            CorrectionMode::Scale, &cfg()).unwrap();
        // scale_factor = 0.5, offset = -5: 2.0 → -4.0 → 4.0.
        assert_relative_eq!(out[6], 4.0, epsilon = 1e-12);
        assert!(out.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn scale_nan_passes_through() {
        let years: Vec<i32> = (2020..2026).collect();
        let values = vec![0.0, f64::NAN, 2.5, 4.0, 5.0, 3.0];
        let baseline = vec![0.0, 10.0];
        let out = correct_series("cdd", "g", &years, &values, &baseline,
            CorrectionMode::Scale, &cfg()).unwrap();
        assert!(out[1].is_nan());
        assert_relative_eq!(out[2], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn mean_shifts_by_baseline_mean() {
        let years: Vec<i32> = (2020..2026).collect();
        let values = vec![100.0, 110.0, 90.0, 105.0, 95.0, 100.0];
        // window mean = 100; baseline mean = 130.
        let baseline = vec![120.0, 130.0, 140.0];

        let out = correct_series("rsds", "g", &years, &values, &baseline,
            CorrectionMode::Mean, &cfg()).unwrap();
        assert_relative_eq!(out[0], 130.0, epsilon = 1e-12);
        assert_relative_eq!(out[1], 140.0, epsilon = 1e-12);
    }

    #[test]
    fn mean_applies_scenario_offset_for_rsds() {
        let years: Vec<i32> = (2020..2026).collect();
        let values = vec![100.0; 6];
        let baseline = vec![100.0];

        let bump = correct_series("rsds", "g", &years, &values, &baseline,
            CorrectionMode::Mean, &cfg().with_scenario(Scenario::Ssp245)).unwrap();
        assert_relative_eq!(bump[0], 115.0, epsilon = 1e-12);

        let cut = correct_series("rsds", "g", &years, &values, &baseline,
            CorrectionMode::Mean, &cfg().with_scenario(Scenario::Ssp585)).unwrap();
        assert_relative_eq!(cut[0], 85.0, epsilon = 1e-12);
    }

    #[test]
    fn mean_no_offset_for_other_indicators() {
        let years: Vec<i32> = (2020..2026).collect();
        let values = vec![100.0; 6];
        let baseline = vec![100.0];
        let out = correct_series("hur", "g", &years, &values, &baseline,
            CorrectionMode::Mean, &cfg().with_scenario(Scenario::Ssp585)).unwrap();
        assert_relative_eq!(out[0], 100.0, epsilon = 1e-12);
    }

    #[test]
    fn mean_empty_window_is_fatal() {
        // Series starts after the calibration window.
        let years: Vec<i32> = (2040..2046).collect();
        let values = vec![100.0; 6];
        let baseline = vec![100.0];
        let err = correct_series("rsds", "g", &years, &values, &baseline,
            CorrectionMode::Mean, &cfg()).unwrap_err();
        assert!(matches!(err, DeltaError::DegenerateCalibrationWindow { .. }));
    }

    #[test]
    fn empty_series_rejected() {
        let err = correct_series("cdd", "g", &[], &[], &[1.0],
            CorrectionMode::Scale, &cfg()).unwrap_err();
        assert!(matches!(err, DeltaError::EmptyData { .. }));
    }

    #[test]
    fn empty_baseline_rejected() {
        let years: Vec<i32> = (2020..2026).collect();
        let values = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let err = correct_series("cdd", "g", &years, &values, &[f64::NAN],
            CorrectionMode::Scale, &cfg()).unwrap_err();
        assert!(matches!(err, DeltaError::EmptyBaseline { .. }));
    }

    #[test]
    fn correct_indicator_matches_groups() {
        let years: Vec<i32> = (2020..2026).collect();
        let mut projection = BTreeMap::new();
        projection.insert(
            "a".to_string(),
            (years.clone(), vec![0.0, 1.0, 2.5, 4.0, 5.0, 3.0]),
        );
        let mut baseline = BTreeMap::new();
        baseline.insert("a".to_string(), vec![0.0, 10.0]);

        let out = correct_indicator("cdd", &projection, &baseline, &cfg()).unwrap();
        assert_relative_eq!(out["a"][2], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn correct_indicator_unmatched_group_is_fatal() {
        let years: Vec<i32> = (2020..2026).collect();
        let mut projection = BTreeMap::new();
        projection.insert("ghost".to_string(), (years, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]));
        let baseline = BTreeMap::new();

        let err = correct_indicator("cdd", &projection, &baseline, &cfg()).unwrap_err();
        assert!(matches!(
            err,
            DeltaError::UnmatchedBaselineGroup { group } if group == "ghost"
        ));
    }
}
