//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use boreas_calendar::{DateWindow, MonthDay};
use boreas_delta::{DeltaConfig, Scenario};
use boreas_outlier::{FillMethod, OutlierConfig, OutlierMethod, ThresholdGrid};
use boreas_pipeline::PipelineConfig;

use crate::config::{BoreasConfig, DeltaToml, OutlierToml, WindowToml};

/// Parses an outlier detection method name into the corresponding enum
/// variant.
pub fn parse_outlier_method(s: &str) -> Result<OutlierMethod> {
    match s.to_lowercase().as_str() {
        "iqr" => Ok(OutlierMethod::Iqr),
        "mad" => Ok(OutlierMethod::Mad),
        "zscore" => Ok(OutlierMethod::Zscore),
        "none" => Ok(OutlierMethod::None),
        other => bail!("unknown outlier method: {other:?}"),
    }
}

/// Parses a fill policy name into the corresponding enum variant.
pub fn parse_fill_method(s: &str) -> Result<FillMethod> {
    match s.to_lowercase().as_str() {
        "mean" => Ok(FillMethod::Mean),
        "median" => Ok(FillMethod::Median),
        "none" => Ok(FillMethod::None),
        "drop" => Ok(FillMethod::Drop),
        other => bail!("unknown fill method: {other:?}"),
    }
}

/// Builds the aggregation window from the TOML window section.
pub fn build_window(window: &WindowToml) -> Result<DateWindow> {
    let start: MonthDay = window
        .start
        .parse()
        .with_context(|| format!("invalid window start {:?}", window.start))?;
    let end: MonthDay = window
        .end
        .parse()
        .with_context(|| format!("invalid window end {:?}", window.end))?;
    Ok(DateWindow::new(start, end))
}

/// Builds a [`PipelineConfig`] from the full TOML configuration.
pub fn build_pipeline_config(config: &BoreasConfig) -> Result<PipelineConfig> {
    let window = build_window(&config.window)?;
    Ok(PipelineConfig::new(
        config.indicators.ids.clone(),
        config.years.start,
        config.years.end,
        &config.io.intermediate_dir,
        &config.io.output_dir,
    )
    .with_window(window)
    .with_min_year(config.years.min_merge)
    .with_use_cache(config.io.use_cache))
}

/// Builds an [`OutlierConfig`] from the TOML outlier section.
pub fn build_outlier_config(outlier: &OutlierToml) -> Result<OutlierConfig> {
    let method = parse_outlier_method(&outlier.method)?;
    let fill = parse_fill_method(&outlier.fill)?;
    Ok(OutlierConfig::new()
        .with_method(method)
        .with_fill(fill)
        .with_max_outlier(outlier.max_outlier))
}

/// Builds the threshold grid from the TOML outlier section.
pub fn build_threshold_grid(outlier: &OutlierToml) -> ThresholdGrid {
    ThresholdGrid::new(outlier.grid_start, outlier.grid_end, outlier.grid_step)
}

/// Builds a [`DeltaConfig`] from the TOML delta section.
pub fn build_delta_config(delta: &DeltaToml) -> Result<DeltaConfig> {
    let mut cfg = DeltaConfig::new(delta.calib_start_year, delta.step).with_scale(delta.scale);
    if let Some(ref s) = delta.scenario {
        let scenario: Scenario = s
            .parse()
            .with_context(|| format!("invalid scenario {s:?}"))?;
        cfg = cfg.with_scenario(scenario);
    }
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_methods() {
        assert_eq!(parse_outlier_method("IQR").unwrap(), OutlierMethod::Iqr);
        assert_eq!(parse_outlier_method("mad").unwrap(), OutlierMethod::Mad);
        assert!(parse_outlier_method("grubbs").is_err());
        assert_eq!(parse_fill_method("drop").unwrap(), FillMethod::Drop);
        assert!(parse_fill_method("zero").is_err());
    }

    #[test]
    fn window_parsing() {
        let toml = WindowToml {
            start: "10-01".to_string(),
            end: "06-30".to_string(),
        };
        let window = build_window(&toml).unwrap();
        assert!(window.crosses_year());
    }

    #[test]
    fn window_rejects_malformed() {
        let toml = WindowToml {
            start: "Oct-01".to_string(),
            end: "06-30".to_string(),
        };
        assert!(build_window(&toml).is_err());
    }

    #[test]
    fn delta_config_with_scenario() {
        let toml = DeltaToml {
            calib_start_year: 2020,
            step: 6,
            scale: 1.0,
            scenario: Some("ssp585".to_string()),
            baseline_table: None,
        };
        let cfg = build_delta_config(&toml).unwrap();
        assert_eq!(cfg.scenario(), Some(Scenario::Ssp585));
    }
}
