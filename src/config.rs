use std::path::PathBuf;

use serde::Deserialize;

/// Top-level boreas configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoreasConfig {
    /// I/O settings.
    pub io: IoToml,

    /// Aggregation window settings.
    #[serde(default)]
    pub window: WindowToml,

    /// Computation year range.
    pub years: YearsToml,

    /// Historical baseline period for percentile indicators.
    #[serde(default)]
    pub baseline: BaselineToml,

    /// Indicators to compute.
    #[serde(default)]
    pub indicators: IndicatorsToml,

    /// Outlier cleaning settings.
    #[serde(default)]
    pub outlier: OutlierToml,

    /// Delta-change settings (projection runs only).
    #[serde(default)]
    pub delta: Option<DeltaToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    /// Directory of daily NetCDF source files.
    pub data_dir: PathBuf,
    /// Directory for the Parquet grid cache.
    pub cache_dir: Option<PathBuf>,
    /// Directory for per-year intermediate CSVs.
    pub intermediate_dir: PathBuf,
    /// Directory for final tables.
    pub output_dir: PathBuf,
    /// GeoJSON FeatureCollection of region polygons.
    pub regions: PathBuf,
    /// Dataset/scenario id used in source file names.
    #[serde(default = "default_source")]
    pub source: String,
    /// Dataset id of the historical run used for percentile baselines.
    #[serde(default = "default_source")]
    pub baseline_source: String,
    #[serde(default = "default_true")]
    pub use_cache: bool,
}

fn default_source() -> String {
    "era5".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowToml {
    #[serde(default = "default_window_start")]
    pub start: String,
    #[serde(default = "default_window_end")]
    pub end: String,
}

impl Default for WindowToml {
    fn default() -> Self {
        Self {
            start: default_window_start(),
            end: default_window_end(),
        }
    }
}

fn default_window_start() -> String {
    "01-01".to_string()
}
fn default_window_end() -> String {
    "12-31".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct YearsToml {
    pub start: i32,
    pub end: i32,
    /// Rows before this year are dropped from the combined table.
    #[serde(default = "default_min_merge")]
    pub min_merge: i32,
}

fn default_min_merge() -> i32 {
    1989
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaselineToml {
    #[serde(default = "default_baseline_start")]
    pub start: i32,
    #[serde(default = "default_baseline_end")]
    pub end: i32,
}

impl Default for BaselineToml {
    fn default() -> Self {
        Self {
            start: default_baseline_start(),
            end: default_baseline_end(),
        }
    }
}

fn default_baseline_start() -> i32 {
    1961
}
fn default_baseline_end() -> i32 {
    1990
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndicatorsToml {
    #[serde(default = "default_indicators")]
    pub ids: Vec<String>,
}

impl Default for IndicatorsToml {
    fn default() -> Self {
        Self {
            ids: default_indicators(),
        }
    }
}

fn default_indicators() -> Vec<String> {
    [
        "rsds", "hur", "gdd", "pr", "cwd", "r10", "r95p", "rx1day", "tn90p", "tx90p", "txx", "fd",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutlierToml {
    #[serde(default = "default_outlier_method")]
    pub method: String,
    #[serde(default = "default_fill_method")]
    pub fill: String,
    #[serde(default = "default_max_outlier")]
    pub max_outlier: usize,
    #[serde(default = "default_grid_start")]
    pub grid_start: f64,
    #[serde(default = "default_grid_end")]
    pub grid_end: f64,
    #[serde(default = "default_grid_step")]
    pub grid_step: f64,
}

impl Default for OutlierToml {
    fn default() -> Self {
        Self {
            method: default_outlier_method(),
            fill: default_fill_method(),
            max_outlier: default_max_outlier(),
            grid_start: default_grid_start(),
            grid_end: default_grid_end(),
            grid_step: default_grid_step(),
        }
    }
}

fn default_outlier_method() -> String {
    "mad".to_string()
}
fn default_fill_method() -> String {
    "median".to_string()
}
fn default_max_outlier() -> usize {
    2
}
fn default_grid_start() -> f64 {
    0.0
}
fn default_grid_end() -> f64 {
    10.0
}
fn default_grid_step() -> f64 {
    0.5
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeltaToml {
    /// First year of the calibration window.
    pub calib_start_year: i32,
    /// Calibration window width in years.
    #[serde(default = "default_delta_step")]
    pub step: usize,
    /// Extra multiplier on the derived scale factor.
    #[serde(default = "default_delta_scale")]
    pub scale: f64,
    /// Scenario id (enables scenario-specific offsets).
    #[serde(default)]
    pub scenario: Option<String>,
    /// Combined CSV of the historical run to correct against.
    pub baseline_table: Option<PathBuf>,
}

fn default_delta_step() -> usize {
    6
}
fn default_delta_scale() -> f64 {
    1.0
}
