//! On-disk naming conventions.

use std::path::{Path, PathBuf};

/// Path of a daily source file: `{variable}_{source}_daily_{year}.nc`.
pub fn daily_grid_path(dir: &Path, variable: &str, source: &str, year: i32) -> PathBuf {
    dir.join(format!("{variable}_{source}_daily_{year}.nc"))
}

/// Path of a cached grid: `{variable}_{source}_{year}.parquet`.
pub fn grid_cache_path(dir: &Path, variable: &str, source: &str, year: i32) -> PathBuf {
    dir.join(format!("{variable}_{source}_{year}.parquet"))
}

/// Path of a per-(indicator, year) intermediate table.
pub fn intermediate_path(dir: &Path, indicator: &str, year: i32) -> PathBuf {
    dir.join(format!("{indicator}_{year}.csv"))
}

/// Path of a per-indicator merged result table.
pub fn result_path(dir: &Path, indicator: &str) -> PathBuf {
    dir.join(format!("{indicator}.csv"))
}

/// Path of a pivoted (region × year) report table.
pub fn pivot_path(dir: &Path, indicator: &str) -> PathBuf {
    dir.join(format!("{indicator}_pivot.csv"))
}
