//! # boreas-outlier
//!
//! Per-group outlier detection and imputation for long-form region tables.
//!
//! Values are grouped by a key (region name), flagged with one of several
//! interchangeable statistical rules, and either imputed or dropped:
//!
//! | Method   | Flags |
//! |----------|-------|
//! | `zscore` | `\|z\| > t` (population SD) |
//! | `iqr`    | outside `[Q1 - t*IQR, Q3 + t*IQR]` |
//! | `mad`    | `\|x - median\| > t * MAD` |
//! | `none`   | nothing (baseline policy) |
//!
//! A per-group guard (`max_outlier`) rejects thresholds that flag too
//! much; [`grid_search`] then retries over an ascending threshold grid and
//! accepts the first threshold that holds. [`clean_columns`] applies the
//! search independently to every indicator column of a combined table.

mod config;
mod engine;
mod error;
mod grid;

pub use config::{FillMethod, OutlierConfig, OutlierMethod, ThresholdGrid};
pub use engine::{CleanOutcome, clean_series};
pub use error::OutlierError;
pub use grid::{ColumnOutcome, clean_columns, grid_search};
