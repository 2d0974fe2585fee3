//! # boreas-pipeline
//!
//! The per-indicator driver tying the pipeline together.
//!
//! For each requested indicator: check the final-table cache, loop over
//! the year range (skipping the first year when the aggregation window
//! crosses the calendar boundary), extract the windowed slice, optionally
//! gap-fill it to a complete year, evaluate the indicator, reduce the
//! field to per-region scalars, and persist a per-year intermediate CSV —
//! the unit of resumability. Indicators are independent: one failing is
//! logged and skipped, but missing source data aborts the run.
//!
//! The post-processing stages operate on the combined multi-indicator
//! table: outlier cleaning via threshold grid search ([`clean_stage`])
//! and delta-change correction of projection runs against the historical
//! baseline ([`delta_stage`]).

mod config;
mod driver;
mod error;
mod stages;
mod table;

pub use config::PipelineConfig;
pub use driver::{build_context, run_indicators};
pub use error::PipelineError;
pub use stages::{clean_stage, delta_stage, merge_tables};
pub use table::{AnnualTable, MultiTable};
