//! # boreas-delta
//!
//! Delta-change (bias-correction) engine.
//!
//! Makes a projection table's marginal distribution consistent with an
//! observed historical baseline so trends stay continuous across the
//! historical/future boundary. Two strategies, selected per indicator by a
//! static table:
//!
//! - **Scale** ([`CorrectionMode::Scale`]): the first calibration window
//!   with real variance is mapped affinely onto the baseline's range and
//!   the same map is applied to every year of the series.
//! - **Mean** ([`CorrectionMode::Mean`]): the series is shifted by the
//!   difference between the baseline mean and the calibration-window
//!   mean; used for radiation, where relative variance is the physical
//!   content. `rsds` additionally receives a fixed per-scenario offset.
//!
//! Groups (regions) are corrected independently; a projection group with
//! no matching baseline group is a hard error.

mod config;
mod correct;
mod error;
mod strategy;

pub use config::{CorrectionMode, DeltaConfig, Scenario};
pub use correct::{correct_indicator, correct_series};
pub use error::DeltaError;
pub use strategy::{correction_mode, scenario_offset};
