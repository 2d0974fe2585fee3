//! Indicator-to-strategy mapping.

use crate::config::{CorrectionMode, Scenario};

/// Returns the correction strategy for an indicator.
///
/// Radiation totals carry meaningful relative variance but an offset bias,
/// so `rsds` is mean-shifted; every other indicator is range-rescaled.
pub fn correction_mode(indicator: &str) -> CorrectionMode {
    match indicator {
        "rsds" => CorrectionMode::Mean,
        _ => CorrectionMode::Scale,
    }
}

/// Scenario-specific constant offset applied after correction.
///
/// Only `rsds` carries one: a calibration artifact of the radiation
/// forcing in the scenario runs, +15 under the intermediate pathway and
/// −15 under the high-emission pathway.
pub fn scenario_offset(indicator: &str, scenario: Option<Scenario>) -> f64 {
    match (indicator, scenario) {
        ("rsds", Some(Scenario::Ssp245)) => 15.0,
        ("rsds", Some(Scenario::Ssp585)) => -15.0,
        _ => 0.0,
    }
}
