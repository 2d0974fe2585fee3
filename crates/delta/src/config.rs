//! Delta-change configuration.

use std::str::FromStr;

use crate::error::DeltaError;

/// Correction strategy for one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionMode {
    /// Affine rescaling of the projection's range onto the baseline's.
    Scale,
    /// Mean shift: subtract the calibration-window mean, add the baseline
    /// mean. Used where relative variance, not absolute range, is
    /// physically meaningful (radiation).
    Mean,
}

/// Future emission scenario being corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Low-emission pathway.
    Ssp126,
    /// Intermediate pathway.
    Ssp245,
    /// High-emission pathway.
    Ssp585,
}

impl Scenario {
    /// Returns the scenario identifier used in file names.
    pub fn id(&self) -> &'static str {
        match self {
            Scenario::Ssp126 => "ssp126",
            Scenario::Ssp245 => "ssp245",
            Scenario::Ssp585 => "ssp585",
        }
    }
}

impl FromStr for Scenario {
    type Err = DeltaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ssp126" => Ok(Scenario::Ssp126),
            "ssp245" => Ok(Scenario::Ssp245),
            "ssp585" => Ok(Scenario::Ssp585),
            other => Err(DeltaError::InvalidConfig {
                reason: format!("unknown scenario: {other:?}"),
            }),
        }
    }
}

/// Configuration for the delta-change engine.
#[derive(Debug, Clone, Copy)]
pub struct DeltaConfig {
    calib_start_year: i32,
    step: usize,
    scale: f64,
    scenario: Option<Scenario>,
}

impl DeltaConfig {
    /// Creates a configuration with a calibration window starting at
    /// `calib_start_year` and `step` years wide.
    pub fn new(calib_start_year: i32, step: usize) -> Self {
        Self {
            calib_start_year,
            step,
            scale: 1.0,
            scenario: None,
        }
    }

    /// Sets the extra multiplier applied on top of the derived scale
    /// factor (default 1.0).
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the scenario being corrected; enables scenario-specific
    /// constant offsets.
    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = Some(scenario);
        self
    }

    /// Returns the first year of the calibration window.
    pub fn calib_start_year(&self) -> i32 {
        self.calib_start_year
    }

    /// Returns the calibration window width in years.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Returns the extra scale multiplier.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the scenario, if set.
    pub fn scenario(&self) -> Option<Scenario> {
        self.scenario
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DeltaError::InvalidConfig`] when the step is zero or the
    /// scale multiplier is zero or non-finite.
    pub fn validate(&self) -> Result<(), DeltaError> {
        if self.step == 0 {
            return Err(DeltaError::InvalidConfig {
                reason: "calibration step must be at least 1 year".to_string(),
            });
        }
        if !self.scale.is_finite() || self.scale == 0.0 {
            return Err(DeltaError::InvalidConfig {
                reason: format!("scale multiplier must be finite and non-zero, got {}", self.scale),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = DeltaConfig::new(2020, 6);
        assert_eq!(cfg.calib_start_year(), 2020);
        assert_eq!(cfg.step(), 6);
        assert_eq!(cfg.scale(), 1.0);
        assert!(cfg.scenario().is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_chain() {
        let cfg = DeltaConfig::new(2020, 6)
            .with_scale(0.9)
            .with_scenario(Scenario::Ssp585);
        assert_eq!(cfg.scale(), 0.9);
        assert_eq!(cfg.scenario(), Some(Scenario::Ssp585));
    }

    #[test]
    fn zero_step_rejected() {
        assert!(DeltaConfig::new(2020, 0).validate().is_err());
    }

    #[test]
    fn zero_scale_rejected() {
        assert!(DeltaConfig::new(2020, 6).with_scale(0.0).validate().is_err());
    }

    #[test]
    fn scenario_parse() {
        assert_eq!("ssp245".parse::<Scenario>().unwrap(), Scenario::Ssp245);
        assert_eq!("SSP585".parse::<Scenario>().unwrap(), Scenario::Ssp585);
        assert!("rcp85".parse::<Scenario>().is_err());
    }

    #[test]
    fn scenario_ids() {
        assert_eq!(Scenario::Ssp126.id(), "ssp126");
        assert_eq!(Scenario::Ssp245.id(), "ssp245");
        assert_eq!(Scenario::Ssp585.id(), "ssp585");
    }
}
