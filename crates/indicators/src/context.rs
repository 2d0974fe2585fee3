//! Evaluation context carrying shared baselines.

use crate::baseline::DoyBaseline;
use crate::error::IndicatorError;

/// Inputs shared by all indicator evaluations in one run.
///
/// Percentile baselines are computed once from the historical period and
/// passed here by the driver; indicators never reach for ambient state.
/// An indicator that needs a baseline the context does not carry fails
/// with [`IndicatorError::MissingBaseline`].
#[derive(Debug, Clone, Default)]
pub struct EvalContext {
    pr_p95: Option<DoyBaseline>,
    tasmax_p90: Option<DoyBaseline>,
    tasmin_p90: Option<DoyBaseline>,
    tasmin_p10: Option<DoyBaseline>,
}

impl EvalContext {
    /// Creates an empty context (sufficient for threshold indicators).
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the wet-day precipitation 95th-percentile baseline.
    pub fn with_pr_p95(mut self, baseline: DoyBaseline) -> Self {
        self.pr_p95 = Some(baseline);
        self
    }

    /// Attaches the daily-maximum-temperature 90th-percentile baseline.
    pub fn with_tasmax_p90(mut self, baseline: DoyBaseline) -> Self {
        self.tasmax_p90 = Some(baseline);
        self
    }

    /// Attaches the daily-minimum-temperature 90th-percentile baseline.
    pub fn with_tasmin_p90(mut self, baseline: DoyBaseline) -> Self {
        self.tasmin_p90 = Some(baseline);
        self
    }

    /// Attaches the daily-minimum-temperature 10th-percentile baseline.
    pub fn with_tasmin_p10(mut self, baseline: DoyBaseline) -> Self {
        self.tasmin_p10 = Some(baseline);
        self
    }

    /// Returns the pr p95 baseline or a typed error naming the caller.
    pub fn pr_p95(&self, id: &str) -> Result<&DoyBaseline, IndicatorError> {
        self.pr_p95.as_ref().ok_or_else(|| missing(id, "pr_p95"))
    }

    /// Returns the tasmax p90 baseline or a typed error naming the caller.
    pub fn tasmax_p90(&self, id: &str) -> Result<&DoyBaseline, IndicatorError> {
        self.tasmax_p90.as_ref().ok_or_else(|| missing(id, "tasmax_p90"))
    }

    /// Returns the tasmin p90 baseline or a typed error naming the caller.
    pub fn tasmin_p90(&self, id: &str) -> Result<&DoyBaseline, IndicatorError> {
        self.tasmin_p90.as_ref().ok_or_else(|| missing(id, "tasmin_p90"))
    }

    /// Returns the tasmin p10 baseline or a typed error naming the caller.
    pub fn tasmin_p10(&self, id: &str) -> Result<&DoyBaseline, IndicatorError> {
        self.tasmin_p10.as_ref().ok_or_else(|| missing(id, "tasmin_p10"))
    }
}

fn missing(id: &str, baseline: &str) -> IndicatorError {
    IndicatorError::MissingBaseline {
        id: id.to_string(),
        baseline: baseline.to_string(),
    }
}
