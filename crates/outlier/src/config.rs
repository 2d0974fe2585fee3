//! Outlier engine configuration.

use crate::error::OutlierError;

/// Statistical rule used to flag anomalous values within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlierMethod {
    /// Flag values outside `[Q1 - t*IQR, Q3 + t*IQR]`.
    Iqr,
    /// Flag values with `|x - median| > t * MAD`.
    Mad,
    /// Flag values with `|z| > t` (population standard deviation).
    Zscore,
    /// Flag nothing; passthrough baseline policy.
    None,
}

/// What happens to a flagged value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMethod {
    /// Replace with the mean of the group's non-flagged values.
    Mean,
    /// Replace with the median of the group's non-flagged values.
    Median,
    /// Replace with the missing-value sentinel (NaN).
    None,
    /// Drop the row entirely.
    Drop,
}

/// Configuration for per-group outlier cleaning.
#[derive(Debug, Clone, Copy)]
pub struct OutlierConfig {
    method: OutlierMethod,
    fill: FillMethod,
    threshold: f64,
    max_outlier: usize,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlierConfig {
    /// Creates a configuration with the default rule (MAD, threshold 3,
    /// median fill, guard of 2 per group).
    pub fn new() -> Self {
        Self {
            method: OutlierMethod::Mad,
            fill: FillMethod::Median,
            threshold: 3.0,
            max_outlier: 2,
        }
    }

    /// Sets the detection method.
    pub fn with_method(mut self, method: OutlierMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the fill policy.
    pub fn with_fill(mut self, fill: FillMethod) -> Self {
        self.fill = fill;
        self
    }

    /// Sets the detection threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the per-group guard: the maximum number of flagged values a
    /// group may carry before the threshold is rejected.
    pub fn with_max_outlier(mut self, max_outlier: usize) -> Self {
        self.max_outlier = max_outlier;
        self
    }

    /// Returns the detection method.
    pub fn method(&self) -> OutlierMethod {
        self.method
    }

    /// Returns the fill policy.
    pub fn fill(&self) -> FillMethod {
        self.fill
    }

    /// Returns the detection threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the per-group guard limit.
    pub fn max_outlier(&self) -> usize {
        self.max_outlier
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`OutlierError::InvalidConfig`] when the threshold is
    /// negative or not finite.
    pub fn validate(&self) -> Result<(), OutlierError> {
        if !self.threshold.is_finite() {
            return Err(OutlierError::InvalidConfig {
                reason: "threshold must be finite".to_string(),
            });
        }
        if self.threshold < 0.0 {
            return Err(OutlierError::InvalidConfig {
                reason: format!("threshold must be non-negative, got {}", self.threshold),
            });
        }
        Ok(())
    }
}

/// Ascending threshold grid for the retry search.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdGrid {
    start: f64,
    end: f64,
    step: f64,
}

impl Default for ThresholdGrid {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 10.0,
            step: 0.5,
        }
    }
}

impl ThresholdGrid {
    /// Creates a grid covering `[start, end)` in `step` increments.
    pub fn new(start: f64, end: f64, step: f64) -> Self {
        Self { start, end, step }
    }

    /// Returns the first threshold tried.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Returns the exclusive upper bound.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Returns the increment.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Iterates the thresholds in ascending order.
    pub fn thresholds(&self) -> impl Iterator<Item = f64> + '_ {
        let n = if self.step > 0.0 && self.end > self.start {
            ((self.end - self.start) / self.step).ceil() as usize
        } else {
            0
        };
        (0..n)
            .map(move |i| self.start + i as f64 * self.step)
            .filter(move |&t| t < self.end)
    }

    /// Validates the grid.
    ///
    /// # Errors
    ///
    /// Returns [`OutlierError::InvalidConfig`] when the step is not
    /// positive or the bounds are reversed.
    pub fn validate(&self) -> Result<(), OutlierError> {
        if !(self.step > 0.0 && self.step.is_finite()) {
            return Err(OutlierError::InvalidConfig {
                reason: format!("grid step must be positive, got {}", self.step),
            });
        }
        if self.end <= self.start {
            return Err(OutlierError::InvalidConfig {
                reason: format!(
                    "grid end ({}) must exceed start ({})",
                    self.end, self.start
                ),
            });
        }
        Ok(())
    }
}
