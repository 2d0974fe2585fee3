//! Error types for the boreas-pipeline crate.

/// Error type for all fallible operations in the boreas-pipeline crate.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Wraps a failure inside one indicator's computation. Caught at the
    /// driver level so the remaining indicators still run.
    #[error("indicator '{id}' failed: {reason}")]
    Indicator {
        /// The indicator that failed.
        id: String,
        /// Description of the failure.
        reason: String,
    },

    /// Wraps an error from the boreas-grid crate. Data unavailability
    /// inside this variant aborts the run.
    #[error(transparent)]
    Grid(#[from] boreas_grid::GridError),

    /// Wraps an error from the boreas-io crate.
    #[error(transparent)]
    Io(#[from] boreas_io::IoError),

    /// Wraps an error from the boreas-indicators crate.
    #[error(transparent)]
    Evaluate(#[from] boreas_indicators::IndicatorError),

    /// Wraps an error from the boreas-outlier crate.
    #[error(transparent)]
    Outlier(#[from] boreas_outlier::OutlierError),

    /// Wraps an error from the boreas-delta crate.
    #[error(transparent)]
    Delta(#[from] boreas_delta::DeltaError),

    /// Returned when stage inputs are inconsistent.
    #[error("invalid pipeline input: {reason}")]
    InvalidInput {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid pipeline configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_indicator() {
        let err = PipelineError::Indicator {
            id: "cdd".to_string(),
            reason: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "indicator 'cdd' failed: boom");
    }

    #[test]
    fn grid_error_is_transparent() {
        let err: PipelineError = boreas_grid::GridError::DataUnavailable {
            variable: "pr".to_string(),
            year: 1989,
        }
        .into();
        assert_eq!(err.to_string(), "no source data for variable 'pr', year 1989");
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<PipelineError>();
    }
}
