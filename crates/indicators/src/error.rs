//! Error types for the boreas-indicators crate.

/// Error type for all fallible operations in the boreas-indicators crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum IndicatorError {
    /// Returned when an indicator id is not present in the registry.
    #[error("unknown indicator: '{id}'")]
    UnknownIndicator {
        /// The id that failed to resolve.
        id: String,
    },

    /// Returned when an indicator needs a day-of-year percentile baseline
    /// that was not supplied in the evaluation context.
    #[error("indicator '{id}' requires the '{baseline}' baseline")]
    MissingBaseline {
        /// The indicator being evaluated.
        id: String,
        /// Name of the missing baseline.
        baseline: String,
    },

    /// Returned when the number of daily slices does not match the
    /// indicator's variable list.
    #[error("indicator '{id}' expects {expected} input slice(s), got {got}")]
    SliceCountMismatch {
        /// The indicator being evaluated.
        id: String,
        /// Number of variables the indicator declares.
        expected: usize,
        /// Number of slices supplied.
        got: usize,
    },

    /// Returned when multi-variable inputs disagree in shape or dates.
    #[error("indicator '{id}' input slices misaligned: {reason}")]
    SliceMismatch {
        /// The indicator being evaluated.
        id: String,
        /// Description of the misalignment.
        reason: String,
    },

    /// Returned when baseline grids are unusable for percentile fitting.
    #[error("cannot fit day-of-year percentiles: {reason}")]
    BaselineFit {
        /// Description of the problem.
        reason: String,
    },

    /// Wraps an error from the boreas-grid crate.
    #[error("grid error: {reason}")]
    Grid {
        /// Description of the underlying grid failure.
        reason: String,
    },
}

impl From<boreas_grid::GridError> for IndicatorError {
    fn from(e: boreas_grid::GridError) -> Self {
        IndicatorError::Grid {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_indicator() {
        let err = IndicatorError::UnknownIndicator {
            id: "xyz".to_string(),
        };
        assert_eq!(err.to_string(), "unknown indicator: 'xyz'");
    }

    #[test]
    fn display_missing_baseline() {
        let err = IndicatorError::MissingBaseline {
            id: "r95p".to_string(),
            baseline: "pr_p95".to_string(),
        };
        assert_eq!(err.to_string(), "indicator 'r95p' requires the 'pr_p95' baseline");
    }

    #[test]
    fn display_slice_count_mismatch() {
        let err = IndicatorError::SliceCountMismatch {
            id: "dtr".to_string(),
            expected: 2,
            got: 1,
        };
        assert_eq!(
            err.to_string(),
            "indicator 'dtr' expects 2 input slice(s), got 1"
        );
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IndicatorError>();
    }
}
