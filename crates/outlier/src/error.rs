//! Error types for the boreas-outlier crate.

/// Error type for all fallible operations in the boreas-outlier crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OutlierError {
    /// Returned when input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when values and group keys differ in length.
    #[error("length mismatch: {n_values} values for {n_groups} group keys")]
    LengthMismatch {
        /// Length of the value slice.
        n_values: usize,
        /// Length of the group-key slice.
        n_groups: usize,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a group flags more values than the guard tolerates
    /// at the current threshold. Recoverable: the threshold grid search
    /// retries with a larger threshold.
    #[error("too many outliers in group '{group}': {count} flagged (max {max_outlier})")]
    TooManyOutliers {
        /// Group key whose guard tripped.
        group: String,
        /// Number of values flagged in the group.
        count: usize,
        /// Configured guard limit.
        max_outlier: usize,
    },
}
