//! Error types for the boreas-delta crate.

/// Error type for all fallible operations in the boreas-delta crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DeltaError {
    /// Returned when a projection series is empty.
    #[error("projection series for {label} is empty")]
    EmptyData {
        /// Indicator/region label of the offending series.
        label: String,
    },

    /// Returned when years and values differ in length.
    #[error("length mismatch for {label}: {n_years} years for {n_values} values")]
    LengthMismatch {
        /// Indicator/region label of the offending series.
        label: String,
        /// Length of the year slice.
        n_years: usize,
        /// Length of the value slice.
        n_values: usize,
    },

    /// Returned when the baseline for a group has no finite values.
    #[error("baseline for group '{group}' has no finite values")]
    EmptyBaseline {
        /// The group whose baseline is unusable.
        group: String,
    },

    /// Returned when no calibration window has variance and the series is
    /// not provably constant zero. Ambiguous zero-variance data cannot be
    /// safely rescaled.
    #[error("degenerate calibration window for {label}: zero variance")]
    DegenerateCalibrationWindow {
        /// Indicator/region label of the offending series.
        label: String,
    },

    /// Returned when a projection group has no corresponding baseline
    /// group. A series cannot be corrected against a baseline that does
    /// not exist.
    #[error("projection group '{group}' has no matching baseline group")]
    UnmatchedBaselineGroup {
        /// The unmatched group key.
        group: String,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}
