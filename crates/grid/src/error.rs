//! Error types for the boreas-grid crate.

/// Error type for all fallible operations in the boreas-grid crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GridError {
    /// Returned when required source data for a (variable, year) pair is
    /// missing. Every downstream year depends on its inputs, so this is
    /// never silently skipped.
    #[error("no source data for variable '{variable}', year {year}")]
    DataUnavailable {
        /// The daily variable that was requested.
        variable: String,
        /// The year that was requested.
        year: i32,
    },

    /// Wraps a failure in an underlying grid source (file read, cache).
    #[error("grid source error: {reason}")]
    Source {
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when the time axis length does not match the data's first
    /// dimension.
    #[error("time axis mismatch: {n_dates} dates for {n_steps} time steps")]
    TimeAxisMismatch {
        /// Number of entries on the date axis.
        n_dates: usize,
        /// Size of the data's time dimension.
        n_steps: usize,
    },

    /// Returned when the date axis is not a contiguous daily sequence.
    #[error("non-contiguous date axis at index {index}: {reason}")]
    NonContiguousDates {
        /// Index of the first out-of-sequence date.
        index: usize,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when two grids cannot be concatenated along time.
    #[error("grids cannot be concatenated: {reason}")]
    ConcatMismatch {
        /// Description of the coordinate or ordering mismatch.
        reason: String,
    },

    /// Returned when coordinate vectors do not match the data's shape.
    #[error("coordinate mismatch: {reason}")]
    CoordinateMismatch {
        /// Description of the mismatch.
        reason: String,
    },

    /// Returned when a requested date range is not fully covered by the
    /// grid's time axis.
    #[error(
        "window {window_start}..={window_end} not covered by data {data_start}..={data_end} for variable '{variable}'"
    )]
    WindowOutOfRange {
        /// The daily variable.
        variable: String,
        /// Requested window start, `YYYY-MM-DD`.
        window_start: String,
        /// Requested window end, `YYYY-MM-DD`.
        window_end: String,
        /// First available date, `YYYY-MM-DD`.
        data_start: String,
        /// Last available date, `YYYY-MM-DD`.
        data_end: String,
    },

    /// Wraps an error from the boreas-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },

    /// Returned when a grid has no time steps.
    #[error("grid for variable '{variable}' is empty")]
    EmptyGrid {
        /// The daily variable.
        variable: String,
    },
}

impl From<boreas_calendar::CalendarError> for GridError {
    fn from(e: boreas_calendar::CalendarError) -> Self {
        GridError::Calendar {
            reason: e.to_string(),
        }
    }
}
