//! Error types for boreas-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the boreas-io crate.
///
/// Covers I/O failures, format-specific errors from NetCDF, Parquet, and
/// CSV, calendar conversion issues, and data-model mismatches encountered
/// when reading or writing climate files.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Wraps an error originating from the Parquet library.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying Parquet failure.
        reason: String,
    },

    /// Returned when a CSV file cannot be read, written, or parsed.
    #[error("csv error in {} (line {line}): {reason}", path.display())]
    Csv {
        /// Path to the offending file.
        path: PathBuf,
        /// 1-based line number (0 for file-level failures).
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// Wraps an error originating from the boreas-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },

    /// Wraps an error originating from the boreas-grid crate.
    #[error("grid error: {reason}")]
    Grid {
        /// Description of the underlying grid failure.
        reason: String,
    },

    /// Returned when a required variable is not present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a dimension has an unexpected size or count.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when a time value cannot be parsed or is out of range.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time parsing issue.
        reason: String,
    },
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<boreas_calendar::CalendarError> for IoError {
    fn from(e: boreas_calendar::CalendarError) -> Self {
        IoError::Calendar {
            reason: e.to_string(),
        }
    }
}

impl From<boreas_grid::GridError> for IoError {
    fn from(e: boreas_grid::GridError) -> Self {
        IoError::Grid {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/data/pr_era5_daily_1989.nc"),
        };
        assert_eq!(
            err.to_string(),
            "file not found: /data/pr_era5_daily_1989.nc"
        );
    }

    #[test]
    fn display_csv() {
        let err = IoError::Csv {
            path: PathBuf::from("cdd.csv"),
            line: 12,
            reason: "expected 3 fields".to_string(),
        };
        assert_eq!(err.to_string(), "csv error in cdd.csv (line 12): expected 3 fields");
    }

    #[test]
    fn display_missing_variable() {
        let err = IoError::MissingVariable {
            name: "pr".to_string(),
            path: PathBuf::from("/data/obs.nc"),
        };
        assert_eq!(err.to_string(), "variable 'pr' not found in /data/obs.nc");
    }

    #[test]
    fn display_dimension_mismatch() {
        let err = IoError::DimensionMismatch {
            name: "time".to_string(),
            expected: 3,
            got: 2,
        };
        assert_eq!(err.to_string(), "dimension 'time' mismatch: expected 3, got 2");
    }

    #[test]
    fn from_parquet_error() {
        let pq = parquet::errors::ParquetError::General("bad footer".to_string());
        let err: IoError = pq.into();
        assert!(matches!(err, IoError::Parquet { .. }));
    }

    #[test]
    fn from_calendar_error() {
        let cal = boreas_calendar::CalendarError::InvalidMonth { month: 0 };
        let err: IoError = cal.into();
        assert!(matches!(err, IoError::Calendar { .. }));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
