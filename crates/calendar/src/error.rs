//! Error types for the boreas-calendar crate.

/// Error type for all fallible operations in the boreas-calendar crate.
///
/// This enum covers validation failures for month numbers, day-within-month
/// values, and month-day strings in the civil (leap-aware) calendar.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a day number exceeds the number of days in the given
    /// month (for the year in question, if any).
    #[error("invalid day: {day} for month {month} (max {max_day})")]
    InvalidDay {
        /// The invalid day number that was provided.
        day: u8,
        /// The month for which the day is invalid.
        month: u8,
        /// The maximum valid day for the given month.
        max_day: u8,
    },

    /// Returned when a month-day string does not match the `"MM-DD"` format.
    #[error("invalid month-day string: {input:?} (expected \"MM-DD\")")]
    InvalidMonthDayString {
        /// The string that failed to parse.
        input: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_month() {
        let err = CalendarError::InvalidMonth { month: 13 };
        assert_eq!(err.to_string(), "invalid month: 13 (must be 1..=12)");
    }

    #[test]
    fn error_invalid_day() {
        let err = CalendarError::InvalidDay {
            day: 30,
            month: 2,
            max_day: 29,
        };
        assert_eq!(err.to_string(), "invalid day: 30 for month 2 (max 29)");
    }

    #[test]
    fn error_invalid_month_day_string() {
        let err = CalendarError::InvalidMonthDayString {
            input: "10/01".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid month-day string: \"10/01\" (expected \"MM-DD\")"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_clone() {
        let err = CalendarError::InvalidMonth { month: 0 };
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }
}
