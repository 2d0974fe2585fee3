//! Year-independent (month, day) pairs.

use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

/// Number of days in each month of a common year (index 0 unused).
pub(crate) const DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Day-of-year on which each month starts in a common year (index 0 unused).
pub(crate) const MONTH_START_DOY: [u16; 13] =
    [0, 1, 32, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

/// A validated (month, day) pair without year context.
///
/// Ordered by (month, day), so `MonthDay` comparisons express "earlier in
/// the calendar year". February 29 is accepted here; whether it resolves to
/// an actual date depends on the year (see [`crate::CivilDate::new`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: u8,
    day: u8,
}

impl MonthDay {
    /// Creates a new `MonthDay`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12
    /// and [`CalendarError::InvalidDay`] if `day` is not valid for the month
    /// (February allows up to 29).
    pub fn new(month: u8, day: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        let max_day = if month == 2 {
            29
        } else {
            DAYS_PER_MONTH[month as usize]
        };
        if !(1..=max_day).contains(&day) {
            return Err(CalendarError::InvalidDay {
                day,
                month,
                max_day,
            });
        }
        Ok(Self { month, day })
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Returns the day within the month (1..=31).
    pub fn day(self) -> u8 {
        self.day
    }
}

impl FromStr for MonthDay {
    type Err = CalendarError;

    /// Parses an `"MM-DD"` string such as `"10-01"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidMonthDayString {
            input: s.to_string(),
        };
        let (month_str, day_str) = s.split_once('-').ok_or_else(invalid)?;
        if month_str.len() != 2 || day_str.len() != 2 {
            return Err(invalid());
        }
        let month: u8 = month_str.parse().map_err(|_| invalid())?;
        let day: u8 = day_str.parse().map_err(|_| invalid())?;
        Self::new(month, day)
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}
