//! # boreas-calendar
//!
//! Civil-calendar date arithmetic for the boreas indicator pipeline.
//!
//! Daily climate files carry real (leap-aware) calendars, so unlike
//! generators that work on a 365-day model year this crate implements the
//! proleptic Gregorian calendar: `CivilDate` with year context, validated
//! year-independent `MonthDay` pairs (the configuration surface uses
//! `"MM-DD"` strings), date sequences, and `DateWindow` — the yearly
//! aggregation window that may cross the calendar-year boundary
//! (e.g. Oct 1 – Jun 30).
//!
//! ## Quick Start
//!
//! ```
//! use boreas_calendar::{CivilDate, DateWindow, MonthDay, date_range};
//!
//! let start: MonthDay = "10-01".parse().unwrap();
//! let end: MonthDay = "06-30".parse().unwrap();
//! let window = DateWindow::new(start, end);
//! assert!(window.crosses_year());
//!
//! // The window for 2000 runs from 1999-10-01 through 2000-06-30.
//! let (a, b) = window.resolve(2000).unwrap();
//! let days = date_range(a, b);
//! assert_eq!(days.first().unwrap().year(), 1999);
//! assert_eq!(days.last().unwrap(), &CivilDate::new(2000, 6, 30).unwrap());
//! ```

mod date;
mod error;
mod month_day;
mod sequence;
mod window;

pub use date::{CivilDate, days_in_month, days_in_year, is_leap_year};
pub use error::CalendarError;
pub use month_day::MonthDay;
pub use sequence::{date_range, date_sequence, dates_of_year};
pub use window::DateWindow;
