//! Temporal window extraction over a grid source.

use tracing::debug;

use boreas_calendar::DateWindow;

use crate::daily::DailyGrid;
use crate::error::GridError;

/// Provider of per-(variable, year) daily grids.
///
/// Implementations load from NetCDF files, an on-disk cache, or in-memory
/// fixtures in tests. Missing data must surface as
/// [`GridError::DataUnavailable`] — the extractor never skips a year
/// silently.
pub trait GridSource {
    /// Loads the full daily grid for `variable` in `year`.
    fn load(&self, variable: &str, year: i32) -> Result<DailyGrid, GridError>;
}

/// Extracts the annual slice of `variable` for `year` under `window`.
///
/// For a window lying within the calendar year, the year's grid is loaded
/// and the sub-range selected. For a year-crossing window (start > end,
/// e.g. Oct 1 – Jun 30), the grids for `year - 1` and `year` are
/// concatenated along time and the slice from `{year-1}-start` through
/// `{year}-end` is selected.
///
/// The first year of an overall range has no preceding year; with a
/// crossing window the caller must skip it rather than call this function.
///
/// # Errors
///
/// Propagates [`GridError::DataUnavailable`] from the source and returns
/// [`GridError::WindowOutOfRange`] when loaded data does not fully cover
/// the resolved window.
pub fn extract_year(
    source: &dyn GridSource,
    variable: &str,
    year: i32,
    window: DateWindow,
) -> Result<DailyGrid, GridError> {
    let (start, end) = window.resolve(year)?;

    let grid = if window.crosses_year() {
        let previous = source.load(variable, year - 1)?;
        let current = source.load(variable, year)?;
        previous.concat_time(&current)?
    } else {
        source.load(variable, year)?
    };

    let slice = grid.select_range(start, end)?;
    debug!(
        variable,
        year,
        n_days = slice.n_days(),
        crossing = window.crosses_year(),
        "extracted annual window"
    );
    Ok(slice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boreas_calendar::{CivilDate, MonthDay, date_sequence, days_in_year};
    use ndarray::Array3;
    use std::collections::BTreeMap;

    /// In-memory grid source holding one full calendar year per entry.
    struct MemSource {
        grids: BTreeMap<(String, i32), DailyGrid>,
    }

    impl MemSource {
        fn with_years(variable: &str, years: &[i32]) -> Self {
            let mut grids = BTreeMap::new();
            for &year in years {
                let n = days_in_year(year) as usize;
                let dates = date_sequence(CivilDate::new(year, 1, 1).unwrap(), n);
                let data = Array3::from_shape_fn((n, 1, 1), |(t, _, _)| t as f64);
                let grid = DailyGrid::new(
                    variable,
                    "mm",
                    vec![43.0],
                    vec![80.0],
                    dates,
                    data,
                )
                .unwrap();
                grids.insert((variable.to_string(), year), grid);
            }
            Self { grids }
        }
    }

    impl GridSource for MemSource {
        fn load(&self, variable: &str, year: i32) -> Result<DailyGrid, GridError> {
            self.grids
                .get(&(variable.to_string(), year))
                .cloned()
                .ok_or_else(|| GridError::DataUnavailable {
                    variable: variable.to_string(),
                    year,
                })
        }
    }

    fn window(start: &str, end: &str) -> DateWindow {
        DateWindow::new(
            start.parse::<MonthDay>().unwrap(),
            end.parse::<MonthDay>().unwrap(),
        )
    }

    #[test]
    fn non_crossing_full_year() {
        let source = MemSource::with_years("pr", &[2000]);
        let slice = extract_year(&source, "pr", 2000, DateWindow::full_year()).unwrap();
        assert_eq!(slice.n_days(), 366);
        assert_eq!(slice.start_date(), CivilDate::new(2000, 1, 1).unwrap());
    }

    #[test]
    fn non_crossing_sub_range() {
        let source = MemSource::with_years("pr", &[2001]);
        let slice = extract_year(&source, "pr", 2001, window("04-01", "09-30")).unwrap();
        assert_eq!(slice.start_date(), CivilDate::new(2001, 4, 1).unwrap());
        assert_eq!(slice.end_date(), CivilDate::new(2001, 9, 30).unwrap());
        assert_eq!(slice.n_days(), 183);
    }

    #[test]
    fn crossing_window_stitches_two_years() {
        let source = MemSource::with_years("pr", &[1999, 2000]);
        let slice = extract_year(&source, "pr", 2000, window("10-01", "06-30")).unwrap();
        assert_eq!(slice.start_date(), CivilDate::new(1999, 10, 1).unwrap());
        assert_eq!(slice.end_date(), CivilDate::new(2000, 6, 30).unwrap());
        // 92 days of 1999 + 182 days of leap 2000.
        assert_eq!(slice.n_days(), 274);

        // Chronological with no duplicated or missing days.
        for pair in slice.dates().windows(2) {
            assert_eq!(pair[0].next(), pair[1]);
        }

        // Values from the tail of 1999 precede values from the head of 2000.
        // Oct 1 of a common year is day-of-year 274, 0-based offset 273.
        assert_eq!(slice.data()[[0, 0, 0]], 273.0);
        assert_eq!(slice.data()[[92, 0, 0]], 0.0); // Jan 1, 2000
    }

    #[test]
    fn crossing_window_missing_previous_year_is_fatal() {
        let source = MemSource::with_years("pr", &[2000]);
        let err = extract_year(&source, "pr", 2000, window("10-01", "06-30")).unwrap_err();
        assert!(matches!(
            err,
            GridError::DataUnavailable { year: 1999, .. }
        ));
    }

    #[test]
    fn missing_year_is_fatal() {
        let source = MemSource::with_years("pr", &[2000]);
        let err = extract_year(&source, "pr", 2001, DateWindow::full_year()).unwrap_err();
        assert!(matches!(
            err,
            GridError::DataUnavailable { year: 2001, .. }
        ));
    }
}
