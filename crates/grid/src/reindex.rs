//! Full-year reindexing with sentinel fill.

use ndarray::{Array3, s};

use boreas_calendar::{CivilDate, date_sequence, days_in_year};

use crate::daily::DailyGrid;
use crate::error::GridError;

/// Re-anchors `grid` to January 1 of `year` and reindexes it to the
/// complete calendar year, filling missing days with `default`.
///
/// The slice's elapsed-day offsets are preserved: day `i` of the input
/// becomes day `i` of the output year regardless of its original calendar
/// date. This normalizes year-crossing windows so day-of-year-sensitive
/// indicators (consecutive-day counts) see one uninterrupted series. Days
/// past the end of the slice are filled with `default`; a slice longer
/// than the target year is truncated.
///
/// Reindexing a slice that already covers exactly the full target year is
/// the identity (values and coordinates unchanged).
pub fn reindex_to_year(grid: &DailyGrid, year: i32, default: f64) -> Result<DailyGrid, GridError> {
    let n_target = days_in_year(year) as usize;
    let n_source = grid.n_days();
    let shape = grid.data().shape();

    let start = CivilDate::new(year, 1, 1)?;
    let dates = date_sequence(start, n_target);

    let mut data = Array3::from_elem((n_target, shape[1], shape[2]), default);
    let n_copy = n_source.min(n_target);
    data.slice_mut(s![..n_copy, .., ..])
        .assign(&grid.data().slice(s![..n_copy, .., ..]));

    DailyGrid::new(
        grid.variable(),
        grid.units(),
        grid.lat().to_vec(),
        grid.lon().to_vec(),
        dates,
        data,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use boreas_calendar::date_sequence;

    fn grid_from(year: i32, month: u8, day: u8, n_days: usize) -> DailyGrid {
        let dates = date_sequence(CivilDate::new(year, month, day).unwrap(), n_days);
        let data = Array3::from_shape_fn((n_days, 1, 2), |(t, _, x)| t as f64 * 10.0 + x as f64);
        DailyGrid::new("pr", "mm", vec![43.0], vec![80.0, 81.0], dates, data).unwrap()
    }

    #[test]
    fn pads_short_slice_with_default() {
        // Oct 1 1999 .. Jun 30 2000 re-anchored into year 2000.
        let slice = grid_from(1999, 10, 1, 274);
        let full = reindex_to_year(&slice, 2000, -5.0).unwrap();

        assert_eq!(full.n_days(), 366);
        assert_eq!(full.start_date(), CivilDate::new(2000, 1, 1).unwrap());
        assert_eq!(full.end_date(), CivilDate::new(2000, 12, 31).unwrap());

        // Offsets preserved: day 0 keeps its value.
        assert_eq!(full.data()[[0, 0, 0]], 0.0);
        assert_eq!(full.data()[[273, 0, 1]], 2731.0);
        // Padding beyond the slice.
        assert_eq!(full.data()[[274, 0, 0]], -5.0);
        assert_eq!(full.data()[[365, 0, 1]], -5.0);
    }

    #[test]
    fn identity_on_full_year() {
        let full = grid_from(2001, 1, 1, 365);
        let reindexed = reindex_to_year(&full, 2001, 0.0).unwrap();

        assert_eq!(reindexed.dates(), full.dates());
        assert_eq!(reindexed.data(), full.data());
    }

    #[test]
    fn truncates_overlong_slice() {
        // A 366-day slice reindexed into a common year keeps the first 365.
        let slice = grid_from(2000, 1, 1, 366);
        let reindexed = reindex_to_year(&slice, 2001, 0.0).unwrap();
        assert_eq!(reindexed.n_days(), 365);
        assert_eq!(reindexed.data()[[364, 0, 0]], 3640.0);
    }

    #[test]
    fn leap_target_year() {
        let slice = grid_from(2023, 10, 1, 100);
        let reindexed = reindex_to_year(&slice, 2024, 0.0).unwrap();
        assert_eq!(reindexed.n_days(), 366);
    }
}
