//! In-memory daily gridded data.

use ndarray::{Array3, Axis, s};

use boreas_calendar::CivilDate;

use crate::error::GridError;

/// A single physical variable on a (time × lat × lon) grid with a daily,
/// calendar-correct time axis.
///
/// Grids are never mutated by the pipeline; every transform produces a new
/// grid. Invariants established at construction:
/// - `dates.len()` equals the data's time dimension,
/// - the date axis is a strictly contiguous daily sequence.
#[derive(Debug, Clone)]
pub struct DailyGrid {
    variable: String,
    units: String,
    lat: Vec<f64>,
    lon: Vec<f64>,
    dates: Vec<CivilDate>,
    data: Array3<f64>,
}

impl DailyGrid {
    /// Creates a new `DailyGrid`, validating axis lengths and date
    /// contiguity.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyGrid`] when there are no time steps,
    /// [`GridError::TimeAxisMismatch`] when the date axis and data
    /// disagree, and [`GridError::NonContiguousDates`] when the dates are
    /// not consecutive days.
    pub fn new(
        variable: impl Into<String>,
        units: impl Into<String>,
        lat: Vec<f64>,
        lon: Vec<f64>,
        dates: Vec<CivilDate>,
        data: Array3<f64>,
    ) -> Result<Self, GridError> {
        let variable = variable.into();
        if dates.is_empty() {
            return Err(GridError::EmptyGrid { variable });
        }
        let shape = data.shape();
        if dates.len() != shape[0] {
            return Err(GridError::TimeAxisMismatch {
                n_dates: dates.len(),
                n_steps: shape[0],
            });
        }
        if lat.len() != shape[1] || lon.len() != shape[2] {
            return Err(GridError::CoordinateMismatch {
                reason: format!(
                    "coordinate lengths ({}, {}) do not match data shape ({}, {})",
                    lat.len(),
                    lon.len(),
                    shape[1],
                    shape[2]
                ),
            });
        }
        for (i, pair) in dates.windows(2).enumerate() {
            if pair[0].next() != pair[1] {
                return Err(GridError::NonContiguousDates {
                    index: i + 1,
                    reason: format!("expected {}, got {}", fmt_date(pair[0].next()), fmt_date(pair[1])),
                });
            }
        }
        Ok(Self {
            variable,
            units: units.into(),
            lat,
            lon,
            dates,
            data,
        })
    }

    /// Returns the variable name.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Returns the units string.
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Returns the latitude coordinates.
    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    /// Returns the longitude coordinates.
    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    /// Returns the date axis.
    pub fn dates(&self) -> &[CivilDate] {
        &self.dates
    }

    /// Returns the underlying (time × lat × lon) array.
    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }

    /// Returns the number of time steps.
    pub fn n_days(&self) -> usize {
        self.dates.len()
    }

    /// Returns the first date on the axis.
    pub fn start_date(&self) -> CivilDate {
        self.dates[0]
    }

    /// Returns the last date on the axis.
    pub fn end_date(&self) -> CivilDate {
        *self.dates.last().expect("constructor rejects empty grids")
    }

    /// Concatenates two grids along the time axis.
    ///
    /// `other` must continue exactly where `self` ends (next calendar day)
    /// and share variable and coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ConcatMismatch`] on any variable, coordinate,
    /// or ordering mismatch.
    pub fn concat_time(&self, other: &DailyGrid) -> Result<DailyGrid, GridError> {
        if self.variable != other.variable {
            return Err(GridError::ConcatMismatch {
                reason: format!(
                    "variable '{}' vs '{}'",
                    self.variable, other.variable
                ),
            });
        }
        if self.lat != other.lat || self.lon != other.lon {
            return Err(GridError::ConcatMismatch {
                reason: "latitude/longitude coordinates differ".to_string(),
            });
        }
        let expected = self.end_date().next();
        if other.start_date() != expected {
            return Err(GridError::ConcatMismatch {
                reason: format!(
                    "time axes not consecutive: expected {}, got {}",
                    fmt_date(expected),
                    fmt_date(other.start_date())
                ),
            });
        }

        let mut dates = self.dates.clone();
        dates.extend_from_slice(&other.dates);

        let data = ndarray::concatenate(Axis(0), &[self.data.view(), other.data.view()])
            .map_err(|e| GridError::ConcatMismatch {
                reason: e.to_string(),
            })?;

        DailyGrid::new(
            self.variable.clone(),
            self.units.clone(),
            self.lat.clone(),
            self.lon.clone(),
            dates,
            data,
        )
    }

    /// Selects the inclusive date range `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::WindowOutOfRange`] when the grid does not fully
    /// cover the requested range. Partial coverage is never silently
    /// truncated.
    pub fn select_range(&self, start: CivilDate, end: CivilDate) -> Result<DailyGrid, GridError> {
        if start < self.start_date() || end > self.end_date() || end < start {
            return Err(GridError::WindowOutOfRange {
                variable: self.variable.clone(),
                window_start: fmt_date(start),
                window_end: fmt_date(end),
                data_start: fmt_date(self.start_date()),
                data_end: fmt_date(self.end_date()),
            });
        }

        // Date axis is contiguous, so positions follow from offsets.
        let first = day_offset(self.start_date(), start);
        let last = day_offset(self.start_date(), end);

        let dates = self.dates[first..=last].to_vec();
        let data = self.data.slice(s![first..=last, .., ..]).to_owned();

        DailyGrid::new(
            self.variable.clone(),
            self.units.clone(),
            self.lat.clone(),
            self.lon.clone(),
            dates,
            data,
        )
    }
}

/// Formats a date as `YYYY-MM-DD` for error messages.
pub(crate) fn fmt_date(d: CivilDate) -> String {
    format!("{:04}-{:02}-{:02}", d.year(), d.month(), d.day())
}

/// Number of days from `from` to `to` (`to >= from`), counted by walking
/// the calendar.
fn day_offset(from: CivilDate, to: CivilDate) -> usize {
    let mut current = from;
    let mut offset = 0;
    while current < to {
        current = current.next();
        offset += 1;
    }
    offset
}
