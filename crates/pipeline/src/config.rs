//! Pipeline driver configuration.

use std::path::PathBuf;

use boreas_calendar::DateWindow;

use crate::error::PipelineError;

/// Configuration for the per-indicator computation driver.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    indicators: Vec<String>,
    window: DateWindow,
    start_year: i32,
    end_year: i32,
    min_year: i32,
    use_cache: bool,
    intermediate_dir: PathBuf,
    output_dir: PathBuf,
}

impl PipelineConfig {
    /// Creates a configuration for the given indicators and year range.
    pub fn new(
        indicators: Vec<String>,
        start_year: i32,
        end_year: i32,
        intermediate_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            indicators,
            window: DateWindow::full_year(),
            start_year,
            end_year,
            min_year: start_year,
            use_cache: true,
            intermediate_dir: intermediate_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Sets the annual aggregation window (default: full calendar year).
    pub fn with_window(mut self, window: DateWindow) -> Self {
        self.window = window;
        self
    }

    /// Sets the minimum year kept in the combined table.
    pub fn with_min_year(mut self, min_year: i32) -> Self {
        self.min_year = min_year;
        self
    }

    /// Enables or disables on-disk caching (default: enabled).
    pub fn with_use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    /// Returns the requested indicator ids.
    pub fn indicators(&self) -> &[String] {
        &self.indicators
    }

    /// Returns the aggregation window.
    pub fn window(&self) -> DateWindow {
        self.window
    }

    /// Returns the first year of the computation range.
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Returns the last year of the computation range.
    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    /// Returns the combined-table year cutoff.
    pub fn min_year(&self) -> i32 {
        self.min_year
    }

    /// Returns whether on-disk caching is enabled.
    pub fn use_cache(&self) -> bool {
        self.use_cache
    }

    /// Returns the per-year intermediate directory.
    pub fn intermediate_dir(&self) -> &PathBuf {
        &self.intermediate_dir
    }

    /// Returns the final output directory.
    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    /// The first year actually computed: with a year-crossing window the
    /// first year of the range has no preceding year and is skipped.
    pub fn first_computed_year(&self) -> i32 {
        if self.window.crosses_year() {
            self.start_year + 1
        } else {
            self.start_year
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.indicators.is_empty() {
            return Err(PipelineError::InvalidConfig {
                reason: "no indicators requested".to_string(),
            });
        }
        if self.end_year < self.start_year {
            return Err(PipelineError::InvalidConfig {
                reason: format!(
                    "end year {} precedes start year {}",
                    self.end_year, self.start_year
                ),
            });
        }
        if self.first_computed_year() > self.end_year {
            return Err(PipelineError::InvalidConfig {
                reason: "year range too short for a year-crossing window".to_string(),
            });
        }
        Ok(())
    }
}
