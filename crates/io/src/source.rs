//! Cache-aware grid source for the pipeline.

use std::path::PathBuf;

use tracing::{debug, info};

use boreas_grid::{DailyGrid, GridError, GridSource};

use crate::error::IoError;
use crate::grid_cache::{read_grid_cache, write_grid_cache};
use crate::netcdf_read::read_daily_grid;
use crate::paths::grid_cache_path;

/// A [`GridSource`] backed by NetCDF files with an optional Parquet
/// cache.
///
/// Loads consult the cache first; a miss falls back to the NetCDF source
/// and populates the cache so later runs (and re-runs after a crash) skip
/// the decode. With caching disabled every load goes to NetCDF.
pub struct CachedGridSource {
    data_dir: PathBuf,
    cache_dir: Option<PathBuf>,
    source_id: String,
}

impl CachedGridSource {
    /// Creates a source reading `{variable}_{source_id}_daily_{year}.nc`
    /// files under `data_dir`, with no cache.
    pub fn new(data_dir: impl Into<PathBuf>, source_id: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache_dir: None,
            source_id: source_id.into(),
        }
    }

    /// Enables the Parquet cache under `cache_dir`.
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self
    }

    /// Returns the dataset/scenario id used in file names.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    fn load_inner(&self, variable: &str, year: i32) -> Result<DailyGrid, IoError> {
        if let Some(cache_dir) = &self.cache_dir {
            let cache_path = grid_cache_path(cache_dir, variable, &self.source_id, year);
            match read_grid_cache(&cache_path) {
                Ok(grid) => {
                    debug!(variable, year, "grid cache hit");
                    return Ok(grid);
                }
                Err(IoError::FileNotFound { .. }) => {}
                Err(other) => return Err(other),
            }

            let grid = read_daily_grid(&self.data_dir, variable, &self.source_id, year)?;
            write_grid_cache(&cache_path, &grid)?;
            info!(variable, year, path = %cache_path.display(), "grid cache populated");
            return Ok(grid);
        }

        read_daily_grid(&self.data_dir, variable, &self.source_id, year)
    }
}

impl GridSource for CachedGridSource {
    fn load(&self, variable: &str, year: i32) -> Result<DailyGrid, GridError> {
        self.load_inner(variable, year).map_err(|e| match e {
            IoError::FileNotFound { .. } => GridError::DataUnavailable {
                variable: variable.to_string(),
                year,
            },
            other => GridError::Source {
                reason: other.to_string(),
            },
        })
    }
}
