//! # boreas-io
//!
//! File formats for the boreas pipeline: daily gridded NetCDF input
//! (fixed `{variable}_{source}_daily_{year}.nc` naming, CF time axes),
//! a self-describing Parquet cache of decoded grids keyed by (variable,
//! source, year), and the CSV region tables the pipeline emits
//! (long-form, pivoted region × year, and combined multi-indicator).

mod error;
mod grid_cache;
mod netcdf_read;
mod paths;
mod source;
mod tables;

pub use error::IoError;
pub use grid_cache::{read_grid_cache, write_grid_cache};
pub use netcdf_read::read_daily_grid;
pub use paths::{daily_grid_path, grid_cache_path, intermediate_path, pivot_path, result_path};
pub use source::CachedGridSource;
pub use tables::{
    RegionRow, read_combined_table, read_region_table, write_combined_table, write_pivot_table,
    write_region_table,
};
