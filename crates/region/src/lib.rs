//! # boreas-region
//!
//! Administrative region polygons and spatial reduction.
//!
//! A [`RegionSet`] is the fixed, ordered collection of named region
//! polygons for one run, loaded once from a GeoJSON FeatureCollection and
//! read-only thereafter. [`reduce_by_region`] collapses a gridded
//! [`boreas_grid::AnnualField`] to one scalar per region (mean or max over
//! the cells whose centers fall inside the polygon, NaN cells skipped).

mod error;
mod geometry;
mod load;
mod reduce;

pub use error::RegionError;
pub use geometry::Region;
pub use load::RegionSet;
pub use reduce::{ReduceMethod, RegionValue, reduce_by_region};
