//! # boreas-grid
//!
//! Daily gridded data model and temporal window extraction.
//!
//! A [`DailyGrid`] holds one physical variable on a (time × lat × lon)
//! grid with a contiguous daily time axis; an [`AnnualField`] is the
//! (lat × lon) result of evaluating an indicator over one year's slice.
//! The [`extract_year`] driver pulls annual slices from a [`GridSource`],
//! stitching the tail of year *y−1* onto the head of year *y* when the
//! aggregation window crosses the calendar boundary, and
//! [`reindex_to_year`] gap-fills a slice to a complete calendar year for
//! indicators that require an uninterrupted series.

mod annual;
mod daily;
mod error;
mod reindex;
mod window;

pub use annual::AnnualField;
pub use daily::DailyGrid;
pub use error::GridError;
pub use reindex::reindex_to_year;
pub use window::{GridSource, extract_year};
