//! # boreas-indicators
//!
//! Annual climate indicator catalog and evaluation registry.
//!
//! Each indicator is a thin, pure transform `(annual daily slice) ->
//! (annual scalar field)` behind the [`Indicator`] trait: threshold
//! counts, run lengths, extrema, and percentile exceedances. The
//! pipeline resolves indicator ids against [`registry`] at startup and
//! drives evaluation; everything an evaluation needs beyond its slice —
//! the day-of-year percentile baselines — is threaded explicitly through
//! [`EvalContext`].
//!
//! The percentile-of-day construction ([`percentile_doy`]) is the
//! standard climate-index primitive: for every day of year, pool the
//! baseline period's values in a small centered window and take the
//! requested per-cell percentile.

mod baseline;
mod context;
mod error;
mod humidity;
mod indicator;
mod precip;
mod registry;
mod series;
mod temperature;

pub use baseline::{DoyBaseline, percentile_doy};
pub use context::EvalContext;
pub use error::IndicatorError;
pub use indicator::Indicator;
pub use registry::{registry, resolve};
