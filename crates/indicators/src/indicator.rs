//! The indicator capability trait.

use boreas_grid::{AnnualField, DailyGrid};
use boreas_region::ReduceMethod;

use crate::context::EvalContext;
use crate::error::IndicatorError;

/// A named annual climate indicator.
///
/// Implementations are thin, pure transforms from a daily slice to an
/// annual scalar field; the pipeline is agnostic to their internals.
/// Metadata on the trait tells the driver which daily variables to load,
/// whether the slice must be gap-filled to a complete year first, and how
/// the resulting field collapses to per-region scalars.
///
/// Temperature inputs are expected in °C and precipitation in mm/day.
pub trait Indicator: Send + Sync {
    /// Stable identifier used in file names and table columns.
    fn id(&self) -> &'static str;

    /// Human-readable name for reports.
    fn display_name(&self) -> &'static str;

    /// Unit of the annual value.
    fn unit(&self) -> &'static str;

    /// Daily variables required, in the order `evaluate` expects them.
    fn variables(&self) -> &'static [&'static str];

    /// How the annual field collapses to one scalar per region.
    fn reduce_method(&self) -> ReduceMethod {
        ReduceMethod::Mean
    }

    /// `Some(default)` when the indicator requires a gap-filled full-year
    /// series; the driver reindexes the slice and fills missing days with
    /// the default before evaluation.
    fn reindex_default(&self) -> Option<f64> {
        None
    }

    /// Evaluates the indicator over one year's daily slices.
    ///
    /// `slices` is aligned with [`Indicator::variables`].
    fn evaluate(
        &self,
        slices: &[DailyGrid],
        ctx: &EvalContext,
    ) -> Result<AnnualField, IndicatorError>;
}

/// Returns the single input slice of a one-variable indicator.
pub(crate) fn single_input<'a>(
    id: &str,
    slices: &'a [DailyGrid],
) -> Result<&'a DailyGrid, IndicatorError> {
    match slices {
        [one] => Ok(one),
        _ => Err(IndicatorError::SliceCountMismatch {
            id: id.to_string(),
            expected: 1,
            got: slices.len(),
        }),
    }
}

/// Returns the two input slices of a two-variable indicator, verifying
/// they are aligned in dates and shape.
pub(crate) fn paired_input<'a>(
    id: &str,
    slices: &'a [DailyGrid],
) -> Result<(&'a DailyGrid, &'a DailyGrid), IndicatorError> {
    let (a, b) = match slices {
        [a, b] => (a, b),
        _ => {
            return Err(IndicatorError::SliceCountMismatch {
                id: id.to_string(),
                expected: 2,
                got: slices.len(),
            });
        }
    };
    if a.dates() != b.dates() {
        return Err(IndicatorError::SliceMismatch {
            id: id.to_string(),
            reason: "date axes differ".to_string(),
        });
    }
    if a.lat() != b.lat() || a.lon() != b.lon() {
        return Err(IndicatorError::SliceMismatch {
            id: id.to_string(),
            reason: "coordinates differ".to_string(),
        });
    }
    Ok((a, b))
}
