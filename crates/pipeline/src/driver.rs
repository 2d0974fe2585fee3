//! Per-indicator computation driver.

use tracing::{info, warn};

use boreas_grid::{GridError, GridSource, extract_year, reindex_to_year};
use boreas_indicators::{EvalContext, Indicator, percentile_doy, resolve};
use boreas_io::{
    RegionRow, intermediate_path, pivot_path, read_region_table, result_path, write_pivot_table,
    write_region_table,
};
use boreas_region::{RegionSet, reduce_by_region};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::table::AnnualTable;

/// Width of the day-of-year pooling window for percentile baselines.
const DOY_WINDOW: usize = 5;

/// Builds the evaluation context for the requested indicators.
///
/// Only the baselines the catalog entries actually need are fitted; the
/// baseline period's full-year grids are pulled from `source`.
///
/// # Errors
///
/// Propagates data-unavailability from the source: a missing baseline
/// year is a setup problem, not a data-quality problem.
pub fn build_context(
    source: &dyn GridSource,
    baseline_start: i32,
    baseline_end: i32,
    indicator_ids: &[String],
) -> Result<EvalContext, PipelineError> {
    let mut ctx = EvalContext::new();

    let needs = |id: &str| indicator_ids.iter().any(|i| i == id);

    let load_years = |variable: &str| -> Result<Vec<_>, PipelineError> {
        (baseline_start..=baseline_end)
            .map(|year| source.load(variable, year).map_err(PipelineError::from))
            .collect()
    };

    if needs("r95p") {
        let grids = load_years("pr")?;
        ctx = ctx.with_pr_p95(percentile_doy(&grids, DOY_WINDOW, 95.0)?);
        info!(baseline_start, baseline_end, "fitted pr p95 baseline");
    }
    if needs("tx90p") {
        let grids = load_years("tasmax")?;
        ctx = ctx.with_tasmax_p90(percentile_doy(&grids, DOY_WINDOW, 90.0)?);
        info!(baseline_start, baseline_end, "fitted tasmax p90 baseline");
    }
    if needs("tn90p") {
        let grids = load_years("tasmin")?;
        ctx = ctx.with_tasmin_p90(percentile_doy(&grids, DOY_WINDOW, 90.0)?);
        info!(baseline_start, baseline_end, "fitted tasmin p90 baseline");
    }
    if needs("tn10p") || needs("csdi") {
        let grids = load_years("tasmin")?;
        ctx = ctx.with_tasmin_p10(percentile_doy(&grids, DOY_WINDOW, 10.0)?);
        info!(baseline_start, baseline_end, "fitted tasmin p10 baseline");
    }

    Ok(ctx)
}

/// Computes one indicator's table for one year.
fn compute_year(
    indicator: &dyn Indicator,
    source: &dyn GridSource,
    regions: &RegionSet,
    ctx: &EvalContext,
    config: &PipelineConfig,
    year: i32,
) -> Result<Vec<RegionRow>, PipelineError> {
    let mut slices = Vec::with_capacity(indicator.variables().len());
    for variable in indicator.variables() {
        let slice = extract_year(source, variable, year, config.window())?;
        let slice = match indicator.reindex_default() {
            Some(default) => reindex_to_year(&slice, year, default)?,
            None => slice,
        };
        slices.push(slice);
    }

    let field = indicator.evaluate(&slices, ctx)?;
    let reduced = reduce_by_region(&field, regions, indicator.reduce_method());

    Ok(reduced
        .into_iter()
        .map(|rv| RegionRow {
            name: rv.name,
            year,
            value: rv.value,
        })
        .collect())
}

/// Computes one indicator across the configured year range.
///
/// Per-year intermediate CSVs are the unit of resumability: a year whose
/// file already exists is read back instead of recomputed.
fn compute_indicator(
    indicator: &dyn Indicator,
    source: &dyn GridSource,
    regions: &RegionSet,
    ctx: &EvalContext,
    config: &PipelineConfig,
) -> Result<AnnualTable, PipelineError> {
    let mut table = AnnualTable::new();

    for year in config.first_computed_year()..=config.end_year() {
        let path = intermediate_path(config.intermediate_dir(), indicator.id(), year);
        if config.use_cache() && path.exists() {
            let rows = read_region_table(&path)?;
            table.extend(AnnualTable::from_rows(rows));
            continue;
        }

        let rows = compute_year(indicator, source, regions, ctx, config, year)?;
        write_region_table(&path, &rows)?;
        table.extend(AnnualTable::from_rows(rows));
    }

    Ok(table)
}

/// Runs every requested indicator, independently.
///
/// An indicator whose final table already exists (and caching is on) is
/// read back untouched. A failure inside one indicator's evaluation is
/// logged and the driver continues with the rest; missing source data
/// ([`GridError::DataUnavailable`]) aborts the whole run instead, since
/// it signals a setup problem every remaining indicator would share.
///
/// Returns one `(id, table)` pair per indicator that produced output.
pub fn run_indicators(
    source: &dyn GridSource,
    regions: &RegionSet,
    ctx: &EvalContext,
    config: &PipelineConfig,
) -> Result<Vec<(String, AnnualTable)>, PipelineError> {
    config.validate()?;
    let indicators = resolve(config.indicators())?;

    let mut results = Vec::with_capacity(indicators.len());
    for indicator in &indicators {
        let id = indicator.id();
        let final_path = result_path(config.output_dir(), id);

        if config.use_cache() && final_path.exists() {
            info!(indicator = id, "final table exists; skipping computation");
            let rows = read_region_table(&final_path)?;
            results.push((id.to_string(), AnnualTable::from_rows(rows)));
            continue;
        }

        match compute_indicator(indicator.as_ref(), source, regions, ctx, config) {
            Ok(table) => {
                write_region_table(&final_path, table.rows())?;
                write_pivot_table(
                    &pivot_path(config.output_dir(), id),
                    &regions
                        .names()
                        .iter()
                        .map(|s| s.to_string())
                        .collect::<Vec<_>>(),
                    table.rows(),
                )?;
                info!(indicator = id, n_rows = table.len(), "indicator computed");
                results.push((id.to_string(), table));
            }
            Err(PipelineError::Grid(GridError::DataUnavailable { variable, year })) => {
                // Setup problem: abort the run rather than skip.
                return Err(PipelineError::Grid(GridError::DataUnavailable {
                    variable,
                    year,
                }));
            }
            Err(e) => {
                warn!(indicator = id, error = %e, "indicator failed; continuing");
            }
        }
    }

    Ok(results)
}
