//! Post-processing stages: outlier cleaning and delta correction.

use std::collections::BTreeMap;

use tracing::info;

use boreas_delta::{DeltaConfig, correct_indicator};
use boreas_outlier::{OutlierConfig, ThresholdGrid, clean_columns};

use crate::error::PipelineError;
use crate::table::{AnnualTable, MultiTable};

/// Merges per-indicator tables into the combined multi-indicator table,
/// dropping rows before `min_year`.
pub fn merge_tables(tables: &[(String, AnnualTable)], min_year: i32) -> MultiTable {
    MultiTable::outer_join(tables).filter_min_year(min_year)
}

/// Cleans every indicator column of the combined table with the
/// threshold grid search.
///
/// Columns whose grid is exhausted keep their original values (already
/// logged by the engine); everything else is replaced by the cleaned
/// series found at the first accepting threshold.
pub fn clean_stage(
    table: &MultiTable,
    config: &OutlierConfig,
    grid: &ThresholdGrid,
) -> Result<MultiTable, PipelineError> {
    let groups = table.group_names();
    let cleaned = clean_columns(table.columns(), &groups, config, grid)?;

    let mut out = table.clone();
    for (id, outcome) in cleaned {
        out.set_column(&id, outcome.values);
    }
    Ok(out)
}

/// Delta-corrects every indicator column of a projection table against
/// the historical baseline table.
///
/// The baseline is pre-split by region; every projection region must
/// have a baseline counterpart, and every projection indicator column
/// must exist in the baseline table.
pub fn delta_stage(
    projection: &MultiTable,
    baseline: &MultiTable,
    config: &DeltaConfig,
) -> Result<MultiTable, PipelineError> {
    let mut out = projection.clone();

    for id in projection.columns().keys() {
        let base_table = baseline
            .column_table(id)
            .ok_or_else(|| PipelineError::InvalidInput {
                reason: format!("baseline table has no '{id}' column"),
            })?;
        let base_by_region: BTreeMap<String, Vec<f64>> = base_table
            .by_region()
            .into_iter()
            .map(|(name, (_, values))| (name, values))
            .collect();

        let proj_table = projection
            .column_table(id)
            .expect("iterating projection's own columns");
        let proj_by_region = proj_table.by_region();

        let corrected = correct_indicator(id, &proj_by_region, &base_by_region, config)?;

        // Rebuild the aligned column from the per-region corrections.
        let mut position: BTreeMap<&str, usize> = BTreeMap::new();
        let mut column = vec![f64::NAN; projection.keys().len()];
        for (row, (name, year)) in projection.keys().iter().enumerate() {
            let Some((years, _)) = proj_by_region.get(name.as_str()) else {
                continue;
            };
            let cursor = position.entry(name.as_str()).or_insert(0);
            // Keys are (region, year)-sorted, matching the series order.
            if *cursor < years.len() && years[*cursor] == *year {
                column[row] = corrected[name][*cursor];
                *cursor += 1;
            }
        }
        out.set_column(id, column);
        info!(indicator = %id, "delta correction applied");
    }

    Ok(out)
}
