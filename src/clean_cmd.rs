use anyhow::{Context, Result};
use tracing::info;

use boreas_io::{read_combined_table, write_combined_table};
use boreas_pipeline::{MultiTable, clean_stage};

use crate::cli::CleanArgs;
use crate::config::BoreasConfig;
use crate::convert;

/// Clean outliers in an existing combined table.
pub fn run(args: CleanArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config: {}", args.config.display()))?;
    let config: BoreasConfig = toml::from_str(&text)
        .with_context(|| format!("failed to parse config: {}", args.config.display()))?;

    let outlier_cfg = convert::build_outlier_config(&config.outlier)?;
    let threshold_grid = convert::build_threshold_grid(&config.outlier);

    let (keys, columns) = read_combined_table(&args.input)
        .with_context(|| format!("failed to read input table: {}", args.input.display()))?;
    let table = MultiTable::from_parts(keys, columns);
    info!(
        n_rows = table.keys().len(),
        n_columns = table.columns().len(),
        "combined table loaded"
    );

    let cleaned = clean_stage(&table, &outlier_cfg, &threshold_grid)
        .context("outlier cleaning failed")?;

    write_combined_table(&args.output, cleaned.keys(), cleaned.columns())
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(path = %args.output.display(), "cleaned table written");
    Ok(())
}
