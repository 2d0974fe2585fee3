use anyhow::{Context, Result, bail};
use tracing::info;

use boreas_io::{read_combined_table, write_combined_table};
use boreas_pipeline::{MultiTable, delta_stage};

use crate::cli::CorrectArgs;
use crate::config::BoreasConfig;
use crate::convert;

/// Delta-correct a projection table against a baseline table.
pub fn run(args: CorrectArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config: {}", args.config.display()))?;
    let config: BoreasConfig = toml::from_str(&text)
        .with_context(|| format!("failed to parse config: {}", args.config.display()))?;

    let Some(ref delta_toml) = config.delta else {
        bail!("no [delta] section in config: nothing to correct with");
    };
    let delta_cfg = convert::build_delta_config(delta_toml)?;

    let (keys, columns) = read_combined_table(&args.input)
        .with_context(|| format!("failed to read projection table: {}", args.input.display()))?;
    let projection = MultiTable::from_parts(keys, columns);

    let (base_keys, base_columns) = read_combined_table(&args.baseline).with_context(|| {
        format!("failed to read baseline table: {}", args.baseline.display())
    })?;
    let baseline = MultiTable::from_parts(base_keys, base_columns);

    info!(
        n_rows = projection.keys().len(),
        n_columns = projection.columns().len(),
        "projection table loaded"
    );

    let corrected = delta_stage(&projection, &baseline, &delta_cfg)
        .context("delta correction failed")?;

    write_combined_table(&args.output, corrected.keys(), corrected.columns())
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(path = %args.output.display(), "corrected table written");
    Ok(())
}
