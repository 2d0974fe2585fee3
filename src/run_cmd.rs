use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use boreas_io::{CachedGridSource, read_combined_table, write_combined_table};
use boreas_pipeline::{
    MultiTable, build_context, clean_stage, delta_stage, merge_tables, run_indicators,
};
use boreas_region::RegionSet;

use crate::cli::RunArgs;
use crate::config::BoreasConfig;
use crate::convert;

/// Run the full indicator pipeline.
pub fn run(args: RunArgs) -> Result<()> {
    // Step 1: Load configuration
    let text = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config: {}", args.config.display()))?;
    let mut config: BoreasConfig = toml::from_str(&text)
        .with_context(|| format!("failed to parse config: {}", args.config.display()))?;
    if let Some(output) = args.output {
        config.io.output_dir = output;
    }
    if args.no_cache {
        config.io.use_cache = false;
    }

    std::fs::create_dir_all(&config.io.intermediate_dir).with_context(|| {
        format!(
            "failed to create intermediate dir: {}",
            config.io.intermediate_dir.display()
        )
    })?;
    std::fs::create_dir_all(&config.io.output_dir).with_context(|| {
        format!(
            "failed to create output dir: {}",
            config.io.output_dir.display()
        )
    })?;

    // Step 2: Build configs from TOML
    let pipeline_cfg = convert::build_pipeline_config(&config)?;
    let outlier_cfg = convert::build_outlier_config(&config.outlier)?;
    let threshold_grid = convert::build_threshold_grid(&config.outlier);

    // Step 3: Load region geometries (once; read-only for the run)
    let regions = RegionSet::from_geojson_file(&config.io.regions)
        .with_context(|| format!("failed to load regions: {}", config.io.regions.display()))?;
    info!(n_regions = regions.len(), "regions loaded");

    // Step 4: Build grid sources
    let mut source = CachedGridSource::new(&config.io.data_dir, &config.io.source);
    let mut baseline_source =
        CachedGridSource::new(&config.io.data_dir, &config.io.baseline_source);
    if config.io.use_cache {
        if let Some(ref cache_dir) = config.io.cache_dir {
            std::fs::create_dir_all(cache_dir).with_context(|| {
                format!("failed to create cache dir: {}", cache_dir.display())
            })?;
            source = source.with_cache_dir(cache_dir);
            baseline_source = baseline_source.with_cache_dir(cache_dir);
        }
    }

    // Step 5: Fit percentile baselines for the indicators that need them
    let ctx = build_context(
        &baseline_source,
        config.baseline.start,
        config.baseline.end,
        pipeline_cfg.indicators(),
    )
    .context("failed to build percentile baselines")?;

    // Step 6: Compute all indicators
    info!(
        n_indicators = pipeline_cfg.indicators().len(),
        source = %config.io.source,
        "running indicators"
    );
    let tables = run_indicators(&source, &regions, &ctx, &pipeline_cfg)
        .context("indicator computation failed")?;
    info!(n_computed = tables.len(), "indicators complete");

    // Step 7: Merge across indicators with the year cutoff
    let combined = merge_tables(&tables, pipeline_cfg.min_year());
    let combined_path = config.io.output_dir.join("combined.csv");
    write_combined_table(&combined_path, combined.keys(), combined.columns())
        .with_context(|| format!("failed to write {}", combined_path.display()))?;
    info!(path = %combined_path.display(), "combined table written");

    // Step 8: Outlier cleaning
    let cleaned = clean_stage(&combined, &outlier_cfg, &threshold_grid)
        .context("outlier cleaning failed")?;
    let cleaned_path = config.io.output_dir.join("combined_cleaned.csv");
    write_combined_table(&cleaned_path, cleaned.keys(), cleaned.columns())
        .with_context(|| format!("failed to write {}", cleaned_path.display()))?;
    info!(path = %cleaned_path.display(), "cleaned table written");

    // Step 9: Delta correction for projection runs
    if let Some(ref delta_toml) = config.delta {
        let baseline_path = delta_toml
            .baseline_table
            .as_deref()
            .context("delta correction requires [delta].baseline_table")?;
        let corrected = correct_against_baseline(&cleaned, baseline_path, delta_toml)?;
        let corrected_path = config.io.output_dir.join("combined_corrected.csv");
        write_combined_table(&corrected_path, corrected.keys(), corrected.columns())
            .with_context(|| format!("failed to write {}", corrected_path.display()))?;
        info!(path = %corrected_path.display(), "corrected table written");
    }

    Ok(())
}

/// Delta-correct a cleaned projection table against the historical
/// baseline table on disk.
fn correct_against_baseline(
    cleaned: &MultiTable,
    baseline_path: &Path,
    delta_toml: &crate::config::DeltaToml,
) -> Result<MultiTable> {
    let delta_cfg = convert::build_delta_config(delta_toml)?;
    let (keys, columns) = read_combined_table(baseline_path)
        .with_context(|| format!("failed to read baseline table: {}", baseline_path.display()))?;
    let baseline = MultiTable::from_parts(keys, columns);

    delta_stage(cleaned, &baseline, &delta_cfg).context("delta correction failed")
}
