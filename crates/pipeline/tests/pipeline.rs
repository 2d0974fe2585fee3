//! End-to-end driver tests over an in-memory grid source.

use std::collections::BTreeMap;

use ndarray::Array3;

use boreas_calendar::{CivilDate, DateWindow, date_sequence, days_in_year};
use boreas_grid::{DailyGrid, GridError, GridSource};
use boreas_indicators::EvalContext;
use boreas_outlier::{FillMethod, OutlierConfig, OutlierMethod, ThresholdGrid};
use boreas_pipeline::{PipelineConfig, clean_stage, merge_tables, run_indicators};
use boreas_region::{Region, RegionSet};

/// Two-cell grid: row 0 is the "north" cell, row 1 the "south" cell.
/// Each year carries one dry spell; its length encodes (year, row) so the
/// expected CDD is known exactly.
struct SyntheticPrecip {
    years: Vec<i32>,
}

fn dry_spell_len(year: i32, row: usize) -> usize {
    5 * (year - 1999) as usize + 2 * row
}

impl GridSource for SyntheticPrecip {
    fn load(&self, variable: &str, year: i32) -> Result<DailyGrid, GridError> {
        if variable != "pr" || !self.years.contains(&year) {
            return Err(GridError::DataUnavailable {
                variable: variable.to_string(),
                year,
            });
        }
        let n = days_in_year(year) as usize;
        let dates = date_sequence(CivilDate::new(year, 1, 1).unwrap(), n);
        let data = Array3::from_shape_fn((n, 2, 1), |(t, row, _)| {
            // One dry spell starting on day 10.
            if t >= 10 && t < 10 + dry_spell_len(year, row) {
                0.0
            } else {
                5.0
            }
        });
        DailyGrid::new("pr", "mm", vec![44.5, 43.5], vec![80.5], dates, data)
            .map_err(|e| GridError::Source {
                reason: e.to_string(),
            })
    }
}

fn two_regions() -> RegionSet {
    let north = Region::new(
        "north",
        vec![vec![(80.0, 44.0), (81.0, 44.0), (81.0, 45.0), (80.0, 45.0)]],
    )
    .unwrap();
    let south = Region::new(
        "south",
        vec![vec![(80.0, 43.0), (81.0, 43.0), (81.0, 44.0), (80.0, 44.0)]],
    )
    .unwrap();
    RegionSet::new(vec![north, south])
}

fn config(intermediate: &std::path::Path, output: &std::path::Path) -> PipelineConfig {
    PipelineConfig::new(
        vec!["cdd".to_string()],
        2000,
        2002,
        intermediate,
        output,
    )
}

#[test]
fn three_years_two_regions_six_rows() {
    let inter = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let source = SyntheticPrecip {
        years: vec![2000, 2001, 2002],
    };

    let results = run_indicators(
        &source,
        &two_regions(),
        &EvalContext::new(),
        &config(inter.path(), out.path()),
    )
    .unwrap();

    assert_eq!(results.len(), 1);
    let (id, table) = &results[0];
    assert_eq!(id, "cdd");
    assert_eq!(table.len(), 6, "2 regions x 3 years");

    // Every (region, year) combination present with the designed value.
    let by_key: BTreeMap<(String, i32), f64> = table
        .rows()
        .iter()
        .map(|r| ((r.name.clone(), r.year), r.value))
        .collect();
    for year in 2000..=2002 {
        assert_eq!(
            by_key[&("north".to_string(), year)],
            dry_spell_len(year, 0) as f64
        );
        assert_eq!(
            by_key[&("south".to_string(), year)],
            dry_spell_len(year, 1) as f64
        );
    }
}

#[test]
fn outlier_none_returns_identical_rows() {
    let inter = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let source = SyntheticPrecip {
        years: vec![2000, 2001, 2002],
    };

    let results = run_indicators(
        &source,
        &two_regions(),
        &EvalContext::new(),
        &config(inter.path(), out.path()),
    )
    .unwrap();

    let merged = merge_tables(&results, 2000);
    let outlier_config = OutlierConfig::new()
        .with_method(OutlierMethod::None)
        .with_fill(FillMethod::Median);
    let cleaned = clean_stage(&merged, &outlier_config, &ThresholdGrid::default()).unwrap();

    assert_eq!(cleaned.keys(), merged.keys());
    assert_eq!(cleaned.columns()["cdd"], merged.columns()["cdd"]);
}

#[test]
fn per_year_intermediates_enable_resume() {
    let inter = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let source = SyntheticPrecip {
        years: vec![2000, 2001, 2002],
    };
    let cfg = config(inter.path(), out.path());
    let regions = two_regions();

    let first = run_indicators(&source, &regions, &EvalContext::new(), &cfg).unwrap();

    // Remove the final table but keep intermediates; tamper one year's
    // intermediate to prove it is read back instead of recomputed.
    std::fs::remove_file(out.path().join("cdd.csv")).unwrap();
    let year_file = inter.path().join("cdd_2001.csv");
    std::fs::write(&year_file, "name,year,value\nnorth,2001,999.00\nsouth,2001,999.00\n").unwrap();

    let second = run_indicators(&source, &regions, &EvalContext::new(), &cfg).unwrap();
    let rows = second[0].1.rows();
    let tampered: Vec<f64> = rows
        .iter()
        .filter(|r| r.year == 2001)
        .map(|r| r.value)
        .collect();
    assert_eq!(tampered, vec![999.0, 999.0]);

    // Untampered years match the first run.
    let first_2000: Vec<f64> = first[0]
        .1
        .rows()
        .iter()
        .filter(|r| r.year == 2000)
        .map(|r| r.value)
        .collect();
    let second_2000: Vec<f64> = rows
        .iter()
        .filter(|r| r.year == 2000)
        .map(|r| r.value)
        .collect();
    assert_eq!(first_2000, second_2000);
}

#[test]
fn final_table_cache_short_circuits() {
    let inter = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let cfg = config(inter.path(), out.path());
    let regions = two_regions();

    // Pre-seed the final table; the source would fail if consulted.
    std::fs::write(
        out.path().join("cdd.csv"),
        "name,year,value\nnorth,2000,7.00\n",
    )
    .unwrap();
    let source = SyntheticPrecip { years: vec![] };

    let results = run_indicators(&source, &regions, &EvalContext::new(), &cfg).unwrap();
    assert_eq!(results[0].1.len(), 1);
    assert_eq!(results[0].1.rows()[0].value, 7.0);
}

#[test]
fn failed_indicator_does_not_abort_others() {
    let inter = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let source = SyntheticPrecip {
        years: vec![2000, 2001, 2002],
    };

    // r95p fails (no baseline in the context); cdd still completes.
    let cfg = PipelineConfig::new(
        vec!["r95p".to_string(), "cdd".to_string()],
        2000,
        2002,
        inter.path(),
        out.path(),
    );
    let results = run_indicators(&source, &two_regions(), &EvalContext::new(), &cfg).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].0, "cdd");
}

#[test]
fn missing_source_year_aborts_run() {
    let inter = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    // 2001 is missing from the source.
    let source = SyntheticPrecip {
        years: vec![2000, 2002],
    };

    let err = run_indicators(
        &source,
        &two_regions(),
        &EvalContext::new(),
        &config(inter.path(), out.path()),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        boreas_pipeline::PipelineError::Grid(GridError::DataUnavailable { year: 2001, .. })
    ));
}

#[test]
fn crossing_window_skips_first_year() {
    let inter = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let source = SyntheticPrecip {
        years: vec![2000, 2001, 2002],
    };

    let window = DateWindow::new(
        "10-01".parse().unwrap(),
        "06-30".parse().unwrap(),
    );
    let cfg = config(inter.path(), out.path()).with_window(window);
    let results = run_indicators(&source, &two_regions(), &EvalContext::new(), &cfg).unwrap();

    let years: Vec<i32> = results[0].1.rows().iter().map(|r| r.year).collect();
    // 2000 would need data from 1999; the driver starts at 2001.
    assert!(years.iter().all(|&y| y >= 2001));
    assert_eq!(results[0].1.len(), 4, "2 regions x 2 years");
}
