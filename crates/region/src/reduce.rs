//! Spatial reduction of annual fields to per-region scalars.

use tracing::warn;

use boreas_grid::AnnualField;

use crate::load::RegionSet;

/// How a region's masked cells collapse to one scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceMethod {
    /// Arithmetic mean over valid cells.
    Mean,
    /// Maximum over valid cells.
    Max,
}

/// One reduced value for one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionValue {
    /// Region name.
    pub name: String,
    /// Reduced scalar.
    pub value: f64,
}

/// Reduces a gridded annual field to one scalar per region.
///
/// For each region, cells whose (lon, lat) centers fall inside the
/// polygon are collected, NaN cells are skipped, and the survivors are
/// reduced with `method`. A region with zero valid cells yields no row;
/// this is logged but not fatal (a small region can fall between grid
/// points of a coarse field).
pub fn reduce_by_region(
    field: &AnnualField,
    regions: &RegionSet,
    method: ReduceMethod,
) -> Vec<RegionValue> {
    let lat = field.lat();
    let lon = field.lon();
    let data = field.data();

    let mut out = Vec::with_capacity(regions.len());
    for region in regions.regions() {
        let mut cells = Vec::new();
        for (i, &cell_lat) in lat.iter().enumerate() {
            for (j, &cell_lon) in lon.iter().enumerate() {
                if !region.contains(cell_lon, cell_lat) {
                    continue;
                }
                let v = data[[i, j]];
                if v.is_nan() {
                    continue;
                }
                cells.push(v);
            }
        }

        if cells.is_empty() {
            warn!(
                region = region.name(),
                variable = field.variable(),
                year = field.year(),
                "no valid cells in region; skipping"
            );
            continue;
        }

        let value = match method {
            ReduceMethod::Mean => cells.iter().sum::<f64>() / cells.len() as f64,
            ReduceMethod::Max => cells.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        };

        out.push(RegionValue {
            name: region.name().to_string(),
            value,
        });
    }
    out
}
