//! Parquet cache of per-(variable, source, year) daily grids.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, AsArray, Float64Array, Int32Array, RecordBatch, UInt16Array};
use arrow::datatypes::{DataType, Field, Float64Type, Int32Type, Schema, UInt16Type};
use ndarray::Array3;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use tracing::debug;

use boreas_calendar::{CivilDate, dates_of_year};
use boreas_grid::DailyGrid;

use crate::error::IoError;

/// Column order of the cached grid layout.
const COLUMNS: [&str; 5] = ["year", "doy", "lat", "lon", "value"];

/// Builds the self-describing cache schema.
///
/// Variable name and units travel in the schema metadata so a cached file
/// can be re-opened without consulting the source NetCDF.
fn build_schema(variable: &str, units: &str) -> Schema {
    let fields = vec![
        Field::new("year", DataType::Int32, false),
        Field::new("doy", DataType::UInt16, false),
        Field::new("lat", DataType::Float64, false),
        Field::new("lon", DataType::Float64, false),
        Field::new("value", DataType::Float64, false),
    ];
    let mut metadata = HashMap::new();
    metadata.insert("variable".to_string(), variable.to_string());
    metadata.insert("units".to_string(), units.to_string());
    Schema::new_with_metadata(fields, metadata)
}

/// Writes a daily grid to the Parquet cache at `path`.
///
/// Rows are emitted in (time, lat, lon) order with snappy compression.
///
/// # Errors
///
/// Returns [`IoError::Parquet`] on any file or encoding failure.
pub fn write_grid_cache(path: &Path, grid: &DailyGrid) -> Result<(), IoError> {
    let n_days = grid.n_days();
    let n_lat = grid.lat().len();
    let n_lon = grid.lon().len();
    let n_rows = n_days * n_lat * n_lon;

    let mut years = Vec::with_capacity(n_rows);
    let mut doys = Vec::with_capacity(n_rows);
    let mut lats = Vec::with_capacity(n_rows);
    let mut lons = Vec::with_capacity(n_rows);
    let mut values = Vec::with_capacity(n_rows);

    let data = grid.data();
    for (t, date) in grid.dates().iter().enumerate() {
        for (i, &lat) in grid.lat().iter().enumerate() {
            for (j, &lon) in grid.lon().iter().enumerate() {
                years.push(date.year());
                doys.push(date.day_of_year());
                lats.push(lat);
                lons.push(lon);
                values.push(data[[t, i, j]]);
            }
        }
    }

    let schema = build_schema(grid.variable(), grid.units());
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int32Array::from(years)),
        Arc::new(UInt16Array::from(doys)),
        Arc::new(Float64Array::from(lats)),
        Arc::new(Float64Array::from(lons)),
        Arc::new(Float64Array::from(values)),
    ];
    let batch =
        RecordBatch::try_new(Arc::new(schema.clone()), columns).map_err(|e| IoError::Parquet {
            reason: e.to_string(),
        })?;

    let file = std::fs::File::create(path).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, Arc::new(schema), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    debug!(path = %path.display(), n_rows, "wrote grid cache");
    Ok(())
}

/// Reads a daily grid back from the Parquet cache at `path`.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] for a missing file and
/// [`IoError::Parquet`] for schema or decoding problems.
pub fn read_grid_cache(path: &Path) -> Result<DailyGrid, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = std::fs::File::open(path).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;
    let batches: Vec<RecordBatch> = reader
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| IoError::Parquet {
            reason: e.to_string(),
        })?;

    for (i, expected) in COLUMNS.iter().enumerate() {
        let actual = schema.field(i).name();
        if actual != expected {
            return Err(IoError::Parquet {
                reason: format!("cache column {i}: expected '{expected}', got '{actual}'"),
            });
        }
    }
    let variable = schema
        .metadata()
        .get("variable")
        .cloned()
        .unwrap_or_default();
    let units = schema.metadata().get("units").cloned().unwrap_or_default();

    // First pass: reconstruct the axes in order of first appearance.
    let mut dates: Vec<CivilDate> = Vec::new();
    let mut lat: Vec<f64> = Vec::new();
    let mut lon: Vec<f64> = Vec::new();
    let mut doy_lookup: HashMap<i32, Vec<CivilDate>> = HashMap::new();

    for batch in &batches {
        let year_col = batch.column(0).as_primitive::<Int32Type>();
        let doy_col = batch.column(1).as_primitive::<UInt16Type>();
        let lat_col = batch.column(2).as_primitive::<Float64Type>();
        let lon_col = batch.column(3).as_primitive::<Float64Type>();

        for row in 0..batch.num_rows() {
            let year = year_col.value(row);
            let doy = doy_col.value(row);
            let calendar = doy_lookup
                .entry(year)
                .or_insert_with(|| dates_of_year(year));
            let date = *calendar
                .get((doy - 1) as usize)
                .ok_or_else(|| IoError::Parquet {
                    reason: format!("doy {doy} out of range for year {year}"),
                })?;
            if dates.last() != Some(&date) && !dates.contains(&date) {
                dates.push(date);
            }
            let la = lat_col.value(row);
            if !lat.contains(&la) {
                lat.push(la);
            }
            let lo = lon_col.value(row);
            if !lon.contains(&lo) {
                lon.push(lo);
            }
        }
    }

    let n_days = dates.len();
    let n_lat = lat.len();
    let n_lon = lon.len();
    let expected_rows = n_days * n_lat * n_lon;
    let total_rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    if total_rows != expected_rows {
        return Err(IoError::DimensionMismatch {
            name: "cache rows".to_string(),
            expected: expected_rows,
            got: total_rows,
        });
    }

    // Second pass: fill the cube assuming (time, lat, lon) row order.
    let mut data = Array3::zeros((n_days, n_lat, n_lon));
    let mut row_index = 0usize;
    for batch in &batches {
        let value_col = batch.column(4).as_primitive::<Float64Type>();
        for row in 0..batch.num_rows() {
            let t = row_index / (n_lat * n_lon);
            let rest = row_index % (n_lat * n_lon);
            let i = rest / n_lon;
            let j = rest % n_lon;
            data[[t, i, j]] = value_col.value(row);
            row_index += 1;
        }
    }

    DailyGrid::new(variable, units, lat, lon, dates, data).map_err(IoError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boreas_calendar::date_sequence;

    fn sample_grid() -> DailyGrid {
        let dates = date_sequence(CivilDate::new(1999, 12, 30).unwrap(), 5);
        let data = Array3::from_shape_fn((5, 2, 3), |(t, i, j)| {
            t as f64 * 100.0 + i as f64 * 10.0 + j as f64
        });
        DailyGrid::new(
            "pr",
            "mm",
            vec![44.0, 43.0],
            vec![80.0, 81.0, 82.0],
            dates,
            data,
        )
        .unwrap()
    }

    #[test]
    fn roundtrip_preserves_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pr_era5_1999.parquet");
        let grid = sample_grid();

        write_grid_cache(&path, &grid).unwrap();
        let back = read_grid_cache(&path).unwrap();

        assert_eq!(back.variable(), "pr");
        assert_eq!(back.units(), "mm");
        assert_eq!(back.dates(), grid.dates());
        assert_eq!(back.lat(), grid.lat());
        assert_eq!(back.lon(), grid.lon());
        assert_eq!(back.data(), grid.data());
    }

    #[test]
    fn roundtrip_preserves_nan() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pr_era5_2000.parquet");
        let dates = date_sequence(CivilDate::new(2000, 1, 1).unwrap(), 2);
        let mut data = Array3::zeros((2, 1, 1));
        data[[1, 0, 0]] = f64::NAN;
        let grid = DailyGrid::new("pr", "mm", vec![43.0], vec![80.0], dates, data).unwrap();

        write_grid_cache(&path, &grid).unwrap();
        let back = read_grid_cache(&path).unwrap();
        assert_eq!(back.data()[[0, 0, 0]], 0.0);
        assert!(back.data()[[1, 0, 0]].is_nan());
    }

    #[test]
    fn missing_cache_is_file_not_found() {
        let err = read_grid_cache(Path::new("/nonexistent/x.parquet")).unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }
}
