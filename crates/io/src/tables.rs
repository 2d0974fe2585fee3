//! CSV region tables: long-form, pivoted, and combined layouts.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use tracing::debug;

use crate::error::IoError;

/// One (region, year, value) row of a long-form table.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRow {
    /// Region name.
    pub name: String,
    /// Year of the value.
    pub year: i32,
    /// The value; NaN writes as an empty field.
    pub value: f64,
}

/// Formats a value for CSV output: two decimals, NaN as empty.
fn fmt_value(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else {
        format!("{v:.2}")
    }
}

/// Parses a CSV value field: empty becomes NaN.
fn parse_value(field: &str, path: &Path, line: usize) -> Result<f64, IoError> {
    if field.is_empty() {
        return Ok(f64::NAN);
    }
    field.parse().map_err(|_| IoError::Csv {
        path: path.to_path_buf(),
        line,
        reason: format!("invalid value field {field:?}"),
    })
}

/// Writes a long-form `name,year,value` table.
pub fn write_region_table(path: &Path, rows: &[RegionRow]) -> Result<(), IoError> {
    let mut text = String::from("name,year,value\n");
    for row in rows {
        let _ = writeln!(text, "{},{},{}", row.name, row.year, fmt_value(row.value));
    }
    std::fs::write(path, text).map_err(|e| IoError::Csv {
        path: path.to_path_buf(),
        line: 0,
        reason: e.to_string(),
    })?;
    debug!(path = %path.display(), n_rows = rows.len(), "wrote region table");
    Ok(())
}

/// Reads a long-form `name,year,value` table.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] for a missing file and
/// [`IoError::Csv`] for malformed rows.
pub fn read_region_table(path: &Path) -> Result<Vec<RegionRow>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| IoError::Csv {
        path: path.to_path_buf(),
        line: 0,
        reason: e.to_string(),
    })?;

    let mut rows = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if i == 0 || line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 3 {
            return Err(IoError::Csv {
                path: path.to_path_buf(),
                line: i + 1,
                reason: format!("expected 3 fields, got {}", fields.len()),
            });
        }
        let year: i32 = fields[1].parse().map_err(|_| IoError::Csv {
            path: path.to_path_buf(),
            line: i + 1,
            reason: format!("invalid year field {:?}", fields[1]),
        })?;
        rows.push(RegionRow {
            name: fields[0].to_string(),
            year,
            value: parse_value(fields[2], path, i + 1)?,
        });
    }
    Ok(rows)
}

/// Writes a pivoted (region × year) report table.
///
/// Rows follow `region_order`; columns are the sorted years present in
/// `rows`. Missing (region, year) combinations write as empty fields.
pub fn write_pivot_table(
    path: &Path,
    region_order: &[String],
    rows: &[RegionRow],
) -> Result<(), IoError> {
    let mut years: Vec<i32> = rows.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();

    let mut lookup: BTreeMap<(&str, i32), f64> = BTreeMap::new();
    for row in rows {
        lookup.insert((row.name.as_str(), row.year), row.value);
    }

    let mut text = String::from("name");
    for year in &years {
        let _ = write!(text, ",{year}");
    }
    text.push('\n');

    for region in region_order {
        let _ = write!(text, "{region}");
        for year in &years {
            match lookup.get(&(region.as_str(), *year)) {
                Some(&v) => {
                    let _ = write!(text, ",{}", fmt_value(v));
                }
                None => text.push(','),
            }
        }
        text.push('\n');
    }

    std::fs::write(path, text).map_err(|e| IoError::Csv {
        path: path.to_path_buf(),
        line: 0,
        reason: e.to_string(),
    })
}

/// Writes a combined multi-indicator table keyed by (region, year).
///
/// `keys` supplies the row order; `columns` maps indicator ids to values
/// aligned with `keys`.
pub fn write_combined_table(
    path: &Path,
    keys: &[(String, i32)],
    columns: &BTreeMap<String, Vec<f64>>,
) -> Result<(), IoError> {
    let mut text = String::from("name,year");
    for name in columns.keys() {
        let _ = write!(text, ",{name}");
    }
    text.push('\n');

    for (row, (region, year)) in keys.iter().enumerate() {
        let _ = write!(text, "{region},{year}");
        for values in columns.values() {
            let _ = write!(text, ",{}", fmt_value(values[row]));
        }
        text.push('\n');
    }

    std::fs::write(path, text).map_err(|e| IoError::Csv {
        path: path.to_path_buf(),
        line: 0,
        reason: e.to_string(),
    })?;
    debug!(
        path = %path.display(),
        n_rows = keys.len(),
        n_columns = columns.len(),
        "wrote combined table"
    );
    Ok(())
}

/// Reads a combined multi-indicator table back into keys and columns.
#[allow(clippy::type_complexity)]
pub fn read_combined_table(
    path: &Path,
) -> Result<(Vec<(String, i32)>, BTreeMap<String, Vec<f64>>), IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| IoError::Csv {
        path: path.to_path_buf(),
        line: 0,
        reason: e.to_string(),
    })?;

    let mut lines = text.lines().enumerate();
    let (_, header) = lines.next().ok_or_else(|| IoError::Csv {
        path: path.to_path_buf(),
        line: 1,
        reason: "missing header".to_string(),
    })?;
    let header_fields: Vec<&str> = header.split(',').collect();
    if header_fields.len() < 3 || header_fields[0] != "name" || header_fields[1] != "year" {
        return Err(IoError::Csv {
            path: path.to_path_buf(),
            line: 1,
            reason: format!("unexpected header {header:?}"),
        });
    }
    let column_names: Vec<String> = header_fields[2..].iter().map(|s| s.to_string()).collect();

    let mut keys = Vec::new();
    let mut columns: BTreeMap<String, Vec<f64>> = column_names
        .iter()
        .map(|name| (name.clone(), Vec::new()))
        .collect();

    for (i, line) in lines {
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != column_names.len() + 2 {
            return Err(IoError::Csv {
                path: path.to_path_buf(),
                line: i + 1,
                reason: format!(
                    "expected {} fields, got {}",
                    column_names.len() + 2,
                    fields.len()
                ),
            });
        }
        let year: i32 = fields[1].parse().map_err(|_| IoError::Csv {
            path: path.to_path_buf(),
            line: i + 1,
            reason: format!("invalid year field {:?}", fields[1]),
        })?;
        keys.push((fields[0].to_string(), year));
        for (name, field) in column_names.iter().zip(&fields[2..]) {
            let value = parse_value(field, path, i + 1)?;
            columns
                .get_mut(name)
                .expect("column vectors were created from the header")
                .push(value);
        }
    }

    Ok((keys, columns))
}
