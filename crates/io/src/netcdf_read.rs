//! NetCDF extraction of daily gridded variables.

use std::path::Path;

use chrono::NaiveDate;
use ndarray::Array3;
use tracing::debug;

use boreas_calendar::CivilDate;
use boreas_grid::DailyGrid;

use crate::error::IoError;
use crate::paths::daily_grid_path;

/// Accepted aliases for the coordinate and time variables.
const LAT_ALIASES: [&str; 2] = ["lat", "latitude"];
const LON_ALIASES: [&str; 2] = ["lon", "longitude"];
const TIME_ALIASES: [&str; 2] = ["time", "valid_time"];

/// Opens a NetCDF file, returning [`IoError::FileNotFound`] if the path
/// does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Reads a 1-D `f64` variable, trying each alias in order.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var.get_values::<f64, _>(..)?);
        }
    }
    let name = aliases.first().copied().unwrap_or("unknown");
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Reads the CF `units` attribute of the time variable and returns the
/// offset unit (`days` or `hours`) together with the parsed base date.
pub(crate) fn read_time_units(
    file: &netcdf::File,
    time_var: &str,
) -> Result<(String, NaiveDate), IoError> {
    let var = file.variable(time_var).ok_or_else(|| IoError::InvalidTime {
        reason: format!("time variable '{time_var}' missing"),
    })?;

    let units_str: String = var
        .attribute_value("units")
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("time variable '{time_var}' has no 'units' attribute"),
        })?
        .map_err(|e| IoError::InvalidTime {
            reason: format!("failed to read 'units' attribute: {e}"),
        })?
        .try_into()
        .map_err(|e: netcdf::Error| IoError::InvalidTime {
            reason: format!("'units' attribute is not a string: {e}"),
        })?;

    // Expected: "days since YYYY-MM-DD" or "hours since YYYY-MM-DD HH:MM:SS".
    let parts: Vec<&str> = units_str.splitn(3, ' ').collect();
    if parts.len() < 3 || parts[1] != "since" {
        return Err(IoError::InvalidTime {
            reason: format!("unexpected time units format: '{units_str}'"),
        });
    }
    let unit = parts[0].to_lowercase();
    if unit != "days" && unit != "hours" {
        return Err(IoError::InvalidTime {
            reason: format!("unsupported time unit '{unit}' (expected days or hours)"),
        });
    }

    let date_str = if parts[2].len() >= 10 {
        &parts[2][..10]
    } else {
        parts[2]
    };
    let base_date =
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| IoError::InvalidTime {
            reason: format!("failed to parse base date '{date_str}': {e}"),
        })?;

    Ok((unit, base_date))
}

/// Converts time offsets from a base date into [`CivilDate`]s.
pub(crate) fn time_offsets_to_dates(
    base_date: NaiveDate,
    offsets: &[f64],
    unit: &str,
) -> Result<Vec<CivilDate>, IoError> {
    let divisor = if unit == "hours" { 24.0 } else { 1.0 };
    offsets
        .iter()
        .map(|&offset| {
            let days = (offset / divisor).floor() as i64;
            let greg = base_date
                .checked_add_signed(chrono::TimeDelta::days(days))
                .ok_or_else(|| IoError::InvalidTime {
                    reason: format!("date overflow adding {days} days to {base_date}"),
                })?;

            use chrono::Datelike;
            CivilDate::new(greg.year(), greg.month() as u8, greg.day() as u8)
                .map_err(IoError::from)
        })
        .collect()
}

/// Reads the 3-D (time × lat × lon) data variable into an [`Array3`].
pub(crate) fn read_3d_f64(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<(Array3<f64>, String), IoError> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| IoError::MissingVariable {
            name: var_name.to_string(),
            path: path.to_path_buf(),
        })?;

    let dims = var.dimensions();
    if dims.len() != 3 {
        return Err(IoError::DimensionMismatch {
            name: format!("{var_name} dimensions"),
            expected: 3,
            got: dims.len(),
        });
    }

    let nt = dims[0].len();
    let ny = dims[1].len();
    let nx = dims[2].len();

    let flat = var.get_values::<f64, _>(..)?;
    let data = Array3::from_shape_vec((nt, ny, nx), flat).map_err(|e| IoError::Netcdf {
        reason: e.to_string(),
    })?;

    let units: String = var
        .attribute_value("units")
        .and_then(|res| res.ok())
        .and_then(|av| String::try_from(av).ok())
        .unwrap_or_default();

    Ok((data, units))
}

/// Reads one (variable, source, year) daily grid from the data directory.
///
/// The file is located by the fixed naming convention
/// `{variable}_{source}_daily_{year}.nc`. A missing file is a hard
/// failure: the caller must not silently skip a year.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] for a missing file and format errors
/// for anything unreadable inside it.
pub fn read_daily_grid(
    dir: &Path,
    variable: &str,
    source: &str,
    year: i32,
) -> Result<DailyGrid, IoError> {
    let path = daily_grid_path(dir, variable, source, year);
    let file = open_file(&path)?;

    let lat = read_1d_f64(&file, &LAT_ALIASES, &path)?;
    let lon = read_1d_f64(&file, &LON_ALIASES, &path)?;

    let time_name = TIME_ALIASES
        .iter()
        .find(|&&alias| file.variable(alias).is_some())
        .copied()
        .ok_or_else(|| IoError::MissingVariable {
            name: "time".to_string(),
            path: path.clone(),
        })?;
    let offsets = read_1d_f64(&file, &[time_name], &path)?;
    let (unit, base_date) = read_time_units(&file, time_name)?;
    let dates = time_offsets_to_dates(base_date, &offsets, &unit)?;

    let (data, units) = read_3d_f64(&file, variable, &path)?;

    debug!(
        path = %path.display(),
        n_days = dates.len(),
        n_lat = lat.len(),
        n_lon = lon.len(),
        "read daily grid"
    );

    DailyGrid::new(variable, units, lat, lon, dates, data).map_err(IoError::from)
}
