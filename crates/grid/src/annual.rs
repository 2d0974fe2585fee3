//! Annual scalar fields produced by indicator evaluation.

use ndarray::Array2;

use crate::error::GridError;

/// A single annual scalar field on a (lat × lon) grid.
///
/// One `AnnualField` is the result of evaluating an indicator over one
/// year's daily slice.
#[derive(Debug, Clone)]
pub struct AnnualField {
    variable: String,
    year: i32,
    lat: Vec<f64>,
    lon: Vec<f64>,
    data: Array2<f64>,
}

impl AnnualField {
    /// Creates a new `AnnualField`, validating coordinate lengths.
    pub fn new(
        variable: impl Into<String>,
        year: i32,
        lat: Vec<f64>,
        lon: Vec<f64>,
        data: Array2<f64>,
    ) -> Result<Self, GridError> {
        let shape = data.shape();
        if lat.len() != shape[0] || lon.len() != shape[1] {
            return Err(GridError::CoordinateMismatch {
                reason: format!(
                    "coordinate lengths ({}, {}) do not match field shape ({}, {})",
                    lat.len(),
                    lon.len(),
                    shape[0],
                    shape[1]
                ),
            });
        }
        Ok(Self {
            variable: variable.into(),
            year,
            lat,
            lon,
            data,
        })
    }

    /// Returns the indicator/variable name.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Returns the year this field belongs to.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the latitude coordinates.
    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    /// Returns the longitude coordinates.
    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    /// Returns the underlying (lat × lon) array.
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_valid() {
        let field = AnnualField::new(
            "cdd",
            2000,
            vec![43.0, 44.0],
            vec![80.0, 81.0, 82.0],
            Array2::zeros((2, 3)),
        )
        .unwrap();
        assert_eq!(field.variable(), "cdd");
        assert_eq!(field.year(), 2000);
        assert_eq!(field.data().shape(), &[2, 3]);
    }

    #[test]
    fn new_rejects_coord_mismatch() {
        let err = AnnualField::new("cdd", 2000, vec![43.0], vec![80.0], Array2::zeros((2, 3)))
            .unwrap_err();
        assert!(matches!(err, GridError::CoordinateMismatch { .. }));
    }
}
