//! Region polygons and point containment.

use crate::error::RegionError;

/// A named administrative region bounded by one or more polygon rings.
///
/// Rings are closed automatically (the last vertex need not repeat the
/// first). Holes and disjoint parts are handled uniformly by the even-odd
/// rule. Coordinates are (longitude, latitude) degrees.
#[derive(Debug, Clone)]
pub struct Region {
    name: String,
    rings: Vec<Vec<(f64, f64)>>,
}

impl Region {
    /// Creates a region from its name and polygon rings.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::DegenerateRing`] when any ring has fewer
    /// than three vertices.
    pub fn new(name: impl Into<String>, rings: Vec<Vec<(f64, f64)>>) -> Result<Self, RegionError> {
        let name = name.into();
        for ring in &rings {
            if ring.len() < 3 {
                return Err(RegionError::DegenerateRing {
                    name: name.clone(),
                    n_vertices: ring.len(),
                });
            }
        }
        Ok(Self { name, rings })
    }

    /// Returns the region name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the polygon rings.
    pub fn rings(&self) -> &[Vec<(f64, f64)>] {
        &self.rings
    }

    /// Even-odd ray cast: true when (lon, lat) lies inside the region.
    ///
    /// A horizontal ray toward +lon is counted against every ring edge;
    /// an odd number of crossings means inside. Points exactly on an edge
    /// land on either side depending on rounding, which is acceptable for
    /// grid-cell-center tests.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        let mut inside = false;
        for ring in &self.rings {
            let n = ring.len();
            let mut j = n - 1;
            for i in 0..n {
                let (xi, yi) = ring[i];
                let (xj, yj) = ring[j];
                if (yi > lat) != (yj > lat) {
                    let x_cross = (xj - xi) * (lat - yi) / (yj - yi) + xi;
                    if lon < x_cross {
                        inside = !inside;
                    }
                }
                j = i;
            }
        }
        inside
    }
}
