//! GeoJSON loading for region sets.

use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::error::RegionError;
use crate::geometry::Region;

/// The fixed, ordered set of administrative regions for one run.
///
/// Loaded once at startup from a GeoJSON FeatureCollection and immutable
/// for the rest of the process. File order defines report ordering.
#[derive(Debug, Clone)]
pub struct RegionSet {
    regions: Vec<Region>,
}

impl RegionSet {
    /// Builds a region set from already-constructed regions.
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// Loads a region set from a GeoJSON FeatureCollection file.
    ///
    /// Each feature must carry a `name` property and a `Polygon` or
    /// `MultiPolygon` geometry.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError`] on read, parse, or feature-shape failures,
    /// and [`RegionError::EmptyCollection`] when no features are present.
    pub fn from_geojson_file(path: &Path) -> Result<Self, RegionError> {
        let text = std::fs::read_to_string(path).map_err(|e| RegionError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let root: Value = serde_json::from_str(&text).map_err(|e| RegionError::Json {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let features = root
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| RegionError::Json {
                path: path.to_path_buf(),
                reason: "missing 'features' array".to_string(),
            })?;

        let mut regions = Vec::with_capacity(features.len());
        for (index, feature) in features.iter().enumerate() {
            regions.push(parse_feature(feature, index, path)?);
        }

        if regions.is_empty() {
            return Err(RegionError::EmptyCollection {
                path: path.to_path_buf(),
            });
        }

        info!(
            path = %path.display(),
            n_regions = regions.len(),
            "loaded region geometries"
        );
        Ok(Self::new(regions))
    }

    /// Returns the regions in file order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Returns the number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true when the set holds no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Returns the region names in file order.
    pub fn names(&self) -> Vec<&str> {
        self.regions.iter().map(|r| r.name()).collect()
    }

    /// Looks up a region by name.
    pub fn get(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name() == name)
    }
}

/// Parses one GeoJSON feature into a [`Region`].
fn parse_feature(feature: &Value, index: usize, path: &Path) -> Result<Region, RegionError> {
    let invalid = |reason: &str| RegionError::InvalidFeature {
        index,
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let name = feature
        .pointer("/properties/name")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("missing 'properties.name'"))?;

    let geometry = feature
        .get("geometry")
        .ok_or_else(|| invalid("missing 'geometry'"))?;
    let geom_type = geometry
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("missing 'geometry.type'"))?;
    let coordinates = geometry
        .get("coordinates")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid("missing 'geometry.coordinates'"))?;

    let rings = match geom_type {
        "Polygon" => parse_polygon(coordinates).ok_or_else(|| invalid("malformed Polygon"))?,
        "MultiPolygon" => {
            let mut rings = Vec::new();
            for polygon in coordinates {
                let polygon = polygon.as_array().ok_or_else(|| invalid("malformed MultiPolygon"))?;
                rings.extend(
                    parse_polygon(polygon).ok_or_else(|| invalid("malformed MultiPolygon"))?,
                );
            }
            rings
        }
        other => {
            return Err(invalid(&format!(
                "unsupported geometry type '{other}' (expected Polygon or MultiPolygon)"
            )));
        }
    };

    Region::new(name, rings)
}

/// Parses the ring list of a single polygon; `None` on malformed input.
fn parse_polygon(rings: &[Value]) -> Option<Vec<Vec<(f64, f64)>>> {
    let mut out = Vec::with_capacity(rings.len());
    for ring in rings {
        let ring = ring.as_array()?;
        let mut vertices = Vec::with_capacity(ring.len());
        for position in ring {
            let position = position.as_array()?;
            let lon = position.first()?.as_f64()?;
            let lat = position.get(1)?.as_f64()?;
            vertices.push((lon, lat));
        }
        out.push(vertices);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TWO_REGIONS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"name": "North Basin"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[80.0, 44.0], [82.0, 44.0], [82.0, 45.0], [80.0, 45.0], [80.0, 44.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"name": "South Basin"},
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [[[[80.0, 42.0], [82.0, 42.0], [82.0, 43.0], [80.0, 43.0], [80.0, 42.0]]]]
                }
            }
        ]
    }"#;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_feature_collection_in_order() {
        let f = write_temp(TWO_REGIONS);
        let set = RegionSet::from_geojson_file(f.path()).unwrap();
        assert_eq!(set.names(), vec!["North Basin", "South Basin"]);
        assert!(set.get("North Basin").unwrap().contains(81.0, 44.5));
        assert!(!set.get("North Basin").unwrap().contains(81.0, 42.5));
    }

    #[test]
    fn missing_file_errors() {
        let err = RegionSet::from_geojson_file(Path::new("/nonexistent/regions.json")).unwrap_err();
        assert!(matches!(err, RegionError::Read { .. }));
    }

    #[test]
    fn malformed_json_errors() {
        let f = write_temp("{not json");
        let err = RegionSet::from_geojson_file(f.path()).unwrap_err();
        assert!(matches!(err, RegionError::Json { .. }));
    }

    #[test]
    fn feature_without_name_errors() {
        let f = write_temp(
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {},
                 "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]]}}
            ]}"#,
        );
        let err = RegionSet::from_geojson_file(f.path()).unwrap_err();
        assert!(matches!(err, RegionError::InvalidFeature { index: 0, .. }));
    }

    #[test]
    fn empty_collection_errors() {
        let f = write_temp(r#"{"type": "FeatureCollection", "features": []}"#);
        let err = RegionSet::from_geojson_file(f.path()).unwrap_err();
        assert!(matches!(err, RegionError::EmptyCollection { .. }));
    }
}
