//! District boundary collection keyed by district code.

use std::collections::BTreeMap;
use std::path::Path;

use geo::{BoundingRect, MultiPolygon, Rect};
use geojson::{GeoJson, Geometry};
use serde::Serialize;

use crate::GeoError;

/// Geographic extent of a set of boundaries, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapBounds {
    /// Minimum longitude.
    pub west: f64,
    /// Minimum latitude.
    pub south: f64,
    /// Maximum longitude.
    pub east: f64,
    /// Maximum latitude.
    pub north: f64,
}

impl MapBounds {
    fn from_rect(rect: Rect<f64>) -> Self {
        Self {
            west: rect.min().x,
            south: rect.min().y,
            east: rect.max().x,
            north: rect.max().y,
        }
    }

    fn union(self, other: Self) -> Self {
        Self {
            west: self.west.min(other.west),
            south: self.south.min(other.south),
            east: self.east.max(other.east),
            north: self.north.max(other.north),
        }
    }
}

/// District boundaries indexed by district code.
///
/// Built once at startup and shared read-only across requests.
#[derive(Debug, Clone, Default)]
pub struct BoundaryCollection {
    boundaries: BTreeMap<String, Geometry>,
    bounds: Option<MapBounds>,
}

impl BoundaryCollection {
    /// The `GeoJSON` geometry for a district, if one was loaded.
    #[must_use]
    pub fn geometry(&self, code: &str) -> Option<&Geometry> {
        self.boundaries.get(code)
    }

    /// Whether a boundary exists for the district code.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.boundaries.contains_key(code)
    }

    /// Overall extent of every loaded boundary.
    #[must_use]
    pub const fn bounds(&self) -> Option<MapBounds> {
        self.bounds
    }

    /// Number of loaded boundaries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    /// Whether no boundaries were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    fn insert(&mut self, code: String, geometry: Geometry, envelope: Rect<f64>) {
        let bounds = MapBounds::from_rect(envelope);
        self.bounds = Some(self.bounds.map_or(bounds, |b| b.union(bounds)));
        self.boundaries.insert(code, geometry);
    }
}

/// Loads boundaries from a `GeoJSON` file.
///
/// # Errors
///
/// Returns [`GeoError`] if the file cannot be read or parsed, or see
/// [`parse_boundaries`].
pub fn load_boundaries(path: &Path, key_property: &str) -> Result<BoundaryCollection, GeoError> {
    let contents = std::fs::read_to_string(path).map_err(|source| GeoError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let collection = parse_boundaries(&contents, key_property)?;

    log::info!(
        "Loaded {} district boundaries from {}",
        collection.len(),
        path.display()
    );

    Ok(collection)
}

/// Parses a `GeoJSON` `FeatureCollection` into a [`BoundaryCollection`].
///
/// Each feature's `key_property` holds the district code. Features without
/// a code, without a geometry, or with a non-polygonal geometry are skipped
/// with a warning. When a code appears more than once the first feature
/// wins.
///
/// # Errors
///
/// Returns [`GeoError`] if the document is not a `FeatureCollection`, a
/// boundary lies outside the longitude/latitude range, or no usable
/// boundary remains.
pub fn parse_boundaries(contents: &str, key_property: &str) -> Result<BoundaryCollection, GeoError> {
    let GeoJson::FeatureCollection(fc) = contents.parse::<GeoJson>()? else {
        return Err(GeoError::NotFeatureCollection);
    };

    let mut collection = BoundaryCollection::default();

    for (i, feature) in fc.features.into_iter().enumerate() {
        let Some(code) = feature
            .property(key_property)
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(ToOwned::to_owned)
        else {
            log::warn!("Feature {i} has no {key_property} property, skipping");
            continue;
        };

        let Some(geometry) = feature.geometry else {
            log::warn!("Boundary {code} has no geometry, skipping");
            continue;
        };

        let Some(multi_polygon) = to_multipolygon(&geometry) else {
            log::warn!("Boundary {code} is not a Polygon or MultiPolygon, skipping");
            continue;
        };

        let Some(envelope) = multi_polygon.bounding_rect() else {
            log::warn!("Boundary {code} has an empty geometry, skipping");
            continue;
        };

        if !is_wgs84(envelope) {
            return Err(GeoError::ProjectedCoordinates {
                code,
                min_x: envelope.min().x,
                min_y: envelope.min().y,
                max_x: envelope.max().x,
                max_y: envelope.max().y,
            });
        }

        if collection.contains(&code) {
            log::warn!("Duplicate boundary for {code}, keeping the first");
            continue;
        }

        collection.insert(code, geometry, envelope);
    }

    if collection.is_empty() {
        return Err(GeoError::NoBoundaries {
            key: key_property.to_owned(),
        });
    }

    Ok(collection)
}

/// Converts a `GeoJSON` geometry into a [`MultiPolygon`].
/// Handles both `Polygon` and `MultiPolygon` geometry types.
fn to_multipolygon(geometry: &Geometry) -> Option<MultiPolygon<f64>> {
    let geo_geom: geo::Geometry<f64> = geometry.clone().try_into().ok()?;
    match geo_geom {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}

fn is_wgs84(rect: Rect<f64>) -> bool {
    (-180.0..=180.0).contains(&rect.min().x)
        && (-180.0..=180.0).contains(&rect.max().x)
        && (-90.0..=90.0).contains(&rect.min().y)
        && (-90.0..=90.0).contains(&rect.max().y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HARTLEPOOL: &str = r#"{
        "type": "Feature",
        "properties": { "LAD23CD": "E06000001", "LAD23NM": "Hartlepool" },
        "geometry": {
            "type": "Polygon",
            "coordinates": [[[-1.3, 54.6], [-1.1, 54.6], [-1.1, 54.75], [-1.3, 54.75], [-1.3, 54.6]]]
        }
    }"#;

    const CARDIFF: &str = r#"{
        "type": "Feature",
        "properties": { "LAD23CD": "W06000015" },
        "geometry": {
            "type": "MultiPolygon",
            "coordinates": [[[[-3.35, 51.4], [-3.1, 51.4], [-3.1, 51.56], [-3.35, 51.56], [-3.35, 51.4]]]]
        }
    }"#;

    fn collection(features: &[&str]) -> String {
        format!(
            r#"{{ "type": "FeatureCollection", "features": [{}] }}"#,
            features.join(",")
        )
    }

    #[test]
    fn indexes_polygons_by_code() {
        let boundaries = parse_boundaries(&collection(&[HARTLEPOOL, CARDIFF]), "LAD23CD").unwrap();

        assert_eq!(boundaries.len(), 2);
        assert!(boundaries.contains("E06000001"));
        assert!(boundaries.geometry("W06000015").is_some());
        assert!(boundaries.geometry("E09000001").is_none());
    }

    #[test]
    fn bounds_cover_all_boundaries() {
        let boundaries = parse_boundaries(&collection(&[HARTLEPOOL, CARDIFF]), "LAD23CD").unwrap();

        let bounds = boundaries.bounds().unwrap();
        assert!((bounds.west - -3.35).abs() < 1e-9);
        assert!((bounds.south - 51.4).abs() < 1e-9);
        assert!((bounds.east - -1.1).abs() < 1e-9);
        assert!((bounds.north - 54.75).abs() < 1e-9);
    }

    #[test]
    fn skips_features_without_key_or_polygon() {
        let no_key = r#"{
            "type": "Feature",
            "properties": { "OTHER": "x" },
            "geometry": { "type": "Point", "coordinates": [0.0, 51.0] }
        }"#;
        let point = r#"{
            "type": "Feature",
            "properties": { "LAD23CD": "E07000001" },
            "geometry": { "type": "Point", "coordinates": [0.0, 51.0] }
        }"#;
        let null_geometry = r#"{
            "type": "Feature",
            "properties": { "LAD23CD": "E07000002" },
            "geometry": null
        }"#;

        let boundaries = parse_boundaries(
            &collection(&[no_key, point, null_geometry, HARTLEPOOL]),
            "LAD23CD",
        )
        .unwrap();
        assert_eq!(boundaries.len(), 1);
        assert!(boundaries.contains("E06000001"));
    }

    #[test]
    fn uses_configured_key_property() {
        let err = parse_boundaries(&collection(&[HARTLEPOOL]), "LAD22CD").unwrap_err();
        assert!(matches!(err, GeoError::NoBoundaries { key } if key == "LAD22CD"));
    }

    #[test]
    fn rejects_projected_coordinates() {
        let british_national_grid = r#"{
            "type": "Feature",
            "properties": { "LAD23CD": "E06000001" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[447000.0, 531000.0], [452000.0, 531000.0], [452000.0, 536000.0], [447000.0, 531000.0]]]
            }
        }"#;

        let err = parse_boundaries(&collection(&[british_national_grid]), "LAD23CD").unwrap_err();
        assert!(matches!(err, GeoError::ProjectedCoordinates { code, .. } if code == "E06000001"));
    }

    #[test]
    fn rejects_non_collections() {
        let err = parse_boundaries(HARTLEPOOL, "LAD23CD").unwrap_err();
        assert!(matches!(err, GeoError::NotFeatureCollection));

        let err = parse_boundaries("not json", "LAD23CD").unwrap_err();
        assert!(matches!(err, GeoError::GeoJson(_)));
    }
}
