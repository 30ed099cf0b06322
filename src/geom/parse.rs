use crate::error::DigipinError;
use geo_types::{Geometry, GeometryCollection};
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

/// Textual geometry encodings, read from input and written to CSV output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text, e.g. `POINT(77.209 28.6139)`
    Wkt,
    /// GeoJSON geometry, feature or feature collection
    GeoJson,
}

impl GeometryFormat {
    /// GeoJSON starts with `{`; anything else is treated as WKT.
    pub fn detect(s: &str) -> Self {
        if s.trim_start().starts_with('{') {
            GeometryFormat::GeoJson
        } else {
            GeometryFormat::Wkt
        }
    }
}

/// Parses a geometry string, auto-detecting WKT or GeoJSON.
///
/// Coordinates are expected in (longitude, latitude) order.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, DigipinError> {
    let trimmed = s.trim();
    match GeometryFormat::detect(trimmed) {
        GeometryFormat::GeoJson => parse_geojson(trimmed),
        GeometryFormat::Wkt => parse_wkt(trimmed),
    }
}

fn geojson_geometry(geom: geojson::Geometry) -> Result<Geometry<f64>, DigipinError> {
    Geometry::try_from(geom).map_err(|e| DigipinError::GeometryParseError(e.to_string()))
}

/// Parses GeoJSON. Feature collections become a `GeometryCollection` of their
/// feature geometries; features without geometry are skipped.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, DigipinError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| DigipinError::GeometryParseError(e.to_string()))?;

    match geojson {
        GeoJson::Geometry(geom) => geojson_geometry(geom),
        GeoJson::Feature(feat) => feat
            .geometry
            .ok_or_else(|| DigipinError::GeometryParseError("Feature has no geometry".to_string()))
            .and_then(geojson_geometry),
        GeoJson::FeatureCollection(fc) => {
            let members = fc
                .features
                .into_iter()
                .filter_map(|feat| feat.geometry)
                .map(geojson_geometry)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Geometry::GeometryCollection(GeometryCollection::new_from(
                members,
            )))
        }
    }
}

/// Parses a WKT string.
pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, DigipinError> {
    let wkt: Wkt<f64> =
        Wkt::from_str(s).map_err(|e| DigipinError::GeometryParseError(e.to_string()))?;

    wkt.try_into().map_err(|_| {
        DigipinError::GeometryParseError("Failed to convert WKT to geometry".to_string())
    })
}
