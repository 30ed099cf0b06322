use crate::api::default_codec;
use crate::coord::{BoundingBox, Coordinate};
use crate::error::DigipinError;
use crate::geom::{PrecisionBand, area_square_meters, grid_size_meters};
use crate::index::{GridCodec, format_code};
use crate::io::arrow::PinCellsToArrow;
use crate::io::parquet::PinCellsToGeoParquet;
use arrow_array::RecordBatch;
use geo::Centroid;
use geo_types::{Geometry, LineString, Polygon};
use geoarrow_array::array::{PointArray, PolygonArray};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

/// A single grid cell: its code, center and bounds.
///
/// Cells are only produced by a [`GridCodec`], so the code, center and
/// bounds always agree.
///
/// # Example
///
/// ```
/// use digipin_rs::PinCell;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let cell = PinCell::from_lat_lon(28.622788, 77.213033)?;
/// assert_eq!(cell.formatted(), "39J-49L-L8T4");
///
/// // Cell outline for GIS work (x = longitude, y = latitude)
/// let polygon = cell.to_polygon();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PinCell {
    code: String,
    center: Coordinate,
    bounds: BoundingBox,
}

impl PinCell {
    pub(crate) fn new(code: String, bounds: BoundingBox) -> Self {
        Self {
            code,
            center: bounds.center(),
            bounds,
        }
    }

    /// Encodes a latitude/longitude with the default codec.
    pub fn from_lat_lon(latitude: f64, longitude: f64) -> Result<Self, DigipinError> {
        default_codec().encode(latitude, longitude)
    }

    /// Decodes a code with the default codec.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::PinCell;
    ///
    /// # fn main() -> Result<(), digipin_rs::DigipinError> {
    /// let cell = PinCell::from_lat_lon(19.0760, 72.8777)?;
    /// let restored = PinCell::from_code(&cell.formatted())?;
    /// assert_eq!(cell, restored);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_code(code: &str) -> Result<Self, DigipinError> {
        default_codec().decode(code)
    }

    /// Cells crossed by a line string given in (longitude, latitude).
    ///
    /// Samples the line at half-cell steps and returns each cell once, in
    /// the order the line first enters it.
    pub fn from_line_string(
        line: &LineString,
        codec: &GridCodec,
    ) -> Result<Vec<Self>, DigipinError> {
        let cells_per_side = 4f64.powi(codec.precision_level() as i32);
        let region = codec.region();
        let step = (region.height() / cells_per_side).min(region.width() / cells_per_side) * 0.5;

        let mut seen: HashSet<String> = HashSet::with_capacity(line.0.len());
        let mut cells = Vec::with_capacity(line.0.len());

        let mut visit = |lon: f64, lat: f64| -> Result<(), DigipinError> {
            let cell = codec.encode(lat, lon)?;
            if seen.insert(cell.code.clone()) {
                cells.push(cell);
            }
            Ok(())
        };

        if let [only] = line.0.as_slice() {
            visit(only.x, only.y)?;
        }

        for window in line.0.windows(2) {
            let (start, end) = (window[0], window[1]);
            let dx = end.x - start.x;
            let dy = end.y - start.y;
            let steps = ((dx * dx + dy * dy).sqrt() / step).ceil() as usize;

            for i in 0..=steps {
                let t = if steps == 0 {
                    0.0
                } else {
                    i as f64 / steps as f64
                };
                visit(start.x + t * dx, start.y + t * dy)?;
            }
        }

        Ok(cells)
    }

    /// Cells for an arbitrary `geo_types::Geometry` in (longitude, latitude).
    ///
    /// Points map to their cell, lines to every cell they cross, and areal
    /// geometries to the cell holding their centroid. Multi-geometries and
    /// collections contribute one entry per member.
    pub fn from_geometry(
        geom: Geometry<f64>,
        codec: &GridCodec,
    ) -> Result<Vec<Self>, DigipinError> {
        match geom {
            Geometry::Point(pt) => Ok(vec![codec.encode_position(&pt)?]),
            Geometry::MultiPoint(mp) => mp.0.iter().map(|pt| codec.encode_position(pt)).collect(),
            Geometry::Line(line) => {
                Self::from_line_string(&LineString::from(vec![line.start, line.end]), codec)
            }
            Geometry::LineString(line) => Self::from_line_string(&line, codec),
            Geometry::MultiLineString(mls) => {
                let mut all_cells = Vec::new();
                for line in &mls.0 {
                    all_cells.extend(Self::from_line_string(line, codec)?);
                }
                Ok(all_cells)
            }
            Geometry::MultiPolygon(mp) => {
                let mut cells = Vec::new();
                for poly in &mp.0 {
                    if let Some(centroid) = poly.centroid() {
                        cells.push(codec.encode_position(&centroid)?);
                    }
                }
                Ok(cells)
            }
            Geometry::GeometryCollection(gc) => {
                let mut all_cells = Vec::new();
                for g in gc.0 {
                    all_cells.extend(Self::from_geometry(g, codec)?);
                }
                Ok(all_cells)
            }
            // Polygon, Rect, Triangle
            areal => match areal.centroid() {
                Some(centroid) => Ok(vec![codec.encode_position(&centroid)?]),
                None => Ok(vec![]),
            },
        }
    }

    /// The code without separators.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The code with separators, e.g. `39J-49L-L8T4`.
    pub fn formatted(&self) -> String {
        format_code(&self.code)
    }

    /// Number of subdivision levels (symbols) in the code.
    pub fn level(&self) -> u8 {
        self.code.chars().count() as u8
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn latitude(&self) -> f64 {
        self.center.latitude()
    }

    pub fn longitude(&self) -> f64 {
        self.center.longitude()
    }

    /// Approximate edge length of the cell in meters.
    pub fn grid_size_meters(&self) -> f64 {
        grid_size_meters(&self.bounds)
    }

    /// Approximate area of the cell in square meters.
    pub fn area_square_meters(&self) -> f64 {
        area_square_meters(&self.bounds)
    }

    pub fn precision_band(&self) -> PrecisionBand {
        PrecisionBand::from_grid_size(self.grid_size_meters())
    }

    /// Human-readable description of how precise this cell is.
    pub fn precision_description(&self) -> String {
        let size = self.grid_size_meters();
        PrecisionBand::from_grid_size(size).describe(size)
    }

    /// Converts this cell to its rectangular outline.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.bounds.to_polygon()
    }

    /// Converts this cell's center to an Arrow PointArray.
    pub fn to_arrow_points(&self) -> PointArray {
        std::slice::from_ref(self).to_arrow_points()
    }

    /// Converts this cell to an Arrow PolygonArray.
    pub fn to_arrow_polygons(&self) -> PolygonArray {
        std::slice::from_ref(self).to_arrow_polygons()
    }

    /// Converts this cell to an Arrow RecordBatch with all attributes.
    pub fn to_record_batch(&self) -> Result<RecordBatch, DigipinError> {
        std::slice::from_ref(self).to_record_batch()
    }

    /// Writes this cell to a GeoParquet file.
    pub fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), DigipinError> {
        std::slice::from_ref(self).to_geoparquet(path)
    }
}

impl std::fmt::Display for PinCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::GridConfig;
    use geo_types::{GeometryCollection, MultiLineString, MultiPoint, Point, polygon};

    #[test]
    fn test_from_lat_lon() -> Result<(), DigipinError> {
        let cell = PinCell::from_lat_lon(28.6139, 77.2090)?;

        assert_eq!(cell.level(), 10);
        assert_eq!(cell.code(), "39J438TJC7");
        assert_eq!(cell.to_string(), "39J438TJC7");
        assert_eq!(cell.formatted(), "39J-438-TJC7");
        Ok(())
    }

    #[test]
    fn test_center_is_bounds_midpoint() -> Result<(), DigipinError> {
        let cell = PinCell::from_lat_lon(12.9716, 77.5946)?;
        let bounds = cell.bounds();

        assert_eq!(cell.latitude(), (bounds.south() + bounds.north()) / 2.0);
        assert_eq!(cell.longitude(), (bounds.west() + bounds.east()) / 2.0);
        Ok(())
    }

    #[test]
    fn test_decoded_center_close_to_input() -> Result<(), DigipinError> {
        let cell = PinCell::from_lat_lon(28.6139, 77.2090)?;
        let decoded = PinCell::from_code(cell.code())?;
        let offset = crate::geom::haversine_distance(&decoded.center(), &(77.2090, 28.6139));

        assert!(offset < 1.0);
        assert!(offset <= decoded.grid_size_meters());
        Ok(())
    }

    #[test]
    fn test_same_point_same_cell() -> Result<(), DigipinError> {
        let cell1 = PinCell::from_lat_lon(19.0760, 72.8777)?;
        let cell2 = PinCell::from_lat_lon(19.0760, 72.8777)?;
        assert_eq!(cell1, cell2);

        // A point a fraction of a cell from the center stays in the cell
        let nudged = PinCell::from_lat_lon(cell1.latitude() + 1e-6, cell1.longitude() + 1e-6)?;
        assert_eq!(cell1.code(), nudged.code());
        Ok(())
    }

    #[test]
    fn test_grid_size_and_area() -> Result<(), DigipinError> {
        let cell = PinCell::from_lat_lon(28.6139, 77.2090)?;

        assert!((cell.grid_size_meters() - 3.58).abs() < 0.05);
        assert!((cell.area_square_meters() - 12.79).abs() < 0.1);
        assert_eq!(cell.precision_band(), PrecisionBand::Building);
        assert!(cell.precision_description().starts_with("Very high precision"));
        Ok(())
    }

    #[test]
    fn test_coarser_cells_are_larger() -> Result<(), DigipinError> {
        let coarse = GridCodec::new(GridConfig::new().precision_level(6))?;
        let cell = coarse.encode(28.6139, 77.2090)?;

        assert_eq!(cell.code(), "39J438");
        assert!((cell.grid_size_meters() - 917.6).abs() < 1.0);
        assert_eq!(cell.precision_band(), PrecisionBand::Locality);
        Ok(())
    }

    #[test]
    fn test_to_polygon_matches_bounds() -> Result<(), DigipinError> {
        let cell = PinCell::from_lat_lon(22.5726, 88.3639)?;
        let polygon = cell.to_polygon();
        let exterior = polygon.exterior();

        assert_eq!(exterior.coords().count(), 5);
        for c in exterior.coords() {
            assert!(cell.bounds().contains(&(c.x, c.y)));
        }
        Ok(())
    }

    #[test]
    fn test_from_geometry_point() -> Result<(), DigipinError> {
        let codec = GridCodec::default();
        let geom = Geometry::Point(Point::new(77.2090, 28.6139));
        let cells = PinCell::from_geometry(geom, &codec)?;

        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].code(), "39J438TJC7");
        Ok(())
    }

    #[test]
    fn test_from_geometry_point_outside_region() {
        let codec = GridCodec::default();
        let geom = Geometry::Point(Point::new(-0.1, 51.5));
        let result = PinCell::from_geometry(geom, &codec);
        assert!(matches!(result, Err(DigipinError::OutOfBounds { .. })));
    }

    #[test]
    fn test_from_geometry_linestring() -> Result<(), DigipinError> {
        let codec = GridCodec::new(GridConfig::new().precision_level(8))?;
        let line = LineString::from(vec![(77.2090, 28.6139), (77.2120, 28.6160)]);
        let cells = PinCell::from_geometry(Geometry::LineString(line), &codec)?;

        assert!(cells.len() > 1);
        let codes: HashSet<&str> = cells.iter().map(|c| c.code()).collect();
        assert_eq!(codes.len(), cells.len());
        assert_eq!(cells[0].code(), codec.encode(28.6139, 77.2090)?.code());
        Ok(())
    }

    #[test]
    fn test_from_geometry_polygon_uses_centroid() -> Result<(), DigipinError> {
        let codec = GridCodec::default();
        let poly = polygon![
            (x: 77.20, y: 28.60),
            (x: 77.22, y: 28.60),
            (x: 77.22, y: 28.62),
            (x: 77.20, y: 28.62),
            (x: 77.20, y: 28.60),
        ];
        let cells = PinCell::from_geometry(Geometry::Polygon(poly), &codec)?;

        assert_eq!(cells.len(), 1);
        assert!(cells[0].bounds().contains(&(77.21, 28.61)));
        Ok(())
    }

    #[test]
    fn test_from_geometry_multi_and_collection() -> Result<(), DigipinError> {
        let codec = GridCodec::default();

        let mp = MultiPoint::new(vec![Point::new(77.2090, 28.6139), Point::new(72.8777, 19.0760)]);
        assert_eq!(PinCell::from_geometry(Geometry::MultiPoint(mp), &codec)?.len(), 2);

        let mls = MultiLineString::new(vec![
            LineString::from(vec![(77.2090, 28.6139), (77.2091, 28.6140)]),
            LineString::from(vec![(72.8777, 19.0760), (72.8778, 19.0761)]),
        ]);
        assert!(PinCell::from_geometry(Geometry::MultiLineString(mls), &codec)?.len() >= 2);

        let gc = GeometryCollection::new_from(vec![
            Geometry::Point(Point::new(77.2090, 28.6139)),
            Geometry::Point(Point::new(72.8777, 19.0760)),
        ]);
        assert_eq!(PinCell::from_geometry(Geometry::GeometryCollection(gc), &codec)?.len(), 2);
        Ok(())
    }
}
