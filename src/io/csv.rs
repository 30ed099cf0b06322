use crate::cell::PinCell;
use crate::error::DigipinError;
use crate::geom::{GeometryFormat, parse_geometry};
use crate::index::{GridCodec, GridConfig};
use csv::StringRecord;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

enum SourceIndices {
    Geometry(usize),
    Coordinates { lat_idx: usize, lon_idx: usize },
}

#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry in (longitude, latitude)
    GeometryColumn(String),
    /// Separate latitude and longitude columns in decimal degrees
    CoordinateColumns {
        lat_column: String,
        lon_column: String,
    },
}

#[derive(Debug, Clone)]
pub struct CsvPinConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub grid: GridConfig,
    pub include_cell_geometry: Option<GeometryFormat>,
    pub skip_invalid: bool,
}

impl CsvPinConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use digipin_rs::CsvPinConfig;
    ///
    /// let config = CsvPinConfig::new("geometry");
    /// ```
    pub fn new(geometry_column: impl Into<String>) -> Self {
        Self::with_source(CoordinateSource::GeometryColumn(geometry_column.into()))
    }

    /// Create config for a CSV with separate latitude/longitude columns.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::{CsvPinConfig, GridConfig};
    ///
    /// let config = CsvPinConfig::from_lat_lon("Latitude", "Longitude")
    ///     .grid(GridConfig::new().precision_level(8))
    ///     .skip_invalid(true);
    /// ```
    pub fn from_lat_lon(lat_column: impl Into<String>, lon_column: impl Into<String>) -> Self {
        Self::with_source(CoordinateSource::CoordinateColumns {
            lat_column: lat_column.into(),
            lon_column: lon_column.into(),
        })
    }

    fn with_source(source: CoordinateSource) -> Self {
        Self {
            source,
            exclude_columns: Vec::new(),
            grid: GridConfig::default(),
            include_cell_geometry: None,
            skip_invalid: false,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    pub fn grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    // Include the cell outline in the output.
    pub fn with_cell_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_cell_geometry = Some(format);
        self
    }

    /// Log and drop rows that fail to encode instead of aborting.
    pub fn skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }
}

pub trait CsvToPin {
    fn to_pin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvPinConfig,
    ) -> Result<usize, DigipinError>;
}

impl<P: AsRef<Path>> CsvToPin for P {
    fn to_pin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvPinConfig,
    ) -> Result<usize, DigipinError> {
        csv_to_pin_csv(self, output_path, config)
    }
}

fn polygon_to_wkt(polygon: &geo_types::Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

fn polygon_to_geojson(polygon: &geo_types::Polygon<f64>) -> String {
    let geom = geojson::Geometry::from(polygon);
    geom.to_string()
}

fn csv_err(e: impl std::fmt::Display) -> DigipinError {
    DigipinError::CsvError(e.to_string())
}

fn column_index(headers: &StringRecord, name: &str, role: &str) -> Result<usize, DigipinError> {
    if name.is_empty() {
        return Err(DigipinError::CsvError(format!("{} column name cannot be empty", role)));
    }
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DigipinError::CsvError(format!("{} column '{}' not found", role, name)))
}

fn parse_degrees(record: &StringRecord, idx: usize, role: &str) -> Result<f64, DigipinError> {
    let raw = record
        .get(idx)
        .ok_or_else(|| DigipinError::CsvError(format!("Missing {} column at index {}", role, idx)))?
        .trim();
    raw.parse()
        .map_err(|_| DigipinError::CsvError(format!("Invalid {}: '{}'", role, raw)))
}

fn cells_for_record(
    record: &StringRecord,
    source: &SourceIndices,
    codec: &GridCodec,
) -> Result<Vec<PinCell>, DigipinError> {
    match source {
        SourceIndices::Geometry(idx) => {
            let geom_str = record.get(*idx).ok_or_else(|| {
                DigipinError::CsvError(format!("Missing geometry column at index {}", idx))
            })?;
            PinCell::from_geometry(parse_geometry(geom_str)?, codec)
        }
        SourceIndices::Coordinates { lat_idx, lon_idx } => {
            let latitude = parse_degrees(record, *lat_idx, "latitude")?;
            let longitude = parse_degrees(record, *lon_idx, "longitude")?;
            Ok(vec![codec.encode(latitude, longitude)?])
        }
    }
}

/// Converts a CSV file with geometry or coordinate columns to a CSV file with
/// a leading `digipin` column. Returns the number of rows written.
///
/// Geometry rows that map to several cells (lines, multi-geometries) produce
/// one output row per cell. Source coordinate columns are dropped from the
/// output. Streams output to minimize memory usage for large files.
///
/// # Example with geometry column (WKT or GeoJSON)
///
/// ```no_run
/// use digipin_rs::{csv_to_pin_csv, CsvPinConfig, GeometryFormat};
///
/// let config = CsvPinConfig::new("Geo Shape")
///     .exclude(vec!["Geo Point".into()])
///     .with_cell_geometry(GeometryFormat::Wkt);
///
/// csv_to_pin_csv("input.csv", "output.csv", &config).unwrap();
/// ```
///
/// # Example with coordinate columns
///
/// ```no_run
/// use digipin_rs::{csv_to_pin_csv, CsvPinConfig};
///
/// let config = CsvPinConfig::from_lat_lon("Latitude", "Longitude").skip_invalid(true);
///
/// csv_to_pin_csv("post_offices.csv", "output.csv", &config).unwrap();
/// ```
pub fn csv_to_pin_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvPinConfig,
) -> Result<usize, DigipinError> {
    let codec = GridCodec::new(config.grid.clone())?;

    let file = File::open(csv_path.as_ref()).map_err(csv_err)?;
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers().map_err(csv_err)?.clone();

    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = column_index(&headers, col, "Geometry")?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CoordinateSource::CoordinateColumns {
            lat_column,
            lon_column,
        } => {
            let lat_idx = column_index(&headers, lat_column, "Latitude")?;
            let lon_idx = column_index(&headers, lon_column, "Longitude")?;
            (
                SourceIndices::Coordinates { lat_idx, lon_idx },
                HashSet::from([lat_idx, lon_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file =
        File::create(output_path.as_ref()).map_err(|e| DigipinError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec!["digipin"];
    if config.include_cell_geometry.is_some() {
        header_row.push("cell_geometry");
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer.write_record(&header_row).map_err(csv_err)?;

    let mut written = 0usize;
    let mut skipped = 0usize;

    for (line, result) in reader.records().enumerate() {
        let record = result.map_err(csv_err)?;

        let cells = match cells_for_record(&record, &source_indices, &codec) {
            Ok(cells) => cells,
            Err(e) if config.skip_invalid => {
                log::warn!("skipping row {}: {}", line + 1, e);
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        for cell in cells {
            let mut row: Vec<String> = vec![cell.code().to_string()];

            if let Some(format) = config.include_cell_geometry {
                let polygon = cell.to_polygon();
                row.push(match format {
                    GeometryFormat::Wkt => polygon_to_wkt(&polygon),
                    GeometryFormat::GeoJson => polygon_to_geojson(&polygon),
                });
            }

            for (i, field) in record.iter().enumerate() {
                if !exclude_indices.contains(&i) {
                    row.push(field.to_string());
                }
            }
            writer.write_record(&row).map_err(csv_err)?;
            written += 1;
        }
    }

    writer.flush().map_err(csv_err)?;

    log::info!(
        "wrote {} rows to {} ({} skipped)",
        written,
        output_path.as_ref().display(),
        skipped
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn io_err(e: std::io::Error) -> DigipinError {
        DigipinError::IoError(e.to_string())
    }

    fn write_input(path: &Path, lines: &[&str]) -> Result<(), DigipinError> {
        let mut file = File::create(path).map_err(io_err)?;
        for line in lines {
            writeln!(file, "{}", line).map_err(io_err)?;
        }
        Ok(())
    }

    fn read_rows(path: &Path) -> Result<Vec<StringRecord>, DigipinError> {
        let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
        reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_err)
    }

    #[test]
    fn test_csv_from_lat_lon_columns() -> Result<(), DigipinError> {
        let dir = tempdir().map_err(io_err)?;
        let csv_path = dir.path().join("offices.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &[
                "Office,Latitude,Longitude,City",
                "Dak Bhawan,28.6139,77.2090,New Delhi",
                "GPO,19.0760,72.8777,Mumbai",
            ],
        )?;

        let config = CsvPinConfig::from_lat_lon("Latitude", "Longitude");
        let written = csv_to_pin_csv(&csv_path, &output_path, &config)?;
        assert_eq!(written, 2);

        let output = std::fs::read_to_string(&output_path).map_err(io_err)?;
        assert!(output.starts_with("digipin,Office,City"));
        assert!(!output.contains("Latitude"));

        let rows = read_rows(&output_path)?;
        assert_eq!(rows[0].get(0), Some("39J438TJC7"));
        assert_eq!(rows[0].get(1), Some("Dak Bhawan"));
        assert_eq!(rows[1].get(0), Some("4FK5958823"));
        Ok(())
    }

    #[test]
    fn test_csv_geojson_point_column() -> Result<(), DigipinError> {
        let dir = tempdir().map_err(io_err)?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &[
                "ASSET_ID,TYPE,geometry",
                "PB001,Postbox,\"{\"\"type\"\":\"\"Point\"\",\"\"coordinates\"\":[77.5946,12.9716]}\"",
            ],
        )?;

        let config = CsvPinConfig::new("geometry");
        csv_to_pin_csv(&csv_path, &output_path, &config)?;

        let rows = read_rows(&output_path)?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(0), Some("4P3JK852C9"));
        assert_eq!(rows[0].get(1), Some("PB001"));
        Ok(())
    }

    #[test]
    fn test_csv_wkt_line_expands_rows() -> Result<(), DigipinError> {
        let dir = tempdir().map_err(io_err)?;
        let csv_path = dir.path().join("roads.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &[
                "ROAD,geometry",
                "Rajpath,\"LINESTRING(77.2090 28.6139, 77.2120 28.6160)\"",
            ],
        )?;

        let config = CsvPinConfig::new("geometry").grid(GridConfig::new().precision_level(8));
        let written = csv_to_pin_csv(&csv_path, &output_path, &config)?;

        assert!(written > 1);
        for row in read_rows(&output_path)? {
            assert_eq!(row.get(0).map(str::len), Some(8));
            assert_eq!(row.get(1), Some("Rajpath"));
        }
        Ok(())
    }

    #[test]
    fn test_csv_with_cell_geometry() -> Result<(), DigipinError> {
        let dir = tempdir().map_err(io_err)?;
        let csv_path = dir.path().join("test.csv");
        let wkt_path = dir.path().join("wkt.csv");
        let json_path = dir.path().join("json.csv");

        write_input(&csv_path, &["id,lat,lon", "1,28.6139,77.2090"])?;

        let config =
            CsvPinConfig::from_lat_lon("lat", "lon").with_cell_geometry(GeometryFormat::Wkt);
        csv_to_pin_csv(&csv_path, &wkt_path, &config)?;
        let rows = read_rows(&wkt_path)?;
        assert!(rows[0].get(1).is_some_and(|g| g.starts_with("POLYGON")));

        let config = config.with_cell_geometry(GeometryFormat::GeoJson);
        csv_to_pin_csv(&csv_path, &json_path, &config)?;
        let output = std::fs::read_to_string(&json_path).map_err(io_err)?;
        assert!(output.starts_with("digipin,cell_geometry,id"));
        assert!(output.contains("Polygon"));
        Ok(())
    }

    #[test]
    fn test_csv_exclude_columns() -> Result<(), DigipinError> {
        let dir = tempdir().map_err(io_err)?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &["id,lat,lon,notes,owner", "1,28.6139,77.2090,temp,ops"],
        )?;

        let config = CsvPinConfig::from_lat_lon("lat", "lon").exclude(vec!["notes".into()]);
        csv_to_pin_csv(&csv_path, &output_path, &config)?;

        let output = std::fs::read_to_string(&output_path).map_err(io_err)?;
        assert!(output.starts_with("digipin,id,owner"));
        assert!(!output.contains("temp"));
        Ok(())
    }

    #[test]
    fn test_csv_invalid_row_fails_by_default() -> Result<(), DigipinError> {
        let dir = tempdir().map_err(io_err)?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &["id,lat,lon", "1,28.6139,77.2090", "2,51.5,-0.1", "3,abc,77.0"],
        )?;

        let config = CsvPinConfig::from_lat_lon("lat", "lon");
        let result = csv_to_pin_csv(&csv_path, &output_path, &config);
        assert!(matches!(result, Err(DigipinError::OutOfBounds { .. })));
        Ok(())
    }

    #[test]
    fn test_csv_skip_invalid_rows() -> Result<(), DigipinError> {
        let dir = tempdir().map_err(io_err)?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &["id,lat,lon", "1,28.6139,77.2090", "2,51.5,-0.1", "3,abc,77.0", "4,19.0760,72.8777"],
        )?;

        let config = CsvPinConfig::from_lat_lon("lat", "lon").skip_invalid(true);
        let written = csv_path.to_pin_csv(&output_path, &config)?;
        assert_eq!(written, 2);

        let ids: Vec<String> = read_rows(&output_path)?
            .iter()
            .filter_map(|r| r.get(1).map(str::to_string))
            .collect();
        assert_eq!(ids, vec!["1", "4"]);
        Ok(())
    }

    #[test]
    fn test_csv_missing_column() -> Result<(), DigipinError> {
        let dir = tempdir().map_err(io_err)?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_input(&csv_path, &["id,lat,lon", "1,28.6139,77.2090"])?;

        let missing = CsvPinConfig::new("geometry");
        assert!(matches!(
            csv_to_pin_csv(&csv_path, &output_path, &missing),
            Err(DigipinError::CsvError(_))
        ));

        let empty = CsvPinConfig::from_lat_lon("", "lon");
        assert!(matches!(
            csv_to_pin_csv(&csv_path, &output_path, &empty),
            Err(DigipinError::CsvError(_))
        ));
        Ok(())
    }
}
