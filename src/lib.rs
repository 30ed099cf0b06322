//! # digipin-rs
//!
//! A reversible geocoder that splits a fixed lat/lon region into a 4x4 grid,
//! ten levels deep, naming each cell with one symbol per level. A full code
//! like `39J-49L-L8T4` pins a cell roughly 4 m across.
//!
//! There are currently four main entry points.
//!
//! ### 1. `PinCell` - Single Cell Operations
//!
//! ```
//! use digipin_rs::PinCell;
//!
//! # fn main() -> Result<(), digipin_rs::DigipinError> {
//! let cell = PinCell::from_lat_lon(28.622788, 77.213033)?;
//! println!("{}", cell.formatted());
//! println!("{}", cell.precision_description());
//! let polygon = cell.to_polygon();
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `GridCodec` - Configured Encoding and Search
//!
//! ```
//! use digipin_rs::{GridCodec, GridConfig};
//!
//! # fn main() -> Result<(), digipin_rs::DigipinError> {
//! let codec = GridCodec::new(GridConfig::new().precision_level(6))?;
//! let cell = codec.encode(28.6139, 77.2090)?;
//! assert_eq!(cell.code(), "39J438");
//!
//! let around = codec.neighbors(cell.code(), 1)?;
//! assert_eq!(around.value.len(), 8);
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `PinGrid` - Collections of Cells
//!
//! ```
//! use digipin_rs::{BoundingBox, PinGrid};
//!
//! # fn main() -> Result<(), digipin_rs::DigipinError> {
//! let grid = PinGrid::builder()
//!     .precision_level(8)
//!     .extent(BoundingBox::from_edges(28.610, 28.615, 77.205, 77.210)?)
//!     .build()?;
//!
//! if let Some(cell) = grid.get_cell_at(&(77.2075, 28.6125)) {
//!     println!("{}", cell.code());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### 4. `CsvToPin` - CSV File Conversion
//!
//! Convert CSV files with lat/lon columns or a geometry column (WKT or
//! GeoJSON) to code-indexed CSVs:
//!
//! ```no_run
//! use digipin_rs::{CsvToPin, CsvPinConfig, GeometryFormat};
//!
//! let config = CsvPinConfig::from_lat_lon("Latitude", "Longitude")
//!     .with_cell_geometry(GeometryFormat::Wkt)
//!     .skip_invalid(true);
//!
//! // Using trait method
//! "input.csv".to_pin_csv("output.csv", &config).unwrap();
//! ```
//!
//! Positions passed as tuples are `(longitude, latitude)`, matching
//! `geo_types` points; functions taking separate arguments take latitude first.

pub mod api;
mod cell;
pub mod coord;
mod error;
pub mod geom;
mod grid;
mod index;
pub mod io;
pub mod search;
pub mod validate;
mod warning;

pub use cell::PinCell;
pub use coord::{BoundingBox, Coordinate, Position};
pub use error::{DigipinError, FormatReason};
pub use geom::{GeometryFormat, PrecisionBand, haversine_distance, parse_geometry};
pub use grid::{MAX_GRID_CELLS, PinGrid, PinGridBuilder};
pub use index::{
    Alphabet, CODE_LENGTH, DEFAULT_SYMBOLS, GRID_DIMENSION, GridCodec, GridConfig,
    MAX_PRECISION_LEVEL, MAX_SEARCH_CELLS, REGION_BOUNDS, SEPARATOR, format_code,
};
pub use io::{
    CoordinateSource, CsvPinConfig, CsvToPin, PinCellsToArrow, PinCellsToGeoParquet,
    csv_to_pin_csv, write_geoparquet,
};
pub use validate::Validation;
pub use warning::{Annotated, Warning};

pub use geo_types;
pub use geoarrow_array;
pub use geoarrow_schema;
pub use geoparquet;
