pub mod arrow;
pub mod csv;
pub mod parquet;

pub use arrow::PinCellsToArrow;
pub use csv::{CoordinateSource, CsvPinConfig, CsvToPin, csv_to_pin_csv};
pub use parquet::{PinCellsToGeoParquet, write_geoparquet};
