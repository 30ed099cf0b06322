use crate::cell::PinCell;
use crate::error::DigipinError;
use crate::io::arrow::PinCellsToArrow;
use geoparquet::writer::{
    GeoParquetRecordBatchEncoder, GeoParquetWriterEncoding, GeoParquetWriterOptionsBuilder,
};
use parquet::arrow::ArrowWriter;
use std::fs::File;
use std::path::Path;

fn io_err(e: impl std::fmt::Display) -> DigipinError {
    DigipinError::IoError(e.to_string())
}

/// Writes cells to a GeoParquet file, one row per cell.
///
/// Columns are `code`, `level`, `latitude` and `longitude` (the cell center),
/// then `geometry` holding the cell rectangle as a WKB polygon in EPSG:4326.
/// The GeoParquet `geo` metadata is attached to the file footer.
pub fn write_geoparquet(cells: &[PinCell], path: impl AsRef<Path>) -> Result<(), DigipinError> {
    let path = path.as_ref();
    let batch = cells.to_record_batch()?;

    let wkb = GeoParquetWriterOptionsBuilder::default()
        .set_encoding(GeoParquetWriterEncoding::WKB)
        .build();
    let schema = batch.schema();
    let mut encoder = GeoParquetRecordBatchEncoder::try_new(&schema, &wkb).map_err(io_err)?;
    let encoded = encoder.encode_record_batch(&batch).map_err(io_err)?;

    let file = File::create(path).map_err(io_err)?;
    let mut writer = ArrowWriter::try_new(file, encoder.target_schema(), None).map_err(io_err)?;
    writer.write(&encoded).map_err(io_err)?;
    writer.append_key_value_metadata(encoder.into_keyvalue().map_err(io_err)?);
    writer.finish().map_err(io_err)?;

    log::debug!("wrote {} cells to {}", cells.len(), path.display());
    Ok(())
}

/// Trait for writing collections of [`PinCell`]s to GeoParquet.
pub trait PinCellsToGeoParquet: PinCellsToArrow {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), DigipinError>;
}

impl PinCellsToGeoParquet for [PinCell] {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), DigipinError> {
        write_geoparquet(self, path)
    }
}

impl PinCellsToGeoParquet for Vec<PinCell> {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), DigipinError> {
        write_geoparquet(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::BoundingBox;
    use crate::grid::PinGrid;
    use crate::index::{GridCodec, GridConfig};
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use tempfile::tempdir;

    #[test]
    fn test_cells_to_geoparquet() -> Result<(), DigipinError> {
        let cells = vec![
            PinCell::from_lat_lon(28.6139, 77.2090)?,
            PinCell::from_lat_lon(19.0760, 72.8777)?,
        ];

        let dir = tempdir().map_err(io_err)?;
        let path = dir.path().join("cells.parquet");
        cells.to_geoparquet(&path)?;

        let file = File::open(&path).map_err(io_err)?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file).map_err(io_err)?;
        let footer = reader.metadata().file_metadata();

        assert_eq!(footer.num_rows(), 2);
        assert!(
            footer
                .key_value_metadata()
                .is_some_and(|kv| kv.iter().any(|entry| entry.key == "geo"))
        );

        let names: Vec<&str> = reader
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect();
        assert_eq!(names, ["code", "level", "latitude", "longitude", "geometry"]);
        Ok(())
    }

    #[test]
    fn test_grid_to_geoparquet() -> Result<(), DigipinError> {
        let codec = GridCodec::new(GridConfig::new().precision_level(7))?;
        let extent = BoundingBox::from_edges(28.60, 28.62, 77.20, 77.22)?;
        let grid = PinGrid::from_extent(&codec, &extent)?;

        let dir = tempdir().map_err(io_err)?;
        let path = dir.path().join("grid.parquet");
        grid.cells().to_geoparquet(&path)?;

        let file = File::open(&path).map_err(io_err)?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file).map_err(io_err)?;
        assert_eq!(reader.metadata().file_metadata().num_rows(), grid.len() as i64);
        Ok(())
    }
}
