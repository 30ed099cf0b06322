use crate::cell::PinCell;
use crate::error::DigipinError;
use arrow_array::{Float64Array, RecordBatch, StringArray, UInt8Array};
use arrow_schema::{DataType, Field, Schema};
use geoarrow_array::IntoArrow;
use geoarrow_array::array::{PointArray, PolygonArray};
use geoarrow_array::builder::{PointBuilder, PolygonBuilder};
use geoarrow_schema::{Crs, Dimension, Metadata, PointType, PolygonType};
use rayon::prelude::*;
use std::sync::Arc;

fn wgs84_metadata() -> Arc<Metadata> {
    let crs = Crs::from_authority_code("EPSG:4326".to_string());
    Arc::new(Metadata::new(crs, None))
}

/// Trait for converting collections of [`PinCell`]s to Arrow arrays.
///
/// Geometries are in (longitude, latitude), tagged EPSG:4326.
pub trait PinCellsToArrow {
    /// Converts cell centers to an Arrow PointArray.
    fn to_arrow_points(&self) -> PointArray;
    /// Converts cell outlines to an Arrow PolygonArray.
    fn to_arrow_polygons(&self) -> PolygonArray;
    /// Converts cells to a RecordBatch with code, level, latitude, longitude and geometry.
    fn to_record_batch(&self) -> Result<RecordBatch, DigipinError>;
}

impl PinCellsToArrow for [PinCell] {
    fn to_arrow_points(&self) -> PointArray {
        let point = PointType::new(Dimension::XY, wgs84_metadata());
        let mut builder = PointBuilder::with_capacity(point, self.len());

        for cell in self {
            builder.push_point(Some(&cell.center().to_point()));
        }
        builder.finish()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        let poly = PolygonType::new(Dimension::XY, wgs84_metadata());
        let polygons: Vec<_> = self.par_iter().map(|c: &PinCell| c.to_polygon()).collect();
        PolygonBuilder::from_polygons(&polygons, poly).finish()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, DigipinError> {
        let polygon_array = self.to_arrow_polygons();
        let codes: StringArray = self.iter().map(|c| Some(c.code())).collect();
        let levels: UInt8Array = self.iter().map(|c| Some(c.level())).collect();
        let latitudes: Float64Array = self.iter().map(|c| Some(c.latitude())).collect();
        let longitudes: Float64Array = self.iter().map(|c| Some(c.longitude())).collect();

        let geometry_field = polygon_array.extension_type().to_field("geometry", false);
        let schema = Schema::new(vec![
            Field::new("code", DataType::Utf8, false),
            Field::new("level", DataType::UInt8, false),
            Field::new("latitude", DataType::Float64, false),
            Field::new("longitude", DataType::Float64, false),
            geometry_field,
        ]);

        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(codes),
                Arc::new(levels),
                Arc::new(latitudes),
                Arc::new(longitudes),
                Arc::new(polygon_array.into_arrow()),
            ],
        )
        .map_err(|e| DigipinError::IoError(e.to_string()))
    }
}

impl PinCellsToArrow for Vec<PinCell> {
    fn to_arrow_points(&self) -> PointArray {
        self.as_slice().to_arrow_points()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        self.as_slice().to_arrow_polygons()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, DigipinError> {
        self.as_slice().to_record_batch()
    }
}
