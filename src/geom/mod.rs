mod measure;
mod parse;

pub use measure::{
    PrecisionBand, area_square_meters, grid_size_meters, haversine_distance,
    precision_description, spans_meters,
};
pub use parse::{GeometryFormat, parse_geojson, parse_geometry, parse_wkt};
