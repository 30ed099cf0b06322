mod alphabet;
mod codec;
mod config;
pub mod constants;

pub use alphabet::Alphabet;
pub use codec::{GridCodec, format_code};
pub use config::GridConfig;
pub use constants::{
    BOUNDARY_MARGIN_DEGREES, CODE_LENGTH, DEFAULT_SYMBOLS, EARTH_RADIUS_METERS, GRID_DIMENSION,
    LARGE_RADIUS_METERS, MAX_PRECISION_LEVEL, MAX_SEARCH_CELLS, REGION_BOUNDS, SEPARATOR,
};
