//! Free functions over the default codec: the full region, the standard
//! alphabet and 10-symbol codes with validation enabled.

use crate::cell::PinCell;
use crate::coord::Position;
use crate::error::DigipinError;
use crate::geom;
use crate::index::GridCodec;
use crate::warning::Annotated;
use once_cell::sync::Lazy;

static DEFAULT_CODEC: Lazy<GridCodec> = Lazy::new(GridCodec::default);

/// The process-wide codec used by the free functions and `PinCell::from_*`.
pub fn default_codec() -> &'static GridCodec {
    &DEFAULT_CODEC
}

/// Encodes a latitude/longitude to its 10-symbol cell.
///
/// # Example
/// ```
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let cell = digipin_rs::api::encode(28.622788, 77.213033)?;
/// assert_eq!(cell.code(), "39J49LL8T4");
/// # Ok(())
/// # }
/// ```
pub fn encode(latitude: f64, longitude: f64) -> Result<PinCell, DigipinError> {
    default_codec().encode(latitude, longitude)
}

/// Encodes a latitude/longitude, returning advisory warnings with the cell.
///
/// # Example
/// ```
/// use digipin_rs::Warning;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let edge = digipin_rs::api::encode_annotated(20.0, 63.52)?;
/// assert!(matches!(edge.warnings.as_slice(), [Warning::NearBoundary { .. }]));
/// # Ok(())
/// # }
/// ```
pub fn encode_annotated(
    latitude: f64,
    longitude: f64,
) -> Result<Annotated<PinCell>, DigipinError> {
    default_codec().encode_annotated(latitude, longitude)
}

/// Decodes a code, with or without separators.
pub fn decode(code: &str) -> Result<PinCell, DigipinError> {
    default_codec().decode(code)
}

pub fn is_within_region(position: &impl Position) -> bool {
    default_codec().is_within_region(position)
}

pub fn is_valid_code(code: &str) -> bool {
    default_codec().is_valid_code(code)
}

/// Cells within `radius` grid steps of `code`. See [`crate::search::neighbors`].
pub fn neighbors(code: &str, radius: i64) -> Result<Annotated<Vec<PinCell>>, DigipinError> {
    default_codec().neighbors(code, radius)
}

/// Cells whose centers lie within `radius_meters` of `center`.
/// See [`crate::search::find_in_radius`].
pub fn find_codes_in_radius(
    center: &impl Position,
    radius_meters: f64,
) -> Result<Annotated<Vec<PinCell>>, DigipinError> {
    default_codec().find_codes_in_radius(center, radius_meters)
}

/// Great-circle distance in meters.
pub fn distance(a: &impl Position, b: &impl Position) -> f64 {
    geom::haversine_distance(a, b)
}

pub fn area_square_meters(code: &str) -> Result<f64, DigipinError> {
    Ok(decode(code)?.area_square_meters())
}

pub fn grid_size_meters(code: &str) -> Result<f64, DigipinError> {
    Ok(decode(code)?.grid_size_meters())
}

/// Human-readable precision of the cell, e.g. for display next to a code.
pub fn precision_description(code: &str) -> Result<String, DigipinError> {
    Ok(decode(code)?.precision_description())
}
