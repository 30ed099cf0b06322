use crate::coord::Position;
use crate::error::DigipinError;
use geo_types::Point;
use serde::{Deserialize, Serialize};

/// A WGS84 latitude/longitude pair in degrees.
///
/// Always within the global ranges: latitude `[-90, 90]`, longitude `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = DigipinError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Creates a coordinate, rejecting values outside the global ranges.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::Coordinate;
    ///
    /// let delhi = Coordinate::new(28.6139, 77.2090).unwrap();
    /// assert_eq!(delhi.latitude(), 28.6139);
    ///
    /// assert!(Coordinate::new(91.0, 77.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DigipinError> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lon_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);
        if !lat_ok || !lon_ok {
            return Err(DigipinError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Builds a coordinate from anything exposing a longitude/latitude.
    pub fn from_position(position: &impl Position) -> Result<Self, DigipinError> {
        Self::new(position.lat(), position.lon())
    }

    /// Only for values already known to be in range (constants, cell centers).
    pub(crate) const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns this coordinate as a `geo_types::Point` (x = longitude, y = latitude).
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(coord: Coordinate) -> Self {
        coord.to_point()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}
