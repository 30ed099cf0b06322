mod bounds;
mod coordinate;

pub use bounds::BoundingBox;
pub use coordinate::Coordinate;

use geo_types::Point;

/// Trait for types that can provide a longitude/latitude position.
///
/// Implemented for [`Coordinate`], `geo_types::Point<f64>` and `(f64, f64)`
/// tuples. Tuples and points follow the `geo` convention of `(x, y)`, which
/// means `(longitude, latitude)`.
pub trait Position {
    /// Returns the longitude in degrees.
    fn lon(&self) -> f64;
    /// Returns the latitude in degrees.
    fn lat(&self) -> f64;
}

impl Position for (f64, f64) {
    fn lon(&self) -> f64 {
        self.0
    }
    fn lat(&self) -> f64 {
        self.1
    }
}

impl Position for Point<f64> {
    fn lon(&self) -> f64 {
        Point::x(*self)
    }
    fn lat(&self) -> f64 {
        Point::y(*self)
    }
}

impl Position for Coordinate {
    fn lon(&self) -> f64 {
        self.longitude()
    }
    fn lat(&self) -> f64 {
        self.latitude()
    }
}

impl<P: Position> Position for &P {
    fn lon(&self) -> f64 {
        (*self).lon()
    }
    fn lat(&self) -> f64 {
        (*self).lat()
    }
}
