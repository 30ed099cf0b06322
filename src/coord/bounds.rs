use crate::coord::{Coordinate, Position};
use crate::error::DigipinError;
use geo_types::{Polygon, Rect, coord};
use serde::{Deserialize, Serialize};

/// An axis-aligned latitude/longitude rectangle.
///
/// The southwest corner never lies north or east of the northeast corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoundingBox")]
pub struct BoundingBox {
    southwest: Coordinate,
    northeast: Coordinate,
}

#[derive(Deserialize)]
struct RawBoundingBox {
    southwest: Coordinate,
    northeast: Coordinate,
}

impl TryFrom<RawBoundingBox> for BoundingBox {
    type Error = DigipinError;

    fn try_from(raw: RawBoundingBox) -> Result<Self, Self::Error> {
        BoundingBox::new(raw.southwest, raw.northeast)
    }
}

impl BoundingBox {
    /// Creates a bounding box from its southwest and northeast corners.
    pub fn new(southwest: Coordinate, northeast: Coordinate) -> Result<Self, DigipinError> {
        if southwest.latitude() > northeast.latitude() {
            return Err(DigipinError::InvalidBounds(format!(
                "south edge {} is north of north edge {}",
                southwest.latitude(),
                northeast.latitude()
            )));
        }
        if southwest.longitude() > northeast.longitude() {
            return Err(DigipinError::InvalidBounds(format!(
                "west edge {} is east of east edge {}",
                southwest.longitude(),
                northeast.longitude()
            )));
        }
        Ok(Self {
            southwest,
            northeast,
        })
    }

    /// Creates a bounding box from its four edges in degrees.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::BoundingBox;
    ///
    /// let bbox = BoundingBox::from_edges(28.0, 29.0, 77.0, 78.0).unwrap();
    /// assert_eq!(bbox.height(), 1.0);
    /// assert!(bbox.contains(&(77.5, 28.5)));
    /// ```
    pub fn from_edges(south: f64, north: f64, west: f64, east: f64) -> Result<Self, DigipinError> {
        Self::new(Coordinate::new(south, west)?, Coordinate::new(north, east)?)
    }

    pub(crate) const fn from_edges_unchecked(south: f64, north: f64, west: f64, east: f64) -> Self {
        Self {
            southwest: Coordinate::new_unchecked(south, west),
            northeast: Coordinate::new_unchecked(north, east),
        }
    }

    pub fn southwest(&self) -> Coordinate {
        self.southwest
    }

    pub fn northeast(&self) -> Coordinate {
        self.northeast
    }

    pub fn south(&self) -> f64 {
        self.southwest.latitude()
    }

    pub fn north(&self) -> f64 {
        self.northeast.latitude()
    }

    pub fn west(&self) -> f64 {
        self.southwest.longitude()
    }

    pub fn east(&self) -> f64 {
        self.northeast.longitude()
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Coordinate {
        Coordinate::new_unchecked(
            (self.south() + self.north()) / 2.0,
            (self.west() + self.east()) / 2.0,
        )
    }

    /// Returns `true` if the position lies inside the box, edges included.
    pub fn contains(&self, position: &impl Position) -> bool {
        let (lat, lon) = (position.lat(), position.lon());
        lat >= self.south() && lat <= self.north() && lon >= self.west() && lon <= self.east()
    }

    /// Longitude span in degrees.
    pub fn width(&self) -> f64 {
        self.east() - self.west()
    }

    /// Latitude span in degrees.
    pub fn height(&self) -> f64 {
        self.north() - self.south()
    }

    /// Smallest distance in degrees from the position to any edge of the box.
    ///
    /// Only meaningful for positions inside the box.
    pub fn edge_margin(&self, position: &impl Position) -> f64 {
        let (lat, lon) = (position.lat(), position.lon());
        (lat - self.south())
            .min(self.north() - lat)
            .min(lon - self.west())
            .min(self.east() - lon)
    }

    /// Returns the overlap of two boxes, if any.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let south = self.south().max(other.south());
        let north = self.north().min(other.north());
        let west = self.west().max(other.west());
        let east = self.east().min(other.east());
        if south > north || west > east {
            return None;
        }
        Some(Self::from_edges_unchecked(south, north, west, east))
    }

    /// Converts to a `geo_types::Rect` in (longitude, latitude) space.
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.west(), y: self.south() },
            coord! { x: self.east(), y: self.north() },
        )
    }

    /// Converts to a closed `geo_types::Polygon` in (longitude, latitude) space.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} .. {}]", self.southwest, self.northeast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_width_height() -> Result<(), DigipinError> {
        let bbox = BoundingBox::from_edges(2.5, 38.5, 63.5, 99.5)?;
        let center = bbox.center();

        assert_eq!(center.latitude(), 20.5);
        assert_eq!(center.longitude(), 81.5);
        assert_eq!(bbox.width(), 36.0);
        assert_eq!(bbox.height(), 36.0);
        Ok(())
    }

    #[test]
    fn test_contains_is_inclusive() -> Result<(), DigipinError> {
        let bbox = BoundingBox::from_edges(10.0, 20.0, 70.0, 80.0)?;

        assert!(bbox.contains(&(75.0, 15.0)));
        assert!(bbox.contains(&(70.0, 10.0)));
        assert!(bbox.contains(&(80.0, 20.0)));
        assert!(!bbox.contains(&(80.0001, 15.0)));
        assert!(!bbox.contains(&(75.0, 9.9999)));
        Ok(())
    }

    #[test]
    fn test_inverted_corners_rejected() {
        let result = BoundingBox::from_edges(20.0, 10.0, 70.0, 80.0);
        assert!(matches!(result, Err(DigipinError::InvalidBounds(_))));

        let result = BoundingBox::from_edges(10.0, 20.0, 80.0, 70.0);
        assert!(matches!(result, Err(DigipinError::InvalidBounds(_))));
    }

    #[test]
    fn test_edge_margin() -> Result<(), DigipinError> {
        let bbox = BoundingBox::from_edges(10.0, 20.0, 70.0, 80.0)?;
        assert!((bbox.edge_margin(&(70.5, 15.0)) - 0.5).abs() < 1e-9);
        assert!((bbox.edge_margin(&(75.0, 15.0)) - 5.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_intersection() -> Result<(), DigipinError> {
        let a = BoundingBox::from_edges(10.0, 20.0, 70.0, 80.0)?;
        let b = BoundingBox::from_edges(15.0, 25.0, 75.0, 85.0)?;
        let overlap = a.intersection(&b);
        assert_eq!(overlap, Some(BoundingBox::from_edges(15.0, 20.0, 75.0, 80.0)?));

        let c = BoundingBox::from_edges(30.0, 40.0, 70.0, 80.0)?;
        assert!(a.intersection(&c).is_none());
        Ok(())
    }

    #[test]
    fn test_to_polygon_is_closed() -> Result<(), DigipinError> {
        let polygon = BoundingBox::from_edges(10.0, 20.0, 70.0, 80.0)?.to_polygon();
        let exterior = polygon.exterior();
        assert_eq!(exterior.coords().count(), 5);
        assert_eq!(exterior.0[0], exterior.0[4]);
        Ok(())
    }
}
