use crate::coord::{BoundingBox, Position};
use crate::index::EARTH_RADIUS_METERS;
use serde::Serialize;

/// Great-circle distance in meters between two positions (haversine).
///
/// # Example
/// ```
/// use digipin_rs::geom::haversine_distance;
///
/// let delhi = (77.2090, 28.6139);
/// let mumbai = (72.8777, 19.0760);
/// let d = haversine_distance(&delhi, &mumbai);
/// assert!((d - 1_148_000.0).abs() < 5_000.0);
/// assert_eq!(haversine_distance(&delhi, &delhi), 0.0);
/// ```
pub fn haversine_distance(a: &impl Position, b: &impl Position) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.lon() - a.lon()).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().atan2((1.0 - h).sqrt())
}

/// North-south and east-west extents of a box in meters.
///
/// Each span is measured through the box center, so the east-west span
/// reflects the longitude compression at the box's own latitude.
pub fn spans_meters(bounds: &BoundingBox) -> (f64, f64) {
    let center = bounds.center();
    let north_south = haversine_distance(
        &(center.longitude(), bounds.south()),
        &(center.longitude(), bounds.north()),
    );
    let east_west = haversine_distance(
        &(bounds.west(), center.latitude()),
        &(bounds.east(), center.latitude()),
    );
    (north_south, east_west)
}

/// Mean edge length of a box in meters.
pub fn grid_size_meters(bounds: &BoundingBox) -> f64 {
    let (ns, ew) = spans_meters(bounds);
    (ns + ew) / 2.0
}

/// Planar area approximation of a box in square meters.
pub fn area_square_meters(bounds: &BoundingBox) -> f64 {
    let (ns, ew) = spans_meters(bounds);
    ns * ew
}

/// How fine a cell is, by grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum PrecisionBand {
    /// Under 5 m
    Building,
    /// Under 50 m
    Street,
    /// Under 500 m
    Neighbourhood,
    /// Under 5 km
    Locality,
    /// 5 km and above
    Regional,
}

impl PrecisionBand {
    pub fn from_grid_size(meters: f64) -> Self {
        if meters < 5.0 {
            PrecisionBand::Building
        } else if meters < 50.0 {
            PrecisionBand::Street
        } else if meters < 500.0 {
            PrecisionBand::Neighbourhood
        } else if meters < 5000.0 {
            PrecisionBand::Locality
        } else {
            PrecisionBand::Regional
        }
    }

    /// Exclusive upper bound of the band in meters; `None` for the last band.
    pub fn upper_bound_meters(&self) -> Option<f64> {
        match self {
            PrecisionBand::Building => Some(5.0),
            PrecisionBand::Street => Some(50.0),
            PrecisionBand::Neighbourhood => Some(500.0),
            PrecisionBand::Locality => Some(5000.0),
            PrecisionBand::Regional => None,
        }
    }

    pub fn describe(&self, meters: f64) -> String {
        match self {
            PrecisionBand::Building => format!(
                "Very high precision: ~{:.1} m grid, pinpoints a building entrance",
                meters
            ),
            PrecisionBand::Street => format!(
                "High precision: ~{:.0} m grid, identifies a building or plot",
                meters
            ),
            PrecisionBand::Neighbourhood => format!(
                "Medium precision: ~{:.0} m grid, identifies a street block",
                meters
            ),
            PrecisionBand::Locality => format!(
                "Low precision: ~{:.1} km grid, identifies a neighbourhood or village",
                meters / 1000.0
            ),
            PrecisionBand::Regional => format!(
                "Very low precision: ~{:.0} km grid, identifies a district or wider region",
                meters / 1000.0
            ),
        }
    }
}

/// Describes a grid size in words, e.g. for display next to a code.
pub fn precision_description(grid_size_meters: f64) -> String {
    PrecisionBand::from_grid_size(grid_size_meters).describe(grid_size_meters)
}
