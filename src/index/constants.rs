use crate::coord::BoundingBox;

/// Number of symbols in a full-precision code.
pub const CODE_LENGTH: usize = 10;

/// Rows (and columns) in each level's subdivision grid.
pub const GRID_DIMENSION: usize = 4;

/// Maximum precision level (one symbol per level).
pub const MAX_PRECISION_LEVEL: u8 = CODE_LENGTH as u8;

/// Default symbol grid, read row by row from the northwest corner:
///
/// ```text
/// F C 9 8
/// J 3 2 7
/// K 4 5 6
/// L M P T
/// ```
pub const DEFAULT_SYMBOLS: [char; 16] = [
    'F', 'C', '9', '8', 'J', '3', '2', '7', 'K', '4', '5', '6', 'L', 'M', 'P', 'T',
];

/// Encodable region: latitude 2.5..38.5, longitude 63.5..99.5 (India Post extent).
pub const REGION_BOUNDS: BoundingBox = BoundingBox::from_edges_unchecked(2.5, 38.5, 63.5, 99.5);

/// Separator used in formatted codes, stripped before decoding.
pub const SEPARATOR: char = '-';

/// Mean Earth radius used for haversine distances.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Upper bound on the search radius in cells, per direction.
pub const MAX_SEARCH_CELLS: u32 = 100;

/// Positions closer than this to the region edge get a boundary warning.
pub const BOUNDARY_MARGIN_DEGREES: f64 = 0.1;

/// Metre radii above this get an advisory warning.
pub const LARGE_RADIUS_METERS: f64 = 1_000_000.0;
