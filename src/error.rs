use crate::coord::{BoundingBox, Coordinate};

/// Why a code string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatReason {
    /// The code (after stripping separators) has the wrong number of symbols.
    WrongLength { expected: usize, found: usize },
    /// The code contains a character outside the grid alphabet.
    InvalidCharacter(char),
}

impl std::fmt::Display for FormatReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatReason::WrongLength { expected, found } => write!(
                f,
                "invalid length: expected {} symbols, found {}",
                expected, found
            ),
            FormatReason::InvalidCharacter(c) => write!(f, "invalid character '{}'", c),
        }
    }
}

/// Error type for digipin-rs operations.
#[derive(Debug, PartialEq)]
pub enum DigipinError {
    /// The coordinate lies outside the encodable region.
    OutOfBounds {
        coordinate: Coordinate,
        region: BoundingBox,
    },
    /// The code string is malformed.
    InvalidFormat { code: String, reason: FormatReason },
    /// Latitude or longitude is outside its global range (or not finite).
    InvalidCoordinate { latitude: f64, longitude: f64 },
    /// A search radius is zero, negative or not finite.
    InvalidRadius(String),
    /// The precision level is outside the valid range (1-10).
    InvalidPrecision(u8),
    /// The grid alphabet is not 16 distinct usable symbols.
    InvalidAlphabet(String),
    /// A bounding box has its corners inverted.
    InvalidBounds(String),
    /// Configuration could not be parsed or serialized.
    ConfigError(String),
    /// File I/O or serialization error.
    IoError(String),
    /// CSV parsing or reading error.
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
}

impl std::fmt::Display for DigipinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DigipinError::OutOfBounds { coordinate, region } => write!(
                f,
                "Coordinate {} is outside the region {}",
                coordinate, region
            ),
            DigipinError::InvalidFormat { code, reason } => {
                write!(f, "Invalid code '{}': {}", code, reason)
            }
            DigipinError::InvalidCoordinate {
                latitude,
                longitude,
            } => write!(
                f,
                "Invalid coordinate: latitude {} must be within [-90, 90] and longitude {} within [-180, 180]",
                latitude, longitude
            ),
            DigipinError::InvalidRadius(msg) => write!(f, "Invalid radius: {}", msg),
            DigipinError::InvalidPrecision(p) => write!(f, "Invalid precision level: {}", p),
            DigipinError::InvalidAlphabet(msg) => write!(f, "Invalid alphabet: {}", msg),
            DigipinError::InvalidBounds(msg) => write!(f, "Invalid bounds: {}", msg),
            DigipinError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            DigipinError::IoError(msg) => write!(f, "IO error: {}", msg),
            DigipinError::CsvError(msg) => write!(f, "CSV error: {}", msg),
            DigipinError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
        }
    }
}

impl std::error::Error for DigipinError {}
