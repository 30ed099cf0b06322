use crate::cell::PinCell;
use crate::coord::{BoundingBox, Coordinate, Position};
use crate::error::{DigipinError, FormatReason};
use crate::index::config::GridConfig;
use crate::index::constants::{CODE_LENGTH, GRID_DIMENSION, SEPARATOR};
use crate::search;
use crate::validate::{check_code, check_region};
use crate::warning::{Annotated, Warning};

const LAST_INDEX: i64 = GRID_DIMENSION as i64 - 1;

/// Working bounds of one subdivision step.
#[derive(Debug, Clone, Copy)]
struct Span {
    south: f64,
    north: f64,
    west: f64,
    east: f64,
}

impl Span {
    fn of(bounds: &BoundingBox) -> Self {
        Self {
            south: bounds.south(),
            north: bounds.north(),
            west: bounds.west(),
            east: bounds.east(),
        }
    }

    fn divisions(&self) -> (f64, f64) {
        let n = GRID_DIMENSION as f64;
        ((self.north - self.south) / n, (self.east - self.west) / n)
    }

    /// Grid position of the point in this span. Row 0 is the northern band.
    ///
    /// Out-of-span (and NaN) inputs clamp onto the nearest edge cell.
    fn locate(&self, lat: f64, lon: f64) -> (usize, usize) {
        let (lat_div, lon_div) = self.divisions();
        let row = LAST_INDEX - ((lat - self.south) / lat_div).floor() as i64;
        let col = ((lon - self.west) / lon_div).floor() as i64;
        (
            row.clamp(0, LAST_INDEX) as usize,
            col.clamp(0, LAST_INDEX) as usize,
        )
    }

    /// Shrinks the span to cell `(row, col)`.
    ///
    /// Encode and decode both go through here so a code always maps to
    /// bit-identical bounds.
    fn narrow(&self, row: usize, col: usize) -> Self {
        let (lat_div, lon_div) = self.divisions();
        let n = GRID_DIMENSION as f64;
        let west = self.west + lon_div * col as f64;
        Self {
            south: self.south + lat_div * (n - 1.0 - row as f64),
            north: self.south + lat_div * (n - row as f64),
            west,
            east: west + lon_div,
        }
    }

    fn to_bounds(self) -> BoundingBox {
        BoundingBox::from_edges_unchecked(self.south, self.north, self.west, self.east)
    }
}

/// Encodes coordinates to grid codes and decodes them back.
///
/// A codec is an immutable value; share it freely between threads.
///
/// # Example
/// ```
/// use digipin_rs::GridCodec;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let codec = GridCodec::default();
/// let cell = codec.encode(28.622788, 77.213033)?;
/// assert_eq!(cell.code(), "39J49LL8T4");
///
/// let decoded = codec.decode("39J-49L-L8T4")?;
/// assert_eq!(decoded, cell);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridCodec {
    config: GridConfig,
}

impl GridCodec {
    /// Creates a codec, rejecting an invalid configuration.
    pub fn new(config: GridConfig) -> Result<Self, DigipinError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn region(&self) -> &BoundingBox {
        &self.config.region
    }

    pub fn precision_level(&self) -> u8 {
        self.config.precision_level
    }

    /// Encodes a latitude/longitude pair to the cell containing it.
    ///
    /// With validation disabled, coordinates outside the region are clamped
    /// onto the nearest edge cell instead of being rejected.
    ///
    /// # Errors
    ///
    /// - [`DigipinError::InvalidCoordinate`] - latitude/longitude outside the global range
    /// - [`DigipinError::OutOfBounds`] - coordinate outside the region
    pub fn encode(&self, latitude: f64, longitude: f64) -> Result<PinCell, DigipinError> {
        let (cell, warning) = self.encode_checked(latitude, longitude)?;
        if let Some(warning) = warning {
            log::debug!("encoding ({}, {}): {}", latitude, longitude, warning);
        }
        Ok(cell)
    }

    /// Like [`encode`](Self::encode), but returns advisory warnings with the cell.
    ///
    /// A coordinate within 0.1 degrees of the region edge carries
    /// [`Warning::NearBoundary`].
    ///
    /// # Example
    /// ```
    /// use digipin_rs::{GridCodec, Warning};
    ///
    /// # fn main() -> Result<(), digipin_rs::DigipinError> {
    /// let codec = GridCodec::default();
    /// let edge = codec.encode_annotated(20.0, 63.52)?;
    /// assert!(matches!(edge.warnings.as_slice(), [Warning::NearBoundary { .. }]));
    /// # Ok(())
    /// # }
    /// ```
    pub fn encode_annotated(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Annotated<PinCell>, DigipinError> {
        let (cell, warning) = self.encode_checked(latitude, longitude)?;
        let warnings: Vec<Warning> = warning.into_iter().collect();
        for warning in &warnings {
            log::warn!("encoding ({}, {}) as {}: {}", latitude, longitude, cell, warning);
        }
        Ok(Annotated::with_warnings(cell, warnings))
    }

    fn encode_checked(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<(PinCell, Option<Warning>), DigipinError> {
        let warning = if self.config.validation_enabled {
            let coordinate = Coordinate::new(latitude, longitude)?;
            check_region(&coordinate, &self.config.region)?
        } else {
            None
        };
        Ok((self.subdivide(latitude, longitude), warning))
    }

    /// Encodes anything exposing a longitude/latitude.
    pub fn encode_position(&self, position: &impl Position) -> Result<PinCell, DigipinError> {
        self.encode(position.lat(), position.lon())
    }

    fn subdivide(&self, latitude: f64, longitude: f64) -> PinCell {
        let levels = self.config.precision_level as usize;
        let mut span = Span::of(&self.config.region);
        let mut code = String::with_capacity(levels);

        for _ in 0..levels {
            let (row, col) = span.locate(latitude, longitude);
            code.push(self.config.alphabet.symbol(row, col));
            span = span.narrow(row, col);
        }

        log::trace!("encoded ({}, {}) as {}", latitude, longitude, code);
        PinCell::new(code, span.to_bounds())
    }

    /// Decodes a code (separators allowed) to its cell.
    ///
    /// With validation disabled the length check is skipped and at most
    /// 10 symbols are read, but unknown symbols are still rejected.
    ///
    /// # Errors
    ///
    /// - [`DigipinError::InvalidFormat`] - wrong length or a symbol outside the alphabet
    pub fn decode(&self, code: &str) -> Result<PinCell, DigipinError> {
        let expected = self
            .config
            .validation_enabled
            .then_some(self.config.precision_level as usize);
        let positions = check_code(code, &self.config.alphabet, expected)?;

        if positions.is_empty() {
            return Err(DigipinError::InvalidFormat {
                code: code.to_string(),
                reason: FormatReason::WrongLength {
                    expected: self.config.precision_level as usize,
                    found: 0,
                },
            });
        }

        let mut span = Span::of(&self.config.region);
        let mut symbols = String::with_capacity(CODE_LENGTH);
        for &(row, col) in positions.iter().take(CODE_LENGTH) {
            symbols.push(self.config.alphabet.symbol(row, col));
            span = span.narrow(row, col);
        }

        Ok(PinCell::new(symbols, span.to_bounds()))
    }

    /// Returns `true` if `code` decodes under this codec.
    pub fn is_valid_code(&self, code: &str) -> bool {
        self.decode(code).is_ok()
    }

    /// Returns `true` if the position lies inside the encodable region.
    pub fn is_within_region(&self, position: &impl Position) -> bool {
        self.config.region.contains(position)
    }

    /// All cells within `radius` grid steps of `code`, excluding the cell itself.
    ///
    /// See [`search::neighbors`].
    pub fn neighbors(
        &self,
        code: &str,
        radius: i64,
    ) -> Result<Annotated<Vec<PinCell>>, DigipinError> {
        let cell = self.decode(code)?;
        search::neighbors(self, &cell, radius)
    }

    /// All cells whose centers lie within `radius_meters` of `center`.
    ///
    /// See [`search::find_in_radius`].
    pub fn find_codes_in_radius(
        &self,
        center: &impl Position,
        radius_meters: f64,
    ) -> Result<Annotated<Vec<PinCell>>, DigipinError> {
        search::find_in_radius(self, center, radius_meters)
    }
}

/// Formats a code for display, inserting separators after symbols 3 and 6.
///
/// Existing separators are ignored; shorter codes get only the separators
/// that fit.
///
/// # Example
/// ```
/// use digipin_rs::format_code;
///
/// assert_eq!(format_code("39J49LL8T4"), "39J-49L-L8T4");
/// assert_eq!(format_code("39J4"), "39J-4");
/// ```
pub fn format_code(code: &str) -> String {
    let mut formatted = String::with_capacity(code.len() + 2);
    for (i, c) in code.chars().filter(|&c| c != SEPARATOR).enumerate() {
        if i == 3 || i == 6 {
            formatted.push(SEPARATOR);
        }
        formatted.push(c);
    }
    formatted
}
