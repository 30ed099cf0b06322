//! Validation for coordinates, codes and search radii.
//!
//! The public functions return a [`Validation`] report and never fail; the
//! crate-internal `check_*` functions carry the same rules as typed results
//! and gate the codec and search.

use crate::coord::{BoundingBox, Coordinate, Position};
use crate::error::{DigipinError, FormatReason};
use crate::index::{
    Alphabet, BOUNDARY_MARGIN_DEGREES, GridConfig, LARGE_RADIUS_METERS, MAX_SEARCH_CELLS, SEPARATOR,
};
use crate::warning::Warning;
use serde::Serialize;

/// Outcome of a validation check.
///
/// A warning is advisory: `valid` stays `true` when only a warning is set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Validation {
    pub valid: bool,
    pub error: Option<String>,
    pub warning: Option<String>,
}

impl Validation {
    fn from_outcome(outcome: Result<Option<Warning>, DigipinError>) -> Self {
        match outcome {
            Ok(warning) => Self {
                valid: true,
                error: None,
                warning: warning.map(|w| w.to_string()),
            },
            Err(e) => Self {
                valid: false,
                error: Some(e.to_string()),
                warning: None,
            },
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Validates a latitude/longitude pair against the global ranges.
///
/// # Examples
///
/// ```
/// use digipin_rs::validate::valid_coordinate;
///
/// assert!(valid_coordinate(28.6139, 77.2090).valid);
/// assert!(!valid_coordinate(95.0, 77.2090).valid);
/// ```
pub fn valid_coordinate(latitude: f64, longitude: f64) -> Validation {
    Validation::from_outcome(Coordinate::new(latitude, longitude).map(|_| None))
}

/// Validates a code string against a configuration's alphabet and precision.
///
/// # Examples
///
/// ```
/// use digipin_rs::GridConfig;
/// use digipin_rs::validate::valid_code;
///
/// let config = GridConfig::default();
/// assert!(valid_code("39J-49L-L8T4", &config).valid);
///
/// let report = valid_code("123", &config);
/// assert!(!report.valid);
/// assert!(report.error.unwrap().contains("length"));
/// ```
pub fn valid_code(code: &str, config: &GridConfig) -> Validation {
    Validation::from_outcome(
        check_code(code, &config.alphabet, Some(config.precision_level as usize)).map(|_| None),
    )
}

/// Checks that a position lies inside `region`, warning when it is close to the edge.
///
/// # Examples
///
/// ```
/// use digipin_rs::REGION_BOUNDS;
/// use digipin_rs::validate::within_region;
///
/// let report = within_region(&(77.2090, 28.6139), &REGION_BOUNDS);
/// assert!(report.valid && report.warning.is_none());
///
/// let edge = within_region(&(63.52, 20.0), &REGION_BOUNDS);
/// assert!(edge.valid && edge.warning.is_some());
///
/// assert!(!within_region(&(0.0, 0.0), &REGION_BOUNDS).valid);
/// ```
pub fn within_region(position: &impl Position, region: &BoundingBox) -> Validation {
    Validation::from_outcome(check_region(position, region))
}

/// Validates a neighbor radius in cells; radii above 100 are capped with a warning.
pub fn valid_radius(radius: i64) -> Validation {
    Validation::from_outcome(check_radius(radius).map(|(_, warning)| warning))
}

/// Validates a search radius in meters.
pub fn valid_distance_radius(meters: f64) -> Validation {
    Validation::from_outcome(check_distance_radius(meters))
}

pub(crate) fn check_region(
    position: &impl Position,
    region: &BoundingBox,
) -> Result<Option<Warning>, DigipinError> {
    if !region.contains(position) {
        return Err(DigipinError::OutOfBounds {
            coordinate: Coordinate::from_position(position)?,
            region: *region,
        });
    }

    let margin = region.edge_margin(position);
    Ok((margin < BOUNDARY_MARGIN_DEGREES).then_some(Warning::NearBoundary {
        margin_degrees: margin,
    }))
}

/// Strips separators and maps each symbol to its grid position.
///
/// The length is checked before the symbols, so a short code is reported as
/// a length problem even if it also holds foreign characters.
pub(crate) fn check_code(
    code: &str,
    alphabet: &Alphabet,
    expected_len: Option<usize>,
) -> Result<Vec<(usize, usize)>, DigipinError> {
    let symbols: Vec<char> = code.chars().filter(|&c| c != SEPARATOR).collect();

    if let Some(expected) = expected_len {
        if symbols.len() != expected {
            return Err(DigipinError::InvalidFormat {
                code: code.to_string(),
                reason: FormatReason::WrongLength {
                    expected,
                    found: symbols.len(),
                },
            });
        }
    }

    symbols
        .iter()
        .map(|&c| {
            alphabet.position(c).ok_or_else(|| DigipinError::InvalidFormat {
                code: code.to_string(),
                reason: FormatReason::InvalidCharacter(c),
            })
        })
        .collect()
}

/// Returns the radius to use, capped at [`MAX_SEARCH_CELLS`].
pub(crate) fn check_radius(radius: i64) -> Result<(u32, Option<Warning>), DigipinError> {
    if radius <= 0 {
        return Err(DigipinError::InvalidRadius(format!(
            "neighbor radius must be a positive number of cells, got {}",
            radius
        )));
    }

    if radius > MAX_SEARCH_CELLS as i64 {
        let warning = Warning::RadiusCapped {
            requested: radius as u64,
            applied: MAX_SEARCH_CELLS,
        };
        return Ok((MAX_SEARCH_CELLS, Some(warning)));
    }

    Ok((radius as u32, None))
}

pub(crate) fn check_distance_radius(meters: f64) -> Result<Option<Warning>, DigipinError> {
    if !meters.is_finite() || meters <= 0.0 {
        return Err(DigipinError::InvalidRadius(format!(
            "search radius must be a positive number of meters, got {}",
            meters
        )));
    }

    Ok((meters > LARGE_RADIUS_METERS).then_some(Warning::LargeRadius { meters }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::REGION_BOUNDS;

    #[test]
    fn test_valid_coordinate() {
        assert_eq!(
            valid_coordinate(28.6139, 77.2090),
            Validation {
                valid: true,
                error: None,
                warning: None
            }
        );

        let bad = valid_coordinate(28.6139, 181.0);
        assert!(!bad.valid);
        assert!(bad.error.is_some());
    }

    #[test]
    fn test_valid_code_reports_reason() {
        let config = GridConfig::default();

        let length = valid_code("123", &config);
        assert!(!length.valid);
        assert!(length.error.unwrap_or_default().contains("invalid length"));

        let character = valid_code("1234567890", &config);
        assert!(!character.valid);
        assert!(character.error.unwrap_or_default().contains("invalid character '1'"));

        assert!(valid_code("39J49LL8T4", &config).valid);
    }

    #[test]
    fn test_valid_code_uses_precision() {
        let config = GridConfig::new().precision_level(3);
        assert!(valid_code("39J", &config).valid);
        assert!(!valid_code("39J49LL8T4", &config).valid);
    }

    #[test]
    fn test_within_region_boundary_warning() {
        let inside = within_region(&(77.2090, 28.6139), &REGION_BOUNDS);
        assert!(inside.valid);
        assert!(inside.warning.is_none());

        let near = within_region(&(99.45, 20.0), &REGION_BOUNDS);
        assert!(near.valid);
        assert!(near.warning.unwrap_or_default().contains("near region boundary"));

        let outside = within_region(&(0.0, 0.0), &REGION_BOUNDS);
        assert!(!outside.valid);
        assert!(outside.error.unwrap_or_default().contains("outside the region"));
    }

    #[test]
    fn test_within_region_invalid_coordinate() {
        let report = within_region(&(200.0, 20.0), &REGION_BOUNDS);
        assert!(!report.valid);
        assert!(report.error.unwrap_or_default().contains("Invalid coordinate"));
    }

    #[test]
    fn test_valid_radius() {
        assert!(valid_radius(1).valid);
        assert!(valid_radius(100).warning.is_none());

        let capped = valid_radius(250);
        assert!(capped.valid);
        assert!(capped.warning.is_some());

        assert!(!valid_radius(0).valid);
        assert!(!valid_radius(-3).valid);
    }

    #[test]
    fn test_check_radius_caps() -> Result<(), DigipinError> {
        assert_eq!(check_radius(5)?, (5, None));
        let (applied, warning) = check_radius(1000)?;
        assert_eq!(applied, MAX_SEARCH_CELLS);
        assert_eq!(
            warning,
            Some(Warning::RadiusCapped {
                requested: 1000,
                applied: MAX_SEARCH_CELLS
            })
        );
        Ok(())
    }

    #[test]
    fn test_valid_distance_radius() {
        assert!(valid_distance_radius(10.0).valid);
        assert!(valid_distance_radius(5_000_000.0).warning.is_some());
        assert!(!valid_distance_radius(0.0).valid);
        assert!(!valid_distance_radius(-1.0).valid);
        assert!(!valid_distance_radius(f64::NAN).valid);
        assert!(!valid_distance_radius(f64::INFINITY).valid);
    }

    #[test]
    fn test_check_code_positions() -> Result<(), DigipinError> {
        let positions = check_code("F-T", &Alphabet::default(), None)?;
        assert_eq!(positions, vec![(0, 0), (3, 3)]);
        Ok(())
    }
}
