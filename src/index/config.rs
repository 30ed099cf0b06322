use crate::coord::BoundingBox;
use crate::error::DigipinError;
use crate::index::alphabet::Alphabet;
use crate::index::constants::{MAX_PRECISION_LEVEL, REGION_BOUNDS};
use serde::{Deserialize, Serialize};

/// Configuration for a [`GridCodec`](crate::GridCodec).
///
/// Every field has a default, so partial JSON documents are accepted.
///
/// # Example
/// ```
/// use digipin_rs::GridConfig;
///
/// let config = GridConfig::new().precision_level(6).validation(false);
/// assert_eq!(config.precision_level, 6);
///
/// let parsed = GridConfig::from_json(r#"{"precision_level": 8}"#).unwrap();
/// assert_eq!(parsed.precision_level, 8);
/// assert!(parsed.validation_enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Reject out-of-region coordinates and malformed codes (default `true`).
    pub validation_enabled: bool,
    /// Number of subdivision levels, 1-10 (default 10).
    pub precision_level: u8,
    /// The encodable region.
    pub region: BoundingBox,
    /// Symbols for the 4x4 grid.
    pub alphabet: Alphabet,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            validation_enabled: true,
            precision_level: MAX_PRECISION_LEVEL,
            region: REGION_BOUNDS,
            alphabet: Alphabet::default(),
        }
    }
}

impl GridConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validation(mut self, enabled: bool) -> Self {
        self.validation_enabled = enabled;
        self
    }

    pub fn precision_level(mut self, level: u8) -> Self {
        self.precision_level = level;
        self
    }

    pub fn region(mut self, region: BoundingBox) -> Self {
        self.region = region;
        self
    }

    pub fn alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Checks the fields that cannot be enforced by their types.
    pub fn validate(&self) -> Result<(), DigipinError> {
        if self.precision_level == 0 || self.precision_level > MAX_PRECISION_LEVEL {
            return Err(DigipinError::InvalidPrecision(self.precision_level));
        }
        if self.region.width() <= 0.0 || self.region.height() <= 0.0 {
            return Err(DigipinError::InvalidBounds(format!(
                "region {} has zero area",
                self.region
            )));
        }
        Ok(())
    }

    /// Parses a configuration from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self, DigipinError> {
        let config: GridConfig =
            serde_json::from_str(json).map_err(|e| DigipinError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, DigipinError> {
        serde_json::to_string_pretty(self).map_err(|e| DigipinError::ConfigError(e.to_string()))
    }
}
