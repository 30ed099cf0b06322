use crate::error::DigipinError;
use crate::index::constants::{DEFAULT_SYMBOLS, GRID_DIMENSION, SEPARATOR};
use serde::{Deserialize, Serialize};

/// The 16 symbols of the 4x4 grid, in row-major order from the northwest cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    symbols: [char; 16],
}

impl Alphabet {
    /// Builds an alphabet from exactly 16 distinct characters.
    ///
    /// The separator `-` and whitespace are not allowed.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::Alphabet;
    ///
    /// let alphabet = Alphabet::new("FC98J327K456LMPT").unwrap();
    /// assert_eq!(alphabet.symbol(3, 3), 'T');
    /// assert_eq!(alphabet.position('J'), Some((1, 0)));
    ///
    /// assert!(Alphabet::new("AABBCC").is_err());
    /// ```
    pub fn new(symbols: &str) -> Result<Self, DigipinError> {
        let chars: Vec<char> = symbols.chars().collect();
        let symbols: [char; 16] = chars.as_slice().try_into().map_err(|_| {
            DigipinError::InvalidAlphabet(format!("expected 16 symbols, found {}", chars.len()))
        })?;

        for (i, &c) in symbols.iter().enumerate() {
            if c == SEPARATOR || c.is_whitespace() {
                return Err(DigipinError::InvalidAlphabet(format!(
                    "symbol '{}' is reserved",
                    c
                )));
            }
            if symbols[..i].contains(&c) {
                return Err(DigipinError::InvalidAlphabet(format!(
                    "symbol '{}' appears more than once",
                    c
                )));
            }
        }

        Ok(Self { symbols })
    }

    /// Symbol at grid position `(row, col)`; row 0 is the northern band.
    ///
    /// `row` and `col` must be below 4.
    pub fn symbol(&self, row: usize, col: usize) -> char {
        self.symbols[row * GRID_DIMENSION + col]
    }

    /// Grid position `(row, col)` of a symbol, if it belongs to the alphabet.
    pub fn position(&self, symbol: char) -> Option<(usize, usize)> {
        self.symbols
            .iter()
            .position(|&c| c == symbol)
            .map(|idx| (idx / GRID_DIMENSION, idx % GRID_DIMENSION))
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    pub fn symbols(&self) -> &[char; 16] {
        &self.symbols
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS,
        }
    }
}

impl TryFrom<String> for Alphabet {
    type Error = DigipinError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Alphabet::new(&value)
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.symbols.iter().collect()
    }
}
