use std::{fmt, str::FromStr};

use crate::{InvalidSymbolError, OutOfBoardError};

use super::{BOARD_HEIGHT, BOARD_WIDTH, coordinate::Coordinate};

/// Compact one-byte encoding of a board cell.
///
/// A symbol is `y * 10 + x + OFFSET` with `OFFSET = 65`. The byte value is an
/// implementation detail; the genetic operators work on the decoded [`Coordinate`].
///
/// The text form is the two-digit row-major cell index (`"73"` is `x = 3, y = 7`),
/// which keeps genomes readable in logs and model files.
///
/// # Example
///
/// ```
/// use antgen_board::{Coordinate, Symbol};
///
/// let symbol = Symbol::encode(3, 7).unwrap();
/// assert_eq!(symbol.decode(), Coordinate::new(3, 7).unwrap());
/// assert_eq!(symbol.to_string(), "73");
/// assert_eq!("73".parse::<Symbol>().unwrap(), symbol);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u8);

impl Symbol {
    pub const OFFSET: u8 = 65;

    #[expect(clippy::cast_possible_truncation)]
    const END: u8 = Self::OFFSET + (BOARD_WIDTH * BOARD_HEIGHT) as u8;

    /// Encodes a cell, failing when `(x, y)` is outside the board.
    pub fn encode(x: u8, y: u8) -> Result<Self, OutOfBoardError> {
        Coordinate::new(x, y).map(Self::from_coord)
    }

    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub const fn from_coord(c: Coordinate) -> Self {
        Self(c.index() as u8 + Self::OFFSET)
    }

    #[must_use]
    pub const fn decode(self) -> Coordinate {
        Coordinate::from_index((self.0 - Self::OFFSET) as usize)
    }

    /// Raw byte value, including the offset.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl From<Coordinate> for Symbol {
    fn from(c: Coordinate) -> Self {
        Self::from_coord(c)
    }
}

impl From<Symbol> for Coordinate {
    fn from(symbol: Symbol) -> Self {
        symbol.decode()
    }
}

impl TryFrom<u8> for Symbol {
    type Error = InvalidSymbolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::OFFSET..Self::END).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidSymbolError(format!("byte {value}")))
        }
    }
}

impl FromStr for Symbol {
    type Err = InvalidSymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidSymbolError(s.to_owned()));
        }
        let index = s
            .parse::<u8>()
            .map_err(|_| InvalidSymbolError(s.to_owned()))?;
        Self::try_from(index + Self::OFFSET)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.decode().index())
    }
}
