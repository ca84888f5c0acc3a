use std::{fmt, ops::RangeInclusive};

use serde::{Deserialize, Serialize};

use crate::OutOfBoardError;

use super::{BOARD_HEIGHT, BOARD_WIDTH};

/// A cell on the 10×10 board.
///
/// `x` runs left to right, `y` runs from the agent's back row (`y = 0`) toward the
/// opponent's back row (`y = 9`). A `Coordinate` is always on the board; use
/// [`Coordinate::new`] to construct one from untrusted values.
///
/// # Example
///
/// ```
/// use antgen_board::{Coordinate, Region};
///
/// let c = Coordinate::new(3, 7).unwrap();
/// assert_eq!(c.region(), Region::Away);
/// assert!(Coordinate::new(10, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate", into = "RawCoordinate")]
pub struct Coordinate {
    x: u8,
    y: u8,
}

#[derive(Serialize, Deserialize)]
struct RawCoordinate {
    x: u8,
    y: u8,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = OutOfBoardError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.x, raw.y)
    }
}

impl From<Coordinate> for RawCoordinate {
    fn from(c: Coordinate) -> Self {
        Self { x: c.x, y: c.y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Coordinate {
    /// Origin cell, also the engine's degenerate placement.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: u8, y: u8) -> Result<Self, OutOfBoardError> {
        if usize::from(x) >= BOARD_WIDTH || usize::from(y) >= BOARD_HEIGHT {
            return Err(OutOfBoardError { x, y });
        }
        Ok(Self { x, y })
    }

    /// Builds a coordinate from a row-major cell index in `0..100`.
    #[expect(clippy::cast_possible_truncation)]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index < BOARD_WIDTH * BOARD_HEIGHT);
        Self {
            x: (index % BOARD_WIDTH) as u8,
            y: (index / BOARD_WIDTH) as u8,
        }
    }

    /// Row-major cell index in `0..100`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.y as usize * BOARD_WIDTH + self.x as usize
    }

    #[must_use]
    pub const fn x(self) -> u8 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Moves the coordinate by `(dx, dy)`, returning `None` when the result leaves the board.
    #[must_use]
    pub fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Self::new(x, y).ok()
    }

    #[must_use]
    pub fn region(self) -> Region {
        Region::of_row(self.y)
    }

    /// Chebyshev distance (king moves) between two cells.
    #[must_use]
    pub fn distance(self, other: Self) -> u8 {
        u8::max(self.x.abs_diff(other.x), self.y.abs_diff(other.y))
    }

    /// Iterates over every cell of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_WIDTH * BOARD_HEIGHT).map(Self::from_index)
    }
}

/// Horizontal band of the board a cell belongs to.
///
/// Rows 0–3 belong to the agent ([`Region::Home`]), rows 6–9 to the opponent
/// ([`Region::Away`]). Nothing may be placed in the two neutral rows between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Region {
    Home,
    Neutral,
    Away,
}

impl Region {
    const HOME_ROWS: RangeInclusive<u8> = 0..=3;
    const AWAY_ROWS: RangeInclusive<u8> = 6..=9;

    #[must_use]
    pub fn of_row(y: u8) -> Self {
        if Self::HOME_ROWS.contains(&y) {
            Self::Home
        } else if Self::AWAY_ROWS.contains(&y) {
            Self::Away
        } else {
            Self::Neutral
        }
    }

    /// Rows spanned by this region.
    #[must_use]
    pub fn rows(self) -> RangeInclusive<u8> {
        match self {
            Self::Home => Self::HOME_ROWS,
            Self::Neutral => 4..=5,
            Self::Away => Self::AWAY_ROWS,
        }
    }

    #[must_use]
    pub fn contains(self, c: Coordinate) -> bool {
        self.rows().contains(&c.y())
    }

    /// Iterates over the cells of this region in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Coordinate> {
        Coordinate::all().filter(move |c| self.contains(*c))
    }
}
