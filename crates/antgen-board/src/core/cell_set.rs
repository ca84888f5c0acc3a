use std::fmt;

use serde::{Deserialize, Serialize};

use super::{BOARD_HEIGHT, BOARD_WIDTH, coordinate::Coordinate};

const CELL_COUNT: usize = BOARD_WIDTH * BOARD_HEIGHT;
const ALL_CELLS_MASK: u128 = (1 << CELL_COUNT) - 1;

/// Set of board cells stored as a 100-bit mask.
///
/// Bit `i` is the cell with row-major index `i` (see [`Coordinate::index`]). Used for
/// the forbidden target cells and for the occupancy the engine reports during setup.
///
/// Serializes as a list of coordinates so it can be written by hand in configuration
/// files.
///
/// # Example
///
/// ```
/// use antgen_board::{CellSet, Coordinate};
///
/// let mut set = CellSet::EMPTY;
/// let c = Coordinate::new(2, 8).unwrap();
/// set.insert(c);
/// assert!(set.contains(c));
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Coordinate>", into = "Vec<Coordinate>")]
pub struct CellSet {
    bits: u128,
}

impl CellSet {
    pub const EMPTY: Self = Self { bits: 0 };
    pub const FULL: Self = Self {
        bits: ALL_CELLS_MASK,
    };

    #[must_use]
    pub const fn contains(&self, c: Coordinate) -> bool {
        self.bits & (1 << c.index()) != 0
    }

    /// Adds a cell, returning `true` if it was not present.
    pub fn insert(&mut self, c: Coordinate) -> bool {
        let was_absent = !self.contains(c);
        self.bits |= 1 << c.index();
        was_absent
    }

    /// Removes a cell, returning `true` if it was present.
    pub fn remove(&mut self, c: Coordinate) -> bool {
        let was_present = self.contains(c);
        self.bits &= !(1 << c.index());
        was_present
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Iterates over the cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Coordinate> + '_ {
        Coordinate::all().filter(|c| self.contains(*c))
    }

    /// Creates a `CellSet` from ASCII art for testing.
    ///
    /// `'#'` marks a member cell and `'.'` an empty one; other characters are ignored.
    /// Rows are listed from `y = 0` downward and each must hold exactly 10 cells. Rows
    /// after the last given line are empty.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut set = Self::EMPTY;
        let lines = art.lines().filter(|line| !line.trim().is_empty());
        for (y, line) in lines.enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                cells.len(),
                BOARD_WIDTH,
                "Each row must have exactly {BOARD_WIDTH} cells, got {} at row {y}",
                cells.len(),
            );
            for (x, &ch) in cells.iter().enumerate() {
                if ch == '#' {
                    set.insert(Coordinate::from_index(y * BOARD_WIDTH + x));
                }
            }
        }
        set
    }
}

impl FromIterator<Coordinate> for CellSet {
    fn from_iter<T: IntoIterator<Item = Coordinate>>(iter: T) -> Self {
        let mut set = Self::EMPTY;
        for c in iter {
            set.insert(c);
        }
        set
    }
}

impl Extend<Coordinate> for CellSet {
    fn extend<T: IntoIterator<Item = Coordinate>>(&mut self, iter: T) {
        for c in iter {
            self.insert(c);
        }
    }
}

impl From<Vec<Coordinate>> for CellSet {
    fn from(cells: Vec<Coordinate>) -> Self {
        cells.into_iter().collect()
    }
}

impl From<CellSet> for Vec<Coordinate> {
    fn from(set: CellSet) -> Self {
        set.iter().collect()
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
