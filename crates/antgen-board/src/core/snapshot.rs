use std::fmt;

use serde::{Deserialize, Serialize};

use super::{BOARD_HEIGHT, BOARD_WIDTH, coordinate::Coordinate};

/// What occupies a cell in a [`BoardSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty,
    Anchor,
    Tunnel,
    Obstacle,
    Food,
    FriendlyUnit,
    EnemyUnit,
    EnemyStructure,
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Anchor => 'A',
            Cell::Tunnel => 'T',
            Cell::Obstacle => '#',
            Cell::Food => 'f',
            Cell::FriendlyUnit => 'u',
            Cell::EnemyUnit => 'e',
            Cell::EnemyStructure => 'X',
        }
    }
}

/// Human-readable picture of a finished game's board.
///
/// The engine fills one in when a game ends; the fittest genome's snapshot is appended
/// to the diagnostic log at every generation boundary. `Display` renders one line per
/// row, `y = 0` first.
///
/// # Example
///
/// ```
/// use antgen_board::{BoardSnapshot, Cell, Coordinate};
///
/// let mut snapshot = BoardSnapshot::EMPTY;
/// snapshot.set(Coordinate::new(0, 0).unwrap(), Cell::Anchor);
/// assert!(snapshot.to_string().starts_with("0 A........."));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    rows: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl BoardSnapshot {
    pub const EMPTY: Self = Self {
        rows: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
    };

    #[must_use]
    pub fn get(&self, c: Coordinate) -> Cell {
        self.rows[usize::from(c.y())][usize::from(c.x())]
    }

    pub fn set(&mut self, c: Coordinate, cell: Cell) {
        self.rows[usize::from(c.y())][usize::from(c.x())] = cell;
    }

    /// Marks every given cell with the same content.
    pub fn fill<I>(&mut self, cells: I, cell: Cell)
    where
        I: IntoIterator<Item = Coordinate>,
    {
        for c in cells {
            self.set(c, cell);
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_WIDTH]> {
        self.rows.iter()
    }

    /// Number of cells holding `cell`.
    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.rows.iter().flatten().filter(|c| **c == cell).count()
    }
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows.iter().enumerate() {
            write!(f, "{y} ")?;
            for cell in row {
                write!(f, "{}", cell.as_char())?;
            }
            writeln!(f)?;
        }
        write!(f, "  0123456789")
    }
}
