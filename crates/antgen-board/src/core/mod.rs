//! Board geometry and cell encodings.
//!
//! - [`Coordinate`] / [`Region`] - cells of the 10×10 board and the home/neutral/away bands
//! - [`Symbol`] - one-byte encoding of a cell used by placement genomes
//! - [`CellSet`] - 100-bit set of cells (forbidden targets, occupancy)
//! - [`BoardSnapshot`] - printable picture of a finished game

pub use self::{cell_set::*, coordinate::*, snapshot::*, symbol::*};

pub(crate) mod cell_set;
pub(crate) mod coordinate;
pub(crate) mod snapshot;
pub(crate) mod symbol;

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 10;
