//! Placement genomes and their legality rules.
//!
//! A [`Genome`] is a fixed sequence of 13 [`Symbol`]s, each naming one board cell:
//!
//! | position | role | meaning |
//! |---|---|---|
//! | 0 | home | colony anchor |
//! | 1 | home | tunnel |
//! | 2–10 | home | obstacles |
//! | 11–12 | target | food placed on the opponent's side |
//!
//! The engine consumes the cells positionally, so only the order matters to it.
//!
//! # Validity
//!
//! A genome is valid when all 13 symbols are distinct and both target genes lie in the
//! away region outside the forbidden set (see [`Genome::is_valid`]). Home genes are kept
//! in the home region by construction: sampling and mutation never move them out.
//!
//! # Sampling
//!
//! [`sample_cell`] draws a legal cell for a role with a bounded number of random
//! attempts and then falls back to scanning the region, so it always terminates and
//! fails only when no legal cell is left. Initialization ([`Genome::random`]) and the
//! breeder's repair pass both use it.

use std::{fmt, ops::Range, str::FromStr};

use antgen_board::{CellSet, Coordinate, InvalidSymbolError, Region, Symbol};
use rand::{Rng, seq::IndexedRandom as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of symbols in a genome.
pub const GENOME_LEN: usize = 13;
/// Positions of the home genes (anchor, tunnel, obstacles).
pub const HOME_GENES: Range<usize> = 0..11;
/// Positions of the target genes (food on the opponent's side).
pub const TARGET_GENES: Range<usize> = 11..GENOME_LEN;
/// Number of target genes.
pub const TARGET_COUNT: usize = TARGET_GENES.end - TARGET_GENES.start;

pub const ANCHOR: usize = 0;
pub const TUNNEL: usize = 1;

/// Which region a gene must stay in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GeneRole {
    #[display("home")]
    Home,
    #[display("target")]
    Target,
}

impl GeneRole {
    #[must_use]
    pub fn of_position(position: usize) -> Self {
        assert!(position < GENOME_LEN, "gene position out of range: {position}");
        if HOME_GENES.contains(&position) {
            Self::Home
        } else {
            Self::Target
        }
    }

    #[must_use]
    pub fn region(self) -> Region {
        match self {
            Self::Home => Region::Home,
            Self::Target => Region::Away,
        }
    }

    /// Whether a gene of this role may sit on `cell`, ignoring other genes.
    #[must_use]
    pub fn allows(self, cell: Coordinate, forbidden: &CellSet) -> bool {
        match self {
            Self::Home => Region::Home.contains(cell),
            Self::Target => Region::Away.contains(cell) && !forbidden.contains(cell),
        }
    }
}

/// No legal cell is left for a gene.
///
/// Raised when the forbidden set and the genome's other genes exhaust the region a
/// gene must be placed in. This is a configuration problem, not a transient one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no legal {role} cell left for gene {position}")]
pub struct RepairError {
    pub position: usize,
    pub role: GeneRole,
}

/// Draws a cell for a gene of `role` that is not in `taken`.
///
/// Tries up to `max_attempts` uniform draws from the role's region, then picks uniformly
/// among the remaining legal cells. Returns `None` only when none remain.
pub fn sample_cell<R>(
    rng: &mut R,
    role: GeneRole,
    taken: &CellSet,
    forbidden: &CellSet,
    max_attempts: usize,
) -> Option<Coordinate>
where
    R: Rng + ?Sized,
{
    let is_legal = |c: Coordinate| role.allows(c, forbidden) && !taken.contains(c);
    let rows = role.region().rows();
    for _ in 0..max_attempts {
        let x = rng.random_range(0..10);
        let y = rng.random_range(rows.clone());
        let Ok(c) = Coordinate::new(x, y) else {
            continue;
        };
        if is_legal(c) {
            return Some(c);
        }
    }

    let candidates: Vec<Coordinate> = role.region().cells().filter(|c| is_legal(*c)).collect();
    candidates.choose(rng).copied()
}

/// Fixed-length placement genome.
///
/// The text form lists the 13 cells as two-digit indices joined by `-`, anchor first
/// (see [`Symbol`]). It is also the serialized form.
///
/// # Example
///
/// ```
/// use antgen_board::{CellSet, Coordinate};
/// use antgen_training::genome::Genome;
///
/// let genome: Genome = "00-01-02-03-04-05-06-07-08-09-10-60-61".parse().unwrap();
/// assert_eq!(genome.anchor(), Coordinate::new(0, 0).unwrap());
/// assert!(genome.is_valid(&CellSet::EMPTY));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Genome([Symbol; GENOME_LEN]);

impl Genome {
    #[must_use]
    pub const fn from_symbols(symbols: [Symbol; GENOME_LEN]) -> Self {
        Self(symbols)
    }

    #[must_use]
    pub fn from_cells(cells: [Coordinate; GENOME_LEN]) -> Self {
        Self(cells.map(Symbol::from))
    }

    /// Samples a genome whose genes each satisfy their role and are pairwise distinct.
    pub fn random<R>(
        rng: &mut R,
        forbidden: &CellSet,
        max_attempts: usize,
    ) -> Result<Self, RepairError>
    where
        R: Rng + ?Sized,
    {
        let mut taken = CellSet::EMPTY;
        let mut symbols = [Symbol::from(Coordinate::ORIGIN); GENOME_LEN];
        for (position, symbol) in symbols.iter_mut().enumerate() {
            let role = GeneRole::of_position(position);
            let cell = sample_cell(rng, role, &taken, forbidden, max_attempts)
                .ok_or(RepairError { position, role })?;
            taken.insert(cell);
            *symbol = cell.into();
        }
        Ok(Self(symbols))
    }

    #[must_use]
    pub const fn symbols(&self) -> &[Symbol; GENOME_LEN] {
        &self.0
    }

    #[must_use]
    pub fn cell(&self, position: usize) -> Coordinate {
        self.0[position].decode()
    }

    pub fn set_cell(&mut self, position: usize, cell: Coordinate) {
        self.0[position] = cell.into();
    }

    pub(crate) fn symbols_mut(&mut self) -> &mut [Symbol; GENOME_LEN] {
        &mut self.0
    }

    #[must_use]
    pub fn anchor(&self) -> Coordinate {
        self.cell(ANCHOR)
    }

    #[must_use]
    pub fn tunnel(&self) -> Coordinate {
        self.cell(TUNNEL)
    }

    /// Cells of the home genes in genome order: anchor, tunnel, then obstacles.
    pub fn home_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.0[HOME_GENES].iter().map(|s| s.decode())
    }

    pub fn obstacle_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.0[TUNNEL + 1..HOME_GENES.end].iter().map(|s| s.decode())
    }

    pub fn target_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.0[TARGET_GENES].iter().map(|s| s.decode())
    }

    /// Cells used by every gene except the one at `position`.
    #[must_use]
    pub fn cells_except(&self, position: usize) -> CellSet {
        self.0
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != position)
            .map(|(_, s)| s.decode())
            .collect()
    }

    /// Whether the symbol at `position` repeats an earlier one.
    #[must_use]
    pub fn is_duplicate_at(&self, position: usize) -> bool {
        self.0[..position].contains(&self.0[position])
    }

    #[must_use]
    pub fn has_distinct_symbols(&self) -> bool {
        (1..GENOME_LEN).all(|position| !self.is_duplicate_at(position))
    }

    /// Checks the placement legality invariants.
    ///
    /// Valid iff all 13 symbols are pairwise distinct and each target gene decodes to an
    /// away-region cell outside `forbidden`.
    #[must_use]
    pub fn is_valid(&self, forbidden: &CellSet) -> bool {
        self.has_distinct_symbols()
            && self
                .target_cells()
                .all(|c| GeneRole::Target.allows(c, forbidden))
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ParseGenomeError {
    #[display("expected {GENOME_LEN} cells, got {_0}")]
    #[from(ignore)]
    WrongLength(#[error(not(source))] usize),
    #[display("{_0}")]
    InvalidSymbol(InvalidSymbolError),
}

impl FromStr for Genome {
    type Err = ParseGenomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        let parts: [&str; GENOME_LEN] = parts
            .as_slice()
            .try_into()
            .map_err(|_| ParseGenomeError::WrongLength(parts.len()))?;
        let mut symbols = [Symbol::from(Coordinate::ORIGIN); GENOME_LEN];
        for (symbol, part) in symbols.iter_mut().zip(parts) {
            *symbol = part.parse()?;
        }
        Ok(Self(symbols))
    }
}

impl Serialize for Genome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Genome {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid genome: {s} ({e})")))
    }
}
