//! Uniform random in-game policy.
//!
//! The agent does not learn how to play: once the placement is made, moves and attacks
//! are chosen uniformly at random. The only rule is a build cap. Once the agent owns
//! [`BUILD_CAP`] units, build moves are skipped as long as any other move exists.

use antgen_board::{Coordinate, Move, TurnState};
use rand::{Rng, SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg64;

/// Unit count from which build moves are avoided.
pub const BUILD_CAP: usize = 3;

#[derive(Debug, Clone)]
pub struct RandomPolicy<R = Pcg64> {
    rng: R,
}

impl RandomPolicy<Pcg64> {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(Pcg64::seed_from_u64(seed))
    }

    /// Policy seeded from the thread RNG.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(Pcg64::from_rng(&mut rand::rng()))
    }
}

impl<R> RandomPolicy<R>
where
    R: Rng,
{
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Picks a legal move; `None` only when there are no legal moves.
    pub fn choose_move(&mut self, state: &TurnState) -> Option<Move> {
        if state.unit_count >= BUILD_CAP {
            let non_build: Vec<&Move> = state.legal_moves.iter().filter(|m| !m.is_build()).collect();
            if let Some(m) = non_build.choose(&mut self.rng) {
                return Some((*m).clone());
            }
        }
        state.legal_moves.choose(&mut self.rng).cloned()
    }

    pub fn choose_attack(&mut self, targets: &[Coordinate]) -> Option<Coordinate> {
        targets.choose(&mut self.rng).copied()
    }
}
