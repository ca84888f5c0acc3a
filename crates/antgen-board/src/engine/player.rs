use crate::core::Coordinate;

use super::game::{GameOutcome, Move, SetupState, TurnState};

/// Callbacks the game engine makes into an agent.
///
/// The engine drives the game; the agent only answers. A game is played to completion
/// between two [`register_outcome`](Player::register_outcome) calls, so an implementation
/// may mutate its state freely in each callback without locking.
pub trait Player {
    /// Error raised while processing a game outcome.
    type Error;

    /// Returns the cells to place structures on for the current setup phase.
    ///
    /// For [`Phase::SetupHome`](super::Phase::SetupHome) the engine consumes the list
    /// positionally: anchor first, tunnel second, then obstacles.
    fn placement(&mut self, state: &SetupState) -> Vec<Coordinate>;

    /// Picks one of the legal moves, or `None` if there are none.
    fn choose_move(&mut self, state: &TurnState) -> Option<Move>;

    /// Picks the enemy to attack, or `None` if there are none.
    fn choose_attack(&mut self, targets: &[Coordinate]) -> Option<Coordinate>;

    /// Reports the result of the game that just ended.
    fn register_outcome(&mut self, outcome: GameOutcome) -> Result<(), Self::Error>;
}
