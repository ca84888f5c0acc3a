//! Game agent backed by the genetic placement search.
//!
//! [`GeneticPlayer`] implements the engine's [`Player`](antgen_board::Player) callbacks:
//!
//! - **Placement** - decoded from the genome currently under evaluation
//! - **Moves and attacks** - uniform random choices from [`RandomPolicy`], with build
//!   moves avoided once the agent has enough units
//! - **Outcomes** - forwarded to the population manager as fitness samples
//!
//! Nothing is learned about in-game play; only the placement genome evolves.

pub use self::{genetic_player::*, policy::*};

mod genetic_player;
mod policy;
