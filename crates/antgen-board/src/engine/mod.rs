//! Boundary with the external game engine.
//!
//! The engine owns the rules: it enumerates legal moves, resolves turns and decides who
//! wins. An agent plugs in by implementing [`Player`], whose four callbacks receive the
//! small observable views defined here:
//!
//! - [`SetupState`] - phase and occupied cells during initial placement
//! - [`TurnState`] - legal moves and unit count during play
//! - [`GameOutcome`] - win flag, move count and optional terminal board
//!
//! # Game Flow
//!
//! 1. The engine calls [`Player::placement`] for [`Phase::SetupHome`] and then
//!    [`Phase::SetupAway`]
//! 2. Each turn it calls [`Player::choose_move`], and [`Player::choose_attack`] when a
//!    unit can attack
//! 3. When the game ends it calls [`Player::register_outcome`] exactly once

pub use self::{game::*, player::*};

mod game;
mod player;
