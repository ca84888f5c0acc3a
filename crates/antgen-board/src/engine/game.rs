use serde::{Deserialize, Serialize};

use crate::core::{BoardSnapshot, CellSet, Coordinate};

/// Game phase the engine is in when it asks for placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Phase {
    /// Placing the anchor, tunnel and obstacles on the agent's side.
    SetupHome,
    /// Placing the two food targets on the opponent's side.
    SetupAway,
    /// Regular turns; placement requests here get the degenerate default.
    Play,
}

/// Board state handed to [`Player::placement`](crate::Player::placement).
#[derive(Debug, Clone)]
pub struct SetupState {
    pub phase: Phase,
    /// Cells already holding something when the request is made.
    pub occupied: CellSet,
}

impl SetupState {
    #[must_use]
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            occupied: CellSet::EMPTY,
        }
    }

    #[must_use]
    pub fn with_occupied(mut self, occupied: CellSet) -> Self {
        self.occupied = occupied;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MoveKind {
    /// Move one unit along a path.
    Unit,
    /// Spawn a new unit from the anchor.
    Build,
    /// End the turn without acting.
    EndTurn,
}

/// One legal action offered by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub kind: MoveKind,
    pub path: Vec<Coordinate>,
}

impl Move {
    #[must_use]
    pub fn new(kind: MoveKind, path: Vec<Coordinate>) -> Self {
        Self { kind, path }
    }

    #[must_use]
    pub fn end_turn() -> Self {
        Self::new(MoveKind::EndTurn, vec![])
    }

    #[must_use]
    pub fn is_build(&self) -> bool {
        self.kind.is_build()
    }
}

/// Observable state handed to [`Player::choose_move`](crate::Player::choose_move).
#[derive(Debug, Clone)]
pub struct TurnState {
    pub legal_moves: Vec<Move>,
    /// Movable units the agent currently owns.
    pub unit_count: usize,
}

/// Result of one finished game, reported once per game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub won: bool,
    /// Number of moves the game lasted.
    pub move_count: u32,
    /// Terminal board, when the engine can provide one.
    pub final_board: Option<BoardSnapshot>,
}

impl GameOutcome {
    #[must_use]
    pub fn new(won: bool, move_count: u32) -> Self {
        Self {
            won,
            move_count,
            final_board: None,
        }
    }

    #[must_use]
    pub fn with_final_board(mut self, board: BoardSnapshot) -> Self {
        self.final_board = Some(board);
        self
    }
}
