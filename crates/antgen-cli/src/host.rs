//! Stand-in game host for offline training runs.
//!
//! The real game engine is not part of this workspace. [`SimulatedHost`] plays a small
//! stochastic game through the same [`Player`] callbacks so the evolution loop can run
//! end to end:
//!
//! 1. Home placement: anchor, tunnel and obstacles are put on the board
//! 2. Away placement: the forbidden set and a few random away cells are occupied by enemy
//!    structures before the player picks its targets
//! 3. Turns: the player moves and builds units and attacks enemy units that come within
//!    reach
//! 4. Outcome: the winner is drawn with a probability biased by the placement, and the
//!    move count from a normal distribution
//!
//! The bias rewards an anchor far from the front line, a tunnel next to the anchor,
//! targets far from the center of the enemy side, and enemy units destroyed. It exists
//! only so that evolution has something to climb.

use antgen_board::{
    BoardSnapshot, Cell, CellSet, Coordinate, GameOutcome, Move, MoveKind, Phase, Player, Region,
    SetupState, TurnState,
};
use anyhow::Context as _;
use arrayvec::ArrayVec;
use rand::{Rng, SeedableRng as _, seq::IndexedRandom as _};
use rand_distr::{Distribution as _, Normal};
use rand_pcg::Pcg64;

/// Units the player can own at once.
pub const MAX_UNITS: usize = 6;
const ENEMY_UNITS: usize = 3;
/// Random away cells occupied before the away placement, besides the forbidden set.
const BLOCKED_AWAY_CELLS: usize = 3;

const MOVE_COUNT_MEAN: f64 = 120.0;
const MOVE_COUNT_STD_DEV: f64 = 40.0;
const ATTACK_HIT_PROBABILITY: f64 = 0.5;

/// Center of the away region, between rows 7 and 8 and columns 4 and 5.
const AWAY_CENTER: (f64, f64) = (4.5, 7.5);

#[derive(Debug)]
pub struct SimulatedHost<R = Pcg64> {
    rng: R,
    forbidden: CellSet,
    max_turns: u32,
    move_count: Normal<f64>,
}

impl SimulatedHost<Pcg64> {
    pub fn seeded(seed: u64, forbidden: CellSet, max_turns: u32) -> anyhow::Result<Self> {
        Self::new(Pcg64::seed_from_u64(seed), forbidden, max_turns)
    }

    pub fn from_entropy(forbidden: CellSet, max_turns: u32) -> anyhow::Result<Self> {
        Self::new(Pcg64::from_rng(&mut rand::rng()), forbidden, max_turns)
    }
}

impl<R> SimulatedHost<R>
where
    R: Rng,
{
    pub fn new(rng: R, forbidden: CellSet, max_turns: u32) -> anyhow::Result<Self> {
        let move_count = Normal::new(MOVE_COUNT_MEAN, MOVE_COUNT_STD_DEV)
            .context("Invalid move count distribution")?;
        Ok(Self {
            rng,
            forbidden,
            max_turns,
            move_count,
        })
    }

    /// Plays one game and reports its outcome to `player`.
    pub fn play<P>(&mut self, player: &mut P) -> Result<GameOutcome, P::Error>
    where
        P: Player,
    {
        let mut board = BoardSnapshot::EMPTY;

        let home = player.placement(&SetupState::new(Phase::SetupHome));
        for (i, cell) in home.iter().enumerate() {
            if !Region::Home.contains(*cell) {
                continue;
            }
            let mark = match i {
                0 => Cell::Anchor,
                1 => Cell::Tunnel,
                _ => Cell::Obstacle,
            };
            board.set(*cell, mark);
        }
        let anchor = home.first().copied().unwrap_or(Coordinate::ORIGIN);
        let tunnel = home.get(1).copied();

        let occupied = self.block_away_cells();
        board.fill(occupied.iter(), Cell::EnemyStructure);
        let away = player.placement(&SetupState::new(Phase::SetupAway).with_occupied(occupied));
        let targets: Vec<Coordinate> = away
            .into_iter()
            .filter(|cell| Region::Away.contains(*cell) && !occupied.contains(*cell))
            .collect();
        board.fill(targets.iter().copied(), Cell::Food);

        let mut enemies: ArrayVec<Coordinate, ENEMY_UNITS> = ArrayVec::new();
        while !enemies.is_full() {
            let x = self.rng.random_range(0..10);
            let y = self.rng.random_range(Region::Neutral.rows());
            if let Ok(cell) = Coordinate::new(x, y)
                && !enemies.contains(&cell)
            {
                enemies.push(cell);
            }
        }

        let mut units: ArrayVec<Coordinate, MAX_UNITS> = ArrayVec::new();
        let mut kills = 0;
        let mut turns = 0;
        while turns < self.max_turns && !enemies.is_empty() {
            turns += 1;
            let state = TurnState {
                legal_moves: legal_moves(&board, anchor, &units),
                unit_count: units.len(),
            };
            let Some(m) = player.choose_move(&state) else {
                break;
            };
            apply_move(&m, &mut units);

            let in_reach: Vec<Coordinate> = enemies
                .iter()
                .copied()
                .filter(|e| units.iter().any(|u| u.distance(*e) <= 1))
                .collect();
            if let Some(target) = player.choose_attack(&in_reach)
                && self.rng.random_bool(ATTACK_HIT_PROBABILITY)
            {
                enemies.retain(|e| *e != target);
                kills += 1;
            }
        }

        for unit in &units {
            if board.get(*unit).is_empty() {
                board.set(*unit, Cell::FriendlyUnit);
            }
        }
        board.fill(enemies.iter().copied(), Cell::EnemyUnit);

        let p = win_probability(anchor, tunnel, &targets, kills);
        let won = self.rng.random_bool(p);
        let extra = self.move_count.sample(&mut self.rng).max(0.0).round();
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let move_count = turns + extra as u32;

        let outcome = GameOutcome::new(won, move_count).with_final_board(board);
        player.register_outcome(outcome.clone())?;
        Ok(outcome)
    }

    fn block_away_cells(&mut self) -> CellSet {
        let free: Vec<Coordinate> = Region::Away
            .cells()
            .filter(|cell| !self.forbidden.contains(*cell))
            .collect();
        let mut occupied = self.forbidden;
        occupied.extend(free.choose_multiple(&mut self.rng, BLOCKED_AWAY_CELLS).copied());
        occupied
    }
}

fn legal_moves(board: &BoardSnapshot, anchor: Coordinate, units: &[Coordinate]) -> Vec<Move> {
    let mut moves = vec![];
    if units.len() < MAX_UNITS {
        moves.push(Move::new(MoveKind::Build, vec![anchor]));
    }
    for unit in units {
        for dy in -1..=1 {
            for dx in -1..=1 {
                let Some(to) = unit.offset(dx, dy) else {
                    continue;
                };
                if to == *unit || !matches!(board.get(to), Cell::Empty | Cell::Food) {
                    continue;
                }
                moves.push(Move::new(MoveKind::Unit, vec![*unit, to]));
            }
        }
    }
    moves.push(Move::end_turn());
    moves
}

fn apply_move(m: &Move, units: &mut ArrayVec<Coordinate, MAX_UNITS>) {
    match m.kind {
        MoveKind::Build => {
            if let Some(&at) = m.path.first() {
                let _ = units.try_push(at);
            }
        }
        MoveKind::Unit => {
            if let (Some(from), Some(to)) = (m.path.first(), m.path.last())
                && let Some(unit) = units.iter_mut().find(|u| **u == *from)
            {
                *unit = *to;
            }
        }
        MoveKind::EndTurn => {}
    }
}

/// Chance that a game with this placement is won.
pub(crate) fn win_probability(
    anchor: Coordinate,
    tunnel: Option<Coordinate>,
    targets: &[Coordinate],
    kills: usize,
) -> f64 {
    let mut p = 0.3;
    // Row 3 borders the neutral rows.
    p += 0.1 * f64::from(3 - anchor.y().min(3)) / 3.0;
    if tunnel.is_some_and(|t| t.distance(anchor) <= 1) {
        p += 0.1;
    }
    for target in targets {
        let dx = f64::from(target.x()) - AWAY_CENTER.0;
        let dy = f64::from(target.y()) - AWAY_CENTER.1;
        p += 0.05 * (dx.hypot(dy) / 5.0).min(1.0);
    }
    #[expect(clippy::cast_precision_loss)]
    let kill_ratio = kills as f64 / ENEMY_UNITS as f64;
    p += 0.1 * kill_ratio;
    p.clamp(0.05, 0.95)
}

#[cfg(test)]
mod tests {
    use antgen_agent::{GeneticPlayer, RandomPolicy};
    use antgen_training::{diagnostics::NullSink, params::GeneticParams, population::PopulationManager};

    use super::*;

    fn c(x: u8, y: u8) -> Coordinate {
        Coordinate::new(x, y).unwrap()
    }

    /// Fixed placement; records what the host asked for.
    #[derive(Debug, Default)]
    struct ScriptedPlayer {
        phases: Vec<Phase>,
        away_occupied: Option<CellSet>,
        moves_seen: usize,
        outcomes: Vec<GameOutcome>,
    }

    impl Player for ScriptedPlayer {
        type Error = std::convert::Infallible;

        fn placement(&mut self, state: &SetupState) -> Vec<Coordinate> {
            self.phases.push(state.phase);
            match state.phase {
                Phase::SetupHome => (0..11).map(|i| c(i % 10, i / 10)).collect(),
                Phase::SetupAway => {
                    self.away_occupied = Some(state.occupied);
                    vec![c(0, 9), c(9, 9)]
                }
                Phase::Play => vec![Coordinate::ORIGIN],
            }
        }

        fn choose_move(&mut self, state: &TurnState) -> Option<Move> {
            self.moves_seen += 1;
            assert!(state.legal_moves.last().is_some_and(|m| m.kind == MoveKind::EndTurn));
            state.legal_moves.first().cloned()
        }

        fn choose_attack(&mut self, targets: &[Coordinate]) -> Option<Coordinate> {
            targets.first().copied()
        }

        fn register_outcome(&mut self, outcome: GameOutcome) -> Result<(), Self::Error> {
            self.outcomes.push(outcome);
            Ok(())
        }
    }

    #[test]
    fn test_game_flow() {
        let forbidden: CellSet = [c(4, 9), c(5, 9)].into_iter().collect();
        let mut host = SimulatedHost::seeded(1, forbidden, 20).unwrap();
        let mut player = ScriptedPlayer::default();
        let outcome = host.play(&mut player).unwrap();

        assert_eq!(player.phases, vec![Phase::SetupHome, Phase::SetupAway]);
        let occupied = player.away_occupied.unwrap();
        assert!(forbidden.iter().all(|cell| occupied.contains(cell)));
        assert_eq!(occupied.len(), forbidden.len() + BLOCKED_AWAY_CELLS);
        assert!(player.moves_seen > 0 && player.moves_seen <= 20);
        assert_eq!(player.outcomes, vec![outcome.clone()]);

        let board = outcome.final_board.unwrap();
        assert_eq!(board.get(c(0, 0)), Cell::Anchor);
        assert_eq!(board.get(c(1, 0)), Cell::Tunnel);
        assert_eq!(board.count(Cell::Obstacle), 9);
        assert!(board.count(Cell::EnemyStructure) >= forbidden.len());
        for target in [c(0, 9), c(9, 9)] {
            let expected = if occupied.contains(target) {
                Cell::EnemyStructure
            } else {
                Cell::Food
            };
            assert_eq!(board.get(target), expected);
        }
    }

    #[test]
    fn test_build_moves_capped() {
        let board = BoardSnapshot::EMPTY;
        let full = [c(5, 5); MAX_UNITS];
        assert!(!legal_moves(&board, c(0, 0), &full).iter().any(Move::is_build));
        assert!(legal_moves(&board, c(0, 0), &[]).iter().any(Move::is_build));

        let mut units = ArrayVec::new();
        apply_move(&Move::new(MoveKind::Build, vec![c(2, 2)]), &mut units);
        apply_move(&Move::new(MoveKind::Unit, vec![c(2, 2), c(3, 3)]), &mut units);
        assert_eq!(units.as_slice(), &[c(3, 3)]);
    }

    #[test]
    fn test_win_probability_prefers_safe_placement() {
        let good = win_probability(c(4, 0), Some(c(4, 1)), &[c(0, 9), c(9, 6)], 3);
        let bad = win_probability(c(4, 3), Some(c(9, 0)), &[c(4, 7), c(5, 8)], 0);
        assert!(good > bad);
        assert!((0.05..=0.95).contains(&good));
        assert!((0.05..=0.95).contains(&bad));
    }

    #[test]
    fn test_drives_genetic_player_through_a_generation() {
        let params = GeneticParams {
            population_size: 4,
            games_per_genome: 2,
            seed: Some(3),
            ..GeneticParams::default()
        };
        let forbidden = params.forbidden;
        let manager = PopulationManager::new(params, NullSink).unwrap();
        let mut player = GeneticPlayer::new(manager, RandomPolicy::seeded(3));
        let mut host = SimulatedHost::seeded(3, forbidden, 30).unwrap();
        for _ in 0..8 {
            host.play(&mut player).unwrap();
        }
        assert_eq!(player.manager().generation(), 1);
        let report = player.latest_report().unwrap();
        assert!(report.final_board.is_some());
    }
}
