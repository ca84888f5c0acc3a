use antgen_board::{Coordinate, GameOutcome, Move, Phase, Player, SetupState, TurnState};
use antgen_training::{
    diagnostics::GenerationReport,
    genome::TARGET_COUNT,
    population::{EvolutionError, PopulationManager, Transition},
};
use arrayvec::ArrayVec;
use log::debug;

use crate::policy::RandomPolicy;

/// Agent whose placement comes from the genome under evaluation.
///
/// Every game outcome is forwarded to the [`PopulationManager`], so playing games with
/// this player is what drives evolution. Moves and attacks come from a [`RandomPolicy`].
#[derive(Debug)]
pub struct GeneticPlayer {
    manager: PopulationManager,
    policy: RandomPolicy,
    latest_report: Option<GenerationReport>,
}

impl GeneticPlayer {
    #[must_use]
    pub fn new(manager: PopulationManager, policy: RandomPolicy) -> Self {
        Self {
            manager,
            policy,
            latest_report: None,
        }
    }

    #[must_use]
    pub fn manager(&self) -> &PopulationManager {
        &self.manager
    }

    /// Report of the most recently completed generation.
    #[must_use]
    pub fn latest_report(&self) -> Option<&GenerationReport> {
        self.latest_report.as_ref()
    }

    #[must_use]
    pub fn into_manager(self) -> PopulationManager {
        self.manager
    }
}

impl Player for GeneticPlayer {
    type Error = EvolutionError;

    fn placement(&mut self, state: &SetupState) -> Vec<Coordinate> {
        let genome = self.manager.current_genome();
        match state.phase {
            Phase::SetupHome => genome.home_cells().collect(),
            Phase::SetupAway => {
                let targets: ArrayVec<Coordinate, TARGET_COUNT> = genome
                    .target_cells()
                    .filter(|cell| !state.occupied.contains(*cell))
                    .collect();
                if targets.len() < TARGET_COUNT {
                    debug!("skipped {} occupied target cells", TARGET_COUNT - targets.len());
                }
                targets.to_vec()
            }
            Phase::Play => vec![Coordinate::ORIGIN],
        }
    }

    fn choose_move(&mut self, state: &TurnState) -> Option<Move> {
        self.policy.choose_move(state)
    }

    fn choose_attack(&mut self, targets: &[Coordinate]) -> Option<Coordinate> {
        self.policy.choose_attack(targets)
    }

    fn register_outcome(&mut self, outcome: GameOutcome) -> Result<(), Self::Error> {
        if let Transition::NewGeneration(report) = self.manager.report_outcome(outcome)? {
            self.latest_report = Some(*report);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use antgen_board::{CellSet, Region};
    use antgen_training::{diagnostics::NullSink, params::GeneticParams};

    use super::*;

    fn player(population_size: usize, games_per_genome: usize) -> GeneticPlayer {
        let params = GeneticParams {
            population_size,
            games_per_genome,
            seed: Some(5),
            ..GeneticParams::default()
        };
        let manager = PopulationManager::new(params, NullSink).unwrap();
        GeneticPlayer::new(manager, RandomPolicy::seeded(5))
    }

    #[test]
    fn test_home_placement_in_genome_order() {
        let mut player = player(3, 1);
        let genome = *player.manager().current_genome();
        let cells = player.placement(&SetupState::new(Phase::SetupHome));
        assert_eq!(cells.len(), 11);
        assert_eq!(cells[0], genome.anchor());
        assert_eq!(cells[1], genome.tunnel());
        assert_eq!(cells, genome.home_cells().collect::<Vec<_>>());
        assert!(cells.iter().all(|c| Region::Home.contains(*c)));
    }

    #[test]
    fn test_away_placement_skips_occupied() {
        let mut player = player(3, 1);
        let genome = *player.manager().current_genome();
        let targets: Vec<Coordinate> = genome.target_cells().collect();

        let all = player.placement(&SetupState::new(Phase::SetupAway));
        assert_eq!(all, targets);

        let one_taken: CellSet = [targets[0]].into_iter().collect();
        let state = SetupState::new(Phase::SetupAway).with_occupied(one_taken);
        assert_eq!(player.placement(&state), vec![targets[1]]);

        let both_taken: CellSet = targets.iter().copied().collect();
        let state = SetupState::new(Phase::SetupAway).with_occupied(both_taken);
        assert!(player.placement(&state).is_empty());
    }

    #[test]
    fn test_play_phase_placement_default() {
        let mut player = player(3, 1);
        assert_eq!(
            player.placement(&SetupState::new(Phase::Play)),
            vec![Coordinate::ORIGIN]
        );
    }

    #[test]
    fn test_outcomes_drive_the_manager() {
        let mut player = player(2, 2);
        assert!(player.latest_report().is_none());
        for i in 0..4 {
            assert_eq!(player.manager().cursor(), i / 2);
            player.register_outcome(GameOutcome::new(i == 1, 100)).unwrap();
        }
        assert_eq!(player.manager().generation(), 1);
        assert_eq!(player.manager().cursor(), 0);
        let report = player.latest_report().unwrap();
        assert_eq!(report.generation, 0);
        assert_eq!(report.best_index, 0);
    }
}
