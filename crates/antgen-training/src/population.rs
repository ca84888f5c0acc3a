//! Population lifecycle driven by game outcomes.
//!
//! [`PopulationManager`] owns the current generation and evaluates it one genome at a
//! time. The engine plays a game with [`current_genome`](PopulationManager::current_genome)
//! and reports the outcome; the manager answers with a [`Transition`]:
//!
//! ```text
//! Evaluating(i) --outcome, samples < K------------> Evaluating(i)      Retry
//! Evaluating(i) --outcome, samples = K, i < N-1---> Evaluating(i + 1)  Advance
//! Evaluating(i) --outcome, samples = K, i = N-1---> Evaluating(0)      NewGeneration
//! ```
//!
//! where `K` is `games_per_genome` and `N` is `population_size`. There is no terminal
//! state; the caller decides when to stop.

use antgen_board::{BoardSnapshot, GameOutcome};
use log::{debug, info, warn};
use rand::SeedableRng as _;
use rand_pcg::Pcg64;

use crate::{
    breeder::Breeder,
    diagnostics::{DiagnosticSink, GenerationReport},
    fitness::{FitnessAccumulator, FitnessSummary},
    genome::{Genome, RepairError},
    params::{GeneticParams, ParamsError},
};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum EvolutionError {
    #[display("invalid genetic parameters: {_0}")]
    InvalidParams(ParamsError),
    #[display("cannot build a legal genome: {_0}")]
    Repair(RepairError),
}

/// What happened after an outcome was reported.
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum Transition {
    /// The same genome plays again.
    Retry,
    /// The genome's fitness was committed; the genome at this index plays next.
    Advance(usize),
    /// The sweep finished and the population was replaced.
    NewGeneration(Box<GenerationReport>),
}

/// Evolution state: the current generation, its fitness and the evaluation cursor.
#[derive(Debug)]
pub struct PopulationManager {
    params: GeneticParams,
    breeder: Breeder,
    genomes: Vec<Genome>,
    fitness: Vec<f64>,
    final_boards: Vec<Option<BoardSnapshot>>,
    cursor: usize,
    accumulator: FitnessAccumulator,
    generation: u64,
    rng: Pcg64,
    sink: Box<dyn DiagnosticSink>,
}

impl PopulationManager {
    /// Validates `params` and samples the initial population.
    ///
    /// The RNG is seeded from `params.seed` when set, so two managers built from the same
    /// parameters evolve identically given the same outcomes.
    pub fn new<S>(params: GeneticParams, sink: S) -> Result<Self, EvolutionError>
    where
        S: DiagnosticSink + 'static,
    {
        params.validate()?;
        let mut rng = match params.seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_rng(&mut rand::rng()),
        };
        let genomes = (0..params.population_size)
            .map(|_| Genome::random(&mut rng, &params.forbidden, params.repair_attempts))
            .collect::<Result<Vec<_>, _>>()?;
        let n = genomes.len();
        info!(
            "initialized population of {n} genomes ({} games each)",
            params.games_per_genome
        );
        Ok(Self {
            breeder: Breeder::from_params(&params),
            accumulator: FitnessAccumulator::new(params.games_per_genome),
            params,
            genomes,
            fitness: vec![0.0; n],
            final_boards: vec![None; n],
            cursor: 0,
            generation: 0,
            rng,
            sink: Box::new(sink),
        })
    }

    #[must_use]
    pub fn params(&self) -> &GeneticParams {
        &self.params
    }

    /// Genome currently under evaluation.
    #[must_use]
    pub fn current_genome(&self) -> &Genome {
        &self.genomes[self.cursor]
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of completed generations.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn population(&self) -> &[Genome] {
        &self.genomes
    }

    /// Committed fitness per genome; `0.0` until a genome has been evaluated.
    #[must_use]
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Samples recorded for the current genome so far.
    #[must_use]
    pub fn pending_samples(&self) -> usize {
        self.accumulator.len()
    }

    /// Feeds one finished game of the current genome into the state machine.
    pub fn report_outcome(&mut self, outcome: GameOutcome) -> Result<Transition, EvolutionError> {
        self.accumulator.record(&outcome);
        if outcome.final_board.is_some() {
            self.final_boards[self.cursor] = outcome.final_board;
        }
        let Some(fitness) = self.accumulator.try_commit() else {
            return Ok(Transition::Retry);
        };

        debug!(
            "generation {} genome {}: fitness {fitness:.4}",
            self.generation, self.cursor
        );
        self.fitness[self.cursor] = fitness;

        if self.cursor + 1 < self.genomes.len() {
            self.cursor += 1;
            return Ok(Transition::Advance(self.cursor));
        }

        let report = self.finish_generation()?;
        Ok(Transition::NewGeneration(Box::new(report)))
    }

    fn finish_generation(&mut self) -> Result<GenerationReport, EvolutionError> {
        let summary = FitnessSummary::new(&self.fitness)
            .expect("population is never empty after validation");
        let best = summary.best_index;
        let report = GenerationReport {
            generation: self.generation,
            best_index: best,
            genome: self.genomes[best],
            fitness: self.fitness[best],
            summary,
            final_board: self.final_boards[best].clone(),
        };
        info!(
            "generation {}: best #{best} {} fitness {:.4} (mean {:.4}, min {:.4}, std {:.4})",
            report.generation,
            report.genome,
            report.fitness,
            summary.mean,
            summary.min,
            summary.std_dev
        );
        if let Err(e) = self.sink.record(&report) {
            warn!("failed to record generation {}: {e}", report.generation);
        }

        let children = self
            .breeder
            .next_generation(&self.genomes, &self.fitness, &mut self.rng)?;
        let n = children.len();
        self.genomes = children;
        self.fitness = vec![0.0; n];
        self.final_boards = vec![None; n];
        self.accumulator.clear();
        self.cursor = 0;
        self.generation += 1;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use antgen_board::Cell;

    use super::*;
    use crate::{diagnostics::NullSink, genome::tests::c};

    /// Keeps every report in memory.
    #[derive(Debug, Clone, Default)]
    struct MemorySink(Arc<Mutex<Vec<GenerationReport>>>);

    impl DiagnosticSink for MemorySink {
        fn record(&mut self, report: &GenerationReport) -> io::Result<()> {
            self.0.lock().unwrap().push(report.clone());
            Ok(())
        }
    }

    #[derive(Debug)]
    struct FailingSink;

    impl DiagnosticSink for FailingSink {
        fn record(&mut self, _report: &GenerationReport) -> io::Result<()> {
            Err(io::Error::other("disk full"))
        }
    }

    fn params(population_size: usize, games_per_genome: usize) -> GeneticParams {
        GeneticParams {
            population_size,
            games_per_genome,
            seed: Some(99),
            ..GeneticParams::default()
        }
    }

    #[test]
    fn test_initial_population_is_valid() {
        let forbidden = [c(0, 9), c(1, 9)].into_iter().collect();
        let params = GeneticParams {
            forbidden,
            ..params(50, 1)
        };
        let manager = PopulationManager::new(params, NullSink).unwrap();
        assert_eq!(manager.population().len(), 50);
        assert!(manager.population().iter().all(|g| g.is_valid(&forbidden)));
        assert_eq!(manager.fitness(), &[0.0; 50]);
        assert_eq!(manager.cursor(), 0);
        assert_eq!(manager.generation(), 0);
    }

    #[test]
    fn test_rejects_invalid_params() {
        let err = PopulationManager::new(params(1, 3), NullSink).unwrap_err();
        assert_eq!(
            err,
            EvolutionError::InvalidParams(ParamsError::PopulationTooSmall(1))
        );
    }

    #[test]
    fn test_fails_when_no_target_cell_is_left() {
        let forbidden = antgen_board::Region::Away.cells().skip(1).collect();
        let params = GeneticParams {
            forbidden,
            ..params(4, 1)
        };
        let err = PopulationManager::new(params, NullSink).unwrap_err();
        assert!(matches!(err, EvolutionError::Repair(e) if e.position == 12));
    }

    #[test]
    fn test_retry_until_games_per_genome() {
        let mut manager = PopulationManager::new(params(4, 3), NullSink).unwrap();
        let first = *manager.current_genome();

        let t = manager.report_outcome(GameOutcome::new(true, 100)).unwrap();
        assert_eq!(t, Transition::Retry);
        let t = manager.report_outcome(GameOutcome::new(false, 50)).unwrap();
        assert_eq!(t, Transition::Retry);
        assert_eq!(manager.pending_samples(), 2);
        assert_eq!(*manager.current_genome(), first);

        let t = manager.report_outcome(GameOutcome::new(true, 400)).unwrap();
        assert_eq!(t, Transition::Advance(1));
        assert_eq!(manager.pending_samples(), 0);
        assert!((manager.fitness()[0] - 0.791_666_666_666_666_6).abs() < 1e-9);
        assert_eq!(manager.cursor(), 1);
    }

    #[test]
    fn test_one_new_generation_per_sweep() {
        let sink = MemorySink::default();
        let reports = Arc::clone(&sink.0);
        let (n, k) = (5, 2);
        let mut manager = PopulationManager::new(params(n, k), sink).unwrap();

        let mut new_generations = 0;
        for sweep in 0..3 {
            let before = manager.population().to_vec();
            for step in 0..n * k {
                let won = step % 3 == 0;
                #[expect(clippy::cast_possible_truncation)]
                let outcome = GameOutcome::new(won, (step * 10) as u32);
                let t = manager.report_outcome(outcome).unwrap();
                if step + 1 == n * k {
                    let Transition::NewGeneration(report) = t else {
                        panic!("expected a new generation, got {t:?}");
                    };
                    assert_eq!(report.generation, sweep);
                    assert!(before.contains(&report.genome));
                    new_generations += 1;
                } else {
                    assert!(!t.is_new_generation());
                }
            }
            assert_eq!(manager.cursor(), 0);
            assert_eq!(manager.generation(), sweep + 1);
            assert_eq!(manager.population().len(), n);
            assert!(manager.fitness().iter().all(|f| *f == 0.0));
            assert!(
                manager
                    .population()
                    .iter()
                    .all(|g| g.is_valid(&manager.params().forbidden))
            );
        }
        assert_eq!(new_generations, 3);
        assert_eq!(reports.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_report_names_best_genome_and_board() {
        let mut manager = PopulationManager::new(params(3, 1), NullSink).unwrap();
        let genomes = manager.population().to_vec();
        let mut board = BoardSnapshot::EMPTY;
        board.set(c(3, 3), Cell::Anchor);

        manager.report_outcome(GameOutcome::new(false, 10)).unwrap();
        manager
            .report_outcome(GameOutcome::new(true, 200).with_final_board(board.clone()))
            .unwrap();
        let t = manager.report_outcome(GameOutcome::new(false, 300)).unwrap();

        let Transition::NewGeneration(report) = t else {
            panic!("expected a new generation, got {t:?}");
        };
        assert_eq!(report.best_index, 1);
        assert_eq!(report.genome, genomes[1]);
        assert!((report.fitness - 1.5).abs() < 1e-9);
        assert_eq!(report.final_board, Some(board));
        assert!((report.summary.min - (-0.975)).abs() < 1e-9);
    }

    #[test]
    fn test_sink_failure_does_not_stop_evolution() {
        let mut manager = PopulationManager::new(params(2, 1), FailingSink).unwrap();
        manager.report_outcome(GameOutcome::new(true, 1)).unwrap();
        let t = manager.report_outcome(GameOutcome::new(false, 1)).unwrap();
        assert!(t.is_new_generation());
        assert_eq!(manager.generation(), 1);
    }

    #[test]
    fn test_seeded_managers_agree() {
        let a = PopulationManager::new(params(6, 1), NullSink).unwrap();
        let b = PopulationManager::new(params(6, 1), NullSink).unwrap();
        assert_eq!(a.population(), b.population());
    }
}
