//! Genetic evolution of placement genomes.
//!
//! An agent's opening placement (colony anchor, tunnel, obstacles and two food targets
//! on the opponent's side) is encoded as a 13-symbol [`Genome`](genome::Genome). This
//! crate evolves a population of genomes using the outcomes of complete games as the
//! fitness signal.
//!
//! # How Evolution Works
//!
//! 1. **Initialization** - Sample `population_size` random genomes that satisfy the
//!    placement rules
//! 2. **Evaluation** - The genome under the cursor plays `games_per_genome` games; each
//!    outcome becomes one fitness sample
//! 3. **Commit** - The mean sample becomes the genome's fitness and the cursor advances
//! 4. **Breeding** - After the last genome, neighbouring fitness ranks are paired, crossed
//!    over, mutated and repaired into a complete replacement population
//! 5. **Repeat** - Evaluation restarts at genome 0
//!
//! # Architecture
//!
//! ```text
//! Game engine
//!     ↓ GameOutcome
//! PopulationManager (population)
//!     ↓ samples
//! FitnessAccumulator (fitness)
//!     ↓ committed fitness
//! Breeder (breeder, mutation)
//!     ↓ new genomes
//! PopulationManager
//!     ↓ GenerationReport
//! DiagnosticSink (diagnostics)
//! ```
//!
//! # Parameters
//!
//! - **Population size** - Number of genomes per generation
//! - **Games per genome** - Samples averaged into one fitness value
//! - **Mutation chance** - Threshold a per-symbol draw must exceed to mutate
//! - **Repair attempts** - Random draws per gene before the region is scanned
//! - **Forbidden set** - Away cells never used for targets
//!
//! See [`params::GeneticParams`] for defaults.
//!
//! # Example
//!
//! ```
//! use antgen_board::GameOutcome;
//! use antgen_training::{
//!     diagnostics::NullSink,
//!     params::GeneticParams,
//!     population::{PopulationManager, Transition},
//! };
//!
//! let params = GeneticParams {
//!     population_size: 4,
//!     games_per_genome: 1,
//!     seed: Some(1),
//!     ..GeneticParams::default()
//! };
//! let mut manager = PopulationManager::new(params, NullSink).unwrap();
//! for i in 0..4 {
//!     let _genome = *manager.current_genome();
//!     // ... play a game with `genome` ...
//!     let transition = manager.report_outcome(GameOutcome::new(i % 2 == 0, 120)).unwrap();
//!     assert_eq!(transition.is_new_generation(), i == 3);
//! }
//! assert_eq!(manager.generation(), 1);
//! ```
//!
//! # Current Limitations
//!
//! - **Sequential evaluation**: genomes are evaluated one game at a time in cursor order
//! - **No elitism**: the best genome of a generation is not copied into the next one
//! - **Noisy fitness**: a small `games_per_genome` makes committed fitness values noisy

pub mod breeder;
pub mod diagnostics;
pub mod fitness;
pub mod genome;
pub mod mutation;
pub mod params;
pub mod population;
