use std::path::PathBuf;

use antgen_agent::{GeneticPlayer, RandomPolicy};
use antgen_training::{
    diagnostics::{AppendFileSink, DiagnosticSink, NullSink},
    params::GeneticParams,
    population::PopulationManager,
};
use anyhow::Context as _;

use crate::{
    host::SimulatedHost,
    schema::genome_model::GenomeModel,
    util::{self, Output},
};

/// Turns per simulated game before the outcome is drawn.
const TURN_LIMIT: u32 = 60;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Genetic parameters JSON file (see `default-config`)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides `population_size`
    #[arg(long)]
    population_size: Option<usize>,
    /// Overrides `games_per_genome`
    #[arg(long)]
    games_per_genome: Option<usize>,
    /// Overrides `mutation_chance`
    #[arg(long)]
    mutation_chance: Option<f64>,
    /// Overrides `seed`
    #[arg(long)]
    seed: Option<u64>,
    /// Number of generations to evaluate
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    generations: u64,
    /// File that receives a report for every generation (appended to)
    #[arg(long)]
    diagnostics: Option<PathBuf>,
    /// Model name
    #[arg(long, default_value = "antgen")]
    name: String,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl TrainArg {
    fn params(&self) -> anyhow::Result<GeneticParams> {
        let mut params = util::read_params_file(self.config.as_ref())?;
        if let Some(n) = self.population_size {
            params.population_size = n;
        }
        if let Some(k) = self.games_per_genome {
            params.games_per_genome = k;
        }
        if let Some(chance) = self.mutation_chance {
            params.mutation_chance = chance;
        }
        if let Some(seed) = self.seed {
            params.seed = Some(seed);
        }
        Ok(params)
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let params = arg.params()?;
    let forbidden = params.forbidden;
    let seed = params.seed;
    let games_per_generation = params.population_size * params.games_per_genome;

    let sink: Box<dyn DiagnosticSink> = match &arg.diagnostics {
        Some(path) => Box::new(AppendFileSink::new(path)),
        None => Box::new(NullSink),
    };
    let manager =
        PopulationManager::new(params, sink).context("Failed to initialize population")?;
    let (policy, mut host) = match seed {
        Some(seed) => (
            RandomPolicy::seeded(seed.wrapping_add(1)),
            SimulatedHost::seeded(seed.wrapping_add(2), forbidden, TURN_LIMIT)?,
        ),
        None => (
            RandomPolicy::from_entropy(),
            SimulatedHost::from_entropy(forbidden, TURN_LIMIT)?,
        ),
    };
    let mut player = GeneticPlayer::new(manager, policy);

    eprintln!(
        "Training {} generations ({games_per_generation} games each)",
        arg.generations
    );
    while player.manager().generation() < arg.generations {
        let generation = player.manager().generation();
        host.play(&mut player)
            .with_context(|| format!("Failed to evolve generation #{generation}"))?;
        if player.manager().generation() > generation
            && let Some(report) = player.latest_report()
        {
            eprintln!(
                "Generation #{generation}: best #{} {} => {:.3} (mean {:.3}, min {:.3})",
                report.best_index,
                report.genome,
                report.fitness,
                report.summary.mean,
                report.summary.min
            );
        }
    }

    let report = player
        .latest_report()
        .context("No generation was completed")?;
    let model = GenomeModel::from_report(arg.name.clone(), report);
    Output::save_json(&model, arg.output.clone())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    if let Some(path) = &arg.diagnostics {
        eprintln!("  Diagnostics: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Generation: {}", model.generation);
    eprintln!("  Fitness: {:.3}", model.fitness);
    eprintln!("  Genome: {}", model.genome);

    Ok(())
}
