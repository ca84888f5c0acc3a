use clap::{Parser, Subcommand};

use self::{default_config::DefaultConfigArg, inspect::InspectArg, train::TrainArg};

mod default_config;
mod inspect;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evolve placement genomes against the simulated game
    Train(#[clap(flatten)] TrainArg),
    /// Print the default genetic parameters as JSON
    DefaultConfig(#[clap(flatten)] DefaultConfigArg),
    /// Decode a genome and check it against the placement rules
    Inspect(#[clap(flatten)] InspectArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::DefaultConfig(arg) => default_config::run(&arg)?,
        Mode::Inspect(arg) => inspect::run(&arg)?,
    }
    Ok(())
}
