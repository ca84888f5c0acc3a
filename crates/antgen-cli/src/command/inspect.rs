use std::{fmt::Write as _, path::PathBuf};

use antgen_board::{BoardSnapshot, Cell, CellSet};
use antgen_training::genome::{ANCHOR, GENOME_LEN, GeneRole, Genome, TUNNEL};
use anyhow::Context as _;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct InspectArg {
    /// Genome in text form, e.g. `00-01-02-03-04-05-06-07-08-09-10-60-61`
    genome: String,
    /// Genetic parameters JSON file providing the forbidden set
    #[arg(long)]
    config: Option<PathBuf>,
}

pub(crate) fn run(arg: &InspectArg) -> anyhow::Result<()> {
    let genome: Genome = arg
        .genome
        .parse()
        .with_context(|| format!("Failed to parse genome: {}", arg.genome))?;
    let params = util::read_params_file(arg.config.as_ref())?;
    print!("{}", describe(&genome, &params.forbidden));
    Ok(())
}

fn describe(genome: &Genome, forbidden: &CellSet) -> String {
    let mut out = String::new();
    let mut board = BoardSnapshot::EMPTY;
    let mut problems = vec![];

    for position in 0..GENOME_LEN {
        let cell = genome.cell(position);
        let role = GeneRole::of_position(position);
        let (label, mark) = match (position, role) {
            (ANCHOR, _) => ("anchor", Cell::Anchor),
            (TUNNEL, _) => ("tunnel", Cell::Tunnel),
            (_, GeneRole::Home) => ("obstacle", Cell::Obstacle),
            (_, GeneRole::Target) => ("target", Cell::Food),
        };
        let _ = writeln!(
            out,
            "{position:2}  {}  {label:<8} {cell}",
            genome.symbols()[position]
        );
        board.set(cell, mark);

        if genome.is_duplicate_at(position) {
            problems.push(format!("gene {position} repeats cell {cell}"));
        }
        if !role.allows(cell, forbidden) {
            problems.push(format!("gene {position} ({role}) cannot be placed on {cell}"));
        }
    }

    let _ = writeln!(out, "\n{board}");
    if problems.is_empty() {
        let _ = writeln!(out, "valid");
    } else {
        let _ = writeln!(out, "invalid:");
        for problem in &problems {
            let _ = writeln!(out, "  - {problem}");
        }
    }
    debug_assert_eq!(problems.is_empty(), genome.is_valid(forbidden));
    out
}

#[cfg(test)]
mod tests {
    use antgen_board::Coordinate;

    use super::*;

    #[test]
    fn test_describe_valid_genome() {
        let genome: Genome = "00-01-02-03-04-05-06-07-08-09-10-60-61".parse().unwrap();
        let text = describe(&genome, &CellSet::EMPTY);
        assert!(text.contains(" 0  00  anchor   (0, 0)"));
        assert!(text.contains("12  61  target   (1, 6)"));
        assert!(text.contains("0 AT########"));
        assert!(text.ends_with("valid\n"));
    }

    #[test]
    fn test_describe_invalid_genome() {
        let genome: Genome = "00-01-02-03-04-05-06-07-08-09-00-60-45".parse().unwrap();
        let forbidden: CellSet = [Coordinate::new(0, 6).unwrap()].into_iter().collect();
        let text = describe(&genome, &forbidden);
        assert!(text.contains("invalid:"));
        assert!(text.contains("gene 10 repeats cell (0, 0)"));
        assert!(text.contains("gene 11 (target) cannot be placed on (0, 6)"));
        assert!(text.contains("gene 12 (target) cannot be placed on (5, 4)"));
    }
}
