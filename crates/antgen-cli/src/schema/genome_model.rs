use antgen_board::Coordinate;
use antgen_training::{diagnostics::GenerationReport, genome::Genome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Best genome of a training run, as written by `antgen train`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenomeModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    /// Generation the genome was evaluated in (0-indexed)
    pub generation: u64,
    pub fitness: f64,
    pub genome: Genome,
    /// Decoded cells, for reading the model without the codec
    pub placements: Placements,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placements {
    pub anchor: Coordinate,
    pub tunnel: Coordinate,
    pub obstacles: Vec<Coordinate>,
    pub targets: Vec<Coordinate>,
}

impl From<&Genome> for Placements {
    fn from(genome: &Genome) -> Self {
        Self {
            anchor: genome.anchor(),
            tunnel: genome.tunnel(),
            obstacles: genome.obstacle_cells().collect(),
            targets: genome.target_cells().collect(),
        }
    }
}

impl GenomeModel {
    pub fn from_report(name: String, report: &GenerationReport) -> Self {
        Self {
            name,
            trained_at: Utc::now(),
            generation: report.generation,
            fitness: report.fitness,
            genome: report.genome,
            placements: Placements::from(&report.genome),
        }
    }
}
