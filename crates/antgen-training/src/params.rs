use antgen_board::{CellSet, Region};
use serde::{Deserialize, Serialize};

/// Tunable parameters of the genetic algorithm.
///
/// Every field has a default, so a configuration file only needs the fields it changes:
///
/// ```
/// use antgen_training::params::GeneticParams;
///
/// let params: GeneticParams = serde_json::from_str(r#"{ "population_size": 20 }"#).unwrap();
/// assert_eq!(params.population_size, 20);
/// assert_eq!(params.games_per_genome, GeneticParams::default().games_per_genome);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneticParams {
    /// Number of genomes per generation
    pub population_size: usize,
    /// Games each genome plays before its mean fitness is committed
    pub games_per_genome: usize,
    /// Threshold in `[0, 100]`; a position mutates when a uniform draw from `[0, 100)`
    /// exceeds it (see [`crate::mutation`])
    pub mutation_chance: f64,
    /// Random draws tried per gene before scanning the region for a legal cell
    pub repair_attempts: usize,
    /// Away cells that can never hold a target gene
    pub forbidden: CellSet,
    /// Seed for the evolution RNG; a random seed is used when absent
    pub seed: Option<u64>,
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            population_size: 10,
            games_per_genome: 3,
            mutation_chance: 90.0,
            repair_attempts: 100,
            forbidden: CellSet::EMPTY,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ParamsError {
    #[display("population size must be at least 2, got {_0}")]
    PopulationTooSmall(#[error(not(source))] usize),
    #[display("games per genome must be at least 1")]
    NoGamesPerGenome,
    #[display("mutation chance must be within [0, 100], got {_0}")]
    MutationChanceOutOfRange(#[error(not(source))] f64),
    #[display("repair attempts must be at least 1")]
    NoRepairAttempts,
    #[display("forbidden cell ({x}, {y}) is not in the away region")]
    ForbiddenOutsideAway { x: u8, y: u8 },
}

impl GeneticParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.population_size < 2 {
            return Err(ParamsError::PopulationTooSmall(self.population_size));
        }
        if self.games_per_genome == 0 {
            return Err(ParamsError::NoGamesPerGenome);
        }
        if !(0.0..=100.0).contains(&self.mutation_chance) {
            return Err(ParamsError::MutationChanceOutOfRange(self.mutation_chance));
        }
        if self.repair_attempts == 0 {
            return Err(ParamsError::NoRepairAttempts);
        }
        if let Some(c) = self.forbidden.iter().find(|c| !Region::Away.contains(*c)) {
            return Err(ParamsError::ForbiddenOutsideAway { x: c.x(), y: c.y() });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use antgen_board::Coordinate;

    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(GeneticParams::default().validate(), Ok(()));
    }

    #[test]
    fn test_validation_errors() {
        let base = GeneticParams::default();

        let params = GeneticParams {
            population_size: 1,
            ..base.clone()
        };
        assert_eq!(params.validate(), Err(ParamsError::PopulationTooSmall(1)));

        let params = GeneticParams {
            games_per_genome: 0,
            ..base.clone()
        };
        assert_eq!(params.validate(), Err(ParamsError::NoGamesPerGenome));

        let params = GeneticParams {
            mutation_chance: 100.5,
            ..base.clone()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::MutationChanceOutOfRange(_))
        ));

        let params = GeneticParams {
            repair_attempts: 0,
            ..base.clone()
        };
        assert_eq!(params.validate(), Err(ParamsError::NoRepairAttempts));

        let params = GeneticParams {
            forbidden: [Coordinate::new(3, 2).unwrap()].into_iter().collect(),
            ..base
        };
        assert_eq!(
            params.validate(),
            Err(ParamsError::ForbiddenOutsideAway { x: 3, y: 2 })
        );
    }

    #[test]
    fn test_json_roundtrip_and_unknown_fields() {
        let params = GeneticParams {
            forbidden: [Coordinate::new(4, 9).unwrap()].into_iter().collect(),
            seed: Some(42),
            ..GeneticParams::default()
        };
        let json = serde_json::to_string(&params).unwrap();
        let back: GeneticParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);

        assert!(serde_json::from_str::<GeneticParams>(r#"{ "populaton_size": 4 }"#).is_err());
    }
}
