//! Fitness samples and their per-genome averaging.
//!
//! Every finished game produces one sample:
//!
//! ```text
//! sample = move_count / 400 + (won ? +1 : −1)
//! ```
//!
//! The win term dominates, and the move-count term rewards lasting longer whether the
//! game is won or lost. A genome plays `games_per_genome` games in a row; the samples are
//! collected in a [`FitnessAccumulator`] and their mean becomes the genome's fitness.

use antgen_board::GameOutcome;

/// Divisor applied to the move count of a game.
pub const MOVE_COUNT_NORMALIZER: f64 = 400.0;

/// Scores one finished game.
#[must_use]
pub fn trial_sample(outcome: &GameOutcome) -> f64 {
    let survival = f64::from(outcome.move_count) / MOVE_COUNT_NORMALIZER;
    let result = if outcome.won { 1.0 } else { -1.0 };
    survival + result
}

/// Samples collected for the genome currently under evaluation.
///
/// The mean is only available through [`try_commit`](Self::try_commit), which refuses to
/// produce one before `required` samples exist and empties the accumulator when it does.
#[derive(Debug, Clone)]
pub struct FitnessAccumulator {
    samples: Vec<f64>,
    required: usize,
}

impl FitnessAccumulator {
    #[must_use]
    pub fn new(required: usize) -> Self {
        assert!(required > 0, "at least one sample is required per genome");
        Self {
            samples: Vec::with_capacity(required),
            required,
        }
    }

    /// Scores `outcome`, stores the sample and returns it.
    pub fn record(&mut self, outcome: &GameOutcome) -> f64 {
        let sample = trial_sample(outcome);
        self.samples.push(sample);
        sample
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn required(&self) -> usize {
        self.required
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.samples.len() >= self.required
    }

    /// Returns the mean of the collected samples and clears them, or `None` while fewer
    /// than `required` samples exist.
    #[must_use]
    pub fn try_commit(&mut self) -> Option<f64> {
        if !self.is_ready() {
            return None;
        }
        #[expect(clippy::cast_precision_loss)]
        let mean = self.samples.iter().sum::<f64>() / self.samples.len() as f64;
        self.samples.clear();
        Some(mean)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Summary of a generation's committed fitness values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
    /// Index of the first genome holding `max`.
    pub best_index: usize,
}

impl FitnessSummary {
    /// Returns `None` for an empty slice.
    #[must_use]
    pub fn new(fitness: &[f64]) -> Option<Self> {
        let (best_index, max) = fitness
            .iter()
            .copied()
            .enumerate()
            .reduce(|best, cur| if cur.1.total_cmp(&best.1).is_gt() { cur } else { best })?;
        let min = fitness.iter().copied().min_by(f64::total_cmp)?;
        #[expect(clippy::cast_precision_loss)]
        let n = fitness.len() as f64;
        let mean = fitness.iter().sum::<f64>() / n;
        let variance = fitness.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / n;
        Some(Self {
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
            best_index,
        })
    }
}
