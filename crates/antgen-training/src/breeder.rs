//! Generation replacement: rank pairing, crossover, mutation and repair.
//!
//! # Algorithm
//!
//! 1. **Rank** - sort genome indices by committed fitness, best first
//! 2. **Pair** - pair neighbouring ranks: rank 0 with rank 1, rank 2 with rank 3, ...
//! 3. **Crossover** - each pair produces two children by single-point crossover
//! 4. **Mutation** - every symbol of both children goes through
//!    [`mutate_genome`](crate::mutation::mutate_genome)
//! 5. **Repair** - genes that became duplicated or illegal are resampled
//!
//! The new population replaces the old one completely; nothing is carried over
//! unchanged, and all fitness values restart at zero.
//!
//! # Design Notes
//!
//! Pairing neighbouring ranks keeps strong genomes mating with strong ones and weak with
//! weak, rather than the more common fit-with-random schemes. With an odd population the
//! last rank is paired with rank 0 and the surplus child is dropped.
//!
//! Repair never loops unboundedly: each offending gene gets a bounded number of random
//! draws and then a scan of its region (see [`sample_cell`]). If the region has no legal
//! cell left the generation fails with a [`RepairError`].

use antgen_board::CellSet;
use rand::Rng;

use crate::{
    genome::{GENOME_LEN, GeneRole, Genome, RepairError, sample_cell},
    mutation,
    params::GeneticParams,
};

/// Crosses two parents at a uniform cut point in `[1, 13)`.
///
/// The first child takes `p1` before the cut and `p2` from the cut on; the second child
/// is the complement. The children are not mutated or repaired.
pub fn crossover<R>(p1: &Genome, p2: &Genome, rng: &mut R) -> (Genome, Genome)
where
    R: Rng + ?Sized,
{
    let cut = rng.random_range(1..GENOME_LEN);
    crossover_at(p1, p2, cut)
}

/// Crosses two parents at a fixed cut point.
#[must_use]
pub fn crossover_at(p1: &Genome, p2: &Genome, cut: usize) -> (Genome, Genome) {
    assert!((1..GENOME_LEN).contains(&cut), "cut point out of range: {cut}");
    let mut c1 = *p1;
    let mut c2 = *p2;
    c1.symbols_mut()[cut..].copy_from_slice(&p2.symbols()[cut..]);
    c2.symbols_mut()[cut..].copy_from_slice(&p1.symbols()[cut..]);
    (c1, c2)
}

/// Orders genome indices by fitness, best first, and pairs neighbouring ranks.
///
/// The sort is stable, so equal fitness keeps index order. An odd last rank is paired
/// with rank 0.
///
/// ```
/// use antgen_training::breeder::rank_pairs;
///
/// assert_eq!(rank_pairs(&[1.0, 3.0, 2.0, 4.0]), vec![(3, 1), (2, 0)]);
/// ```
#[must_use]
pub fn rank_pairs(fitness: &[f64]) -> Vec<(usize, usize)> {
    let mut ranked: Vec<usize> = (0..fitness.len()).collect();
    ranked.sort_by(|&a, &b| fitness[b].total_cmp(&fitness[a]));
    ranked
        .chunks(2)
        .map(|pair| match *pair {
            [a, b] => (a, b),
            [a] => (a, ranked[0]),
            _ => unreachable!(),
        })
        .collect()
}

/// Resamples every gene that is duplicated or illegal for its role.
///
/// Genes are visited in order; a gene equal to an earlier one is the one replaced. New
/// cells avoid all other genes and the forbidden set, so one pass leaves the genome
/// valid. Returns the number of genes replaced.
pub fn repair<R>(
    genome: &mut Genome,
    forbidden: &CellSet,
    max_attempts: usize,
    rng: &mut R,
) -> Result<usize, RepairError>
where
    R: Rng + ?Sized,
{
    let mut repaired = 0;
    for position in 0..GENOME_LEN {
        let role = GeneRole::of_position(position);
        let legal = role.allows(genome.cell(position), forbidden);
        if legal && !genome.is_duplicate_at(position) {
            continue;
        }
        let taken = genome.cells_except(position);
        let cell = sample_cell(rng, role, &taken, forbidden, max_attempts)
            .ok_or(RepairError { position, role })?;
        genome.set_cell(position, cell);
        repaired += 1;
    }
    debug_assert!(genome.is_valid(forbidden));
    Ok(repaired)
}

/// Produces the next generation from a ranked population.
#[derive(Debug, Clone)]
pub struct Breeder {
    /// Mutation threshold (see [`crate::mutation`])
    pub mutation_chance: f64,
    /// Away cells never allowed to hold a target gene
    pub forbidden: CellSet,
    /// Random draws per gene before the repair pass scans the region
    pub repair_attempts: usize,
}

impl Breeder {
    #[must_use]
    pub fn from_params(params: &GeneticParams) -> Self {
        Self {
            mutation_chance: params.mutation_chance,
            forbidden: params.forbidden,
            repair_attempts: params.repair_attempts,
        }
    }

    /// Crosses two parents and mutates both children. The children are not repaired.
    pub fn breed<R>(&self, p1: &Genome, p2: &Genome, rng: &mut R) -> (Genome, Genome)
    where
        R: Rng + ?Sized,
    {
        let (mut c1, mut c2) = crossover(p1, p2, rng);
        mutation::mutate_genome(&mut c1, self.mutation_chance, &self.forbidden, rng);
        mutation::mutate_genome(&mut c2, self.mutation_chance, &self.forbidden, rng);
        (c1, c2)
    }

    /// Builds a replacement population of the same size.
    ///
    /// # Arguments
    ///
    /// * `genomes` - Current population
    /// * `fitness` - Committed fitness, parallel to `genomes`
    /// * `rng` - Random number generator
    ///
    /// # Returns
    ///
    /// Valid children, two per rank pair, in pair order
    pub fn next_generation<R>(
        &self,
        genomes: &[Genome],
        fitness: &[f64],
        rng: &mut R,
    ) -> Result<Vec<Genome>, RepairError>
    where
        R: Rng + ?Sized,
    {
        assert_eq!(genomes.len(), fitness.len());
        let pairs = rank_pairs(fitness);
        let mut children = Vec::with_capacity(genomes.len());
        for &(a, b) in &pairs {
            let (c1, c2) = self.breed(&genomes[a], &genomes[b], rng);
            for mut child in [c1, c2] {
                if children.len() == genomes.len() {
                    break;
                }
                repair(&mut child, &self.forbidden, self.repair_attempts, rng)?;
                children.push(child);
            }
        }
        debug_assert_eq!(children.len(), genomes.len());
        Ok(children)
    }
}
