//! Per-symbol mutation of placement genomes.
//!
//! A mutation nudges one gene to a neighbouring cell: each axis moves independently by
//! −1, 0 or +1. The move is only kept if the new cell is still legal for the gene's
//! role (home rows for home genes, away rows outside the forbidden set for targets);
//! otherwise the gene keeps its original cell. Mutation therefore never pushes a gene out
//! of its region, but it may leave the genome unchanged, and it does not look at other
//! genes: duplicates it introduces are fixed by the breeder's repair pass.
//!
//! # Mutation chance
//!
//! [`mutate_genome`] visits every position and mutates it when a fresh uniform draw
//! from `[0, 100)` *exceeds* `mutation_chance`. The per-position mutation probability is
//! therefore `(100 − mutation_chance) / 100`: a chance of `90.0` mutates about one gene
//! in ten, `100.0` disables mutation and `0.0` mutates every gene.

use antgen_board::{CellSet, Symbol};
use rand::Rng;

use crate::genome::{GeneRole, Genome};

/// Moves a symbol to a random neighbouring cell if that cell is legal for `role`.
///
/// Returns the original symbol when the moved cell is off the board or not allowed.
pub fn mutate_symbol<R>(symbol: Symbol, role: GeneRole, forbidden: &CellSet, rng: &mut R) -> Symbol
where
    R: Rng + ?Sized,
{
    let dx = rng.random_range(-1..=1);
    let dy = rng.random_range(-1..=1);
    match symbol.decode().offset(dx, dy) {
        Some(moved) if role.allows(moved, forbidden) => moved.into(),
        _ => symbol,
    }
}

/// Decides whether one position gets mutated.
pub fn should_mutate<R>(mutation_chance: f64, rng: &mut R) -> bool
where
    R: Rng + ?Sized,
{
    rng.random_range(0.0..100.0) > mutation_chance
}

/// Applies [`mutate_symbol`] to each position independently.
///
/// Returns the number of positions whose symbol actually changed.
pub fn mutate_genome<R>(
    genome: &mut Genome,
    mutation_chance: f64,
    forbidden: &CellSet,
    rng: &mut R,
) -> usize
where
    R: Rng + ?Sized,
{
    let mut changed = 0;
    for (position, symbol) in genome.symbols_mut().iter_mut().enumerate() {
        if !should_mutate(mutation_chance, rng) {
            continue;
        }
        let mutated = mutate_symbol(*symbol, GeneRole::of_position(position), forbidden, rng);
        if mutated != *symbol {
            *symbol = mutated;
            changed += 1;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use antgen_board::{Coordinate, Region};
    use proptest::prelude::*;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;

    use super::*;
    use crate::genome::tests::{c, sample_genome};

    #[test]
    fn test_mutation_stays_within_one_step() {
        let mut rng = Pcg64::seed_from_u64(11);
        let start = Symbol::from(c(4, 2));
        for _ in 0..200 {
            let moved = mutate_symbol(start, GeneRole::Home, &CellSet::EMPTY, &mut rng).decode();
            assert!(moved.distance(c(4, 2)) <= 1);
        }
    }

    #[test]
    fn test_mutation_rejected_at_region_edge() {
        let mut rng = Pcg64::seed_from_u64(5);
        // (x, 3) can only move sideways or back into rows 2-3.
        let edge = Symbol::from(c(0, 3));
        let mut seen_unchanged = false;
        for _ in 0..200 {
            let moved = mutate_symbol(edge, GeneRole::Home, &CellSet::EMPTY, &mut rng);
            assert!(Region::Home.contains(moved.decode()));
            seen_unchanged |= moved == edge;
        }
        assert!(seen_unchanged);
    }

    #[test]
    fn test_mutation_never_enters_forbidden() {
        let mut rng = Pcg64::seed_from_u64(9);
        let start = c(5, 7);
        let forbidden: CellSet = Region::Away
            .cells()
            .filter(|cell| cell.distance(start) == 1)
            .collect();
        assert_eq!(forbidden.len(), 8);
        let start = Symbol::from(start);
        for _ in 0..100 {
            assert_eq!(mutate_symbol(start, GeneRole::Target, &forbidden, &mut rng), start);
        }
    }

    #[test]
    fn test_mutation_chance_hundred_disables_mutation() {
        let mut rng = Pcg64::seed_from_u64(2);
        let original = sample_genome();
        for _ in 0..100 {
            let mut genome = original;
            assert_eq!(mutate_genome(&mut genome, 100.0, &CellSet::EMPTY, &mut rng), 0);
            assert_eq!(genome, original);
        }
    }

    #[test]
    fn test_mutation_chance_is_inverted() {
        let mut rng = Pcg64::seed_from_u64(4);
        let trials = 20_000;
        let hits = (0..trials).filter(|_| should_mutate(90.0, &mut rng)).count();
        #[expect(clippy::cast_precision_loss)]
        let rate = hits as f64 / f64::from(trials);
        assert!((rate - 0.1).abs() < 0.02, "rate = {rate}");
        assert!((0..100).all(|_| should_mutate(0.0, &mut rng)));
    }

    fn arb_cell() -> impl Strategy<Value = Coordinate> {
        (0u8..10, 0u8..10).prop_map(|(x, y)| Coordinate::new(x, y).unwrap())
    }

    proptest! {
        #[test]
        fn prop_mutated_target_stays_legal(
            seed in any::<u64>(),
            x in 0u8..10,
            y in 6u8..10,
            forbidden in prop::collection::vec(arb_cell(), 0..30),
        ) {
            let forbidden: CellSet = forbidden.into_iter().collect();
            let start = Coordinate::new(x, y).unwrap();
            prop_assume!(!forbidden.contains(start));
            let mut rng = Pcg64::seed_from_u64(seed);
            let mut symbol = Symbol::from(start);
            for _ in 0..50 {
                symbol = mutate_symbol(symbol, GeneRole::Target, &forbidden, &mut rng);
                let cell = symbol.decode();
                prop_assert!(Region::Away.contains(cell));
                prop_assert!(!forbidden.contains(cell));
            }
        }

        #[test]
        fn prop_mutated_home_stays_home(seed in any::<u64>(), x in 0u8..10, y in 0u8..4) {
            let mut rng = Pcg64::seed_from_u64(seed);
            let mut symbol = Symbol::from(Coordinate::new(x, y).unwrap());
            for _ in 0..50 {
                symbol = mutate_symbol(symbol, GeneRole::Home, &CellSet::EMPTY, &mut rng);
                prop_assert!(Region::Home.contains(symbol.decode()));
            }
        }

        #[test]
        fn prop_mutated_genome_keeps_regions(seed in any::<u64>(), chance in 0.0f64..100.0) {
            let mut rng = Pcg64::seed_from_u64(seed);
            let forbidden: CellSet = [c(2, 6), c(3, 6)].into_iter().collect();
            let mut genome = sample_genome();
            mutate_genome(&mut genome, chance, &forbidden, &mut rng);
            prop_assert!(genome.home_cells().all(|cell| Region::Home.contains(cell)));
            prop_assert!(genome.target_cells().all(|cell| GeneRole::Target.allows(cell, &forbidden)));
        }
    }
}
