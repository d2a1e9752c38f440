//! Scramble mutation.

use std::ops::RangeInclusive;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::schema::Chromosome;

use super::search::Candidate;

/// Shuffle the quantities of a random inclusive locus range.
///
/// Dish ids stay in place; the multiset of quantities inside the range is
/// unchanged. Returns the scrambled range.
pub fn scramble<R: Rng>(
    chromosome: &mut Chromosome,
    rng: &mut R,
) -> Option<RangeInclusive<usize>> {
    let len = chromosome.len();
    if len == 0 {
        return None;
    }

    let mut start = rng.gen_range(0..len);
    let mut end = rng.gen_range(0..len);
    if end < start {
        std::mem::swap(&mut start, &mut end);
    }

    let mut quantities: Vec<u32> = chromosome.genes[start..=end]
        .iter()
        .map(|g| g.quantity)
        .collect();
    quantities.shuffle(rng);
    for (gene, quantity) in chromosome.genes[start..=end].iter_mut().zip(quantities) {
        gene.quantity = quantity;
    }

    Some(start..=end)
}

/// Scramble the chromosome with probability `rate`.
pub fn mutate<R: Rng>(
    chromosome: &mut Chromosome,
    rate: f64,
    rng: &mut R,
) -> Option<RangeInclusive<usize>> {
    if rng.r#gen::<f64>() < rate {
        scramble(chromosome, rng)
    } else {
        None
    }
}

/// Mutate every candidate after the first `elite_count`, dropping the cached
/// fitness of those that were scrambled. Returns how many were mutated.
pub fn mutate_population<R: Rng>(
    population: &mut [Candidate],
    elite_count: usize,
    rate: f64,
    rng: &mut R,
) -> usize {
    let mut mutated = 0;
    for candidate in population.iter_mut().skip(elite_count) {
        if mutate(&mut candidate.chromosome, rate, rng).is_some() {
            candidate.invalidate();
            mutated += 1;
        }
    }
    mutated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Catalog, CatalogEntry};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn catalog(len: usize) -> Catalog {
        Catalog::new(
            (0..len)
                .map(|i| (format!("d{i}"), CatalogEntry::new("A", 3.0, 5.0)))
                .collect(),
        )
        .unwrap()
    }

    fn population(catalog: &Catalog, size: u32) -> Vec<Candidate> {
        (0..size)
            .map(|i| {
                let quantities: Vec<u32> = (0..catalog.len() as u32).map(|j| i * 10 + j).collect();
                let mut candidate =
                    Candidate::new(Chromosome::from_quantities(catalog, &quantities));
                candidate.fitness = Some(i as f64);
                candidate
            })
            .collect()
    }

    #[test]
    fn test_zero_rate_never_mutates() {
        let catalog = catalog(8);
        let mut rng = StdRng::seed_from_u64(42);
        let original = population(&catalog, 10);

        let mut mutated = original.clone();
        for _ in 0..50 {
            assert_eq!(mutate_population(&mut mutated, 0, 0.0, &mut rng), 0);
        }

        for (a, b) in original.iter().zip(&mutated) {
            assert_eq!(a.chromosome, b.chromosome);
            assert_eq!(a.fitness, b.fitness);
        }
    }

    #[test]
    fn test_full_rate_skips_elites() {
        let catalog = catalog(8);
        let mut rng = StdRng::seed_from_u64(7);
        let original = population(&catalog, 6);

        let mut mutated = original.clone();
        assert_eq!(mutate_population(&mut mutated, 2, 1.0, &mut rng), 4);

        assert_eq!(mutated[0].chromosome, original[0].chromosome);
        assert_eq!(mutated[1].chromosome, original[1].chromosome);
        assert_eq!(mutated[1].fitness, Some(1.0));
        assert!(mutated[2..].iter().all(|c| c.fitness.is_none()));
    }

    #[test]
    fn test_single_gene_chromosome() {
        let catalog = catalog(1);
        let mut rng = StdRng::seed_from_u64(0);
        let mut chromosome = Chromosome::from_quantities(&catalog, &[3]);

        assert_eq!(scramble(&mut chromosome, &mut rng), Some(0..=0));
        assert_eq!(chromosome.quantities(), vec![3]);
    }

    proptest! {
        #[test]
        fn prop_scramble_permutes_range(
            seed in any::<u64>(),
            quantities in proptest::collection::vec(0u32..6, 1..15),
        ) {
            let catalog = catalog(quantities.len());
            let mut rng = StdRng::seed_from_u64(seed);
            let original = Chromosome::from_quantities(&catalog, &quantities);

            let mut chromosome = original.clone();
            let range = mutate(&mut chromosome, 1.0, &mut rng);
            prop_assert!(range.is_some());
            let range = range.unwrap();

            for i in 0..quantities.len() {
                prop_assert_eq!(&chromosome.genes[i].id, &original.genes[i].id);
                if !range.contains(&i) {
                    prop_assert_eq!(chromosome.genes[i].quantity, original.genes[i].quantity);
                }
            }

            let mut before: Vec<u32> = original.genes[range.clone()].iter().map(|g| g.quantity).collect();
            let mut after: Vec<u32> = chromosome.genes[range].iter().map(|g| g.quantity).collect();
            before.sort_unstable();
            after.sort_unstable();
            prop_assert_eq!(before, after);
        }
    }
}
