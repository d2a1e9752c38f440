//! Population ranking.

use serde::{Deserialize, Serialize};

use crate::schema::Chromosome;

use super::fitness::FitnessEvaluator;

/// A population index paired with its fitness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub index: usize,
    pub fitness: f64,
}

/// Rank fitness values, best first. Equal fitness keeps population order.
pub fn rank(fitness: &[f64]) -> Vec<RankedEntry> {
    let mut ranked: Vec<RankedEntry> = fitness
        .iter()
        .enumerate()
        .map(|(index, &fitness)| RankedEntry { index, fitness })
        .collect();

    // Stable sort, so ties stay in index order.
    ranked.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
    ranked
}

/// Evaluate and rank a population of chromosomes.
pub fn rank_population(
    population: &[Chromosome],
    evaluator: &FitnessEvaluator,
) -> Vec<RankedEntry> {
    let fitness: Vec<f64> = population.iter().map(|c| evaluator.evaluate(c)).collect();
    rank(&fitness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Catalog, CatalogEntry, CuisinePreferences, CuisineRegistry};

    #[test]
    fn test_rank_descending_with_stable_ties() {
        let ranked = rank(&[0.5, 2.0, -1.0, 2.0, 0.5]);
        let order: Vec<usize> = ranked.iter().map(|e| e.index).collect();
        assert_eq!(order, vec![1, 3, 0, 4, 2]);
        assert_eq!(ranked[0].fitness, 2.0);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank(&[]).is_empty());
    }

    #[test]
    fn test_rank_population() {
        let catalog = Catalog::new(vec![
            ("d1".into(), CatalogEntry::new("A", 4.0, 10.0)),
            ("d2".into(), CatalogEntry::new("A", 2.0, 5.0)),
            ("d3".into(), CatalogEntry::new("B", 5.0, 8.0)),
        ])
        .unwrap();
        let registry = CuisineRegistry::from_catalog(&catalog);
        let preferences: CuisinePreferences = [("A", 0.5), ("B", 0.5)].into_iter().collect();
        let evaluator = FitnessEvaluator::new(&catalog, &registry, &preferences, 2).unwrap();

        let population = vec![
            Chromosome::empty(&catalog),
            Chromosome::from_quantities(&catalog, &[2, 1, 0]),
            Chromosome::from_quantities(&catalog, &[1, 0, 1]),
        ];

        let ranked = rank_population(&population, &evaluator);
        let order: Vec<usize> = ranked.iter().map(|e| e.index).collect();
        assert_eq!(order, vec![2, 0, 1]);
        assert!((ranked[0].fitness - 1.5).abs() < 1e-12);
        assert!(ranked[2].fitness < 0.0);
    }
}
