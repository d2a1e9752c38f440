//! Fitness model for candidate orders.
//!
//! For every registered cuisine `c` the evaluator combines
//!
//! - `qty_fit   = 1 / (1 + exp(-(qty[c] - 1)))`
//! - `rating_fit = rating[c] / total_rating`
//! - `cost_fit   = cost[c] / total_cost`
//! - `score_fit  = weight[c] / total_weight`
//!
//! into `score_fit * (3 * rating_fit - 2 * cost_fit + 2 * qty_fit)` and sums the
//! contributions. Orders above the quantity limit have their fitness negated.
//! Zero denominators make the corresponding ratio zero.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::schema::{
    Catalog, CatalogError, Chromosome, ConfigError, CuisinePreferences, CuisineRegistry, DishId,
};

#[derive(Debug, Clone, Copy)]
struct DishTraits {
    cuisine: usize,
    rating: f64,
    price: f64,
}

/// Scores chromosomes against a catalog and group preferences.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    cuisines: Vec<String>,
    weights: Vec<f64>,
    total_weight: f64,
    dishes: Vec<(DishId, DishTraits)>,
    index: HashMap<DishId, usize>,
    max_quantity: u64,
}

impl FitnessEvaluator {
    /// Create a new fitness evaluator.
    pub fn new(
        catalog: &Catalog,
        registry: &CuisineRegistry,
        preferences: &CuisinePreferences,
        max_quantity: u32,
    ) -> Result<Self, ConfigError> {
        catalog.validate_against(registry)?;
        preferences.validate(registry)?;

        let mut dishes = Vec::with_capacity(catalog.len());
        let mut index = HashMap::with_capacity(catalog.len());
        for (position, (id, entry)) in catalog.iter().enumerate() {
            let cuisine = registry.index_of(&entry.cuisine).ok_or_else(|| {
                CatalogError::UnknownCuisine {
                    dish: id.clone(),
                    cuisine: entry.cuisine.clone(),
                }
            })?;
            dishes.push((
                id.clone(),
                DishTraits {
                    cuisine,
                    rating: entry.rating,
                    price: entry.price,
                },
            ));
            index.insert(id.clone(), position);
        }

        Ok(Self {
            cuisines: registry.cuisines.clone(),
            weights: registry
                .cuisines
                .iter()
                .map(|c| preferences.weight(c))
                .collect(),
            total_weight: preferences.total(),
            dishes,
            index,
            max_quantity: max_quantity as u64,
        })
    }

    /// Order-quantity limit above which fitness is negated.
    pub fn max_quantity(&self) -> u64 {
        self.max_quantity
    }

    /// Whether the chromosome respects the quantity limit.
    pub fn is_feasible(&self, chromosome: &Chromosome) -> bool {
        chromosome.total_quantity() <= self.max_quantity
    }

    /// Fitness of one chromosome.
    ///
    /// Genes are matched to the catalog by id. A gene whose id is not in the
    /// catalog still counts toward the quantity limit but adds nothing to any
    /// cuisine's terms.
    pub fn evaluate(&self, chromosome: &Chromosome) -> f64 {
        let totals = self.aggregate(chromosome);
        if totals.quantity == 0 {
            return 0.0;
        }

        let fitness: f64 = (0..self.cuisines.len())
            .map(|c| self.fit_terms(&totals, c).contribution())
            .sum();

        if totals.quantity > self.max_quantity {
            -fitness
        } else {
            fitness
        }
    }

    /// Per-cuisine decomposition of the fitness of one chromosome.
    pub fn breakdown(&self, chromosome: &Chromosome) -> FitnessBreakdown {
        let totals = self.aggregate(chromosome);
        let penalized = totals.quantity > self.max_quantity;

        if totals.quantity == 0 {
            return FitnessBreakdown {
                cuisines: Vec::new(),
                total_quantity: 0,
                penalized,
                fitness: 0.0,
            };
        }

        let cuisines: Vec<CuisineScore> = (0..self.cuisines.len())
            .map(|c| self.cuisine_terms(&totals, c))
            .collect();
        let raw: f64 = cuisines.iter().map(|s| s.contribution).sum();

        FitnessBreakdown {
            cuisines,
            total_quantity: totals.quantity,
            penalized,
            fitness: if penalized { -raw } else { raw },
        }
    }

    fn aggregate(&self, chromosome: &Chromosome) -> Totals {
        let n = self.cuisines.len();
        let mut totals = Totals {
            cuisine_quantity: vec![0; n],
            cuisine_rating: vec![0.0; n],
            cuisine_cost: vec![0.0; n],
            quantity: 0,
            rating: 0.0,
            cost: 0.0,
        };

        for (position, gene) in chromosome.genes.iter().enumerate() {
            totals.quantity += gene.quantity as u64;
            if gene.quantity == 0 {
                continue;
            }

            let Some(dish) = self.traits(position, &gene.id) else {
                continue;
            };
            let quantity = gene.quantity as f64;

            totals.cuisine_quantity[dish.cuisine] += gene.quantity as u64;
            totals.cuisine_rating[dish.cuisine] += dish.rating * quantity;
            totals.rating += dish.rating * quantity;
            totals.cuisine_cost[dish.cuisine] += dish.price * quantity;
            totals.cost += dish.price * quantity;
        }

        totals
    }

    /// Traits for a gene, using its locus when it matches and the id index otherwise.
    fn traits(&self, position: usize, id: &str) -> Option<DishTraits> {
        match self.dishes.get(position) {
            Some((dish_id, traits)) if dish_id == id => Some(*traits),
            _ => self.index.get(id).map(|&i| self.dishes[i].1),
        }
    }

    fn fit_terms(&self, totals: &Totals, c: usize) -> FitTerms {
        FitTerms {
            quantity: logistic(totals.cuisine_quantity[c] as f64 - 1.0),
            rating: share(totals.cuisine_rating[c], totals.rating),
            cost: share(totals.cuisine_cost[c], totals.cost),
            score: share(self.weights[c], self.total_weight),
        }
    }

    fn cuisine_terms(&self, totals: &Totals, c: usize) -> CuisineScore {
        let terms = self.fit_terms(totals, c);
        CuisineScore {
            cuisine: self.cuisines[c].clone(),
            quantity: totals.cuisine_quantity[c],
            quantity_fit: terms.quantity,
            rating_fit: terms.rating,
            cost_fit: terms.cost,
            score_fit: terms.score,
            contribution: terms.contribution(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct FitTerms {
    quantity: f64,
    rating: f64,
    cost: f64,
    score: f64,
}

impl FitTerms {
    fn contribution(&self) -> f64 {
        self.score * (3.0 * self.rating - 2.0 * self.cost + 2.0 * self.quantity)
    }
}

struct Totals {
    cuisine_quantity: Vec<u64>,
    cuisine_rating: Vec<f64>,
    cuisine_cost: Vec<f64>,
    quantity: u64,
    rating: f64,
    cost: f64,
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn share(part: f64, whole: f64) -> f64 {
    if whole == 0.0 { 0.0 } else { part / whole }
}

/// Terms of a single cuisine's fitness contribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuisineScore {
    pub cuisine: String,
    pub quantity: u64,
    pub quantity_fit: f64,
    pub rating_fit: f64,
    pub cost_fit: f64,
    pub score_fit: f64,
    pub contribution: f64,
}

/// Fitness of a chromosome broken down by cuisine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessBreakdown {
    /// Empty when nothing is ordered.
    pub cuisines: Vec<CuisineScore>,
    pub total_quantity: u64,
    pub penalized: bool,
    pub fitness: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CatalogEntry, Dish};
    use proptest::prelude::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            ("d1".into(), CatalogEntry::new("A", 4.0, 10.0)),
            ("d2".into(), CatalogEntry::new("A", 2.0, 5.0)),
            ("d3".into(), CatalogEntry::new("B", 5.0, 8.0)),
        ])
        .unwrap()
    }

    fn evaluator(preferences: &[(&str, f64)], max_quantity: u32) -> FitnessEvaluator {
        let catalog = catalog();
        let registry = CuisineRegistry::from_catalog(&catalog);
        let preferences: CuisinePreferences = preferences.iter().copied().collect();
        FitnessEvaluator::new(&catalog, &registry, &preferences, max_quantity).unwrap()
    }

    #[test]
    fn test_reference_order() {
        let evaluator = evaluator(&[("A", 0.5), ("B", 0.5)], 2);
        let chromosome = Chromosome::from_quantities(&catalog(), &[1, 0, 1]);

        let breakdown = evaluator.breakdown(&chromosome);
        assert!(!breakdown.penalized);
        assert_eq!(breakdown.total_quantity, 2);

        let a = &breakdown.cuisines[0];
        assert_eq!(a.cuisine, "A");
        assert!((a.quantity_fit - 0.5).abs() < 1e-12);
        assert!((a.rating_fit - 4.0 / 9.0).abs() < 1e-12);
        assert!((a.cost_fit - 10.0 / 18.0).abs() < 1e-12);
        assert!((a.contribution - 11.0 / 18.0).abs() < 1e-12);

        let b = &breakdown.cuisines[1];
        assert!((b.contribution - 16.0 / 18.0).abs() < 1e-12);

        let fitness = evaluator.evaluate(&chromosome);
        assert!((fitness - 1.5).abs() < 1e-12);
        assert_eq!(fitness, breakdown.fitness);
    }

    #[test]
    fn test_empty_order_scores_zero() {
        let evaluator = evaluator(&[("A", 0.5), ("B", 0.5)], 2);
        let chromosome = Chromosome::empty(&catalog());
        assert_eq!(evaluator.evaluate(&chromosome), 0.0);
        assert!(evaluator.breakdown(&chromosome).cuisines.is_empty());
    }

    #[test]
    fn test_over_limit_is_negated() {
        let tight = evaluator(&[("A", 0.5), ("B", 0.5)], 2);
        let loose = evaluator(&[("A", 0.5), ("B", 0.5)], 10);
        let chromosome = Chromosome::from_quantities(&catalog(), &[2, 0, 1]);

        let penalized = tight.evaluate(&chromosome);
        let unpenalized = loose.evaluate(&chromosome);
        assert!(unpenalized > 0.0);
        assert_eq!(penalized, -unpenalized);
        assert!(!tight.is_feasible(&chromosome));
    }

    #[test]
    fn test_zero_weights_do_not_produce_nan() {
        let evaluator = evaluator(&[("A", 0.0), ("B", 0.0)], 5);
        let chromosome = Chromosome::from_quantities(&catalog(), &[1, 1, 1]);
        assert_eq!(evaluator.evaluate(&chromosome), 0.0);
    }

    #[test]
    fn test_zero_ratings_and_prices() {
        let catalog = Catalog::new(vec![
            ("x".into(), CatalogEntry::new("A", 0.0, 0.0)),
            ("y".into(), CatalogEntry::new("B", 0.0, 0.0)),
        ])
        .unwrap();
        let registry = CuisineRegistry::from_catalog(&catalog);
        let preferences: CuisinePreferences = [("A", 1.0), ("B", 1.0)].into_iter().collect();
        let evaluator = FitnessEvaluator::new(&catalog, &registry, &preferences, 5).unwrap();

        let chromosome = Chromosome::from_quantities(&catalog, &[1, 0]);
        let fitness = evaluator.evaluate(&chromosome);

        // Only the quantity term survives: A has qty 1 (0.5), B has qty 0.
        let expected = 0.5 * 2.0 * 0.5 + 0.5 * 2.0 * logistic(-1.0);
        assert!(fitness.is_finite());
        assert!((fitness - expected).abs() < 1e-12);
    }

    #[test]
    fn test_gene_order_independent_of_locus() {
        let evaluator = evaluator(&[("A", 0.3), ("B", 0.7)], 4);
        let catalog = catalog();
        let chromosome = Chromosome::from_quantities(&catalog, &[1, 2, 1]);

        let mut reversed = chromosome.clone();
        reversed.genes.reverse();

        assert_eq!(evaluator.evaluate(&chromosome), evaluator.evaluate(&reversed));
    }

    #[test]
    fn test_uncatalogued_gene_counts_only_toward_limit() {
        let catalog = catalog();
        let mut chromosome = Chromosome::from_quantities(&catalog, &[1, 0, 1]);
        chromosome.genes.push(Dish::new("zz", 1));

        let within = evaluator(&[("A", 0.5), ("B", 0.5)], 3);
        assert!((within.evaluate(&chromosome) - 1.5).abs() < 1e-12);

        let over = evaluator(&[("A", 0.5), ("B", 0.5)], 2);
        assert!(!over.is_feasible(&chromosome));
        assert!((over.evaluate(&chromosome) + 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_cuisine_rejected() {
        let catalog = catalog();
        let registry = CuisineRegistry {
            cuisines: vec!["A".into(), "C".into()],
            total_dishes: 3,
        };
        let result =
            FitnessEvaluator::new(&catalog, &registry, &CuisinePreferences::default(), 2);
        assert!(matches!(
            result,
            Err(ConfigError::Catalog(CatalogError::UnknownCuisine { .. }))
        ));
    }

    proptest! {
        #[test]
        fn prop_penalty_flips_sign(quantities in proptest::collection::vec(0u32..5, 3)) {
            let tight = evaluator(&[("A", 0.4), ("B", 0.6)], 2);
            let loose = evaluator(&[("A", 0.4), ("B", 0.6)], u32::MAX);
            let chromosome = Chromosome::from_quantities(&catalog(), &quantities);

            let total: u32 = quantities.iter().sum();
            let penalized = tight.evaluate(&chromosome);
            let unpenalized = loose.evaluate(&chromosome);

            prop_assert!(penalized.is_finite());
            if total == 0 {
                prop_assert_eq!(penalized, 0.0);
            } else if total > 2 {
                prop_assert_eq!(penalized, -unpenalized);
            } else {
                prop_assert_eq!(penalized, unpenalized);
            }
        }
    }
}
