//! Configuration types for an optimization run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{CatalogError, CuisineRegistry};

fn default_population_size() -> usize {
    100
}
fn default_elite_count() -> usize {
    20
}
fn default_mutation_rate() -> f64 {
    0.01
}
fn default_generations() -> usize {
    100
}
fn default_parallel_evaluation() -> bool {
    true
}

/// Genetic search parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Maximum number of dishes the group may order. Initial chromosomes
    /// distribute exactly this many units; exceeding it negates fitness.
    pub max_order_quantity: u32,
    /// Number of chromosomes per generation.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Top-ranked chromosomes carried over unchanged each generation.
    #[serde(default = "default_elite_count")]
    pub elite_count: usize,
    /// Probability (0.0-1.0) that a non-elite chromosome is scrambled.
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// Number of select/crossover/mutate cycles.
    #[serde(default = "default_generations")]
    pub generations: usize,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Wall-clock budget, checked between generations.
    #[serde(default)]
    pub time_limit_ms: Option<u64>,
    /// Evaluate fitness on the rayon thread pool.
    #[serde(default = "default_parallel_evaluation")]
    pub parallel_evaluation: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_order_quantity: 4,
            population_size: default_population_size(),
            elite_count: default_elite_count(),
            mutation_rate: default_mutation_rate(),
            generations: default_generations(),
            random_seed: None,
            time_limit_ms: None,
            parallel_evaluation: default_parallel_evaluation(),
        }
    }
}

impl OptimizerConfig {
    /// Validate search parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.elite_count >= self.population_size {
            return Err(ConfigError::TooManyElites {
                elite_count: self.elite_count,
                population_size: self.population_size,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidMutationRate(self.mutation_rate));
        }
        Ok(())
    }
}

/// Group preference weight per cuisine.
///
/// Weights are kept sorted by cuisine name so the total is summed in the same
/// order for every instance built from the same weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuisinePreferences(BTreeMap<String, f64>);

impl CuisinePreferences {
    pub fn new(weights: BTreeMap<String, f64>) -> Self {
        Self(weights)
    }

    /// Weight of a cuisine; absent cuisines weigh nothing.
    pub fn weight(&self, cuisine: &str) -> f64 {
        self.0.get(cuisine).copied().unwrap_or(0.0)
    }

    /// Sum of all supplied weights, used to normalise per-cuisine scores.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.0.iter()
    }

    /// Reject negative or non-finite weights and warn about cuisines the
    /// registry does not know.
    pub fn validate(&self, registry: &CuisineRegistry) -> Result<(), ConfigError> {
        for (cuisine, &weight) in &self.0 {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    cuisine: cuisine.clone(),
                    weight,
                });
            }
            if registry.index_of(cuisine).is_none() {
                log::warn!(
                    "Preference for unregistered cuisine {} still counts toward the total",
                    cuisine
                );
            }
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for CuisinePreferences {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Request document consumed by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRequest {
    /// Cuisine weights aggregated from the group's members.
    pub preferences: CuisinePreferences,
    /// Search parameters.
    pub config: OptimizerConfig,
}

impl Default for OptimizationRequest {
    fn default() -> Self {
        Self {
            preferences: [("italian", 0.4), ("indian", 0.35), ("chinese", 0.25)]
                .into_iter()
                .collect(),
            config: OptimizerConfig {
                random_seed: Some(42),
                ..Default::default()
            },
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be non-zero")]
    EmptyPopulation,
    #[error("Elite count {elite_count} must be smaller than population size {population_size}")]
    TooManyElites {
        elite_count: usize,
        population_size: usize,
    },
    #[error("Mutation rate must lie in [0, 1], got {0}")]
    InvalidMutationRate(f64),
    #[error("Cuisine {cuisine} has invalid weight {weight}")]
    InvalidWeight { cuisine: String, weight: f64 },
    #[error("Catalog validation failed: {0}")]
    Catalog(#[from] CatalogError),
}
