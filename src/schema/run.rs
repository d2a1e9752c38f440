//! Progress, history and result types of an optimization run.

use serde::{Deserialize, Serialize};

use super::{Catalog, Chromosome, OrderLine};

/// Progress update during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationProgress {
    /// Index of the generation just ranked.
    pub generation: usize,
    /// Configured number of generations.
    pub total_generations: usize,
    /// Best fitness in this generation.
    pub generation_best: f64,
    /// Mean fitness of this generation.
    pub avg_fitness: f64,
    /// Best fitness seen so far.
    pub best_fitness: f64,
}

/// Per-generation statistics, one entry per ranked population (including the
/// final ranking after the last generation).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptimizationHistory {
    /// Best fitness per generation.
    pub best_fitness: Vec<f64>,
    /// Mean fitness per generation.
    pub avg_fitness: Vec<f64>,
    /// Fraction of chromosomes within the order-quantity limit.
    pub feasible_fraction: Vec<f64>,
}

impl OptimizationHistory {
    pub fn len(&self) -> usize {
        self.best_fitness.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best_fitness.is_empty()
    }
}

/// Reason the generation loop ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StopReason {
    /// Ran the configured number of generations.
    MaxGenerations,
    /// Cancelled through the engine's cancel handle.
    Cancelled,
    /// Wall-clock limit exceeded.
    DeadlineReached,
}

/// Statistics from a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationStats {
    /// Generations actually completed.
    pub generations: usize,
    /// Fitness computations performed (cached scores are not counted).
    pub evaluations: u64,
    /// Best fitness achieved.
    pub best_fitness: f64,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
    pub stop_reason: StopReason,
}

/// Best chromosome ever observed during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub chromosome: Chromosome,
    pub fitness: f64,
    pub stats: OptimizationStats,
    pub history: OptimizationHistory,
}

impl OptimizationResult {
    /// Units ordered by the recommended chromosome.
    pub fn total_quantity(&self) -> u64 {
        self.chromosome.total_quantity()
    }

    pub fn total_cost(&self, catalog: &Catalog) -> f64 {
        self.chromosome.total_cost(catalog)
    }

    pub fn order_lines(&self, catalog: &Catalog) -> Vec<OrderLine> {
        self.chromosome.order_lines(catalog)
    }
}
