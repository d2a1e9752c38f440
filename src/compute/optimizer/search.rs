//! Generation loop driving the order search.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::schema::{
    Catalog, Chromosome, ConfigError, CuisinePreferences, CuisineRegistry, OptimizationHistory,
    OptimizationProgress, OptimizationResult, OptimizationStats, OptimizerConfig, StopReason,
};

use super::chromosome::OrderRng;
use super::crossover::crossover;
use super::fitness::FitnessEvaluator;
use super::mutation::mutate_population;
use super::ranking::{RankedEntry, rank};
use super::selection::select;

/// A chromosome in the population together with its cached fitness.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub chromosome: Chromosome,
    /// Fitness, once computed. Cleared whenever the chromosome changes.
    pub fitness: Option<f64>,
}

impl Candidate {
    pub fn new(chromosome: Chromosome) -> Self {
        Self {
            chromosome,
            fitness: None,
        }
    }

    /// Cached fitness, computing it on first use.
    pub fn evaluate(&mut self, evaluator: &FitnessEvaluator) -> f64 {
        if let Some(fitness) = self.fitness {
            return fitness;
        }
        let fitness = evaluator.evaluate(&self.chromosome);
        self.fitness = Some(fitness);
        fitness
    }

    /// Forget the cached fitness.
    pub fn invalidate(&mut self) {
        self.fitness = None;
    }
}

/// Best chromosome observed so far.
#[derive(Debug, Clone)]
struct BestEver {
    chromosome: Chromosome,
    fitness: f64,
}

/// Optimization engine that runs the search.
pub struct OptimizationEngine {
    config: OptimizerConfig,
    catalog: Catalog,
    rng: OrderRng,
    evaluator: FitnessEvaluator,
    population: Vec<Candidate>,
    history: OptimizationHistory,
    best: Option<BestEver>,
    generation: usize,
    evaluations: u64,
    cancelled: Arc<AtomicBool>,
}

impl OptimizationEngine {
    /// Create a new engine, validating the configuration against the catalog.
    pub fn new(
        catalog: Catalog,
        registry: &CuisineRegistry,
        preferences: &CuisinePreferences,
        config: OptimizerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let evaluator =
            FitnessEvaluator::new(&catalog, registry, preferences, config.max_order_quantity)?;

        let rng = match config.random_seed {
            Some(seed) => OrderRng::new(seed),
            None => OrderRng::random(),
        };

        Ok(Self {
            config,
            catalog,
            rng,
            evaluator,
            population: Vec::new(),
            history: OptimizationHistory::default(),
            best: None,
            generation: 0,
            evaluations: 0,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Get cancellation handle.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Current population.
    pub fn population(&self) -> &[Candidate] {
        &self.population
    }

    /// Best chromosome and fitness seen so far.
    pub fn best(&self) -> Option<(&Chromosome, f64)> {
        self.best.as_ref().map(|b| (&b.chromosome, b.fitness))
    }

    /// Initialize the population.
    pub fn initialize(&mut self) {
        self.population = self
            .rng
            .initial_population(
                &self.catalog,
                self.config.max_order_quantity,
                self.config.population_size,
            )
            .into_iter()
            .map(Candidate::new)
            .collect();
        self.history = OptimizationHistory::default();
        self.best = None;
        self.generation = 0;
        self.evaluations = 0;
    }

    /// Evaluate candidates without a cached fitness and return every fitness in
    /// population order.
    fn evaluate_population(&mut self) -> Vec<f64> {
        let evaluator = &self.evaluator;
        let pending = self
            .population
            .iter()
            .filter(|c| c.fitness.is_none())
            .count();

        if self.config.parallel_evaluation {
            self.population.par_iter_mut().for_each(|candidate| {
                candidate.evaluate(evaluator);
            });
        } else {
            for candidate in &mut self.population {
                candidate.evaluate(evaluator);
            }
        }

        self.evaluations += pending as u64;
        self.population
            .iter_mut()
            .map(|c| c.evaluate(evaluator))
            .collect()
    }

    /// Rank the current population, record history and update the best-ever
    /// result on strict improvement.
    fn rank_generation(&mut self) -> (Vec<RankedEntry>, OptimizationProgress) {
        let fitness = self.evaluate_population();
        let ranked = rank(&fitness);

        let generation_best = ranked.first().map_or(0.0, |e| e.fitness);
        let avg_fitness = if fitness.is_empty() {
            0.0
        } else {
            fitness.iter().sum::<f64>() / fitness.len() as f64
        };
        let feasible = self
            .population
            .iter()
            .filter(|c| self.evaluator.is_feasible(&c.chromosome))
            .count();

        self.history.best_fitness.push(generation_best);
        self.history.avg_fitness.push(avg_fitness);
        self.history
            .feasible_fraction
            .push(feasible as f64 / self.population.len().max(1) as f64);

        if let Some(top) = ranked.first() {
            let improved = self
                .best
                .as_ref()
                .is_none_or(|best| top.fitness > best.fitness);
            if improved {
                log::debug!(
                    "Generation {}: new best fitness {:.6}",
                    self.generation,
                    top.fitness
                );
                self.best = Some(BestEver {
                    chromosome: self.population[top.index].chromosome.clone(),
                    fitness: top.fitness,
                });
            }
        }

        let progress = OptimizationProgress {
            generation: self.generation,
            total_generations: self.config.generations,
            generation_best,
            avg_fitness,
            best_fitness: self.best.as_ref().map_or(generation_best, |b| b.fitness),
        };

        (ranked, progress)
    }

    /// Select, breed and mutate the next generation from a ranking.
    fn step_generation(&mut self, ranked: &[RankedEntry]) {
        let elite_count = self.config.elite_count;

        let mating_pool = select(ranked, elite_count, &mut self.rng);
        let mut next = crossover(&mating_pool, &self.population, elite_count, &mut self.rng);
        let mutated = mutate_population(
            &mut next,
            elite_count,
            self.config.mutation_rate,
            &mut self.rng,
        );

        log::trace!(
            "Generation {}: {} of {} candidates mutated",
            self.generation,
            mutated,
            next.len()
        );

        self.population = next;
        self.generation += 1;
    }

    /// Check if the search should stop before the next generation.
    fn should_stop(&self, started: Instant) -> Option<StopReason> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Some(StopReason::Cancelled);
        }

        if let Some(limit) = self.config.time_limit_ms
            && started.elapsed() >= Duration::from_millis(limit)
        {
            return Some(StopReason::DeadlineReached);
        }

        None
    }

    /// Run the search with progress callback.
    ///
    /// The callback fires once per ranked generation, including the final
    /// ranking of the last population.
    pub fn run_with_callback<F>(&mut self, callback: F) -> OptimizationResult
    where
        F: Fn(&OptimizationProgress),
    {
        let started = Instant::now();

        log::info!(
            "Starting order search: {} dishes, population {}, {} generations, max quantity {}",
            self.catalog.len(),
            self.config.population_size,
            self.config.generations,
            self.config.max_order_quantity
        );

        self.initialize();

        let mut stop_reason = StopReason::MaxGenerations;
        for _ in 0..self.config.generations {
            if let Some(reason) = self.should_stop(started) {
                log::info!("Stopping after {} generations: {:?}", self.generation, reason);
                stop_reason = reason;
                break;
            }

            let (ranked, progress) = self.rank_generation();
            callback(&progress);
            self.step_generation(&ranked);
        }

        // The last step's children have not been ranked yet.
        let (_, progress) = self.rank_generation();
        callback(&progress);

        let best = self.best.clone().unwrap_or_else(|| BestEver {
            chromosome: Chromosome::empty(&self.catalog),
            fitness: 0.0,
        });
        let elapsed = started.elapsed().as_secs_f64();

        log::info!(
            "Order search finished: best fitness {:.6} after {} generations ({} evaluations, {:.3}s)",
            best.fitness,
            self.generation,
            self.evaluations,
            elapsed
        );

        OptimizationResult {
            chromosome: best.chromosome,
            fitness: best.fitness,
            stats: OptimizationStats {
                generations: self.generation,
                evaluations: self.evaluations,
                best_fitness: best.fitness,
                elapsed_seconds: elapsed,
                stop_reason,
            },
            history: self.history.clone(),
        }
    }

    /// Run the search (blocking).
    pub fn run(&mut self) -> OptimizationResult {
        self.run_with_callback(|_| {})
    }
}

/// Recommend an order: build an engine for the given catalog and run it.
pub fn run_optimization(
    catalog: &Catalog,
    registry: &CuisineRegistry,
    preferences: &CuisinePreferences,
    config: OptimizerConfig,
) -> Result<OptimizationResult, ConfigError> {
    let mut engine = OptimizationEngine::new(catalog.clone(), registry, preferences, config)?;
    Ok(engine.run())
}
