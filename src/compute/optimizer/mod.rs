//! Genetic search over dish quantities.
//!
//! # Overview
//!
//! The search consists of:
//!
//! - **Chromosomes** (`chromosome`): Seedable RNG and random initial orders
//! - **Fitness** (`fitness`): Cuisine-aggregated score with a quantity penalty
//! - **Ranking** (`ranking`): Fitness-descending, order-stable ranking
//! - **Selection** (`selection`): Elitist roulette-wheel mating pools
//! - **Crossover** (`crossover`): Uniform gene exchange between paired parents
//! - **Mutation** (`mutation`): Scramble of a random locus range
//! - **Search** (`search`): The generation loop and best-ever tracking
//!
//! # Example
//!
//! ```rust,no_run
//! use group_order::compute::optimizer::run_optimization;
//! use group_order::schema::{
//!     Catalog, CatalogEntry, CuisinePreferences, CuisineRegistry, OptimizerConfig,
//! };
//!
//! let catalog = Catalog::new(vec![
//!     ("d1".into(), CatalogEntry::new("A", 4.0, 10.0)),
//!     ("d2".into(), CatalogEntry::new("A", 2.0, 5.0)),
//!     ("d3".into(), CatalogEntry::new("B", 5.0, 8.0)),
//! ])?;
//! let registry = CuisineRegistry::from_catalog(&catalog);
//! let preferences: CuisinePreferences = [("A", 0.5), ("B", 0.5)].into_iter().collect();
//!
//! let config = OptimizerConfig {
//!     max_order_quantity: 2,
//!     population_size: 10,
//!     elite_count: 2,
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let result = run_optimization(&catalog, &registry, &preferences, config)?;
//! println!("Best fitness: {:.3}", result.fitness);
//! for line in result.order_lines(&catalog) {
//!     println!("{line}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod chromosome;
mod crossover;
mod fitness;
mod mutation;
mod ranking;
mod search;
mod selection;

pub use chromosome::OrderRng;
pub use crossover::{breed, crossover};
pub use fitness::{CuisineScore, FitnessBreakdown, FitnessEvaluator};
pub use mutation::{mutate, mutate_population, scramble};
pub use ranking::{RankedEntry, rank, rank_population};
pub use search::{Candidate, OptimizationEngine, run_optimization};
pub use selection::{roulette_wheel, select};
