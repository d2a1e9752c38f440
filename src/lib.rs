//! Group order recommendation.
//!
//! Given a menu, the cuisine preferences of a group and a cap on how many
//! dishes to order, this crate searches for the quantity of each dish that
//! best balances preference, rating and cost using a genetic algorithm.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Catalog, configuration and result types
//! - `compute`: The genetic search (fitness, operators, generation loop)
//!
//! # Example
//!
//! ```rust,no_run
//! use group_order::{Menu, OptimizationEngine, OptimizerConfig};
//! use group_order::schema::CuisinePreferences;
//!
//! let menu = Menu::from_path("menu.json")?;
//! let preferences: CuisinePreferences =
//!     [("italian", 0.5), ("indian", 0.3), ("chinese", 0.2)].into_iter().collect();
//!
//! let config = OptimizerConfig {
//!     max_order_quantity: 6,
//!     ..Default::default()
//! };
//!
//! let mut engine =
//!     OptimizationEngine::new(menu.catalog.clone(), &menu.registry, &preferences, config)?;
//! let result = engine.run_with_callback(|progress| {
//!     println!("Generation {}: best fitness = {:.3}",
//!         progress.generation, progress.best_fitness);
//! });
//!
//! for line in result.order_lines(&menu.catalog) {
//!     println!("{line}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{OptimizationEngine, run_optimization};
pub use schema::{Catalog, CuisineRegistry, Menu, OptimizationResult, OptimizerConfig};
