//! Quick order search performance test

use group_order::{
    OptimizerConfig, run_optimization,
    schema::{Catalog, CatalogEntry, CuisinePreferences, CuisineRegistry},
};
use std::time::Instant;

const CUISINES: [(&str, f64); 8] = [
    ("indian", 0.20),
    ("italian", 0.15),
    ("afghani", 0.08),
    ("chinese", 0.14),
    ("kenyan", 0.0),
    ("nigerian", 0.20),
    ("ugandan", 0.10),
    ("tanzanian", 0.13),
];

fn menu(dishes: usize) -> Result<(Catalog, CuisineRegistry), Box<dyn std::error::Error>> {
    let catalog = Catalog::new(
        (0..dishes)
            .map(|i| {
                let (cuisine, _) = CUISINES[i % CUISINES.len()];
                let rating = 2.0 + ((i * 7) % 31) as f64 / 10.0;
                let price = 4.0 + ((i * 13) % 17) as f64;
                (format!("dish-{i}"), CatalogEntry::new(cuisine, rating, price))
            })
            .collect(),
    )?;
    let registry = CuisineRegistry::from_catalog(&catalog);
    Ok((catalog, registry))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let preferences: CuisinePreferences = CUISINES.into_iter().collect();

    println!("=== Order Search Performance Test ===\n");

    // Test different menu sizes
    for dishes in [32, 128, 512] {
        println!("Menu size: {} dishes", dishes);

        let (catalog, registry) = menu(dishes)?;
        let config = OptimizerConfig {
            max_order_quantity: 6,
            population_size: 100,
            elite_count: 20,
            mutation_rate: 0.05,
            generations: 100,
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let result = run_optimization(&catalog, &registry, &preferences, config)?;
        let elapsed = start.elapsed();

        let evals_per_sec = result.stats.evaluations as f64 / elapsed.as_secs_f64();

        println!("  Generations:    {}", result.stats.generations);
        println!("  Evaluations:    {}", result.stats.evaluations);
        println!("  Elapsed:        {:.2}s", elapsed.as_secs_f64());
        println!("  Evals/sec:      {:.1}", evals_per_sec);
        println!("  Best fitness:   {:.4}", result.fitness);
        println!(
            "  Order:          {} dishes, {:.2} total",
            result.total_quantity(),
            result.total_cost(&catalog)
        );
        println!();
    }

    println!("=== Scalability Test (fixed 128-dish menu) ===\n");

    let (catalog, registry) = menu(128)?;

    // Test different population sizes
    for population_size in [20, 50, 100, 200] {
        let config = OptimizerConfig {
            max_order_quantity: 6,
            population_size,
            elite_count: population_size / 5,
            generations: 50,
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let result = run_optimization(&catalog, &registry, &preferences, config)?;
        let elapsed = start.elapsed();

        println!(
            "Population {}: {} evals in {:.2}s ({:.1} evals/sec), best {:.4}",
            population_size,
            result.stats.evaluations,
            elapsed.as_secs_f64(),
            result.stats.evaluations as f64 / elapsed.as_secs_f64(),
            result.fitness
        );
    }

    Ok(())
}
