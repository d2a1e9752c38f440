//! Group order CLI - Recommend an order from a JSON menu and request.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::PathBuf;

use group_order::{
    Menu, OptimizationEngine,
    schema::{OptimizationProgress, OptimizationRequest},
};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_request();
        return;
    }

    if args.len() < 3 {
        eprintln!("Usage: {} <menu.json> <request.json>", args[0]);
        eprintln!();
        eprintln!("Recommend a group order from a menu and cuisine preferences.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  menu.json     Menu grouped by cuisine: {{\"<cuisine>\": [{{\"dishID\", \"dishName\", \"price\", \"rating\"}}]}}");
        eprintln!("  request.json  Cuisine preferences and optimizer configuration");
        eprintln!();
        eprintln!("An example request is printed with the --example flag.");
        std::process::exit(1);
    }

    let menu_path = PathBuf::from(&args[1]);
    let request_path = PathBuf::from(&args[2]);

    let menu = Menu::from_path(&menu_path).unwrap_or_else(|e| {
        eprintln!("Error loading menu: {}", e);
        std::process::exit(1);
    });

    let request_str = fs::read_to_string(&request_path).unwrap_or_else(|e| {
        eprintln!("Error reading request file: {}", e);
        std::process::exit(1);
    });

    let request: OptimizationRequest = serde_json::from_str(&request_str).unwrap_or_else(|e| {
        eprintln!("Error parsing request: {}", e);
        std::process::exit(1);
    });

    println!("Group Order Search");
    println!("==================");
    println!(
        "Menu: {} dishes across {} cuisines",
        menu.catalog.len(),
        menu.registry.cuisines.len()
    );
    println!("Max dishes: {}", request.config.max_order_quantity);
    println!(
        "Population: {} ({} elites), mutation rate {}",
        request.config.population_size, request.config.elite_count, request.config.mutation_rate
    );
    println!("Generations: {}", request.config.generations);
    println!();

    let mut engine = OptimizationEngine::new(
        menu.catalog.clone(),
        &menu.registry,
        &request.preferences,
        request.config.clone(),
    )
    .unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    let report_every = (request.config.generations / 10).max(1);
    let result = engine.run_with_callback(|progress: &OptimizationProgress| {
        if progress.generation % report_every == 0 {
            println!(
                "  Generation {}/{}: best={:.4}, generation best={:.4}, avg={:.4}",
                progress.generation,
                progress.total_generations,
                progress.best_fitness,
                progress.generation_best,
                progress.avg_fitness
            );
        }
    });

    println!();
    println!("Recommended order:");
    for line in result.order_lines(&menu.catalog) {
        println!("  {}", line);
    }
    println!();
    println!(
        "Dishes: {} (limit {})",
        result.total_quantity(),
        request.config.max_order_quantity
    );
    println!("Total cost: {:.2}", result.total_cost(&menu.catalog));
    println!("Fitness: {:.6}", result.fitness);
    println!(
        "Time: {:.2}s ({} generations, {} evaluations, {:?})",
        result.stats.elapsed_seconds,
        result.stats.generations,
        result.stats.evaluations,
        result.stats.stop_reason
    );
}

fn print_example_request() {
    let request = OptimizationRequest::default();

    println!("Example request (request.json):");
    match serde_json::to_string_pretty(&request) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing example: {}", e),
    }
}
