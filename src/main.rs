use clap::Parser;
use rustc_hash::FxHashMap;
use tracing_subscriber::EnvFilter;

use platform_pathfinding::algorithms::common::select_rule;
use platform_pathfinding::config::Config;
use platform_pathfinding::debug::render_graph;
use platform_pathfinding::error::MapError;
use platform_pathfinding::grid::TileMap;
use platform_pathfinding::pathfinder::Pathfinder;
use platform_pathfinding::statistics::PathStatistics;

fn load_map(config: &Config) -> Result<TileMap, MapError> {
    let map = match &config.map {
        Some(path) => TileMap::load(path)?,
        None => TileMap::random(
            config.width,
            config.height,
            config.num_tiles,
            config.platformer,
            config.seed,
        ),
    };
    Ok(map.with_cell_size(config.cell_size, config.cell_size))
}

fn main() {
    let config = Config::parse();

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let map = match load_map(&config) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Failed to load map: {}", e);
            std::process::exit(1);
        }
    };

    let rule = select_rule(config.platformer);
    println!("Grid size: {}x{}", map.width(), map.height());
    println!("Solid tiles: {}", map.solid_count());
    println!("Ruleset: {}", rule.name());

    let Some(start) = config.start.or(map.start()) else {
        eprintln!("No start position: pass --start or mark one with 'S'");
        std::process::exit(1);
    };

    let mut pathfinder = Pathfinder::new(map, config.costs());

    if config.reachable {
        let reach = pathfinder.enumerate_reachable_positions(start, config.platformer);
        if !config.no_visualization {
            println!();
            print!("{}", render_graph(pathfinder.graph(), &reach.overlay()));
        }
        println!();
        print!("{}", reach);
        return;
    }

    let Some(goal) = config.goal.or(pathfinder.grid().goal()) else {
        eprintln!("No goal position: pass --goal or mark one with 'G'");
        std::process::exit(1);
    };
    println!("Start: {}, Goal: {}", start, goal);

    match pathfinder.find_grid_path(start, goal, config.platformer) {
        Some(path) => {
            if !config.no_visualization {
                let mut overlay = FxHashMap::default();
                overlay.insert(start, 'S');
                overlay.insert(goal, 'G');
                println!();
                print!("{}", render_graph(pathfinder.graph(), &overlay));
            }

            let optimal = pathfinder.optimal_cost(start, goal, config.platformer);
            let stats = PathStatistics::new(rule.name(), &path, optimal);

            println!("\n=== PATH ===");
            let route: Vec<String> = path.coords.iter().map(|c| c.to_string()).collect();
            println!("{}", route.join(" -> "));
            println!("\n=== FINAL RESULTS ===");
            print!("{}", stats);
        }
        None => {
            println!("No path exists from {} to {}", start, goal);
            if config.platformer {
                println!("Platformer goals need a solid tile directly below them");
            }
        }
    }
}
