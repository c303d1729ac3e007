// Terrain pathfinding demo: plan a route, optionally plot it and walk it.

use std::path::PathBuf;
use std::thread::sleep;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use terrain_pathfinder::utils::plot_search;
use terrain_pathfinder::{
    CostModel, GridCoord, Pathfinder, PathfinderConfig, PathfinderError, PathfinderResult,
    RandomTerrainConfig, Terrain, TerrainConfig, Walker,
};

#[derive(Parser, Debug)]
#[command(name = "pathfinder", about = "Weighted best-first route search on a terrain grid")]
struct Args {
    /// Side length of a generated terrain (ignored with --map)
    #[arg(long, default_value_t = 20)]
    size: usize,

    /// Seed for the generated terrain
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// ASCII map file: 0-9 elevation, '.' flat, '#' wall
    #[arg(long)]
    map: Option<PathBuf>,

    /// Start cell as "i,j"
    #[arg(long, default_value = "0,0")]
    start: GridCoord,

    /// End cell as "i,j" (defaults to the opposite corner)
    #[arg(long)]
    end: Option<GridCoord>,

    /// Weight of the cost-to-goal term
    #[arg(long, default_value_t = 1.0)]
    weight: f64,

    /// Extra cost per unit of elevation change
    #[arg(long, default_value_t = 1.0)]
    climb_weight: f64,

    /// Wall probability for a generated terrain
    #[arg(long, default_value_t = 0.1)]
    walls: f64,

    /// Save a plot of the search to this file (.svg, otherwise PNG)
    #[arg(long)]
    plot: Option<String>,

    /// Open the plot in an interactive gnuplot window
    #[arg(long)]
    show: bool,

    /// Walk the path, sleeping travel_cost / speed milliseconds per step
    #[arg(long)]
    walk_speed: Option<f64>,
}

fn load_terrain(args: &Args) -> PathfinderResult<Terrain> {
    let terrain_config = TerrainConfig {
        climb_weight: args.climb_weight,
    };
    match &args.map {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Terrain::parse(&text, terrain_config)
        }
        None => {
            let config = RandomTerrainConfig {
                wall_probability: args.walls,
                terrain: terrain_config,
                ..Default::default()
            };
            let mut terrain = Terrain::random(args.size, args.seed, &config)?;
            // keep the default corners open
            let far = args.size as i32 - 1;
            for corner in [GridCoord::new(0, 0), GridCoord::new(far, far)] {
                if terrain.contains(corner) {
                    terrain.set_wall(corner, false)?;
                }
            }
            Ok(terrain)
        }
    }
}

fn run(args: Args) -> PathfinderResult<()> {
    let terrain = load_terrain(&args)?;
    let n = terrain.dimension();
    if n == 0 {
        return Err(PathfinderError::InvalidTerrain("terrain has no cells".to_string()));
    }
    let end = args
        .end
        .unwrap_or_else(|| GridCoord::new(n as i32 - 1, n as i32 - 1));

    let config = PathfinderConfig {
        heuristic_weight: args.weight,
        ..Default::default()
    };
    let mut pathfinder = Pathfinder::with_config(&terrain, config);
    pathfinder.set_start(args.start)?;
    pathfinder.set_end(end)?;

    let outcome = pathfinder.compute_path();

    if args.plot.is_some() || args.show {
        let mut vis = plot_search(&pathfinder, "Terrain pathfinder")?;
        if let Some(file) = &args.plot {
            if file.ends_with(".svg") {
                vis.save_svg(file)?;
            } else {
                vis.save_png(file, 800, 800)?;
            }
            info!(file = %file, "plot saved");
        }
        if args.show {
            vis.show()?;
        }
    }

    outcome?;
    let path = pathfinder.reconstruct_path()?;
    println!(
        "Path from {} to {}: {} steps, cost {:.3}, explored {} cells",
        args.start,
        end,
        path.len(),
        pathfinder.path_cost()?,
        pathfinder.explored_count()
    );

    if let Some(speed) = args.walk_speed {
        if path.is_empty() {
            warn!("start equals end; nothing to walk");
            return Ok(());
        }
        let mut walker = Walker::new(&terrain, args.start, &path)?;
        println!("walker at {}", walker.location());
        while !walker.is_done() {
            let delay = walker.advance(speed)?;
            sleep(delay);
            println!("walker at {} after {:?}", walker.location(), delay);
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("pathfinder: {}", e);
        std::process::exit(1);
    }
}
