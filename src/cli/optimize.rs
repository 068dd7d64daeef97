//! Optimize command implementation.

// Progress accounting uses intentional casts
#![allow(clippy::cast_possible_truncation)]

use super::{parse_coordinate, CliError, OutputFormat};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use searoute::{
    ConstraintOracle, Coordinate, DigitalTwin, GeneticConfig, RouteGeneticOptimizer,
    RouteValidator, VesselParams,
};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the optimize command.
#[derive(Debug, Args)]
pub(crate) struct OptimizeArgs {
    /// Sea mask artifact (JSON)
    #[arg(long)]
    mask: PathBuf,

    /// Bathymetry artifact (JSON)
    #[arg(long)]
    bathymetry: PathBuf,

    /// Vessel parameters file (JSON)
    #[arg(long)]
    vessel: PathBuf,

    /// Start coordinate as lat,lon
    #[arg(long, value_parser = parse_coordinate)]
    start: Coordinate,

    /// End coordinate as lat,lon
    #[arg(long, value_parser = parse_coordinate)]
    end: Coordinate,

    /// Population size
    #[arg(short, long, default_value = "50")]
    population: usize,

    /// Number of generations
    #[arg(short, long, default_value = "100")]
    generations: usize,

    /// Number of interior waypoints
    #[arg(short, long, default_value = "12")]
    waypoints: usize,

    /// Per-waypoint mutation probability
    #[arg(long, default_value = "0.2")]
    mutation_rate: f64,

    /// Crossover probability per offspring
    #[arg(long, default_value = "0.8")]
    crossover_rate: f64,

    /// Individuals carried unchanged into the next generation
    #[arg(long, default_value = "2")]
    elite: usize,

    /// Random seed
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Penalize legs shallower than the depth margin
    #[arg(long)]
    avoid_shallow: bool,

    /// Minimum acceptable depth in meters
    #[arg(long, default_value = "10.0")]
    min_depth: f64,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Suppress the progress bar
    #[arg(short, long)]
    quiet: bool,
}

/// Execute the optimize command.
///
/// # Errors
///
/// Returns an error if artifacts fail to load, the configuration is
/// invalid, or output serialization fails.
pub(crate) fn execute(args: &OptimizeArgs) -> Result<(), CliError> {
    let oracle = ConstraintOracle::load(&args.mask, &args.bathymetry)
        .map_err(|e| CliError::new(format!("failed to load grid data: {e}")))?;
    let oracle = Arc::new(oracle);

    let vessel_file = File::open(&args.vessel)
        .map_err(|e| CliError::new(format!("failed to open {}: {e}", args.vessel.display())))?;
    let vessel: VesselParams = serde_json::from_reader(BufReader::new(vessel_file))
        .map_err(|e| CliError::new(format!("failed to parse {}: {e}", args.vessel.display())))?;

    let mut config = GeneticConfig::new(args.start, args.end);
    config.population_size = args.population;
    config.generations = args.generations;
    config.num_waypoints = args.waypoints;
    config.mutation_rate = args.mutation_rate;
    config.crossover_rate = args.crossover_rate;
    config.elite_count = args.elite;
    config.seed = args.seed;
    config.avoid_shallow_water = args.avoid_shallow;
    config.min_depth = args.min_depth;

    let optimizer = RouteGeneticOptimizer::new(Arc::clone(&oracle), DigitalTwin::new(vessel));

    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(config.generations as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} gens | best {msg}")
                .expect("valid template"),
        );
        bar
    };

    let result = optimizer
        .optimize_with_progress(&config, |stats| {
            progress.set_position((stats.generation + 1) as u64);
            progress.set_message(format!("{:.1}", stats.best_fitness));
        })
        .map_err(|e| CliError::new(e.to_string()))?;
    progress.finish_and_clear();

    // independent re-check: a fitness bug must never mask a land crossing
    let check = RouteValidator::new(oracle).validate_sea_route(&result.path);
    if result.success && !check.valid {
        eprintln!(
            "Warning: optimizer reported success but validation found land \
             at waypoints {:?}, segments {:?}",
            check.land_points, check.land_segments
        );
    }

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)
                .map_err(|e| CliError::new(e.to_string()))?;
            println!("{json}");
        }
        OutputFormat::Text => print_text(&result, check.valid),
    }

    Ok(())
}

fn print_text(result: &searoute::OptimizationResult, validated: bool) {
    if result.success {
        println!("Route found ({} waypoints):", result.path.len());
    } else {
        println!("Search finished without a clean route:");
        if let Some(message) = &result.message {
            println!("  {message}");
        }
    }
    for (idx, point) in result.path.iter().enumerate() {
        println!("  {idx:>3}: {:>9.4}, {:>9.4}", point.lat, point.lon);
    }
    println!();
    println!("  Distance: {:.1} nm", result.total_distance);
    println!("  Fuel:     {:.1} t", result.total_fuel);
    println!("  CO2:      {:.1} t", result.total_co2);
    println!("  Validated sea-only: {validated}");
}
