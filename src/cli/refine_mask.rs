//! Refine-mask command implementation.

use super::{parse_coordinate, CliError};
use clap::Args;
use searoute::geo::{default_ocean_seeds, flood_fill_sea, SeaMask};
use searoute::Coordinate;
use std::path::PathBuf;

/// Arguments for the refine-mask command.
#[derive(Debug, Args)]
pub(crate) struct RefineMaskArgs {
    /// Input sea mask artifact (JSON)
    #[arg(required = true)]
    input: PathBuf,

    /// Output path for the refined mask
    #[arg(short, long)]
    output: PathBuf,

    /// Extra flood seeds as lat,lon (may repeat); the built-in deep-ocean
    /// seeds are always used
    #[arg(long = "seed", value_parser = parse_coordinate)]
    seeds: Vec<Coordinate>,
}

/// Execute the refine-mask command.
///
/// # Errors
///
/// Returns an error if the mask fails to load or the refined mask cannot
/// be written.
pub(crate) fn execute(args: &RefineMaskArgs) -> Result<(), CliError> {
    let mask = SeaMask::from_file(&args.input)
        .map_err(|e| CliError::new(format!("failed to load {}: {e}", args.input.display())))?;

    let mut seeds = default_ocean_seeds();
    seeds.extend_from_slice(&args.seeds);

    let before = mask.cells().iter().filter(|&&c| c == 0).count();
    let refined = flood_fill_sea(&mask, &seeds);
    let after = refined.cells().iter().filter(|&&c| c == 0).count();

    refined
        .save(&args.output)
        .map_err(|e| CliError::new(format!("failed to write {}: {e}", args.output.display())))?;

    println!("Refined mask written to {}", args.output.display());
    println!("  sea cells before: {before}");
    println!("  sea cells after:  {after}");
    println!("  closed off:       {}", before.saturating_sub(after));

    Ok(())
}
