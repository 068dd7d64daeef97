//! Validate command implementation.

use super::{CliError, OutputFormat};
use clap::Args;
use searoute::{ConstraintOracle, Coordinate, RouteValidator};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

/// A saved route: the `path` field of an optimization result.
#[derive(Debug, Deserialize)]
struct RouteFile {
    path: Vec<Coordinate>,
}

/// Machine-readable validation report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport {
    valid: bool,
    land_points: Vec<usize>,
    land_segments: Vec<usize>,
}

/// Arguments for the validate command.
#[derive(Debug, Args)]
pub(crate) struct ValidateArgs {
    /// Sea mask artifact (JSON)
    #[arg(long)]
    mask: PathBuf,

    /// Bathymetry artifact (JSON)
    #[arg(long)]
    bathymetry: PathBuf,

    /// Route file (JSON with a "path" array of lat/lon objects)
    #[arg(required = true)]
    route: PathBuf,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if artifacts or the route file fail to load. A route
/// that crosses land is a normal (non-error) report.
pub(crate) fn execute(args: &ValidateArgs) -> Result<(), CliError> {
    let oracle = ConstraintOracle::load(&args.mask, &args.bathymetry)
        .map_err(|e| CliError::new(format!("failed to load grid data: {e}")))?;

    let route_file = File::open(&args.route)
        .map_err(|e| CliError::new(format!("failed to open {}: {e}", args.route.display())))?;
    let route: RouteFile = serde_json::from_reader(BufReader::new(route_file))
        .map_err(|e| CliError::new(format!("failed to parse {}: {e}", args.route.display())))?;

    let check = RouteValidator::new(Arc::new(oracle)).validate_sea_route(&route.path);

    match args.format {
        OutputFormat::Json => {
            let report = JsonReport {
                valid: check.valid,
                land_points: check.land_points,
                land_segments: check.land_segments,
            };
            let json =
                serde_json::to_string_pretty(&report).map_err(|e| CliError::new(e.to_string()))?;
            println!("{json}");
        }
        OutputFormat::Text => {
            if check.valid {
                println!(
                    "Route is sea-only: {} waypoints, {} legs checked",
                    route.path.len(),
                    route.path.len().saturating_sub(1)
                );
            } else {
                println!("Route crosses land:");
                for idx in &check.land_points {
                    let p = route.path[*idx];
                    println!("  waypoint {idx} on land at {:.4}, {:.4}", p.lat, p.lon);
                }
                for idx in &check.land_segments {
                    println!("  leg {idx} -> {} crosses land", idx + 1);
                }
            }
        }
    }

    Ok(())
}
