//! CLI command implementations for Searoute.

pub(crate) mod optimize;
pub(crate) mod refine_mask;
pub(crate) mod validate;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;

/// Output format for the `optimize` and `validate` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

/// Parse a "lat,lon" argument into a coordinate.
pub(crate) fn parse_coordinate(s: &str) -> Result<searoute::Coordinate, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected lat,lon, got '{s}'"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("bad latitude '{lat}': {e}"))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|e| format!("bad longitude '{lon}': {e}"))?;
    Ok(searoute::Coordinate::new(lat, lon))
}
