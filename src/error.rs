//! Error types for data loading and search configuration.

use std::fmt;
use std::io;

/// Error raised while loading the sea mask or bathymetry artifacts.
///
/// Raised once at oracle construction; queries on a constructed oracle
/// never fail.
#[derive(Debug)]
pub enum DataError {
    /// File I/O failed.
    Io(io::Error),
    /// The artifact is not valid JSON.
    Parse(serde_json::Error),
    /// The artifact parsed but its contents are inconsistent.
    Invalid(String),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse(e) => write!(f, "parse error: {e}"),
            Self::Invalid(reason) => write!(f, "invalid grid data: {reason}"),
        }
    }
}

impl std::error::Error for DataError {}

impl From<io::Error> for DataError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for DataError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Error raised by [`crate::GeneticConfig`] validation.
///
/// Invalid configuration is rejected before any search work begins and is
/// never silently clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A start or end coordinate is outside the valid lat/lon range.
    CoordinateOutOfRange {
        /// Which endpoint ("start" or "end").
        name: &'static str,
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lon: f64,
    },
    /// Population size must be at least 1.
    EmptyPopulation,
    /// Generation count must be at least 1.
    ZeroGenerations,
    /// A probability is outside [0, 1].
    RateOutOfRange {
        /// Which rate ("mutationRate" or "crossoverRate").
        name: &'static str,
        /// The offending value.
        value: f64,
    },
    /// Elite count exceeds population size.
    EliteExceedsPopulation {
        /// Configured elite count.
        elite_count: usize,
        /// Configured population size.
        population_size: usize,
    },
    /// Minimum depth must be non-negative.
    NegativeMinDepth {
        /// The offending value in meters.
        min_depth: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoordinateOutOfRange { name, lat, lon } => {
                write!(f, "{name} coordinate out of range: ({lat}, {lon})")
            }
            Self::EmptyPopulation => write!(f, "population size must be at least 1"),
            Self::ZeroGenerations => write!(f, "generation count must be at least 1"),
            Self::RateOutOfRange { name, value } => {
                write!(f, "{name} must be within [0, 1], got {value}")
            }
            Self::EliteExceedsPopulation {
                elite_count,
                population_size,
            } => write!(
                f,
                "elite count {elite_count} exceeds population size {population_size}"
            ),
            Self::NegativeMinDepth { min_depth } => {
                write!(f, "minimum depth must be non-negative, got {min_depth}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_error_display() {
        let err = DataError::Invalid("mask is 3 rows, header says 4".to_string());
        assert!(err.to_string().contains("3 rows"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::EliteExceedsPopulation {
            elite_count: 9,
            population_size: 4,
        };
        let text = err.to_string();
        assert!(text.contains('9'));
        assert!(text.contains('4'));
    }
}
