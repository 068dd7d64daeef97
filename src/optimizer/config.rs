//! Search configuration and its validation.

use crate::error::ConfigError;
use crate::geo::Coordinate;
use serde::{Deserialize, Serialize};

/// Configuration for one optimization run.
///
/// Validated up front by [`GeneticConfig::validate`]; out-of-range values
/// are rejected, never clamped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneticConfig {
    /// Fixed route start.
    pub start: Coordinate,
    /// Fixed route end.
    pub end: Coordinate,
    /// Number of candidate routes per generation (at least 1).
    pub population_size: usize,
    /// Number of generations to run (at least 1).
    pub generations: usize,
    /// Per-waypoint mutation probability, within [0, 1].
    pub mutation_rate: f64,
    /// Crossover probability per offspring, within [0, 1].
    pub crossover_rate: f64,
    /// Individuals carried unchanged into the next generation
    /// (at most `population_size`).
    pub elite_count: usize,
    /// Number of evolvable interior waypoints.
    pub num_waypoints: usize,
    /// Whether to add the weather resistance term to the fitness.
    pub weather_enabled: bool,
    /// Whether to penalize legs shallower than `min_depth`.
    pub avoid_shallow_water: bool,
    /// Minimum acceptable depth in meters (non-negative).
    pub min_depth: f64,
    /// Seed for the search's random source.
    pub seed: u64,
}

impl GeneticConfig {
    /// A configuration with sensible search defaults for the given
    /// endpoints.
    #[must_use]
    pub const fn new(start: Coordinate, end: Coordinate) -> Self {
        Self {
            start,
            end,
            population_size: 50,
            generations: 100,
            mutation_rate: 0.2,
            crossover_rate: 0.8,
            elite_count: 2,
            num_waypoints: 12,
            weather_enabled: false,
            avoid_shallow_water: false,
            min_depth: 10.0,
            seed: 42,
        }
    }

    /// Check every invariant the search relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.start.in_range() {
            return Err(ConfigError::CoordinateOutOfRange {
                name: "start",
                lat: self.start.lat,
                lon: self.start.lon,
            });
        }
        if !self.end.in_range() {
            return Err(ConfigError::CoordinateOutOfRange {
                name: "end",
                lat: self.end.lat,
                lon: self.end.lon,
            });
        }
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::RateOutOfRange {
                name: "mutationRate",
                value: self.mutation_rate,
            });
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(ConfigError::RateOutOfRange {
                name: "crossoverRate",
                value: self.crossover_rate,
            });
        }
        if self.elite_count > self.population_size {
            return Err(ConfigError::EliteExceedsPopulation {
                elite_count: self.elite_count,
                population_size: self.population_size,
            });
        }
        if !self.min_depth.is_finite() || self.min_depth < 0.0 {
            return Err(ConfigError::NegativeMinDepth {
                min_depth: self.min_depth,
            });
        }
        Ok(())
    }
}
