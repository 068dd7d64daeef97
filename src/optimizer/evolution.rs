//! The generation loop and result assembly.
//!
//! The loop is terminal after a fixed iteration budget: `generations`
//! evaluations of `population_size` candidates, no early exit. Elitism
//! guarantees the generation-best fitness never regresses. The engine has
//! no internal yield points; the progress callback fires between
//! generations and is the place to hook cancellation or UI updates.

// Generation statistics use intentional count-to-float casts
#![allow(clippy::cast_precision_loss)]

use crate::error::ConfigError;
use crate::geo::{ConstraintOracle, Coordinate};
use crate::optimizer::config::GeneticConfig;
use crate::optimizer::crossover::crossover;
use crate::optimizer::fitness::{CalmWeather, FitnessEvaluator, RouteCost, WeatherModel};
use crate::optimizer::mutation::mutate;
use crate::optimizer::route::{CandidateRoute, Corridor};
use crate::optimizer::selection::select_parents;
use crate::vessel::DigitalTwin;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Fraction of the corridor half-width used as the mutation offset bound.
const MUTATION_SPAN_FACTOR: f64 = 0.5;

/// Statistics for a single generation.
#[derive(Debug, Clone, Copy)]
pub struct GenerationStats {
    /// Generation number, starting at 0.
    pub generation: usize,
    /// Best (lowest) fitness in this generation.
    pub best_fitness: f64,
    /// Mean fitness across the population.
    pub mean_fitness: f64,
    /// Number of individuals free of land crossings.
    pub sea_bound: usize,
}

/// Outcome of one optimization run.
///
/// Created once per call and never mutated after return. `path` always
/// starts at the configured start, ends at the configured end, and has
/// `num_waypoints + 2` elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    /// Whether the best route is fully sea-bound (and deep enough, when
    /// shallow avoidance is on).
    pub success: bool,
    /// Ordered route coordinates, endpoints included.
    pub path: Vec<Coordinate>,
    /// Total great-circle distance in nautical miles.
    pub total_distance: f64,
    /// Total fuel burn in tons.
    pub total_fuel: f64,
    /// Total CO2 emissions in tons.
    #[serde(rename = "totalCO2")]
    pub total_co2: f64,
    /// Human-readable diagnostic when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Genetic route optimizer over a shared oracle and vessel twin.
pub struct RouteGeneticOptimizer {
    oracle: Arc<ConstraintOracle>,
    twin: DigitalTwin,
    weather: Option<Box<dyn WeatherModel>>,
}

impl std::fmt::Debug for RouteGeneticOptimizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteGeneticOptimizer")
            .field("twin", &self.twin)
            .field("weather", &self.weather.is_some())
            .finish_non_exhaustive()
    }
}

impl RouteGeneticOptimizer {
    /// Build an optimizer over a shared oracle and a vessel twin.
    #[must_use]
    pub fn new(oracle: Arc<ConstraintOracle>, twin: DigitalTwin) -> Self {
        Self {
            oracle,
            twin,
            weather: None,
        }
    }

    /// Attach a weather model, used when the config enables the weather
    /// term.
    #[must_use]
    pub fn with_weather(mut self, model: Box<dyn WeatherModel>) -> Self {
        self.weather = Some(model);
        self
    }

    /// Run the search.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the configuration violates an
    /// invariant; no search work happens in that case.
    pub fn optimize(&self, config: &GeneticConfig) -> Result<OptimizationResult, ConfigError> {
        self.optimize_with_progress(config, |_| {})
    }

    /// Run the search, invoking `on_generation` after each generation is
    /// evaluated.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the configuration violates an
    /// invariant; no search work happens in that case.
    pub fn optimize_with_progress(
        &self,
        config: &GeneticConfig,
        mut on_generation: impl FnMut(&GenerationStats),
    ) -> Result<OptimizationResult, ConfigError> {
        config.validate()?;

        let start = Coordinate::new(config.start.lat, config.start.lon);
        let end = Coordinate::new(config.end.lat, config.end.lon);
        let corridor = Corridor::new(start, end);
        let mutation_span = corridor.spread_deg * MUTATION_SPAN_FACTOR;

        let weather: Option<&dyn WeatherModel> = if config.weather_enabled {
            Some(self.weather.as_deref().unwrap_or(&CalmWeather))
        } else {
            None
        };
        let evaluator = FitnessEvaluator::new(
            &self.oracle,
            &self.twin,
            config.avoid_shallow_water,
            config.min_depth,
            weather,
        );

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut population: Vec<CandidateRoute> = (0..config.population_size)
            .map(|_| CandidateRoute::random(&corridor, config.num_waypoints, &mut rng))
            .collect();

        let mut best: Option<(CandidateRoute, RouteCost)> = None;

        for generation in 0..config.generations {
            let costs = evaluator.evaluate_population(&population);
            let fitness: Vec<f64> = costs.iter().map(RouteCost::fitness).collect();

            // strict comparison keeps the first-seen individual on ties
            let mut gen_best = 0usize;
            for (idx, value) in fitness.iter().enumerate() {
                if *value < fitness[gen_best] {
                    gen_best = idx;
                }
            }
            let replace = best
                .as_ref()
                .is_none_or(|(_, cost)| fitness[gen_best] < cost.fitness());
            if replace {
                best = Some((population[gen_best].clone(), costs[gen_best]));
            }

            let stats = GenerationStats {
                generation,
                best_fitness: fitness[gen_best],
                mean_fitness: fitness.iter().sum::<f64>() / fitness.len() as f64,
                sea_bound: costs.iter().filter(|c| c.is_sea_bound()).count(),
            };
            on_generation(&stats);

            if generation + 1 == config.generations {
                break;
            }

            let selection = select_parents(
                &fitness,
                config.elite_count,
                config.population_size,
                &mut rng,
            );

            let mut next = Vec::with_capacity(config.population_size);
            for &idx in &selection.elite_indices {
                next.push(population[idx].clone());
            }
            for &(p1, p2) in &selection.parent_pairs {
                let mut child = crossover(
                    &population[p1],
                    &population[p2],
                    config.crossover_rate,
                    &mut rng,
                );
                mutate(&mut child, config.mutation_rate, mutation_span, &mut rng);
                next.push(child);

                if next.len() < config.population_size {
                    let mut child = crossover(
                        &population[p2],
                        &population[p1],
                        config.crossover_rate,
                        &mut rng,
                    );
                    mutate(&mut child, config.mutation_rate, mutation_span, &mut rng);
                    next.push(child);
                }
            }
            next.truncate(config.population_size);
            while next.len() < config.population_size {
                next.push(CandidateRoute::random(
                    &corridor,
                    config.num_waypoints,
                    &mut rng,
                ));
            }
            population = next;
        }

        // the budget is at least one generation, so a best always exists
        let Some((route, cost)) = best else {
            return Err(ConfigError::ZeroGenerations);
        };
        Ok(assemble_result(config, route, &cost))
    }
}

fn assemble_result(
    config: &GeneticConfig,
    route: CandidateRoute,
    cost: &RouteCost,
) -> OptimizationResult {
    let depth_ok = !config.avoid_shallow_water || cost.shallow_legs == 0;
    let success = cost.is_sea_bound() && depth_ok;

    let message = if success {
        None
    } else if cost.is_sea_bound() {
        Some(format!(
            "no route meeting the {} m depth margin was found within {} generations; \
             best candidate has {} shallow leg(s)",
            config.min_depth, config.generations, cost.shallow_legs
        ))
    } else {
        Some(format!(
            "no land-free route was found within {} generations; \
             best candidate still crosses land on {} leg(s)",
            config.generations, cost.land_legs
        ))
    };

    OptimizationResult {
        success,
        path: route.path().to_vec(),
        total_distance: cost.distance_nm,
        total_fuel: cost.fuel_tons,
        total_co2: cost.co2_tons,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{BathymetryField, DepthRegion, GridSpec, SeaMask};
    use crate::vessel::{FuelType, VesselParams};

    fn all_sea_oracle() -> Arc<ConstraintOracle> {
        let spec = GridSpec::global(1.0);
        let mask = SeaMask::from_parts(spec, vec![0u8; spec.cell_count()]).unwrap();
        let standard =
            DepthRegion::from_parts("standardRes", spec, vec![4000.0; spec.cell_count()]).unwrap();
        Arc::new(ConstraintOracle::new(
            mask,
            BathymetryField::from_parts(Vec::new(), Vec::new(), standard),
        ))
    }

    fn twin() -> DigitalTwin {
        DigitalTwin::new(VesselParams {
            dwt: 50_000.0,
            length: 200.0,
            beam: 30.0,
            draft: 11.0,
            service_speed: 14.0,
            fuel_type: FuelType::Hfo,
            fuel_consumption_rate: 30.0,
            engine_power: 9_000.0,
        })
    }

    fn small_config() -> GeneticConfig {
        let mut config = GeneticConfig::new(
            Coordinate::new(10.0, -20.0),
            Coordinate::new(15.0, 20.0),
        );
        config.population_size = 12;
        config.generations = 8;
        config.num_waypoints = 5;
        config
    }

    #[test]
    fn test_path_shape_invariant() {
        let optimizer = RouteGeneticOptimizer::new(all_sea_oracle(), twin());
        let config = small_config();
        let result = optimizer.optimize(&config).unwrap();

        assert_eq!(result.path.len(), config.num_waypoints + 2);
        assert_eq!(result.path[0], config.start);
        assert_eq!(result.path[result.path.len() - 1], config.end);
        assert!(result.success);
        assert!(result.message.is_none());
    }

    #[test]
    fn test_total_distance_at_least_great_circle() {
        let optimizer = RouteGeneticOptimizer::new(all_sea_oracle(), twin());
        let config = small_config();
        let result = optimizer.optimize(&config).unwrap();

        let direct = config.start.great_circle_nm(&config.end);
        assert!(result.total_distance >= direct - 1e-6);
        assert!(result.total_fuel > 0.0);
        assert!(result.total_co2 > result.total_fuel);
    }

    #[test]
    fn test_deterministic_under_seed() {
        let optimizer = RouteGeneticOptimizer::new(all_sea_oracle(), twin());
        let config = small_config();
        let a = optimizer.optimize(&config).unwrap();
        let b = optimizer.optimize(&config).unwrap();
        assert_eq!(a.path, b.path);
        assert_eq!(a.total_distance, b.total_distance);
    }

    #[test]
    fn test_elitism_monotonic_best() {
        let optimizer = RouteGeneticOptimizer::new(all_sea_oracle(), twin());
        let mut config = small_config();
        config.generations = 20;

        let mut best_series = Vec::new();
        let _ = optimizer
            .optimize_with_progress(&config, |stats| best_series.push(stats.best_fitness))
            .unwrap();

        assert_eq!(best_series.len(), config.generations);
        for pair in best_series.windows(2) {
            assert!(pair[1] <= pair[0] + 1e-9);
        }
    }

    #[test]
    fn test_invalid_config_rejected_before_search() {
        let optimizer = RouteGeneticOptimizer::new(all_sea_oracle(), twin());
        let mut config = small_config();
        config.elite_count = 100;

        let mut called = false;
        let err = optimizer.optimize_with_progress(&config, |_| called = true);
        assert!(err.is_err());
        assert!(!called);
    }

    #[test]
    fn test_impassable_world_reports_failure() {
        // all land except the two endpoint cells: no sea route can exist
        let spec = GridSpec::global(1.0);
        let mut cells = vec![1u8; spec.cell_count()];
        let start = Coordinate::new(10.5, -20.5);
        let end = Coordinate::new(10.5, 20.5);
        cells[spec.index(start.lat, start.lon).unwrap()] = 0;
        cells[spec.index(end.lat, end.lon).unwrap()] = 0;
        let mask = SeaMask::from_parts(spec, cells).unwrap();
        let standard =
            DepthRegion::from_parts("standardRes", spec, vec![100.0; spec.cell_count()]).unwrap();
        let oracle = Arc::new(ConstraintOracle::new(
            mask,
            BathymetryField::from_parts(Vec::new(), Vec::new(), standard),
        ));

        let optimizer = RouteGeneticOptimizer::new(oracle, twin());
        let mut config = GeneticConfig::new(start, end);
        config.population_size = 10;
        config.generations = 5;
        config.num_waypoints = 3;

        let result = optimizer.optimize(&config).unwrap();
        assert!(!result.success);
        let message = result.message.unwrap();
        assert!(message.contains("crosses land"));
        // shape invariant holds even on failure
        assert_eq!(result.path.len(), 5);
        assert_eq!(result.path[0], start);
    }

    #[test]
    fn test_shallow_failure_message() {
        // sea everywhere but only 5 m deep; a 10 m margin cannot be met
        let spec = GridSpec::global(1.0);
        let mask = SeaMask::from_parts(spec, vec![0u8; spec.cell_count()]).unwrap();
        let standard =
            DepthRegion::from_parts("standardRes", spec, vec![5.0; spec.cell_count()]).unwrap();
        let oracle = Arc::new(ConstraintOracle::new(
            mask,
            BathymetryField::from_parts(Vec::new(), Vec::new(), standard),
        ));

        let optimizer = RouteGeneticOptimizer::new(oracle, twin());
        let mut config = small_config();
        config.avoid_shallow_water = true;
        config.min_depth = 10.0;

        let result = optimizer.optimize(&config).unwrap();
        assert!(!result.success);
        assert!(result.message.unwrap().contains("depth margin"));
    }

    #[test]
    fn test_weather_term_changes_fitness_only() {
        struct UniformStorm;
        impl WeatherModel for UniformStorm {
            fn leg_resistance(&self, _a: Coordinate, _b: Coordinate) -> f64 {
                100.0
            }
        }

        let optimizer = RouteGeneticOptimizer::new(all_sea_oracle(), twin())
            .with_weather(Box::new(UniformStorm));
        let mut config = small_config();
        config.weather_enabled = true;

        let result = optimizer.optimize(&config).unwrap();
        assert!(result.success);
        assert_eq!(result.path.len(), config.num_waypoints + 2);
    }
}
