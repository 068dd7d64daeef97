//! Route cost evaluation.
//!
//! Fitness is a scalar cost, lower is better: distance plus weighted fuel
//! and CO2, plus a dominant fixed penalty per land-crossing leg so that any
//! land-free individual outranks any land-crossing one regardless of how
//! short the crossing route is. Shallow-water violations and the optional
//! weather resistance term add on top.

// Penalty accounting uses intentional count-to-float casts
#![allow(clippy::cast_precision_loss)]

use crate::geo::{ConstraintOracle, Coordinate};
use crate::optimizer::route::CandidateRoute;
use crate::vessel::DigitalTwin;
use rayon::prelude::*;

/// Cost added per leg that crosses land. Dominates every realistic
/// distance/fuel total for a single leg.
pub const LAND_PENALTY: f64 = 50_000.0;

/// Cost added per leg whose minimum sampled depth falls below the
/// configured margin.
pub const SHALLOW_PENALTY: f64 = 5_000.0;

/// Weight of fuel tons in the scalar cost.
const FUEL_WEIGHT: f64 = 10.0;

/// Weight of CO2 tons in the scalar cost.
const CO2_WEIGHT: f64 = 2.0;

/// Extra per-leg sailing resistance from weather.
///
/// The search treats this as a static input: fetch any external signal
/// before the run starts and bake it into the model, never poll mid-loop.
pub trait WeatherModel: Send + Sync {
    /// Additional cost for sailing the leg from `a` to `b`.
    fn leg_resistance(&self, a: Coordinate, b: Coordinate) -> f64;
}

/// The default weather model: no resistance anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalmWeather;

impl WeatherModel for CalmWeather {
    fn leg_resistance(&self, _a: Coordinate, _b: Coordinate) -> f64 {
        0.0
    }
}

/// Per-route cost breakdown.
#[derive(Debug, Clone, Copy)]
pub struct RouteCost {
    /// Total great-circle distance in nautical miles.
    pub distance_nm: f64,
    /// Total fuel burn in tons at service speed.
    pub fuel_tons: f64,
    /// Total CO2 in tons.
    pub co2_tons: f64,
    /// Summed weather resistance over all legs.
    pub weather_resistance: f64,
    /// Number of legs that cross land.
    pub land_legs: usize,
    /// Number of legs shallower than the configured margin.
    pub shallow_legs: usize,
}

impl RouteCost {
    /// Scalar fitness; lower is better.
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.distance_nm
            + FUEL_WEIGHT * self.fuel_tons
            + CO2_WEIGHT * self.co2_tons
            + self.weather_resistance
            + LAND_PENALTY * self.land_legs as f64
            + SHALLOW_PENALTY * self.shallow_legs as f64
    }

    /// Whether the route is free of land crossings.
    #[must_use]
    pub const fn is_sea_bound(&self) -> bool {
        self.land_legs == 0
    }
}

/// Scores candidate routes against the oracle and the twin.
pub struct FitnessEvaluator<'a> {
    oracle: &'a ConstraintOracle,
    twin: &'a DigitalTwin,
    avoid_shallow_water: bool,
    min_depth: f64,
    weather: Option<&'a dyn WeatherModel>,
}

impl std::fmt::Debug for FitnessEvaluator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FitnessEvaluator")
            .field("avoid_shallow_water", &self.avoid_shallow_water)
            .field("min_depth", &self.min_depth)
            .field("weather", &self.weather.is_some())
            .finish_non_exhaustive()
    }
}

impl<'a> FitnessEvaluator<'a> {
    /// Build an evaluator.
    ///
    /// `weather` is `None` when the weather term is disabled.
    #[must_use]
    pub fn new(
        oracle: &'a ConstraintOracle,
        twin: &'a DigitalTwin,
        avoid_shallow_water: bool,
        min_depth: f64,
        weather: Option<&'a dyn WeatherModel>,
    ) -> Self {
        Self {
            oracle,
            twin,
            avoid_shallow_water,
            min_depth,
            weather,
        }
    }

    /// Score one candidate route.
    #[must_use]
    pub fn evaluate(&self, route: &CandidateRoute) -> RouteCost {
        let mut cost = RouteCost {
            distance_nm: 0.0,
            fuel_tons: 0.0,
            co2_tons: 0.0,
            weather_resistance: 0.0,
            land_legs: 0,
            shallow_legs: 0,
        };

        for (a, b) in route.legs() {
            let distance = a.great_circle_nm(&b);
            let fuel = self.twin.leg_fuel(distance);
            cost.distance_nm += distance;
            cost.fuel_tons += fuel;
            cost.co2_tons += self.twin.leg_co2(fuel);

            let samples = self.oracle.leg_samples(a, b);
            if self.oracle.segment_crosses_land(a, b, samples) {
                cost.land_legs += 1;
            }
            if self.avoid_shallow_water
                && self.oracle.min_depth_along(a, b, samples) < self.min_depth
            {
                cost.shallow_legs += 1;
            }
            if let Some(weather) = self.weather {
                cost.weather_resistance += weather.leg_resistance(a, b);
            }
        }

        cost
    }

    /// Score every candidate in parallel.
    ///
    /// Candidates are independent, so this changes nothing about the
    /// algorithm's semantics; the returned order matches the input order.
    #[must_use]
    pub fn evaluate_population(&self, population: &[CandidateRoute]) -> Vec<RouteCost> {
        population.par_iter().map(|route| self.evaluate(route)).collect()
    }
}
