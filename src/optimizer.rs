//! Genetic search over candidate waypoint chains.
//!
//! The optimizer runs a fixed-budget evolutionary loop: initialize a
//! population of routes inside a corridor around the straight start-to-end
//! line, score every candidate against the constraint oracle and the
//! vessel twin, carry the best individuals unchanged (elitism), then refill
//! the population through tournament-selected crossover and bounded
//! waypoint mutation. All randomness flows from one seeded generator, so a
//! run is reproducible generation by generation.
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │          Generation Loop            │
//! ├─────────────────────────────────────┤
//! │  Selection │ Crossover │ Mutation   │
//! ├─────────────────────────────────────┤
//! │  Fitness: distance + fuel + CO2     │
//! │  + land / shallow-water penalties   │
//! └─────────────────────────────────────┘
//! ```

mod config;
mod crossover;
mod evolution;
mod fitness;
mod mutation;
mod route;
mod selection;

pub use config::GeneticConfig;
pub use crossover::crossover;
pub use evolution::{GenerationStats, OptimizationResult, RouteGeneticOptimizer};
pub use fitness::{CalmWeather, FitnessEvaluator, RouteCost, WeatherModel, LAND_PENALTY, SHALLOW_PENALTY};
pub use mutation::mutate;
pub use route::{CandidateRoute, Corridor};
pub use selection::{select_parents, SelectionResult};
