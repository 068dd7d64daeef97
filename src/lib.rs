// Unit tests may unwrap and compare floats exactly
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::float_cmp))]
//! Searoute: a sea-only shipping route optimizer.
//!
//! Given a start and end coordinate and a vessel's physical parameters, this
//! crate searches for a route that stays entirely at sea while minimizing a
//! weighted combination of distance, fuel burn and CO2 emissions. The search
//! is a seeded genetic algorithm over candidate waypoint chains; land
//! avoidance is enforced through a dominant fitness penalty and re-checked
//! independently by a validator that only consults the geospatial oracle.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │      Route Genetic Optimizer        │
//! ├──────────────────┬──────────────────┤
//! │ Constraint Oracle│  Digital Twin    │
//! │ (sea mask, depth)│  (fuel, CO2)     │
//! ├──────────────────┴──────────────────┤
//! │          Route Validator            │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use searoute::{ConstraintOracle, DigitalTwin, GeneticConfig, RouteGeneticOptimizer};
//! use std::sync::Arc;
//!
//! let oracle = Arc::new(ConstraintOracle::load(mask_path, bathymetry_path)?);
//! let twin = DigitalTwin::new(vessel);
//! let optimizer = RouteGeneticOptimizer::new(oracle, twin);
//! let result = optimizer.optimize(&GeneticConfig::new(start, end))?;
//! ```

pub mod error;
pub mod geo;
pub mod optimizer;
pub mod validator;
pub mod vessel;

pub use error::{ConfigError, DataError};
pub use geo::{BathymetryField, ConstraintOracle, Coordinate, SeaMask};
pub use optimizer::{GeneticConfig, OptimizationResult, RouteGeneticOptimizer};
pub use validator::{RouteCheck, RouteValidator};
pub use vessel::{DigitalTwin, FuelType, VesselParams};
