//! Property-based tests for the route search and its geometry helpers.
//!
//! Run with: cargo test --release prop_optimizer

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use proptest::prelude::*;

use searoute::geo::{DepthRegion, GridSpec};
use searoute::{
    BathymetryField, ConstraintOracle, Coordinate, DigitalTwin, FuelType, GeneticConfig,
    RouteGeneticOptimizer, SeaMask, VesselParams,
};

fn open_ocean() -> ConstraintOracle {
    let spec = GridSpec::global(2.0);
    let mask = SeaMask::from_parts(spec, vec![0; spec.cell_count()]).unwrap();
    let standard = DepthRegion::from_parts("global", spec, vec![4000.0; spec.cell_count()]).unwrap();
    let bathymetry = BathymetryField::from_parts(Vec::new(), Vec::new(), standard);
    ConstraintOracle::new(mask, bathymetry)
}

fn test_vessel() -> DigitalTwin {
    DigitalTwin::new(VesselParams {
        dwt: 50_000.0,
        length: 190.0,
        beam: 32.0,
        draft: 12.0,
        service_speed: 14.0,
        fuel_type: FuelType::Hfo,
        fuel_consumption_rate: 30.0,
        engine_power: 8_000.0,
    })
}

proptest! {
    // Each case runs a short but complete search, so keep the count modest.
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Endpoints are pinned and the path length is exactly the waypoint
    /// count plus the two endpoints, for any valid configuration.
    #[test]
    fn prop_path_shape_invariant(
        start_lat in -60.0f64..60.0,
        start_lon in -170.0f64..170.0,
        end_lat in -60.0f64..60.0,
        end_lon in -170.0f64..170.0,
        num_waypoints in 1usize..16,
        population in 4usize..24,
        generations in 1usize..12,
        seed in any::<u64>(),
    ) {
        let oracle = Arc::new(open_ocean());
        let optimizer = RouteGeneticOptimizer::new(oracle, test_vessel());

        let start = Coordinate::new(start_lat, start_lon);
        let end = Coordinate::new(end_lat, end_lon);
        let mut config = GeneticConfig::new(start, end);
        config.num_waypoints = num_waypoints;
        config.population_size = population;
        config.generations = generations;
        config.elite_count = 2.min(population);
        config.seed = seed;

        let result = optimizer.optimize(&config).unwrap();

        prop_assert_eq!(result.path.first(), Some(&start));
        prop_assert_eq!(result.path.last(), Some(&end));
        prop_assert_eq!(result.path.len(), num_waypoints + 2);
        prop_assert!(result.path.iter().all(Coordinate::in_range));
        prop_assert!(result.total_distance >= start.great_circle_nm(&end) - 1e-6);
        prop_assert!(result.total_fuel >= 0.0);
        prop_assert!(result.total_co2 >= 0.0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Out-of-range rates are always rejected before any search runs.
    #[test]
    fn prop_invalid_mutation_rate_rejected(rate in prop_oneof![-100.0f64..-0.001, 1.001f64..100.0]) {
        let mut config = GeneticConfig::new(
            Coordinate::new(0.0, 0.0),
            Coordinate::new(10.0, 10.0),
        );
        config.mutation_rate = rate;
        prop_assert!(config.validate().is_err());
    }

    /// The haversine distance is symmetric and non-negative.
    #[test]
    fn prop_distance_symmetric(
        lat_a in -89.0f64..89.0,
        lon_a in -180.0f64..180.0,
        lat_b in -89.0f64..89.0,
        lon_b in -180.0f64..180.0,
    ) {
        let a = Coordinate::new(lat_a, lon_a);
        let b = Coordinate::new(lat_b, lon_b);
        let d_ab = a.great_circle_nm(&b);
        let d_ba = b.great_circle_nm(&a);
        prop_assert!(d_ab >= 0.0);
        prop_assert!((d_ab - d_ba).abs() < 1e-6);
    }

    /// Coordinate construction always lands in the canonical longitude range.
    #[test]
    fn prop_coordinate_longitude_canonical(lat in -90.0f64..90.0, lon in -1e4f64..1e4) {
        let c = Coordinate::new(lat, lon);
        prop_assert!(c.lon > -180.0 && c.lon <= 180.0, "lon = {}", c.lon);
    }

    /// Column lookup on a global grid wraps any longitude into bounds.
    #[test]
    fn prop_global_grid_column_wraps(lon in -1e4f64..1e4) {
        let spec = GridSpec::global(1.0);
        let col = spec.col(lon).unwrap();
        prop_assert!(col < spec.width);
    }

    /// A point is sea iff its cell is 0, for any coordinate on a mixed grid.
    #[test]
    fn prop_mask_lookup_matches_cells(lat in -89.0f64..89.0, lon in -180.0f64..180.0) {
        let spec = GridSpec::global(10.0);
        // Checkerboard of land and sea.
        let cells: Vec<u8> = (0..spec.cell_count())
            .map(|i| u8::from((i / spec.width + i % spec.width) % 2 == 0))
            .collect();
        let mask = SeaMask::from_parts(spec, cells.clone()).unwrap();

        let idx = spec.index(lat, lon).unwrap();
        prop_assert_eq!(mask.is_sea(lat, lon), cells[idx] == 0);
    }
}
