//! Independent post-hoc route validation.
//!
//! The validator consults only the constraint oracle, never the
//! optimizer's fitness, so a scoring bug can never silently mask a land
//! crossing. It is used by the optimizer's fallback messaging callers and
//! by verification code after every `success = true` result.

use crate::geo::{ConstraintOracle, Coordinate};
use std::sync::Arc;

/// Result of checking a route against the sea mask.
#[derive(Debug, Clone, Default)]
pub struct RouteCheck {
    /// Whether every waypoint is at sea and no leg crosses land.
    pub valid: bool,
    /// Indices of waypoints classified as land.
    pub land_points: Vec<usize>,
    /// Starting indices of legs that cross land.
    pub land_segments: Vec<usize>,
}

/// Oracle-only checker of a finished route.
#[derive(Debug, Clone)]
pub struct RouteValidator {
    oracle: Arc<ConstraintOracle>,
}

impl RouteValidator {
    /// Build a validator over a shared oracle.
    #[must_use]
    pub fn new(oracle: Arc<ConstraintOracle>) -> Self {
        Self { oracle }
    }

    /// Check every waypoint and every leg of a route.
    ///
    /// Legs are sampled at the oracle's fixed per-cell density. The route
    /// is valid when both violation lists are empty.
    #[must_use]
    pub fn validate_sea_route(&self, path: &[Coordinate]) -> RouteCheck {
        let mut check = RouteCheck::default();

        for (idx, point) in path.iter().enumerate() {
            if !self.oracle.is_sea(point.lat, point.lon) {
                check.land_points.push(idx);
            }
        }
        for (idx, pair) in path.windows(2).enumerate() {
            let samples = self.oracle.leg_samples(pair[0], pair[1]);
            if self.oracle.segment_crosses_land(pair[0], pair[1], samples) {
                check.land_segments.push(idx);
            }
        }

        check.valid = check.land_points.is_empty() && check.land_segments.is_empty();
        check
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{BathymetryField, DepthRegion, GridSpec, SeaMask};

    fn oracle_with_island() -> Arc<ConstraintOracle> {
        let spec = GridSpec::global(1.0);
        let mut cells = vec![0u8; spec.cell_count()];
        for lat in [-1.0, 0.0, 1.0] {
            for lon in [-1.0, 0.0, 1.0] {
                if let Some(idx) = spec.index(lat, lon) {
                    cells[idx] = 1;
                }
            }
        }
        let mask = SeaMask::from_parts(spec, cells).unwrap();
        let standard =
            DepthRegion::from_parts("standardRes", spec, vec![100.0; spec.cell_count()]).unwrap();
        Arc::new(ConstraintOracle::new(
            mask,
            BathymetryField::from_parts(Vec::new(), Vec::new(), standard),
        ))
    }

    #[test]
    fn test_clear_route_is_valid() {
        let validator = RouteValidator::new(oracle_with_island());
        // every waypoint more than a degree from the island
        let path = vec![
            Coordinate::new(10.0, -10.0),
            Coordinate::new(12.0, 0.0),
            Coordinate::new(10.0, 10.0),
        ];
        let check = validator.validate_sea_route(&path);
        assert!(check.valid);
        assert!(check.land_points.is_empty());
        assert!(check.land_segments.is_empty());
    }

    #[test]
    fn test_land_waypoint_reported_by_index() {
        let validator = RouteValidator::new(oracle_with_island());
        let path = vec![
            Coordinate::new(10.0, 0.0),
            Coordinate::new(0.5, 0.5), // on the island
            Coordinate::new(-10.0, 0.0),
        ];
        let check = validator.validate_sea_route(&path);
        assert!(!check.valid);
        assert_eq!(check.land_points, vec![1]);
        // both legs touch the island cell
        assert_eq!(check.land_segments, vec![0, 1]);
    }

    #[test]
    fn test_crossing_leg_with_sea_endpoints() {
        let validator = RouteValidator::new(oracle_with_island());
        let path = vec![
            Coordinate::new(0.5, -10.0),
            Coordinate::new(0.5, 10.0),
        ];
        let check = validator.validate_sea_route(&path);
        assert!(!check.valid);
        assert!(check.land_points.is_empty());
        assert_eq!(check.land_segments, vec![0]);
    }

    #[test]
    fn test_empty_path_is_valid() {
        let validator = RouteValidator::new(oracle_with_island());
        let check = validator.validate_sea_route(&[]);
        assert!(check.valid);
    }
}
