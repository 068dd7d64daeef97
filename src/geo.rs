//! Geospatial types: coordinates, grid artifacts and the constraint oracle.
//!
//! The oracle answers three questions for the optimizer and the validator:
//! is a point at sea, does a segment cross land, and how deep is the water.
//! All grid lookups share one coordinate-to-index conversion with explicit
//! longitude wraparound.

mod bathymetry;
mod floodfill;
mod grid;
mod oracle;
mod seamask;

pub use bathymetry::{BathymetryField, DepthRegion};
pub use floodfill::{default_ocean_seeds, flood_fill_sea};
pub use grid::GridSpec;
pub use oracle::ConstraintOracle;
pub use seamask::SeaMask;

use serde::{Deserialize, Serialize};

/// Mean Earth radius in nautical miles.
const EARTH_RADIUS_NM: f64 = 3440.065;

/// A geographic point in degrees.
///
/// Latitude is positive north, longitude positive east and kept within
/// `(-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, within [-90, 90].
    pub lat: f64,
    /// Longitude in degrees, within (-180, 180].
    pub lon: f64,
}

impl Coordinate {
    /// Create a coordinate, normalizing longitude into `(-180, 180]`.
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon: normalize_lon(lon),
        }
    }

    /// Whether this coordinate lies within the valid lat/lon ranges.
    #[must_use]
    pub fn in_range(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Great-circle distance to `other` in nautical miles (haversine).
    #[must_use]
    pub fn great_circle_nm(&self, other: &Self) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlon = (other.lon - self.lon).to_radians();

        let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let central = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
        EARTH_RADIUS_NM * central
    }

    /// Planar lat/lon interpolation between `self` (t = 0) and `other`
    /// (t = 1).
    ///
    /// Adequate at the sampling densities the oracle uses; not a
    /// great-circle interpolation.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            lat: self.lat + (other.lat - self.lat) * t,
            lon: self.lon + (other.lon - self.lon) * t,
        }
    }
}

/// Normalize a longitude into `(-180, 180]`.
#[must_use]
pub fn normalize_lon(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid maps 180 to -180; keep the positive end of the range
    if (wrapped + 180.0).abs() < 1e-12 {
        180.0
    } else {
        wrapped
    }
}
