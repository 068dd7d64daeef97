//! Candidate routes and their sampling corridor.

// Waypoint spacing uses intentional index-to-float casts
#![allow(clippy::cast_precision_loss)]

use crate::geo::{normalize_lon, Coordinate};
use rand::Rng;

/// Keep sampled waypoints off the exact poles, where longitude degenerates.
const LAT_LIMIT: f64 = 89.5;

/// Fraction of the endpoint span used as the corridor's half-width.
const SPREAD_FACTOR: f64 = 0.35;

/// Bounds on the corridor half-width in degrees.
const MIN_SPREAD_DEG: f64 = 1.0;
const MAX_SPREAD_DEG: f64 = 15.0;

/// Sampling corridor around the straight start-to-end line.
///
/// Interior waypoints are drawn at evenly spaced fractions along the line,
/// then offset perpendicular to it by a bounded random amount.
#[derive(Debug, Clone, Copy)]
pub struct Corridor {
    /// Fixed route start.
    pub start: Coordinate,
    /// Fixed route end.
    pub end: Coordinate,
    /// Perpendicular half-width in degrees.
    pub spread_deg: f64,
}

impl Corridor {
    /// Build the corridor for a pair of endpoints.
    #[must_use]
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        let dlat = (end.lat - start.lat).abs();
        let dlon = (end.lon - start.lon).abs();
        let spread_deg = (dlat.max(dlon) * SPREAD_FACTOR).clamp(MIN_SPREAD_DEG, MAX_SPREAD_DEG);
        Self {
            start,
            end,
            spread_deg,
        }
    }

    /// Sample one waypoint at fraction `t` along the line, jittered
    /// perpendicular to it.
    pub fn sample_waypoint<R: Rng>(&self, t: f64, rng: &mut R) -> Coordinate {
        let base = self.start.lerp(&self.end, t);
        let dlat = self.end.lat - self.start.lat;
        let dlon = self.end.lon - self.start.lon;
        let len = dlat.hypot(dlon);

        let offset = rng.gen_range(-self.spread_deg..=self.spread_deg);
        let (off_lat, off_lon) = if len > f64::EPSILON {
            // unit perpendicular to the endpoint line
            (-dlon / len * offset, dlat / len * offset)
        } else {
            // coincident endpoints: jitter in latitude only
            (offset, 0.0)
        };

        Coordinate {
            lat: (base.lat + off_lat).clamp(-LAT_LIMIT, LAT_LIMIT),
            lon: normalize_lon(base.lon + off_lon),
        }
    }
}

/// One candidate route: an ordered coordinate chain whose first and last
/// elements are fixed and whose interior waypoints are the evolvable genes.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRoute {
    path: Vec<Coordinate>,
}

impl CandidateRoute {
    /// Sample a random route with `num_waypoints` interior waypoints inside
    /// the corridor.
    pub fn random<R: Rng>(corridor: &Corridor, num_waypoints: usize, rng: &mut R) -> Self {
        let mut path = Vec::with_capacity(num_waypoints + 2);
        path.push(corridor.start);
        for i in 0..num_waypoints {
            let t = (i + 1) as f64 / (num_waypoints + 1) as f64;
            path.push(corridor.sample_waypoint(t, rng));
        }
        path.push(corridor.end);
        Self { path }
    }

    /// Rebuild a route from fixed endpoints and an interior gene sequence.
    #[must_use]
    pub fn from_genes(start: Coordinate, end: Coordinate, genes: Vec<Coordinate>) -> Self {
        let mut path = Vec::with_capacity(genes.len() + 2);
        path.push(start);
        path.extend(genes);
        path.push(end);
        Self { path }
    }

    /// Full ordered path, endpoints included.
    #[must_use]
    pub fn path(&self) -> &[Coordinate] {
        &self.path
    }

    /// Interior waypoints only.
    #[must_use]
    pub fn genes(&self) -> &[Coordinate] {
        &self.path[1..self.path.len() - 1]
    }

    /// Mutable interior waypoints; endpoints stay untouchable.
    pub(crate) fn genes_mut(&mut self) -> &mut [Coordinate] {
        let last = self.path.len() - 1;
        &mut self.path[1..last]
    }

    /// Consecutive waypoint pairs.
    #[must_use]
    pub fn legs(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.path.windows(2).map(|pair| (pair[0], pair[1]))
    }
}
