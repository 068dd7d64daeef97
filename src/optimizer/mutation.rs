//! Mutation operator for candidate routes.
//!
//! Each interior waypoint is independently perturbed with probability
//! `mutation_rate` by a bounded random lat/lon offset. Endpoints are never
//! touched.

use crate::geo::normalize_lon;
use crate::optimizer::route::CandidateRoute;
use rand::Rng;

/// Keep mutated waypoints off the exact poles.
const LAT_LIMIT: f64 = 89.5;

/// Mutate a route in place.
///
/// `max_offset_deg` bounds the perturbation in each axis; longitude wraps,
/// latitude clamps.
pub fn mutate<R: Rng>(
    route: &mut CandidateRoute,
    mutation_rate: f64,
    max_offset_deg: f64,
    rng: &mut R,
) {
    for gene in route.genes_mut() {
        if rng.gen_bool(mutation_rate) {
            let dlat = rng.gen_range(-max_offset_deg..=max_offset_deg);
            let dlon = rng.gen_range(-max_offset_deg..=max_offset_deg);
            gene.lat = (gene.lat + dlat).clamp(-LAT_LIMIT, LAT_LIMIT);
            gene.lon = normalize_lon(gene.lon + dlon);
        }
    }
}
