//! Crossover operator for candidate routes.
//!
//! Single-point crossover over the interior gene sequence: the child takes
//! its leading waypoints from one parent and the rest from the other. When
//! the crossover coin fails the child is a clone of a random parent.

use crate::optimizer::route::CandidateRoute;
use rand::Rng;

/// Produce one child from two parents.
///
/// Both parents carry the same fixed endpoints and the same gene count;
/// the child inherits the endpoints from `parent1`.
#[must_use]
pub fn crossover<R: Rng>(
    parent1: &CandidateRoute,
    parent2: &CandidateRoute,
    crossover_rate: f64,
    rng: &mut R,
) -> CandidateRoute {
    if !rng.gen_bool(crossover_rate) {
        return if rng.gen_bool(0.5) {
            parent1.clone()
        } else {
            parent2.clone()
        };
    }

    let genes1 = parent1.genes();
    let genes2 = parent2.genes();
    if genes1.is_empty() {
        return parent1.clone();
    }

    let point = rng.gen_range(0..=genes1.len());
    let mut genes = Vec::with_capacity(genes1.len());
    genes.extend_from_slice(&genes1[..point]);
    genes.extend_from_slice(&genes2[point..]);

    let path = parent1.path();
    CandidateRoute::from_genes(path[0], path[path.len() - 1], genes)
}
