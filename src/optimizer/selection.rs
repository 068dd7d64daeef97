//! Selection operators: elitism plus tournament selection.
//!
//! Fitness is a cost, lower is better. Elite selection is a stable sort,
//! so equal-fitness individuals keep their insertion order and the
//! first-seen one wins the tie.

use rand::Rng;

/// Individuals competing in each tournament.
const TOURNAMENT_SIZE: usize = 3;

/// Result of selection: indices into the current population.
#[derive(Debug)]
pub struct SelectionResult {
    /// Indices of elite individuals, best first, preserved unchanged.
    pub elite_indices: Vec<usize>,
    /// Pairs of parent indices for crossover.
    pub parent_pairs: Vec<(usize, usize)>,
}

/// Select elites and parent pairs for the next generation.
///
/// Returns `elite_count` elites (capped at the population size) and enough
/// tournament-selected pairs to refill `target_size` individuals at two
/// offspring per pair.
#[must_use]
pub fn select_parents<R: Rng>(
    fitness: &[f64],
    elite_count: usize,
    target_size: usize,
    rng: &mut R,
) -> SelectionResult {
    let pop_size = fitness.len();
    let elite_count = elite_count.min(pop_size).min(target_size);
    let elite_indices = select_elite(fitness, elite_count);

    let offspring_needed = target_size.saturating_sub(elite_count);
    let pairs_needed = offspring_needed.div_ceil(2);

    let mut parent_pairs = Vec::with_capacity(pairs_needed);
    for _ in 0..pairs_needed {
        let p1 = tournament_select(fitness, TOURNAMENT_SIZE, rng);
        let p2 = tournament_select(fitness, TOURNAMENT_SIZE, rng);
        parent_pairs.push((p1, p2));
    }

    SelectionResult {
        elite_indices,
        parent_pairs,
    }
}

/// Indices of the `count` lowest-cost individuals, stable on ties.
fn select_elite(fitness: &[f64], count: usize) -> Vec<usize> {
    let mut indexed: Vec<(usize, f64)> = fitness.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    indexed.into_iter().take(count).map(|(i, _)| i).collect()
}

/// Tournament selection: sample `k` individuals, return the lowest-cost one.
fn tournament_select<R: Rng>(fitness: &[f64], k: usize, rng: &mut R) -> usize {
    let pop_size = fitness.len();
    if pop_size == 0 {
        return 0;
    }

    let k = k.clamp(1, pop_size);
    let mut best_idx = rng.gen_range(0..pop_size);
    let mut best_fitness = fitness[best_idx];

    for _ in 1..k {
        let idx = rng.gen_range(0..pop_size);
        if fitness[idx] < best_fitness {
            best_idx = idx;
            best_fitness = fitness[idx];
        }
    }

    best_idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_tournament_prefers_cheaper() {
        let mut rng = SmallRng::seed_from_u64(42);
        let fitness = vec![900.0, 500.0, 100.0, 800.0, 200.0];

        let mut counts = [0usize; 5];
        for _ in 0..1000 {
            counts[tournament_select(&fitness, 3, &mut rng)] += 1;
        }

        // index 2 (cost 100) should be selected most often
        let max_idx = counts.iter().enumerate().max_by_key(|(_, c)| **c).map(|(i, _)| i);
        assert_eq!(max_idx, Some(2));
    }

    #[test]
    fn test_elite_lowest_cost() {
        let fitness = vec![300.0, 90.0, 1000.0, 80.0, 500.0];
        let elite = select_elite(&fitness, 2);
        assert_eq!(elite, vec![3, 1]);
    }

    #[test]
    fn test_elite_tie_break_first_seen() {
        let fitness = vec![50.0, 10.0, 10.0, 50.0];
        let elite = select_elite(&fitness, 3);
        // equal-cost individuals keep insertion order
        assert_eq!(elite, vec![1, 2, 0]);
    }

    #[test]
    fn test_pair_count_fills_population() {
        let mut rng = SmallRng::seed_from_u64(123);
        let fitness: Vec<f64> = (0..10).map(f64::from).collect();

        let result = select_parents(&fitness, 2, 10, &mut rng);
        assert_eq!(result.elite_indices.len(), 2);
        assert_eq!(result.parent_pairs.len(), 4);

        // elite-only population needs no pairs
        let result = select_parents(&fitness, 10, 10, &mut rng);
        assert!(result.parent_pairs.is_empty());
    }
}
