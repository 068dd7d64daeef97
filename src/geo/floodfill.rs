//! Flood-fill disambiguation of enclosed water bodies.
//!
//! A raw land classification leaves lakes, lagoons and landlocked seas
//! marked as water even though no ship can reach them. Refinement floods
//! the mask outward from known deep-ocean seed points through 8-directional
//! neighbors (longitude wrapping at the antimeridian, latitude clamped at
//! the poles); every water cell the flood reaches stays sea, everything
//! else becomes land. The traversal is an iterative breadth-first queue
//! over cell indices, so grid size never threatens the call stack.

// Index arithmetic uses intentional signed/unsigned casts
#![allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]

use crate::geo::seamask::SeaMask;
use crate::geo::Coordinate;
use std::collections::VecDeque;

/// Deep-ocean seed points for [`flood_fill_sea`].
///
/// One representative point per major navigable basin.
#[must_use]
pub fn default_ocean_seeds() -> Vec<Coordinate> {
    vec![
        Coordinate::new(35.0, -40.0),  // North Atlantic
        Coordinate::new(-25.0, -15.0), // South Atlantic
        Coordinate::new(30.0, -150.0), // North Pacific
        Coordinate::new(-30.0, -120.0), // South Pacific
        Coordinate::new(-20.0, 80.0),  // Indian Ocean
        Coordinate::new(36.0, 5.0),    // Mediterranean
        Coordinate::new(72.0, 0.0),    // Norwegian Sea
    ]
}

/// Re-classify a mask so that only water reachable from `seeds` stays sea.
///
/// Idempotent: running the fill again on its own output with the same seeds
/// produces an identical mask. Seeds that land on a land cell (or off the
/// grid) are skipped.
#[must_use]
pub fn flood_fill_sea(mask: &SeaMask, seeds: &[Coordinate]) -> SeaMask {
    let spec = *mask.spec();
    let cells = mask.cells();
    let mut visited = vec![false; spec.cell_count()];
    let mut queue = VecDeque::new();

    for seed in seeds {
        if let Some(idx) = spec.index(seed.lat, seed.lon) {
            if cells[idx] == 0 && !visited[idx] {
                visited[idx] = true;
                queue.push_back(idx);
            }
        }
    }

    while let Some(idx) = queue.pop_front() {
        let row = (idx / spec.width) as i64;
        let col = (idx % spec.width) as i64;
        for dr in -1i64..=1 {
            let r = row + dr;
            if r < 0 || r >= spec.height as i64 {
                continue;
            }
            for dc in -1i64..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let c = spec.wrap_col(col + dc);
                let neighbor = (r as usize) * spec.width + c;
                if cells[neighbor] == 0 && !visited[neighbor] {
                    visited[neighbor] = true;
                    queue.push_back(neighbor);
                }
            }
        }
    }

    let refined: Vec<u8> = visited.iter().map(|&sea| u8::from(!sea)).collect();
    SeaMask::from_raw(spec, refined)
}
