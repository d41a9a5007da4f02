//! Candidate pair culling ahead of the narrow phase.

use tracing::warn;

use super::detection::intersect_aabbs;
use super::spatial_grid::SpatialGrid;
use crate::config::BroadPhase;
use crate::objects::Body;

/// Rebuilds the candidate list once per substep.
///
/// Pairs are `(low, high)` body indices, sorted, unique, AABB-overlapping and
/// never both static. Both strategies produce the same list.
#[derive(Debug, Clone)]
pub struct PairFinder {
    grid: Option<SpatialGrid>,
}

impl PairFinder {
    pub fn new(mode: &BroadPhase) -> Self {
        let grid = match mode {
            BroadPhase::BruteForce => None,
            BroadPhase::UniformGrid { bounds, cell_size } => {
                let grid = SpatialGrid::new(*bounds, *cell_size);
                if grid.is_none() {
                    warn!(?bounds, cell_size, "uniform grid too large, using brute force");
                }
                grid
            }
        };
        Self { grid }
    }

    /// Whether pairs come from a uniform grid rather than brute force.
    pub fn uses_grid(&self) -> bool {
        self.grid.is_some()
    }

    pub fn find_pairs(&mut self, bodies: &[Body], pairs: &mut Vec<(usize, usize)>) {
        pairs.clear();
        match &mut self.grid {
            None => brute_force_pairs(bodies, pairs),
            Some(grid) => {
                grid.clear();
                for (index, body) in bodies.iter().enumerate() {
                    grid.insert(index, &body.aabb());
                }
                pairs.extend(
                    grid.query_potential_pairs()
                        .into_iter()
                        .filter(|&(a, b)| is_candidate(&bodies[a], &bodies[b])),
                );
            }
        }
    }
}

/// O(n²) pass over every pair in index order.
pub fn brute_force_pairs(bodies: &[Body], pairs: &mut Vec<(usize, usize)>) {
    for (i, body_a) in bodies.iter().enumerate() {
        for (j, body_b) in bodies.iter().enumerate().skip(i + 1) {
            if is_candidate(body_a, body_b) {
                pairs.push((i, j));
            }
        }
    }
}

fn is_candidate(a: &Body, b: &Body) -> bool {
    if a.is_static() && b.is_static() {
        return false;
    }
    intersect_aabbs(&a.aabb(), &b.aabb())
}
