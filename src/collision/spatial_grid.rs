// Implements a simple uniform spatial grid for broadphase collision detection.

use tracing::debug;

use super::aabb::Aabb;
use crate::config::MAX_GRID_CELLS;
use crate::math::Vec2;

/// Represents a cell in the spatial grid.
#[derive(Debug, Default, Clone)]
struct GridCell {
    body_indices: Vec<usize>,
}

/// A uniform spatial grid for accelerating collision detection.
///
/// Bodies outside `bounds` are clamped into the border cells, so they still
/// pair with everything sharing those cells.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    bounds: Aabb,       // The overall area covered by the grid
    inv_cell_size: f32, // 1.0 / cell_size, cached for performance
    num_cols: usize,
    num_rows: usize,
    cells: Vec<GridCell>, // Flattened 1D vector representing the 2D grid
}

impl SpatialGrid {
    /// Creates a new SpatialGrid covering `bounds`.
    ///
    /// A non-positive or non-finite `cell_size` collapses the grid to one cell.
    /// Returns `None` when the grid would need more than [`MAX_GRID_CELLS`] cells.
    pub fn new(bounds: Aabb, cell_size: f32) -> Option<Self> {
        let (num_cols, num_rows, inv_cell_size) = if cell_size.is_finite() && cell_size > 0.0 {
            let inv = 1.0 / cell_size;
            // `as usize` saturates, so huge or infinite extents fail the cap below.
            let cols = (bounds.width() * inv).ceil().max(1.0) as usize;
            let rows = (bounds.height() * inv).ceil().max(1.0) as usize;
            (cols, rows, inv)
        } else {
            (1, 1, 0.0)
        };

        let total_cells = num_cols
            .checked_mul(num_rows)
            .filter(|&total| total <= MAX_GRID_CELLS);
        let Some(total_cells) = total_cells else {
            debug!(?bounds, cell_size, num_cols, num_rows, "spatial grid too large");
            return None;
        };
        debug!(?bounds, cell_size, num_cols, num_rows, total_cells, "creating spatial grid");

        Some(SpatialGrid {
            bounds,
            inv_cell_size,
            num_cols,
            num_rows,
            cells: vec![GridCell::default(); total_cells],
        })
    }

    /// Converts world coordinates to clamped grid cell indices (col, row).
    #[inline]
    fn cell_indices(&self, point: Vec2) -> (usize, usize) {
        let local = point - self.bounds.min;
        let col = (local.x * self.inv_cell_size).floor();
        let row = (local.y * self.inv_cell_size).floor();
        // `as usize` saturates negatives and NaN to zero.
        (
            (col as usize).min(self.num_cols - 1),
            (row as usize).min(self.num_rows - 1),
        )
    }

    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.body_indices.clear();
        }
    }

    /// Inserts a body's AABB into every cell it overlaps.
    pub fn insert(&mut self, body_index: usize, aabb: &Aabb) {
        let (min_col, min_row) = self.cell_indices(aabb.min);
        let (max_col, max_row) = self.cell_indices(aabb.max);

        for row in min_row..=max_row {
            for col in min_col..=max_col {
                self.cells[col + row * self.num_cols].body_indices.push(body_index);
            }
        }
    }

    /// Every pair of bodies sharing at least one cell, as `(low, high)`
    /// indices, sorted and without duplicates.
    pub fn query_potential_pairs(&self) -> Vec<(usize, usize)> {
        let mut potential_pairs = Vec::new();

        for cell in &self.cells {
            let indices = &cell.body_indices;
            for (i, &a) in indices.iter().enumerate() {
                for &b in &indices[i + 1..] {
                    potential_pairs.push((a.min(b), a.max(b)));
                }
            }
        }

        potential_pairs.sort_unstable();
        potential_pairs.dedup();
        potential_pairs
    }
}
