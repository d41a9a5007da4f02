// Defines an Axis-Aligned Bounding Box

use crate::math::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An Axis-Aligned Bounding Box defined by its minimum and maximum corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Creates a new AABB, reordering the corners so that `min <= max` per axis.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Aabb {
            min: Vec2::new(min.x.min(max.x), min.y.min(max.y)),
            max: Vec2::new(min.x.max(max.x), min.y.max(max.y)),
        }
    }

    /// Checks if this AABB overlaps with another AABB.
    /// Touching edges do not count as overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let x_overlap = self.max.x > other.min.x && other.max.x > self.min.x;
        let y_overlap = self.max.y > other.min.y && other.max.y > self.min.y;
        x_overlap && y_overlap
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Creates an AABB that encompasses a set of points.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min_pt = *first;
        let mut max_pt = *first;
        for point in rest {
            min_pt.x = min_pt.x.min(point.x);
            min_pt.y = min_pt.y.min(point.y);
            max_pt.x = max_pt.x.max(point.x);
            max_pt.y = max_pt.y.max(point.y);
        }
        Some(Aabb { min: min_pt, max: max_pt })
    }
}
