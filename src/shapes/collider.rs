//! Shape plus memoized world-space geometry.
//!
//! The owning body passes a closure building its current [`Transform`] into
//! every query. The closure only runs on a cache miss; the cached AABB and box
//! corners are reused until a pose mutation marks the collider dirty. `None` in
//! a cache slot means "dirty".

use std::cell::Cell;

use super::Shape;
use crate::collision::Aabb;
use crate::math::{Transform, Vec2};

#[derive(Debug, Clone)]
pub struct Collider {
    shape: Shape,
    aabb: Cell<Option<Aabb>>,
    vertices: Cell<Option<[Vec2; 4]>>,
}

impl Collider {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            aabb: Cell::new(None),
            vertices: Cell::new(None),
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Invalidates every cached world-space quantity.
    pub(crate) fn mark_dirty(&self) {
        self.aabb.set(None);
        self.vertices.set(None);
    }

    /// World-space box corners, recomputed only after the pose changed.
    /// Circles have no vertex list.
    pub(crate) fn transformed_vertices(
        &self,
        transform: impl FnOnce() -> Transform,
    ) -> Option<[Vec2; 4]> {
        let Shape::Box(rect) = &self.shape else {
            return None;
        };
        if let Some(cached) = self.vertices.get() {
            return Some(cached);
        }
        let world = rect.transform_vertices(&transform());
        self.vertices.set(Some(world));
        Some(world)
    }

    /// Tight world-space bounds, recomputed only after the pose changed.
    pub(crate) fn aabb(&self, transform: impl FnOnce() -> Transform) -> Aabb {
        if let Some(cached) = self.aabb.get() {
            return cached;
        }
        let aabb = match &self.shape {
            Shape::Circle(circle) => {
                let center = transform().position;
                let extent = Vec2::new(circle.radius, circle.radius);
                Aabb::new(center - extent, center + extent)
            }
            Shape::Box(_) => {
                let transform = transform();
                let center = transform.position;
                let corners = self
                    .transformed_vertices(|| transform)
                    .unwrap_or([center; 4]);
                Aabb::from_points(&corners).unwrap_or(Aabb::new(center, center))
            }
        };
        self.aabb.set(Some(aabb));
        aabb
    }
}

// Caches are derived state; two colliders are equal when their shapes are.
impl PartialEq for Collider {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
    }
}
