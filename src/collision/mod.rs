pub mod aabb;
pub mod broad_phase;
pub mod contacts;
pub mod detection;
pub mod manifold;
pub mod spatial_grid;

// Re-export key types
pub use aabb::Aabb;
pub use broad_phase::PairFinder;
pub use contacts::{find_contact_points, point_segment_distance};
pub use detection::{
    arithmetic_mean, collide, intersect_aabbs, intersect_circle_polygon, intersect_circles,
    intersect_polygons,
};
pub use manifold::{ContactManifold, ContactPoints, Penetration};
pub use spatial_grid::SpatialGrid;
