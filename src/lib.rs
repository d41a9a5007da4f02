//! Deterministic 2D rigid-body physics for circles and boxes.
//!
//! A [`PhysicsWorld`] owns the bodies and advances them in fixed substeps:
//! integrate, cull pairs by AABB, run SAT on the survivors, push overlapping
//! pairs apart, then apply restitution and friction impulses.

pub mod collision;
pub mod common;
pub mod config;
pub mod error;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{Aabb, ContactManifold};
pub use common::Material;
pub use config::{BodyLimits, BroadPhase, ResolutionMode, WorldConfig};
pub use error::{ValidationError, WorldError};
pub use math::{Transform, Vec2};
pub use objects::Body;
pub use shapes::{BoxShape, Circle, Shape, ShapeKind};
pub use world::{BodyHandle, PhysicsWorld};
