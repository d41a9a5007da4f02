//! Configuration types for a physics world.
//!
//! Engine-wide limits for body creation live in [`BodyLimits`]; everything the
//! stepper needs (gravity, solver flavour, broad phase, contact tolerance) lives in
//! [`WorldConfig`].

use crate::collision::Aabb;
use crate::error::ValidationError;
use crate::math::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest accepted body area, in square world units.
pub const MIN_BODY_SIZE: f32 = 0.01 * 0.01;
/// Largest accepted body area, in square world units.
pub const MAX_BODY_SIZE: f32 = 15.0 * 15.0;
/// Smallest accepted density.
pub const MIN_DENSITY: f32 = 0.5;
/// Largest accepted density (roughly platinum, in g/cm³).
pub const MAX_DENSITY: f32 = 21.4;

/// Lower clamp for the substep count passed to `step`.
pub const MIN_ITERATIONS: u32 = 1;
/// Upper clamp for the substep count passed to `step`.
pub const MAX_ITERATIONS: u32 = 100;

/// Largest cell count a uniform-grid broad phase may allocate. Larger grids
/// fall back to brute force.
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Tolerance used when deciding whether two contact candidates are "the same".
///
/// Scale dependent: tuned for bodies roughly 0.1 to 10 world units across.
pub const CONTACT_EPSILON: f32 = 5e-4;

/// Bounds a body's area and density must satisfy to be created.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyLimits {
    pub min_body_size: f32,
    pub max_body_size: f32,
    pub min_density: f32,
    pub max_density: f32,
}

impl Default for BodyLimits {
    fn default() -> Self {
        Self {
            min_body_size: MIN_BODY_SIZE,
            max_body_size: MAX_BODY_SIZE,
            min_density: MIN_DENSITY,
            max_density: MAX_DENSITY,
        }
    }
}

impl BodyLimits {
    /// Validates an area/density pair and returns the derived mass.
    pub fn check(&self, area: f32, density: f32) -> Result<f32, ValidationError> {
        if area < self.min_body_size {
            return Err(ValidationError::AreaTooSmall {
                area,
                min: self.min_body_size,
            });
        }
        if area > self.max_body_size {
            return Err(ValidationError::AreaTooLarge {
                area,
                max: self.max_body_size,
            });
        }
        // Negated comparisons so NaN density is rejected too.
        if !(density >= self.min_density) {
            return Err(ValidationError::DensityTooSmall {
                density,
                min: self.min_density,
            });
        }
        if !(density <= self.max_density) {
            return Err(ValidationError::DensityTooLarge {
                density,
                max: self.max_density,
            });
        }
        Ok(density * area)
    }
}

/// Which velocity solver runs on every manifold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ResolutionMode {
    /// Linear impulse at the centers of mass only; bodies never spin.
    Basic,
    /// Normal impulse per contact point including angular terms.
    Rotation,
    /// Normal impulse followed by a Coulomb friction pass.
    #[default]
    RotationAndFriction,
}

/// Strategy used to build broad-phase candidate pairs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BroadPhase {
    /// Test every pair of bodies. Fine for tens to low hundreds of bodies.
    #[default]
    BruteForce,
    /// Bucket AABBs into a uniform grid covering `bounds`, then test bodies
    /// sharing a cell. Bodies outside `bounds` fall into the border cells.
    /// Grids over [`MAX_GRID_CELLS`] cells fall back to brute force.
    UniformGrid { bounds: Aabb, cell_size: f32 },
}

/// Main configuration for a [`crate::PhysicsWorld`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldConfig {
    /// Constant acceleration applied to every dynamic body.
    pub gravity: Vec2,
    /// Limits enforced by `PhysicsWorld::create_circle` and `PhysicsWorld::create_box`.
    pub limits: BodyLimits,
    /// Tolerance for merging polygon contact candidates.
    pub contact_epsilon: f32,
    /// Velocity solver flavour.
    pub resolution: ResolutionMode,
    /// Broad-phase strategy.
    pub broad_phase: BroadPhase,
    /// Substep count suggested to hosts that do not pick one.
    pub default_iterations: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.81),
            limits: BodyLimits::default(),
            contact_epsilon: CONTACT_EPSILON,
            resolution: ResolutionMode::default(),
            broad_phase: BroadPhase::default(),
            default_iterations: 20,
        }
    }
}

impl WorldConfig {
    /// Set the gravity vector.
    #[must_use]
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    /// Disable gravity.
    #[must_use]
    pub fn zero_gravity(mut self) -> Self {
        self.gravity = Vec2::ZERO;
        self
    }

    /// Set the body creation limits.
    #[must_use]
    pub fn with_limits(mut self, limits: BodyLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the contact merge tolerance. Scale it with the world's unit size.
    #[must_use]
    pub fn with_contact_epsilon(mut self, epsilon: f32) -> Self {
        self.contact_epsilon = epsilon;
        self
    }

    /// Set the velocity solver.
    #[must_use]
    pub fn with_resolution(mut self, resolution: ResolutionMode) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the broad-phase strategy.
    #[must_use]
    pub fn with_broad_phase(mut self, broad_phase: BroadPhase) -> Self {
        self.broad_phase = broad_phase;
        self
    }

    /// Set the suggested substep count, clamped to the accepted range.
    #[must_use]
    pub fn with_default_iterations(mut self, iterations: u32) -> Self {
        self.default_iterations = iterations.clamp(MIN_ITERATIONS, MAX_ITERATIONS);
        self
    }
}
