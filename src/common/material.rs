//! Defines physical material properties.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Surface properties of a body that shape its collision response.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Material {
    /// Coefficient of restitution (bounciness). Range [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f32,
    /// Coefficient of static friction. Range [0, infinity).
    pub static_friction: f32,
    /// Coefficient of dynamic (sliding) friction. Range [0, infinity).
    pub dynamic_friction: f32,
}

impl Material {
    /// Creates a new material. Out-of-range values are clamped, never rejected.
    ///
    /// NaN coefficients become 0.
    pub fn new(restitution: f32, static_friction: f32, dynamic_friction: f32) -> Self {
        Material {
            restitution: if restitution.is_nan() { 0.0 } else { restitution.clamp(0.0, 1.0) },
            // `f32::max` already returns the other operand for NaN.
            static_friction: static_friction.max(0.0),
            dynamic_friction: dynamic_friction.max(0.0),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Material {
            restitution: 0.2,
            static_friction: 0.6,
            dynamic_friction: 0.4,
        }
    }
}
