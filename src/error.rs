//! Error types for body creation and world access.

use thiserror::Error;

/// Reasons a body factory refuses to create a body.
///
/// No partial state is created when one of these is returned.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A shape dimension is zero, negative, NaN or infinite.
    #[error("invalid {name}: {value} (must be positive and finite)")]
    InvalidDimension {
        /// Which dimension was rejected.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// Area below the engine minimum.
    #[error("area {area} is too small (minimum {min})")]
    AreaTooSmall {
        /// Computed shape area.
        area: f32,
        /// Smallest accepted area.
        min: f32,
    },

    /// Area above the engine maximum.
    #[error("area {area} is too large (maximum {max})")]
    AreaTooLarge {
        /// Computed shape area.
        area: f32,
        /// Largest accepted area.
        max: f32,
    },

    /// Density below the engine minimum.
    #[error("density {density} is too small (minimum {min})")]
    DensityTooSmall {
        /// Requested density.
        density: f32,
        /// Smallest accepted density.
        min: f32,
    },

    /// Density above the engine maximum.
    #[error("density {density} is too large (maximum {max})")]
    DensityTooLarge {
        /// Requested density.
        density: f32,
        /// Largest accepted density.
        max: f32,
    },
}

/// Errors raised by [`crate::PhysicsWorld`] accessors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// No body lives at the requested index.
    #[error("body not found at index {index} (world holds {count} bodies)")]
    BodyNotFound {
        /// The requested index.
        index: usize,
        /// Number of bodies in the world at the time of the lookup.
        count: usize,
    },
}
