use tracing::debug;

use crate::collision::Aabb;
use crate::common::Material;
use crate::config::BodyLimits;
use crate::error::ValidationError;
use crate::math::{Transform, Vec2};
use crate::shapes::{BoxShape, Circle, Collider, Shape};

/// A simulated rigid body owning exactly one shape.
///
/// Pose is private so every change goes through a mutator that invalidates the
/// collider's cached geometry. Velocities are plain fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    // Geometry
    collider: Collider,
    material: Material,

    // Primary state
    position: Vec2,
    angle: f32, // Radians
    pub linear_velocity: Vec2,
    pub angular_velocity: f32, // Radians per second

    // Force applied during the next integration, then cleared.
    force: Vec2,

    // Physical properties
    density: f32,
    area: f32,
    mass: f32,
    inv_mass: f32, // 0.0 for static
    inertia: f32,
    inv_inertia: f32, // 0.0 for static
    is_static: bool,
}

impl Body {
    /// Creates a circle body validated against the engine-wide [`BodyLimits`].
    pub fn create_circle(
        radius: f32,
        density: f32,
        is_static: bool,
        material: Material,
    ) -> Result<Self, ValidationError> {
        Self::create_circle_with(&BodyLimits::default(), radius, density, is_static, material)
    }

    /// Creates a box body validated against the engine-wide [`BodyLimits`].
    pub fn create_box(
        width: f32,
        height: f32,
        density: f32,
        is_static: bool,
        material: Material,
    ) -> Result<Self, ValidationError> {
        Self::create_box_with(&BodyLimits::default(), width, height, density, is_static, material)
    }

    pub fn create_circle_with(
        limits: &BodyLimits,
        radius: f32,
        density: f32,
        is_static: bool,
        material: Material,
    ) -> Result<Self, ValidationError> {
        check_dimension("radius", radius)?;
        Self::from_shape(limits, Shape::Circle(Circle::new(radius)), density, is_static, material)
            .inspect_err(|err| debug!(%err, radius, density, "rejected circle body"))
    }

    pub fn create_box_with(
        limits: &BodyLimits,
        width: f32,
        height: f32,
        density: f32,
        is_static: bool,
        material: Material,
    ) -> Result<Self, ValidationError> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;
        Self::from_shape(limits, Shape::Box(BoxShape::new(width, height)), density, is_static, material)
            .inspect_err(|err| debug!(%err, width, height, density, "rejected box body"))
    }

    fn from_shape(
        limits: &BodyLimits,
        shape: Shape,
        density: f32,
        is_static: bool,
        material: Material,
    ) -> Result<Self, ValidationError> {
        let area = shape.area();
        let mass = limits.check(area, density)?;
        let inertia = shape.rotational_inertia(mass);

        let (inv_mass, inv_inertia) = if is_static {
            (0.0, 0.0)
        } else {
            (1.0 / mass, 1.0 / inertia)
        };

        Ok(Self {
            collider: Collider::new(shape),
            // Re-run the clamps in case the caller built the struct literally.
            material: Material::new(
                material.restitution,
                material.static_friction,
                material.dynamic_friction,
            ),
            position: Vec2::ZERO,
            angle: 0.0,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            density,
            area,
            mass,
            inv_mass,
            inertia,
            inv_inertia,
            is_static,
        })
    }

    /// Places a freshly created body.
    #[must_use]
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.move_to(position);
        self
    }

    /// Orients a freshly created body.
    #[must_use]
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self.collider.mark_dirty();
        self
    }

    // --- Mutators --- //

    pub fn move_by(&mut self, delta: Vec2) {
        self.position += delta;
        self.collider.mark_dirty();
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
        self.collider.mark_dirty();
    }

    pub fn rotate(&mut self, delta_angle: f32) {
        self.angle += delta_angle;
        self.collider.mark_dirty();
    }

    /// Sets the force used by the next integration.
    ///
    /// Calls do not accumulate: only the last force before a step survives.
    pub fn add_force(&mut self, force: Vec2) {
        self.force = force;
    }

    pub(crate) fn clear_force(&mut self) {
        self.force = Vec2::ZERO;
    }

    // --- Read surface --- //

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.angle)
    }

    pub fn shape(&self) -> &Shape {
        self.collider.shape()
    }

    /// World-space bounding box, recomputed lazily after pose changes.
    pub fn aabb(&self) -> Aabb {
        self.collider.aabb(|| self.transform())
    }

    /// World-space corners for boxes; `None` for circles.
    pub fn transformed_vertices(&self) -> Option<[Vec2; 4]> {
        self.collider.transformed_vertices(|| self.transform())
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn force(&self) -> Vec2 {
        self.force
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    pub fn area(&self) -> f32 {
        self.area
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    pub fn inertia(&self) -> f32 {
        self.inertia
    }

    pub fn inv_inertia(&self) -> f32 {
        self.inv_inertia
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }
}

fn check_dimension(name: &'static str, value: f32) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidDimension { name, value })
    }
}
