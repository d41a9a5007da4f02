use std::f32::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f32,
}

impl Circle {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    pub fn area(&self) -> f32 {
        PI * self.radius * self.radius
    }

    /// Moment of inertia of a solid disc about its center.
    pub fn rotational_inertia(&self, mass: f32) -> f32 {
        0.5 * mass * self.radius * self.radius
    }
}
