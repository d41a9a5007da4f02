use super::vec2::Vec2;

/// Rigid transform (rotation then translation) with the angle's sine and cosine
/// precomputed, built on demand from a body's pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub sin: f32,
    pub cos: f32,
}

impl Transform {
    /// Creates a new transform from a translation and an angle in radians.
    pub fn new(position: Vec2, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { position, sin, cos }
    }

    /// Creates an identity transform (no translation, no rotation).
    pub fn identity() -> Self {
        Self {
            position: Vec2::ZERO,
            sin: 0.0,
            cos: 1.0,
        }
    }

    /// Maps a local-space point into world space.
    pub fn apply(&self, point: Vec2) -> Vec2 {
        let rotated_x = point.x * self.cos - point.y * self.sin;
        let rotated_y = point.x * self.sin + point.y * self.cos;
        Vec2::new(rotated_x, rotated_y) + self.position
    }
}
