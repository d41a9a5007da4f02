use crate::math::Vec2;

/// Minimum translation found by a narrow-phase test.
///
/// `normal` is unit length and points from the first shape toward the second;
/// moving the second shape by `normal * depth` separates the pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    pub normal: Vec2,
    pub depth: f32,
}

/// Up to two world-space contact points for one colliding pair.
///
/// `count` never exceeds 2; build values with [`ContactPoints::single`] or
/// [`ContactPoints::pair`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactPoints {
    points: [Vec2; 2],
    count: usize,
}

impl ContactPoints {
    pub fn single(point: Vec2) -> Self {
        Self {
            points: [point, Vec2::ZERO],
            count: 1,
        }
    }

    pub fn pair(first: Vec2, second: Vec2) -> Self {
        Self {
            points: [first, second],
            count: 2,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn as_slice(&self) -> &[Vec2] {
        &self.points[..self.count]
    }
}

/// Stores information about a collision between two bodies for one substep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactManifold {
    /// Index of the first body involved in the collision.
    pub body_a: usize,
    /// Index of the second body involved in the collision.
    pub body_b: usize,
    /// The collision normal, pointing from body A towards body B.
    pub normal: Vec2,
    /// The amount of penetration between the shapes.
    pub depth: f32,
    pub contacts: ContactPoints,
}

impl ContactManifold {
    pub fn new(body_a: usize, body_b: usize, penetration: Penetration, contacts: ContactPoints) -> Self {
        Self {
            body_a,
            body_b,
            normal: penetration.normal,
            depth: penetration.depth,
            contacts,
        }
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    pub fn contact_points(&self) -> &[Vec2] {
        self.contacts.as_slice()
    }
}
