use crate::math::{Transform, Vec2};

/// An axis-aligned rectangle in body space, centered on the body origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    width: f32,
    height: f32,
    vertices: [Vec2; 4],
}

impl BoxShape {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            vertices: Self::create_vertices(width, height),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Local-space corners, clockwise from the top-left.
    pub fn local_vertices(&self) -> &[Vec2; 4] {
        &self.vertices
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Moment of inertia of a solid rectangle about its center.
    pub fn rotational_inertia(&self, mass: f32) -> f32 {
        (1.0 / 12.0) * mass * (self.width * self.width + self.height * self.height)
    }

    /// Maps the local corners through `transform`.
    pub fn transform_vertices(&self, transform: &Transform) -> [Vec2; 4] {
        self.vertices.map(|v| transform.apply(v))
    }

    fn create_vertices(width: f32, height: f32) -> [Vec2; 4] {
        let left = -width / 2.0;
        let right = left + width;
        let bottom = -height / 2.0;
        let top = bottom + height;

        [
            Vec2::new(left, top),
            Vec2::new(right, top),
            Vec2::new(right, bottom),
            Vec2::new(left, bottom),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    #[test]
    fn test_box_vertices_winding() {
        let b = BoxShape::new(2.0, 4.0);
        assert_eq!((b.width(), b.height()), (2.0, 4.0));
        let v = b.local_vertices();
        assert_eq!(v[0], Vec2::new(-1.0, 2.0));
        assert_eq!(v[1], Vec2::new(1.0, 2.0));
        assert_eq!(v[2], Vec2::new(1.0, -2.0));
        assert_eq!(v[3], Vec2::new(-1.0, -2.0));
    }

    #[test]
    fn test_box_area_and_inertia() {
        let b = BoxShape::new(1.0, 1.0);
        assert_relative_eq!(b.area(), 1.0);
        // 1.0 * (1+1)/12
        assert_relative_eq!(b.rotational_inertia(1.0), 1.0 / 6.0, epsilon = 1e-6);

        let b = BoxShape::new(2.0, 3.0);
        assert_relative_eq!(b.rotational_inertia(12.0), 13.0, epsilon = 1e-5);
    }

    #[test]
    fn test_box_transform_vertices() {
        let b = BoxShape::new(2.0, 2.0);
        let t = Transform::new(Vec2::new(5.0, 0.0), PI / 2.0);
        let world = b.transform_vertices(&t);
        // (-1, 1) rotated by 90deg -> (-1, -1), then translated
        assert_relative_eq!(world[0].x, 4.0, epsilon = 1e-5);
        assert_relative_eq!(world[0].y, -1.0, epsilon = 1e-5);
        // (1, 1) -> (-1, 1)
        assert_relative_eq!(world[1].x, 4.0, epsilon = 1e-5);
        assert_relative_eq!(world[1].y, 1.0, epsilon = 1e-5);
    }
}
