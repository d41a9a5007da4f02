pub mod box_shape;
pub mod circle;
pub mod collider;

pub use box_shape::BoxShape;
pub use circle::Circle;
pub use collider::Collider;

/// Geometric description of a body. The set is closed: every match over it is
/// exhaustive, so an unknown variant cannot reach inertia or vertex code.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Box(BoxShape),
}

/// Discriminant-only view of [`Shape`], handy for renderers and dispatch tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Box,
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Box(_) => ShapeKind::Box,
        }
    }

    pub fn area(&self) -> f32 {
        match self {
            Shape::Circle(circle) => circle.area(),
            Shape::Box(rect) => rect.area(),
        }
    }

    /// Moment of inertia about the body origin for the given mass.
    pub fn rotational_inertia(&self, mass: f32) -> f32 {
        match self {
            Shape::Circle(circle) => circle.rotational_inertia(mass),
            Shape::Box(rect) => rect.rotational_inertia(mass),
        }
    }

    /// Radius for circles, `None` for boxes.
    pub fn radius(&self) -> Option<f32> {
        match self {
            Shape::Circle(circle) => Some(circle.radius),
            Shape::Box(_) => None,
        }
    }
}
