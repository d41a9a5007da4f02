//! Contact point extraction for pairs that the narrow phase reported as
//! colliding. Runs after positional separation, so the shapes are touching.

use super::detection::polygon_edges;
use super::manifold::ContactPoints;
use crate::math::Vec2;
use crate::objects::Body;
use crate::shapes::Shape;

/// Closest point on segment `[a, b]` to `point`, with its squared distance.
///
/// The projection parameter is clamped to `[0, 1]`; a zero-length segment
/// collapses to `a`.
pub fn point_segment_distance(point: Vec2, a: Vec2, b: Vec2) -> (Vec2, f32) {
    let segment = b - a;
    let length_sq = segment.magnitude_squared();
    let closest = if length_sq == 0.0 {
        a
    } else {
        let t = (point - a).dot(segment) / length_sq;
        a + segment * t.clamp(0.0, 1.0)
    };
    (closest, point.distance_squared(closest))
}

/// Finds one or two contact points between two touching bodies.
///
/// `normal` points from `a` toward `b`. `epsilon` decides when two squared
/// distances or two candidate points count as equal for polygon pairs.
pub fn find_contact_points(a: &Body, b: &Body, normal: Vec2, epsilon: f32) -> ContactPoints {
    match (a.shape(), b.shape()) {
        (Shape::Circle(circle), Shape::Circle(_)) => {
            ContactPoints::single(a.position() + normal * circle.radius)
        }
        (Shape::Circle(_), Shape::Box(_)) => match b.transformed_vertices() {
            Some(vertices) => circle_polygon_contact(a.position(), &vertices),
            None => ContactPoints::default(),
        },
        (Shape::Box(_), Shape::Circle(_)) => match a.transformed_vertices() {
            Some(vertices) => circle_polygon_contact(b.position(), &vertices),
            None => ContactPoints::default(),
        },
        (Shape::Box(_), Shape::Box(_)) => {
            match (a.transformed_vertices(), b.transformed_vertices()) {
                (Some(vertices_a), Some(vertices_b)) => {
                    polygon_polygon_contacts(&vertices_a, &vertices_b, epsilon)
                }
                _ => ContactPoints::default(),
            }
        }
    }
}

fn circle_polygon_contact(center: Vec2, vertices: &[Vec2]) -> ContactPoints {
    let closest = polygon_edges(vertices)
        .map(|(start, end)| point_segment_distance(center, start, end))
        .min_by(|(_, d1), (_, d2)| d1.total_cmp(d2));

    match closest {
        Some((point, _)) => ContactPoints::single(point),
        None => ContactPoints::default(),
    }
}

/// Tests every vertex of each polygon against every edge of the other.
///
/// A candidate becomes the second contact when its distance ties the current
/// minimum and it does not coincide with the first contact. Face-to-face
/// contact therefore yields two points, vertex contact yields one.
fn polygon_polygon_contacts(vertices_a: &[Vec2], vertices_b: &[Vec2], epsilon: f32) -> ContactPoints {
    let mut first: Option<Vec2> = None;
    let mut second: Option<Vec2> = None;
    let mut min_dist_sq = f32::MAX;

    for (points, edges) in [(vertices_a, vertices_b), (vertices_b, vertices_a)] {
        for &point in points {
            for (start, end) in polygon_edges(edges) {
                let (closest, dist_sq) = point_segment_distance(point, start, end);

                if nearly_equal(dist_sq, min_dist_sq, epsilon) {
                    let current = first.unwrap_or(Vec2::ZERO);
                    if !closest.nearly_equal(current, epsilon) {
                        first = Some(current);
                        second = Some(closest);
                    }
                } else if dist_sq < min_dist_sq {
                    min_dist_sq = dist_sq;
                    first = Some(closest);
                    second = None;
                }
            }
        }
    }

    match (first, second) {
        (Some(a), Some(b)) => ContactPoints::pair(a, b),
        (Some(a), None) => ContactPoints::single(a),
        _ => ContactPoints::default(),
    }
}

fn nearly_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Material;
    use crate::config::CONTACT_EPSILON;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    const EPSILON: f32 = 1e-5;

    fn unit_box(position: Vec2) -> Body {
        Body::create_box(2.0, 2.0, 1.0, false, Material::default())
            .unwrap()
            .with_position(position)
    }

    #[test]
    fn test_point_segment_distance_interior() {
        let (closest, dist_sq) =
            point_segment_distance(Vec2::new(1.0, 2.0), Vec2::ZERO, Vec2::new(4.0, 0.0));
        assert_eq!(closest, Vec2::new(1.0, 0.0));
        assert_relative_eq!(dist_sq, 4.0, epsilon = EPSILON);
    }

    #[test]
    fn test_point_segment_distance_clamped() {
        let (closest, dist_sq) =
            point_segment_distance(Vec2::new(-3.0, 0.0), Vec2::ZERO, Vec2::new(4.0, 0.0));
        assert_eq!(closest, Vec2::ZERO);
        assert_relative_eq!(dist_sq, 9.0, epsilon = EPSILON);

        let (closest, _) =
            point_segment_distance(Vec2::new(6.0, 1.0), Vec2::ZERO, Vec2::new(4.0, 0.0));
        assert_eq!(closest, Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_point_segment_distance_degenerate_segment() {
        let (closest, dist_sq) =
            point_segment_distance(Vec2::new(0.0, 2.0), Vec2::new(1.0, 2.0), Vec2::new(1.0, 2.0));
        assert_eq!(closest, Vec2::new(1.0, 2.0));
        assert_relative_eq!(dist_sq, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_circle_circle_contact() {
        let a = Body::create_circle(1.0, 1.0, false, Material::default()).unwrap();
        let b = Body::create_circle(1.0, 1.0, false, Material::default())
            .unwrap()
            .with_position(Vec2::new(2.0, 0.0));
        let contacts = find_contact_points(&a, &b, Vec2::new(1.0, 0.0), CONTACT_EPSILON);
        assert_eq!(contacts.as_slice(), &[Vec2::new(1.0, 0.0)]);
    }

    #[test]
    fn test_circle_box_contact_either_order() {
        let boxed = unit_box(Vec2::ZERO);
        let ball = Body::create_circle(0.5, 1.0, false, Material::default())
            .unwrap()
            .with_position(Vec2::new(0.3, 1.5));

        let circle_first = find_contact_points(&ball, &boxed, Vec2::new(0.0, -1.0), CONTACT_EPSILON);
        assert_eq!(circle_first.len(), 1);
        assert_relative_eq!(circle_first.as_slice()[0].x, 0.3, epsilon = EPSILON);
        assert_relative_eq!(circle_first.as_slice()[0].y, 1.0, epsilon = EPSILON);

        let box_first = find_contact_points(&boxed, &ball, Vec2::new(0.0, 1.0), CONTACT_EPSILON);
        assert_eq!(box_first, circle_first);
    }

    #[test]
    fn test_stacked_boxes_have_two_contacts() {
        let lower = unit_box(Vec2::ZERO);
        let upper = unit_box(Vec2::new(0.0, 2.0));
        let contacts = find_contact_points(&lower, &upper, Vec2::UP, CONTACT_EPSILON);

        assert_eq!(contacts.len(), 2);
        let points = contacts.as_slice();
        assert!(points.contains(&Vec2::new(-1.0, 1.0)));
        assert!(points.contains(&Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_corner_on_face_has_one_contact() {
        let lower = unit_box(Vec2::ZERO);
        // Diamond resting on its bottom corner at (0.2, 1).
        let upper = unit_box(Vec2::new(0.2, 1.0 + 2.0f32.sqrt())).with_angle(FRAC_PI_4);
        let contacts = find_contact_points(&lower, &upper, Vec2::UP, CONTACT_EPSILON);

        assert_eq!(contacts.len(), 1);
        assert_relative_eq!(contacts.as_slice()[0].x, 0.2, epsilon = 1e-4);
        assert_relative_eq!(contacts.as_slice()[0].y, 1.0, epsilon = 1e-4);
    }
}
