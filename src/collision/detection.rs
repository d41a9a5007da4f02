use tracing::trace;

use super::aabb::Aabb;
use super::manifold::Penetration;
use crate::math::Vec2;
use crate::objects::Body;
use crate::shapes::Shape;

/// Broad-phase filter: strict overlap of two bounding boxes.
pub fn intersect_aabbs(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}

/// Checks for collision between two circles.
///
/// The normal points from A toward B. Circles sharing a center have no
/// defined direction; they are pushed apart along [`Vec2::UP`].
pub fn intersect_circles(
    center_a: Vec2,
    radius_a: f32,
    center_b: Vec2,
    radius_b: f32,
) -> Option<Penetration> {
    let radii = radius_a + radius_b;
    let offset = center_b - center_a;
    let distance = offset.magnitude();

    if distance >= radii {
        return None;
    }

    let normal = if distance > 0.0 {
        offset / distance
    } else {
        Vec2::UP
    };

    Some(Penetration {
        normal,
        depth: radii - distance,
    })
}

/// SAT test between a circle and a convex polygon given in world space.
///
/// Axes are the polygon's edge normals plus the direction from the circle's
/// center to the nearest polygon vertex. The normal points from the circle
/// toward the polygon.
pub fn intersect_circle_polygon(
    circle_center: Vec2,
    radius: f32,
    polygon_center: Vec2,
    vertices: &[Vec2],
) -> Option<Penetration> {
    let vertex_axis = closest_vertex(circle_center, vertices)
        .map(|vertex| (vertex - circle_center).normalize());

    let mut best: Option<Penetration> = None;
    for axis in edge_axes(vertices).chain(vertex_axis) {
        // A zero axis cannot separate anything.
        if axis.magnitude_squared() == 0.0 {
            continue;
        }

        let depth = interval_overlap(
            project_vertices(vertices, axis),
            project_circle(circle_center, radius, axis),
        )?;
        keep_shallowest(&mut best, axis, depth);
    }

    best.map(|penetration| orient(penetration, polygon_center - circle_center))
}

/// SAT test between two convex polygons given in world space.
///
/// Every edge normal of both polygons is a candidate axis. The normal points
/// from `center_a` toward `center_b`.
pub fn intersect_polygons(
    center_a: Vec2,
    vertices_a: &[Vec2],
    center_b: Vec2,
    vertices_b: &[Vec2],
) -> Option<Penetration> {
    let mut best: Option<Penetration> = None;
    for axis in edge_axes(vertices_a).chain(edge_axes(vertices_b)) {
        if axis.magnitude_squared() == 0.0 {
            continue;
        }

        let depth = interval_overlap(
            project_vertices(vertices_a, axis),
            project_vertices(vertices_b, axis),
        )?;
        keep_shallowest(&mut best, axis, depth);
    }

    best.map(|penetration| orient(penetration, center_b - center_a))
}

/// Mean of a vertex set. Only used to orient SAT normals.
pub fn arithmetic_mean(vertices: &[Vec2]) -> Vec2 {
    if vertices.is_empty() {
        return Vec2::ZERO;
    }
    let sum = vertices.iter().fold(Vec2::ZERO, |acc, &v| acc + v);
    sum / vertices.len() as f32
}

/// Narrow-phase dispatch over the four shape combinations.
///
/// The returned normal always points from `a` toward `b`.
pub fn collide(a: &Body, b: &Body) -> Option<Penetration> {
    let penetration = match (a.shape(), b.shape()) {
        (Shape::Circle(circle_a), Shape::Circle(circle_b)) => {
            intersect_circles(a.position(), circle_a.radius, b.position(), circle_b.radius)
        }
        (Shape::Circle(circle), Shape::Box(_)) => {
            let vertices = b.transformed_vertices()?;
            intersect_circle_polygon(
                a.position(),
                circle.radius,
                arithmetic_mean(&vertices),
                &vertices,
            )
        }
        (Shape::Box(_), Shape::Circle(circle)) => {
            let vertices = a.transformed_vertices()?;
            // The circle test reports circle -> polygon, which here is B -> A.
            intersect_circle_polygon(
                b.position(),
                circle.radius,
                arithmetic_mean(&vertices),
                &vertices,
            )
            .map(|penetration| Penetration {
                normal: -penetration.normal,
                ..penetration
            })
        }
        (Shape::Box(_), Shape::Box(_)) => {
            let vertices_a = a.transformed_vertices()?;
            let vertices_b = b.transformed_vertices()?;
            intersect_polygons(
                arithmetic_mean(&vertices_a),
                &vertices_a,
                arithmetic_mean(&vertices_b),
                &vertices_b,
            )
        }
    };

    if let Some(hit) = &penetration {
        trace!(
            kind_a = ?a.shape().kind(),
            kind_b = ?b.shape().kind(),
            depth = hit.depth,
            "narrow phase hit"
        );
    }
    penetration
}

/// Consecutive vertex pairs, wrapping from the last vertex back to the first.
pub(crate) fn polygon_edges(vertices: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(&start, &end)| (start, end))
}

fn edge_axes(vertices: &[Vec2]) -> impl Iterator<Item = Vec2> + '_ {
    polygon_edges(vertices).map(|(start, end)| (end - start).perpendicular().normalize())
}

fn closest_vertex(point: Vec2, vertices: &[Vec2]) -> Option<Vec2> {
    vertices
        .iter()
        .copied()
        .min_by(|a, b| a.distance_squared(point).total_cmp(&b.distance_squared(point)))
}

/// Projects a set of vertices onto an axis and returns the min/max interval.
fn project_vertices(vertices: &[Vec2], axis: Vec2) -> (f32, f32) {
    vertices
        .iter()
        .map(|v| v.dot(axis))
        .fold((f32::MAX, f32::MIN), |(min, max), p| (min.min(p), max.max(p)))
}

fn project_circle(center: Vec2, radius: f32, axis: Vec2) -> (f32, f32) {
    let center_proj = center.dot(axis);
    (center_proj - radius, center_proj + radius)
}

/// Overlap depth of two intervals, or `None` if they are disjoint or touching.
fn interval_overlap((min_a, max_a): (f32, f32), (min_b, max_b): (f32, f32)) -> Option<f32> {
    if min_a >= max_b || min_b >= max_a {
        return None;
    }
    Some((max_b - min_a).min(max_a - min_b))
}

fn keep_shallowest(best: &mut Option<Penetration>, axis: Vec2, depth: f32) {
    if best.map_or(true, |current| depth < current.depth) {
        *best = Some(Penetration { normal: axis, depth });
    }
}

/// Flips the normal so that it points along `from_a_to_b`.
fn orient(penetration: Penetration, from_a_to_b: Vec2) -> Penetration {
    if from_a_to_b.dot(penetration.normal) < 0.0 {
        Penetration {
            normal: -penetration.normal,
            ..penetration
        }
    } else {
        penetration
    }
}
