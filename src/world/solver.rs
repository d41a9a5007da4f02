//! Positional separation and sequential-impulse velocity resolution for one
//! contact manifold.
//!
//! Impulses for every contact point of a pass are computed from the
//! velocities at the start of that pass and applied together afterwards.
//! Static bodies have zero inverse mass and inertia, so they never move.

use tracing::trace;

use crate::collision::ContactManifold;
use crate::config::ResolutionMode;
use crate::math::Vec2;
use crate::objects::Body;

/// Below this, a tangential relative velocity counts as zero.
const TANGENT_EPSILON: f32 = 5e-4;

/// Pushes the pair apart by `mtv`, the normal scaled by the depth.
///
/// A static body stays put and the other takes the whole vector; two dynamic
/// bodies share it equally.
pub fn separate_bodies(a: &mut Body, b: &mut Body, mtv: Vec2) {
    match (a.is_static(), b.is_static()) {
        (true, true) => {}
        (true, false) => b.move_by(mtv),
        (false, true) => a.move_by(-mtv),
        (false, false) => {
            let half = mtv / 2.0;
            a.move_by(-half);
            b.move_by(half);
        }
    }
}

/// Resolves the manifold with the chosen solver.
pub fn resolve(mode: ResolutionMode, a: &mut Body, b: &mut Body, manifold: &ContactManifold) {
    match mode {
        ResolutionMode::Basic => resolve_basic(a, b, manifold),
        ResolutionMode::Rotation => resolve_with_rotation(a, b, manifold),
        ResolutionMode::RotationAndFriction => resolve_with_rotation_and_friction(a, b, manifold),
    }
}

/// Linear-only restitution impulse through the centers of mass.
pub fn resolve_basic(a: &mut Body, b: &mut Body, manifold: &ContactManifold) {
    let normal = manifold.normal;
    let relative_velocity = b.linear_velocity - a.linear_velocity;
    let contact_speed = relative_velocity.dot(normal);
    if contact_speed > 0.0 {
        return;
    }

    let e = a.material().restitution.min(b.material().restitution);
    let j = -(1.0 + e) * contact_speed / (a.inv_mass() + b.inv_mass());
    let impulse = normal * j;

    a.linear_velocity -= impulse * a.inv_mass();
    b.linear_velocity += impulse * b.inv_mass();
    trace!(j, "basic impulse");
}

/// Normal impulse at each contact point, including angular response.
pub fn resolve_with_rotation(a: &mut Body, b: &mut Body, manifold: &ContactManifold) {
    apply_normal_impulses(a, b, manifold);
}

/// Normal pass followed by a Coulomb friction pass over the same points.
pub fn resolve_with_rotation_and_friction(a: &mut Body, b: &mut Body, manifold: &ContactManifold) {
    let normal_impulses = apply_normal_impulses(a, b, manifold);
    apply_friction_impulses(a, b, manifold, &normal_impulses);
}

/// Coulomb clamp for a tangential impulse `jt` given the normal impulse `j`.
///
/// Inside the static cone the raw impulse is kept; outside it the dynamic
/// coefficient decides the magnitude.
pub fn coulomb_friction(jt: f32, j: f32, static_friction: f32, dynamic_friction: f32) -> f32 {
    if jt.abs() <= j * static_friction {
        jt
    } else {
        -j * dynamic_friction
    }
}

/// Lever arms from each center of mass to one contact point.
#[derive(Debug, Clone, Copy)]
struct ContactArm {
    r_a: Vec2,
    r_b: Vec2,
    r_a_perp: Vec2,
    r_b_perp: Vec2,
}

impl ContactArm {
    fn new(a: &Body, b: &Body, point: Vec2) -> Self {
        let r_a = point - a.position();
        let r_b = point - b.position();
        Self {
            r_a,
            r_b,
            r_a_perp: r_a.perpendicular(),
            r_b_perp: r_b.perpendicular(),
        }
    }

    fn relative_velocity(&self, a: &Body, b: &Body) -> Vec2 {
        let velocity_a = a.linear_velocity + self.r_a_perp * a.angular_velocity;
        let velocity_b = b.linear_velocity + self.r_b_perp * b.angular_velocity;
        velocity_b - velocity_a
    }

    /// Inverse effective mass along `direction`.
    fn effective_mass(&self, a: &Body, b: &Body, direction: Vec2) -> f32 {
        let ra_perp_dot = self.r_a_perp.dot(direction);
        let rb_perp_dot = self.r_b_perp.dot(direction);
        a.inv_mass()
            + b.inv_mass()
            + ra_perp_dot * ra_perp_dot * a.inv_inertia()
            + rb_perp_dot * rb_perp_dot * b.inv_inertia()
    }

    fn apply(&self, a: &mut Body, b: &mut Body, impulse: Vec2) {
        a.linear_velocity -= impulse * a.inv_mass();
        a.angular_velocity -= self.r_a.cross(impulse) * a.inv_inertia();
        b.linear_velocity += impulse * b.inv_mass();
        b.angular_velocity += self.r_b.cross(impulse) * b.inv_inertia();
    }
}

/// Returns the scalar normal impulse per contact point, zero where skipped.
fn apply_normal_impulses(a: &mut Body, b: &mut Body, manifold: &ContactManifold) -> [f32; 2] {
    let normal = manifold.normal;
    let points = manifold.contact_points();
    let count = points.len() as f32;
    let e = a.material().restitution.min(b.material().restitution);

    let mut magnitudes = [0.0; 2];
    let mut pending: [Option<(ContactArm, Vec2)>; 2] = [None, None];

    for (i, &point) in points.iter().enumerate() {
        let arm = ContactArm::new(a, b, point);
        let contact_speed = arm.relative_velocity(a, b).dot(normal);
        if contact_speed > 0.0 {
            continue;
        }

        let j = -(1.0 + e) * contact_speed / arm.effective_mass(a, b, normal) / count;
        magnitudes[i] = j;
        pending[i] = Some((arm, normal * j));
    }

    for (arm, impulse) in pending.into_iter().flatten() {
        arm.apply(a, b, impulse);
    }

    trace!(?magnitudes, body_a = manifold.body_a, body_b = manifold.body_b, "normal impulses");
    magnitudes
}

fn apply_friction_impulses(
    a: &mut Body,
    b: &mut Body,
    manifold: &ContactManifold,
    normal_impulses: &[f32; 2],
) {
    let normal = manifold.normal;
    let points = manifold.contact_points();
    let count = points.len() as f32;
    let static_friction = (a.material().static_friction + b.material().static_friction) / 2.0;
    let dynamic_friction = (a.material().dynamic_friction + b.material().dynamic_friction) / 2.0;

    let mut pending: [Option<(ContactArm, Vec2)>; 2] = [None, None];

    for (i, &point) in points.iter().enumerate() {
        let arm = ContactArm::new(a, b, point);
        let relative_velocity = arm.relative_velocity(a, b);

        let tangent = relative_velocity - normal * relative_velocity.dot(normal);
        if tangent.nearly_equal(Vec2::ZERO, TANGENT_EPSILON) {
            continue;
        }
        let tangent = tangent.normalize();

        let jt = -relative_velocity.dot(tangent) / arm.effective_mass(a, b, tangent) / count;
        let magnitude = coulomb_friction(jt, normal_impulses[i], static_friction, dynamic_friction);
        pending[i] = Some((arm, tangent * magnitude));
    }

    for (arm, impulse) in pending.into_iter().flatten() {
        arm.apply(a, b, impulse);
    }
}
