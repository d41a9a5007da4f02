use crate::math::Vec2;
use crate::objects::Body;

/// Integrates the body's state forward in time using Semi-Implicit Euler.
///
/// Velocity is updated first and the new velocity moves the body. The force
/// set through [`Body::add_force`] is consumed, static bodies included.
pub fn integrate(body: &mut Body, gravity: Vec2, dt: f32) {
    if body.is_static() {
        // Static object, do not integrate
        body.clear_force();
        return;
    }

    // --- Linear Motion --- //
    // a = F/m + g
    let linear_acceleration = body.force() * body.inv_mass() + gravity;
    body.linear_velocity += linear_acceleration * dt;
    body.move_by(body.linear_velocity * dt);

    // --- Angular Motion --- //
    body.rotate(body.angular_velocity * dt);

    body.clear_force();
}
