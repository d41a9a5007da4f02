use tracing::{debug, trace, warn};

use super::solver;
use crate::collision::{self, ContactManifold, PairFinder};
use crate::common::Material;
use crate::config::{WorldConfig, MAX_ITERATIONS, MIN_ITERATIONS};
use crate::error::{ValidationError, WorldError};
use crate::integration::integrate;
use crate::math::Vec2;
use crate::objects::Body;

/// Stable identifier for a body, valid until the body is removed.
///
/// Indices shift on removal; handles never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(u64);

/// Owns every body and advances them with [`PhysicsWorld::step`].
///
/// Bodies are kept in insertion order, which is also the iteration order of
/// every phase of a step.
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    config: WorldConfig,
    bodies: Vec<Body>,
    handles: Vec<BodyHandle>,
    next_handle: u64,
    pair_finder: PairFinder,
    // Broad-phase candidates, rebuilt every substep.
    pairs: Vec<(usize, usize)>,
    // Manifolds from the last substep.
    contacts: Vec<ContactManifold>,
}

impl PhysicsWorld {
    /// Creates a new, empty physics world with default settings.
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    pub fn with_config(config: WorldConfig) -> Self {
        debug!(?config, "creating physics world");
        Self {
            pair_finder: PairFinder::new(&config.broad_phase),
            config,
            bodies: Vec::new(),
            handles: Vec::new(),
            next_handle: 0,
            pairs: Vec::new(),
            contacts: Vec::new(),
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    // --- Body management --- //

    /// Creates a circle body checked against this world's [`crate::BodyLimits`].
    ///
    /// The body is not added; place it and pass it to [`PhysicsWorld::add_body`].
    pub fn create_circle(
        &self,
        radius: f32,
        density: f32,
        is_static: bool,
        material: Material,
    ) -> Result<Body, ValidationError> {
        Body::create_circle_with(&self.config.limits, radius, density, is_static, material)
    }

    /// Creates a box body checked against this world's [`crate::BodyLimits`].
    pub fn create_box(
        &self,
        width: f32,
        height: f32,
        density: f32,
        is_static: bool,
        material: Material,
    ) -> Result<Body, ValidationError> {
        Body::create_box_with(&self.config.limits, width, height, density, is_static, material)
    }

    /// Appends a body and returns its handle. Its index is the previous body count.
    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        debug!(
            ?handle,
            index = self.bodies.len(),
            kind = ?body.shape().kind(),
            is_static = body.is_static(),
            "adding body"
        );
        self.bodies.push(body);
        self.handles.push(handle);
        handle
    }

    /// Removes a body, shifting later bodies down by one index.
    /// Returns `false` if the handle is unknown.
    pub fn remove_body(&mut self, handle: BodyHandle) -> bool {
        let Some(index) = self.index_of(handle) else {
            return false;
        };
        self.bodies.remove(index);
        self.handles.remove(index);
        // Stored manifolds refer to the old indices.
        self.contacts.clear();
        debug!(?handle, index, "removed body");
        true
    }

    pub fn get_body(&self, index: usize) -> Result<&Body, WorldError> {
        let count = self.bodies.len();
        self.bodies
            .get(index)
            .ok_or(WorldError::BodyNotFound { index, count })
    }

    pub fn get_body_mut(&mut self, index: usize) -> Result<&mut Body, WorldError> {
        let count = self.bodies.len();
        self.bodies
            .get_mut(index)
            .ok_or(WorldError::BodyNotFound { index, count })
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.index_of(handle).map(|index| &self.bodies[index])
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.index_of(handle).map(|index| &mut self.bodies[index])
    }

    /// Current index of a body, if it is still in the world.
    pub fn index_of(&self, handle: BodyHandle) -> Option<usize> {
        self.handles.iter().position(|&h| h == handle)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Manifolds produced by the last substep of the last step.
    pub fn contacts(&self) -> &[ContactManifold] {
        &self.contacts
    }

    // --- Simulation --- //

    /// Advances the simulation by `dt` seconds split into `iterations`
    /// substeps, clamped to `[1, 100]`.
    ///
    /// A non-positive or non-finite `dt` leaves the world untouched.
    pub fn step(&mut self, dt: f32, iterations: u32) {
        if !(dt.is_finite() && dt > 0.0) {
            warn!(dt, "ignoring step with invalid time delta");
            return;
        }

        let iterations = iterations.clamp(MIN_ITERATIONS, MAX_ITERATIONS);
        let sub_dt = dt / iterations as f32;

        for _ in 0..iterations {
            self.integrate_bodies(sub_dt);
            self.pair_finder.find_pairs(&self.bodies, &mut self.pairs);
            self.narrow_phase();
        }

        trace!(dt, iterations, contacts = self.contacts.len(), "step complete");
    }

    /// Steps with the configured default substep count.
    pub fn update(&mut self, dt: f32) {
        self.step(dt, self.config.default_iterations);
    }

    fn integrate_bodies(&mut self, dt: f32) {
        let gravity = self.config.gravity;
        for body in self.bodies.iter_mut() {
            integrate(body, gravity, dt);
        }
    }

    /// Tests, separates and resolves every candidate pair in order.
    fn narrow_phase(&mut self) {
        self.contacts.clear();
        let epsilon = self.config.contact_epsilon;
        let mode = self.config.resolution;

        for &(index_a, index_b) in &self.pairs {
            let Some((body_a, body_b)) = body_pair_mut(&mut self.bodies, index_a, index_b) else {
                continue;
            };

            // Earlier pairs in this substep may already have pushed these apart.
            let Some(penetration) = collision::collide(body_a, body_b) else {
                continue;
            };

            solver::separate_bodies(body_a, body_b, penetration.normal * penetration.depth);

            let points = collision::find_contact_points(body_a, body_b, penetration.normal, epsilon);
            let manifold = ContactManifold::new(index_a, index_b, penetration, points);
            trace!(
                index_a,
                index_b,
                depth = manifold.depth,
                contact_count = manifold.contact_count(),
                "resolving contact"
            );

            solver::resolve(mode, body_a, body_b, &manifold);
            self.contacts.push(manifold);
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Two distinct mutable bodies, in the order asked for.
fn body_pair_mut(bodies: &mut [Body], idx_a: usize, idx_b: usize) -> Option<(&mut Body, &mut Body)> {
    if idx_a == idx_b || idx_a >= bodies.len() || idx_b >= bodies.len() {
        return None;
    }

    // Ensure a < b for split_at_mut
    if idx_a < idx_b {
        let (slice_a, slice_b) = bodies.split_at_mut(idx_b);
        Some((&mut slice_a[idx_a], &mut slice_b[0]))
    } else {
        let (slice_b, slice_a) = bodies.split_at_mut(idx_a);
        Some((&mut slice_a[0], &mut slice_b[idx_b]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::Aabb;
    use crate::config::{BodyLimits, BroadPhase};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn circle(radius: f32, is_static: bool) -> Body {
        Body::create_circle(radius, 1.0, is_static, Material::default()).unwrap()
    }

    #[test]
    fn test_world_new() {
        let world = PhysicsWorld::new();
        assert_eq!(world.body_count(), 0);
        assert!(world.contacts().is_empty());
        assert_eq!(world.gravity(), Vec2::new(0.0, -9.81));
        assert_eq!(world.config(), &WorldConfig::default());
    }

    #[test]
    fn test_add_and_remove_bodies() {
        let mut world = PhysicsWorld::new();
        let first = world.add_body(circle(1.0, false));
        let second = world.add_body(circle(2.0, false));
        let third = world.add_body(circle(3.0, false));
        assert_eq!(world.body_count(), 3);
        assert_eq!(world.index_of(third), Some(2));

        assert!(world.remove_body(second));
        assert!(!world.remove_body(second));
        assert_eq!(world.body_count(), 2);

        // Later bodies shift down; handles still resolve.
        assert_eq!(world.index_of(third), Some(1));
        assert_eq!(world.body(third).and_then(|b| b.shape().radius()), Some(3.0));
        assert_eq!(world.get_body(0).unwrap().shape().radius(), Some(1.0));
        assert!(world.body(second).is_none());
        assert_eq!(world.index_of(first), Some(0));
    }

    #[test]
    fn test_get_body_out_of_range() {
        let mut world = PhysicsWorld::new();
        world.add_body(circle(1.0, false));
        assert_eq!(
            world.get_body(4).unwrap_err(),
            WorldError::BodyNotFound { index: 4, count: 1 }
        );
        assert!(world.get_body_mut(1).is_err());
    }

    #[test]
    fn test_body_mut_moves_body() {
        let mut world = PhysicsWorld::new();
        let handle = world.add_body(circle(1.0, false));
        world.body_mut(handle).unwrap().move_to(Vec2::new(3.0, 4.0));
        assert_eq!(world.get_body(0).unwrap().position(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_step_gravity() {
        let mut world = PhysicsWorld::new();
        world.set_gravity(Vec2::new(0.0, -10.0));
        world.add_body(circle(1.0, false));

        world.step(0.1, 1);

        let body = world.get_body(0).unwrap();
        assert_relative_eq!(body.linear_velocity.y, -1.0, epsilon = EPSILON);
        assert_relative_eq!(body.position().y, -0.1, epsilon = EPSILON);
    }

    #[test]
    fn test_step_substeps_split_dt() {
        let mut world = PhysicsWorld::new();
        world.set_gravity(Vec2::new(0.0, -10.0));
        world.add_body(circle(1.0, false));

        world.step(0.1, 2);

        // Two substeps of 0.05: v = -0.5 then -1.0, y = -0.025 then -0.075.
        let body = world.get_body(0).unwrap();
        assert_relative_eq!(body.linear_velocity.y, -1.0, epsilon = EPSILON);
        assert_relative_eq!(body.position().y, -0.075, epsilon = EPSILON);
    }

    #[test]
    fn test_invalid_dt_is_ignored() {
        let mut world = PhysicsWorld::new();
        world.add_body(circle(1.0, false));
        let before = world.get_body(0).unwrap().clone();

        world.step(0.0, 10);
        world.step(-1.0, 10);
        world.step(f32::NAN, 10);

        assert_eq!(world.get_body(0).unwrap(), &before);
    }

    #[test]
    fn test_iterations_are_clamped() {
        let mut zero = PhysicsWorld::new();
        zero.add_body(circle(1.0, false));
        zero.step(0.1, 0);

        let mut one = PhysicsWorld::new();
        one.add_body(circle(1.0, false));
        one.step(0.1, 1);

        assert_eq!(zero.get_body(0).unwrap(), one.get_body(0).unwrap());
    }

    #[test]
    fn test_static_body_never_moves() {
        let mut world = PhysicsWorld::new();
        world.add_body(circle(1.0, true));
        world.add_body(circle(1.0, false).with_position(Vec2::new(0.5, 1.0)));

        for _ in 0..10 {
            world.step(1.0 / 60.0, 4);
        }

        let ground = world.get_body(0).unwrap();
        assert_eq!(ground.position(), Vec2::ZERO);
        assert_eq!(ground.linear_velocity, Vec2::ZERO);
        assert_eq!(ground.angular_velocity, 0.0);
    }

    #[test]
    fn test_overlapping_circles_are_separated() {
        let mut world = PhysicsWorld::with_config(WorldConfig::default().zero_gravity());
        world.add_body(circle(1.0, false));
        world.add_body(circle(1.0, false).with_position(Vec2::new(1.5, 0.0)));

        world.step(1.0 / 60.0, 1);

        let a = world.get_body(0).unwrap().position();
        let b = world.get_body(1).unwrap().position();
        assert_relative_eq!(a.distance(b), 2.0, epsilon = 1e-4);

        let contacts = world.contacts();
        assert_eq!(contacts.len(), 1);
        assert_eq!((contacts[0].body_a, contacts[0].body_b), (0, 1));
        assert_relative_eq!(contacts[0].depth, 0.5, epsilon = EPSILON);
        assert_eq!(contacts[0].contact_count(), 1);
    }

    #[test]
    fn test_grid_world_matches_brute_force() {
        let grid = BroadPhase::UniformGrid {
            bounds: Aabb::new(Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0)),
            cell_size: 2.0,
        };
        let mut brute_world = PhysicsWorld::new();
        let mut grid_world = PhysicsWorld::with_config(WorldConfig::default().with_broad_phase(grid));

        for world in [&mut brute_world, &mut grid_world] {
            world.add_body(Body::create_box(16.0, 1.0, 1.0, true, Material::default()).unwrap());
            for i in 0..5 {
                let x = -4.0 + 2.0 * i as f32;
                world.add_body(circle(0.5, false).with_position(Vec2::new(x, 1.0 + i as f32 * 0.3)));
            }
        }

        for _ in 0..30 {
            brute_world.step(1.0 / 60.0, 4);
            grid_world.step(1.0 / 60.0, 4);
        }

        assert_eq!(brute_world.bodies(), grid_world.bodies());
    }

    #[test]
    fn test_remove_clears_stale_contacts() {
        let mut world = PhysicsWorld::with_config(WorldConfig::default().zero_gravity());
        let a = world.add_body(circle(1.0, false));
        world.add_body(circle(1.0, false).with_position(Vec2::new(1.0, 0.0)));
        world.step(1.0 / 60.0, 1);
        assert!(!world.contacts().is_empty());

        world.remove_body(a);
        assert!(world.contacts().is_empty());
    }

    #[test]
    fn test_world_factories_use_configured_limits() {
        let limits = BodyLimits {
            max_body_size: 1.0,
            ..BodyLimits::default()
        };
        let world = PhysicsWorld::with_config(WorldConfig::default().with_limits(limits));

        let result = world.create_circle(2.0, 1.0, false, Material::default());
        assert!(matches!(
            result,
            Err(ValidationError::AreaTooLarge { max, .. }) if max == 1.0
        ));
        assert!(matches!(
            world.create_box(2.0, 1.0, 1.0, true, Material::default()),
            Err(ValidationError::AreaTooLarge { .. })
        ));
        assert_eq!(world.body_count(), 0);

        // The default limits would have accepted both.
        assert!(Body::create_circle(2.0, 1.0, false, Material::default()).is_ok());
        let small = world.create_box(0.5, 0.5, 1.0, false, Material::default()).unwrap();
        assert_relative_eq!(small.mass(), 0.25, epsilon = EPSILON);
    }

    #[test]
    fn test_oversized_grid_world_still_steps() {
        let grid = BroadPhase::UniformGrid {
            bounds: Aabb::new(Vec2::new(-1e6, -1e6), Vec2::new(1e6, 1e6)),
            cell_size: 0.01,
        };
        let mut world = PhysicsWorld::with_config(
            WorldConfig::default().zero_gravity().with_broad_phase(grid),
        );
        world.add_body(circle(1.0, false));
        world.add_body(circle(1.0, false).with_position(Vec2::new(1.5, 0.0)));

        world.step(1.0 / 60.0, 1);

        assert_eq!(world.contacts().len(), 1);
        let a = world.get_body(0).unwrap().position();
        let b = world.get_body(1).unwrap().position();
        assert_relative_eq!(a.distance(b), 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_body_pair_mut() {
        let mut bodies = vec![circle(1.0, false), circle(2.0, false), circle(3.0, false)];
        let (a, b) = body_pair_mut(&mut bodies, 2, 0).unwrap();
        assert_eq!(a.shape().radius(), Some(3.0));
        assert_eq!(b.shape().radius(), Some(1.0));
        assert!(body_pair_mut(&mut bodies, 1, 1).is_none());
        assert!(body_pair_mut(&mut bodies, 0, 3).is_none());
    }
}
