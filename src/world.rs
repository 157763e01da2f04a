use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{debug, trace};
use parking_lot::Mutex;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::collision::{
    penetration, BodyHandle, BroadPhaseFilter, Bvh, Contact, FilterChain, NarrowPhaseConfig,
    Octree, ShapeId, TriangleMeshFilter,
};
use crate::dynamics::{RigidBody, RigidBodyDesc};
use crate::error::CollisionResult;
use crate::geometry::{Aabb, Shape, Transformed};
use crate::math::{Mat3, Transform, Vec3};

/// Configuration for the collision world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Margin added around collider boxes in the broad phase
    pub broad_phase_margin: f32,
    pub narrow_phase: NarrowPhaseConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            broad_phase_margin: 0.1,
            narrow_phase: NarrowPhaseConfig::default(),
        }
    }
}

/// A handle to a collider slot in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderHandle(pub u32);

impl ColliderHandle {
    /// Returns the slot index of this handle
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A shape registered with the world.
#[derive(Debug, Clone)]
pub struct Collider {
    /// Stable id, unique within the world
    pub id: ShapeId,
    /// Shape in its local frame
    pub shape: Shape,
    /// Owning body, `None` for fixed world geometry
    pub body: Option<BodyHandle>,
    /// World placement; follows the body when there is one
    pub transform: Transform,
    /// World box of the shape at `transform`
    pub aabb: Aabb,
}

/// Description for adding a collider
#[derive(Debug, Clone)]
pub struct ColliderDesc {
    pub shape: Shape,
    pub body: Option<BodyHandle>,
    /// Placement used while the collider has no body
    pub transform: Transform,
}

impl ColliderDesc {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            body: None,
            transform: Transform::IDENTITY,
        }
    }

    /// Attaches the collider to `body`; it then follows the body's pose
    pub fn attached_to(mut self, body: BodyHandle) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

/// Owns bodies and colliders and produces the contact set of a step.
///
/// Contacts are collected through [`World::register_contact`], which takes `&self`: pair
/// processing runs on the rayon pool when the `parallel` feature is enabled.
pub struct World {
    config: WorldConfig,
    bodies: Vec<RigidBody>,
    free_bodies: Vec<usize>,
    colliders: Vec<Option<Collider>>,
    free_colliders: Vec<usize>,
    broad_phase: Bvh,
    filter: Option<Arc<dyn BroadPhaseFilter>>,
    next_id: AtomicU64,
    contacts: Mutex<Vec<Contact>>,
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl World {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            broad_phase: Bvh::with_margin(config.broad_phase_margin),
            config,
            bodies: Vec::new(),
            free_bodies: Vec::new(),
            colliders: Vec::new(),
            free_colliders: Vec::new(),
            filter: None,
            next_id: AtomicU64::new(0),
            contacts: Mutex::new(Vec::new()),
        }
    }

    #[inline]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Creates a new rigid body and returns its handle
    pub fn create_body(&mut self, desc: RigidBodyDesc) -> BodyHandle {
        let index = self.free_bodies.pop().unwrap_or_else(|| {
            self.bodies.push(RigidBody::default());
            self.bodies.len() - 1
        });

        let handle = BodyHandle::new(index as u32);
        self.bodies[index] = desc.build(handle);
        handle
    }

    /// Removes a body. Its colliders stay in the world as fixed geometry at their last pose.
    pub fn remove_body(&mut self, handle: BodyHandle) {
        if self.body(handle).is_none() {
            return;
        }

        for collider in self.colliders.iter_mut().flatten() {
            if collider.body == Some(handle) {
                collider.body = None;
            }
        }

        self.bodies[handle.index()] = RigidBody::default();
        self.free_bodies.push(handle.index());
    }

    /// Gets a reference to a body
    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies
            .get(handle.index())
            .filter(|body| body.handle == handle)
    }

    /// Gets a mutable reference to a body
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies
            .get_mut(handle.index())
            .filter(|body| body.handle == handle)
    }

    pub fn set_body_position(&mut self, handle: BodyHandle, position: Vec3) {
        if let Some(body) = self.body_mut(handle) {
            body.position = position;
            body.wake_up();
        }
    }

    pub fn set_body_orientation(&mut self, handle: BodyHandle, orientation: Mat3) {
        if let Some(body) = self.body_mut(handle) {
            body.orientation = orientation;
            body.wake_up();
        }
    }

    /// Returns the number of bodies in the world
    pub fn num_bodies(&self) -> usize {
        self.bodies.len() - self.free_bodies.len()
    }

    /// Registers a collider and gives it a fresh id
    pub fn add_collider(&mut self, desc: ColliderDesc) -> ColliderHandle {
        let transform = desc
            .body
            .and_then(|handle| self.body(handle))
            .map_or(desc.transform, RigidBody::transform);

        let aabb = desc.shape.world_aabb(transform);
        let collider = Collider {
            id: self.request_id(1),
            shape: desc.shape,
            body: desc.body,
            transform,
            aabb,
        };

        let index = match self.free_colliders.pop() {
            Some(index) => {
                self.colliders[index] = Some(collider);
                index
            }
            None => {
                self.colliders.push(Some(collider));
                self.colliders.len() - 1
            }
        };

        let handle = ColliderHandle(index as u32);
        self.broad_phase.insert(handle, aabb);
        handle
    }

    pub fn remove_collider(&mut self, handle: ColliderHandle) -> Option<Collider> {
        let collider = self.colliders.get_mut(handle.index())?.take()?;
        self.broad_phase.remove(handle);
        self.free_colliders.push(handle.index());
        Some(collider)
    }

    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle.index())?.as_ref()
    }

    /// Iterates over every registered collider
    pub fn colliders(&self) -> impl Iterator<Item = (ColliderHandle, &Collider)> + '_ {
        self.colliders
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|c| (ColliderHandle(i as u32), c)))
    }

    /// Installs `filter` in place of the current one and returns the previous filter
    pub fn set_broad_phase_filter(
        &mut self,
        filter: Option<Arc<dyn BroadPhaseFilter>>,
    ) -> Option<Arc<dyn BroadPhaseFilter>> {
        debug!(
            "broad phase filter {}",
            match (&self.filter, &filter) {
                (None, Some(_)) => "installed",
                (Some(_), Some(_)) => "replaced",
                (Some(_), None) => "removed",
                (None, None) => "unchanged",
            }
        );
        std::mem::replace(&mut self.filter, filter)
    }

    /// Reserves `count` consecutive ids and returns the first.
    ///
    /// Safe to call from any thread; ranges handed out never overlap and are never reused.
    #[inline]
    pub fn request_id(&self, count: u64) -> ShapeId {
        self.next_id.fetch_add(count, Ordering::Relaxed)
    }

    /// Appends one contact to the current step's set.
    ///
    /// `body_a` is `None` when shape A is world geometry without a body. Filters pass
    /// `from_filter = true`; the default pair path passes `false`.
    #[allow(clippy::too_many_arguments)]
    pub fn register_contact(
        &self,
        shape_a: ShapeId,
        shape_b: ShapeId,
        body_a: Option<BodyHandle>,
        body_b: BodyHandle,
        point_a: Vec3,
        point_b: Vec3,
        normal: Vec3,
        depth: f32,
        from_filter: bool,
    ) {
        trace!(
            "contact {} / {}: depth {:.5}, normal {:?}",
            shape_a,
            shape_b,
            depth,
            normal
        );

        self.contacts.lock().push(Contact {
            shape_a,
            shape_b,
            body_a,
            body_b,
            point_a,
            point_b,
            normal,
            depth: depth.max(0.0),
            from_filter,
        });
    }

    /// Builds an octree over a static mesh, adds a proxy collider covering it and installs a
    /// [`TriangleMeshFilter`] for it. Returns the proxy handle.
    ///
    /// The mesh filter is chained behind the filter already installed, so earlier meshes and
    /// custom filters keep handling their pairs.
    pub fn add_triangle_mesh(
        &mut self,
        vertices: Vec<Vec3>,
        indices: Vec<[u32; 3]>,
    ) -> CollisionResult<ColliderHandle> {
        let octree = Arc::new(Octree::new(vertices, indices)?);
        let bbox = octree.bounding_box();

        let proxy = self.add_collider(
            ColliderDesc::new(Shape::cuboid(bbox.half_extents()))
                .with_transform(Transform::from_position(bbox.center())),
        );
        let mesh = TriangleMeshFilter::new(self, proxy, octree)?;
        let mesh: Arc<dyn BroadPhaseFilter> = Arc::new(mesh);

        let filter: Arc<dyn BroadPhaseFilter> = match &self.filter {
            Some(previous) => Arc::new(FilterChain::new(vec![previous.clone(), mesh])),
            None => mesh,
        };
        self.set_broad_phase_filter(Some(filter));

        Ok(proxy)
    }

    /// Moves bodied colliders to their body pose and refreshes their boxes in the broad phase
    pub fn refresh_colliders(&mut self) {
        for (index, slot) in self.colliders.iter_mut().enumerate() {
            let Some(collider) = slot else {
                continue;
            };
            let Some(body) = collider
                .body
                .and_then(|handle| self.bodies.get(handle.index()))
            else {
                continue;
            };

            collider.transform = body.transform();
            collider.aabb = collider.shape.world_aabb(collider.transform);
            self.broad_phase
                .update(ColliderHandle(index as u32), collider.aabb);
        }
    }

    /// Runs the broad and narrow phase over every collider and rebuilds the contact set
    pub fn detect_collisions(&mut self) {
        self.contacts.get_mut().clear();
        self.refresh_colliders();

        let pairs = self.broad_phase.query_pairs();
        let world = &*self;

        #[cfg(feature = "parallel")]
        pairs.par_iter().for_each(|&(a, b)| world.process_pair(a, b));

        #[cfg(not(feature = "parallel"))]
        pairs.iter().for_each(|&(a, b)| world.process_pair(a, b));

        trace!(
            "{} broad phase pairs, {} contacts",
            pairs.len(),
            self.contacts.get_mut().len()
        );
    }

    fn process_pair(&self, a: ColliderHandle, b: ColliderHandle) {
        let (Some(a), Some(b)) = (self.collider(a), self.collider(b)) else {
            return;
        };

        if let Some(filter) = &self.filter {
            if !filter.filter(self, a, b) {
                return;
            }
        }

        let active = |c: &Collider| {
            c.body
                .and_then(|handle| self.body(handle))
                .is_some_and(RigidBody::is_dynamic_and_active)
        };

        // The bodied side goes second
        let (a, b) = match (active(a), active(b)) {
            (_, true) => (a, b),
            (true, false) => (b, a),
            (false, false) => return,
        };
        let Some(body_b) = b.body else {
            return;
        };

        let shape_a = Transformed::new(&a.shape, a.transform.orientation, a.transform.position);
        let Some(hit) = penetration(
            &shape_a,
            &b.shape,
            b.transform.orientation,
            b.transform.position,
            &self.config.narrow_phase,
        ) else {
            return;
        };

        self.register_contact(
            a.id,
            b.id,
            a.body,
            body_b,
            hit.point_a,
            hit.point_b,
            hit.normal,
            hit.depth,
            false,
        );
    }

    /// Snapshot of the current contact set
    pub fn contacts(&self) -> Vec<Contact> {
        self.contacts.lock().clone()
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.lock().len()
    }

    /// Moves the current contact set out of the world
    pub fn take_contacts(&mut self) -> Vec<Contact> {
        std::mem::take(self.contacts.get_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_mesh() -> (Vec<Vec3>, Vec<[u32; 3]>) {
        (
            vec![
                Vec3::new(-10.0, 0.0, -10.0),
                Vec3::new(10.0, 0.0, -10.0),
                Vec3::new(0.0, 0.0, 10.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    fn add_box(world: &mut World, desc: RigidBodyDesc, half: f32) -> (BodyHandle, ColliderHandle) {
        let body = world.create_body(desc);
        let shape = Shape::cuboid(Vec3::splat(half));
        let collider = world.add_collider(ColliderDesc::new(shape).attached_to(body));
        (body, collider)
    }

    fn shifted(mesh: (Vec<Vec3>, Vec<[u32; 3]>), by: Vec3) -> (Vec<Vec3>, Vec<[u32; 3]>) {
        let (vertices, indices) = mesh;
        (vertices.into_iter().map(|v| v + by).collect(), indices)
    }

    #[test]
    fn test_world_creation() {
        let world = World::default();
        assert_eq!(world.num_bodies(), 0);
        assert_eq!(world.contact_count(), 0);
        assert_eq!(world.config().broad_phase_margin, 0.1);
    }

    #[test]
    fn test_create_and_remove_body() {
        let mut world = World::default();

        let (body, collider) = add_box(
            &mut world,
            RigidBodyDesc::dynamic().with_position(Vec3::new(0.0, 5.0, 0.0)),
            0.5,
        );
        assert_eq!(world.num_bodies(), 1);
        assert_eq!(world.body(body).unwrap().position, Vec3::new(0.0, 5.0, 0.0));

        world.remove_body(body);
        assert_eq!(world.num_bodies(), 0);
        assert!(world.body(body).is_none());

        // The collider is kept as fixed geometry
        let collider = world.collider(collider).unwrap();
        assert_eq!(collider.body, None);
        assert_eq!(collider.transform.position, Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_remove_collider_reuses_slot() {
        let mut world = World::default();
        let a = world.add_collider(ColliderDesc::new(Shape::sphere(1.0)));
        let first_id = world.collider(a).unwrap().id;

        assert!(world.remove_collider(a).is_some());
        assert!(world.remove_collider(a).is_none());
        assert!(world.collider(a).is_none());

        let b = world.add_collider(ColliderDesc::new(Shape::sphere(1.0)));
        assert_eq!(a, b);
        assert_ne!(world.collider(b).unwrap().id, first_id);
        assert_eq!(world.colliders().count(), 1);
    }

    #[test]
    fn test_box_resting_on_mesh() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut world = World::default();
        let (vertices, indices) = floor_mesh();
        world.add_triangle_mesh(vertices, indices).unwrap();

        let (body, _) = add_box(
            &mut world,
            RigidBodyDesc::dynamic().with_position(Vec3::new(0.0, 0.4, 0.0)),
            0.5,
        );
        world.detect_collisions();

        let contacts = world.contacts();
        assert_eq!(contacts.len(), 1);

        let contact = &contacts[0];
        assert_eq!(contact.body_a, None);
        assert_eq!(contact.body_b, body);
        assert!((contact.depth - 0.1).abs() < 1e-3);
        assert!(contact.normal.abs_diff_eq(Vec3::Y, 1e-3));
        assert!(contact.from_filter);

        let separation = contact.point_a - contact.point_b;
        assert!(separation.abs_diff_eq(contact.normal * contact.depth, 1e-3));
    }

    #[test]
    fn test_second_mesh_keeps_first_mesh_exact() {
        let mut world = World::default();
        let (vertices, indices) = floor_mesh();
        let first = world.add_triangle_mesh(vertices, indices).unwrap();
        let (vertices, indices) = shifted(floor_mesh(), Vec3::new(100.0, 0.0, 0.0));
        let second = world.add_triangle_mesh(vertices, indices).unwrap();

        // Inside the first mesh's bounds but off its triangle
        let (stray, _) = add_box(
            &mut world,
            RigidBodyDesc::dynamic().with_position(Vec3::new(-9.0, 0.4, 9.0)),
            0.5,
        );
        world.detect_collisions();
        assert_eq!(world.contact_count(), 0);

        world.set_body_position(stray, Vec3::new(0.0, 0.4, 0.0));
        let (other, _) = add_box(
            &mut world,
            RigidBodyDesc::dynamic().with_position(Vec3::new(100.0, 0.4, 0.0)),
            0.5,
        );
        world.detect_collisions();

        let contacts = world.contacts();
        assert_eq!(contacts.len(), 2);
        assert!(contacts.iter().all(|c| c.from_filter && c.body_a.is_none()));

        let proxies = [first, second].map(|h| world.collider(h).unwrap().id);
        assert!(contacts.iter().all(|c| !proxies.contains(&c.shape_a)));

        let on_first = contacts.iter().find(|c| c.body_b == stray).unwrap();
        let on_second = contacts.iter().find(|c| c.body_b == other).unwrap();
        assert!(on_first.shape_a < on_second.shape_a);
    }

    #[test]
    fn test_box_above_mesh_has_no_contact() {
        let mut world = World::default();
        let (vertices, indices) = floor_mesh();
        world.add_triangle_mesh(vertices, indices).unwrap();

        let (body, _) = add_box(
            &mut world,
            RigidBodyDesc::dynamic().with_position(Vec3::new(0.0, 0.55, 0.0)),
            0.5,
        );
        world.detect_collisions();
        assert_eq!(world.contact_count(), 0);

        // Moving the body down is picked up by the next pass
        world.set_body_position(body, Vec3::new(0.0, 0.45, 0.0));
        world.detect_collisions();
        assert_eq!(world.contact_count(), 1);
    }

    #[test]
    fn test_invalid_mesh_is_rejected() {
        let mut world = World::default();
        let result = world.add_triangle_mesh(vec![Vec3::ZERO], vec![[0, 1, 2]]);
        assert!(result.is_err());
        assert_eq!(world.colliders().count(), 0);
    }

    #[test]
    fn test_default_pair_path() {
        let mut world = World::default();

        let (floor, floor_collider) = add_box(&mut world, RigidBodyDesc::fixed(), 1.0);
        let (ball, _) = add_box(
            &mut world,
            RigidBodyDesc::dynamic().with_position(Vec3::new(0.3, 1.8, 0.0)),
            1.0,
        );
        world.detect_collisions();

        let contacts = world.take_contacts();
        assert_eq!(contacts.len(), 1);
        assert_eq!(world.contact_count(), 0);

        let contact = contacts[0];
        assert_eq!(contact.body_a, Some(floor));
        assert_eq!(contact.body_b, ball);
        assert_eq!(contact.shape_a, world.collider(floor_collider).unwrap().id);
        assert!((contact.depth - 0.2).abs() < 1e-3);
        assert!(contact.normal.dot(Vec3::Y) > 0.99);
        assert!(!contact.from_filter);
    }

    #[test]
    fn test_bodied_side_becomes_b() {
        let mut world = World::default();

        // Dynamic body added first, so it is the lower slot in the pair
        let (ball, _) = add_box(
            &mut world,
            RigidBodyDesc::dynamic().with_position(Vec3::new(0.0, 1.5, 0.0)),
            1.0,
        );
        world.add_collider(ColliderDesc::new(Shape::cuboid(Vec3::ONE)));
        world.detect_collisions();

        let contacts = world.contacts();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].body_a, None);
        assert_eq!(contacts[0].body_b, ball);
        // Normal points from the fixed box up toward the ball
        assert!(contacts[0].normal.dot(Vec3::Y) > 0.99);
    }

    #[test]
    fn test_inactive_pairs_are_skipped() {
        let mut world = World::default();

        add_box(&mut world, RigidBodyDesc::fixed(), 1.0);
        let (sleeper, _) = add_box(
            &mut world,
            RigidBodyDesc::dynamic()
                .with_position(Vec3::new(0.0, 1.5, 0.0))
                .sleeping(),
            1.0,
        );
        add_box(
            &mut world,
            RigidBodyDesc::kinematic().with_position(Vec3::new(1.5, 0.0, 0.0)),
            1.0,
        );
        world.detect_collisions();
        assert_eq!(world.contact_count(), 0);

        world.body_mut(sleeper).unwrap().wake_up();
        world.detect_collisions();
        assert_eq!(world.contact_count(), 2);
        assert!(world.contacts().iter().all(|c| c.body_b == sleeper));
    }

    #[test]
    fn test_rotated_body_pose() {
        let mut world = World::default();

        add_box(&mut world, RigidBodyDesc::fixed(), 1.0);
        let (body, _) = add_box(
            &mut world,
            RigidBodyDesc::dynamic().with_position(Vec3::new(0.0, 2.2, 0.0)),
            1.0,
        );
        world.detect_collisions();
        assert_eq!(world.contact_count(), 0);

        // Tilted 45 degrees, an edge reaches down to 2.2 - sqrt(2)
        world.set_body_orientation(body, Mat3::from_rotation_z(std::f32::consts::FRAC_PI_4));
        world.detect_collisions();
        let contacts = world.contacts();
        assert_eq!(contacts.len(), 1);
        assert!((contacts[0].depth - (std::f32::consts::SQRT_2 - 1.2)).abs() < 1e-2);
        assert!(contacts[0].normal.dot(Vec3::Y) > 0.99);
    }

    #[test]
    fn test_request_id_is_contiguous_across_threads() {
        let world = World::default();
        let base = world.request_id(0);

        let mut ranges: Vec<(u64, u64)> = std::thread::scope(|scope| {
            let handles: Vec<_> = (1..=8u64)
                .map(|count| {
                    let world = &world;
                    scope.spawn(move || {
                        (0..50)
                            .map(|_| {
                                let start = world.request_id(count);
                                (start, start + count)
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });

        ranges.sort_unstable();
        assert_eq!(ranges[0].0, base);
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }

        let total: u64 = (1..=8u64).map(|c| c * 50).sum();
        assert_eq!(ranges.last().unwrap().1, base + total);
    }

    #[test]
    fn test_set_filter_returns_previous() {
        struct Reject;
        impl BroadPhaseFilter for Reject {
            fn filter(&self, _: &World, _: &Collider, _: &Collider) -> bool {
                false
            }
        }

        let mut world = World::default();
        assert!(world.set_broad_phase_filter(Some(Arc::new(Reject))).is_none());

        add_box(&mut world, RigidBodyDesc::dynamic(), 1.0);
        add_box(&mut world, RigidBodyDesc::dynamic().with_position(Vec3::X), 1.0);
        world.detect_collisions();
        assert_eq!(world.contact_count(), 0);

        assert!(world.set_broad_phase_filter(None).is_some());
        world.detect_collisions();
        assert_eq!(world.contact_count(), 1);
    }

    #[test]
    fn test_mesh_is_chained_behind_custom_filter() {
        struct Counter(AtomicU64);
        impl BroadPhaseFilter for Counter {
            fn filter(&self, _: &World, _: &Collider, _: &Collider) -> bool {
                self.0.fetch_add(1, Ordering::Relaxed);
                true
            }
        }

        let mut world = World::default();
        let counter = Arc::new(Counter(AtomicU64::new(0)));
        world.set_broad_phase_filter(Some(counter.clone()));

        let (vertices, indices) = floor_mesh();
        world.add_triangle_mesh(vertices, indices).unwrap();
        add_box(
            &mut world,
            RigidBodyDesc::dynamic().with_position(Vec3::new(0.0, 0.4, 0.0)),
            0.5,
        );
        world.detect_collisions();

        assert_eq!(counter.0.load(Ordering::Relaxed), 1);
        assert_eq!(world.contact_count(), 1);
        assert!(world.contacts()[0].from_filter);
    }

    #[test]
    fn test_config_serde_defaults() {
        let json = r#"{ "broad_phase_margin": 0.25 }"#;
        let config: WorldConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.broad_phase_margin, 0.25);
        assert!(config.narrow_phase.refine_penetration);
        assert_eq!(WorldConfig::default().narrow_phase, NarrowPhaseConfig::default());

        let json = serde_json::to_string(&config).unwrap();
        let back: WorldConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
