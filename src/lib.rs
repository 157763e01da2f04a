//! # RustPhy Collide
//!
//! The collision detection pipeline of a 3D rigid body physics engine.
//!
//! ## Features
//!
//! - **Support mappings**: Sphere, Box, Capsule and convex hull shapes behind one
//!   [`SupportMap`](geometry::SupportMap) trait
//! - **Narrow Phase**: Minkowski portal refinement with polytope expansion for exact depth
//! - **Broad Phase**: Bounding Volume Hierarchy (BVH) plus a pluggable pair filter
//! - **Static Meshes**: Octree-indexed triangle meshes collided triangle by triangle
//! - **Parallel**: Pair processing on the rayon pool (`parallel` feature, on by default)
//!
//! ## Quick Start
//!
//! ```rust
//! use rustphy_collide::prelude::*;
//!
//! let mut world = World::default();
//!
//! // A static ground triangle
//! world
//!     .add_triangle_mesh(
//!         vec![
//!             Vec3::new(-10.0, 0.0, -10.0),
//!             Vec3::new(10.0, 0.0, -10.0),
//!             Vec3::new(0.0, 0.0, 10.0),
//!         ],
//!         vec![[0, 1, 2]],
//!     )
//!     .unwrap();
//!
//! // A dynamic box sinking 0.1 into it
//! let body = world.create_body(RigidBodyDesc::dynamic().with_position(Vec3::new(0.0, 0.4, 0.0)));
//! world.add_collider(ColliderDesc::new(Shape::cuboid(Vec3::splat(0.5))).attached_to(body));
//!
//! world.detect_collisions();
//! for contact in world.contacts() {
//!     println!("depth {} along {:?}", contact.depth, contact.normal);
//! }
//! assert_eq!(world.contact_count(), 1);
//! ```

pub mod collision;
pub mod dynamics;
pub mod error;
pub mod geometry;
pub mod math;
mod world;

pub use error::{CollisionError, CollisionResult};
pub use world::{Collider, ColliderDesc, ColliderHandle, World, WorldConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::collision::{
        penetration, BodyHandle, BroadPhaseFilter, Contact, FilterChain, NarrowPhaseConfig,
        Octree, Penetration, ShapeId, TriangleMeshFilter,
    };
    pub use crate::dynamics::{BodyType, RigidBody, RigidBodyDesc};
    pub use crate::error::{CollisionError, CollisionResult};
    pub use crate::geometry::{
        Aabb, BoxShape, Capsule, ConvexHull, Shape, Sphere, SupportMap, Transformed, Triangle,
    };
    pub use crate::math::{Mat3, Quat, Transform, Vec3};
    pub use crate::world::{Collider, ColliderDesc, ColliderHandle, World, WorldConfig};
}
