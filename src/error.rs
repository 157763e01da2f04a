//! Error types for the collision pipeline.
//!
//! Only construction-time precondition failures are errors. A narrow-phase miss is a normal
//! outcome and is reported as `None`.

use thiserror::Error;

use crate::world::ColliderHandle;

/// Unified error type for the collision crate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CollisionError {
    /// The mesh has no vertices or no triangles.
    #[error("Invalid mesh: {vertices} vertices and {triangles} triangles")]
    EmptyMesh { vertices: usize, triangles: usize },

    /// A triangle references a vertex past the end of the vertex array.
    #[error("Invalid mesh: triangle {triangle} references vertex {index} of {vertex_count}")]
    TriangleIndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    /// A vertex coordinate is NaN or infinite.
    #[error("Invalid mesh: vertex {vertex} is not finite")]
    NonFiniteVertex { vertex: usize },

    /// A collider handle that is not registered with the world.
    #[error("Unknown collider: {0:?}")]
    UnknownCollider(ColliderHandle),
}

/// Convenience alias for `Result<T, CollisionError>`.
pub type CollisionResult<T> = Result<T, CollisionError>;
