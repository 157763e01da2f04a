mod aabb;
mod shape;
mod support;
mod triangle;

pub use aabb::Aabb;
pub use shape::{BoxShape, Capsule, ConvexHull, Shape, Sphere};
pub use support::{SupportMap, Transformed};
pub use triangle::Triangle;
