pub mod broad_phase;
pub mod contact;
pub mod filter;
pub mod narrow_phase;
pub mod octree;

pub use broad_phase::Bvh;
pub use contact::{BodyHandle, Contact, ShapeId};
pub use filter::{BroadPhaseFilter, FilterChain, TriangleMeshFilter};
pub use narrow_phase::{penetration, NarrowPhaseConfig, Penetration};
pub use octree::Octree;
