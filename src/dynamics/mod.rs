mod rigid_body;

pub use rigid_body::{BodyType, RigidBody, RigidBodyDesc};
