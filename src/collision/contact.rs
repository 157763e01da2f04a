use crate::math::Vec3;

/// Identifier of a collision shape, unique within one world.
///
/// Drawn from the world's id counter. Mesh triangles use ids reserved in a contiguous block.
pub type ShapeId = u64;

/// A handle to a body in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub u32);

impl BodyHandle {
    /// Invalid/null body handle
    pub const INVALID: Self = Self(u32::MAX);

    /// Creates a new body handle
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the index of this handle
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for BodyHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

/// One verified contact between two shapes for the current step.
///
/// `normal` points from A toward B and `point_a - point_b == normal * depth`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub shape_a: ShapeId,
    pub shape_b: ShapeId,
    /// `None` for world geometry that has no body (static meshes)
    pub body_a: Option<BodyHandle>,
    pub body_b: BodyHandle,
    /// Deepest point of A inside B, world space
    pub point_a: Vec3,
    /// Deepest point of B inside A, world space
    pub point_b: Vec3,
    pub normal: Vec3,
    /// Never negative
    pub depth: f32,
    /// Set when a broad-phase filter registered the contact, clear for the default pair path
    pub from_filter: bool,
}
