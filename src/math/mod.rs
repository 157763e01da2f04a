mod transform;

pub use glam::{Mat3, Quat, Vec3};
pub use transform::Transform;

/// Common math constants used by the collision routines
pub mod consts {
    /// Squared-length threshold below which a direction is treated as degenerate
    pub const DEGENERATE_LENGTH_SQUARED: f32 = 1e-12;
}

/// Returns a unit vector perpendicular to `v`.
///
/// Works for any input length. A zero (or non-finite) vector yields `Vec3::X`, so callers that
/// need "some direction" can always rely on a normalized result.
#[inline]
pub fn any_perpendicular(v: Vec3) -> Vec3 {
    let abs = v.abs();

    // Cross with the axis that is most perpendicular
    let other = if abs.x <= abs.y && abs.x <= abs.z {
        Vec3::X
    } else if abs.y <= abs.z {
        Vec3::Y
    } else {
        Vec3::Z
    };

    v.cross(other).try_normalize().unwrap_or(Vec3::X)
}

/// Normalizes `v`, substituting a perpendicular of `fallback` when `v` is degenerate.
#[inline]
pub fn normalize_or_perpendicular(v: Vec3, fallback: Vec3) -> Vec3 {
    if v.length_squared() > consts::DEGENERATE_LENGTH_SQUARED {
        v.normalize()
    } else {
        any_perpendicular(fallback)
    }
}
