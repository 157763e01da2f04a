use glam::{Mat3, Vec3};

/// A rigid placement in world space: a position plus a 3x3 rotation matrix.
///
/// The orientation is stored as a matrix because support queries apply it (and its transpose)
/// several times per narrow-phase iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position (translation)
    pub position: Vec3,
    /// Orientation as a rotation matrix
    pub orientation: Mat3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Identity transform (no translation or rotation)
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Mat3::IDENTITY,
    };

    /// Creates a new transform from position and orientation
    #[inline]
    pub const fn new(position: Vec3, orientation: Mat3) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Creates a transform with only translation
    #[inline]
    pub const fn from_position(position: Vec3) -> Self {
        Self {
            position,
            orientation: Mat3::IDENTITY,
        }
    }

    /// Transforms a point from local space to world space
    #[inline]
    pub fn transform_point(self, point: Vec3) -> Vec3 {
        self.orientation * point + self.position
    }

    /// Transforms a direction from local space to world space
    #[inline]
    pub fn transform_vector(self, vector: Vec3) -> Vec3 {
        self.orientation * vector
    }

    /// Inverse transforms a direction from world space to local space
    #[inline]
    pub fn inverse_transform_vector(self, vector: Vec3) -> Vec3 {
        self.orientation.transpose() * vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_direction_round_trip() {
        let t = Transform::new(Vec3::new(1.0, 2.0, 3.0), Mat3::from_rotation_y(0.7));
        let d = Vec3::new(-0.5, 4.0, 2.0);
        let back = t.inverse_transform_vector(t.transform_vector(d));
        assert!(back.abs_diff_eq(d, 1e-5));
    }

    #[test]
    fn test_rotation_about_z() {
        let t = Transform::new(Vec3::ZERO, Mat3::from_rotation_z(FRAC_PI_2));
        assert!(t.transform_vector(Vec3::X).abs_diff_eq(Vec3::Y, 1e-6));
        assert!(t.inverse_transform_vector(Vec3::Y).abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn test_point_is_rotated_then_translated() {
        let t = Transform::new(Vec3::new(10.0, 0.0, 0.0), Mat3::from_rotation_z(FRAC_PI_2));
        assert!(t.transform_point(Vec3::X).abs_diff_eq(Vec3::new(10.0, 1.0, 0.0), 1e-5));
        assert_eq!(Transform::default(), Transform::IDENTITY);
    }
}
