//! The support-mapping capability shared by every convex shape.

use crate::math::{Mat3, Transform, Vec3};

/// A convex shape described by its support function.
///
/// `support` returns a point of the shape that maximizes `dot(point, direction)`.
/// The direction is not required to be normalized. Ties between several maximizing points must
/// be broken the same way on every call, because the narrow phase assumes a single-valued
/// mapping.
///
/// Implementations only read `self`, so a shape may be queried from many threads at once.
pub trait SupportMap {
    /// Farthest point of the shape along `direction`
    fn support(&self, direction: Vec3) -> Vec3;

    /// A point strictly inside the shape, used to seed portal refinement
    fn center(&self) -> Vec3 {
        Vec3::ZERO
    }
}

impl<S: SupportMap + ?Sized> SupportMap for &S {
    #[inline]
    fn support(&self, direction: Vec3) -> Vec3 {
        (**self).support(direction)
    }

    #[inline]
    fn center(&self) -> Vec3 {
        (**self).center()
    }
}

/// A local-space shape placed in the world by a transform.
///
/// Queries are mapped into the shape's frame and back, so no transformed copy of the geometry
/// is ever built.
#[derive(Debug, Clone, Copy)]
pub struct Transformed<'a, S: ?Sized> {
    pub shape: &'a S,
    pub transform: Transform,
}

impl<'a, S: SupportMap + ?Sized> Transformed<'a, S> {
    #[inline]
    pub fn new(shape: &'a S, orientation: Mat3, position: Vec3) -> Self {
        Self {
            shape,
            transform: Transform::new(position, orientation),
        }
    }
}

impl<S: SupportMap + ?Sized> SupportMap for Transformed<'_, S> {
    #[inline]
    fn support(&self, direction: Vec3) -> Vec3 {
        let local_dir = self.transform.inverse_transform_vector(direction);
        self.transform
            .transform_point(self.shape.support(local_dir))
    }

    #[inline]
    fn center(&self) -> Vec3 {
        self.transform.transform_point(self.shape.center())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoxShape;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn test_transformed_translation() {
        let b = BoxShape::new(Vec3::ONE);
        let t = Transformed::new(&b, Mat3::IDENTITY, Vec3::new(5.0, 0.0, 0.0));

        assert_eq!(t.support(Vec3::X), Vec3::new(6.0, 1.0, 1.0));
        assert_eq!(t.center(), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_transformed_rotation() {
        // A unit cube rotated 45 degrees about Z reaches sqrt(2) along X
        let b = BoxShape::new(Vec3::ONE);
        let t = Transformed::new(&b, Mat3::from_rotation_z(FRAC_PI_4), Vec3::ZERO);

        let p = t.support(Vec3::X);
        assert!((p.x - 2.0_f32.sqrt()).abs() < 1e-5);
    }
}
