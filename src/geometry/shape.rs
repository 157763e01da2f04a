use std::sync::Arc;

use crate::math::{Mat3, Transform, Vec3};

use super::aabb::Aabb;
use super::support::SupportMap;

/// A convex collision shape expressed in its local frame.
#[derive(Debug, Clone)]
pub enum Shape {
    /// A sphere defined by its radius
    Sphere(Sphere),
    /// A box (cuboid) defined by half-extents
    Box(BoxShape),
    /// A capsule defined by radius and half-height
    Capsule(Capsule),
    /// The convex hull of a point cloud
    ConvexHull(ConvexHull),
}

impl Shape {
    #[inline]
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere(Sphere::new(radius))
    }

    /// Creates a box shape from half-extents
    #[inline]
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::Box(BoxShape::new(half_extents))
    }

    #[inline]
    pub fn capsule(radius: f32, half_height: f32) -> Self {
        Self::Capsule(Capsule::new(radius, half_height))
    }

    /// Creates a hull shape; the points are used as given, interior points are harmless
    #[inline]
    pub fn convex_hull(points: impl Into<Arc<[Vec3]>>) -> Self {
        Self::ConvexHull(ConvexHull::new(points))
    }

    /// Computes the bounding box of this shape placed by `transform`
    #[inline]
    pub fn world_aabb(&self, transform: Transform) -> Aabb {
        match self {
            Shape::Sphere(s) => s.world_aabb(transform),
            Shape::Box(b) => b.world_aabb(transform),
            Shape::Capsule(c) => c.world_aabb(transform),
            Shape::ConvexHull(h) => h.world_aabb(transform),
        }
    }
}

impl SupportMap for Shape {
    #[inline]
    fn support(&self, direction: Vec3) -> Vec3 {
        match self {
            Shape::Sphere(s) => s.support(direction),
            Shape::Box(b) => b.support(direction),
            Shape::Capsule(c) => c.support(direction),
            Shape::ConvexHull(h) => h.support(direction),
        }
    }

    #[inline]
    fn center(&self) -> Vec3 {
        match self {
            Shape::ConvexHull(h) => h.center(),
            _ => Vec3::ZERO,
        }
    }
}

/// A sphere collision shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub radius: f32,
}

impl Sphere {
    #[inline]
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    #[inline]
    pub fn world_aabb(&self, transform: Transform) -> Aabb {
        Aabb::from_center_half_extents(transform.position, Vec3::splat(self.radius))
    }
}

impl SupportMap for Sphere {
    /// A zero direction maps to the +X pole
    #[inline]
    fn support(&self, direction: Vec3) -> Vec3 {
        direction.try_normalize().unwrap_or(Vec3::X) * self.radius
    }
}

/// A box (cuboid) collision shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    /// Half-extents (half the size in each dimension)
    pub half_extents: Vec3,
}

impl BoxShape {
    #[inline]
    pub fn new(half_extents: Vec3) -> Self {
        Self { half_extents }
    }

    /// Returns the bounding box of this box given a world transform
    #[inline]
    pub fn world_aabb(&self, transform: Transform) -> Aabb {
        let rot = transform.orientation;

        // World extent is the sum of the absolute rotated axes
        let abs_rot = Mat3::from_cols(rot.x_axis.abs(), rot.y_axis.abs(), rot.z_axis.abs());
        Aabb::from_center_half_extents(transform.position, abs_rot * self.half_extents)
    }
}

impl SupportMap for BoxShape {
    /// Zero components pick the positive face
    #[inline]
    fn support(&self, direction: Vec3) -> Vec3 {
        let h = self.half_extents;
        Vec3::new(
            if direction.x >= 0.0 { h.x } else { -h.x },
            if direction.y >= 0.0 { h.y } else { -h.y },
            if direction.z >= 0.0 { h.z } else { -h.z },
        )
    }
}

/// A capsule collision shape (segment along local Y swept by a sphere)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub radius: f32,
    /// Half-length of the inner segment (total height = 2 * half_height + 2 * radius)
    pub half_height: f32,
}

impl Capsule {
    #[inline]
    pub fn new(radius: f32, half_height: f32) -> Self {
        Self {
            radius,
            half_height,
        }
    }

    #[inline]
    pub fn world_aabb(&self, transform: Transform) -> Aabb {
        let axis = transform.transform_vector(Vec3::Y) * self.half_height;
        let p0 = transform.position - axis;
        let p1 = transform.position + axis;
        let r = Vec3::splat(self.radius);

        Aabb::new(p0.min(p1) - r, p0.max(p1) + r)
    }
}

impl SupportMap for Capsule {
    #[inline]
    fn support(&self, direction: Vec3) -> Vec3 {
        let tip = if direction.y >= 0.0 {
            self.half_height
        } else {
            -self.half_height
        };

        Vec3::new(0.0, tip, 0.0) + direction.try_normalize().unwrap_or(Vec3::X) * self.radius
    }
}

/// Convex hull of a set of local-space points.
///
/// The support query is an exact vertex search. On ties, the first point in storage order wins.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexHull {
    points: Arc<[Vec3]>,
    centroid: Vec3,
}

impl ConvexHull {
    /// Creates a hull from its points.
    ///
    /// # Panics
    ///
    /// Panics if `points` is empty.
    pub fn new(points: impl Into<Arc<[Vec3]>>) -> Self {
        let points = points.into();
        assert!(!points.is_empty(), "convex hull needs at least one point");

        let centroid = points.iter().copied().sum::<Vec3>() / points.len() as f32;
        Self { points, centroid }
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn world_aabb(&self, transform: Transform) -> Aabb {
        self.points.iter().fold(Aabb::EMPTY, |aabb, &p| {
            aabb.expand_to_include(transform.transform_point(p))
        })
    }
}

impl SupportMap for ConvexHull {
    fn support(&self, direction: Vec3) -> Vec3 {
        let mut best = self.points[0];
        let mut best_dot = best.dot(direction);

        for &p in &self.points[1..] {
            let d = p.dot(direction);
            if d > best_dot {
                best = p;
                best_dot = d;
            }
        }

        best
    }

    #[inline]
    fn center(&self) -> Vec3 {
        self.centroid
    }
}
