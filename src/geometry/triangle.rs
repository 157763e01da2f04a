use crate::math::Vec3;

use super::aabb::Aabb;
use super::support::SupportMap;

/// A world-space triangle, built on the fly for one mesh narrow-phase query.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    #[inline]
    pub const fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(
            self.a.min(self.b).min(self.c),
            self.a.max(self.b).max(self.c),
        )
    }
}

impl SupportMap for Triangle {
    /// A is the default; B wins only if strictly farther than A, then C wins only if strictly
    /// farther than the current best. Results must stay bit-identical across runs, so keep
    /// this evaluation order.
    #[inline]
    fn support(&self, direction: Vec3) -> Vec3 {
        let mut best = self.a;
        let mut best_dot = self.a.dot(direction);

        let db = self.b.dot(direction);
        if db > best_dot {
            best = self.b;
            best_dot = db;
        }

        if self.c.dot(direction) > best_dot {
            best = self.c;
        }

        best
    }

    #[inline]
    fn center(&self) -> Vec3 {
        (self.a + self.b + self.c) * (1.0 / 3.0)
    }
}
