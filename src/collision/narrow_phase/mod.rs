//! Shape-agnostic penetration queries built on support mappings.
//!
//! [`penetration`] runs portal refinement ([`mpr`]) and, on a hit, polishes the result with
//! polytope expansion ([`epa`]). Both phases work on the Minkowski difference `A - B` through
//! support queries only.

pub mod epa;
pub mod mpr;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::geometry::{SupportMap, Transformed};
use crate::math::{Mat3, Vec3};

pub use epa::expand_polytope;
pub use mpr::{portal_refinement, Portal};

/// Result of a positive penetration query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// Deepest point of A inside B, in world space
    pub point_a: Vec3,
    /// Deepest point of B inside A, in world space
    pub point_b: Vec3,
    /// Unit normal pointing from A toward B; moving B by `normal * depth` separates the shapes
    pub normal: Vec3,
    /// Penetration depth, never negative
    pub depth: f32,
}

/// Narrow-phase tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrowPhaseConfig {
    /// Run polytope expansion after a portal hit for an exact depth and normal
    pub refine_penetration: bool,
}

impl Default for NarrowPhaseConfig {
    fn default() -> Self {
        Self {
            refine_penetration: true,
        }
    }
}

/// A point of the Minkowski difference together with the support points that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportVertex {
    /// `support_a - support_b`
    pub point: Vec3,
    pub support_a: Vec3,
    pub support_b: Vec3,
}

/// Support point of `A - B` along `direction`
#[inline]
pub(crate) fn minkowski_support<A, B>(a: &A, b: &B, direction: Vec3) -> SupportVertex
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    let support_a = a.support(direction);
    let support_b = b.support(-direction);
    SupportVertex {
        point: support_a - support_b,
        support_a,
        support_b,
    }
}

/// Tests a world-space shape `a` against a local-space shape `b` placed at
/// (`orientation_b`, `position_b`).
///
/// Returns `None` when the shapes do not overlap. The transform of `b` is applied per support
/// query, never to the geometry itself.
pub fn penetration<A, B>(
    a: &A,
    b: &B,
    orientation_b: Mat3,
    position_b: Vec3,
    config: &NarrowPhaseConfig,
) -> Option<Penetration>
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    let b = Transformed::new(b, orientation_b, position_b);
    let portal = portal_refinement(a, &b)?;

    if !config.refine_penetration {
        return Some(portal.penetration);
    }

    let Some(seed) = portal.tetrahedron else {
        return Some(portal.penetration);
    };

    match expand_polytope(&seed, a, &b) {
        Some(refined) => Some(refined),
        None => {
            trace!(
                "polytope expansion failed, keeping portal estimate (depth {:.5})",
                portal.penetration.depth
            );
            Some(portal.penetration)
        }
    }
}

/// Builds the contact for the face (`a`, `b`, `c`) of the Minkowski difference, given its unit
/// outward normal and its distance from the origin.
///
/// The witness points are the per-shape support points weighted by the barycentric
/// coordinates of the origin's projection onto the face.
pub(crate) fn face_contact(
    a: &SupportVertex,
    b: &SupportVertex,
    c: &SupportVertex,
    normal: Vec3,
    depth: f32,
) -> Penetration {
    let bary = barycentric_coordinates(normal * depth, a.point, b.point, c.point);

    Penetration {
        point_a: a.support_a * bary.x + b.support_a * bary.y + c.support_a * bary.z,
        point_b: a.support_b * bary.x + b.support_b * bary.y + c.support_b * bary.z,
        normal,
        depth: depth.max(0.0),
    }
}

/// Computes barycentric coordinates of `p` projected onto the triangle's plane
fn barycentric_coordinates(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;

    let d00 = v0.dot(v0);
    let d01 = v0.dot(v1);
    let d11 = v1.dot(v1);
    let d20 = v2.dot(v0);
    let d21 = v2.dot(v1);

    let denom = d00 * d11 - d01 * d01;

    if denom.abs() < 1e-10 {
        // Degenerate triangle, return equal weights
        return Vec3::splat(1.0 / 3.0);
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;

    Vec3::new(1.0 - v - w, v, w)
}
