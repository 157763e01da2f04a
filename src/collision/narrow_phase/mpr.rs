//! Minkowski portal refinement.
//!
//! Casts a ray from an interior point `v0` of `A - B` toward the origin, finds the triangle
//! ("portal") of support points that this ray crosses, and pushes the portal outward until it
//! sits on the boundary. The origin behind the portal means overlap; any support plane that fails
//! to reach the origin proves separation.

use crate::geometry::SupportMap;
use crate::math::{any_perpendicular, consts, normalize_or_perpendicular, Vec3};

use super::{face_contact, minkowski_support, Penetration, SupportVertex};

/// Iteration cap for each of the two phases
const MPR_MAX_ITERATIONS: usize = 34;

/// Boundary thickness at which refinement stops
const MPR_TOLERANCE: f32 = 1e-4;

/// Offset applied to `v0` when both centers coincide
const MPR_CENTER_NUDGE: f32 = 1e-5;

/// Outcome of a positive portal refinement
#[derive(Debug, Clone, Copy)]
pub struct Portal {
    /// Approximate contact from the final portal
    pub penetration: Penetration,
    /// Final portal plus the support point opposite to it, all on the boundary of `A - B`.
    /// `None` when the portal degenerated to a segment or the difference is flat along the
    /// portal normal.
    pub tetrahedron: Option<[SupportVertex; 4]>,
}

/// Runs portal refinement on two world-space shapes.
///
/// Returns `None` as soon as separation is certified.
pub fn portal_refinement<A, B>(a: &A, b: &B) -> Option<Portal>
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    let center_a = a.center();
    let center_b = b.center();
    let mut v0 = SupportVertex {
        point: center_a - center_b,
        support_a: center_a,
        support_b: center_b,
    };
    if v0.point.length_squared() < consts::DEGENERATE_LENGTH_SQUARED {
        v0.point = Vec3::new(MPR_CENTER_NUDGE, 0.0, 0.0);
    }

    // First support point, toward the origin
    let mut n = -v0.point;
    let mut v1 = minkowski_support(a, b, n);
    if v1.point.dot(n) <= 0.0 {
        return None;
    }

    n = v1.point.cross(v0.point);
    if n.length_squared() < consts::DEGENERATE_LENGTH_SQUARED {
        // The origin lies on the segment v0..v1
        let normal = normalize_or_perpendicular(v1.point - v0.point, v0.point);
        return Some(Portal {
            penetration: Penetration {
                point_a: v1.support_a,
                point_b: v1.support_b,
                normal,
                depth: v1.point.dot(normal).max(0.0),
            },
            tetrahedron: None,
        });
    }

    let mut v2 = minkowski_support(a, b, n);
    if v2.point.dot(n) <= 0.0 {
        return None;
    }

    // Orient the plane (v0, v1, v2) so that the origin is on its positive side
    n = (v1.point - v0.point).cross(v2.point - v0.point);
    if n.dot(v0.point) > 0.0 {
        std::mem::swap(&mut v1, &mut v2);
        n = -n;
    }

    let mut v3 = find_portal(a, b, &v0, &mut v1, &mut v2, n)?;

    let mut hit = false;
    let mut normal = n;
    let mut depth = 0.0;

    for _ in 0..MPR_MAX_ITERATIONS {
        let face = (v2.point - v1.point).cross(v3.point - v1.point);
        if face.length_squared() < consts::DEGENERATE_LENGTH_SQUARED {
            break;
        }

        normal = face.normalize();
        depth = normal.dot(v1.point);
        if depth >= 0.0 {
            hit = true;
        }

        let v4 = minkowski_support(a, b, normal);
        let delta = (v4.point - v3.point).dot(normal);
        let separation = -v4.point.dot(normal);

        if delta <= MPR_TOLERANCE || separation >= 0.0 {
            break;
        }

        // Keep the sub-portal of (v1, v2, v3, v4) that the origin ray still passes through
        let d1 = v4.point.cross(v1.point).dot(v0.point);
        let d2 = v4.point.cross(v2.point).dot(v0.point);
        let d3 = v4.point.cross(v3.point).dot(v0.point);

        if d1 < 0.0 {
            if d2 < 0.0 {
                v1 = v4;
            } else {
                v3 = v4;
            }
        } else if d3 < 0.0 {
            v2 = v4;
        } else {
            v1 = v4;
        }
    }

    if !hit {
        return None;
    }

    // v0 is interior, so the seed takes the far side of the difference instead
    let back = minkowski_support(a, b, -normal);
    let thickness = depth - back.point.dot(normal);

    Some(Portal {
        penetration: face_contact(&v1, &v2, &v3, normal, depth),
        tetrahedron: (thickness > MPR_TOLERANCE).then_some([back, v1, v2, v3]),
    })
}

/// Phase one: rotates (v1, v2) around the ray until a third support point closes a portal
/// the ray from `v0` through the origin passes through.
fn find_portal<A, B>(
    a: &A,
    b: &B,
    v0: &SupportVertex,
    v1: &mut SupportVertex,
    v2: &mut SupportVertex,
    mut n: Vec3,
) -> Option<SupportVertex>
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    for _ in 0..MPR_MAX_ITERATIONS {
        if n.length_squared() < consts::DEGENERATE_LENGTH_SQUARED {
            n = any_perpendicular(v1.point - v0.point);
        }

        let v3 = minkowski_support(a, b, n);
        if v3.point.dot(n) <= 0.0 {
            return None;
        }

        // Origin outside (v1, v0, v3): drop v2
        if v1.point.cross(v3.point).dot(v0.point) < 0.0 {
            *v2 = v3;
            n = (v1.point - v0.point).cross(v3.point - v0.point);
            continue;
        }

        // Origin outside (v3, v0, v2): drop v1
        if v3.point.cross(v2.point).dot(v0.point) < 0.0 {
            *v1 = v3;
            n = (v3.point - v0.point).cross(v2.point - v0.point);
            continue;
        }

        return Some(v3);
    }

    None
}
