use crate::geometry::SupportMap;
use crate::math::Vec3;

use super::{face_contact, minkowski_support, Penetration, SupportVertex};

/// Maximum iterations for EPA algorithm
const EPA_MAX_ITERATIONS: usize = 64;

/// Tolerance for EPA convergence
const EPA_TOLERANCE: f32 = 1e-4;

/// Maximum number of faces in the polytope
const EPA_MAX_FACES: usize = 128;

/// Height above a face plane below which a new vertex counts as coplanar, not visible.
/// Must stay below `EPA_TOLERANCE` so the expanded face is always removed.
const EPA_COPLANAR_TOLERANCE: f32 = 1e-5;

/// A face of the polytope
#[derive(Debug, Clone, Copy)]
struct Face {
    indices: [usize; 3],
    /// Outward unit normal
    normal: Vec3,
    /// Signed distance from the origin to the face plane
    distance: f32,
}

/// Expands a tetrahedron of boundary points of `A - B` until its closest face lies on the
/// boundary.
///
/// The seed does not need to enclose the origin: a face the origin lies in front of has a
/// negative distance, is picked first and pushed outward. Returns `None` if the polytope
/// collapses or its closest face does not reach past the origin.
pub fn expand_polytope<A, B>(seed: &[SupportVertex; 4], a: &A, b: &B) -> Option<Penetration>
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    let mut vertices: Vec<SupportVertex> = Vec::with_capacity(EPA_MAX_FACES);
    let mut faces: Vec<Face> = Vec::with_capacity(EPA_MAX_FACES);
    vertices.extend_from_slice(seed);

    for indices in [[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]] {
        if let Some(face) = create_face(&vertices, indices) {
            faces.push(face);
        }
    }
    fix_winding(&vertices, &mut faces);

    let mut horizon: Vec<(usize, usize)> = Vec::new();

    for _ in 0..EPA_MAX_ITERATIONS {
        let closest = *closest_face(&faces)?;

        let vertex = minkowski_support(a, b, closest.normal);
        let distance = vertex.point.dot(closest.normal);
        if distance - closest.distance < EPA_TOLERANCE {
            return penetrating_contact(&vertices, &closest);
        }

        let new_index = vertices.len();
        vertices.push(vertex);

        // Drop every face the new vertex can see, keeping their boundary edges
        horizon.clear();
        faces.retain(|face| {
            let on_face = vertices[face.indices[0]].point;
            if face.normal.dot(vertex.point - on_face) > EPA_COPLANAR_TOLERANCE {
                for j in 0..3 {
                    add_or_remove_edge(&mut horizon, (face.indices[j], face.indices[(j + 1) % 3]));
                }
                false
            } else {
                true
            }
        });

        for &(i, j) in &horizon {
            if let Some(face) = create_face(&vertices, [i, j, new_index]) {
                faces.push(face);
            }
        }

        if faces.len() > EPA_MAX_FACES {
            break;
        }
    }

    // Out of budget: report the best face found so far
    penetrating_contact(&vertices, closest_face(&faces)?)
}

fn closest_face(faces: &[Face]) -> Option<&Face> {
    faces.iter().min_by(|a, b| a.distance.total_cmp(&b.distance))
}

fn penetrating_contact(vertices: &[SupportVertex], face: &Face) -> Option<Penetration> {
    if face.distance <= 0.0 {
        return None;
    }

    let [i, j, k] = face.indices;
    Some(face_contact(&vertices[i], &vertices[j], &vertices[k], face.normal, face.distance))
}

/// Creates a face from three vertex indices
fn create_face(vertices: &[SupportVertex], indices: [usize; 3]) -> Option<Face> {
    let a = vertices[indices[0]].point;
    let b = vertices[indices[1]].point;
    let c = vertices[indices[2]].point;

    let normal = (b - a).cross(c - a);
    let len = normal.length();
    if len < 1e-10 {
        return None;
    }

    let normal = normal / len;
    Some(Face {
        indices,
        normal,
        distance: normal.dot(a),
    })
}

/// Flips faces whose normal points toward the polytope centroid
fn fix_winding(vertices: &[SupportVertex], faces: &mut [Face]) {
    let centroid = vertices.iter().map(|v| v.point).sum::<Vec3>() / vertices.len() as f32;

    for face in faces.iter_mut() {
        let to_face = vertices[face.indices[0]].point - centroid;
        if face.normal.dot(to_face) < 0.0 {
            face.normal = -face.normal;
            face.distance = -face.distance;
            face.indices.swap(0, 1);
        }
    }
}

/// Adds an edge to the list, or removes it if its reverse is already there (shared edge)
fn add_or_remove_edge(edges: &mut Vec<(usize, usize)>, edge: (usize, usize)) {
    let reverse = (edge.1, edge.0);

    if let Some(pos) = edges.iter().position(|e| *e == reverse) {
        edges.swap_remove(pos);
    } else {
        edges.push(edge);
    }
}
