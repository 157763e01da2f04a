//! Static triangle-mesh spatial index.
//!
//! Space is split recursively at each node's center into eight octants. A triangle lives at the
//! deepest node whose box fully contains the triangle's box; triangles straddling a split plane
//! stay at the node. Nodes are stored flat, children referenced by index.

use log::debug;

use crate::error::{CollisionError, CollisionResult};
use crate::geometry::{Aabb, Triangle};
use crate::math::Vec3;

/// Nodes holding at most this many triangles are not split further
pub const MAX_TRIANGLES_PER_NODE: usize = 8;

/// Maximum subdivision depth (root is depth 0)
pub const MAX_DEPTH: u32 = 8;

const NO_CHILD: u32 = u32::MAX;

#[derive(Debug, Clone)]
struct OctreeNode {
    bounds: Aabb,
    /// Child node per octant (bit 0 = +X, bit 1 = +Y, bit 2 = +Z), `NO_CHILD` when empty
    children: [u32; 8],
    /// Range into `Octree::triangle_order` of the triangles stored at this node
    first: u32,
    count: u32,
}

impl OctreeNode {
    fn is_leaf(&self) -> bool {
        self.children.iter().all(|&c| c == NO_CHILD)
    }
}

/// Read-only octree over a static triangle mesh.
///
/// Shared between worker threads as `Arc<Octree>`; queries take `&self`.
#[derive(Debug, Clone)]
pub struct Octree {
    vertices: Vec<Vec3>,
    indices: Vec<[u32; 3]>,
    triangle_bounds: Vec<Aabb>,
    /// Triangle indices grouped by owning node
    triangle_order: Vec<u32>,
    nodes: Vec<OctreeNode>,
    bounds: Aabb,
    depth: u32,
}

impl Octree {
    /// Builds the tree over `vertices` and the index triples in `indices`.
    ///
    /// Every index is validated before anything is built; a malformed mesh yields an error and no
    /// tree.
    pub fn new(vertices: Vec<Vec3>, indices: Vec<[u32; 3]>) -> CollisionResult<Self> {
        if vertices.is_empty() || indices.is_empty() {
            return Err(CollisionError::EmptyMesh {
                vertices: vertices.len(),
                triangles: indices.len(),
            });
        }

        if let Some(vertex) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(CollisionError::NonFiniteVertex { vertex });
        }

        for (triangle, tri) in indices.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertices.len()) {
                return Err(CollisionError::TriangleIndexOutOfRange {
                    triangle,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }

        let triangle_bounds: Vec<Aabb> = indices
            .iter()
            .map(|&[a, b, c]| {
                let [a, b, c] = [a, b, c].map(|i| vertices[i as usize]);
                Triangle::new(a, b, c).aabb()
            })
            .collect();
        let bounds = Aabb::from_points(&vertices);

        let mut octree = Self {
            vertices,
            indices,
            triangle_bounds,
            triangle_order: Vec::new(),
            nodes: Vec::new(),
            bounds,
            depth: 0,
        };

        let all: Vec<u32> = (0..octree.indices.len() as u32).collect();
        octree.triangle_order.reserve(all.len());
        octree.build_node(bounds, all, 0);

        debug!(
            "built mesh octree: {} triangles, {} nodes, depth {}",
            octree.indices.len(),
            octree.nodes.len(),
            octree.depth
        );

        Ok(octree)
    }

    fn build_node(&mut self, bounds: Aabb, triangles: Vec<u32>, depth: u32) -> u32 {
        let index = self.nodes.len() as u32;
        self.depth = self.depth.max(depth);
        self.nodes.push(OctreeNode {
            bounds,
            children: [NO_CHILD; 8],
            first: self.triangle_order.len() as u32,
            count: 0,
        });

        if triangles.len() <= MAX_TRIANGLES_PER_NODE || depth >= MAX_DEPTH {
            self.store(index, &triangles);
            return index;
        }

        let center = bounds.center();
        let mut kept = Vec::new();
        let mut buckets: [Vec<u32>; 8] = Default::default();

        for t in triangles {
            match octant_containing(self.triangle_bounds[t as usize], center) {
                Some(octant) => buckets[octant].push(t),
                None => kept.push(t),
            }
        }

        self.store(index, &kept);

        for (octant, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            let child = self.build_node(bounds.octant(octant), bucket, depth + 1);
            self.nodes[index as usize].children[octant] = child;
        }

        index
    }

    fn store(&mut self, node: u32, triangles: &[u32]) {
        let node = &mut self.nodes[node as usize];
        node.first = self.triangle_order.len() as u32;
        node.count = triangles.len() as u32;
        self.triangle_order.extend_from_slice(triangles);
    }

    /// Appends to `candidates` every triangle index whose box intersects `bbox`.
    ///
    /// The result may contain triangles that do not actually touch `bbox`, but never misses one
    /// that does. `candidates` is not cleared.
    pub fn query(&self, candidates: &mut Vec<u32>, bbox: Aabb) {
        if !self.nodes.is_empty() {
            self.query_node(0, candidates, bbox);
        }
    }

    fn query_node(&self, node: u32, candidates: &mut Vec<u32>, bbox: Aabb) {
        let n = &self.nodes[node as usize];
        if !n.bounds.intersects(bbox) {
            return;
        }

        let range = n.first as usize..(n.first + n.count) as usize;
        candidates.extend(
            self.triangle_order[range]
                .iter()
                .copied()
                .filter(|&t| self.triangle_bounds[t as usize].intersects(bbox)),
        );

        for &child in &n.children {
            if child != NO_CHILD {
                self.query_node(child, candidates, bbox);
            }
        }
    }

    /// Box enclosing every vertex of the mesh
    #[inline]
    pub fn bounding_box(&self) -> Aabb {
        self.bounds
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.bounds.center()
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// World-space triangle for `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= triangle_count()`.
    #[inline]
    pub fn triangle(&self, index: u32) -> Triangle {
        let [a, b, c] = self.indices[index as usize];
        Triangle::new(
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        )
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Deepest level reached while building (root is 0)
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }
}

/// Octant of a node split at `center` that fully contains `aabb`, if any
fn octant_containing(aabb: Aabb, center: Vec3) -> Option<usize> {
    let mut octant = 0;
    for (axis, bit) in [1, 2, 4].into_iter().enumerate() {
        if aabb.min[axis] >= center[axis] {
            octant |= bit;
        } else if aabb.max[axis] > center[axis] {
            return None;
        }
    }
    Some(octant)
}
