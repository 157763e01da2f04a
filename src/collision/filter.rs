//! Broad-phase pair filtering.
//!
//! The world consults one [`BroadPhaseFilter`] for every pair whose boxes overlap. A filter may
//! let the pair through to the default convex narrow phase, or take it over and feed its own
//! contacts back through [`World::register_contact`].

use std::cell::RefCell;
use std::ops::Range;
use std::sync::Arc;

use log::debug;

use crate::collision::contact::ShapeId;
use crate::collision::narrow_phase::penetration;
use crate::collision::octree::Octree;
use crate::error::{CollisionError, CollisionResult};
use crate::world::{Collider, ColliderHandle, World};

/// Pluggable per-pair predicate run before the default narrow phase.
///
/// Called concurrently from broad-phase workers, so implementations must be `Send + Sync` and
/// take `&self`.
pub trait BroadPhaseFilter: Send + Sync {
    /// Returns `true` to continue with default handling of `(a, b)`, `false` if the pair was
    /// discarded or already handled here.
    fn filter(&self, world: &World, a: &Collider, b: &Collider) -> bool;
}

thread_local! {
    /// Per-worker octree candidate buffer, reused across queries
    static CANDIDATES: RefCell<Vec<u32>> = const { RefCell::new(Vec::new()) };
}

/// Runs several filters in order. The first filter that claims a pair ends the chain.
pub struct FilterChain {
    filters: Vec<Arc<dyn BroadPhaseFilter>>,
}

impl FilterChain {
    pub fn new(filters: Vec<Arc<dyn BroadPhaseFilter>>) -> Self {
        Self { filters }
    }

    /// Appends `filter`; it only sees pairs every earlier filter passed on
    pub fn push(&mut self, filter: Arc<dyn BroadPhaseFilter>) {
        self.filters.push(filter);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl BroadPhaseFilter for FilterChain {
    fn filter(&self, world: &World, a: &Collider, b: &Collider) -> bool {
        self.filters.iter().all(|filter| filter.filter(world, a, b))
    }
}

/// Collides a static triangle mesh with dynamic colliders.
///
/// The mesh is represented in the broad phase by a single proxy collider covering its bounding
/// box. Pairs with the proxy are resolved triangle by triangle against the octree; each triangle
/// reports contacts under its own id, `base_id + triangle_index`, with no body on the mesh side.
pub struct TriangleMeshFilter {
    proxy: ShapeId,
    octree: Arc<Octree>,
    base_id: ShapeId,
}

impl TriangleMeshFilter {
    /// Creates a filter for the mesh proxied by `proxy`.
    ///
    /// Reserves one id per triangle from `world`. The ids stay consumed even if the filter is
    /// dropped later.
    pub fn new(world: &World, proxy: ColliderHandle, octree: Arc<Octree>) -> CollisionResult<Self> {
        let proxy = world
            .collider(proxy)
            .ok_or(CollisionError::UnknownCollider(proxy))?
            .id;

        let count = octree.triangle_count() as u64;
        let base_id = world.request_id(count);

        debug!(
            "mesh filter for proxy shape {}: {} triangles, ids {}..{}",
            proxy,
            count,
            base_id,
            base_id + count
        );

        Ok(Self {
            proxy,
            octree,
            base_id,
        })
    }

    /// Shape id of the proxy collider
    #[inline]
    pub fn proxy_id(&self) -> ShapeId {
        self.proxy
    }

    /// First id of the reserved triangle block
    #[inline]
    pub fn base_id(&self) -> ShapeId {
        self.base_id
    }

    /// Ids reserved for the mesh triangles
    #[inline]
    pub fn id_range(&self) -> Range<ShapeId> {
        self.base_id..self.base_id + self.octree.triangle_count() as u64
    }

    #[inline]
    pub fn octree(&self) -> &Arc<Octree> {
        &self.octree
    }

    fn collide(&self, world: &World, collider: &Collider) {
        let Some(body) = collider.body else {
            return;
        };
        let transform = collider.transform;
        let config = &world.config().narrow_phase;

        CANDIDATES.with(|cell| {
            // The cell holds an empty buffer while this query runs
            let mut candidates = cell.take();
            candidates.clear();
            self.octree.query(&mut candidates, collider.aabb);

            for &index in candidates.iter() {
                let triangle = self.octree.triangle(index);
                let Some(hit) = penetration(
                    &triangle,
                    &collider.shape,
                    transform.orientation,
                    transform.position,
                    config,
                ) else {
                    continue;
                };

                world.register_contact(
                    self.base_id + u64::from(index),
                    collider.id,
                    None,
                    body,
                    hit.point_a,
                    hit.point_b,
                    hit.normal,
                    hit.depth,
                    true,
                );
            }

            *cell.borrow_mut() = candidates;
        });
    }
}

impl BroadPhaseFilter for TriangleMeshFilter {
    fn filter(&self, world: &World, a: &Collider, b: &Collider) -> bool {
        let other = if a.id == self.proxy {
            b
        } else if b.id == self.proxy {
            a
        } else {
            return true;
        };

        let suppressed = other
            .body
            .and_then(|handle| world.body(handle))
            .map_or(true, |body| body.is_static_or_inactive());
        if !suppressed {
            self.collide(world, other);
        }

        false
    }
}
