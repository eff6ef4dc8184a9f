/// Spatial acceleration structures for scene queries.
///
/// A SceneIndex holds `(RenderableKey, world AABB)` pairs and answers two
/// queries: box overlap and frustum culling into a `CullResult`.
/// Implementations: `Bvh` (hierarchical) and `LinearIndex` (brute force).
///
/// Ownership: the `Scene` owns its BVH and rebuilds it on demand.

use crate::bounds::AABB;
use crate::camera::{Frustum, FrustumTest};
use crate::render::CullResult;
use super::renderable::RenderableKey;

/// Trait for spatial indexing of scene renderables.
pub trait SceneIndex: Send + Sync {
    /// Number of indexed objects
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append every object whose AABB overlaps `query` (touching excluded).
    fn intersect_objects(&self, query: &AABB, results: &mut Vec<RenderableKey>);

    /// Append every object not provably outside `frustum` to
    /// `results.fully_visible` or `results.probably_visible`.
    fn cull(&self, frustum: &Frustum, results: &mut CullResult);
}

/// Object-level frustum test shared by the index implementations.
pub(crate) fn cull_object(
    frustum: &Frustum,
    key: RenderableKey,
    bounds: &AABB,
    results: &mut CullResult,
) {
    match frustum.classify_aabb(bounds) {
        FrustumTest::Outside => {}
        FrustumTest::Inside => results.fully_visible.push(key),
        FrustumTest::Intersecting => results.probably_visible.push(key),
    }
}

/// Brute-force index: every query tests every object.
///
/// Reference implementation for the BVH and fine for small scenes.
#[derive(Debug, Default, Clone)]
pub struct LinearIndex {
    items: Vec<(RenderableKey, AABB)>,
}

impl LinearIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<(RenderableKey, AABB)>) -> Self {
        Self { items }
    }

    pub fn push(&mut self, key: RenderableKey, bounds: AABB) {
        self.items.push((key, bounds));
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl SceneIndex for LinearIndex {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn intersect_objects(&self, query: &AABB, results: &mut Vec<RenderableKey>) {
        results.extend(
            self.items
                .iter()
                .filter(|(_, bounds)| bounds.intersects(query))
                .map(|(key, _)| *key),
        );
    }

    fn cull(&self, frustum: &Frustum, results: &mut CullResult) {
        for (key, bounds) in &self.items {
            cull_object(frustum, *key, bounds, results);
        }
    }
}
