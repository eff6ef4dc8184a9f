/// Bvh - bounding volume hierarchy over static renderables.
///
/// Built top-down in one pass: each node's set is split at the median
/// centroid along the longest axis of the node bounds, until a node holds at
/// most `max_leaf_size` objects. Nodes live in a flat arena and reference
/// children by index; leaves reference a contiguous run of `items`.
///
/// The structure is immutable once built. Moving or adding static content
/// requires an explicit rebuild (see `Scene::build_bvh`).

use crate::bounds::AABB;
use crate::camera::{Frustum, FrustumTest};
use crate::engine_info;
use crate::render::CullResult;
use super::renderable::RenderableKey;
use super::scene_index::{cull_object, SceneIndex};

/// Index of the root node in the arena.
const ROOT: usize = 0;

/// BVH build parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BvhConfig {
    /// Maximum number of objects in a leaf (>= 1)
    pub max_leaf_size: usize,
}

impl Default for BvhConfig {
    fn default() -> Self {
        Self { max_leaf_size: 4 }
    }
}

impl BvhConfig {
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.max_leaf_size == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "BvhConfig::max_leaf_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum NodeKind {
    Leaf { first: usize, count: usize },
    Internal { left: usize, right: usize },
}

#[derive(Debug, Clone)]
struct BvhNode {
    /// Union of everything below this node
    bounds: AABB,
    kind: NodeKind,
}

#[derive(Debug, Clone, Copy)]
struct BvhItem {
    key: RenderableKey,
    bounds: AABB,
    /// Position in the build input, used as the split tie-breaker
    order: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
    items: Vec<BvhItem>,
    depth: usize,
}

impl Bvh {
    /// Empty hierarchy: every query returns nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a hierarchy over `items`. Identical input gives an identical tree.
    ///
    /// A `max_leaf_size` of 0 is treated as 1.
    pub fn build(items: &[(RenderableKey, AABB)], config: BvhConfig) -> Self {
        let max_leaf_size = config.max_leaf_size.max(1);
        let mut bvh = Self {
            nodes: Vec::with_capacity(2 * items.len().div_ceil(max_leaf_size)),
            items: items
                .iter()
                .enumerate()
                .map(|(order, (key, bounds))| BvhItem { key: *key, bounds: *bounds, order })
                .collect(),
            depth: 0,
        };

        if !bvh.items.is_empty() {
            let count = bvh.items.len();
            bvh.build_recursive(0, count, 1, max_leaf_size);
        }

        engine_info!(
            "prism3d::Bvh",
            "Built BVH: {} objects, {} nodes, depth {}",
            bvh.items.len(), bvh.nodes.len(), bvh.depth
        );

        bvh
    }

    /// Build the subtree over `items[first..first + count]` and return its node index.
    fn build_recursive(&mut self, first: usize, count: usize, depth: usize, max_leaf_size: usize) -> usize {
        self.depth = self.depth.max(depth);

        let bounds = self.items[first..first + count]
            .iter()
            .fold(AABB::EMPTY, |acc, item| acc.union(&item.bounds));

        let node_idx = self.nodes.len();
        self.nodes.push(BvhNode {
            bounds,
            kind: NodeKind::Leaf { first, count },
        });

        if count <= max_leaf_size {
            return node_idx;
        }

        let axis = bounds.longest_axis();
        self.items[first..first + count].sort_unstable_by(|a, b| {
            centroid_on_axis(&a.bounds, axis)
                .total_cmp(&centroid_on_axis(&b.bounds, axis))
                .then_with(|| a.order.cmp(&b.order))
        });

        let left_count = count / 2;
        let left = self.build_recursive(first, left_count, depth + 1, max_leaf_size);
        let right = self.build_recursive(first + left_count, count - left_count, depth + 1, max_leaf_size);

        self.nodes[node_idx].kind = NodeKind::Internal { left, right };
        node_idx
    }

    // ===== STATISTICS =====

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of levels (0 for an empty hierarchy, 1 for a single leaf)
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Root bounds, `AABB::EMPTY` when empty
    pub fn bounds(&self) -> AABB {
        self.nodes.first().map(|n| n.bounds).unwrap_or(AABB::EMPTY)
    }

    // ===== TRAVERSAL =====

    fn intersect_recursive(&self, node_idx: usize, query: &AABB, results: &mut Vec<RenderableKey>) {
        let node = &self.nodes[node_idx];
        if !node.bounds.intersects(query) {
            return;
        }
        match node.kind {
            NodeKind::Leaf { first, count } => {
                results.extend(
                    self.items[first..first + count]
                        .iter()
                        .filter(|item| item.bounds.intersects(query))
                        .map(|item| item.key),
                );
            }
            NodeKind::Internal { left, right } => {
                self.intersect_recursive(left, query, results);
                self.intersect_recursive(right, query, results);
            }
        }
    }

    /// 3-way classification per node:
    /// - `Outside` → skip the subtree
    /// - `Inside` → collect the subtree as fully visible without further tests
    /// - `Intersecting` → recurse; leaves test each object
    fn cull_recursive(&self, node_idx: usize, frustum: &Frustum, results: &mut CullResult) {
        let node = &self.nodes[node_idx];
        match frustum.classify_aabb(&node.bounds) {
            FrustumTest::Outside => {}
            FrustumTest::Inside => self.collect_all(node_idx, &mut results.fully_visible),
            FrustumTest::Intersecting => match node.kind {
                NodeKind::Leaf { first, count } => {
                    for item in &self.items[first..first + count] {
                        cull_object(frustum, item.key, &item.bounds, results);
                    }
                }
                NodeKind::Internal { left, right } => {
                    self.cull_recursive(left, frustum, results);
                    self.cull_recursive(right, frustum, results);
                }
            },
        }
    }

    /// Collect every object below a node. Objects with empty bounds are never visible.
    fn collect_all(&self, node_idx: usize, results: &mut Vec<RenderableKey>) {
        match self.nodes[node_idx].kind {
            NodeKind::Leaf { first, count } => {
                results.extend(
                    self.items[first..first + count]
                        .iter()
                        .filter(|item| !item.bounds.is_empty())
                        .map(|item| item.key),
                );
            }
            NodeKind::Internal { left, right } => {
                self.collect_all(left, results);
                self.collect_all(right, results);
            }
        }
    }
}

impl SceneIndex for Bvh {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn intersect_objects(&self, query: &AABB, results: &mut Vec<RenderableKey>) {
        if self.nodes.is_empty() {
            return;
        }
        self.intersect_recursive(ROOT, query, results);
    }

    fn cull(&self, frustum: &Frustum, results: &mut CullResult) {
        if self.nodes.is_empty() {
            return;
        }
        self.cull_recursive(ROOT, frustum, results);
    }
}

/// Centroid coordinate used for splitting. Empty boxes sort last.
fn centroid_on_axis(bounds: &AABB, axis: usize) -> f32 {
    if bounds.is_empty() {
        return f32::INFINITY;
    }
    bounds.center()[axis]
}

#[cfg(test)]
#[path = "bvh_tests.rs"]
mod tests;
