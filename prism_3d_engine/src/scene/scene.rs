/// Scene - owner of every renderable and of the static BVH.
///
/// Uses a SlotMap for O(1) insert/remove with stable keys.
///
/// Static renderables are culled through the BVH built by `build_bvh`.
/// Statics added or moved after the last build are kept in a pending list
/// and culled linearly until the next rebuild, so culling never misses them.
/// Dynamic (physics-driven) renderables always bypass the BVH.

use glam::Mat4;
use rustc_hash::FxHashSet;
use slotmap::SlotMap;
use crate::bounds::AABB;
use crate::camera::Frustum;
use crate::engine_debug;
use crate::error::Result;
use crate::render::CullResult;
use super::bvh::{Bvh, BvhConfig};
use super::renderable::{Renderable, RenderableKey};
use super::scene_index::{cull_object, SceneIndex};

pub struct Scene {
    renderables: SlotMap<RenderableKey, Renderable>,
    bvh: Bvh,
    bvh_config: BvhConfig,
    /// Statics present in the current BVH with up-to-date bounds
    indexed: FxHashSet<RenderableKey>,
    /// Statics not covered by the current BVH
    pending: Vec<RenderableKey>,
    dynamic: Vec<RenderableKey>,
    bvh_stale: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            renderables: SlotMap::with_key(),
            bvh: Bvh::new(),
            bvh_config: BvhConfig::default(),
            indexed: FxHashSet::default(),
            pending: Vec::new(),
            dynamic: Vec::new(),
            bvh_stale: false,
        }
    }

    pub fn with_bvh_config(config: BvhConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { bvh_config: config, ..Self::new() })
    }

    /// Change the leaf size used by the next `build_bvh`.
    pub fn set_bvh_config(&mut self, config: BvhConfig) -> Result<()> {
        config.validate()?;
        self.bvh_config = config;
        Ok(())
    }

    pub fn bvh_config(&self) -> BvhConfig {
        self.bvh_config
    }

    // ===== RENDERABLES =====

    /// Add a renderable and return its stable key.
    pub fn add_renderable(&mut self, renderable: Renderable) -> RenderableKey {
        let is_dynamic = renderable.is_dynamic();
        let key = self.renderables.insert(renderable);
        if is_dynamic {
            self.dynamic.push(key);
        } else {
            self.pending.push(key);
            self.bvh_stale = true;
        }
        key
    }

    /// Remove a renderable. Returns `None` if the key is stale.
    pub fn remove_renderable(&mut self, key: RenderableKey) -> Option<Renderable> {
        let renderable = self.renderables.remove(key)?;
        if self.indexed.remove(&key) {
            self.bvh_stale = true;
        }
        self.pending.retain(|k| *k != key);
        self.dynamic.retain(|k| *k != key);
        Some(renderable)
    }

    pub fn renderable(&self, key: RenderableKey) -> Option<&Renderable> {
        self.renderables.get(key)
    }

    pub fn contains(&self, key: RenderableKey) -> bool {
        self.renderables.contains_key(key)
    }

    pub fn renderables(&self) -> impl Iterator<Item = (RenderableKey, &Renderable)> {
        self.renderables.iter()
    }

    pub fn len(&self) -> usize {
        self.renderables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderables.is_empty()
    }

    /// Keys of physics-driven renderables, in insertion order.
    pub fn dynamic_keys(&self) -> &[RenderableKey] {
        &self.dynamic
    }

    /// Set the model matrix. Returns false if the key is invalid.
    pub fn set_model_matrix(&mut self, key: RenderableKey, matrix: Mat4) -> bool {
        let Some(renderable) = self.renderables.get_mut(key) else {
            engine_debug!("prism3d::Scene", "set_model_matrix: stale key {:?}", key);
            return false;
        };
        renderable.set_model_matrix(matrix);
        if !renderable.is_dynamic() {
            self.detach_from_bvh(key);
        }
        true
    }

    /// Replace the instance transforms of an instanced renderable.
    /// Returns false if the key is invalid or not instanced.
    pub fn set_instance_transforms(&mut self, key: RenderableKey, transforms: Vec<Mat4>) -> bool {
        let Some(renderable) = self.renderables.get_mut(key) else {
            engine_debug!("prism3d::Scene", "set_instance_transforms: stale key {:?}", key);
            return false;
        };
        if !renderable.set_instances(transforms) {
            return false;
        }
        if !renderable.is_dynamic() {
            self.detach_from_bvh(key);
        }
        true
    }

    /// Apply a physics body state to a dynamic renderable.
    /// Returns false if the key is invalid or not dynamic.
    pub fn set_dynamic_state(&mut self, key: RenderableKey, matrix: Mat4, world_bounds: AABB) -> bool {
        match self.renderables.get_mut(key) {
            Some(renderable) if renderable.is_dynamic() => {
                renderable.set_physics_state(matrix, world_bounds);
                true
            }
            Some(_) => false,
            None => {
                engine_debug!("prism3d::Scene", "set_dynamic_state: stale key {:?}", key);
                false
            }
        }
    }

    /// A moved static leaves the BVH and is culled linearly until the next rebuild.
    fn detach_from_bvh(&mut self, key: RenderableKey) {
        if self.indexed.remove(&key) {
            self.pending.push(key);
        }
        self.bvh_stale = true;
    }

    // ===== BVH =====

    /// Rebuild the BVH over every static renderable.
    pub fn build_bvh(&mut self) {
        let items: Vec<(RenderableKey, AABB)> = self
            .renderables
            .iter()
            .filter(|(_, r)| !r.is_dynamic())
            .map(|(key, r)| (key, *r.world_bounds()))
            .collect();

        self.indexed.clear();
        self.indexed.extend(items.iter().map(|(key, _)| *key));
        self.bvh = Bvh::build(&items, self.bvh_config);
        self.pending.clear();
        self.bvh_stale = false;
    }

    /// True when statics were added, moved or removed since the last build.
    pub fn is_bvh_stale(&self) -> bool {
        self.bvh_stale
    }

    pub fn bvh(&self) -> &Bvh {
        &self.bvh
    }

    /// Statics currently culled outside the BVH
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    // ===== QUERIES =====

    /// Append every renderable not provably outside `frustum` to `results`.
    pub fn cull(&self, frustum: &Frustum, results: &mut CullResult) {
        let fully_start = results.fully_visible.len();
        let probably_start = results.probably_visible.len();

        self.bvh.cull(frustum, results);
        if self.bvh_stale {
            retain_from(&mut results.fully_visible, fully_start, |k| self.indexed.contains(k));
            retain_from(&mut results.probably_visible, probably_start, |k| self.indexed.contains(k));
        }

        for &key in self.pending.iter().chain(self.dynamic.iter()) {
            if let Some(renderable) = self.renderables.get(key) {
                cull_object(frustum, key, renderable.world_bounds(), results);
            }
        }
    }

    /// Append every renderable whose world bounds overlap `query`.
    pub fn intersect_objects(&self, query: &AABB, results: &mut Vec<RenderableKey>) {
        let start = results.len();
        self.bvh.intersect_objects(query, results);
        if self.bvh_stale {
            retain_from(results, start, |k| self.indexed.contains(k));
        }

        for &key in self.pending.iter().chain(self.dynamic.iter()) {
            if let Some(renderable) = self.renderables.get(key) {
                if renderable.world_bounds().intersects(query) {
                    results.push(key);
                }
            }
        }
    }
}

/// `Vec::retain` restricted to `list[start..]`.
fn retain_from<F>(list: &mut Vec<RenderableKey>, start: usize, keep: F)
where
    F: Fn(&RenderableKey) -> bool,
{
    let mut index = 0;
    list.retain(|key| {
        let kept = index < start || keep(key);
        index += 1;
        kept
    });
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
