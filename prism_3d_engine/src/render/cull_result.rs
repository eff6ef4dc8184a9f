/// Per-frame culling output, bucketed for the render list.
///
/// Traversal fills `fully_visible` / `probably_visible`. `partition` then
/// drops negligible objects and splits the survivors by how their LOD is
/// resolved. All vectors keep their capacity across `clear`.

use glam::Vec3;
use crate::engine_debug;
use crate::scene::{LodMode, RenderableKey, Scene};
use super::lod::DetailCuller;

#[derive(Debug, Default, Clone)]
pub struct CullResult {
    /// Inside the frustum (node or object fully inside)
    pub fully_visible: Vec<RenderableKey>,
    /// Straddling at least one plane
    pub probably_visible: Vec<RenderableKey>,
    /// LOD picked on the CPU (includes single-mesh renderables)
    pub cpu_lod: Vec<RenderableKey>,
    /// LOD chain forwarded to the backend
    pub gpu_lod: Vec<RenderableKey>,
    /// Flagged for GPU occlusion culling (overlaps the LOD buckets)
    pub gpu_cull: Vec<RenderableKey>,
    /// Visible but rejected by the detail culler this frame
    pub detail_culled: usize,
}

impl CullResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.fully_visible.clear();
        self.probably_visible.clear();
        self.cpu_lod.clear();
        self.gpu_lod.clear();
        self.gpu_cull.clear();
        self.detail_culled = 0;
    }

    /// Number of renderables that passed frustum culling
    pub fn visible_count(&self) -> usize {
        self.fully_visible.len() + self.probably_visible.len()
    }

    /// Fully visible first, then probably visible, in traversal order
    pub fn visible(&self) -> impl Iterator<Item = RenderableKey> + '_ {
        self.fully_visible.iter().chain(self.probably_visible.iter()).copied()
    }

    /// Fill the LOD / GPU-cull buckets from the visible lists.
    ///
    /// Keys no longer present in `scene` are skipped.
    pub fn partition(&mut self, scene: &Scene, camera_pos: Vec3, detail: Option<&DetailCuller>) {
        self.cpu_lod.clear();
        self.gpu_lod.clear();
        self.gpu_cull.clear();
        self.detail_culled = 0;

        for &key in self.fully_visible.iter().chain(self.probably_visible.iter()) {
            let Some(renderable) = scene.renderable(key) else {
                engine_debug!("prism3d::CullResult", "Skipping stale key {:?}", key);
                continue;
            };

            if let Some(culler) = detail {
                if culler.is_negligible(renderable.world_bounds(), camera_pos) {
                    self.detail_culled += 1;
                    continue;
                }
            }

            if renderable.wants_gpu_occlusion() {
                self.gpu_cull.push(key);
            }

            match renderable.lod_mode() {
                Some(LodMode::Gpu) => self.gpu_lod.push(key),
                _ => self.cpu_lod.push(key),
            }
        }
    }
}

#[cfg(test)]
#[path = "cull_result_tests.rs"]
mod tests;
