/// RenderList: visible renderables turned into ordered draw batches.
///
/// Steps, all on buffers reused across frames:
/// 1. one `DrawItem` per visible renderable, LOD resolved, shader variant
///    restricted by the current settings
/// 2. stable bucket partition by batch key (shader variant, or shader
///    variant + material), buckets ordered by first appearance
/// 3. consecutive items sharing the full draw state merge into one
///    `DrawBatch` whose transforms are stored contiguously

use std::ops::Range;
use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;
use crate::engine_trace;
use crate::scene::{RenderableKey, RenderableKind, Scene};
use super::cull_result::CullResult;
use super::graphics_settings::{BatchSortMode, GraphicsSettings};
use super::handles::{MaterialHandle, MeshHandle, ShaderVariant};
use super::lod::select_lod;

/// How the level of detail of a draw is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LodResolve {
    /// Index chosen on the CPU (0 for single-mesh renderables)
    Cpu(usize),
    /// The backend chooses among `lod_count` meshes
    Gpu { lod_count: usize },
}

/// One visible renderable, ready for batching
#[derive(Debug, Clone)]
pub struct DrawItem {
    pub key: RenderableKey,
    pub shader: ShaderVariant,
    pub material: MaterialHandle,
    /// Selected mesh (most detailed level for GPU-resolved LODs)
    pub mesh: MeshHandle,
    pub lod: LodResolve,
    pub gpu_cull: bool,
    lod_meshes: Range<usize>,
    transforms: Range<usize>,
}

impl DrawItem {
    pub fn instance_count(&self) -> usize {
        self.transforms.len()
    }
}

#[derive(Debug, Clone)]
struct BatchRecord {
    shader: ShaderVariant,
    material: MaterialHandle,
    mesh: MeshHandle,
    lod: LodResolve,
    gpu_cull: bool,
    lod_meshes: Range<usize>,
    transforms: Range<usize>,
}

/// A batch as handed to the backend
#[derive(Debug, Clone, Copy)]
pub struct DrawBatch<'a> {
    pub shader: ShaderVariant,
    pub material: MaterialHandle,
    pub mesh: MeshHandle,
    pub lod: LodResolve,
    /// Full LOD chain for `LodResolve::Gpu`, empty otherwise
    pub lod_meshes: &'a [MeshHandle],
    /// Submit through the GPU occlusion-culling path
    pub gpu_cull: bool,
    /// One world matrix per instance
    pub transforms: &'a [Mat4],
}

impl<'a> DrawBatch<'a> {
    pub fn instance_count(&self) -> usize {
        self.transforms.len()
    }

    /// Transforms as raw bytes for instance-buffer upload.
    pub fn transform_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.transforms)
    }
}

/// Per-frame statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Renderables that passed frustum culling
    pub visible: usize,
    pub fully_visible: usize,
    pub probably_visible: usize,
    /// Visible renderables dropped as negligible
    pub detail_culled: usize,
    pub draw_items: usize,
    pub batches: usize,
    /// Total transforms submitted
    pub instances: usize,
}

type GroupKey = (ShaderVariant, Option<MaterialHandle>);

#[derive(Debug, Default)]
pub struct RenderList {
    items: Vec<DrawItem>,
    item_transforms: Vec<Mat4>,
    lod_meshes: Vec<MeshHandle>,
    group_lookup: FxHashMap<GroupKey, usize>,
    item_group: Vec<usize>,
    group_offsets: Vec<usize>,
    order: Vec<usize>,
    batches: Vec<BatchRecord>,
    batch_transforms: Vec<Mat4>,
}

impl RenderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.item_transforms.clear();
        self.lod_meshes.clear();
        self.group_lookup.clear();
        self.item_group.clear();
        self.group_offsets.clear();
        self.order.clear();
        self.batches.clear();
        self.batch_transforms.clear();
    }

    /// Rebuild from a partitioned cull result (see `CullResult::partition`).
    pub fn build(
        &mut self,
        scene: &Scene,
        culled: &CullResult,
        camera_pos: Vec3,
        settings: &GraphicsSettings,
    ) {
        self.clear();
        self.collect_items(scene, culled, camera_pos, settings);
        self.partition(settings.batch_sort_mode);
        self.merge_batches();

        engine_trace!(
            "prism3d::RenderList",
            "{} draw items, {} batches, {} instances",
            self.items.len(), self.batches.len(), self.batch_transforms.len()
        );
    }

    fn collect_items(
        &mut self,
        scene: &Scene,
        culled: &CullResult,
        camera_pos: Vec3,
        settings: &GraphicsSettings,
    ) {
        let allowed = settings.shader_features();

        for &key in &culled.cpu_lod {
            let Some(renderable) = scene.renderable(key) else {
                continue;
            };
            let lod = match renderable.lod_divisor() {
                Some(divisor) => select_lod(
                    camera_pos,
                    renderable.world_position(),
                    divisor,
                    renderable.lod_count().saturating_sub(1),
                ),
                None => 0,
            };
            // empty LOD chain: nothing to draw
            let Some(mesh) = renderable.mesh_for_lod(lod) else {
                continue;
            };

            let start = self.item_transforms.len();
            renderable.append_world_transforms(&mut self.item_transforms);
            self.items.push(DrawItem {
                key,
                shader: renderable.shader().restricted_to(allowed),
                material: renderable.material(),
                mesh,
                lod: LodResolve::Cpu(lod),
                gpu_cull: renderable.wants_gpu_occlusion(),
                lod_meshes: 0..0,
                transforms: start..self.item_transforms.len(),
            });
        }

        for &key in &culled.gpu_lod {
            let Some(renderable) = scene.renderable(key) else {
                continue;
            };
            let RenderableKind::LodChain { lods, .. } = renderable.kind() else {
                continue;
            };
            let Some(&mesh) = lods.first() else {
                continue;
            };

            let lod_start = self.lod_meshes.len();
            self.lod_meshes.extend_from_slice(lods);
            let start = self.item_transforms.len();
            renderable.append_world_transforms(&mut self.item_transforms);
            self.items.push(DrawItem {
                key,
                shader: renderable.shader().restricted_to(allowed),
                material: renderable.material(),
                mesh,
                lod: LodResolve::Gpu { lod_count: lods.len() },
                gpu_cull: renderable.wants_gpu_occlusion(),
                lod_meshes: lod_start..self.lod_meshes.len(),
                transforms: start..self.item_transforms.len(),
            });
        }
    }

    /// Stable counting sort of item indices into `order`, groups in first-appearance order.
    fn partition(&mut self, mode: BatchSortMode) {
        for item in &self.items {
            let key = match mode {
                BatchSortMode::ShaderOnly => (item.shader, None),
                BatchSortMode::ShaderThenMaterial => (item.shader, Some(item.material)),
            };
            let next = self.group_lookup.len();
            let group = *self.group_lookup.entry(key).or_insert(next);
            if group == self.group_offsets.len() {
                self.group_offsets.push(0);
            }
            self.group_offsets[group] += 1;
            self.item_group.push(group);
        }

        // counts -> start offsets
        let mut running = 0;
        for offset in &mut self.group_offsets {
            let count = *offset;
            *offset = running;
            running += count;
        }

        self.order.resize(self.items.len(), 0);
        for (index, &group) in self.item_group.iter().enumerate() {
            self.order[self.group_offsets[group]] = index;
            self.group_offsets[group] += 1;
        }
    }

    fn merge_batches(&mut self) {
        for &index in &self.order {
            let item = &self.items[index];
            let transforms = &self.item_transforms[item.transforms.clone()];

            let merges = self.batches.last().is_some_and(|batch| {
                batch.shader == item.shader
                    && batch.material == item.material
                    && batch.mesh == item.mesh
                    && batch.lod == item.lod
                    && batch.gpu_cull == item.gpu_cull
                    && self.lod_meshes[batch.lod_meshes.clone()] == self.lod_meshes[item.lod_meshes.clone()]
            });

            let start = self.batch_transforms.len();
            self.batch_transforms.extend_from_slice(transforms);
            let end = self.batch_transforms.len();

            match self.batches.last_mut() {
                Some(batch) if merges => batch.transforms.end = end,
                _ => self.batches.push(BatchRecord {
                    shader: item.shader,
                    material: item.material,
                    mesh: item.mesh,
                    lod: item.lod,
                    gpu_cull: item.gpu_cull,
                    lod_meshes: item.lod_meshes.clone(),
                    transforms: start..end,
                }),
            }
        }
    }

    // ===== ACCESSORS =====

    /// Draw items in collection order (before partitioning)
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    pub fn instance_count(&self) -> usize {
        self.batch_transforms.len()
    }

    /// Batches in submission order
    pub fn batches(&self) -> impl Iterator<Item = DrawBatch<'_>> + '_ {
        self.batches.iter().map(move |batch| DrawBatch {
            shader: batch.shader,
            material: batch.material,
            mesh: batch.mesh,
            lod: batch.lod,
            lod_meshes: &self.lod_meshes[batch.lod_meshes.clone()],
            gpu_cull: batch.gpu_cull,
            transforms: &self.batch_transforms[batch.transforms.clone()],
        })
    }

    /// Fill the render-list part of `stats`.
    pub fn fill_stats(&self, stats: &mut FrameStats) {
        stats.draw_items = self.items.len();
        stats.batches = self.batches.len();
        stats.instances = self.batch_transforms.len();
    }
}

#[cfg(test)]
#[path = "render_list_tests.rs"]
mod tests;
