/// Renderable: one drawable entry of a scene.
///
/// A closed set of variants (static mesh, instanced mesh, LOD chain, physics
/// driven mesh) sharing a common header: model matrix + inverse, local and
/// world bounds, material and shader variant. World bounds are owned by the
/// renderable and recomputed on every transform mutation.

use bitflags::bitflags;
use glam::{Mat4, Vec3};
use slotmap::new_key_type;
use crate::bounds::AABB;
use crate::physics::BodyHandle;
use crate::render::{MaterialHandle, MeshHandle, ShaderFeatures, ShaderVariant};

new_key_type! {
    /// Stable key for a renderable stored in a `Scene`
    pub struct RenderableKey;
}

bitflags! {
    /// Per-renderable rendering flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenderableFlags: u32 {
        const CAST_SHADOW     = 1 << 0;
        const RECEIVE_SHADOW  = 1 << 1;
        /// Submit to the GPU occlusion-culling path
        const GPU_OCCLUSION   = 1 << 2;
    }
}

impl Default for RenderableFlags {
    fn default() -> Self {
        RenderableFlags::CAST_SHADOW | RenderableFlags::RECEIVE_SHADOW
    }
}

/// Where the level of detail of a LOD chain is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LodMode {
    /// Index picked per frame from camera distance
    #[default]
    Cpu,
    /// All levels forwarded; the backend picks
    Gpu,
}

/// Variant-specific payload
#[derive(Debug, Clone, PartialEq)]
pub enum RenderableKind {
    /// One mesh, one transform
    StaticMesh { mesh: MeshHandle },
    /// One mesh drawn once per instance transform (relative to the model matrix)
    Instanced { mesh: MeshHandle, instances: Vec<Mat4> },
    /// Meshes ordered from most to least detailed
    LodChain { lods: Vec<MeshHandle>, lod_divisor: f32, mode: LodMode },
    /// Transform and world bounds owned by a physics body
    Dynamic { mesh: MeshHandle, body: BodyHandle },
}

#[derive(Debug, Clone)]
pub struct Renderable {
    kind: RenderableKind,
    model_matrix: Mat4,
    inverse_model_matrix: Mat4,
    /// Bounds in model space
    local_bounds: AABB,
    /// Cached world-space bounds
    world_bounds: AABB,
    material: MaterialHandle,
    shader: ShaderVariant,
    flags: RenderableFlags,
}

impl Renderable {
    fn with_kind(
        kind: RenderableKind,
        material: MaterialHandle,
        shader: ShaderVariant,
        local_bounds: AABB,
        model_matrix: Mat4,
    ) -> Self {
        let mut renderable = Self {
            kind,
            model_matrix,
            inverse_model_matrix: model_matrix.inverse(),
            local_bounds,
            world_bounds: AABB::EMPTY,
            material,
            shader,
            flags: RenderableFlags::default(),
        };
        renderable.refresh_world_bounds();
        renderable
    }

    pub fn static_mesh(
        mesh: MeshHandle,
        material: MaterialHandle,
        shader: ShaderVariant,
        local_bounds: AABB,
        model_matrix: Mat4,
    ) -> Self {
        Self::with_kind(RenderableKind::StaticMesh { mesh }, material, shader, local_bounds, model_matrix)
    }

    /// Instanced mesh. `local_bounds` bounds a single instance; the world
    /// bounds cover every instance.
    pub fn instanced(
        mesh: MeshHandle,
        instances: Vec<Mat4>,
        material: MaterialHandle,
        shader: ShaderVariant,
        local_bounds: AABB,
        model_matrix: Mat4,
    ) -> Self {
        let shader = ShaderVariant::new(shader.program, shader.features | ShaderFeatures::INSTANCED);
        Self::with_kind(
            RenderableKind::Instanced { mesh, instances },
            material, shader, local_bounds, model_matrix,
        )
    }

    /// LOD chain. `lods[0]` is the most detailed mesh.
    pub fn lod_chain(
        lods: Vec<MeshHandle>,
        lod_divisor: f32,
        mode: LodMode,
        material: MaterialHandle,
        shader: ShaderVariant,
        local_bounds: AABB,
        model_matrix: Mat4,
    ) -> Self {
        Self::with_kind(
            RenderableKind::LodChain { lods, lod_divisor, mode },
            material, shader, local_bounds, model_matrix,
        )
    }

    pub fn dynamic(
        mesh: MeshHandle,
        body: BodyHandle,
        material: MaterialHandle,
        shader: ShaderVariant,
        local_bounds: AABB,
        model_matrix: Mat4,
    ) -> Self {
        Self::with_kind(RenderableKind::Dynamic { mesh, body }, material, shader, local_bounds, model_matrix)
    }

    pub fn with_flags(mut self, flags: RenderableFlags) -> Self {
        self.flags = flags;
        self
    }

    // ===== ACCESSORS =====

    pub fn kind(&self) -> &RenderableKind {
        &self.kind
    }

    pub fn model_matrix(&self) -> &Mat4 {
        &self.model_matrix
    }

    pub fn inverse_model_matrix(&self) -> &Mat4 {
        &self.inverse_model_matrix
    }

    pub fn local_bounds(&self) -> &AABB {
        &self.local_bounds
    }

    pub fn world_bounds(&self) -> &AABB {
        &self.world_bounds
    }

    pub fn material(&self) -> MaterialHandle {
        self.material
    }

    pub fn shader(&self) -> ShaderVariant {
        self.shader
    }

    pub fn flags(&self) -> RenderableFlags {
        self.flags
    }

    /// Translation part of the model matrix, used for LOD distance.
    pub fn world_position(&self) -> Vec3 {
        self.model_matrix.w_axis.truncate()
    }

    // ===== CAPABILITIES =====

    pub fn has_lods(&self) -> bool {
        matches!(self.kind, RenderableKind::LodChain { .. })
    }

    pub fn is_instanced(&self) -> bool {
        matches!(self.kind, RenderableKind::Instanced { .. })
    }

    /// Physics-driven renderables bypass the static BVH
    pub fn is_dynamic(&self) -> bool {
        matches!(self.kind, RenderableKind::Dynamic { .. })
    }

    pub fn wants_gpu_occlusion(&self) -> bool {
        self.flags.contains(RenderableFlags::GPU_OCCLUSION)
    }

    /// `Some(mode)` for LOD chains
    pub fn lod_mode(&self) -> Option<LodMode> {
        match &self.kind {
            RenderableKind::LodChain { mode, .. } => Some(*mode),
            _ => None,
        }
    }

    /// Number of selectable meshes (1 for non-LOD renderables, 0 for an empty chain).
    pub fn lod_count(&self) -> usize {
        match &self.kind {
            RenderableKind::LodChain { lods, .. } => lods.len(),
            _ => 1,
        }
    }

    pub fn lod_divisor(&self) -> Option<f32> {
        match &self.kind {
            RenderableKind::LodChain { lod_divisor, .. } => Some(*lod_divisor),
            _ => None,
        }
    }

    /// Mesh for a LOD index, clamped to the last level. `None` for an empty chain.
    pub fn mesh_for_lod(&self, lod: usize) -> Option<MeshHandle> {
        match &self.kind {
            RenderableKind::StaticMesh { mesh }
            | RenderableKind::Instanced { mesh, .. }
            | RenderableKind::Dynamic { mesh, .. } => Some(*mesh),
            RenderableKind::LodChain { lods, .. } => {
                lods.get(lod.min(lods.len().saturating_sub(1))).copied()
            }
        }
    }

    pub fn instance_count(&self) -> usize {
        match &self.kind {
            RenderableKind::Instanced { instances, .. } => instances.len(),
            _ => 1,
        }
    }

    /// Append the world transforms to draw: one per instance, or the model matrix.
    pub fn append_world_transforms(&self, out: &mut Vec<Mat4>) {
        match &self.kind {
            RenderableKind::Instanced { instances, .. } => {
                out.extend(instances.iter().map(|inst| self.model_matrix * *inst));
            }
            _ => out.push(self.model_matrix),
        }
    }

    pub fn body(&self) -> Option<BodyHandle> {
        match &self.kind {
            RenderableKind::Dynamic { body, .. } => Some(*body),
            _ => None,
        }
    }

    // ===== MUTATION (scene-internal so the BVH bookkeeping stays correct) =====

    pub(crate) fn set_model_matrix(&mut self, model_matrix: Mat4) {
        self.model_matrix = model_matrix;
        self.inverse_model_matrix = model_matrix.inverse();
        self.refresh_world_bounds();
    }

    /// Returns false if this renderable is not instanced.
    pub(crate) fn set_instances(&mut self, transforms: Vec<Mat4>) -> bool {
        match &mut self.kind {
            RenderableKind::Instanced { instances, .. } => {
                *instances = transforms;
                self.refresh_world_bounds();
                true
            }
            _ => false,
        }
    }

    /// Physics sync: the body provides both the matrix and the world AABB.
    pub(crate) fn set_physics_state(&mut self, model_matrix: Mat4, world_bounds: AABB) {
        self.model_matrix = model_matrix;
        self.inverse_model_matrix = model_matrix.inverse();
        self.world_bounds = world_bounds;
    }

    fn refresh_world_bounds(&mut self) {
        self.world_bounds = match &self.kind {
            RenderableKind::Instanced { instances, .. } => instances
                .iter()
                .fold(AABB::EMPTY, |acc, inst| {
                    acc.union(&self.local_bounds.transformed(&(self.model_matrix * *inst)))
                }),
            _ => self.local_bounds.transformed(&self.model_matrix),
        };
    }
}

#[cfg(test)]
#[path = "renderable_tests.rs"]
mod tests;
