//! Render module
//!
//! Per-frame visibility, LOD and batching pipeline, graphics settings, and
//! the GPU backend seam.

mod backend;
mod cull_result;
mod graphics_settings;
mod handles;
mod light;
mod lod;
mod mock_backend;
mod render_list;
mod renderer;

pub use backend::GpuBackend;
pub use cull_result::CullResult;
pub use graphics_settings::{
    BatchSortMode, GraphicsSettings, SettingsChange,
    MAX_ANISOTROPY, MAX_SHADOW_MAP_SIZE, MIN_SHADOW_MAP_SIZE,
};
pub use handles::{MaterialHandle, MeshHandle, ShaderFeatures, ShaderHandle, ShaderVariant, TextureHandle};
pub use light::DirectionalLight;
pub use lod::{select_lod, DetailCuller};
pub use mock_backend::{MockBackend, RecordedBatch, RecordedFrame};
pub use render_list::{DrawBatch, DrawItem, FrameStats, LodResolve, RenderList};
pub use renderer::SceneRenderer;
