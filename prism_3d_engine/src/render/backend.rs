/// GPU backend collaborator.
///
/// The core hands over camera, light and ordered draw batches; everything
/// about bindings, pipelines and command recording lives behind this trait.

use crate::camera::Camera;
use crate::error::Result;
use super::graphics_settings::SettingsChange;
use super::light::DirectionalLight;
use super::render_list::DrawBatch;

pub trait GpuBackend {
    /// Swapchain / render target resize
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;

    /// Start recording a frame
    fn begin_frame(&mut self, camera: &Camera, light: &DirectionalLight) -> Result<()>;

    /// Record one batch. Called in batch order between `begin_frame` and `end_frame`.
    fn submit(&mut self, batch: &DrawBatch<'_>) -> Result<()>;

    /// Finish and present the frame. Also called after a failed `submit`.
    fn end_frame(&mut self) -> Result<()>;

    /// React to changed graphics settings (shadow map size, anisotropy, ...)
    fn apply_settings(&mut self, changes: &[SettingsChange]) -> Result<()>;
}
