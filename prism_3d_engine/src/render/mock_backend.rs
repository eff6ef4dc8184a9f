/// Mock GPU backend (no GPU required)
///
/// Records every call so tests can inspect frames and submitted batches.
/// Failures can be injected to exercise error paths. Calls made in the wrong
/// frame phase fail with `Error::InvalidState`.

use glam::Mat4;
use crate::camera::Camera;
use crate::engine_err;
use crate::error::{Error, Result};
use super::backend::GpuBackend;
use super::graphics_settings::SettingsChange;
use super::handles::{MaterialHandle, MeshHandle, ShaderVariant};
use super::light::DirectionalLight;
use super::render_list::{DrawBatch, LodResolve};

/// Owned copy of a submitted batch
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedBatch {
    pub shader: ShaderVariant,
    pub material: MaterialHandle,
    pub mesh: MeshHandle,
    pub lod: LodResolve,
    pub lod_meshes: Vec<MeshHandle>,
    pub gpu_cull: bool,
    pub transforms: Vec<Mat4>,
}

impl From<&DrawBatch<'_>> for RecordedBatch {
    fn from(batch: &DrawBatch<'_>) -> Self {
        Self {
            shader: batch.shader,
            material: batch.material,
            mesh: batch.mesh,
            lod: batch.lod,
            lod_meshes: batch.lod_meshes.to_vec(),
            gpu_cull: batch.gpu_cull,
            transforms: batch.transforms.to_vec(),
        }
    }
}

/// One frame as seen by the backend
#[derive(Debug, Clone, Default)]
pub struct RecordedFrame {
    pub view_projection: Mat4,
    pub light: Option<DirectionalLight>,
    pub batches: Vec<RecordedBatch>,
    pub ended: bool,
}

#[derive(Debug, Default)]
pub struct MockBackend {
    pub frames: Vec<RecordedFrame>,
    pub resizes: Vec<(u32, u32)>,
    pub settings_changes: Vec<SettingsChange>,
    /// Fail the n-th `submit` call of the next frame (0-based)
    pub fail_submit_at: Option<usize>,
    in_frame: bool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// True between `begin_frame` and `end_frame`
    pub fn is_in_frame(&self) -> bool {
        self.in_frame
    }
}

impl GpuBackend for MockBackend {
    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.resizes.push((width, height));
        Ok(())
    }

    fn begin_frame(&mut self, camera: &Camera, light: &DirectionalLight) -> Result<()> {
        if self.in_frame {
            return Err(engine_err!("prism3d::MockBackend", "begin_frame called twice"));
        }
        self.in_frame = true;
        self.frames.push(RecordedFrame {
            view_projection: camera.view_projection_matrix(),
            light: Some(*light),
            batches: Vec::new(),
            ended: false,
        });
        Ok(())
    }

    fn submit(&mut self, batch: &DrawBatch<'_>) -> Result<()> {
        let frame = match self.frames.last_mut() {
            Some(frame) if self.in_frame => frame,
            _ => return Err(engine_err!("prism3d::MockBackend", "submit outside of a frame")),
        };
        if self.fail_submit_at == Some(frame.batches.len()) {
            self.fail_submit_at = None;
            return Err(Error::BackendError("injected submit failure".to_string()));
        }
        frame.batches.push(RecordedBatch::from(batch));
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        if !self.in_frame {
            return Err(engine_err!("prism3d::MockBackend", "end_frame without begin_frame"));
        }
        self.in_frame = false;
        if let Some(frame) = self.frames.last_mut() {
            frame.ended = true;
        }
        Ok(())
    }

    fn apply_settings(&mut self, changes: &[SettingsChange]) -> Result<()> {
        self.settings_changes.extend_from_slice(changes);
        Ok(())
    }
}
