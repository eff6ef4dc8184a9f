/// SceneRenderer - per-frame cull → LOD → batch → submit driver.
///
/// Owns the camera, the directional light, the current graphics settings and
/// the reusable per-frame buffers. The scene is borrowed for the duration of
/// a frame; the backend receives the ordered batches.

use crate::camera::Camera;
use crate::error::Result;
use crate::scene::Scene;
use crate::{engine_error, engine_info};
use super::backend::GpuBackend;
use super::cull_result::CullResult;
use super::graphics_settings::{GraphicsSettings, SettingsChange};
use super::light::DirectionalLight;
use super::lod::DetailCuller;
use super::render_list::{FrameStats, RenderList};

pub struct SceneRenderer {
    camera: Camera,
    light: DirectionalLight,
    settings: GraphicsSettings,
    cull_result: CullResult,
    render_list: RenderList,
    last_stats: FrameStats,
}

impl SceneRenderer {
    /// Create a renderer. Fails if `settings` do not validate.
    pub fn new(camera: Camera, settings: GraphicsSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            camera,
            light: DirectionalLight::default(),
            settings,
            cull_result: CullResult::new(),
            render_list: RenderList::new(),
            last_stats: FrameStats::default(),
        })
    }

    // ===== APPLICATION-FACING =====

    /// Propagate a viewport change to the camera and the backend.
    pub fn on_resize(&mut self, backend: &mut dyn GpuBackend, width: u32, height: u32) -> Result<()> {
        self.camera.on_resize(width, height);
        backend.resize(width, height)
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn set_directional_light(&mut self, light: DirectionalLight) {
        self.light = light;
    }

    pub fn directional_light(&self) -> &DirectionalLight {
        &self.light
    }

    /// Explicit BVH rebuild trigger
    pub fn build_bvh(&self, scene: &mut Scene) {
        engine_info!("prism3d::SceneRenderer", "BVH rebuild requested ({} renderables)", scene.len());
        scene.build_bvh();
    }

    pub fn settings(&self) -> &GraphicsSettings {
        &self.settings
    }

    /// Validate and apply new settings; the backend sees the changes first.
    ///
    /// Returns the applied changes (empty if nothing changed).
    pub fn update_settings(
        &mut self,
        settings: GraphicsSettings,
        backend: &mut dyn GpuBackend,
    ) -> Result<Vec<SettingsChange>> {
        settings.validate()?;
        let changes = GraphicsSettings::diff(&self.settings, &settings);
        if changes.is_empty() {
            return Ok(changes);
        }
        for change in &changes {
            engine_info!("prism3d::SceneRenderer", "Graphics setting changed: {:?}", change);
        }
        backend.apply_settings(&changes)?;
        self.settings = settings;
        Ok(changes)
    }

    // ===== FRAME =====

    /// Cull, resolve LODs, batch and submit one frame.
    ///
    /// A failed `submit` stops submission; `end_frame` is still called before
    /// the submit error is returned.
    pub fn render(&mut self, scene: &Scene, backend: &mut dyn GpuBackend) -> Result<FrameStats> {
        let camera_pos = self.camera.position();

        self.cull_result.clear();
        scene.cull(self.camera.frustum(), &mut self.cull_result);

        let detail = self
            .settings
            .detail_culling
            .then(|| DetailCuller::new(self.settings.detail_culling_threshold));
        self.cull_result.partition(scene, camera_pos, detail.as_ref());
        self.render_list.build(scene, &self.cull_result, camera_pos, &self.settings);

        backend.begin_frame(&self.camera, &self.light)?;
        for batch in self.render_list.batches() {
            if let Err(err) = backend.submit(&batch) {
                engine_error!("prism3d::SceneRenderer", "Batch submission failed: {}", err);
                // the frame is closed even when a batch failed
                if let Err(end_err) = backend.end_frame() {
                    engine_error!("prism3d::SceneRenderer", "Closing the failed frame failed: {}", end_err);
                }
                return Err(err);
            }
        }
        backend.end_frame()?;

        let mut stats = FrameStats {
            visible: self.cull_result.visible_count(),
            fully_visible: self.cull_result.fully_visible.len(),
            probably_visible: self.cull_result.probably_visible.len(),
            detail_culled: self.cull_result.detail_culled,
            ..FrameStats::default()
        };
        self.render_list.fill_stats(&mut stats);
        self.last_stats = stats;
        Ok(stats)
    }

    /// Culling output of the last frame
    pub fn cull_result(&self) -> &CullResult {
        &self.cull_result
    }

    pub fn render_list(&self) -> &RenderList {
        &self.render_list
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
