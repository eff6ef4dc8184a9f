use crate::ecs::system::{FrameContext, System, SystemStage};
use crate::error::Result;
use crate::render::{FrameStats, GpuBackend, GraphicsSettings, SceneRenderer, SettingsChange};

/// Renders the scene through a `SceneRenderer` once per tick.
///
/// Batching always uses the settings in the frame context; a renderer built
/// with different settings is brought in line (backend included) on its
/// first frame.
pub struct RenderSystem<B: GpuBackend> {
    renderer: SceneRenderer,
    backend: B,
    last_stats: FrameStats,
}

impl<B: GpuBackend> RenderSystem<B> {
    pub fn new(renderer: SceneRenderer, backend: B) -> Self {
        Self { renderer, backend, last_stats: FrameStats::default() }
    }

    pub fn renderer(&self) -> &SceneRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut SceneRenderer {
        &mut self.renderer
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }
}

impl<B: GpuBackend + 'static> System for RenderSystem<B> {
    fn name(&self) -> &'static str {
        "RenderSystem"
    }

    fn stage(&self) -> SystemStage {
        SystemStage::Render
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>) -> Result<()> {
        // the runtime's settings win over the renderer's construction-time copy
        if self.renderer.settings() != ctx.settings {
            self.renderer.update_settings(ctx.settings.clone(), &mut self.backend)?;
        }
        self.renderer.set_camera(ctx.camera.clone());
        let stats = self.renderer.render(ctx.scene, &mut self.backend)?;
        self.last_stats = stats;
        ctx.frame_stats = Some(stats);
        Ok(())
    }

    fn on_settings_changed(&mut self, settings: &GraphicsSettings, _changes: &[SettingsChange]) -> Result<()> {
        self.renderer.update_settings(settings.clone(), &mut self.backend)?;
        Ok(())
    }

    fn on_resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.renderer.on_resize(&mut self.backend, width, height)
    }
}
