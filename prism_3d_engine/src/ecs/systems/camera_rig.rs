use crate::ecs::components::CameraRig;
use crate::ecs::system::{FrameContext, System, SystemStage};
use crate::error::Result;
use crate::timing::FixedTimestep;

/// Moves camera rigs at a fixed rate and places the runtime camera.
///
/// The camera follows the first rig, interpolated between the last two
/// steps when `camera_lerping` is enabled.
pub struct CameraRigSystem {
    timestep: FixedTimestep,
}

impl CameraRigSystem {
    pub fn new(dt: f32) -> Result<Self> {
        Ok(Self { timestep: FixedTimestep::new(dt)? })
    }

    pub fn timestep(&self) -> &FixedTimestep {
        &self.timestep
    }
}

impl System for CameraRigSystem {
    fn name(&self) -> &'static str {
        "CameraRigSystem"
    }

    fn stage(&self) -> SystemStage {
        SystemStage::Simulation
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>) -> Result<()> {
        let world = &mut *ctx.world;
        let report = self.timestep.advance(ctx.time.delta, |dt| {
            for (_, rig) in world.query_mut::<CameraRig>() {
                rig.step(dt);
            }
        });

        if let Some((_, rig)) = ctx.world.query::<CameraRig>().next() {
            let position = rig.render_position(report.alpha, ctx.settings.camera_lerping);
            ctx.camera.look_to(position, rig.look_direction, rig.up);
        }
        Ok(())
    }
}
