use crate::ecs::components::{PhysicsBody, RenderableRef};
use crate::ecs::system::{FrameContext, System, SystemStage};
use crate::engine_debug;
use crate::error::Result;
use crate::physics::PhysicsBackend;
use crate::timing::FixedTimestep;

/// Steps the physics backend at a fixed rate and writes interpolated body
/// poses into the scene's dynamic renderables.
pub struct PhysicsSyncSystem<P: PhysicsBackend> {
    physics: P,
    timestep: FixedTimestep,
}

impl<P: PhysicsBackend> PhysicsSyncSystem<P> {
    pub fn new(physics: P, dt: f32) -> Result<Self> {
        Ok(Self { physics, timestep: FixedTimestep::new(dt)? })
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }
}

impl<P: PhysicsBackend + 'static> System for PhysicsSyncSystem<P> {
    fn name(&self) -> &'static str {
        "PhysicsSyncSystem"
    }

    fn stage(&self) -> SystemStage {
        SystemStage::Simulation
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>) -> Result<()> {
        let physics = &mut self.physics;
        let world = &mut *ctx.world;
        let report = self.timestep.advance(ctx.time.delta, |dt| {
            physics.step(dt);
            for (_, body) in world.query_mut::<PhysicsBody>() {
                if let Some(state) = physics.body_state(body.body) {
                    body.push_state(&state);
                }
            }
        });

        for (entity, body) in ctx.world.query::<PhysicsBody>() {
            let Some(RenderableRef(key)) = ctx.world.get::<RenderableRef>(entity) else {
                continue;
            };
            let matrix = body.model_matrix(report.alpha);
            if !ctx.scene.set_dynamic_state(*key, matrix, body.swept_bounds()) {
                engine_debug!(
                    "prism3d::PhysicsSyncSystem",
                    "Entity {:?} references a missing or non-dynamic renderable",
                    entity
                );
            }
        }
        Ok(())
    }
}
