//! Runtime: the per-frame loop
//!
//! One tick advances the frame timer, runs every `Simulation` system, then
//! every `Render` system, each with exclusive access to the world and the
//! scene. Nothing is shared between threads.

use crate::camera::Camera;
use crate::ecs::{Entity, FrameContext, FrameTime, RenderableRef, System, World};
use crate::error::{Error, Result};
use crate::render::{FrameStats, GraphicsSettings, SettingsChange};
use crate::scene::Scene;
use crate::timing::FrameTimer;
use crate::{engine_error, engine_info};

pub struct Runtime {
    world: World,
    scene: Scene,
    settings: GraphicsSettings,
    camera: Camera,
    timer: FrameTimer,
    systems: Vec<Box<dyn System>>,
}

impl Runtime {
    pub fn new(camera: Camera, settings: GraphicsSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            world: World::new(),
            scene: Scene::new(),
            settings,
            camera,
            timer: FrameTimer::new(),
            systems: Vec::new(),
        })
    }

    /// Replace the frame timer (e.g. a different `max_delta`).
    pub fn with_timer(mut self, timer: FrameTimer) -> Self {
        self.timer = timer;
        self
    }

    /// Register a system after every system of the same or an earlier stage.
    pub fn add_system<S: System>(&mut self, system: S) {
        let stage = system.stage();
        let index = self
            .systems
            .iter()
            .position(|s| s.stage() > stage)
            .unwrap_or(self.systems.len());
        self.systems.insert(index, Box::new(system));
    }

    /// First registered system of type `S`
    pub fn system<S: System>(&self) -> Option<&S> {
        self.systems
            .iter()
            .find_map(|s| (**s).as_any().downcast_ref::<S>())
    }

    pub fn system_mut<S: System>(&mut self) -> Option<&mut S> {
        self.systems
            .iter_mut()
            .find_map(|s| (**s).as_any_mut().downcast_mut::<S>())
    }

    pub fn system_names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    // ===== OWNED STATE =====

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn settings(&self) -> &GraphicsSettings {
        &self.settings
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Despawn an entity, removing its renderable from the scene.
    pub fn despawn(&mut self, entity: Entity) -> Result<()> {
        if let Some(RenderableRef(key)) = self.world.get::<RenderableRef>(entity).copied() {
            self.scene.remove_renderable(key);
        }
        if !self.world.despawn(entity) {
            return Err(Error::InvalidResource(format!("entity {:?} does not exist", entity)));
        }
        Ok(())
    }

    // ===== APPLICATION-FACING =====

    /// Explicit BVH rebuild trigger
    pub fn build_bvh(&mut self) {
        engine_info!("prism3d::Runtime", "BVH rebuild requested ({} renderables)", self.scene.len());
        self.scene.build_bvh();
    }

    /// Validate `settings`, notify every system of the changes, then store them.
    pub fn apply_settings(&mut self, settings: GraphicsSettings) -> Result<Vec<SettingsChange>> {
        settings.validate()?;
        let changes = GraphicsSettings::diff(&self.settings, &settings);
        if changes.is_empty() {
            return Ok(changes);
        }
        for change in &changes {
            engine_info!("prism3d::Runtime", "Graphics setting changed: {:?}", change);
        }
        for system in &mut self.systems {
            system.on_settings_changed(&settings, &changes)?;
        }
        self.settings = settings;
        Ok(changes)
    }

    pub fn on_resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.camera.on_resize(width, height);
        for system in &mut self.systems {
            system.on_resize(width, height)?;
        }
        Ok(())
    }

    // ===== FRAME =====

    /// Run one frame with the wall-clock delta. Returns the render stats, if a
    /// render system ran.
    pub fn tick(&mut self) -> Result<Option<FrameStats>> {
        self.timer.tick();
        self.run_systems()
    }

    /// Run one frame with an explicit delta (clamped like a measured one).
    pub fn tick_with_delta(&mut self, delta: f32) -> Result<Option<FrameStats>> {
        self.timer.advance(delta);
        self.run_systems()
    }

    fn run_systems(&mut self) -> Result<Option<FrameStats>> {
        let mut ctx = FrameContext {
            world: &mut self.world,
            scene: &mut self.scene,
            settings: &self.settings,
            camera: &mut self.camera,
            time: FrameTime {
                delta: self.timer.delta(),
                elapsed: self.timer.elapsed(),
                frame: self.timer.frame_count(),
            },
            frame_stats: None,
        };

        for system in &mut self.systems {
            if let Err(err) = system.update(&mut ctx) {
                engine_error!("prism3d::Runtime", "{} failed: {}", system.name(), err);
                return Err(err);
            }
        }
        Ok(ctx.frame_stats)
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
