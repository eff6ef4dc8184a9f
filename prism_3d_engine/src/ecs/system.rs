//! System trait and per-frame context

use std::any::Any;
use crate::camera::Camera;
use crate::error::Result;
use crate::render::{FrameStats, GraphicsSettings, SettingsChange};
use crate::scene::Scene;
use super::world::World;

/// Execution stage. Within a tick every `Simulation` system runs before any
/// `Render` system; order inside a stage is registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SystemStage {
    /// Fixed-timestep simulation, camera control, physics sync
    Simulation,
    /// Culling and submission
    Render,
}

/// Timing of the current tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Clamped delta in seconds
    pub delta: f32,
    /// Sum of deltas in seconds
    pub elapsed: f64,
    pub frame: u64,
}

/// Everything a system may touch during one tick
pub struct FrameContext<'a> {
    pub world: &'a mut World,
    pub scene: &'a mut Scene,
    pub settings: &'a GraphicsSettings,
    pub camera: &'a mut Camera,
    pub time: FrameTime,
    /// Set by the render system
    pub frame_stats: Option<FrameStats>,
}

/// Downcasting support so the runtime can hand out concrete systems.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub trait System: AsAny {
    /// Name used in logs
    fn name(&self) -> &'static str;

    fn stage(&self) -> SystemStage;

    fn update(&mut self, ctx: &mut FrameContext<'_>) -> Result<()>;

    /// Called synchronously after settings were validated, with the changes.
    fn on_settings_changed(&mut self, _settings: &GraphicsSettings, _changes: &[SettingsChange]) -> Result<()> {
        Ok(())
    }

    fn on_resize(&mut self, _width: u32, _height: u32) -> Result<()> {
        Ok(())
    }
}
