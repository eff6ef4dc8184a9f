//! Minimal ECS driving the simulation and render stages

mod components;
mod system;
mod world;
pub mod systems;

pub use components::{CameraRig, PhysicsBody, RenderableRef};
pub use system::{AsAny, FrameContext, FrameTime, System, SystemStage};
pub use world::{Component, Entity, World};
