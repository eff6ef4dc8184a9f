//! Built-in systems

mod camera_rig;
mod physics_sync;
mod render;

pub use camera_rig::CameraRigSystem;
pub use physics_sync::PhysicsSyncSystem;
pub use render::RenderSystem;
