//! Physics collaborator seam
//!
//! The engine does not simulate physics. A backend steps its world at the
//! fixed timestep and reports body poses and world bounds, which are
//! interpolated into dynamic renderables.

use glam::{Quat, Vec3};
use crate::bounds::AABB;

/// Body owned by the physics backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub u32);

/// Pose and bounds of a body after a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub position: Vec3,
    pub rotation: Quat,
    /// World-space bounds as computed by the physics engine
    pub world_bounds: AABB,
}

pub trait PhysicsBackend {
    /// Advance the simulation by `dt` seconds
    fn step(&mut self, dt: f32);

    /// Current state of a body, `None` if the handle is unknown
    fn body_state(&self, body: BodyHandle) -> Option<BodyState>;
}
