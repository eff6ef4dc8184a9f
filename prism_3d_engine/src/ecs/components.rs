//! Built-in components

use glam::{Mat4, Vec3};
use crate::bounds::AABB;
use crate::physics::{BodyHandle, BodyState};
use crate::scene::{RenderableKey, Transform};
use crate::timing::Interpolated;
use super::world::Component;

impl Component for Transform {}

/// Links an entity to its renderable in the `Scene`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderableRef(pub RenderableKey);

impl Component for RenderableRef {}

/// Fixed-step camera motion: constant velocity, fixed look direction.
///
/// The entity owning the first `CameraRig` drives the runtime camera.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    /// World units per second
    pub velocity: Vec3,
    pub look_direction: Vec3,
    pub up: Vec3,
    position: Interpolated<Vec3>,
}

impl CameraRig {
    pub fn new(position: Vec3, look_direction: Vec3) -> Self {
        Self {
            velocity: Vec3::ZERO,
            look_direction,
            up: Vec3::Y,
            position: Interpolated::new(position),
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Position after the last simulation step
    pub fn position(&self) -> Vec3 {
        *self.position.current()
    }

    /// Move without interpolating from the previous position
    pub fn teleport(&mut self, position: Vec3) {
        self.position.teleport(position);
    }

    pub(crate) fn step(&mut self, dt: f32) {
        let next = *self.position.current() + self.velocity * dt;
        self.position.push(next);
    }

    /// Render position: interpolated when `lerp` is set, else the last step
    pub fn render_position(&self, alpha: f32, lerp: bool) -> Vec3 {
        if lerp {
            self.position.sample(alpha)
        } else {
            *self.position.current()
        }
    }
}

impl Component for CameraRig {}

/// Physics body whose pose drives a dynamic renderable
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsBody {
    pub body: BodyHandle,
    pose: Interpolated<Transform>,
    previous_bounds: AABB,
    bounds: AABB,
}

impl PhysicsBody {
    pub fn new(body: BodyHandle, initial: Transform, bounds: AABB) -> Self {
        Self {
            body,
            pose: Interpolated::new(initial),
            previous_bounds: bounds,
            bounds,
        }
    }

    /// Record the body state after a physics step
    pub(crate) fn push_state(&mut self, state: &BodyState) {
        self.pose.push(Transform::from_translation_rotation(state.position, state.rotation));
        self.previous_bounds = self.bounds;
        self.bounds = state.world_bounds;
    }

    pub fn current_pose(&self) -> &Transform {
        self.pose.current()
    }

    /// Interpolated model matrix
    pub fn model_matrix(&self, alpha: f32) -> Mat4 {
        self.pose.sample(alpha).to_matrix()
    }

    /// Bounds covering both snapshots, so any interpolated pose is inside
    pub fn swept_bounds(&self) -> AABB {
        self.previous_bounds.union(&self.bounds)
    }
}

impl Component for PhysicsBody {}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn test_camera_rig_steps_and_lerps() {
        let mut rig = CameraRig::new(Vec3::ZERO, Vec3::NEG_Z).with_velocity(Vec3::new(6.0, 0.0, 0.0));
        rig.step(0.5);
        assert_eq!(rig.position(), Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(rig.render_position(0.5, true), Vec3::new(1.5, 0.0, 0.0));
        assert_eq!(rig.render_position(0.5, false), Vec3::new(3.0, 0.0, 0.0));

        rig.teleport(Vec3::splat(10.0));
        assert_eq!(rig.render_position(0.2, true), Vec3::splat(10.0));
    }

    #[test]
    fn test_physics_body_swept_bounds() {
        let start = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let mut body = PhysicsBody::new(BodyHandle(1), Transform::IDENTITY, start);
        assert_eq!(body.swept_bounds(), start);

        let moved = AABB::new(Vec3::new(3.0, -1.0, -1.0), Vec3::new(5.0, 1.0, 1.0));
        body.push_state(&BodyState {
            position: Vec3::new(4.0, 0.0, 0.0),
            rotation: Quat::IDENTITY,
            world_bounds: moved,
        });
        assert_eq!(body.swept_bounds(), AABB::new(Vec3::splat(-1.0), Vec3::new(5.0, 1.0, 1.0)));
        assert_eq!(body.current_pose().translation, Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(body.model_matrix(0.5).w_axis.truncate(), Vec3::new(2.0, 0.0, 0.0));
    }
}
