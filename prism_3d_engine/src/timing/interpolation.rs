//! Interpolation between two simulation snapshots

use glam::{Quat, Vec3};
use crate::scene::Transform;

/// Linear blend between two values, `t` in `[0, 1]`
pub trait Lerp {
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Vec3 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec3::lerp(*self, *other, t)
    }
}

impl Lerp for Quat {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self.slerp(*other, t)
    }
}

impl Lerp for Transform {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Transform {
            translation: Lerp::lerp(&self.translation, &other.translation, t),
            rotation: Lerp::lerp(&self.rotation, &other.rotation, t),
            scale: Lerp::lerp(&self.scale, &other.scale, t),
        }
    }
}

/// Previous and current simulation state of one quantity.
///
/// Starts with previous == current. `push` is called once per fixed step,
/// `sample(alpha)` once per rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolated<T> {
    previous: T,
    current: T,
}

impl<T: Lerp + Clone> Interpolated<T> {
    pub fn new(initial: T) -> Self {
        Self { previous: initial.clone(), current: initial }
    }

    /// Record the result of a simulation step.
    pub fn push(&mut self, next: T) {
        self.previous = std::mem::replace(&mut self.current, next);
    }

    /// Jump to a state without interpolating from the old one.
    pub fn teleport(&mut self, state: T) {
        self.previous = state.clone();
        self.current = state;
    }

    pub fn previous(&self) -> &T {
        &self.previous
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    /// `lerp(previous, current, alpha)`
    pub fn sample(&self, alpha: f32) -> T {
        self.previous.lerp(&self.current, alpha)
    }
}
