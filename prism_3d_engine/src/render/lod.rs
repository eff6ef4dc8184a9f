/// Distance-based level of detail and small-object (detail) culling.

use glam::Vec3;
use crate::bounds::AABB;

/// LOD index for an object: `floor(distance / lod_divisor)`, clamped to `max_lod`.
///
/// A non-positive or non-finite divisor always selects the most detailed level.
pub fn select_lod(camera_pos: Vec3, object_pos: Vec3, lod_divisor: f32, max_lod: usize) -> usize {
    if !(lod_divisor > 0.0 && lod_divisor.is_finite()) {
        return 0;
    }
    let distance = camera_pos.distance(object_pos);
    // `as` truncates (floor for non-negative), saturates, and maps NaN to 0
    ((distance / lod_divisor) as usize).min(max_lod)
}

/// Rejects objects whose projected size ratio is at or below a threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetailCuller {
    threshold: f32,
}

impl DetailCuller {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// True if the object can be skipped this frame.
    ///
    /// An empty box is negligible; a camera touching or inside the box never is.
    pub fn is_negligible(&self, bounds: &AABB, camera_pos: Vec3) -> bool {
        !bounds.is_large_enough(camera_pos, self.threshold)
    }
}
