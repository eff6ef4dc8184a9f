/// Axis-aligned bounding box.
///
/// An empty box uses the `min = +inf, max = -inf` sentinel so that
/// `union(EMPTY, a) == a`. Empty boxes never intersect anything and are
/// classified outside every frustum.

use glam::{Mat4, Vec3};

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl Default for AABB {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl AABB {
    /// Identity element of `union`.
    pub const EMPTY: AABB = AABB {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Smallest box enclosing all points. An empty slice yields `EMPTY`.
    pub fn from_points(points: &[Vec3]) -> Self {
        points.iter().fold(Self::EMPTY, |mut aabb, &p| {
            aabb.expand_to_point(p);
            aabb
        })
    }

    /// True when `min > max` on any axis (including the EMPTY sentinel).
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Component-wise min/max. Associative, commutative, identity = `EMPTY`.
    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grow the box to include a point.
    pub fn expand_to_point(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Strict overlap test on all three axes.
    ///
    /// Boxes that only touch along a face, edge or corner do NOT intersect.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.max.x > other.min.x && self.min.x < other.max.x
        && self.max.y > other.min.y && self.min.y < other.max.y
        && self.max.z > other.min.z && self.min.z < other.max.z
    }

    /// True iff `other` lies entirely within `self` (inclusive).
    pub fn contains(&self, other: &AABB) -> bool {
        self.min.x <= other.min.x && self.max.x >= other.max.x
        && self.min.y <= other.min.y && self.max.y >= other.max.y
        && self.min.z <= other.min.z && self.max.z >= other.max.z
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x
        && p.y >= self.min.y && p.y <= self.max.y
        && p.z >= self.min.z && p.z <= self.max.z
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Full extent (`max - min`).
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Half of the diagonal vector, i.e. the half-extents.
    pub fn half_diagonal(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Index (0 = x, 1 = y, 2 = z) of the longest axis. Ties pick the lowest index.
    pub fn longest_axis(&self) -> usize {
        let s = self.size();
        if s.x >= s.y && s.x >= s.z {
            0
        } else if s.y >= s.z {
            1
        } else {
            2
        }
    }

    /// Corner `i` in `0..8`: bit 0 selects max.x, bit 1 max.y, bit 2 max.z.
    pub fn corner(&self, i: usize) -> Vec3 {
        debug_assert!(i < 8, "corner index out of range: {}", i);
        Vec3::new(
            if i & 1 == 0 { self.min.x } else { self.max.x },
            if i & 2 == 0 { self.min.y } else { self.max.y },
            if i & 4 == 0 { self.min.z } else { self.max.z },
        )
    }

    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| self.corner(i))
    }

    /// Transform by a matrix, returning the enclosing world-space box.
    ///
    /// Arvo's method: projects each matrix axis onto the extents instead of
    /// transforming all 8 corners. `EMPTY` stays `EMPTY`.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        if self.is_empty() {
            return AABB::EMPTY;
        }

        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }

    /// Point of the box closest to `p` (p itself when inside).
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        p.max(self.min).min(self.max)
    }

    /// Squared distance from `p` to the box; zero when `p` is inside.
    pub fn distance_squared_to_point(&self, p: Vec3) -> f32 {
        self.closest_point(p).distance_squared(p)
    }

    /// Screen-space size proxy: `size² / distance²` above `threshold`.
    ///
    /// A camera inside the box (distance zero) always counts as large enough.
    /// An empty box is never large enough.
    pub fn is_large_enough(&self, camera_pos: Vec3, threshold: f32) -> bool {
        if self.is_empty() {
            return false;
        }
        let dist_sq = self.distance_squared_to_point(camera_pos);
        if dist_sq <= 0.0 {
            return true;
        }
        self.size().length_squared() / dist_sq > threshold
    }
}

#[cfg(test)]
#[path = "aabb_tests.rs"]
mod tests;
