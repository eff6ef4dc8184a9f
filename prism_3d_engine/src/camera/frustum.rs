/// Frustum - six clipping planes for visibility culling.
///
/// Each plane is stored normalized with its normal pointing INWARD (toward
/// the visible volume): a point P is inside when `dot(n, P) + d >= 0` for
/// all six planes. The three-way tests below are conservative: a volume may
/// be reported `Intersecting` while actually fully inside or outside near a
/// frustum corner, but a volume overlapping the frustum is never `Outside`.

use glam::{Mat4, Vec3, Vec4};
use crate::bounds::{AABB, Sphere};

/// Result of a 3-way volume classification.
///
/// - `Outside` → skip the entire subtree
/// - `Inside` → collect everything below without further testing
/// - `Intersecting` → test children / objects individually
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// Volume is entirely outside at least one plane
    Outside,
    /// Volume is entirely inside all planes
    Inside,
    /// Volume straddles at least one plane
    Intersecting,
}

/// Depth range convention of the target clip space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipSpace {
    /// Near plane maps to z = -1 (OpenGL)
    #[default]
    OpenGl,
    /// Near plane maps to z = 0 (DirectX / Vulkan / Metal)
    DirectX,
}

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Plane `dot(normal, p) + d = 0` with a unit, inward-pointing normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f32,
}

impl Plane {
    /// Build from raw `(A, B, C, D)` coefficients, normalizing the normal.
    /// A zero normal is kept as-is (degenerate projection).
    pub fn from_coefficients(v: Vec4) -> Self {
        let normal = v.truncate();
        let len = normal.length();
        if len > 0.0 {
            Self { normal: normal / len, d: v.w / len }
        } else {
            Self { normal, d: v.w }
        }
    }

    /// Signed distance, positive on the inner side.
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.normal.dot(p) + self.d
    }

    /// Classify an AABB with the center/extent ("positive vertex") trick:
    /// the half-diagonal projected onto `|normal|` gives the box radius
    /// along the normal.
    pub fn classify_aabb(&self, aabb: &AABB) -> FrustumTest {
        if aabb.is_empty() {
            return FrustumTest::Outside;
        }
        let distance = self.signed_distance(aabb.center());
        let extent = aabb.half_diagonal().dot(self.normal.abs());

        if distance + extent < 0.0 {
            FrustumTest::Outside
        } else if distance - extent > 0.0 {
            FrustumTest::Inside
        } else {
            FrustumTest::Intersecting
        }
    }

    pub fn classify_sphere(&self, sphere: &Sphere) -> FrustumTest {
        if sphere.is_empty() {
            return FrustumTest::Outside;
        }
        let distance = self.signed_distance(sphere.center);

        if distance + sphere.radius < 0.0 {
            FrustumTest::Outside
        } else if distance - sphere.radius > 0.0 {
            FrustumTest::Inside
        } else {
            FrustumTest::Intersecting
        }
    }
}

/// Six frustum planes: left, right, bottom, top, near, far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract the planes from a view-projection matrix (Gribb & Hartmann).
    ///
    /// Works for perspective and orthographic projections. `clip_space`
    /// must match the convention the projection was built for, otherwise
    /// the near plane is misplaced.
    pub fn from_view_projection(vp: &Mat4, clip_space: ClipSpace) -> Self {
        let r0 = vp.row(0);
        let r1 = vp.row(1);
        let r2 = vp.row(2);
        let r3 = vp.row(3);

        let near = match clip_space {
            ClipSpace::OpenGl => r3 + r2,
            ClipSpace::DirectX => r2,
        };

        Self {
            planes: [
                Plane::from_coefficients(r3 + r0),
                Plane::from_coefficients(r3 - r0),
                Plane::from_coefficients(r3 + r1),
                Plane::from_coefficients(r3 - r1),
                Plane::from_coefficients(near),
                Plane::from_coefficients(r3 - r2),
            ],
        }
    }

    /// Classify an AABB against all six planes.
    ///
    /// `Outside` short-circuits on the first plane that rejects the box;
    /// otherwise `Inside` unless any plane reported `Intersecting`.
    pub fn classify_aabb(&self, aabb: &AABB) -> FrustumTest {
        let mut result = FrustumTest::Inside;
        for plane in &self.planes {
            match plane.classify_aabb(aabb) {
                FrustumTest::Outside => return FrustumTest::Outside,
                FrustumTest::Intersecting => result = FrustumTest::Intersecting,
                FrustumTest::Inside => {}
            }
        }
        result
    }

    /// Sphere variant of `classify_aabb`, same short-circuit rules.
    pub fn classify_sphere(&self, sphere: &Sphere) -> FrustumTest {
        let mut result = FrustumTest::Inside;
        for plane in &self.planes {
            match plane.classify_sphere(sphere) {
                FrustumTest::Outside => return FrustumTest::Outside,
                FrustumTest::Intersecting => result = FrustumTest::Intersecting,
                FrustumTest::Inside => {}
            }
        }
        result
    }

    /// True when the AABB is (potentially) visible.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.classify_aabb(aabb) != FrustumTest::Outside
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.signed_distance(p) >= 0.0)
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
