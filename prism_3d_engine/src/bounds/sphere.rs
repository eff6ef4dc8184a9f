/// Bounding sphere.
///
/// Standalone volume for callers that want sphere tests
/// (`Frustum::classify_sphere`). Scene culling itself works on AABBs.

use glam::{Mat4, Vec3};
use super::aabb::AABB;

/// Bounding sphere (center + radius). A negative radius marks an empty sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    /// Never visible, contains nothing.
    pub const EMPTY: Sphere = Sphere {
        center: Vec3::ZERO,
        radius: f32::NEG_INFINITY,
    };

    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Sphere centered on the box, radius reaching the farthest corner.
    pub fn from_aabb(aabb: &AABB) -> Self {
        if aabb.is_empty() {
            return Self::EMPTY;
        }
        Self {
            center: aabb.center(),
            radius: aabb.half_diagonal().length(),
        }
    }

    /// Sphere centered on the vertex centroid, radius = max vertex distance.
    pub fn from_points(points: &[Vec3]) -> Self {
        if points.is_empty() {
            return Self::EMPTY;
        }
        let centroid = points.iter().copied().sum::<Vec3>() / points.len() as f32;
        let radius_sq = points
            .iter()
            .map(|p| p.distance_squared(centroid))
            .fold(0.0f32, f32::max);
        Self {
            center: centroid,
            radius: radius_sq.sqrt(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.radius < 0.0
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        !self.is_empty() && p.distance_squared(self.center) <= self.radius * self.radius
    }

    /// Transform by a matrix. The radius scales with the largest axis scale,
    /// so the result stays conservative under non-uniform scaling.
    pub fn transformed(&self, matrix: &Mat4) -> Sphere {
        if self.is_empty() {
            return Self::EMPTY;
        }
        let scale = matrix
            .col(0).truncate().length()
            .max(matrix.col(1).truncate().length())
            .max(matrix.col(2).truncate().length());
        Sphere {
            center: matrix.transform_point3(self.center),
            radius: self.radius * scale,
        }
    }

    /// Box enclosing the sphere.
    pub fn to_aabb(&self) -> AABB {
        if self.is_empty() {
            return AABB::EMPTY;
        }
        AABB::from_center_half_extents(self.center, Vec3::splat(self.radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_aabb_reaches_corners() {
        let aabb = AABB::new(Vec3::new(-1.0, -2.0, -2.0), Vec3::new(1.0, 2.0, 2.0));
        let s = Sphere::from_aabb(&aabb);
        assert_eq!(s.center, Vec3::ZERO);
        assert!((s.radius - 3.0).abs() < 1e-6);
        for c in aabb.corners() {
            assert!(s.contains_point(c * 0.9999));
        }
    }

    #[test]
    fn test_from_points_centroid() {
        let s = Sphere::from_points(&[
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
            Vec3::new(0.0, -3.0, 0.0),
        ]);
        assert_eq!(s.center, Vec3::ZERO);
        assert!((s.radius - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_inputs_give_empty_sphere() {
        assert!(Sphere::from_points(&[]).is_empty());
        assert!(Sphere::from_aabb(&AABB::EMPTY).is_empty());
        assert!(!Sphere::EMPTY.contains_point(Vec3::ZERO));
        assert!(Sphere::EMPTY.to_aabb().is_empty());
    }

    #[test]
    fn test_transformed_uses_largest_scale() {
        let s = Sphere::new(Vec3::new(1.0, 0.0, 0.0), 2.0);
        let m = Mat4::from_scale_rotation_translation(
            Vec3::new(1.0, 3.0, 2.0),
            glam::Quat::IDENTITY,
            Vec3::new(0.0, 10.0, 0.0),
        );
        let t = s.transformed(&m);
        assert_eq!(t.center, Vec3::new(1.0, 10.0, 0.0));
        assert!((t.radius - 6.0).abs() < 1e-5);
    }
}
