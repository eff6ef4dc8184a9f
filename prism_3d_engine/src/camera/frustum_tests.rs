use glam::{Mat4, Vec3};
use crate::bounds::{AABB, Sphere};
use super::*;

/// Camera at (0, 0, 5) looking at the origin, 90° FOV, near 0.1, far 100.
fn looking_at_origin(clip_space: ClipSpace) -> Frustum {
    let projection = match clip_space {
        ClipSpace::OpenGl => Mat4::perspective_rh_gl(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0),
        ClipSpace::DirectX => Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0),
    };
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    Frustum::from_view_projection(&(projection * view), clip_space)
}

fn unit_box(center: Vec3) -> AABB {
    AABB::from_center_half_extents(center, Vec3::splat(0.5))
}

// ============================================================================
// Plane extraction
// ============================================================================

#[test]
fn test_planes_are_normalized() {
    for clip in [ClipSpace::OpenGl, ClipSpace::DirectX] {
        let frustum = looking_at_origin(clip);
        for plane in &frustum.planes {
            assert!((plane.normal.length() - 1.0).abs() < 1e-4, "plane normal should be unit length");
        }
    }
}

#[test]
fn test_near_and_far_planes_match_projection() {
    for clip in [ClipSpace::OpenGl, ClipSpace::DirectX] {
        let frustum = looking_at_origin(clip);
        // Eye at z=5 looking down -Z: near plane at z=4.9, far plane at z=-95
        let near = &frustum.planes[PLANE_NEAR];
        let far = &frustum.planes[PLANE_FAR];
        assert!(near.signed_distance(Vec3::new(0.0, 0.0, 4.95)) < 0.0, "{:?}", clip);
        assert!(near.signed_distance(Vec3::new(0.0, 0.0, 4.85)) > 0.0, "{:?}", clip);
        assert!(far.signed_distance(Vec3::new(0.0, 0.0, -94.0)) > 0.0, "{:?}", clip);
        assert!(far.signed_distance(Vec3::new(0.0, 0.0, -96.0)) < 0.0, "{:?}", clip);
    }
}

#[test]
fn test_orthographic_box_planes() {
    let projection = Mat4::orthographic_rh_gl(-10.0, 10.0, -10.0, 10.0, 0.1, 100.0);
    let frustum = Frustum::from_view_projection(&projection, ClipSpace::OpenGl);
    assert!(frustum.contains_point(Vec3::new(9.0, -9.0, -50.0)));
    assert!(!frustum.contains_point(Vec3::new(11.0, 0.0, -50.0)));
    assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 1.0)));
}

// ============================================================================
// Plane classification
// ============================================================================

#[test]
fn test_plane_classify_aabb_three_ways() {
    let plane = Plane { normal: Vec3::X, d: 0.0 }; // inside is x >= 0
    assert_eq!(plane.classify_aabb(&unit_box(Vec3::new(5.0, 0.0, 0.0))), FrustumTest::Inside);
    assert_eq!(plane.classify_aabb(&unit_box(Vec3::new(-5.0, 0.0, 0.0))), FrustumTest::Outside);
    assert_eq!(plane.classify_aabb(&unit_box(Vec3::ZERO)), FrustumTest::Intersecting);
}

#[test]
fn test_plane_classify_sphere_three_ways() {
    let plane = Plane { normal: Vec3::Y, d: -2.0 }; // inside is y >= 2
    assert_eq!(plane.classify_sphere(&Sphere::new(Vec3::new(0.0, 10.0, 0.0), 1.0)), FrustumTest::Inside);
    assert_eq!(plane.classify_sphere(&Sphere::new(Vec3::ZERO, 1.0)), FrustumTest::Outside);
    assert_eq!(plane.classify_sphere(&Sphere::new(Vec3::new(0.0, 2.5, 0.0), 1.0)), FrustumTest::Intersecting);
}

#[test]
fn test_plane_from_zero_coefficients_does_not_produce_nan() {
    let plane = Plane::from_coefficients(glam::Vec4::ZERO);
    assert!(!plane.normal.is_nan());
    assert!(!plane.d.is_nan());
}

// ============================================================================
// Frustum classification
// ============================================================================

#[test]
fn test_aabb_inside_frustum() {
    let frustum = looking_at_origin(ClipSpace::OpenGl);
    assert_eq!(frustum.classify_aabb(&unit_box(Vec3::ZERO)), FrustumTest::Inside);
    assert!(frustum.intersects_aabb(&unit_box(Vec3::ZERO)));
}

#[test]
fn test_aabb_behind_camera_is_outside() {
    let frustum = looking_at_origin(ClipSpace::OpenGl);
    assert_eq!(frustum.classify_aabb(&unit_box(Vec3::new(0.0, 0.0, 10.0))), FrustumTest::Outside);
}

#[test]
fn test_aabb_beyond_far_is_outside() {
    let frustum = looking_at_origin(ClipSpace::DirectX);
    assert_eq!(frustum.classify_aabb(&unit_box(Vec3::new(0.0, 0.0, -200.0))), FrustumTest::Outside);
}

#[test]
fn test_aabb_straddling_side_plane_is_intersecting() {
    let frustum = looking_at_origin(ClipSpace::OpenGl);
    // 90° FOV at distance 5 → half-width 5; a box centered on x=5 straddles the right plane
    let aabb = AABB::from_center_half_extents(Vec3::new(5.0, 0.0, 0.0), Vec3::splat(1.0));
    assert_eq!(frustum.classify_aabb(&aabb), FrustumTest::Intersecting);
}

#[test]
fn test_huge_aabb_enclosing_frustum_is_intersecting() {
    let frustum = looking_at_origin(ClipSpace::OpenGl);
    let aabb = AABB::from_center_half_extents(Vec3::ZERO, Vec3::splat(1000.0));
    assert_eq!(frustum.classify_aabb(&aabb), FrustumTest::Intersecting);
}

#[test]
fn test_empty_aabb_is_outside() {
    let frustum = looking_at_origin(ClipSpace::OpenGl);
    assert_eq!(frustum.classify_aabb(&AABB::EMPTY), FrustumTest::Outside);
    assert_eq!(frustum.classify_sphere(&Sphere::EMPTY), FrustumTest::Outside);
}

#[test]
fn test_sphere_classification() {
    let frustum = looking_at_origin(ClipSpace::OpenGl);
    assert_eq!(frustum.classify_sphere(&Sphere::new(Vec3::ZERO, 0.5)), FrustumTest::Inside);
    assert_eq!(frustum.classify_sphere(&Sphere::new(Vec3::new(0.0, 0.0, 20.0), 1.0)), FrustumTest::Outside);
}

/// Soundness: a box whose center is inside the frustum is never OUTSIDE,
/// and a box fully outside one plane always is.
#[test]
fn test_classification_has_no_false_negatives_on_grid() {
    let frustum = looking_at_origin(ClipSpace::OpenGl);
    for x in -20..=20 {
        for z in -30..=10 {
            let center = Vec3::new(x as f32 * 2.0, 0.0, z as f32 * 2.0);
            let aabb = unit_box(center);
            let class = frustum.classify_aabb(&aabb);
            if frustum.contains_point(center) {
                assert_ne!(class, FrustumTest::Outside, "center {:?} visible but culled", center);
            }
            let fully_outside_one_plane = frustum.planes.iter().any(|plane| {
                aabb.corners().iter().all(|&c| plane.signed_distance(c) < -1e-3)
            });
            if fully_outside_one_plane {
                assert_eq!(class, FrustumTest::Outside, "box at {:?} should be outside", center);
            }
        }
    }
}
