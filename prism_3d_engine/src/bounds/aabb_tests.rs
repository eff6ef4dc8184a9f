use glam::{Mat4, Quat, Vec3};
use super::*;

fn make_aabb(min: Vec3, max: Vec3) -> AABB {
    AABB { min, max }
}

fn unit_at(center: Vec3) -> AABB {
    AABB::from_center_half_extents(center, Vec3::ONE)
}

// ============================================================================
// Union
// ============================================================================

#[test]
fn test_union_with_empty_is_identity() {
    let a = make_aabb(Vec3::new(-1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
    assert_eq!(a.union(&AABB::EMPTY), a);
    assert_eq!(AABB::EMPTY.union(&a), a);
}

#[test]
fn test_union_is_commutative_and_associative() {
    let a = unit_at(Vec3::ZERO);
    let b = unit_at(Vec3::new(5.0, -3.0, 1.0));
    let c = make_aabb(Vec3::new(-10.0, 0.0, 0.0), Vec3::new(-9.0, 20.0, 0.5));

    assert_eq!(a.union(&b), b.union(&a));
    assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
}

#[test]
fn test_union_bounds_both_inputs() {
    let a = unit_at(Vec3::ZERO);
    let b = unit_at(Vec3::splat(10.0));
    let u = a.union(&b);
    assert!(u.contains(&a));
    assert!(u.contains(&b));
    assert_eq!(u.min, Vec3::splat(-1.0));
    assert_eq!(u.max, Vec3::splat(11.0));
}

// ============================================================================
// Intersects / contains
// ============================================================================

#[test]
fn test_intersects_overlapping_and_disjoint() {
    let a = make_aabb(Vec3::splat(-2.0), Vec3::splat(2.0));
    let b = make_aabb(Vec3::splat(1.0), Vec3::splat(3.0));
    let c = make_aabb(Vec3::splat(5.0), Vec3::splat(7.0));

    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
    assert!(!a.intersects(&c));
}

#[test]
fn test_touching_faces_do_not_intersect() {
    let a = make_aabb(Vec3::ZERO, Vec3::ONE);
    let b = make_aabb(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
    assert!(!a.intersects(&b));
}

#[test]
fn test_empty_never_intersects() {
    let a = make_aabb(Vec3::splat(-100.0), Vec3::splat(100.0));
    assert!(!a.intersects(&AABB::EMPTY));
    assert!(!AABB::EMPTY.intersects(&a));
}

#[test]
fn test_contains() {
    let big = make_aabb(Vec3::splat(-10.0), Vec3::splat(10.0));
    let small = make_aabb(Vec3::splat(-1.0), Vec3::splat(1.0));
    let straddling = make_aabb(Vec3::splat(5.0), Vec3::splat(15.0));

    assert!(big.contains(&small));
    assert!(!small.contains(&big));
    assert!(!big.contains(&straddling));
    assert!(big.contains(&big));
}

#[test]
fn test_containment_is_transitive() {
    let a = make_aabb(Vec3::splat(-10.0), Vec3::splat(10.0));
    let b = make_aabb(Vec3::splat(-5.0), Vec3::splat(5.0));
    let c = make_aabb(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(1.0, 3.0, 4.0));

    assert!(a.contains(&b));
    assert!(b.contains(&c));
    assert!(a.contains(&c));
}

// ============================================================================
// Derived quantities
// ============================================================================

#[test]
fn test_center_size_half_diagonal() {
    let a = make_aabb(Vec3::new(0.0, 2.0, -4.0), Vec3::new(2.0, 6.0, 4.0));
    assert_eq!(a.center(), Vec3::new(1.0, 4.0, 0.0));
    assert_eq!(a.size(), Vec3::new(2.0, 4.0, 8.0));
    assert_eq!(a.half_diagonal(), Vec3::new(1.0, 2.0, 4.0));
}

#[test]
fn test_longest_axis() {
    assert_eq!(make_aabb(Vec3::ZERO, Vec3::new(5.0, 1.0, 1.0)).longest_axis(), 0);
    assert_eq!(make_aabb(Vec3::ZERO, Vec3::new(1.0, 5.0, 1.0)).longest_axis(), 1);
    assert_eq!(make_aabb(Vec3::ZERO, Vec3::new(1.0, 1.0, 5.0)).longest_axis(), 2);
    assert_eq!(make_aabb(Vec3::ZERO, Vec3::ONE).longest_axis(), 0);
}

#[test]
fn test_corner_bit_indexing() {
    let a = make_aabb(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(a.corner(0), Vec3::ZERO);
    assert_eq!(a.corner(1), Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(a.corner(2), Vec3::new(0.0, 2.0, 0.0));
    assert_eq!(a.corner(4), Vec3::new(0.0, 0.0, 3.0));
    assert_eq!(a.corner(7), Vec3::new(1.0, 2.0, 3.0));

    let corners = a.corners();
    assert_eq!(AABB::from_points(&corners), a);
}

#[test]
fn test_from_points_empty_slice_is_empty() {
    let a = AABB::from_points(&[]);
    assert!(a.is_empty());
    assert_eq!(a, AABB::EMPTY);
}

#[test]
fn test_from_points() {
    let a = AABB::from_points(&[
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(-2.0, 3.0, 0.5),
        Vec3::new(0.0, 0.0, -7.0),
    ]);
    assert_eq!(a.min, Vec3::new(-2.0, -1.0, -7.0));
    assert_eq!(a.max, Vec3::new(1.0, 3.0, 0.5));
    assert!(!a.is_empty());
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn test_transformed_translation() {
    let a = unit_at(Vec3::ZERO);
    let t = a.transformed(&Mat4::from_translation(Vec3::new(10.0, 0.0, -5.0)));
    assert_eq!(t.min, Vec3::new(9.0, -1.0, -6.0));
    assert_eq!(t.max, Vec3::new(11.0, 1.0, -4.0));
}

#[test]
fn test_transformed_rotation_encloses_corners() {
    let a = make_aabb(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0));
    let m = Mat4::from_rotation_translation(
        Quat::from_rotation_y(0.7),
        Vec3::new(3.0, 1.0, 0.0),
    );
    let t = a.transformed(&m);
    for c in a.corners() {
        let p = m.transform_point3(c);
        assert!(t.min.cmple(p + Vec3::splat(1e-4)).all());
        assert!(t.max.cmpge(p - Vec3::splat(1e-4)).all());
    }
}

#[test]
fn test_transformed_empty_stays_empty() {
    let t = AABB::EMPTY.transformed(&Mat4::from_scale(Vec3::splat(2.0)));
    assert!(t.is_empty());
    assert_eq!(t, AABB::EMPTY);
}

// ============================================================================
// Closest point / size heuristic
// ============================================================================

#[test]
fn test_closest_point_and_distance() {
    let a = unit_at(Vec3::ZERO);
    assert_eq!(a.closest_point(Vec3::new(5.0, 0.5, -3.0)), Vec3::new(1.0, 0.5, -1.0));
    assert_eq!(a.distance_squared_to_point(Vec3::new(3.0, 0.0, 0.0)), 4.0);
    assert_eq!(a.distance_squared_to_point(Vec3::ZERO), 0.0);
}

#[test]
fn test_is_large_enough_inside_box() {
    let a = unit_at(Vec3::ZERO);
    assert!(a.is_large_enough(Vec3::new(0.2, 0.1, 0.0), 1.0e9));
}

#[test]
fn test_is_large_enough_far_away() {
    let a = unit_at(Vec3::ZERO);
    // size² = 12, distance² ≈ 1000² → ratio ~1.2e-5
    assert!(!a.is_large_enough(Vec3::new(1001.0, 0.0, 0.0), 1.0e-4));
    assert!(a.is_large_enough(Vec3::new(11.0, 0.0, 0.0), 1.0e-4));
}

#[test]
fn test_is_large_enough_empty() {
    assert!(!AABB::EMPTY.is_large_enough(Vec3::ZERO, 0.0));
}
