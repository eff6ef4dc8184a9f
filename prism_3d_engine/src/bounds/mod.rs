//! Bounding volumes - axis-aligned boxes and spheres.
//!
//! Pure, allocation-free geometric predicates used by the frustum tests,
//! the BVH and the detail-culling heuristic.

mod aabb;
mod sphere;

pub use aabb::AABB;
pub use sphere::Sphere;
