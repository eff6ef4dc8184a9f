//! Camera module - camera state and its view frustum.
//!
//! The camera owns its frustum and recomputes it whenever the view or the
//! projection changes, so culling always sees planes that match the matrices.

mod camera;
mod frustum;

pub use camera::{Camera, Projection, Viewport};
pub use frustum::{
    ClipSpace, Frustum, FrustumTest, Plane,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
