//! Scene module
//!
//! Renderables, their owning scene, and the spatial indexes used for
//! frustum culling and box queries.

mod bvh;
mod renderable;
mod scene;
mod scene_index;
mod transform;

pub use bvh::{Bvh, BvhConfig};
pub use renderable::{LodMode, Renderable, RenderableFlags, RenderableKey, RenderableKind};
pub use scene::Scene;
pub use scene_index::{LinearIndex, SceneIndex};
pub use transform::Transform;
