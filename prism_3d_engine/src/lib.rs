/*!
# Prism 3D Engine

Scene management and the CPU side of a render pipeline: spatial indexing,
frustum culling, LOD selection, draw batching and a fixed-timestep frame loop.

Everything is backend-agnostic. The GPU is reached through the
[`GpuBackend`](prism3d::render::GpuBackend) trait. A recording
[`MockBackend`](prism3d::render::MockBackend) is included for tests and tools.

## Architecture

- **bounds**: AABB and bounding sphere predicates
- **camera**: Camera matrices and the frustum derived from them
- **scene**: Renderables, the BVH and the scene that owns them
- **render**: Culling results, LOD, render list, settings, renderer
- **timing**: Frame timer, fixed timestep, interpolation
- **ecs**: Entities, components and the built-in systems
- **physics**: The physics backend seam
*/

// Internal modules
mod error;
mod engine;
pub mod log;
mod bounds;
mod camera;
mod ecs;
mod physics;
mod render;
mod runtime;
mod scene;
mod timing;

// Main prism3d namespace module
pub mod prism3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton (logger)
    pub use crate::engine::Engine;

    // Frame loop
    pub use crate::runtime::Runtime;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod bounds {
        pub use crate::bounds::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod render {
        pub use crate::render::*;
    }

    pub mod timing {
        pub use crate::timing::*;
    }

    pub mod ecs {
        pub use crate::ecs::*;
    }

    pub mod physics {
        pub use crate::physics::*;
    }
}

// Re-export math library at crate root
pub use glam;
