/// Opaque GPU-side handles and shader variant keys.
///
/// The core never looks inside a handle: the backend allocates them and the
/// render list only compares and forwards them.

use bitflags::bitflags;

/// Compiled shader program owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderHandle(pub u32);

/// Texture owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u32);

/// Uploaded vertex/index data for one mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(pub u32);

/// Material parameters + texture set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialHandle(pub u32);

bitflags! {
    /// Compile-time features of a shader variant.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct ShaderFeatures: u32 {
        const NORMAL_MAPPING   = 1 << 0;
        const PARALLAX_MAPPING = 1 << 1;
        const SHADOWS          = 1 << 2;
        const WIND_ANIMATION   = 1 << 3;
        /// Per-instance model matrices
        const INSTANCED        = 1 << 4;
    }
}

/// A shader program specialized by a feature set. First half of the batch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderVariant {
    pub program: ShaderHandle,
    pub features: ShaderFeatures,
}

impl ShaderVariant {
    pub fn new(program: ShaderHandle, features: ShaderFeatures) -> Self {
        Self { program, features }
    }

    /// Same program with only the features present in `allowed`.
    pub fn restricted_to(&self, allowed: ShaderFeatures) -> Self {
        Self {
            program: self.program,
            features: self.features & allowed,
        }
    }
}
