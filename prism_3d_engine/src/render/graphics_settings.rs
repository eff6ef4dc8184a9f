/// Graphics settings: plain configuration read at batch-build time.
///
/// Changes are applied by value. `GraphicsSettings::diff` turns an old/new
/// pair into explicit `SettingsChange` events that systems and the backend
/// process synchronously.

use crate::error::{Error, Result};
use super::handles::ShaderFeatures;

/// Smallest accepted shadow map edge
pub const MIN_SHADOW_MAP_SIZE: u32 = 256;
/// Largest accepted shadow map edge
pub const MAX_SHADOW_MAP_SIZE: u32 = 16384;
pub const MAX_ANISOTROPY: u32 = 16;

/// How draw items are grouped into batches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BatchSortMode {
    /// Group by shader variant only
    ShaderOnly,
    /// Group by shader variant, then by material
    #[default]
    ShaderThenMaterial,
}

/// Graphics configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicsSettings {
    pub normal_mapping: bool,
    pub parallax_mapping: bool,
    pub shadows: bool,
    /// Shadow map edge in texels (power of two)
    pub shadow_map_size: u32,
    pub wind_animations: bool,
    /// Anisotropic filtering level (1 = off)
    pub anisotropy: u32,
    /// Drop objects whose projected size ratio is at or below the threshold
    pub detail_culling: bool,
    pub detail_culling_threshold: f32,
    /// Interpolate the camera between simulation steps
    pub camera_lerping: bool,
    pub batch_sort_mode: BatchSortMode,
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self {
            normal_mapping: true,
            parallax_mapping: false,
            shadows: true,
            shadow_map_size: 2048,
            wind_animations: true,
            anisotropy: 4,
            detail_culling: true,
            detail_culling_threshold: 0.0001,
            camera_lerping: true,
            batch_sort_mode: BatchSortMode::default(),
        }
    }
}

/// One changed option, carrying its new value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingsChange {
    NormalMapping(bool),
    ParallaxMapping(bool),
    Shadows(bool),
    ShadowMapSize(u32),
    WindAnimations(bool),
    Anisotropy(u32),
    DetailCulling(bool),
    DetailCullingThreshold(f32),
    CameraLerping(bool),
    BatchSortMode(BatchSortMode),
}

impl SettingsChange {
    /// True if shader variants derived from the settings are affected
    pub fn affects_shader_features(&self) -> bool {
        matches!(
            self,
            SettingsChange::NormalMapping(_)
                | SettingsChange::ParallaxMapping(_)
                | SettingsChange::Shadows(_)
                | SettingsChange::WindAnimations(_)
        )
    }
}

impl GraphicsSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.shadow_map_size.is_power_of_two()
            || !(MIN_SHADOW_MAP_SIZE..=MAX_SHADOW_MAP_SIZE).contains(&self.shadow_map_size)
        {
            return Err(Error::InvalidConfig(format!(
                "shadow_map_size must be a power of two in [{}, {}], got {}",
                MIN_SHADOW_MAP_SIZE, MAX_SHADOW_MAP_SIZE, self.shadow_map_size
            )));
        }
        if !(1..=MAX_ANISOTROPY).contains(&self.anisotropy) {
            return Err(Error::InvalidConfig(format!(
                "anisotropy must be in [1, {}], got {}",
                MAX_ANISOTROPY, self.anisotropy
            )));
        }
        if !(self.detail_culling_threshold.is_finite() && self.detail_culling_threshold >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "detail_culling_threshold must be finite and non-negative, got {}",
                self.detail_culling_threshold
            )));
        }
        Ok(())
    }

    /// Changes needed to go from `old` to `new`, in field declaration order.
    pub fn diff(old: &GraphicsSettings, new: &GraphicsSettings) -> Vec<SettingsChange> {
        let mut changes = Vec::new();
        if old.normal_mapping != new.normal_mapping {
            changes.push(SettingsChange::NormalMapping(new.normal_mapping));
        }
        if old.parallax_mapping != new.parallax_mapping {
            changes.push(SettingsChange::ParallaxMapping(new.parallax_mapping));
        }
        if old.shadows != new.shadows {
            changes.push(SettingsChange::Shadows(new.shadows));
        }
        if old.shadow_map_size != new.shadow_map_size {
            changes.push(SettingsChange::ShadowMapSize(new.shadow_map_size));
        }
        if old.wind_animations != new.wind_animations {
            changes.push(SettingsChange::WindAnimations(new.wind_animations));
        }
        if old.anisotropy != new.anisotropy {
            changes.push(SettingsChange::Anisotropy(new.anisotropy));
        }
        if old.detail_culling != new.detail_culling {
            changes.push(SettingsChange::DetailCulling(new.detail_culling));
        }
        if old.detail_culling_threshold != new.detail_culling_threshold {
            changes.push(SettingsChange::DetailCullingThreshold(new.detail_culling_threshold));
        }
        if old.camera_lerping != new.camera_lerping {
            changes.push(SettingsChange::CameraLerping(new.camera_lerping));
        }
        if old.batch_sort_mode != new.batch_sort_mode {
            changes.push(SettingsChange::BatchSortMode(new.batch_sort_mode));
        }
        changes
    }

    /// Features a shader variant may keep under these settings.
    pub fn shader_features(&self) -> ShaderFeatures {
        let mut features = ShaderFeatures::INSTANCED;
        features.set(ShaderFeatures::NORMAL_MAPPING, self.normal_mapping);
        // parallax needs the normal map
        features.set(ShaderFeatures::PARALLAX_MAPPING, self.normal_mapping && self.parallax_mapping);
        features.set(ShaderFeatures::SHADOWS, self.shadows);
        features.set(ShaderFeatures::WIND_ANIMATION, self.wind_animations);
        features
    }
}

#[cfg(test)]
#[path = "graphics_settings_tests.rs"]
mod tests;
