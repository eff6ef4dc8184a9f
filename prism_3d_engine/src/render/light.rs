use glam::Vec3;

/// Sun-style light: parallel rays along `direction`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels (normalized)
    pub direction: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-0.3, -1.0, -0.2).normalize(),
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

impl DirectionalLight {
    /// A zero direction falls back to straight down.
    pub fn new(direction: Vec3, color: Vec3, intensity: f32) -> Self {
        let direction = direction.try_normalize().unwrap_or(Vec3::NEG_Y);
        Self { direction, color, intensity }
    }
}
