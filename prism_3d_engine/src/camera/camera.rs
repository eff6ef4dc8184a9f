/// Camera - view/projection state plus the frustum derived from it.
///
/// Unlike a passive container, the camera keeps its frustum coherent:
/// every setter that touches the view or the projection re-extracts the
/// six planes. Owned by the caller (or the `RenderSystem`), never global.

use glam::{Mat4, Vec3};
use super::frustum::{ClipSpace, Frustum};

/// Viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Width / height, or 1.0 for a zero-height viewport.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1280, height: 720 }
    }
}

/// How the projection matrix was produced.
///
/// Parametric projections are rebuilt on resize; `Custom` matrices are
/// left untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective { fov_y: f32, aspect: f32, near: f32, far: f32 },
    Orthographic { half_height: f32, aspect: f32, near: f32, far: f32 },
    Custom,
}

impl Projection {
    fn matrix(&self, clip_space: ClipSpace) -> Option<Mat4> {
        match (*self, clip_space) {
            (Projection::Perspective { fov_y, aspect, near, far }, ClipSpace::OpenGl) => {
                Some(Mat4::perspective_rh_gl(fov_y, aspect, near, far))
            }
            (Projection::Perspective { fov_y, aspect, near, far }, ClipSpace::DirectX) => {
                Some(Mat4::perspective_rh(fov_y, aspect, near, far))
            }
            (Projection::Orthographic { half_height, aspect, near, far }, ClipSpace::OpenGl) => {
                let hw = half_height * aspect;
                Some(Mat4::orthographic_rh_gl(-hw, hw, -half_height, half_height, near, far))
            }
            (Projection::Orthographic { half_height, aspect, near, far }, ClipSpace::DirectX) => {
                let hw = half_height * aspect;
                Some(Mat4::orthographic_rh(-hw, hw, -half_height, half_height, near, far))
            }
            (Projection::Custom, _) => None,
        }
    }

    fn with_aspect(self, new_aspect: f32) -> Self {
        match self {
            Projection::Perspective { fov_y, near, far, .. } => {
                Projection::Perspective { fov_y, aspect: new_aspect, near, far }
            }
            Projection::Orthographic { half_height, near, far, .. } => {
                Projection::Orthographic { half_height, aspect: new_aspect, near, far }
            }
            Projection::Custom => Projection::Custom,
        }
    }
}

/// Camera with an owned, always up-to-date frustum.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    view_matrix: Mat4,
    projection_matrix: Mat4,
    projection: Projection,
    clip_space: ClipSpace,
    frustum: Frustum,
    viewport: Viewport,
}

impl Camera {
    /// Create a camera from explicit matrices (`Projection::Custom`).
    pub fn new(view: Mat4, projection: Mat4, clip_space: ClipSpace) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            view_matrix: view,
            projection_matrix: projection,
            projection: Projection::Custom,
            clip_space,
            frustum: Frustum::from_view_projection(&(projection * view), clip_space),
            viewport: Viewport::default(),
        };
        camera.position = camera.position_from_view();
        camera
    }

    /// Perspective camera at the origin looking down -Z.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32, clip_space: ClipSpace) -> Self {
        let mut camera = Self::new(Mat4::IDENTITY, Mat4::IDENTITY, clip_space);
        camera.set_perspective(fov_y, aspect, near, far);
        camera
    }

    /// Orthographic camera at the origin looking down -Z.
    pub fn orthographic(half_height: f32, aspect: f32, near: f32, far: f32, clip_space: ClipSpace) -> Self {
        let mut camera = Self::new(Mat4::IDENTITY, Mat4::IDENTITY, clip_space);
        camera.set_projection_params(Projection::Orthographic { half_height, aspect, near, far });
        camera
    }

    // ===== GETTERS =====

    /// World-space eye position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    pub fn clip_space(&self) -> ClipSpace {
        self.clip_space
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Unit view direction in world space.
    pub fn forward(&self) -> Vec3 {
        self.view_matrix.inverse().transform_vector3(Vec3::NEG_Z).normalize_or_zero()
    }

    // ===== SETTERS (each one keeps the frustum in sync) =====

    /// Place the camera at `eye` looking toward `target`.
    ///
    /// Ignored when `eye == target` (no defined view direction).
    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.look_to(eye, target - eye, up);
    }

    /// Place the camera at `eye` looking along `direction`.
    pub fn look_to(&mut self, eye: Vec3, direction: Vec3, up: Vec3) {
        if direction.length_squared() <= f32::EPSILON {
            crate::engine_warn!("prism3d::Camera", "Ignoring look_to with a zero direction");
            return;
        }
        self.view_matrix = Mat4::look_to_rh(eye, direction, up);
        self.position = eye;
        self.update_frustum();
    }

    /// Set the view matrix. The eye position is recovered from its inverse.
    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
        self.position = self.position_from_view();
        self.update_frustum();
    }

    /// Set an explicit projection matrix (`Projection::Custom`).
    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection = Projection::Custom;
        self.projection_matrix = matrix;
        self.update_frustum();
    }

    pub fn set_perspective(&mut self, fov_y: f32, aspect: f32, near: f32, far: f32) {
        self.set_projection_params(Projection::Perspective { fov_y, aspect, near, far });
    }

    /// Handle a framebuffer resize: stores the viewport and rebuilds
    /// parametric projections with the new aspect ratio.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport { width, height };
        if height == 0 {
            return;
        }
        let projection = self.projection.with_aspect(self.viewport.aspect_ratio());
        if projection != self.projection {
            self.set_projection_params(projection);
        }
    }

    fn set_projection_params(&mut self, projection: Projection) {
        self.projection = projection;
        if let Some(matrix) = projection.matrix(self.clip_space) {
            self.projection_matrix = matrix;
        }
        self.update_frustum();
    }

    fn position_from_view(&self) -> Vec3 {
        self.view_matrix.inverse().col(3).truncate()
    }

    fn update_frustum(&mut self) {
        self.frustum = Frustum::from_view_projection(&self.view_projection_matrix(), self.clip_space);
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
