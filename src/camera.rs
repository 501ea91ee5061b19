//! Fixed camera and surface placement matrices.

use glam::{Mat4, Vec3};

use crate::params::{CameraParams, SurfacePlacement};

/// Stationary perspective camera looking at the surface
pub struct Camera {
    params: CameraParams,
}

impl Camera {
    pub fn new(params: CameraParams) -> Self {
        Self { params }
    }

    /// View-projection matrix for a target of the given aspect ratio
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        // Always keep Y as up vector (camera never rolls)
        let view = Mat4::look_at_rh(self.params.position, self.params.target, Vec3::Y);
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        let proj = Mat4::perspective_rh(
            self.params.fov_degrees.to_radians(),
            aspect,
            self.params.near,
            self.params.far,
        );
        proj * view
    }
}

/// Local surface plane → world: tilt about X, then translate
pub fn surface_model(placement: &SurfacePlacement) -> Mat4 {
    Mat4::from_translation(placement.offset) * Mat4::from_rotation_x(placement.tilt_radians)
}
