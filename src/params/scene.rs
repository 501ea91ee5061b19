//! Scene placement: camera, surface transform, horizon veil and background.

use glam::{Vec2, Vec3};

use crate::color::hex_to_linear;

/// Fixed perspective camera
#[derive(Debug, Clone)]
pub struct CameraParams {
    /// Eye position (world units)
    pub position: Vec3,

    /// Look-at target (world units)
    pub target: Vec3,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane
    pub near: f32,

    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 3.5, 6.0),
            target: Vec3::ZERO,
            fov_degrees: 55.0,
            near: 0.1,
            far: 40.0,
        }
    }
}

/// How the local surface plane sits in the world
#[derive(Debug, Clone)]
pub struct SurfacePlacement {
    /// Rotation about world X (radians); the plane is authored facing +Z
    pub tilt_radians: f32,

    /// World translation applied after the tilt
    pub offset: Vec3,
}

impl Default for SurfacePlacement {
    fn default() -> Self {
        Self {
            tilt_radians: -std::f32::consts::PI / 2.2, // Nearly flat, leaning toward camera
            offset: Vec3::new(0.0, -0.5, 0.0),
        }
    }
}

/// Translucent quad that darkens the far edge of the surface into the horizon
#[derive(Debug, Clone)]
pub struct VeilParams {
    /// Quad centre (world units)
    pub center: Vec3,

    /// Quad size (width, height) in the world XY plane
    pub size: Vec2,

    /// Linear colour
    pub color: Vec3,

    pub opacity: f32,
}

impl Default for VeilParams {
    fn default() -> Self {
        Self {
            center: Vec3::new(0.0, -0.1, -3.0),
            size: Vec2::new(20.0, 6.0),
            color: hex_to_linear("#06090f").unwrap_or(Vec3::ZERO),
            opacity: 0.45,
        }
    }
}

/// Presentation-side scene description
#[derive(Debug, Clone)]
pub struct SceneParams {
    pub camera: CameraParams,
    pub placement: SurfacePlacement,
    pub veil: VeilParams,

    /// Clear colour behind everything (linear)
    pub background: Vec3,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            camera: CameraParams::default(),
            placement: SurfacePlacement::default(),
            veil: VeilParams::default(),
            background: hex_to_linear("#06090f").unwrap_or(Vec3::ZERO),
        }
    }
}
