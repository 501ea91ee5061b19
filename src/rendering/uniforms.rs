//! Uniform block shared by the surface and veil pipelines.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::params::{SceneParams, ShadingParams};

/// Mirrors `Uniforms` in `surface.wgsl`; every member is 16-byte aligned
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SurfaceUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub deep_color: [f32; 4],
    pub shallow_color: [f32; 4],
    pub highlight_color: [f32; 4],
    pub veil_color: [f32; 4],
    pub veil_center: [f32; 4],
    pub veil_half_extent: [f32; 4],
    pub timing: [f32; 4],
    pub caustic: [f32; 4],
    pub caustic_offset: [f32; 4],
    pub shape: [f32; 4],
}

fn rgb(c: Vec3, w: f32) -> [f32; 4] {
    [c.x, c.y, c.z, w]
}

impl SurfaceUniforms {
    pub fn new(
        view_proj: Mat4,
        model: Mat4,
        time_s: f32,
        shading: &ShadingParams,
        scene: &SceneParams,
    ) -> Self {
        let veil = &scene.veil;
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            deep_color: rgb(shading.deep_color, 1.0),
            shallow_color: rgb(shading.shallow_color, 1.0),
            highlight_color: rgb(shading.highlight_color, 1.0),
            veil_color: rgb(veil.color, veil.opacity),
            veil_center: rgb(veil.center, 0.0),
            veil_half_extent: [veil.size.x / 2.0, veil.size.y / 2.0, 0.0, 0.0],
            timing: [
                time_s,
                shading.base_opacity,
                shading.damping,
                shading.highlight_mix,
            ],
            caustic: [
                shading.caustic_tiling,
                shading.caustic_scroll,
                shading.caustic_strength,
                shading.caustic_octave_scale,
            ],
            caustic_offset: [
                shading.caustic_octave_offset.x,
                shading.caustic_octave_offset.y,
                0.0,
                0.0,
            ],
            shape: [
                shading.vignette_falloff,
                shading.highlight_band.x,
                shading.highlight_band.y,
                0.0,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_wgsl() {
        // 2 matrices + 10 vec4s
        assert_eq!(std::mem::size_of::<SurfaceUniforms>(), 2 * 64 + 10 * 16);
        assert_eq!(std::mem::size_of::<SurfaceUniforms>() % 16, 0);
    }

    #[test]
    fn packs_time_and_shading() {
        let shading = ShadingParams::default();
        let scene = SceneParams::default();
        let u = SurfaceUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, 3.5, &shading, &scene);

        assert_eq!(u.timing, [3.5, 0.7, 0.85, 0.12]);
        assert_eq!(u.caustic, [8.0, 0.05, 0.15, 1.7]);
        assert_eq!(u.caustic_offset[..2], [3.1, 1.7]);
        assert_eq!(u.shape[..3], [1.5, 0.3, 1.0]);
        assert_eq!(u.veil_half_extent[..2], [10.0, 3.0]);
        assert_eq!(u.veil_color[3], 0.45);
        assert_eq!(u.view_proj, Mat4::IDENTITY.to_cols_array_2d());
    }
}
