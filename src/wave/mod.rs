//! Wave surface simulation: height field, mesh and shading model.

pub mod field;
mod mesh;
pub mod shading;

// Re-export public types
pub use mesh::{SurfaceMesh, Vertex};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{RenderConfig, SurfaceParams};
    use std::f32::consts::PI;

    /// The presentation config never reaches the simulation: meshes driven by
    /// the same clock are identical whatever the pixel-ratio cap.
    #[test]
    fn pixel_ratio_cap_does_not_change_wave_shape() {
        let params = SurfaceParams::default();
        let sharp = RenderConfig {
            max_pixel_ratio: 3.0,
            ..RenderConfig::default()
        };
        let soft = RenderConfig {
            max_pixel_ratio: 1.0,
            ..RenderConfig::default()
        };
        assert_eq!(sharp.render_size((2560, 1440), 2.0), (2560, 1440));
        assert_eq!(soft.render_size((2560, 1440), 2.0), (1280, 720));

        let mut a = SurfaceMesh::new(&params.geometry);
        let mut b = SurfaceMesh::new(&params.geometry);
        a.update(4.2, &params.waves);
        b.update(4.2, &params.waves);

        assert!(a.heights().eq(b.heights()));
    }

    #[test]
    fn saturated_crest_gets_full_highlight() {
        let params = SurfaceParams::default();
        let (_, elevation) = field::sample(PI / 2.4, 0.0, 0.0, &params.waves);
        let weight = shading::highlight_weight(elevation, &params.shading);
        assert!((weight - params.shading.highlight_mix).abs() < 1e-6);
    }
}
