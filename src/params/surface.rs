//! Wave surface simulation and shading parameters.

use glam::{Vec2, Vec3};

use crate::color::hex_to_linear;

/// Flat plane that the waves deform
#[derive(Debug, Clone)]
pub struct SurfaceGeometry {
    /// Plane width along local X (world units)
    pub width: f32,

    /// Plane height along local Y (world units)
    pub height: f32,

    /// Subdivisions per side (80 = 6,561 vertices)
    pub segments: usize,
}

impl Default for SurfaceGeometry {
    fn default() -> Self {
        Self {
            width: 14.0,
            height: 14.0,
            segments: 80, // Gentle but not too heavy
        }
    }
}

/// Travelling-wave parameters
///
/// Height at local `(x, y)` and time `t`, with `ts = t * speed`:
/// - primary:   `sin(x*fx + ts*sx) * cos(y*fy + ts*sy) * height * w0`
/// - secondary: `sin(x*fx + y*fy + ts*s) * height * w1`
/// - tertiary:  `cos(x*f + ts*s) * height * w2`
#[derive(Debug, Clone)]
pub struct WaveParams {
    /// Global animation speed multiplier (dimensionless)
    pub speed: f32,

    /// Peak height of the primary wave (world units)
    pub height: f32,

    /// Primary wave spatial frequencies (x, y), radians per unit
    pub primary_frequency: Vec2,

    /// Primary wave phase speeds (x, y), multiplied by `t * speed`
    pub primary_phase_speed: Vec2,

    /// Secondary (diagonal) wave spatial frequencies (x, y)
    pub secondary_frequency: Vec2,

    /// Secondary wave phase speed
    pub secondary_phase_speed: f32,

    /// Tertiary (short chop along X) spatial frequency
    pub tertiary_frequency: f32,

    /// Tertiary wave phase speed
    pub tertiary_phase_speed: f32,

    /// Amplitude weights (primary, secondary, tertiary)
    pub weights: [f32; 3],
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            speed: 0.4,
            height: 0.18,
            primary_frequency: Vec2::new(1.2, 0.9),
            primary_phase_speed: Vec2::new(0.8, 0.5),
            secondary_frequency: Vec2::new(0.6, 0.8),
            secondary_phase_speed: 0.4,
            tertiary_frequency: 2.0,
            tertiary_phase_speed: 1.2,
            weights: [1.0, 0.5, 0.25],
        }
    }
}

/// Fragment shading parameters (colours are linear RGB)
#[derive(Debug, Clone)]
pub struct ShadingParams {
    /// Colour at the lowest troughs (#020a14, very dark navy)
    pub deep_color: Vec3,

    /// Colour at the highest crests (#0c2340, deep ocean blue)
    pub shallow_color: Vec3,

    /// Crest highlight colour (#f59e0b, amber gold)
    pub highlight_color: Vec3,

    /// Opacity before vignette and damping
    pub base_opacity: f32,

    /// Constant multiplier applied to the final opacity
    pub damping: f32,

    /// Maximum blend toward the highlight colour on full crests
    pub highlight_mix: f32,

    /// Elevation band mapped through smoothstep for highlights (lo, hi)
    pub highlight_band: Vec2,

    /// UV multiplier for the caustic pattern
    pub caustic_tiling: f32,

    /// Caustic scroll rate (UV units per second, both axes)
    pub caustic_scroll: f32,

    /// Caustic contribution, scaled by the shallow colour
    pub caustic_strength: f32,

    /// Second noise octave scale
    pub caustic_octave_scale: f32,

    /// Second noise octave offset
    pub caustic_octave_offset: Vec2,

    /// Quadratic vignette falloff: `1 - r² * falloff`
    pub vignette_falloff: f32,
}

impl Default for ShadingParams {
    fn default() -> Self {
        Self {
            deep_color: hex_to_linear("#020a14").unwrap_or(Vec3::ZERO),
            shallow_color: hex_to_linear("#0c2340").unwrap_or(Vec3::ZERO),
            highlight_color: hex_to_linear("#f59e0b").unwrap_or(Vec3::ONE),
            base_opacity: 0.7,
            damping: 0.85,
            highlight_mix: 0.12,
            highlight_band: Vec2::new(0.3, 1.0),
            caustic_tiling: 8.0,
            caustic_scroll: 0.05,
            caustic_strength: 0.15,
            caustic_octave_scale: 1.7,
            caustic_octave_offset: Vec2::new(3.1, 1.7),
            vignette_falloff: 1.5,
        }
    }
}

impl ShadingParams {
    /// Radius (UV distance from centre) where the vignette reaches zero
    pub fn vignette_radius(&self) -> f32 {
        if self.vignette_falloff > 0.0 {
            (1.0 / self.vignette_falloff).sqrt()
        } else {
            f32::INFINITY
        }
    }

    /// Opacity of a fragment at the exact centre of the surface
    pub fn max_opacity(&self) -> f32 {
        self.base_opacity * self.damping
    }
}

/// Everything the simulation needs, fixed for the renderer's lifetime
#[derive(Debug, Clone, Default)]
pub struct SurfaceParams {
    pub geometry: SurfaceGeometry,
    pub waves: WaveParams,
    pub shading: ShadingParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vignette_radius() {
        let shading = ShadingParams::default();
        assert!((shading.vignette_radius() - (1.0f32 / 1.5).sqrt()).abs() < 1e-6);
        assert!((shading.max_opacity() - 0.595).abs() < 1e-6);
    }

    #[test]
    fn default_colours_are_ordered_dark_to_light() {
        let shading = ShadingParams::default();
        assert!(shading.deep_color.length() < shading.shallow_color.length());
        assert!(shading.shallow_color.length() < shading.highlight_color.length());
    }
}
