//! CPU model of the surface fragment shader.
//!
//! Mirrors `fs_main` in `surface.wgsl` line for line so the colour and opacity
//! rules can be checked without a GPU. The noise is a fixed sine-based hash of
//! the lattice coordinate: the same input always yields the same value.

use glam::{Vec2, Vec3};

use crate::params::ShadingParams;

/// Shaded fragment: linear RGB (already vignetted) and opacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub color: Vec3,
    pub alpha: f32,
}

/// Sine hash of a 2D coordinate, in `[0, 1]`
pub fn hash(p: Vec2) -> f32 {
    fract(p.dot(Vec2::new(127.1, 311.7)).sin() * 43758.5453)
}

/// Value noise: Hermite-blended hashes of the four surrounding lattice points
pub fn smooth_noise(p: Vec2) -> f32 {
    let i = p.floor();
    let f = p - i;
    let f = f * f * (Vec2::splat(3.0) - 2.0 * f);

    let a = hash(i);
    let b = hash(i + Vec2::new(1.0, 0.0));
    let c = hash(i + Vec2::new(0.0, 1.0));
    let d = hash(i + Vec2::new(1.0, 1.0));

    mix(mix(a, b, f.x), mix(c, d, f.x), f.y)
}

/// GLSL `smoothstep`
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Two offset noise octaves multiplied together, scrolled over time
pub fn caustic(uv: Vec2, time_s: f32, p: &ShadingParams) -> f32 {
    let caustic_uv = uv * p.caustic_tiling + Vec2::splat(time_s * p.caustic_scroll);
    let first = smooth_noise(caustic_uv);
    let second = smooth_noise(caustic_uv * p.caustic_octave_scale + p.caustic_octave_offset);
    first * second * p.caustic_strength
}

/// Blend weight toward the highlight colour; zero below the band
pub fn highlight_weight(elevation: f32, p: &ShadingParams) -> f32 {
    smoothstep(p.highlight_band.x, p.highlight_band.y, elevation) * p.highlight_mix
}

/// Quadratic vignette at UV distance `radius` from the centre, clamped to `[0, 1]`
pub fn vignette_at_radius(radius: f32, falloff: f32) -> f32 {
    (1.0 - radius * radius * falloff).clamp(0.0, 1.0)
}

pub fn vignette(uv: Vec2, p: &ShadingParams) -> f32 {
    vignette_at_radius((uv - Vec2::splat(0.5)).length(), p.vignette_falloff)
}

/// Shade one fragment
pub fn shade(uv: Vec2, elevation: f32, time_s: f32, p: &ShadingParams) -> Fragment {
    let depth = (elevation + 1.0) * 0.5;
    let base = p.deep_color.lerp(p.shallow_color, depth);

    let color = base + caustic(uv, time_s, p) * p.shallow_color;
    let color = color.lerp(p.highlight_color, highlight_weight(elevation, p));

    let v = vignette(uv, p);
    Fragment {
        color: color * v,
        alpha: p.base_opacity * v * p.damping,
    }
}

/// GLSL `fract` (`x - floor(x)`); unlike `f32::fract` it stays non-negative
fn fract(x: f32) -> f32 {
    x - x.floor()
}
