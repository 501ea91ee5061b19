//! Wave height field: three summed travelling waves.
//!
//! Pure functions of (local position, time, parameters). Evaluated on the CPU
//! once per vertex per frame; the result is uploaded with the mesh.

use crate::params::WaveParams;

/// Primary wave: crossed sine/cosine swell, weight `weights[0]`
pub fn primary_term(x: f32, y: f32, time_s: f32, p: &WaveParams) -> f32 {
    let ts = time_s * p.speed;
    (x * p.primary_frequency.x + ts * p.primary_phase_speed.x).sin()
        * (y * p.primary_frequency.y + ts * p.primary_phase_speed.y).cos()
        * p.height
        * p.weights[0]
}

/// Secondary wave: diagonal swell, weight `weights[1]`
pub fn secondary_term(x: f32, y: f32, time_s: f32, p: &WaveParams) -> f32 {
    let ts = time_s * p.speed;
    (x * p.secondary_frequency.x + y * p.secondary_frequency.y + ts * p.secondary_phase_speed)
        .sin()
        * p.height
        * p.weights[1]
}

/// Tertiary wave: short chop along X, weight `weights[2]`
pub fn tertiary_term(x: f32, time_s: f32, p: &WaveParams) -> f32 {
    let ts = time_s * p.speed;
    (x * p.tertiary_frequency + ts * p.tertiary_phase_speed).cos() * p.height * p.weights[2]
}

/// Surface displacement at local `(x, y)`
pub fn surface_height(x: f32, y: f32, time_s: f32, p: &WaveParams) -> f32 {
    primary_term(x, y, time_s, p) + secondary_term(x, y, time_s, p) + tertiary_term(x, time_s, p)
}

/// Map a displacement to a signed elevation in `[-1, 1]`
///
/// Scaled by the primary wave height, so the secondary and tertiary waves can
/// push crests past 1; those saturate. Zero wave height maps everything to 0.
pub fn normalized_elevation(height: f32, p: &WaveParams) -> f32 {
    if !(p.height > 0.0) {
        return 0.0;
    }
    (height / p.height).clamp(-1.0, 1.0)
}

/// Displacement and normalised elevation in one call
pub fn sample(x: f32, y: f32, time_s: f32, p: &WaveParams) -> (f32, f32) {
    let height = surface_height(x, y, time_s, p);
    (height, normalized_elevation(height, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn primary_wave_at_origin_is_zero() {
        let p = WaveParams::default();
        assert_eq!(primary_term(0.0, 0.0, 0.0, &p), 0.0);
    }

    #[test]
    fn primary_wave_peak_at_t0() {
        let p = WaveParams::default();
        // sin(π/2.4 * 1.2) = sin(π/2) = 1, cos(0) = 1
        let peak = primary_term(PI / 2.4, 0.0, 0.0, &p);
        assert!((peak - 0.18).abs() < 1e-6, "peak was {}", peak);
    }

    #[test]
    fn height_is_deterministic() {
        let p = WaveParams::default();
        for &(x, y, t) in &[(0.3, -2.0, 0.0), (6.9, 6.9, 12.5), (-7.0, 1.1, 3600.0)] {
            assert_eq!(surface_height(x, y, t, &p), surface_height(x, y, t, &p));
            assert_eq!(sample(x, y, t, &p), sample(x, y, t, &p));
        }
    }

    #[test]
    fn elevation_is_bounded_over_time() {
        let p = WaveParams::default();
        let bound = p.height * p.weights.iter().sum::<f32>();
        for step in 0..200 {
            let t = step as f32 * 0.37;
            for iy in -7..=7 {
                for ix in -7..=7 {
                    let (height, elevation) = sample(ix as f32, iy as f32, t, &p);
                    assert!(height.abs() <= bound + 1e-6);
                    assert!((-1.0..=1.0).contains(&elevation));
                }
            }
        }
    }

    #[test]
    fn elevation_is_scaled_by_wave_height() {
        let p = WaveParams::default();
        assert!((normalized_elevation(0.09, &p) - 0.5).abs() < 1e-6);
        assert!((normalized_elevation(-0.045, &p) + 0.25).abs() < 1e-6);
        assert_eq!(normalized_elevation(p.height, &p), 1.0);
        assert_eq!(normalized_elevation(-p.height, &p), -1.0);
        assert_eq!(normalized_elevation(10.0, &p), 1.0);
    }

    #[test]
    fn stacked_crest_saturates() {
        // 0.18 + 0.0636 - 0.0390 at t = 0, above the primary height
        let p = WaveParams::default();
        let (height, elevation) = sample(PI / 2.4, 0.0, 0.0, &p);
        assert!((height - 0.2047).abs() < 1e-3, "height was {}", height);
        assert_eq!(elevation, 1.0);
    }

    #[test]
    fn flat_configuration_yields_zero_elevation() {
        let p = WaveParams {
            height: 0.0,
            ..WaveParams::default()
        };
        assert_eq!(surface_height(1.0, 2.0, 3.0, &p), 0.0);
        assert_eq!(normalized_elevation(0.0, &p), 0.0);
    }

    #[test]
    fn waves_move_with_time() {
        let p = WaveParams::default();
        let a = surface_height(1.0, 1.0, 0.0, &p);
        let b = surface_height(1.0, 1.0, 1.0, &p);
        assert_ne!(a, b);
    }
}
