//! Colour helpers: `#rrggbb` parsing and sRGB → linear conversion.
//!
//! All shading math runs on linear colours; the render targets are sRGB so the
//! GPU re-encodes on write.

use glam::Vec3;

/// Parse `#rrggbb` (hash optional) into sRGB components in `[0, 1]`.
pub fn hex_to_srgb(hex: &str) -> Option<Vec3> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Vec3::new(r as f32, g as f32, b as f32) / 255.0)
}

/// Parse `#rrggbb` into a linear-light colour.
pub fn hex_to_linear(hex: &str) -> Option<Vec3> {
    hex_to_srgb(hex).map(srgb_to_linear)
}

/// sRGB electro-optical transfer function, per channel.
pub fn srgb_to_linear(c: Vec3) -> Vec3 {
    fn channel(v: f32) -> f32 {
        if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    }
    Vec3::new(channel(c.x), channel(c.y), channel(c.z))
}

/// Linear colour as a wgpu clear colour.
pub fn to_wgpu(c: Vec3) -> wgpu::Color {
    wgpu::Color {
        r: c.x as f64,
        g: c.y as f64,
        b: c.z as f64,
        a: 1.0,
    }
}
