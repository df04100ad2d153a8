//! ARGB8888 color constants and packing helpers.

pub const BACKGROUND: u32 = 0xFF1E1E1E;
pub const FILL: u32 = 0xFFE0A030;
pub const MAGENTA: u32 = 0xFFFF00FF;

#[inline]
pub const fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

#[inline]
pub const fn unpack_argb(color: u32) -> (u8, u8, u8, u8) {
    (
        (color >> 24) as u8,
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
    )
}

/// Scales the RGB channels of `color` by `intensity` (clamped to [0, 1]),
/// keeping alpha.
pub fn shade(color: u32, intensity: f32) -> u32 {
    let k = intensity.clamp(0.0, 1.0);
    let (a, r, g, b) = unpack_argb(color);
    let scale = |c: u8| (c as f32 * k).round() as u8;
    pack_argb(a, scale(r), scale(g), scale(b))
}
