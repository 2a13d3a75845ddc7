//! Packed ARGB8888 colours and the helpers shaders use to build them.

pub const WHITE: u32 = 0xFFFFFFFF;
pub const BLACK: u32 = 0xFF000000;
pub const RED: u32 = 0xFFFF0000;
pub const GREEN: u32 = 0xFF00FF00;
pub const BLUE: u32 = 0xFF0000FF;

/// Colour the output buffer is cleared to.
pub const BACKGROUND: u32 = BLACK;
pub const WIREFRAME: u32 = GREEN;

/// Pack float channels in [0.0, 1.0] into ARGB8888. Out of range values are clamped.
#[inline]
pub fn pack_color(r: f32, g: f32, b: f32, a: f32) -> u32 {
    let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
    (to_byte(a) << 24) | (to_byte(r) << 16) | (to_byte(g) << 8) | to_byte(b)
}

/// Unpack the RGB channels of an ARGB8888 colour into [0.0, 1.0].
#[inline]
pub fn unpack_color(color: u32) -> (f32, f32, f32) {
    let [_, r, g, b] = to_argb_bytes(color);
    (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

#[inline]
pub fn from_argb_bytes(a: u8, r: u8, g: u8, b: u8) -> u32 {
    u32::from_be_bytes([a, r, g, b])
}

#[inline]
pub fn to_argb_bytes(color: u32) -> [u8; 4] {
    color.to_be_bytes()
}

#[inline]
pub fn alpha(color: u32) -> u8 {
    to_argb_bytes(color)[0]
}

/// Scale the RGB channels by `intensity`, saturating at 255. Alpha is kept.
#[inline]
pub fn modulate(color: u32, intensity: f32) -> u32 {
    let [a, r, g, b] = to_argb_bytes(color);
    let scale = |c: u8| (c as f32 * intensity).clamp(0.0, 255.0) as u8;
    from_argb_bytes(a, scale(r), scale(g), scale(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_channels() {
        assert_eq!(pack_color(1.0, 0.0, 0.0, 1.0), RED);
        assert_eq!(pack_color(2.0, -1.0, 1.0, 1.0), 0xFFFF00FF);
        assert_eq!(unpack_color(BLUE), (0.0, 0.0, 1.0));
    }

    #[test]
    fn modulate_scales_rgb_and_keeps_alpha() {
        assert_eq!(modulate(WHITE, 0.0), BLACK);
        assert_eq!(modulate(WHITE, 1.0), WHITE);
        assert_eq!(modulate(0x80_C8_64_0A, 0.5), 0x80_64_32_05);
        assert_eq!(modulate(0xFF_C8_00_00, 2.0), 0xFF_FF_00_00);
    }
}
