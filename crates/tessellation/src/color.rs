//! Packed RGBA colors.

use bytemuck::{Pod, Zeroable};

/// An 8-bit per channel RGBA color packed in a `u32`.
///
/// Red is stored in the lowest byte and alpha in the highest (ABGR when read
/// as a number), which is the byte order of an `RGBA8888` vertex attribute on
/// little-endian machines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color::from_bytes(255, 255, 255, 255);
    pub const BLACK: Color = Color::from_bytes(0, 0, 0, 255);
    pub const TRANSPARENT: Color = Color::from_bytes(0, 0, 0, 0);

    #[inline]
    pub const fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color((a as u32) << 24 | (b as u32) << 16 | (g as u32) << 8 | r as u32)
    }

    /// Components are clamped to `[0, 1]`.
    #[inline]
    pub fn from_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color::from_bytes(to_byte(r), to_byte(g), to_byte(b), to_byte(a))
    }

    #[inline]
    pub const fn r(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn to_f32_array(self) -> [f32; 4] {
        [
            self.r() as f32 / 255.0,
            self.g() as f32 / 255.0,
            self.b() as f32 / 255.0,
            self.a() as f32 / 255.0,
        ]
    }

    #[inline]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color(self.0 & 0x00FF_FFFF | (to_byte(alpha) as u32) << 24)
    }

    /// Linear interpolation of each channel, `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let a = self.to_f32_array();
        let b = other.to_f32_array();
        let mix = |i: usize| a[i] + (b[i] - a[i]) * t;
        Color::from_f32(mix(0), mix(1), mix(2), mix(3))
    }

    /// Reinterprets the packed bits as a float, to be stored next to
    /// coordinates in a float buffer.
    #[inline]
    pub fn to_f32_bits(self) -> f32 {
        f32::from_bits(self.0)
    }

    #[inline]
    pub fn from_f32_bits(bits: f32) -> Self {
        Color(bits.to_bits())
    }
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// An opaque color from its red, green and blue components in `[0, 1]`.
#[inline]
pub fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::from_f32(r, g, b, 1.0)
}

#[inline]
pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color {
    Color::from_f32(r, g, b, a)
}

#[inline]
pub fn gray(value: f32) -> Color {
    Color::from_f32(value, value, value, 1.0)
}

/// A color from hue, saturation and brightness.
///
/// The hue wraps around, `0.0`, `1.0` and `2.0` are all red. Saturation,
/// brightness and alpha are clamped to `[0, 1]`.
pub fn hsb(hue: f32, saturation: f32, brightness: f32, alpha: f32) -> Color {
    let s = saturation.clamp(0.0, 1.0);
    let v = brightness.clamp(0.0, 1.0);

    if s == 0.0 {
        return Color::from_f32(v, v, v, alpha);
    }

    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match h as u32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Color::from_f32(r, g, b, alpha)
}

#[test]
fn packing() {
    let c = Color::from_bytes(1, 2, 3, 4);
    assert_eq!(c.0, 0x04030201);
    assert_eq!((c.r(), c.g(), c.b(), c.a()), (1, 2, 3, 4));
    assert_eq!(Color::WHITE.0, 0xFFFF_FFFF);
    assert_eq!(Color::BLACK.0, 0xFF00_0000);
    assert_eq!(rgb(2.0, -1.0, 1.0), Color::from_bytes(255, 0, 255, 255));
}

#[test]
fn float_bits_round_trip() {
    for c in [Color::WHITE, Color::BLACK, Color::TRANSPARENT, rgba(0.2, 0.4, 0.6, 0.8)] {
        assert_eq!(Color::from_f32_bits(c.to_f32_bits()), c);
    }
}

#[test]
fn hue_wheel() {
    assert_eq!(hsb(0.0, 1.0, 1.0, 1.0), rgb(1.0, 0.0, 0.0));
    assert_eq!(hsb(1.0 / 3.0, 1.0, 1.0, 1.0), rgb(0.0, 1.0, 0.0));
    assert_eq!(hsb(2.0 / 3.0, 1.0, 1.0, 1.0), rgb(0.0, 0.0, 1.0));
    assert_eq!(hsb(1.0, 1.0, 1.0, 1.0), hsb(0.0, 1.0, 1.0, 1.0));
    assert_eq!(hsb(0.5, 0.0, 0.5, 1.0), gray(0.5));
}

#[test]
fn interpolation() {
    assert_eq!(Color::BLACK.lerp(Color::WHITE, 0.0), Color::BLACK);
    assert_eq!(Color::BLACK.lerp(Color::WHITE, 1.0), Color::WHITE);
    assert_eq!(Color::BLACK.lerp(Color::WHITE, 0.5), gray(0.5));
    assert_eq!(Color::WHITE.with_alpha(0.0).a(), 0);
}
