//! RGBA colors and their packed native form.

/// A color with an alpha component.
///
/// Values are stored as `f32`s in the range `[0.0, 1.0]`. The native widget
/// toolkit takes colors as packed `0xAARRGGBB` integers, see
/// [`Color::to_argb`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque blue.
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

    /// Creates a new `Color` from four `f32` values (red, green, blue, alpha).
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new `Color` from four `u8` values (red, green, blue, alpha).
    #[inline]
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Unpacks a `0xAARRGGBB` value.
    pub fn from_argb(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self::from_rgba_u8(r, g, b, a)
    }

    /// Packs the color as `0xAARRGGBB`, reinterpreted as the signed integer
    /// the native toolkit expects.
    pub fn to_argb(self) -> i32 {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        u32::from_be_bytes([
            channel(self.a),
            channel(self.r),
            channel(self.g),
            channel(self.b),
        ]) as i32
    }
}

/// The default color is fully transparent.
impl Default for Color {
    #[inline]
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl From<[u8; 4]> for Color {
    #[inline]
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::from_rgba_u8(r, g, b, a)
    }
}
