/// Premultiplied sRGB color with `f32` channels.
///
/// Invariant: `r`, `g` and `b` never exceed `a`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::from_premul(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::from_premul(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::from_premul(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Straight-alpha components in `[0, 1]`.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Opaque color from `0xRRGGBB`.
    #[inline]
    pub fn from_hex(rgb: u32) -> Self {
        Self::from_srgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 0xff)
    }

    /// Same hue with alpha multiplied by `alpha`.
    #[inline]
    pub fn with_alpha(self, alpha: f32) -> Self {
        let k = alpha.clamp(0.0, 1.0);
        Self::from_premul(self.r * k, self.g * k, self.b * k, self.a * k)
    }

    /// Straight-alpha representation; RGB is zero when `a == 0`.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    /// Straight sRGB channels as bytes.
    pub fn to_srgb_u8(self) -> [u8; 4] {
        let (r, g, b, a) = self.to_straight();
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(r), q(g), q(b), q(a)]
    }

    /// Mixes toward `other` by `t` in premultiplied space.
    #[inline]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color::from_premul(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Linear-light RGB of the straight color, for shader uniforms.
    pub fn to_linear_rgb(self) -> [f32; 3] {
        let (r, g, b, _) = self.to_straight();
        [r, g, b].map(srgb_to_linear)
    }

    pub(crate) fn to_skia(self) -> resvg::tiny_skia::Color {
        let (r, g, b, a) = self.to_straight();
        resvg::tiny_skia::Color::from_rgba(r, g, b, a).unwrap_or(resvg::tiny_skia::Color::TRANSPARENT)
    }
}

#[inline]
pub(crate) fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
