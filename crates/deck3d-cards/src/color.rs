use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorParseError;

/// 8-bit sRGB color as written in theme definitions (`#rrggbb`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Parses `#rrggbb`, `rrggbb`, `#rgb` or `rgb`.
    pub fn parse_hex(input: &str) -> Result<Self, ColorParseError> {
        let err = |reason| ColorParseError { input: input.to_string(), reason };
        let digits = input.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err("non-hex digit"));
        }

        let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map_err(|_| err("non-hex digit"));
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| err("non-hex digit"));

        match digits.len() {
            6 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?)),
            3 => {
                let (r, g, b) = (nibble(0)?, nibble(1)?, nibble(2)?);
                Ok(Self::new(r * 17, g * 17, b * 17))
            }
            _ => Err(err("expected 3 or 6 hex digits")),
        }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Straight sRGB channels in `[0, 1]`.
    #[inline]
    pub fn to_srgb_f32(self) -> [f32; 3] {
        [self.r as f32 / 255.0, self.g as f32 / 255.0, self.b as f32 / 255.0]
    }

    /// Linear-light channels in `[0, 1]`, for shader uniforms.
    pub fn to_linear(self) -> [f32; 3] {
        self.to_srgb_f32().map(srgb_to_linear)
    }

    /// Returns `(hue in degrees [0, 360), saturation [0, 1], value [0, 1])`.
    pub fn to_hsv(self) -> (f32, f32, f32) {
        let [r, g, b] = self.to_srgb_f32();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let hue = if delta <= f32::EPSILON {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        let sat = if max <= f32::EPSILON { 0.0 } else { delta / max };

        (hue.rem_euclid(360.0), sat, max)
    }

    pub fn from_hsv(hue: f32, sat: f32, val: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = sat.clamp(0.0, 1.0);
        let v = val.clamp(0.0, 1.0);

        let c = v * s;
        let x = c * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let to_u8 = |f: f32| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(to_u8(r), to_u8(g), to_u8(b))
    }
}

/// Color picker state.
///
/// Keeps hue and saturation where an 8-bit color cannot: at zero value every
/// hue maps to black, and at zero saturation every hue maps to a gray.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Hsv {
    /// Degrees in `[0, 360)`.
    pub hue: f32,
    pub sat: f32,
    pub val: f32,
}

impl Hsv {
    pub const fn new(hue: f32, sat: f32, val: f32) -> Self {
        Self { hue, sat, val }
    }

    pub fn to_rgb(self) -> Rgb {
        Rgb::from_hsv(self.hue, self.sat, self.val)
    }
}

impl From<Rgb> for Hsv {
    fn from(c: Rgb) -> Self {
        let (hue, sat, val) = c.to_hsv();
        Self { hue, sat, val }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_hex()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
