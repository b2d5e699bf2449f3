use serde::{Deserialize, Serialize};

use crate::color::{Hsv, Rgb};

pub const BLOOM_MIN: f32 = 0.0;
pub const BLOOM_MAX: f32 = 2.0;
pub const BLOOM_STEP: f32 = 0.1;

/// Which of the three theme colors an edit targets.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSlot {
    Border,
    Base,
    Eye,
}

impl ColorSlot {
    /// Panel order.
    pub const ALL: [ColorSlot; 3] = [ColorSlot::Border, ColorSlot::Base, ColorSlot::Eye];

    /// Position in [`ColorSlot::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorSlot::Border => "Skull border",
            ColorSlot::Base => "Skull base",
            ColorSlot::Eye => "Eyes",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub base: Rgb,
    pub border: Rgb,
    pub eye: Rgb,
}

impl ThemeColors {
    pub fn get(&self, slot: ColorSlot) -> Rgb {
        match slot {
            ColorSlot::Base => self.base,
            ColorSlot::Border => self.border,
            ColorSlot::Eye => self.eye,
        }
    }

    /// Picker state for each slot, in [`ColorSlot::ALL`] order.
    pub fn to_hsv(&self) -> [Hsv; 3] {
        ColorSlot::ALL.map(|slot| Hsv::from(self.get(slot)))
    }

    pub fn set(&mut self, slot: ColorSlot, color: Rgb) {
        match slot {
            ColorSlot::Base => self.base = color,
            ColorSlot::Border => self.border = color,
            ColorSlot::Eye => self.eye = color,
        }
    }
}

/// Card-back palette plus glow strength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    #[serde(flatten)]
    pub colors: ThemeColors,
    #[serde(default = "default_bloom")]
    pub bloom: f32,
}

fn default_bloom() -> f32 {
    1.0
}

const PRESETS: [(&str, Rgb, Rgb, Rgb, f32); 4] = [
    ("classic", Rgb::new(0x8b, 0x00, 0x00), Rgb::new(0xff, 0xd7, 0x00), Rgb::new(0xff, 0xff, 0xff), 0.8),
    ("neon", Rgb::new(0xc5, 0x51, 0xf5), Rgb::new(0x41, 0x00, 0xaa), Rgb::new(0x00, 0xbf, 0xff), 1.5),
    ("dark", Rgb::new(0x0a, 0x0a, 0x0a), Rgb::new(0x4b, 0x00, 0x82), Rgb::new(0x94, 0x00, 0xd3), 1.0),
    ("cyberpunk", Rgb::new(0x00, 0xff, 0xd1), Rgb::new(0xff, 0x00, 0x7f), Rgb::new(0xff, 0xea, 0x00), 1.8),
];

impl Theme {
    pub fn new(name: impl Into<String>, colors: ThemeColors, bloom: f32) -> Self {
        Self { name: name.into(), colors, bloom: quantize_bloom(bloom) }
    }

    /// Built-in preset by name (case-insensitive).
    pub fn preset(name: &str) -> Option<Theme> {
        PRESETS
            .iter()
            .find(|(n, ..)| n.eq_ignore_ascii_case(name))
            .map(|&(n, base, border, eye, bloom)| Theme::new(n, ThemeColors { base, border, eye }, bloom))
    }

    /// All built-in presets in display order.
    pub fn presets() -> Vec<Theme> {
        PRESETS
            .iter()
            .map(|&(n, base, border, eye, bloom)| Theme::new(n, ThemeColors { base, border, eye }, bloom))
            .collect()
    }

    pub fn classic() -> Theme {
        let (n, base, border, eye, bloom) = PRESETS[0];
        Theme::new(n, ThemeColors { base, border, eye }, bloom)
    }

    pub fn with_color(mut self, slot: ColorSlot, color: Rgb) -> Self {
        self.colors.set(slot, color);
        self
    }

    pub fn with_bloom(mut self, bloom: f32) -> Self {
        self.bloom = quantize_bloom(bloom);
        self
    }

    /// Normalizes a theme that came from user config.
    pub fn sanitized(self) -> Self {
        let bloom = self.bloom;
        self.with_bloom(bloom)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::classic()
    }
}

/// Clamps to the slider range and snaps to its step. Non-finite input becomes `1.0`.
pub fn quantize_bloom(v: f32) -> f32 {
    if !v.is_finite() {
        return default_bloom();
    }
    let steps = (v.clamp(BLOOM_MIN, BLOOM_MAX) / BLOOM_STEP).round();
    steps * BLOOM_STEP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_in_display_order() {
        let names: Vec<_> = Theme::presets().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["classic", "neon", "dark", "cyberpunk"]);
    }

    #[test]
    fn neon_preset_values() {
        let t = Theme::preset("Neon").unwrap();
        assert_eq!(t.colors.base.to_hex(), "#c551f5");
        assert_eq!(t.colors.border.to_hex(), "#4100aa");
        assert_eq!(t.colors.eye.to_hex(), "#00bfff");
        assert!((t.bloom - 1.5).abs() < 1e-6);
        assert!(Theme::preset("vaporwave").is_none());
    }

    #[test]
    fn default_is_classic() {
        let t = Theme::default();
        assert_eq!(t.name, "classic");
        assert!((t.bloom - 0.8).abs() < 1e-6);
    }

    #[test]
    fn bloom_is_clamped_and_stepped() {
        assert_eq!(quantize_bloom(-1.0), 0.0);
        assert!((quantize_bloom(5.0) - 2.0).abs() < 1e-6);
        assert!((quantize_bloom(1.26) - 1.3).abs() < 1e-6);
        assert_eq!(quantize_bloom(f32::NAN), 1.0);
    }

    #[test]
    fn slots_in_panel_order() {
        for (i, slot) in ColorSlot::ALL.into_iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
        assert_eq!(ColorSlot::Border.label(), "Skull border");

        let hsv = Theme::classic().colors.to_hsv();
        assert_eq!(hsv[ColorSlot::Base.index()].to_rgb(), Rgb::new(0x8b, 0, 0));
        assert_eq!(hsv[ColorSlot::Eye.index()].sat, 0.0);
    }

    #[test]
    fn with_color_keeps_name_and_bloom() {
        let t = Theme::classic().with_color(ColorSlot::Eye, Rgb::new(1, 2, 3));
        assert_eq!(t.name, "classic");
        assert_eq!(t.colors.eye, Rgb::new(1, 2, 3));
        assert_eq!(t.colors.get(ColorSlot::Base), Rgb::new(0x8b, 0, 0));
        assert!((t.bloom - 0.8).abs() < 1e-6);
    }

    #[test]
    fn deserializes_from_toml_table() {
        let src = r##"
            name = "ember"
            base = "#331100"
            border = "#ff6600"
            eye = "#ffcc00"
            bloom = 1.24
        "##;
        let t: Theme = toml::from_str(src).unwrap();
        let t = t.sanitized();
        assert_eq!(t.name, "ember");
        assert_eq!(t.colors.border, Rgb::new(0xff, 0x66, 0x00));
        assert!((t.bloom - 1.2).abs() < 1e-6);
    }

    #[test]
    fn rejects_bad_color_in_toml() {
        let src = r##"
            name = "broken"
            base = "#zz0000"
            border = "#000000"
            eye = "#000000"
        "##;
        assert!(toml::from_str::<Theme>(src).is_err());
    }
}
