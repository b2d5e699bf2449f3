use std::path::{Path, PathBuf};

use fontdue::layout::{CoordinateSystem, GlyphPosition, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;

/// Well-known locations of a bold-ish sans font per platform, tried in order
/// when the configuration names none that load.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    "/usr/share/fonts/noto/NotoSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
    "C:\\Windows\\Fonts\\segoeuib.ttf",
];

#[derive(Debug, thiserror::Error)]
pub enum FontLoadError {
    #[error("failed to read font {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid font data: {0}")]
    Parse(String),
}

/// Handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns the loaded fonts. Fonts are immutable once loaded.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TrueType/OpenType font from memory.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError::Parse(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    pub fn load_font_file(&mut self, path: &Path) -> Result<FontId, FontLoadError> {
        let bytes = std::fs::read(path).map_err(|source| FontLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_font(&bytes)
    }

    /// Loads the first font that succeeds from `configured`, then from
    /// [`SYSTEM_FONT_CANDIDATES`]. Failures of configured paths are logged.
    pub fn load_first_available<P: AsRef<Path>>(&mut self, configured: &[P]) -> Option<FontId> {
        for path in configured {
            match self.load_font_file(path.as_ref()) {
                Ok(id) => {
                    log::info!("loaded font {}", path.as_ref().display());
                    return Some(id);
                }
                Err(e) => log::warn!("{e}"),
            }
        }

        for path in SYSTEM_FONT_CANDIDATES {
            let path = Path::new(path);
            if !path.exists() {
                continue;
            }
            match self.load_font_file(path) {
                Ok(id) => {
                    log::info!("loaded system font {}", path.display());
                    return Some(id);
                }
                Err(e) => log::debug!("{e}"),
            }
        }

        None
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Lays out `text` at `size` px with a top-left origin.
    pub(crate) fn layout(&self, text: &str, id: FontId, size: f32, max_width: Option<f32>) -> Vec<GlyphPosition> {
        let Some(font) = self.get(id) else {
            return Vec::new();
        };
        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings { max_width, ..LayoutSettings::default() });
        layout.append(&[font], &TextStyle::new(text, size, 0));
        layout.glyphs().clone()
    }

    /// Size of the laid-out text block in pixels.
    ///
    /// Width uses the pen position after each glyph (advance), not the ink
    /// extent, so a measured width fed back as `max_width` never wraps.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32, max_width: Option<f32>) -> Vec2 {
        let line_height = self
            .get(id)
            .and_then(|f| f.horizontal_line_metrics(size))
            .map(|m| m.new_line_size)
            .unwrap_or(size * 1.2);

        let Some(font) = self.get(id) else {
            return Vec2::new(0.0, line_height);
        };

        let glyphs = self.layout(text, id, size, max_width);
        if glyphs.is_empty() {
            return Vec2::new(0.0, line_height);
        }

        let w = glyphs
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        let h = glyphs
            .iter()
            .map(|g| g.y + g.height as f32)
            .fold(line_height, f32::max);
        Vec2::new(w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_fail_to_parse() {
        let mut fonts = FontSystem::new();
        assert!(matches!(fonts.load_font(b"not a font"), Err(FontLoadError::Parse(_))));
        assert!(fonts.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut fonts = FontSystem::new();
        let err = fonts.load_font_file(Path::new("/nonexistent/deck3d/font.ttf")).unwrap_err();
        assert!(matches!(err, FontLoadError::Io { .. }));
        assert!(err.to_string().contains("font.ttf"));
    }

    #[test]
    fn measuring_with_unknown_font_returns_line_height_only() {
        let fonts = FontSystem::new();
        let size = fonts.measure_text("A♠", FontId(3), 20.0, None);
        assert_eq!(size.x, 0.0);
        assert!((size.y - 24.0).abs() < 1e-6);
    }
}
