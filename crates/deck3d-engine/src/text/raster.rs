use resvg::tiny_skia::{Mask, Pixmap, PixmapPaint, Transform};

use crate::coords::Vec2;
use crate::paint::Color;

use super::{FontId, FontSystem};

/// Renders `text` into a fresh premultiplied pixmap sized to its ink.
///
/// Returns the pixmap and the offset of its top-left corner from the text
/// origin, or `None` when nothing is visible (unknown font, whitespace).
pub fn render_text(
    fonts: &FontSystem,
    text: &str,
    font: FontId,
    size: f32,
    color: Color,
    max_width: Option<f32>,
) -> Option<(Pixmap, Vec2)> {
    let face = fonts.get(font)?;
    let glyphs = fonts.layout(text, font, size, max_width);

    let mut min = (f32::MAX, f32::MAX);
    let mut max = (f32::MIN, f32::MIN);
    for g in glyphs.iter().filter(|g| g.width > 0 && g.height > 0) {
        min = (min.0.min(g.x), min.1.min(g.y));
        max = (max.0.max(g.x + g.width as f32), max.1.max(g.y + g.height as f32));
    }
    if min.0 > max.0 {
        return None;
    }

    let (x0, y0) = (min.0.floor(), min.1.floor());
    let w = (max.0.ceil() - x0).max(1.0) as u32;
    let h = (max.1.ceil() - y0).max(1.0) as u32;
    let mut pixmap = Pixmap::new(w, h)?;

    let [r, g, b, a] = [color.r, color.g, color.b, color.a];
    let stride = w as usize * 4;
    let data = pixmap.data_mut();

    for glyph in glyphs.iter().filter(|g| g.width > 0 && g.height > 0) {
        let (metrics, coverage) = face.rasterize_config(glyph.key);
        let gx = (glyph.x - x0).round() as i64;
        let gy = (glyph.y - y0).round() as i64;

        for row in 0..metrics.height {
            let py = gy + row as i64;
            if py < 0 || py >= h as i64 {
                continue;
            }
            for col in 0..metrics.width {
                let px = gx + col as i64;
                if px < 0 || px >= w as i64 {
                    continue;
                }
                let cov = coverage[row * metrics.width + col] as f32 / 255.0;
                if cov <= 0.0 {
                    continue;
                }
                let i = py as usize * stride + px as usize * 4;
                // Source-over in premultiplied space; glyph boxes can overlap.
                let inv = 1.0 - a * cov;
                for (c, src) in [r, g, b, a].into_iter().enumerate() {
                    let dst = data[i + c] as f32 / 255.0;
                    data[i + c] = ((src * cov + dst * inv).clamp(0.0, 1.0) * 255.0).round() as u8;
                }
            }
        }
    }

    Some((pixmap, Vec2::new(x0, y0)))
}

/// Draws `text` with its block origin at `origin` after applying `transform`.
#[allow(clippy::too_many_arguments)]
pub fn draw_text(
    target: &mut Pixmap,
    fonts: &FontSystem,
    text: &str,
    font: FontId,
    size: f32,
    color: Color,
    origin: Vec2,
    max_width: Option<f32>,
    transform: Transform,
    clip: Option<&Mask>,
) {
    let Some((glyphs, offset)) = render_text(fonts, text, font, size, color, max_width) else {
        return;
    };

    let t = transform.pre_translate(origin.x + offset.x, origin.y + offset.y);
    let paint = PixmapPaint {
        quality: resvg::tiny_skia::FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    target.draw_pixmap(0, 0, glyphs.as_ref(), &paint, t, clip);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_font_renders_nothing() {
        let fonts = FontSystem::new();
        assert!(render_text(&fonts, "K", FontId(0), 32.0, Color::BLACK, None).is_none());
    }
}
