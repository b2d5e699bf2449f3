//! tiny-skia drawing helpers shared by the card painters.

use std::path::Path as FsPath;

use deck3d_engine::coords::{CornerRadii, Rect, Vec2};
use deck3d_engine::paint::Color;
use deck3d_engine::render::raster::rounded_rect_path;
use deck3d_engine::text::{draw_text, FontId, FontSystem};
use resvg::tiny_skia::{self, FillRule, Mask, Path, Pixmap, PixmapPaint, Stroke, Transform};

use super::TextureError;

pub fn new_pixmap(width: u32, height: u32) -> Result<Pixmap, TextureError> {
    Pixmap::new(width, height).ok_or(TextureError::Alloc { width, height })
}

pub fn skia_color(color: Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_srgb_u8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

fn solid(color: Color) -> tiny_skia::Paint<'static> {
    let mut paint = tiny_skia::Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}

/// Card silhouette: a rounded rect inset from every edge of a `width` x `height` canvas.
pub fn card_outline(width: u32, height: u32, inset: f32, radius: f32) -> Option<Path> {
    let rect = Rect::new(inset, inset, width as f32 - 2.0 * inset, height as f32 - 2.0 * inset);
    rounded_rect_path(rect, CornerRadii::all(radius))
}

pub fn fill(pixmap: &mut Pixmap, path: &Path, color: Color, transform: Transform, mask: Option<&Mask>) {
    pixmap.fill_path(path, &solid(color), FillRule::Winding, transform, mask);
}

pub fn stroke(pixmap: &mut Pixmap, path: &Path, color: Color, width: f32, transform: Transform, mask: Option<&Mask>) {
    let stroke = Stroke { width, ..Stroke::default() };
    pixmap.stroke_path(path, &solid(color), &stroke, transform, mask);
}

/// Mask covering `path`, for clipping later draws to the card shape.
pub fn clip_mask(pixmap: &Pixmap, path: &Path) -> Option<Mask> {
    let mut mask = Mask::new(pixmap.width(), pixmap.height())?;
    mask.fill_path(path, FillRule::Winding, true, Transform::identity());
    Some(mask)
}

/// Text with its top-left at `origin` in the space of `transform`. No-op without a font.
#[allow(clippy::too_many_arguments)]
pub fn label(
    pixmap: &mut Pixmap,
    fonts: &FontSystem,
    font: Option<FontId>,
    text: &str,
    size: f32,
    color: Color,
    origin: Vec2,
    transform: Transform,
) {
    if let Some(font) = font {
        draw_text(pixmap, fonts, text, font, size, color, origin, None, transform, None);
    }
}

/// Width and height of `text`, or zero without a font.
pub fn measure(fonts: &FontSystem, font: Option<FontId>, text: &str, size: f32) -> Vec2 {
    font.map(|f| fonts.measure_text(text, f, size, None)).unwrap_or_else(Vec2::zero)
}

/// Stretches `image` over the whole canvas.
pub fn draw_stretched(pixmap: &mut Pixmap, image: &Pixmap) {
    let sx = pixmap.width() as f32 / image.width() as f32;
    let sy = pixmap.height() as f32 / image.height() as f32;
    let paint = PixmapPaint {
        quality: tiny_skia::FilterQuality::Bicubic,
        ..PixmapPaint::default()
    };
    pixmap.draw_pixmap(0, 0, image.as_ref(), &paint, Transform::from_scale(sx, sy), None);
}

/// Decodes an image file into a premultiplied pixmap of its native size.
pub fn load_image(path: &FsPath) -> Result<Pixmap, TextureError> {
    let rgba = image::open(path)
        .map_err(|source| TextureError::Image { path: path.to_path_buf(), source })?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut pixmap = new_pixmap(width, height)?;
    for (dst, src) in pixmap.data_mut().chunks_exact_mut(4).zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        let premul = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
        dst.copy_from_slice(&[premul(r), premul(g), premul(b), a]);
    }
    Ok(pixmap)
}

/// Straight-alpha RGBA8 image for encoding.
pub fn to_image(pixmap: &Pixmap) -> image::RgbaImage {
    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    // Length always matches the dimensions.
    image::RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
        .unwrap_or_else(|| image::RgbaImage::new(pixmap.width(), pixmap.height()))
}

#[cfg(test)]
pub(crate) mod test_util {
    use resvg::tiny_skia::Pixmap;

    /// Straight RGBA at `(x, y)`.
    pub fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> [u8; 4] {
        let c = pixmap.pixel(x, y).unwrap().demultiply();
        [c.red(), c.green(), c.blue(), c.alpha()]
    }
}
