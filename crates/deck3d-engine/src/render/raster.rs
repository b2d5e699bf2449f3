//! CPU rasterization of a [`DrawList`] with tiny-skia.

use resvg::tiny_skia::{
    self, FillRule, GradientStop, Mask, Path, PathBuilder, Pixmap, Point, Shader, Stroke, Transform,
};

use crate::coords::{CornerRadii, Rect};
use crate::paint::{Paint, SpreadMode};
use crate::scene::{Border, DrawCmd, DrawList};
use crate::text::{self, FontSystem};

/// Cubic control distance for a quarter circle.
const KAPPA: f32 = 0.552_284_75;

/// Path of a rounded rectangle; `None` for empty rects.
pub fn rounded_rect_path(rect: Rect, radii: CornerRadii) -> Option<Path> {
    let r = rect.normalized();
    if r.is_empty() {
        return None;
    }
    let (x, y, w, h) = (r.x(), r.y(), r.width(), r.height());
    if radii.is_zero() {
        return tiny_skia::Rect::from_xywh(x, y, w, h).map(PathBuilder::from_rect);
    }

    let c = radii.fitted(w, h);
    let mut pb = PathBuilder::new();
    pb.move_to(x + c.top_left, y);
    pb.line_to(x + w - c.top_right, y);
    corner(&mut pb, (x + w - c.top_right, y), (x + w, y + c.top_right), (1.0, 0.0), (0.0, -1.0), c.top_right);
    pb.line_to(x + w, y + h - c.bottom_right);
    corner(&mut pb, (x + w, y + h - c.bottom_right), (x + w - c.bottom_right, y + h), (0.0, 1.0), (1.0, 0.0), c.bottom_right);
    pb.line_to(x + c.bottom_left, y + h);
    corner(&mut pb, (x + c.bottom_left, y + h), (x, y + h - c.bottom_left), (-1.0, 0.0), (0.0, 1.0), c.bottom_left);
    pb.line_to(x, y + c.top_left);
    corner(&mut pb, (x, y + c.top_left), (x + c.top_left, y), (0.0, -1.0), (-1.0, 0.0), c.top_left);
    pb.close();
    pb.finish()
}

/// Quarter-circle from `from` to `to`. `d0` is the travel direction at `from`,
/// `d1` the direction pointing back from `to`.
fn corner(pb: &mut PathBuilder, from: (f32, f32), to: (f32, f32), d0: (f32, f32), d1: (f32, f32), r: f32) {
    if r <= 0.0 {
        pb.line_to(to.0, to.1);
        return;
    }
    let k = r * KAPPA;
    pb.cubic_to(
        from.0 + d0.0 * k,
        from.1 + d0.1 * k,
        to.0 + d1.0 * k,
        to.1 + d1.1 * k,
        to.0,
        to.1,
    );
}

/// tiny-skia paint for an engine paint; `None` when the gradient is unusable.
pub fn skia_paint(paint: &Paint) -> Option<tiny_skia::Paint<'static>> {
    let mut out = tiny_skia::Paint { anti_alias: true, ..tiny_skia::Paint::default() };
    match paint {
        Paint::Solid(c) => out.set_color(c.to_skia()),
        Paint::LinearGradient(g) => {
            if !g.is_valid() {
                return None;
            }
            let stops = g
                .stops
                .iter()
                .map(|s| GradientStop::new(s.t, s.color.to_skia()))
                .collect();
            let spread = match g.spread {
                SpreadMode::Pad => tiny_skia::SpreadMode::Pad,
                SpreadMode::Repeat => tiny_skia::SpreadMode::Repeat,
                SpreadMode::Reflect => tiny_skia::SpreadMode::Reflect,
            };
            out.shader = tiny_skia::LinearGradient::new(
                Point::from_xy(g.start.x, g.start.y),
                Point::from_xy(g.end.x, g.end.y),
                stops,
                spread,
                Transform::identity(),
            )?;
        }
    }
    Some(out)
}

fn stroke(pixmap: &mut Pixmap, path: &Path, border: &Border, transform: Transform, mask: Option<&Mask>) {
    if border.width <= 0.0 || border.color.a <= 0.0 {
        return;
    }
    let mut paint = tiny_skia::Paint { anti_alias: true, ..tiny_skia::Paint::default() };
    paint.shader = Shader::SolidColor(border.color.to_skia());
    let stroke = Stroke { width: border.width, ..Stroke::default() };
    pixmap.stroke_path(path, &paint, &stroke, transform, mask);
}

/// Paints every item of `list` into `pixmap` in paint order.
///
/// `scale` maps logical pixels to the pixmap's physical pixels.
pub fn paint_list(pixmap: &mut Pixmap, list: &DrawList, fonts: &FontSystem, scale: f32) {
    let transform = Transform::from_scale(scale, scale);
    let mut masks: Vec<(Rect, Option<Mask>)> = Vec::new();

    for item in list.sorted() {
        let mask = match item.clip_rect {
            None => None,
            Some(clip) if clip.is_empty() => continue,
            Some(clip) => {
                let at = match masks.iter().position(|(r, _)| *r == clip) {
                    Some(i) => i,
                    None => {
                        masks.push((clip, clip_mask(pixmap.width(), pixmap.height(), clip, transform)));
                        masks.len() - 1
                    }
                };
                masks[at].1.as_ref()
            }
        };

        match &item.cmd {
            DrawCmd::Rect(cmd) => {
                let (Some(rect), Some(paint)) = (
                    tiny_skia::Rect::from_xywh(cmd.rect.x(), cmd.rect.y(), cmd.rect.width(), cmd.rect.height()),
                    skia_paint(&cmd.paint),
                ) else {
                    continue;
                };
                pixmap.fill_rect(rect, &paint, transform, mask);
            }
            DrawCmd::RoundedRect(cmd) => {
                let Some(path) = rounded_rect_path(cmd.rect, cmd.radii) else {
                    continue;
                };
                if let Some(paint) = skia_paint(&cmd.paint) {
                    pixmap.fill_path(&path, &paint, FillRule::Winding, transform, mask);
                }
                if let Some(border) = &cmd.border {
                    stroke(pixmap, &path, border, transform, mask);
                }
            }
            DrawCmd::Circle(cmd) => {
                let Some(path) = PathBuilder::from_circle(cmd.center.x, cmd.center.y, cmd.radius) else {
                    continue;
                };
                if let Some(paint) = skia_paint(&cmd.paint) {
                    pixmap.fill_path(&path, &paint, FillRule::Winding, transform, mask);
                }
                if let Some(border) = &cmd.border {
                    stroke(pixmap, &path, border, transform, mask);
                }
            }
            DrawCmd::Text(cmd) => {
                // Rasterize at physical size so glyphs stay crisp on HiDPI.
                let origin = cmd.origin * scale;
                text::draw_text(
                    pixmap,
                    fonts,
                    &cmd.text,
                    cmd.font,
                    cmd.size * scale,
                    cmd.color,
                    origin,
                    cmd.max_width.map(|w| w * scale),
                    Transform::identity(),
                    mask,
                );
            }
        }
    }
}

fn clip_mask(width: u32, height: u32, clip: Rect, transform: Transform) -> Option<Mask> {
    let mut mask = Mask::new(width, height)?;
    let rect = tiny_skia::Rect::from_xywh(clip.x(), clip.y(), clip.width(), clip.height())?;
    mask.fill_path(&PathBuilder::from_rect(rect), FillRule::Winding, true, transform);
    Some(mask)
}

/// Rasterizes `list` into a new transparent pixmap of `width` x `height` physical pixels.
pub fn rasterize(list: &DrawList, fonts: &FontSystem, width: u32, height: u32, scale: f32) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(width.max(1), height.max(1))?;
    paint_list(&mut pixmap, list, fonts, scale);
    Some(pixmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use crate::scene::ZIndex;

    fn pixel(p: &Pixmap, x: u32, y: u32) -> [u8; 4] {
        let c = p.pixel(x, y).unwrap();
        [c.red(), c.green(), c.blue(), c.alpha()]
    }

    #[test]
    fn solid_rect_fills_its_area_only() {
        let mut list = DrawList::new();
        list.push_solid_rect(ZIndex(0), Rect::new(2.0, 2.0, 4.0, 4.0), Color::from_hex(0xff0000));
        let p = rasterize(&list, &FontSystem::new(), 10, 10, 1.0).unwrap();
        assert_eq!(pixel(&p, 3, 3), [255, 0, 0, 255]);
        assert_eq!(pixel(&p, 8, 8), [0, 0, 0, 0]);
    }

    #[test]
    fn scale_maps_logical_to_physical() {
        let mut list = DrawList::new();
        list.push_solid_rect(ZIndex(0), Rect::new(0.0, 0.0, 5.0, 5.0), Color::WHITE);
        let p = rasterize(&list, &FontSystem::new(), 20, 20, 2.0).unwrap();
        assert_eq!(pixel(&p, 9, 9)[3], 255);
        assert_eq!(pixel(&p, 11, 11)[3], 0);
    }

    #[test]
    fn clip_rect_limits_drawing() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 5.0, 10.0));
        list.push_solid_rect(ZIndex(0), Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        list.pop_clip();
        let p = rasterize(&list, &FontSystem::new(), 10, 10, 1.0).unwrap();
        assert_eq!(pixel(&p, 2, 5)[3], 255);
        assert_eq!(pixel(&p, 8, 5)[3], 0);
    }

    #[test]
    fn higher_z_paints_on_top() {
        let mut list = DrawList::new();
        list.push_solid_rect(ZIndex(5), Rect::new(0.0, 0.0, 10.0, 10.0), Color::from_hex(0x00ff00));
        list.push_solid_rect(ZIndex(1), Rect::new(0.0, 0.0, 10.0, 10.0), Color::from_hex(0xff0000));
        let p = rasterize(&list, &FontSystem::new(), 10, 10, 1.0).unwrap();
        assert_eq!(pixel(&p, 5, 5), [0, 255, 0, 255]);
    }

    #[test]
    fn rounded_corners_are_transparent() {
        let path = rounded_rect_path(Rect::new(0.0, 0.0, 40.0, 40.0), CornerRadii::all(12.0)).unwrap();
        let mut p = Pixmap::new(40, 40).unwrap();
        let paint = skia_paint(&Paint::Solid(Color::WHITE)).unwrap();
        p.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        assert_eq!(pixel(&p, 0, 0)[3], 0);
        assert_eq!(pixel(&p, 20, 20)[3], 255);
        assert_eq!(pixel(&p, 20, 1)[3], 255);
    }

    #[test]
    fn empty_rect_has_no_path() {
        assert!(rounded_rect_path(Rect::new(0.0, 0.0, 0.0, 10.0), CornerRadii::all(2.0)).is_none());
    }
}
