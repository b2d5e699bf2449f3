use deck3d_engine::coords::{CornerRadii, Rect, Vec2};
use deck3d_engine::paint::{Color, Paint};
use deck3d_engine::scene::{Border, DrawList, ZIndex};
use deck3d_engine::text::{FontId, FontSystem};

use crate::constraints::LayoutCtx;

/// Drawing surface handed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Wraps the engine `DrawList`; every call lands one z step above the
/// previous, so later widgets cover earlier ones. Also carries the pointer
/// state so widgets can paint hover and press visuals without keeping state.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    pub(crate) fonts: &'a FontSystem,
    z: i32,
    pub mouse_pos: Option<Vec2>,
    pub mouse_down: bool,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(draw_list: &'a mut DrawList, fonts: &'a FontSystem, mouse_pos: Option<Vec2>, mouse_down: bool) -> Self {
        Self { draw_list, fonts, z: ZIndex::OVERLAY.0, mouse_pos, mouse_down }
    }

    #[inline]
    pub fn is_hovered(&self, rect: Rect) -> bool {
        self.mouse_pos.is_some_and(|p| rect.contains(p))
    }

    #[inline]
    pub fn is_pressed(&self, rect: Rect) -> bool {
        self.mouse_down && self.is_hovered(rect)
    }

    #[inline]
    pub fn layout_ctx(&self) -> LayoutCtx<'a> {
        LayoutCtx { fonts: self.fonts }
    }

    pub fn fill_rect(&mut self, rect: Rect, paint: impl Into<Paint>) {
        let z = self.next_z();
        self.draw_list.push_rect(z, rect, paint.into());
    }

    /// `radius = 0` gives sharp corners.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, paint: impl Into<Paint>, border: Option<Border>) {
        let z = self.next_z();
        self.draw_list.push_rounded_rect(z, rect, CornerRadii::all(radius), paint.into(), border);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, paint: impl Into<Paint>, border: Option<Border>) {
        let z = self.next_z();
        self.draw_list.push_circle(z, center, radius, paint.into(), border);
    }

    /// Text with its block's top-left at `origin`; wraps at `max_width`.
    pub fn text(&mut self, text: impl Into<String>, font: FontId, size: f32, color: Color, origin: Vec2, max_width: Option<f32>) {
        let z = self.next_z();
        self.draw_list.push_text(z, text, font, size, color, origin, max_width);
    }

    /// Pair with [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: Rect) {
        self.draw_list.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.draw_list.pop_clip();
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck3d_engine::scene::DrawCmd;

    #[test]
    fn later_calls_paint_above_earlier_ones() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        let mut p = Painter::new(&mut list, &fonts, None, false);
        p.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::WHITE);
        p.fill_circle(Vec2::new(2.0, 2.0), 1.0, Color::BLACK, None);

        let sorted = list.sorted();
        assert!(matches!(sorted[0].cmd, DrawCmd::Rect(_)));
        assert!(matches!(sorted[1].cmd, DrawCmd::Circle(_)));
        assert!(sorted[0].key < sorted[1].key);
    }

    #[test]
    fn press_requires_hover() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);

        let p = Painter::new(&mut list, &fonts, Some(Vec2::new(20.0, 5.0)), true);
        assert!(!p.is_hovered(r));
        assert!(!p.is_pressed(r));

        let p = Painter::new(&mut list, &fonts, Some(Vec2::new(5.0, 5.0)), true);
        assert!(p.is_pressed(r));

        let p = Painter::new(&mut list, &fonts, None, false);
        assert!(!p.is_hovered(r));
    }
}
