use deck3d_cards::{Hsv, Rgb};
use deck3d_engine::coords::{Rect, Vec2};
use deck3d_engine::paint::{Color, ColorStop, LinearGradient, Paint, SpreadMode};
use deck3d_engine::scene::Border;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;

const BAR_HEIGHT: f32 = 14.0;
const GAP: f32 = 6.0;
const HEIGHT: f32 = BAR_HEIGHT * 2.0 + GAP;

/// Swatch plus a hue bar and a value (brightness) bar.
///
/// The tree is rebuilt every frame, so the owner keeps the [`Hsv`] state and
/// passes back what the callbacks reported. Rebuilding from an `Rgb` instead
/// would lose hue and saturation once the value reaches zero.
///
/// Saturation is kept from the initial state; picking a hue on a gray or
/// black color raises saturation and value so the choice is visible.
pub struct ColorPicker {
    hsv: Hsv,
    on_drag: Option<Box<dyn FnMut(Hsv)>>,
    on_change: Option<Box<dyn FnMut(Hsv)>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Parts {
    swatch: Rect,
    hue: Rect,
    value: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bar {
    Hue,
    Value,
}

fn to_color(c: Rgb) -> Color {
    Color::from_srgb_u8(c.r, c.g, c.b, 255)
}

impl ColorPicker {
    pub fn new(hsv: Hsv) -> Self {
        Self { hsv, on_drag: None, on_change: None }
    }

    pub fn from_rgb(color: Rgb) -> Self {
        Self::new(Hsv::from(color))
    }

    /// Called on every drag step, including the final one.
    pub fn on_drag(mut self, f: impl FnMut(Hsv) + 'static) -> Self {
        self.on_drag = Some(Box::new(f));
        self
    }

    /// Called once when the drag is released.
    pub fn on_change(mut self, f: impl FnMut(Hsv) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn hsv(&self) -> Hsv {
        self.hsv
    }

    pub fn color(&self) -> Rgb {
        self.hsv.to_rgb()
    }

    fn parts(rect: Rect) -> Parts {
        let side = rect.size.y.min(rect.size.x);
        let bars_x = rect.origin.x + side + 8.0;
        let bars_w = (rect.origin.x + rect.size.x - bars_x).max(0.0);
        Parts {
            swatch: Rect::new(rect.origin.x, rect.origin.y, side, side),
            hue: Rect::new(bars_x, rect.origin.y, bars_w, BAR_HEIGHT),
            value: Rect::new(bars_x, rect.origin.y + BAR_HEIGHT + GAP, bars_w, BAR_HEIGHT),
        }
    }

    fn bar_at(parts: &Parts, p: Vec2) -> Option<Bar> {
        if parts.hue.contains(p) {
            Some(Bar::Hue)
        } else if parts.value.contains(p) {
            Some(Bar::Value)
        } else {
            None
        }
    }

    fn pick(&mut self, bar: Bar, t: f32) {
        let t = t.clamp(0.0, 1.0);
        match bar {
            Bar::Hue => {
                self.hsv.hue = t * 360.0;
                if self.hsv.sat <= 0.0 {
                    self.hsv.sat = 1.0;
                }
                if self.hsv.val <= 0.0 {
                    self.hsv.val = 1.0;
                }
            }
            Bar::Value => self.hsv.val = t,
        }
    }

    fn hue_gradient(bar: Rect) -> Paint {
        let stops = (0..=6)
            .map(|i| {
                let t = i as f32 / 6.0;
                ColorStop { t, color: to_color(Rgb::from_hsv(t * 360.0, 1.0, 1.0)) }
            })
            .collect();
        let y = bar.center().y;
        Paint::LinearGradient(LinearGradient::new(
            Vec2::new(bar.origin.x, y),
            Vec2::new(bar.origin.x + bar.size.x, y),
            stops,
            SpreadMode::Pad,
        ))
    }

    fn value_gradient(&self, bar: Rect) -> Paint {
        let y = bar.center().y;
        Paint::LinearGradient(LinearGradient::new(
            Vec2::new(bar.origin.x, y),
            Vec2::new(bar.origin.x + bar.size.x, y),
            vec![
                ColorStop { t: 0.0, color: Color::BLACK },
                ColorStop { t: 1.0, color: to_color(Rgb::from_hsv(self.hsv.hue, self.hsv.sat, 1.0)) },
            ],
            SpreadMode::Pad,
        ))
    }

    fn marker(painter: &mut Painter, bar: Rect, t: f32) {
        let x = bar.origin.x + t.clamp(0.0, 1.0) * bar.size.x;
        let r = Rect::new(x - 2.0, bar.origin.y - 2.0, 4.0, bar.size.y + 4.0);
        painter.fill_rounded_rect(r, 1.5, Color::WHITE, Some(Border::new(1.0, Color::BLACK)));
    }
}

impl Widget for ColorPicker {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.constrain(Vec2::new(constraints.width_or(240.0), HEIGHT))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let parts = Self::parts(rect);
        let outline = Some(Border::new(1.0, Color::from_straight(1.0, 1.0, 1.0, 0.25)));

        painter.fill_rounded_rect(parts.swatch, 4.0, to_color(self.color()), outline.clone());
        painter.fill_rounded_rect(parts.hue, 3.0, Self::hue_gradient(parts.hue), outline.clone());
        painter.fill_rounded_rect(parts.value, 3.0, self.value_gradient(parts.value), outline);
        Self::marker(painter, parts.hue, self.hsv.hue / 360.0);
        Self::marker(painter, parts.value, self.hsv.val);
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx<'_>) -> EventResult {
        let parts = Self::parts(rect);
        let (pos, start, commit) = match event {
            UiEvent::Hover { pos } => return EventResult::consumed_if(rect.contains(*pos)),
            UiEvent::Drag { pos, start } => (*pos, *start, false),
            UiEvent::DragEnd { pos, start } => (*pos, *start, true),
            _ => return EventResult::Ignored,
        };
        let Some(bar) = Self::bar_at(&parts, start) else {
            return EventResult::Ignored;
        };

        let track = match bar {
            Bar::Hue => parts.hue,
            Bar::Value => parts.value,
        };
        self.pick(bar, track.fraction_x(pos));

        let hsv = self.hsv;
        if let Some(f) = &mut self.on_drag {
            f(hsv);
        }
        if commit {
            if let Some(f) = &mut self.on_change {
                f(hsv);
            }
        }
        EventResult::Consumed
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use deck3d_engine::text::FontSystem;

    use super::*;

    fn rect() -> Rect {
        // Swatch 34 px, bars from x = 42 to 242.
        Rect::new(0.0, 0.0, 242.0, HEIGHT)
    }

    #[test]
    fn starts_from_the_given_color() {
        assert_eq!(ColorPicker::from_rgb(Rgb::new(0x8b, 0, 0)).color(), Rgb::new(0x8b, 0, 0));
    }

    #[test]
    fn hue_bar_release_commits_new_hue() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let got = Rc::new(Cell::new(None));
        let g = got.clone();
        let mut picker = ColorPicker::from_rgb(Rgb::new(255, 0, 0)).on_change(move |c| g.set(Some(c.to_rgb())));

        // A third of the way along the hue bar is 120 degrees: green.
        let ev = UiEvent::DragEnd { pos: Vec2::new(42.0 + 200.0 / 3.0, 5.0), start: Vec2::new(50.0, 5.0) };
        assert!(picker.on_event(&ev, rect(), &ctx).is_consumed());
        assert_eq!(got.get(), Some(Rgb::new(0, 255, 0)));
    }

    #[test]
    fn value_bar_darkens_without_touching_hue() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let mut picker = ColorPicker::from_rgb(Rgb::new(0, 0, 255));
        let y = BAR_HEIGHT + GAP + 2.0;
        let ev = UiEvent::Drag { pos: Vec2::new(142.0, y), start: Vec2::new(200.0, y) };
        picker.on_event(&ev, rect(), &ctx);

        let (h, s, v) = picker.color().to_hsv();
        assert!((h - 240.0).abs() < 1.0);
        assert!((s - 1.0).abs() < 1e-3);
        assert!((v - 0.5).abs() < 0.01);
    }

    #[test]
    fn hue_on_black_becomes_visible() {
        let mut picker = ColorPicker::from_rgb(Rgb::BLACK);
        picker.pick(Bar::Hue, 0.0);
        assert_eq!(picker.color(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn rebuilt_picker_keeps_hue_through_black() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let neon = Hsv::from(Rgb::new(0xc5, 0x51, 0xf5));
        let state = Rc::new(Cell::new(neon));
        let y = BAR_HEIGHT + GAP + 2.0;

        // One picker per frame, fed the state the previous one reported.
        let drag_value_to = |x: f32| {
            let s = state.clone();
            let mut picker = ColorPicker::new(state.get()).on_drag(move |hsv| s.set(hsv));
            let ev = UiEvent::DragEnd { pos: Vec2::new(x, y), start: Vec2::new(100.0, y) };
            picker.on_event(&ev, rect(), &ctx);
            state.get()
        };

        assert_eq!(drag_value_to(42.0).to_rgb(), Rgb::BLACK);
        let back = drag_value_to(242.0);
        assert_eq!((back.hue, back.sat), (neon.hue, neon.sat));
        assert_eq!(back.to_rgb(), Rgb::from_hsv(neon.hue, neon.sat, 1.0));
        assert_ne!(back.to_rgb(), Rgb::WHITE);
    }

    #[test]
    fn drags_starting_on_the_swatch_are_ignored() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let mut picker = ColorPicker::from_rgb(Rgb::WHITE);
        let ev = UiEvent::Drag { pos: Vec2::new(100.0, 5.0), start: Vec2::new(10.0, 10.0) };
        assert!(!picker.on_event(&ev, rect(), &ctx).is_consumed());
    }
}
