use deck3d_engine::coords::{Rect, Vec2};
use deck3d_engine::paint::Color;
use deck3d_engine::scene::Border;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;

/// Horizontal range input.
///
/// Pressing on the track jumps to that value; dragging follows the pointer.
/// `on_drag` fires on every move, `on_change` once on release.
pub struct Slider {
    value: f32,
    min: f32,
    max: f32,
    /// Zero for a continuous range.
    step: f32,
    track_height: f32,
    thumb_radius: f32,
    track_color: Color,
    fill_color: Color,
    thumb_color: Color,
    on_drag: Option<Box<dyn FnMut(f32)>>,
    on_change: Option<Box<dyn FnMut(f32)>>,
}

impl Slider {
    pub fn new(min: f32, max: f32) -> Self {
        Self {
            value: min,
            min,
            max,
            step: 0.0,
            track_height: 4.0,
            thumb_radius: 8.0,
            track_color: Color::from_straight(0.2, 0.2, 0.28, 1.0),
            fill_color: Color::from_straight(0.55, 0.3, 0.95, 1.0),
            thumb_color: Color::WHITE,
            on_drag: None,
            on_change: None,
        }
    }

    pub fn value(mut self, v: f32) -> Self {
        self.value = self.snap(v);
        self
    }

    pub fn step(mut self, step: f32) -> Self {
        self.step = step.max(0.0);
        self.value = self.snap(self.value);
        self
    }

    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    pub fn track_color(mut self, color: Color) -> Self {
        self.track_color = color;
        self
    }

    pub fn on_drag(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_drag = Some(Box::new(f));
        self
    }

    pub fn on_change(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Clamps into range and rounds to the nearest step from `min`.
    fn snap(&self, v: f32) -> f32 {
        let (lo, hi) = (self.min.min(self.max), self.max.max(self.min));
        let v = if v.is_finite() { v.clamp(lo, hi) } else { lo };
        if self.step > 0.0 {
            let snapped = lo + ((v - lo) / self.step).round() * self.step;
            // Trim float noise so 0.1 steps read back as 0.1, 0.2, ...
            ((snapped / self.step).round() * self.step).clamp(lo, hi)
        } else {
            v
        }
    }

    fn normalized(&self) -> f32 {
        let span = self.max - self.min;
        if span.abs() < f32::EPSILON { 0.0 } else { ((self.value - self.min) / span).clamp(0.0, 1.0) }
    }

    fn value_at(&self, x: f32, track: Rect) -> f32 {
        let t = if track.size.x > 0.0 { ((x - track.origin.x) / track.size.x).clamp(0.0, 1.0) } else { 0.0 };
        self.snap(self.min + t * (self.max - self.min))
    }

    /// Track inset by the thumb radius so the thumb stays inside the widget.
    fn track(&self, rect: Rect) -> Rect {
        let r = self.thumb_radius;
        Rect::new(rect.origin.x + r, rect.center().y, (rect.size.x - 2.0 * r).max(0.0), 0.0)
    }
}

impl Widget for Slider {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.constrain(Vec2::new(constraints.width_or(200.0), self.thumb_radius * 2.0 + 4.0))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let track = self.track(rect);
        let cy = track.origin.y;
        let bar = Rect::new(track.origin.x, cy - self.track_height * 0.5, track.size.x, self.track_height);
        painter.fill_rounded_rect(bar, self.track_height * 0.5, self.track_color, None);

        let thumb_x = track.origin.x + self.normalized() * track.size.x;
        let filled = thumb_x - track.origin.x;
        if filled > 0.0 {
            let fill = Rect::new(bar.origin.x, bar.origin.y, filled, bar.size.y);
            painter.fill_rounded_rect(fill, self.track_height * 0.5, self.fill_color, None);
        }

        let r = if painter.is_hovered(rect) { self.thumb_radius + 1.5 } else { self.thumb_radius };
        painter.fill_circle(Vec2::new(thumb_x, cy), r, self.thumb_color, Some(Border::new(2.0, self.fill_color)));
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx<'_>) -> EventResult {
        let track = self.track(rect);
        match event {
            UiEvent::Hover { pos } => EventResult::consumed_if(rect.contains(*pos)),
            UiEvent::Drag { pos, start } if rect.contains(*start) => {
                self.value = self.value_at(pos.x, track);
                if let Some(f) = &mut self.on_drag {
                    f(self.value);
                }
                EventResult::Consumed
            }
            UiEvent::DragEnd { pos, start } if rect.contains(*start) => {
                self.value = self.value_at(pos.x, track);
                if let Some(f) = &mut self.on_drag {
                    f(self.value);
                }
                if let Some(f) = &mut self.on_change {
                    f(self.value);
                }
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use deck3d_engine::text::FontSystem;

    use super::*;

    #[test]
    fn values_snap_to_step_and_range() {
        let s = Slider::new(0.0, 2.0).step(0.1);
        assert!((s.snap(0.84) - 0.8).abs() < 1e-6);
        assert!((s.snap(1.26) - 1.3).abs() < 1e-6);
        assert_eq!(s.snap(5.0), 2.0);
        assert_eq!(s.snap(-1.0), 0.0);
        assert_eq!(s.snap(f32::NAN), 0.0);
    }

    #[test]
    fn release_commits_position_under_pointer() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let committed = Rc::new(Cell::new(-1.0));
        let c = committed.clone();
        let mut s = Slider::new(0.0, 2.0).step(0.1).value(0.8).on_change(move |v| c.set(v));

        // Track spans x in [8, 208] for a 216 px wide slider.
        let rect = Rect::new(0.0, 0.0, 216.0, 20.0);
        let ev = UiEvent::DragEnd { pos: Vec2::new(158.0, 10.0), start: Vec2::new(100.0, 10.0) };
        assert!(s.on_event(&ev, rect, &ctx).is_consumed());
        assert!((committed.get() - 1.5).abs() < 1e-5);
    }

    #[test]
    fn drags_owned_by_others_are_ignored() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let mut s = Slider::new(0.0, 1.0);
        let rect = Rect::new(0.0, 0.0, 100.0, 20.0);
        let ev = UiEvent::Drag { pos: Vec2::new(50.0, 10.0), start: Vec2::new(50.0, 80.0) };
        assert!(!s.on_event(&ev, rect, &ctx).is_consumed());
    }
}
