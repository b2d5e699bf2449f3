use deck3d_engine::coords::{Rect, Vec2};
use deck3d_engine::paint::{Color, Paint};
use deck3d_engine::scene::Border;

use crate::constraints::{Constraints, Edges, LayoutCtx, inset_rect};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// One child with padding, and optionally a rounded background and border.
///
/// A container with a background is opaque to the pointer: hovering it
/// captures the pointer even where no child reacts.
pub struct Container {
    child: Option<Element>,
    padding: Edges,
    background: Option<Paint>,
    border: Option<Border>,
    corner_radius: f32,
    min_width: f32,
    min_height: f32,
}

impl Container {
    pub fn new() -> Self {
        Self {
            child: None,
            padding: Edges::default(),
            background: None,
            border: None,
            corner_radius: 0.0,
            min_width: 0.0,
            min_height: 0.0,
        }
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.child = Some(child.into());
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn padding_all(mut self, v: f32) -> Self {
        self.padding = Edges::all(v);
        self
    }

    pub fn background(mut self, paint: impl Into<Paint>) -> Self {
        self.background = Some(paint.into());
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn corner_radius(mut self, r: f32) -> Self {
        self.corner_radius = r;
        self
    }

    pub fn min_size(mut self, width: f32, height: f32) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Container {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let child = self
            .child
            .as_ref()
            .map_or(Vec2::zero(), |c| c.measure(constraints.shrink(self.padding), ctx));
        constraints.constrain(Vec2::new(
            (child.x + self.padding.h()).max(self.min_width),
            (child.y + self.padding.v()).max(self.min_height),
        ))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        if self.background.is_some() || self.border.is_some() {
            let paint = self.background.clone().unwrap_or(Paint::Solid(Color::TRANSPARENT));
            painter.fill_rounded_rect(rect, self.corner_radius, paint, self.border.clone());
        }
        if let Some(child) = &self.child {
            child.paint(painter, inset_rect(rect, self.padding));
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        let child_result = match &mut self.child {
            Some(child) => child.on_event(event, inset_rect(rect, self.padding), ctx),
            None => EventResult::Ignored,
        };
        match event {
            UiEvent::Hover { pos } if self.background.is_some() => {
                EventResult::consumed_if(child_result.is_consumed() || rect.contains(*pos))
            }
            _ => child_result,
        }
    }
}

#[cfg(test)]
mod tests {
    use deck3d_engine::text::FontSystem;

    use super::*;

    #[test]
    fn measure_adds_padding_and_respects_min_size() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let inner = Container::new().min_size(30.0, 10.0);
        let outer = Container::new().padding(Edges::symmetric(2.0, 4.0)).child(inner);
        let size = outer.measure(Constraints::loose(Vec2::new(100.0, 100.0)), &ctx);
        assert_eq!(size, Vec2::new(38.0, 14.0));
    }

    #[test]
    fn only_backgrounds_capture_hover() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let hover = UiEvent::Hover { pos: Vec2::new(5.0, 5.0) };

        assert!(!Container::new().on_event(&hover, rect, &ctx).is_consumed());
        assert!(Container::new().background(Color::BLACK).on_event(&hover, rect, &ctx).is_consumed());
    }
}
