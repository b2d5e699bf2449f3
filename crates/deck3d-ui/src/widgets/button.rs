use deck3d_engine::coords::{Rect, Vec2};
use deck3d_engine::paint::Color;
use deck3d_engine::scene::Border;

use crate::constraints::{Constraints, Edges, LayoutCtx, inset_rect};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// Clickable box around any child.
///
/// Hover and press visuals come from the painter's pointer state; `selected`
/// marks the current choice of a group (e.g. the active theme preset).
pub struct Button {
    child: Element,
    on_click: Option<Box<dyn FnMut()>>,

    selected: bool,
    background: Color,
    hover_background: Color,
    press_background: Color,
    selected_background: Color,
    border: Option<Border>,
    selected_border: Option<Border>,
    corner_radius: f32,
    padding: Edges,
    min_height: f32,
}

impl Button {
    pub fn new(child: impl Into<Element>) -> Self {
        Self {
            child: child.into(),
            on_click: None,
            selected: false,
            background: Color::TRANSPARENT,
            hover_background: Color::TRANSPARENT,
            press_background: Color::TRANSPARENT,
            selected_background: Color::TRANSPARENT,
            border: None,
            selected_border: None,
            corner_radius: 0.0,
            padding: Edges::default(),
            min_height: 0.0,
        }
    }

    pub fn on_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn hover_background(mut self, color: Color) -> Self {
        self.hover_background = color;
        self
    }

    pub fn press_background(mut self, color: Color) -> Self {
        self.press_background = color;
        self
    }

    pub fn selected_background(mut self, color: Color) -> Self {
        self.selected_background = color;
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn selected_border(mut self, border: Border) -> Self {
        self.selected_border = Some(border);
        self
    }

    pub fn corner_radius(mut self, r: f32) -> Self {
        self.corner_radius = r;
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn min_height(mut self, h: f32) -> Self {
        self.min_height = h;
        self
    }

    fn fill(&self, hovered: bool, pressed: bool) -> Color {
        if pressed {
            self.press_background
        } else if self.selected {
            self.selected_background
        } else if hovered {
            self.hover_background
        } else {
            self.background
        }
    }
}

impl Widget for Button {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let child = self.child.measure(constraints.shrink(self.padding), ctx);
        constraints.constrain(Vec2::new(
            child.x + self.padding.h(),
            (child.y + self.padding.v()).max(self.min_height),
        ))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let bg = self.fill(painter.is_hovered(rect), painter.is_pressed(rect));
        let border = if self.selected { self.selected_border.clone().or(self.border.clone()) } else { self.border.clone() };
        painter.fill_rounded_rect(rect, self.corner_radius, bg, border);
        self.child.paint(painter, inset_rect(rect, self.padding));
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx<'_>) -> EventResult {
        match event {
            UiEvent::Hover { pos } => EventResult::consumed_if(rect.contains(*pos)),
            UiEvent::Click { pos } if rect.contains(*pos) => {
                if let Some(f) = &mut self.on_click {
                    f();
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
    use crate::widgets::container::Container;

    #[test]
    fn click_inside_fires_once() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let mut b = Button::new(Container::new()).on_click(move || h.set(h.get() + 1));
        let rect = Rect::new(0.0, 0.0, 40.0, 20.0);

        assert!(b.on_event(&UiEvent::Click { pos: Vec2::new(10.0, 10.0) }, rect, &ctx).is_consumed());
        assert!(!b.on_event(&UiEvent::Click { pos: Vec2::new(50.0, 10.0) }, rect, &ctx).is_consumed());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn selected_wins_over_hover_but_not_press() {
        let b = Button::new(Container::new())
            .selected(true)
            .background(Color::BLACK)
            .hover_background(Color::from_hex(0x333333))
            .selected_background(Color::from_hex(0x666666))
            .press_background(Color::WHITE);
        assert_eq!(b.fill(true, false), Color::from_hex(0x666666));
        assert_eq!(b.fill(true, true), Color::WHITE);
        assert_eq!(b.selected(false).fill(false, false), Color::BLACK);
    }
}
