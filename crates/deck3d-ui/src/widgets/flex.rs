use deck3d_engine::coords::{Rect, Vec2};

use crate::constraints::{Constraints, Edges, LayoutCtx, inset_rect};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// Cross-axis placement of children in a [`Column`] or [`Row`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Fill the cross axis.
    #[default]
    Stretch,
    Start,
    Center,
    End,
}

impl Align {
    fn offset(self, available: f32, child: f32) -> f32 {
        match self {
            Align::Stretch | Align::Start => 0.0,
            Align::Center => (available - child) * 0.5,
            Align::End => available - child,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Vertical,
    Horizontal,
}

/// Shared layout of `Column` (vertical) and `Row` (horizontal).
struct Flex {
    axis: Axis,
    children: Vec<Element>,
    spacing: f32,
    padding: Edges,
    align: Align,
}

impl Flex {
    fn new(axis: Axis) -> Self {
        Self { axis, children: Vec::new(), spacing: 0.0, padding: Edges::default(), align: Align::Stretch }
    }

    /// (main, cross) components of `v`.
    fn split(&self, v: Vec2) -> (f32, f32) {
        match self.axis {
            Axis::Vertical => (v.y, v.x),
            Axis::Horizontal => (v.x, v.y),
        }
    }

    fn join(&self, main: f32, cross: f32) -> Vec2 {
        match self.axis {
            Axis::Vertical => Vec2::new(cross, main),
            Axis::Horizontal => Vec2::new(main, cross),
        }
    }

    fn child_constraints(&self, cross: f32) -> Constraints {
        // An unbounded cross axis cannot be stretched into.
        let min_cross = if self.align == Align::Stretch && cross.is_finite() { cross } else { 0.0 };
        Constraints {
            min: self.join(0.0, min_cross),
            max: self.join(f32::INFINITY, cross),
        }
    }

    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let (_, max_cross) = self.split(constraints.shrink(self.padding).max);
        let child_c = self.child_constraints(max_cross);

        let mut main = 0.0f32;
        let mut cross = 0.0f32;
        for child in &self.children {
            let (m, c) = self.split(child.measure(child_c, ctx));
            main += m;
            cross = cross.max(c);
        }
        main += self.spacing * self.children.len().saturating_sub(1) as f32;

        let (pad_main, pad_cross) = self.split(Vec2::new(self.padding.h(), self.padding.v()));
        let (_, outer_cross) = self.split(constraints.max);
        let cross = if self.align == Align::Stretch && outer_cross.is_finite() {
            outer_cross
        } else {
            cross + pad_cross
        };
        constraints.constrain(self.join(main + pad_main, cross))
    }

    /// Child rects inside `rect`, in child order.
    fn layout(&self, rect: Rect, ctx: &LayoutCtx) -> Vec<Rect> {
        let inner = inset_rect(rect, self.padding);
        let (_, cross_avail) = self.split(inner.size);
        let child_c = self.child_constraints(cross_avail);

        let mut cursor = 0.0;
        self.children
            .iter()
            .map(|child| {
                let size = child.measure(child_c, ctx);
                let (m, c) = self.split(size);
                let offset = self.join(cursor, self.align.offset(cross_avail, c));
                cursor += m + self.spacing;
                Rect::new(inner.origin.x + offset.x, inner.origin.y + offset.y, size.x, size.y)
            })
            .collect()
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let ctx = painter.layout_ctx();
        for (child, r) in self.children.iter().zip(self.layout(rect, &ctx)) {
            child.paint(painter, r);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        let rects = self.layout(rect, ctx);
        for (child, r) in self.children.iter_mut().zip(rects) {
            if child.on_event(event, r, ctx).is_consumed() {
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }
}

macro_rules! flex_widget {
    ($(#[$doc:meta])* $name:ident, $axis:expr) => {
        $(#[$doc])*
        pub struct $name(Flex);

        impl $name {
            pub fn new() -> Self {
                Self(Flex::new($axis))
            }

            pub fn spacing(mut self, v: f32) -> Self {
                self.0.spacing = v;
                self
            }

            pub fn padding(mut self, edges: Edges) -> Self {
                self.0.padding = edges;
                self
            }

            pub fn align(mut self, align: Align) -> Self {
                self.0.align = align;
                self
            }

            pub fn child(mut self, child: impl Into<Element>) -> Self {
                self.0.children.push(child.into());
                self
            }

            pub fn children(mut self, iter: impl IntoIterator<Item = impl Into<Element>>) -> Self {
                self.0.children.extend(iter.into_iter().map(Into::into));
                self
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Widget for $name {
            fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
                self.0.measure(constraints, ctx)
            }

            fn paint(&self, painter: &mut Painter, rect: Rect) {
                self.0.paint(painter, rect)
            }

            fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
                self.0.on_event(event, rect, ctx)
            }
        }
    };
}

flex_widget!(
    /// Children stacked top to bottom.
    Column,
    Axis::Vertical
);

flex_widget!(
    /// Children placed left to right.
    Row,
    Axis::Horizontal
);

#[cfg(test)]
mod tests {
    use deck3d_engine::text::FontSystem;

    use super::*;
    use crate::widgets::container::Container;

    fn boxed(w: f32, h: f32) -> Container {
        Container::new().min_size(w, h)
    }

    #[test]
    fn column_stacks_with_spacing_and_padding() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let col = Column::new()
            .padding(Edges::all(5.0))
            .spacing(4.0)
            .align(Align::Start)
            .child(boxed(20.0, 10.0))
            .child(boxed(30.0, 12.0));

        let size = col.measure(Constraints::loose(Vec2::new(200.0, 200.0)), &ctx);
        assert_eq!(size, Vec2::new(40.0, 36.0));

        let rects = col.0.layout(Rect::new(0.0, 0.0, 40.0, 36.0), &ctx);
        assert_eq!(rects[0], Rect::new(5.0, 5.0, 20.0, 10.0));
        assert_eq!(rects[1], Rect::new(5.0, 19.0, 30.0, 12.0));
    }

    #[test]
    fn stretched_column_fills_bounded_width() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let col = Column::new().child(boxed(20.0, 10.0));
        let size = col.measure(Constraints::loose(Vec2::new(288.0, 500.0)), &ctx);
        assert_eq!(size.x, 288.0);

        let rects = col.0.layout(Rect::new(0.0, 0.0, 288.0, 10.0), &ctx);
        assert_eq!(rects[0].size.x, 288.0);
    }

    #[test]
    fn row_centers_on_cross_axis() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let row = Row::new().spacing(2.0).align(Align::Center).child(boxed(10.0, 10.0)).child(boxed(10.0, 20.0));
        let rects = row.0.layout(Rect::new(0.0, 0.0, 100.0, 20.0), &ctx);
        assert_eq!(rects[0], Rect::new(0.0, 5.0, 10.0, 10.0));
        assert_eq!(rects[1], Rect::new(12.0, 0.0, 10.0, 20.0));
    }
}
