use deck3d_engine::coords::{Rect, Vec2};

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// Fixed number of equal-width columns, filled row by row.
///
/// Each row is as tall as its tallest child; children are stretched to the
/// cell width.
pub struct Grid {
    columns: usize,
    spacing: f32,
    children: Vec<Element>,
}

impl Grid {
    pub fn new(columns: usize) -> Self {
        Self { columns: columns.max(1), spacing: 0.0, children: Vec::new() }
    }

    pub fn spacing(mut self, v: f32) -> Self {
        self.spacing = v;
        self
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, iter: impl IntoIterator<Item = impl Into<Element>>) -> Self {
        self.children.extend(iter.into_iter().map(Into::into));
        self
    }

    fn cell_width(&self, width: f32) -> f32 {
        let gaps = self.spacing * (self.columns - 1) as f32;
        ((width - gaps) / self.columns as f32).max(0.0)
    }

    fn row_heights(&self, cell_w: f32, ctx: &LayoutCtx) -> Vec<f32> {
        let c = Constraints { min: Vec2::new(cell_w, 0.0), max: Vec2::new(cell_w, f32::INFINITY) };
        self.children
            .chunks(self.columns)
            .map(|row| row.iter().map(|child| child.measure(c, ctx).y).fold(0.0, f32::max))
            .collect()
    }

    fn layout(&self, rect: Rect, ctx: &LayoutCtx) -> Vec<Rect> {
        let cell_w = self.cell_width(rect.size.x);
        let heights = self.row_heights(cell_w, ctx);

        let mut out = Vec::with_capacity(self.children.len());
        let mut y = rect.origin.y;
        for h in heights {
            for col in 0..self.columns {
                if out.len() == self.children.len() {
                    break;
                }
                let x = rect.origin.x + col as f32 * (cell_w + self.spacing);
                out.push(Rect::new(x, y, cell_w, h));
            }
            y += h + self.spacing;
        }
        out
    }
}

impl Widget for Grid {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let width = constraints.width_or(200.0);
        let heights = self.row_heights(self.cell_width(width), ctx);
        let h = heights.iter().sum::<f32>() + self.spacing * heights.len().saturating_sub(1) as f32;
        constraints.constrain(Vec2::new(width, h))
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

#[cfg(test)]
mod tests {
    use deck3d_engine::text::FontSystem;

    use super::*;
    use crate::widgets::container::Container;

    #[test]
    fn two_columns_wrap_into_rows() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let grid = Grid::new(2)
            .spacing(8.0)
            .children((0..3).map(|i| Container::new().min_size(10.0, 20.0 + i as f32 * 10.0)));

        let size = grid.measure(Constraints::loose(Vec2::new(248.0, 500.0)), &ctx);
        // rows of 30 and 40 plus one gap
        assert_eq!(size, Vec2::new(248.0, 78.0));

        let rects = grid.layout(Rect::new(0.0, 0.0, 248.0, 78.0), &ctx);
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0], Rect::new(0.0, 0.0, 120.0, 30.0));
        assert_eq!(rects[1], Rect::new(128.0, 0.0, 120.0, 30.0));
        assert_eq!(rects[2], Rect::new(0.0, 38.0, 120.0, 40.0));
    }

    #[test]
    fn zero_columns_behaves_as_one() {
        let grid = Grid::new(0).child(Container::new());
        assert_eq!(grid.columns, 1);
    }
}
