use deck3d_engine::coords::{Rect, Vec2};

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// Distance from a parent edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorVal {
    Px(f32),
    /// Fraction of the parent's extent on that axis.
    Pct(f32),
}

impl AnchorVal {
    #[inline]
    pub fn resolve(self, parent: f32) -> f32 {
        match self {
            AnchorVal::Px(v) => v,
            AnchorVal::Pct(p) => parent * p,
        }
    }
}

/// Width or height of a stacked child.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SizeHint {
    /// Measured size.
    #[default]
    Natural,
    Px(f32),
    Fill,
}

impl SizeHint {
    #[inline]
    pub fn resolve(self, parent: f32, natural: f32) -> f32 {
        match self {
            SizeHint::Natural => natural,
            SizeHint::Px(v) => v,
            SizeHint::Fill => parent,
        }
    }
}

/// A [`Stack`] child and the edges it is pinned to.
///
/// Pinning both edges of an axis stretches the child between them; pinning
/// one keeps the child's size on that side; pinning none places it at the
/// parent's origin.
pub struct StackItem {
    pub element: Element,
    pub left: Option<AnchorVal>,
    pub top: Option<AnchorVal>,
    pub right: Option<AnchorVal>,
    pub bottom: Option<AnchorVal>,
    pub width: SizeHint,
    pub height: SizeHint,
}

impl StackItem {
    pub fn new(element: impl Into<Element>) -> Self {
        Self {
            element: element.into(),
            left: None,
            top: None,
            right: None,
            bottom: None,
            width: SizeHint::Natural,
            height: SizeHint::Natural,
        }
    }

    pub fn left(mut self, v: AnchorVal) -> Self {
        self.left = Some(v);
        self
    }

    pub fn top(mut self, v: AnchorVal) -> Self {
        self.top = Some(v);
        self
    }

    pub fn right(mut self, v: AnchorVal) -> Self {
        self.right = Some(v);
        self
    }

    pub fn bottom(mut self, v: AnchorVal) -> Self {
        self.bottom = Some(v);
        self
    }

    pub fn width(mut self, v: SizeHint) -> Self {
        self.width = v;
        self
    }

    pub fn height(mut self, v: SizeHint) -> Self {
        self.height = v;
        self
    }

    /// Rect of this item inside `parent`.
    pub fn place(&self, parent: Rect, ctx: &LayoutCtx) -> Rect {
        let (pw, ph) = (parent.size.x, parent.size.y);
        // A fixed width changes how text wraps, so measure within it.
        let max_w = match self.width {
            SizeHint::Px(w) => w,
            _ => pw,
        };
        let natural = self.element.measure(Constraints::loose(Vec2::new(max_w, ph)), ctx);

        let (x, w) = place_axis(self.left, self.right, self.width, pw, natural.x);
        let (y, h) = place_axis(self.top, self.bottom, self.height, ph, natural.y);
        Rect::new(parent.origin.x + x, parent.origin.y + y, w, h)
    }
}

/// Offset and extent along one axis.
fn place_axis(start: Option<AnchorVal>, end: Option<AnchorVal>, hint: SizeHint, parent: f32, natural: f32) -> (f32, f32) {
    match (start, end) {
        (Some(s), Some(e)) => {
            let s = s.resolve(parent);
            (s, (parent - s - e.resolve(parent)).max(0.0))
        }
        (Some(s), None) => (s.resolve(parent), hint.resolve(parent, natural)),
        (None, Some(e)) => {
            let size = hint.resolve(parent, natural);
            (parent - e.resolve(parent) - size, size)
        }
        (None, None) => (0.0, hint.resolve(parent, natural)),
    }
}

/// Children layered over the full parent rect, each pinned by anchors.
///
/// Painted first to last; events reach the last (topmost) child first.
#[derive(Default)]
pub struct Stack {
    items: Vec<StackItem>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(mut self, item: StackItem) -> Self {
        self.items.push(item);
        self
    }
}

impl Widget for Stack {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.constrain(constraints.max)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let ctx = painter.layout_ctx();
        for item in &self.items {
            let r = item.place(rect, &ctx);
            item.element.paint(painter, r);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        for item in self.items.iter_mut().rev() {
            let r = item.place(rect, ctx);
            if item.element.on_event(event, r, ctx).is_consumed() {
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }
}
