use deck3d_engine::coords::{Rect, Vec2};
use deck3d_engine::text::FontSystem;

/// Insets on the four sides of a box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    #[inline]
    pub const fn all(v: f32) -> Self {
        Self { top: v, right: v, bottom: v, left: v }
    }

    #[inline]
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self { top: vertical, right: horizontal, bottom: vertical, left: horizontal }
    }

    /// left + right
    #[inline]
    pub fn h(self) -> f32 {
        self.left + self.right
    }

    /// top + bottom
    #[inline]
    pub fn v(self) -> f32 {
        self.top + self.bottom
    }
}

/// Size range a parent grants a child during measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min: Vec2,
    pub max: Vec2,
}

impl Constraints {
    #[inline]
    pub fn tight(size: Vec2) -> Self {
        Self { min: size, max: size }
    }

    #[inline]
    pub fn loose(max: Vec2) -> Self {
        Self { min: Vec2::zero(), max }
    }

    #[must_use]
    pub fn constrain(self, size: Vec2) -> Vec2 {
        Vec2::new(
            size.x.max(self.min.x).min(self.max.x),
            size.y.max(self.min.y).min(self.max.y),
        )
    }

    /// Max reduced by `edges`, min dropped to zero.
    #[must_use]
    pub fn shrink(self, edges: Edges) -> Self {
        Self::loose(Vec2::new(
            (self.max.x - edges.h()).max(0.0),
            (self.max.y - edges.v()).max(0.0),
        ))
    }

    /// Width to fill when bounded, `fallback` otherwise.
    #[inline]
    pub fn width_or(self, fallback: f32) -> f32 {
        if self.max.x.is_finite() { self.max.x } else { fallback }
    }
}

/// Resources available while measuring and routing events.
#[derive(Clone, Copy)]
pub struct LayoutCtx<'a> {
    pub fonts: &'a FontSystem,
}

/// `rect` shrunk by `edges`, never negative.
#[inline]
pub fn inset_rect(rect: Rect, edges: Edges) -> Rect {
    Rect::new(
        rect.origin.x + edges.left,
        rect.origin.y + edges.top,
        (rect.size.x - edges.h()).max(0.0),
        (rect.size.y - edges.v()).max(0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constrain_clamps_into_range() {
        let c = Constraints { min: Vec2::new(10.0, 10.0), max: Vec2::new(100.0, 50.0) };
        assert_eq!(c.constrain(Vec2::new(5.0, 80.0)), Vec2::new(10.0, 50.0));
        assert_eq!(c.constrain(Vec2::new(40.0, 20.0)), Vec2::new(40.0, 20.0));
    }

    #[test]
    fn shrink_removes_padding_and_min() {
        let c = Constraints::tight(Vec2::new(100.0, 80.0)).shrink(Edges::symmetric(10.0, 5.0));
        assert_eq!(c.min, Vec2::zero());
        assert_eq!(c.max, Vec2::new(90.0, 60.0));
        assert_eq!(Constraints::loose(Vec2::new(4.0, 4.0)).shrink(Edges::all(8.0)).max, Vec2::zero());
    }

    #[test]
    fn width_or_falls_back_when_unbounded() {
        assert_eq!(Constraints::loose(Vec2::new(288.0, 10.0)).width_or(200.0), 288.0);
        assert_eq!(Constraints::loose(Vec2::new(f32::INFINITY, 10.0)).width_or(200.0), 200.0);
    }

    #[test]
    fn inset_rect_applies_each_side() {
        let edges = Edges { top: 4.0, right: 10.0, bottom: 8.0, left: 6.0 };
        let inner = inset_rect(Rect::new(5.0, 5.0, 100.0, 60.0), edges);
        assert_eq!(inner, Rect::new(11.0, 9.0, 84.0, 48.0));
        assert_eq!(inset_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Edges::all(20.0)).size, Vec2::zero());
    }
}
