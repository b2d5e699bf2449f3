use crate::coords::Vec2;

use super::Color;

/// Gradient behavior outside the `[0, 1]` range.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum SpreadMode {
    #[default]
    Pad,
    Repeat,
    Reflect,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Linear gradient between two points in the same space as the geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<ColorStop>,
    pub spread: SpreadMode,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2, stops: Vec<ColorStop>, spread: SpreadMode) -> Self {
        Self { start, end, stops, spread }
    }

    /// Two-stop gradient from `top` at `y0` to `bottom` at `y1`.
    pub fn vertical(y0: f32, y1: f32, top: Color, bottom: Color) -> Self {
        Self::new(
            Vec2::new(0.0, y0),
            Vec2::new(0.0, y1),
            vec![ColorStop::new(0.0, top), ColorStop::new(1.0, bottom)],
            SpreadMode::Pad,
        )
    }

    /// Needs two finite stops and distinct end points.
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.stops.len() >= 2
            && self.stops.iter().all(|s| s.t.is_finite() && s.color.is_finite())
            && self.start != self.end
    }

    /// Color at parameter `t` (pad spread), interpolated between the bracketing stops.
    pub fn sample(&self, t: f32) -> Color {
        let Some(first) = self.stops.first() else {
            return Color::TRANSPARENT;
        };
        if t <= first.t {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.t {
                let span = (b.t - a.t).max(f32::EPSILON);
                return a.color.lerp(b.color, (t - a.t) / span);
            }
        }
        self.stops.last().map(|s| s.color).unwrap_or(first.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_gradient_samples_midpoint() {
        let g = LinearGradient::vertical(0.0, 100.0, Color::BLACK, Color::WHITE);
        assert!(g.is_valid());
        let mid = g.sample(0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert_eq!(g.sample(-1.0), Color::BLACK);
        assert_eq!(g.sample(2.0), Color::WHITE);
    }

    #[test]
    fn degenerate_gradient_is_invalid() {
        let g = LinearGradient::vertical(10.0, 10.0, Color::BLACK, Color::WHITE);
        assert!(!g.is_valid());
    }
}
