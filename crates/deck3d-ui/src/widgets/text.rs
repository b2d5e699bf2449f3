use deck3d_engine::coords::{Rect, Vec2};
use deck3d_engine::paint::Color;
use deck3d_engine::text::FontId;

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Widget;

/// A run of text, wrapped to the width its parent grants.
///
/// Without a font the widget keeps its line height and draws nothing, so
/// layouts stay stable when no font could be loaded.
pub struct Text {
    pub text: String,
    pub font: Option<FontId>,
    pub size: f32,
    pub color: Color,
}

impl Text {
    pub fn new(text: impl Into<String>, font: impl Into<Option<FontId>>, size: f32, color: Color) -> Self {
        Self { text: text.into(), font: font.into(), size, color }
    }
}

impl Widget for Text {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let size = match self.font {
            Some(font) => {
                let max_w = constraints.max.x.is_finite().then_some(constraints.max.x);
                ctx.fonts.measure_text(&self.text, font, self.size, max_w)
            }
            None => Vec2::new(0.0, self.size * 1.2),
        };
        constraints.constrain(size)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let Some(font) = self.font else {
            return;
        };
        let max_w = (rect.size.x > 0.0).then_some(rect.size.x);
        painter.text(self.text.as_str(), font, self.size, self.color, rect.origin, max_w);
    }
}

#[cfg(test)]
mod tests {
    use deck3d_engine::text::FontSystem;

    use super::*;

    #[test]
    fn missing_font_keeps_a_line_of_height() {
        let fonts = FontSystem::new();
        let t = Text::new("Theme", None::<FontId>, 20.0, Color::WHITE);
        let size = t.measure(Constraints::loose(Vec2::new(100.0, 100.0)), &LayoutCtx { fonts: &fonts });
        assert_eq!(size.x, 0.0);
        assert!((size.y - 24.0).abs() < 1e-4);
    }
}
