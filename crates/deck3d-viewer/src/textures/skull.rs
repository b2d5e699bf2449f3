//! The skull decoration on table card backs, drawn from SVG in theme colors.

use deck3d_cards::ThemeColors;
use deck3d_engine::coords::Rect;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;

use super::TextureError;

const VIEW_W: f32 = 200.0;
const VIEW_H: f32 = 240.0;

const CRANIUM: &str = "M100 12 C150 12 188 50 188 102 C188 138 170 158 158 166 L158 196 \
     C158 206 150 212 140 212 L60 212 C50 212 42 206 42 196 L42 166 \
     C30 158 12 138 12 102 C12 50 50 12 100 12 Z";
const EYES: &str = r#"<ellipse cx="66" cy="108" rx="26" ry="30"/><ellipse cx="134" cy="108" rx="26" ry="30"/>"#;

/// Which parts of the skull to draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SkullLayer {
    /// Cranium, outline, nose, teeth and eyes.
    Full,
    /// Only the eyes, for the emissive map.
    Eyes,
}

pub fn skull_svg(colors: &ThemeColors, layer: SkullLayer) -> String {
    let (base, border, eye) = (colors.base.to_hex(), colors.border.to_hex(), colors.eye.to_hex());
    let body = match layer {
        SkullLayer::Full => format!(
            r#"<path d="{CRANIUM}" fill="{base}" stroke="{border}" stroke-width="8" stroke-linejoin="round"/>
<g fill="{border}"><ellipse cx="66" cy="108" rx="32" ry="36"/><ellipse cx="134" cy="108" rx="32" ry="36"/></g>
<g fill="{eye}">{EYES}</g>
<path d="M100 138 L88 166 L112 166 Z" fill="{border}"/>
<path d="M70 184 V212 M90 184 V212 M110 184 V212 M130 184 V212" stroke="{border}" stroke-width="5"/>"#
        ),
        SkullLayer::Eyes => format!(r#"<g fill="{eye}">{EYES}</g>"#),
    };
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{VIEW_W}" height="{VIEW_H}" viewBox="0 0 {VIEW_W} {VIEW_H}">{body}</svg>"#
    )
}

/// Renders the skull scaled to fit inside `rect`, centered.
pub fn draw_skull(pixmap: &mut Pixmap, colors: &ThemeColors, layer: SkullLayer, rect: Rect) -> Result<(), TextureError> {
    let svg = skull_svg(colors, layer);
    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default())?;
    let size = tree.size();

    let scale = (rect.width() / size.width()).min(rect.height() / size.height());
    let x = rect.x() + (rect.width() - size.width() * scale) * 0.5;
    let y = rect.y() + (rect.height() - size.height() * scale) * 0.5;
    resvg::render(&tree, Transform::from_row(scale, 0.0, 0.0, scale, x, y), &mut pixmap.as_mut());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::textures::canvas::{new_pixmap, test_util::pixel};
    use deck3d_cards::Theme;

    #[test]
    fn svg_carries_theme_colors() {
        let colors = Theme::classic().colors;
        let full = skull_svg(&colors, SkullLayer::Full);
        assert!(full.contains("#8b0000") && full.contains("#ffd700") && full.contains("#ffffff"));
        let eyes = skull_svg(&colors, SkullLayer::Eyes);
        assert!(eyes.contains("#ffffff"));
        assert!(!eyes.contains("#8b0000"));
    }

    #[test]
    fn renders_colors_in_place() {
        let colors = Theme::classic().colors;
        let mut pm = new_pixmap(200, 240).unwrap();
        draw_skull(&mut pm, &colors, SkullLayer::Full, Rect::new(0.0, 0.0, 200.0, 240.0)).unwrap();
        assert_eq!(pixel(&pm, 66, 108), [0xff, 0xff, 0xff, 0xff]);
        assert_eq!(pixel(&pm, 100, 60), [0x8b, 0x00, 0x00, 0xff]);
        assert_eq!(pixel(&pm, 2, 2)[3], 0);
    }

    #[test]
    fn eye_layer_is_only_eyes() {
        let colors = Theme::classic().colors;
        let mut pm = new_pixmap(200, 240).unwrap();
        draw_skull(&mut pm, &colors, SkullLayer::Eyes, Rect::new(0.0, 0.0, 200.0, 240.0)).unwrap();
        assert_eq!(pixel(&pm, 134, 108)[3], 255);
        assert_eq!(pixel(&pm, 100, 60)[3], 0);
    }

    #[test]
    fn fits_and_centers_in_rect() {
        let colors = Theme::classic().colors;
        let mut pm = new_pixmap(400, 240).unwrap();
        draw_skull(&mut pm, &colors, SkullLayer::Full, Rect::new(0.0, 0.0, 400.0, 240.0)).unwrap();
        // Scale 1, shifted right by 100.
        assert_eq!(pixel(&pm, 166, 108)[3], 255);
        assert_eq!(pixel(&pm, 50, 120)[3], 0);
    }
}
