//! Suit symbols as vector shapes so they render without any font coverage.

use deck3d_cards::Suit;
use deck3d_engine::coords::Vec2;
use deck3d_engine::paint::Color;
use resvg::tiny_skia::{Path, PathBuilder, Pixmap, Transform};

use super::canvas::fill;

/// Share of the em box the shape occupies.
const GLYPH_SCALE: f32 = 0.72;

/// Closed shapes in the unit square, filled one by one so overlaps stay solid.
pub fn suit_paths(suit: Suit) -> Vec<Path> {
    let shapes = match suit {
        Suit::Hearts => vec![heart()],
        Suit::Diamonds => vec![diamond()],
        Suit::Clubs => vec![
            PathBuilder::from_circle(0.5, 0.27, 0.22),
            PathBuilder::from_circle(0.26, 0.56, 0.22),
            PathBuilder::from_circle(0.74, 0.56, 0.22),
            stem(),
        ],
        Suit::Spades => vec![spade_body(), stem()],
    };
    shapes.into_iter().flatten().collect()
}

fn heart() -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(0.5, 0.95);
    pb.cubic_to(0.2, 0.7, 0.0, 0.5, 0.0, 0.3);
    pb.cubic_to(0.0, 0.1, 0.14, 0.0, 0.28, 0.0);
    pb.cubic_to(0.4, 0.0, 0.48, 0.08, 0.5, 0.18);
    pb.cubic_to(0.52, 0.08, 0.6, 0.0, 0.72, 0.0);
    pb.cubic_to(0.86, 0.0, 1.0, 0.1, 1.0, 0.3);
    pb.cubic_to(1.0, 0.5, 0.8, 0.7, 0.5, 0.95);
    pb.close();
    pb.finish()
}

fn diamond() -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(0.5, 0.0);
    pb.line_to(0.88, 0.5);
    pb.line_to(0.5, 1.0);
    pb.line_to(0.12, 0.5);
    pb.close();
    pb.finish()
}

fn spade_body() -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(0.5, 0.0);
    pb.cubic_to(0.8, 0.25, 1.0, 0.4, 1.0, 0.58);
    pb.cubic_to(1.0, 0.75, 0.88, 0.84, 0.74, 0.84);
    pb.cubic_to(0.63, 0.84, 0.55, 0.78, 0.5, 0.7);
    pb.cubic_to(0.45, 0.78, 0.37, 0.84, 0.26, 0.84);
    pb.cubic_to(0.12, 0.84, 0.0, 0.75, 0.0, 0.58);
    pb.cubic_to(0.0, 0.4, 0.2, 0.25, 0.5, 0.0);
    pb.close();
    pb.finish()
}

fn stem() -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(0.5, 0.5);
    pb.line_to(0.64, 1.0);
    pb.line_to(0.36, 1.0);
    pb.close();
    pb.finish()
}

/// Draws `suit` centered on `center` for a glyph of `em` pixels, in the space of `transform`.
pub fn draw_suit(pixmap: &mut Pixmap, suit: Suit, center: Vec2, em: f32, color: Color, transform: Transform) {
    let side = em * GLYPH_SCALE;
    let place = transform.pre_concat(Transform::from_row(
        side,
        0.0,
        0.0,
        side,
        center.x - side * 0.5,
        center.y - side * 0.5,
    ));
    for path in suit_paths(suit) {
        fill(pixmap, &path, color, place, None);
    }
}

/// Center of a suit glyph whose em box starts at `top_left`, matching where a font places it.
pub fn glyph_center(top_left: Vec2, em: f32) -> Vec2 {
    Vec2::new(top_left.x + em * GLYPH_SCALE * 0.5, top_left.y + em * 0.55)
}

/// Width the glyph occupies when laid out next to text.
pub fn glyph_advance(em: f32) -> f32 {
    em * GLYPH_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::textures::canvas::{new_pixmap, test_util::pixel};

    #[test]
    fn every_suit_has_shapes_inside_the_unit_square() {
        for suit in Suit::ALL {
            let paths = suit_paths(suit);
            assert!(!paths.is_empty(), "{suit:?}");
            for p in paths {
                let b = p.bounds();
                assert!(b.left() >= -1e-3 && b.top() >= -1e-3, "{suit:?}");
                assert!(b.right() <= 1.0 + 1e-3 && b.bottom() <= 1.0 + 1e-3, "{suit:?}");
            }
        }
    }

    #[test]
    fn drawn_suit_covers_its_center() {
        for suit in Suit::ALL {
            let mut pm = new_pixmap(64, 64).unwrap();
            draw_suit(&mut pm, suit, Vec2::new(32.0, 32.0), 60.0, Color::from_hex(0xc62828), Transform::identity());
            assert_eq!(pixel(&pm, 32, 30)[3], 255, "{suit:?}");
            assert_eq!(pixel(&pm, 1, 1)[3], 0, "{suit:?}");
        }
    }

    #[test]
    fn rotated_suit_lands_mirrored() {
        let mut pm = new_pixmap(100, 100).unwrap();
        let flip = Transform::from_row(-1.0, 0.0, 0.0, -1.0, 100.0, 100.0);
        draw_suit(&mut pm, Suit::Diamonds, Vec2::new(20.0, 20.0), 30.0, Color::BLACK, flip);
        assert_eq!(pixel(&pm, 80, 80)[3], 255);
        assert_eq!(pixel(&pm, 20, 20)[3], 0);
    }
}
