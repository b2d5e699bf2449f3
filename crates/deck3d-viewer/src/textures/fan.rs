//! Poker-size faces for the fan scene.

use deck3d_cards::Card;
use deck3d_engine::coords::Vec2;
use deck3d_engine::paint::Color;
use resvg::tiny_skia::{Pixmap, Transform};

use super::canvas::{card_outline, clip_mask, fill, label, new_pixmap, stroke};
use super::suits::{draw_suit, glyph_center};
use super::{CardArt, TextureError};

pub const WIDTH: u32 = 1024;
/// `WIDTH` scaled by the 2.5 x 3.5 card aspect.
pub const HEIGHT: u32 = 1434;

const INSET: f32 = 10.0;
const RADIUS: f32 = 48.0;
const BORDER: f32 = 8.0;

const RED: u32 = 0xc62828;
const BLACK: u32 = 0x111111;

const RANK_SIZE: f32 = 160.0;
const SUIT_SIZE: f32 = 140.0;
const PIP_SIZE: f32 = 260.0;
const STRIPE_STEP: usize = 48;
const STRIPE_WIDTH: f32 = 10.0;

pub fn front(card: &Card, art: &CardArt<'_>) -> Result<Pixmap, TextureError> {
    let mut pm = new_pixmap(WIDTH, HEIGHT)?;
    let outline = card_outline(WIDTH, HEIGHT, INSET, RADIUS).ok_or(TextureError::Shape)?;
    fill(&mut pm, &outline, Color::WHITE, Transform::identity(), None);
    stroke(&mut pm, &outline, Color::from_hex(0xd0d0d0), BORDER, Transform::identity(), None);

    let ink = Color::from_hex(if card.suit.is_red() { RED } else { BLACK });
    let rank = card.rank.label();

    // Top-left corner, then the same pair turned half a circle in the opposite corner.
    let corners = [
        (Transform::identity(), Vec2::new(52.0, 52.0), Vec2::new(60.0, 200.0)),
        (
            Transform::from_row(-1.0, 0.0, 0.0, -1.0, WIDTH as f32 - 52.0, HEIGHT as f32 - 52.0),
            Vec2::zero(),
            Vec2::new(10.0, 148.0),
        ),
    ];
    for (transform, rank_at, suit_at) in corners {
        label(&mut pm, art.fonts, art.font, rank, RANK_SIZE, ink, rank_at, transform);
        draw_suit(&mut pm, card.suit, glyph_center(suit_at, SUIT_SIZE), SUIT_SIZE, ink, transform);
    }

    if card.rank.has_center_pip() {
        let center = Vec2::new(WIDTH as f32 * 0.5, HEIGHT as f32 * 0.5);
        draw_suit(&mut pm, card.suit, center, PIP_SIZE, ink, Transform::identity());
    }
    Ok(pm)
}

/// Blue back with white diagonal stripes clipped to the card shape.
pub fn back() -> Result<Pixmap, TextureError> {
    let mut pm = new_pixmap(WIDTH, HEIGHT)?;
    let outline = card_outline(WIDTH, HEIGHT, INSET, RADIUS).ok_or(TextureError::Shape)?;
    fill(&mut pm, &outline, Color::from_hex(0x164b71), Transform::identity(), None);
    stroke(&mut pm, &outline, Color::from_hex(0x0e334c), BORDER, Transform::identity(), None);

    let mask = clip_mask(&pm, &outline).ok_or(TextureError::Shape)?;
    let stripe = Color::WHITE.with_alpha(0.35);
    let (w, h) = (WIDTH as i32, HEIGHT as i32);
    for x in (-h..w + h).step_by(STRIPE_STEP) {
        let mut pb = resvg::tiny_skia::PathBuilder::new();
        pb.move_to(x as f32, 0.0);
        pb.line_to((x + h) as f32, h as f32);
        if let Some(line) = pb.finish() {
            stroke(&mut pm, &line, stripe, STRIPE_WIDTH, Transform::identity(), Some(&mask));
        }
    }
    Ok(pm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::textures::canvas::test_util::pixel;
    use crate::textures::Templates;
    use deck3d_cards::{Rank, Suit};
    use deck3d_engine::text::FontSystem;

    fn art<'a>(fonts: &'a FontSystem, templates: &'a Templates) -> CardArt<'a> {
        CardArt { fonts, font: None, templates }
    }

    #[test]
    fn front_has_rounded_corners_and_white_body() {
        let (fonts, templates) = (FontSystem::new(), Templates::default());
        let pm = front(&Card::new(0, Rank::Four, Suit::Clubs), &art(&fonts, &templates)).unwrap();
        assert_eq!((pm.width(), pm.height()), (WIDTH, HEIGHT));
        assert_eq!(pixel(&pm, 0, 0)[3], 0);
        assert_eq!(pixel(&pm, 20, 20)[3], 0);
        assert_eq!(pixel(&pm, 300, 700), [255, 255, 255, 255]);
        // No center pip on a four.
        assert_eq!(pixel(&pm, 512, 717), [255, 255, 255, 255]);
    }

    #[test]
    fn center_pip_uses_suit_color() {
        let (fonts, templates) = (FontSystem::new(), Templates::default());
        let pm = front(&Card::new(0, Rank::King, Suit::Hearts), &art(&fonts, &templates)).unwrap();
        assert_eq!(pixel(&pm, 512, 717), [0xc6, 0x28, 0x28, 0xff]);

        let pm = front(&Card::new(0, Rank::Ace, Suit::Spades), &art(&fonts, &templates)).unwrap();
        assert_eq!(pixel(&pm, 512, 717), [0x11, 0x11, 0x11, 0xff]);
    }

    #[test]
    fn corner_suits_are_drawn_at_both_ends() {
        let (fonts, templates) = (FontSystem::new(), Templates::default());
        let pm = front(&Card::new(0, Rank::Seven, Suit::Diamonds), &art(&fonts, &templates)).unwrap();
        let top = glyph_center(Vec2::new(60.0, 200.0), SUIT_SIZE);
        assert_eq!(pixel(&pm, top.x as u32, top.y as u32)[0], 0xc6);
        let bottom = (WIDTH as f32 - 52.0 - 10.0 - 50.4, HEIGHT as f32 - 52.0 - 148.0 - 77.0);
        assert_eq!(pixel(&pm, bottom.0 as u32, bottom.1 as u32)[0], 0xc6);
    }

    #[test]
    fn back_is_blue_with_stripes_inside_only() {
        let pm = back().unwrap();
        assert_eq!(pixel(&pm, 0, 0)[3], 0);
        let body = pixel(&pm, 512, 40);
        assert_eq!(body[3], 255);
        assert!(body[2] > body[0]);

        // Some pixels sit on a stripe, lighter than the base blue.
        let lighter = (0..48).map(|dx| pixel(&pm, 400 + dx, 600)).filter(|p| p[0] > 0x40).count();
        assert!(lighter > 0);
    }
}
