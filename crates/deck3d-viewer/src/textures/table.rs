//! Faces for the pile table: template-based fronts and skull backs in theme colors.

use deck3d_cards::{Card, ThemeColors};
use deck3d_engine::coords::{Rect, Vec2};
use deck3d_engine::paint::Color;
use resvg::tiny_skia::{Pixmap, Transform};

use super::canvas::{card_outline, draw_stretched, fill, label, measure, new_pixmap, stroke};
use super::skull::{draw_skull, SkullLayer};
use super::suits::{draw_suit, glyph_advance};
use super::{CardArt, TextureError};

pub const WIDTH: u32 = 512;
pub const HEIGHT: u32 = 768;

const INSET: f32 = 8.0;
const RADIUS: f32 = 32.0;
const VALUE_SIZE: f32 = 100.0;
const RED: u32 = 0xd40000;
const BLACK: u32 = 0x222222;
const GOLD: u32 = 0xc9a44c;

/// Where the skull sits on the back.
const SKULL_RECT: Rect = Rect::new(106.0, 204.0, 300.0, 360.0);

/// Color and emissive maps of a card back.
pub struct BackMaps {
    pub color: Pixmap,
    /// Black except for the glowing eyes.
    pub emissive: Pixmap,
}

pub fn front(card: &Card, art: &CardArt<'_>) -> Result<Pixmap, TextureError> {
    let mut pm = new_pixmap(WIDTH, HEIGHT)?;
    match &art.templates.front {
        Some(template) => draw_stretched(&mut pm, template),
        None => front_template(&mut pm)?,
    }

    let ink = Color::from_hex(if card.suit.is_red() { RED } else { BLACK });
    let rank = card.rank.label();
    let text = measure(art.fonts, art.font, rank, VALUE_SIZE);
    let gap = if art.font.is_some() { VALUE_SIZE * 0.06 } else { 0.0 };
    let total = text.x + gap + glyph_advance(VALUE_SIZE);

    let center = Vec2::new(WIDTH as f32 * 0.5, HEIGHT as f32 * 0.5);
    let left = center.x - total * 0.5;
    label(
        &mut pm,
        art.fonts,
        art.font,
        rank,
        VALUE_SIZE,
        ink,
        Vec2::new(left, center.y - text.y * 0.5),
        Transform::identity(),
    );
    let suit_center = Vec2::new(left + text.x + gap + glyph_advance(VALUE_SIZE) * 0.5, center.y);
    draw_suit(&mut pm, card.suit, suit_center, VALUE_SIZE, ink, Transform::identity());
    Ok(pm)
}

fn front_template(pm: &mut Pixmap) -> Result<(), TextureError> {
    let outline = card_outline(WIDTH, HEIGHT, INSET, RADIUS).ok_or(TextureError::Shape)?;
    fill(pm, &outline, Color::from_hex(0xf7f3e8), Transform::identity(), None);
    stroke(pm, &outline, Color::from_hex(GOLD), 6.0, Transform::identity(), None);

    let inner = card_outline(WIDTH, HEIGHT, 30.0, 18.0).ok_or(TextureError::Shape)?;
    stroke(pm, &inner, Color::from_hex(GOLD).with_alpha(0.6), 2.0, Transform::identity(), None);
    Ok(())
}

pub fn back(colors: &ThemeColors, art: &CardArt<'_>) -> Result<BackMaps, TextureError> {
    let mut color = new_pixmap(WIDTH, HEIGHT)?;
    match &art.templates.back {
        Some(template) => draw_stretched(&mut color, template),
        None => back_template(&mut color)?,
    }
    draw_skull(&mut color, colors, SkullLayer::Full, SKULL_RECT)?;

    let mut emissive = new_pixmap(WIDTH, HEIGHT)?;
    emissive.fill(resvg::tiny_skia::Color::BLACK);
    draw_skull(&mut emissive, colors, SkullLayer::Eyes, SKULL_RECT)?;

    log::debug!("card back generated for {} / {} / {}", colors.base, colors.border, colors.eye);
    Ok(BackMaps { color, emissive })
}

fn back_template(pm: &mut Pixmap) -> Result<(), TextureError> {
    let outline = card_outline(WIDTH, HEIGHT, INSET, RADIUS).ok_or(TextureError::Shape)?;
    fill(pm, &outline, Color::from_hex(0x1b0030), Transform::identity(), None);
    stroke(pm, &outline, Color::from_hex(0x3a0a5c), 6.0, Transform::identity(), None);

    let inner = card_outline(WIDTH, HEIGHT, 30.0, 18.0).ok_or(TextureError::Shape)?;
    stroke(pm, &inner, Color::from_hex(GOLD).with_alpha(0.45), 2.0, Transform::identity(), None);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::textures::canvas::test_util::pixel;
    use crate::textures::Templates;
    use deck3d_cards::{Rank, Suit, Theme};
    use deck3d_engine::text::FontSystem;

    #[test]
    fn generated_front_is_cut_out_with_centered_suit() {
        let fonts = FontSystem::new();
        let templates = Templates::default();
        let art = CardArt { fonts: &fonts, font: None, templates: &templates };
        let pm = front(&Card::new(0, Rank::Ace, Suit::Hearts), &art).unwrap();
        assert_eq!((pm.width(), pm.height()), (WIDTH, HEIGHT));
        assert_eq!(pixel(&pm, 1, 1)[3], 0);
        assert_eq!(pixel(&pm, 256, 384), [0xd4, 0x00, 0x00, 0xff]);
        assert_eq!(pixel(&pm, 256, 150), [0xf7, 0xf3, 0xe8, 0xff]);
    }

    #[test]
    fn front_template_replaces_generated_background() {
        let fonts = FontSystem::new();
        let mut tpl = new_pixmap(4, 6).unwrap();
        tpl.fill(resvg::tiny_skia::Color::from_rgba8(0, 0, 255, 255));
        let templates = Templates { front: Some(tpl), back: None };
        let art = CardArt { fonts: &fonts, font: None, templates: &templates };
        let pm = front(&Card::new(0, Rank::Two, Suit::Spades), &art).unwrap();
        assert_eq!(pixel(&pm, 1, 1), [0, 0, 255, 255]);
        assert_eq!(pixel(&pm, 256, 384), [0x22, 0x22, 0x22, 0xff]);
    }

    #[test]
    fn back_follows_theme() {
        let fonts = FontSystem::new();
        let templates = Templates::default();
        let art = CardArt { fonts: &fonts, font: None, templates: &templates };
        let neon = Theme::preset("neon").unwrap();
        let maps = back(&neon.colors, &art).unwrap();

        // Left eye center: skull is drawn at 1.5x from (106, 204).
        let eye = (106 + 66 * 3 / 2, 204 + 108 * 3 / 2);
        assert_eq!(pixel(&maps.color, eye.0, eye.1), [0x00, 0xbf, 0xff, 0xff]);
        assert_eq!(pixel(&maps.emissive, eye.0, eye.1), [0x00, 0xbf, 0xff, 0xff]);

        // Cranium is base colored on the color map and dark on the emissive map.
        let forehead = (256, 204 + 60 * 3 / 2);
        assert_eq!(pixel(&maps.color, forehead.0, forehead.1), [0xc5, 0x51, 0xf5, 0xff]);
        assert_eq!(pixel(&maps.emissive, forehead.0, forehead.1), [0, 0, 0, 255]);

        assert_eq!(pixel(&maps.color, 1, 1)[3], 0);
    }
}
