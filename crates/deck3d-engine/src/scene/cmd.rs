use crate::scene::shapes::circle::CircleCmd;
use crate::scene::shapes::rect::RectCmd;
use crate::scene::shapes::rounded_rect::RoundedRectCmd;
use crate::scene::shapes::text::TextCmd;

/// Renderer-agnostic draw command. Push helpers live next to each payload in `scene::shapes`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    RoundedRect(RoundedRectCmd),
    Circle(CircleCmd),
    Text(TextCmd),
}
