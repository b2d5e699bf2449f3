//! deck3d card model.
//!
//! Everything the viewer knows about cards that is not rendering: identities,
//! the sample decks, pile membership, themes and the small tween helpers used
//! to animate card transforms. No GPU or window types appear here.

pub mod card;
pub mod color;
pub mod deck;
pub mod error;
pub mod piles;
pub mod theme;
pub mod tween;

pub use card::{Card, CardId, Rank, Suit};
pub use color::{Hsv, Rgb};
pub use deck::{fan_deck, table_deck};
pub use error::{ColorParseError, PileError, RankParseError};
pub use piles::{PileChange, PileKind, Piles};
pub use theme::{ColorSlot, Theme, ThemeColors, quantize_bloom};
pub use tween::{Easing, Lerp, Tween, damp, lerp};
