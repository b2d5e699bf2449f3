use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RankParseError;

/// Stable card identity. Survives pile transitions.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    #[inline]
    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// Ace through ten, in pip order.
    pub const PIPS: [Rank; 10] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    /// Ranks whose face carries a large suit glyph in the middle.
    pub fn has_center_pip(self) -> bool {
        matches!(
            self,
            Rank::Ace | Rank::King | Rank::Queen | Rank::Jack | Rank::Ten | Rank::Seven
        )
    }
}

impl FromStr for Rank {
    type Err = RankParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s.trim() {
            "A" | "a" => Rank::Ace,
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" => Rank::Ten,
            "J" | "j" => Rank::Jack,
            "Q" | "q" => Rank::Queen,
            "K" | "k" => Rank::King,
            other => return Err(RankParseError(other.to_string())),
        };
        Ok(rank)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[inline]
    pub const fn new(id: u32, rank: Rank, suit: Suit) -> Self {
        Self { id: CardId(id), rank, suit }
    }

    /// Rank label followed by the suit glyph, e.g. `10♥`.
    pub fn label(&self) -> String {
        format!("{}{}", self.rank.label(), self.suit.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn red_suits() {
        assert!(Suit::Hearts.is_red());
        assert!(Suit::Diamonds.is_red());
        assert!(!Suit::Clubs.is_red());
        assert!(!Suit::Spades.is_red());
    }

    #[test]
    fn rank_labels_parse_back() {
        for rank in Rank::PIPS.iter().chain(&[Rank::Jack, Rank::Queen, Rank::King]) {
            assert_eq!(rank.label().parse::<Rank>().unwrap(), *rank);
        }
    }

    #[test]
    fn unknown_rank_label_is_rejected() {
        let err = "11".parse::<Rank>().unwrap_err();
        assert_eq!(err, RankParseError("11".to_string()));
    }

    #[test]
    fn card_label_joins_rank_and_suit() {
        assert_eq!(Card::new(0, Rank::Ten, Suit::Hearts).label(), "10♥");
        assert_eq!(Card::new(1, Rank::Ace, Suit::Spades).to_string(), "A♠");
    }

    #[test]
    fn center_pip_ranks() {
        assert!(Rank::Seven.has_center_pip());
        assert!(Rank::Queen.has_center_pip());
        assert!(!Rank::Two.has_center_pip());
        assert!(!Rank::Nine.has_center_pip());
    }
}
