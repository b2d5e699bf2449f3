//! Sample decks shown by the viewer.

use crate::card::{Card, Rank, Suit};

/// Ten cards for the pile table: suits cycle ♥ ♦ ♣ ♠, ranks run A..10.
pub fn table_deck() -> Vec<Card> {
    (0..10u32)
        .map(|i| {
            let suit = Suit::ALL[i as usize % Suit::ALL.len()];
            let rank = Rank::PIPS[i as usize % Rank::PIPS.len()];
            Card::new(i, rank, suit)
        })
        .collect()
}

/// Six cards for the fan layout.
pub fn fan_deck() -> Vec<Card> {
    vec![
        Card::new(0, Rank::Ace, Suit::Spades),
        Card::new(1, Rank::King, Suit::Hearts),
        Card::new(2, Rank::Queen, Suit::Diamonds),
        Card::new(3, Rank::Jack, Suit::Clubs),
        Card::new(4, Rank::Ten, Suit::Hearts),
        Card::new(5, Rank::Seven, Suit::Spades),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardId;

    #[test]
    fn table_deck_cycles_suits_and_ranks() {
        let deck = table_deck();
        assert_eq!(deck.len(), 10);
        assert_eq!(deck[0], Card::new(0, Rank::Ace, Suit::Hearts));
        assert_eq!(deck[5], Card::new(5, Rank::Six, Suit::Diamonds));
        assert_eq!(deck[9], Card::new(9, Rank::Ten, Suit::Diamonds));
        for (i, card) in deck.iter().enumerate() {
            assert_eq!(card.id, CardId(i as u32));
        }
    }

    #[test]
    fn fan_deck_labels() {
        let labels: Vec<String> = fan_deck().iter().map(Card::label).collect();
        assert_eq!(labels, ["A♠", "K♥", "Q♦", "J♣", "10♥", "7♠"]);
    }
}
