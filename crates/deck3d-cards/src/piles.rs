use crate::card::{Card, CardId};
use crate::error::PileError;

/// Which group a card currently belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PileKind {
    Main,
    Active,
    Discard,
}

/// Result of a successful click on the main pile.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PileChange {
    /// Card that left the main pile and is now active.
    pub activated: CardId,
    /// Previously active card, now on top of the discard pile.
    pub discarded: Option<CardId>,
}

/// Main / active / discard membership.
///
/// Invariant: every card of the original deck is in exactly one place.
/// `discard` is ordered newest first.
#[derive(Debug, Clone)]
pub struct Piles {
    deck: Vec<Card>,
    main: Vec<Card>,
    active: Option<Card>,
    discard: Vec<Card>,
}

impl Piles {
    pub fn new(deck: Vec<Card>) -> Self {
        Self {
            main: deck.clone(),
            deck,
            active: None,
            discard: Vec::new(),
        }
    }

    #[inline]
    pub fn main(&self) -> &[Card] {
        &self.main
    }

    #[inline]
    pub fn active(&self) -> Option<&Card> {
        self.active.as_ref()
    }

    #[inline]
    pub fn discard(&self) -> &[Card] {
        &self.discard
    }

    /// Total number of cards across all piles.
    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    /// True once nothing is left to click.
    pub fn is_exhausted(&self) -> bool {
        self.main.is_empty()
    }

    /// Finds a card and reports its pile and index inside that pile.
    pub fn locate(&self, id: CardId) -> Option<(PileKind, usize)> {
        if let Some(i) = self.main.iter().position(|c| c.id == id) {
            return Some((PileKind::Main, i));
        }
        if self.active.is_some_and(|c| c.id == id) {
            return Some((PileKind::Active, 0));
        }
        self.discard
            .iter()
            .position(|c| c.id == id)
            .map(|i| (PileKind::Discard, i))
    }

    /// Moves `id` from the main pile to the active slot.
    ///
    /// The previously active card, if any, goes to the front of the discard pile.
    pub fn click(&mut self, id: CardId) -> Result<PileChange, PileError> {
        let index = self
            .main
            .iter()
            .position(|c| c.id == id)
            .ok_or(PileError::NotInMain(id))?;

        let card = self.main.remove(index);
        let discarded = self.active.replace(card).map(|prev| {
            self.discard.insert(0, prev);
            prev.id
        });

        log::debug!("card {} activated (discarded: {:?})", id, discarded);

        Ok(PileChange { activated: id, discarded })
    }

    /// Puts every card back in the main pile in deck order.
    pub fn reset(&mut self) {
        self.main = self.deck.clone();
        self.active = None;
        self.discard.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::table_deck;

    fn ids(cards: &[Card]) -> Vec<u32> {
        cards.iter().map(|c| c.id.0).collect()
    }

    fn assert_conserved(p: &Piles) {
        let mut all: Vec<u32> = ids(p.main());
        all.extend(p.active().map(|c| c.id.0));
        all.extend(ids(p.discard()));
        all.sort_unstable();
        assert_eq!(all, (0..p.len() as u32).collect::<Vec<_>>());
    }

    #[test]
    fn starts_with_everything_in_main() {
        let p = Piles::new(table_deck());
        assert_eq!(p.main().len(), 10);
        assert!(p.active().is_none());
        assert!(p.discard().is_empty());
        assert_conserved(&p);
    }

    #[test]
    fn first_click_activates_without_discarding() {
        let mut p = Piles::new(table_deck());
        let change = p.click(CardId(3)).unwrap();
        assert_eq!(change, PileChange { activated: CardId(3), discarded: None });
        assert_eq!(p.active().map(|c| c.id), Some(CardId(3)));
        assert_eq!(ids(p.main()), [0, 1, 2, 4, 5, 6, 7, 8, 9]);
        assert_conserved(&p);
    }

    #[test]
    fn later_clicks_push_previous_active_to_discard_front() {
        let mut p = Piles::new(table_deck());
        p.click(CardId(0)).unwrap();
        p.click(CardId(1)).unwrap();
        let change = p.click(CardId(2)).unwrap();

        assert_eq!(change.discarded, Some(CardId(1)));
        assert_eq!(ids(p.discard()), [1, 0]);
        assert_eq!(p.active().map(|c| c.id), Some(CardId(2)));
        assert_conserved(&p);
    }

    #[test]
    fn active_and_discarded_cards_are_not_clickable() {
        let mut p = Piles::new(table_deck());
        p.click(CardId(0)).unwrap();
        p.click(CardId(1)).unwrap();

        assert_eq!(p.click(CardId(1)), Err(PileError::NotInMain(CardId(1))));
        assert_eq!(p.click(CardId(0)), Err(PileError::NotInMain(CardId(0))));
        assert_eq!(p.click(CardId(42)), Err(PileError::NotInMain(CardId(42))));
        assert_eq!(ids(p.discard()), [0]);
        assert_conserved(&p);
    }

    #[test]
    fn exhausting_main_pile() {
        let mut p = Piles::new(table_deck());
        for i in 0..10 {
            p.click(CardId(i)).unwrap();
        }
        assert!(p.is_exhausted());
        assert_eq!(p.discard().len(), 9);
        assert_eq!(p.discard()[0].id, CardId(8));
        assert_conserved(&p);
    }

    #[test]
    fn locate_reports_pile_and_index() {
        let mut p = Piles::new(table_deck());
        p.click(CardId(4)).unwrap();
        p.click(CardId(7)).unwrap();
        assert_eq!(p.locate(CardId(7)), Some((PileKind::Active, 0)));
        assert_eq!(p.locate(CardId(4)), Some((PileKind::Discard, 0)));
        assert_eq!(p.locate(CardId(5)), Some((PileKind::Main, 4)));
        assert_eq!(p.locate(CardId(99)), None);
    }

    #[test]
    fn reset_restores_deck_order() {
        let mut p = Piles::new(table_deck());
        p.click(CardId(5)).unwrap();
        p.click(CardId(2)).unwrap();
        p.reset();
        assert_eq!(ids(p.main()), (0..10).collect::<Vec<_>>());
        assert!(p.active().is_none());
        assert!(p.discard().is_empty());
    }
}
