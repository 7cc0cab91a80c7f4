//! Card flow between the three battle piles.
//!
//! `CardPiles` owns the draw pile, hand and discard for one battle and only
//! offers moves that keep the card count constant:
//!
//! ```text
//! draw pile --draw--> hand --play/discard--> discard
//!     ^                                         |
//!     +------------------ reset ----------------+
//! ```
//!
//! After every operation `draw_pile + hand + discard` equals the deck total
//! as of the last initialize/reset.

use im::Vector;
use tracing::debug;

use super::bag::{Discard, Hand};
use super::deck::Deck;
use super::draw_pile::{DrawPile, DrawnCards};
use crate::cards::CardInstance;
use crate::core::entity::InstanceId;
use crate::core::rng::GameRng;

/// The draw pile, hand and discard of one battle.
#[derive(Debug)]
pub struct CardPiles {
    draw_pile: DrawPile,
    hand: Hand,
    discard: Discard,
}

impl CardPiles {
    /// Materialize `deck` into a shuffled draw pile with an empty hand and
    /// discard.
    pub fn new(deck: &Deck, rng: GameRng) -> Self {
        let mut draw_pile = DrawPile::new(deck, rng);
        draw_pile.initialize();
        Self {
            draw_pile,
            hand: Hand::new(),
            discard: Discard::new(),
        }
    }

    /// Draw the top card into the hand. Returns a copy of the drawn card.
    pub fn draw_to_hand(&mut self) -> Option<CardInstance> {
        let card = self.draw_pile.draw_card()?;
        self.hand.add_card(card.clone());
        Some(card)
    }

    /// Draw up to `count` cards into the hand.
    pub fn draw_many_to_hand(&mut self, count: usize) -> DrawnCards {
        let drawn = self.draw_pile.draw_cards(count);
        self.hand.add_cards(drawn.iter().cloned());
        drawn
    }

    /// Move a card from the hand to the discard pile.
    pub fn discard_from_hand(&mut self, id: InstanceId) -> Option<CardInstance> {
        let card = self.hand.remove_card(id)?;
        self.discard.add_card(card.clone());
        Some(card)
    }

    /// Discard the newest cards until the hand holds at most `limit`.
    ///
    /// Returns the number of cards discarded.
    pub fn discard_down_to(&mut self, limit: usize) -> usize {
        let overflow = self.hand.truncate(limit);
        let count = overflow.len();
        self.discard.add_cards(overflow);
        count
    }

    /// Empty the hand and discard, then rebuild the draw pile from the deck.
    pub fn reset(&mut self) {
        let returned = self.hand.clear().len() + self.discard.clear().len();
        debug!(returned, "piles reset");
        self.draw_pile.reset();
    }

    /// Bind a new deck snapshot and reset.
    pub fn rebind(&mut self, deck: &Deck) {
        self.draw_pile.rebind(deck);
        self.reset();
    }

    /// Cards across all three piles.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.draw_pile.remaining() + self.hand.len() + self.discard.len()
    }

    /// Every card currently in play, draw pile first.
    #[must_use]
    pub fn all_cards(&self) -> Vector<CardInstance> {
        let mut all: Vector<CardInstance> = self.draw_pile.cards().iter().cloned().collect();
        all.append(self.hand.cards().clone());
        all.append(self.discard.cards().clone());
        all
    }

    /// The draw pile.
    #[must_use]
    pub fn draw_pile(&self) -> &DrawPile {
        &self.draw_pile
    }

    /// The hand.
    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// The discard pile.
    #[must_use]
    pub fn discard(&self) -> &Discard {
        &self.discard
    }

    pub(crate) fn draw_pile_mut(&mut self) -> &mut DrawPile {
        &mut self.draw_pile
    }

    pub(crate) fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub(crate) fn discard_mut(&mut self) -> &mut Discard {
        &mut self.discard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardRecipe;

    fn deck_of(total: u32) -> Deck {
        Deck::with_cards(
            "Test",
            [
                (CardRecipe::new("Strike", 1), total / 2),
                (CardRecipe::new("Defend", 1), total - total / 2),
            ],
        )
    }

    #[test]
    fn test_new_initializes() {
        let piles = CardPiles::new(&deck_of(10), GameRng::new(5));
        assert_eq!(piles.draw_pile().remaining(), 10);
        assert!(piles.hand().is_empty());
        assert!(piles.discard().is_empty());
    }

    #[test]
    fn test_draw_moves_into_hand() {
        let mut piles = CardPiles::new(&deck_of(4), GameRng::new(5));

        let card = piles.draw_to_hand().unwrap();

        assert!(piles.hand().contains(card.id));
        assert_eq!(piles.draw_pile().remaining(), 3);
        assert_eq!(piles.total_cards(), 4);
    }

    #[test]
    fn test_draw_many_conserves() {
        let mut piles = CardPiles::new(&deck_of(3), GameRng::new(5));

        let drawn = piles.draw_many_to_hand(5);

        assert_eq!(drawn.len(), 3);
        assert_eq!(piles.hand().len(), 3);
        assert_eq!(piles.total_cards(), 3);
        assert!(piles.draw_to_hand().is_none());
    }

    #[test]
    fn test_discard_from_hand() {
        let mut piles = CardPiles::new(&deck_of(4), GameRng::new(5));
        let card = piles.draw_to_hand().unwrap();

        assert!(piles.discard_from_hand(card.id).is_some());
        assert!(piles.discard_from_hand(card.id).is_none());
        assert!(piles.discard().contains(card.id));
        assert_eq!(piles.total_cards(), 4);
    }

    #[test]
    fn test_discard_down_to() {
        let mut piles = CardPiles::new(&deck_of(8), GameRng::new(5));
        piles.draw_many_to_hand(6);

        assert_eq!(piles.discard_down_to(4), 2);
        assert_eq!(piles.hand().len(), 4);
        assert_eq!(piles.discard().len(), 2);
        assert_eq!(piles.discard_down_to(4), 0);
        assert_eq!(piles.total_cards(), 8);
    }

    #[test]
    fn test_reset_rebuilds_full_deck() {
        let mut piles = CardPiles::new(&deck_of(14), GameRng::new(5));
        let drawn = piles.draw_many_to_hand(10);
        for card in drawn.iter().take(6) {
            piles.discard_from_hand(card.id);
        }
        assert_eq!(piles.hand().len(), 4);
        assert_eq!(piles.discard().len(), 6);

        piles.reset();

        assert_eq!(piles.draw_pile().remaining(), 14);
        assert!(piles.hand().is_empty());
        assert!(piles.discard().is_empty());
    }

    #[test]
    fn test_all_cards_ids_unique() {
        let mut piles = CardPiles::new(&deck_of(6), GameRng::new(5));
        let card = piles.draw_to_hand().unwrap();
        piles.discard_from_hand(card.id);
        piles.draw_to_hand();

        let mut ids: Vec<_> = piles.all_cards().iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_rebind() {
        let mut deck = deck_of(4);
        let mut piles = CardPiles::new(&deck, GameRng::new(5));
        piles.draw_to_hand();

        deck.add_card(&CardRecipe::new("Heal", 1));
        piles.rebind(&deck);

        assert_eq!(piles.draw_pile().remaining(), 5);
        assert_eq!(piles.total_cards(), 5);
    }
}
