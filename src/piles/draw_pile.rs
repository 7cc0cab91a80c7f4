//! Draw pile: the shuffled stack a battle draws from.
//!
//! The pile is materialized from a `DeckList` snapshot. The top of the pile
//! is the last element of the backing vec, so a draw is a `pop`.

use smallvec::SmallVec;
use tracing::{debug, trace};

use super::deck::{Deck, DeckList};
use crate::cards::CardInstance;
use crate::core::entity::IdAllocator;
use crate::core::rng::{GameRng, GameRngState};
use crate::events::{DrawPileEvent, ListenerId, Listeners};

/// Cards returned by a multi-draw. Hands are small, so this rarely spills.
pub type DrawnCards = SmallVec<[CardInstance; 8]>;

/// Ordered, shuffled stack of card instances.
///
/// ```
/// use card_battle::cards::CardRecipe;
/// use card_battle::core::GameRng;
/// use card_battle::piles::{Deck, DrawPile};
///
/// let deck = Deck::with_cards("Starter", [(CardRecipe::new("Strike", 1), 3)]);
/// let mut pile = DrawPile::new(&deck, GameRng::new(42));
/// pile.initialize();
///
/// assert_eq!(pile.remaining(), 3);
/// assert!(pile.draw_card().is_some());
/// assert_eq!(pile.remaining(), 2);
/// ```
#[derive(Debug)]
pub struct DrawPile {
    /// Index 0 is the bottom, the last element is the top.
    cards: Vec<CardInstance>,

    source: DeckList,
    ids: IdAllocator,
    rng: GameRng,
    listeners: Listeners<DrawPileEvent>,
}

impl DrawPile {
    /// Bind a pile to a snapshot of `deck`. The pile starts empty; call
    /// `initialize` before the first draw.
    pub fn new(deck: &Deck, rng: GameRng) -> Self {
        Self::from_list(deck.list(), rng)
    }

    /// Bind a pile to an existing deck snapshot.
    pub fn from_list(source: DeckList, rng: GameRng) -> Self {
        Self {
            cards: Vec::new(),
            source,
            ids: IdAllocator::new(),
            rng,
            listeners: Listeners::new(),
        }
    }

    /// Rebuild the pile from the bound deck and shuffle it.
    pub fn initialize(&mut self) {
        self.cards.clear();
        for (recipe, count) in self.source.iter() {
            for _ in 0..*count {
                let id = self.ids.alloc();
                self.cards.push(CardInstance::new(id, recipe.clone()));
            }
        }
        debug!(cards = self.cards.len(), "draw pile initialized");

        self.shuffle();
    }

    /// Uniformly permute the whole pile.
    pub fn shuffle(&mut self) {
        self.rng.shuffle(&mut self.cards);
        trace!(remaining = self.cards.len(), "draw pile shuffled");

        self.listeners.emit(&DrawPileEvent::Shuffled {
            remaining: self.cards.len(),
        });
    }

    /// Remove and return the top card, or `None` if the pile is empty.
    pub fn draw_card(&mut self) -> Option<CardInstance> {
        let card = self.cards.pop()?;
        trace!(card = %card.recipe, id = %card.id, remaining = self.cards.len(), "card drawn");

        self.listeners.emit(&DrawPileEvent::CardDrawn {
            remaining: self.cards.len(),
        });
        Some(card)
    }

    /// Draw up to `count` cards, stopping early when the pile runs out.
    pub fn draw_cards(&mut self, count: usize) -> DrawnCards {
        let mut drawn = DrawnCards::new();
        for _ in 0..count {
            match self.draw_card() {
                Some(card) => drawn.push(card),
                None => break,
            }
        }
        drawn
    }

    /// Rebuild the whole pile from deck counts, then announce the reset.
    ///
    /// Cards previously drawn are not consulted; callers holding a hand or
    /// discard must clear them to keep the card count consistent.
    pub fn reset(&mut self) {
        self.initialize();
        debug!(remaining = self.cards.len(), "draw pile reset");

        self.listeners.emit(&DrawPileEvent::Reset {
            remaining: self.cards.len(),
        });
    }

    /// Bind a new deck snapshot. Takes effect on the next `initialize`/`reset`.
    pub fn rebind(&mut self, deck: &Deck) {
        self.source = deck.list();
    }

    /// Number of cards left.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Check if the pile is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check if at most `threshold` cards are left.
    #[must_use]
    pub fn is_low_on_cards(&self, threshold: usize) -> bool {
        self.cards.len() <= threshold
    }

    /// Cards bottom to top.
    #[must_use]
    pub fn cards(&self) -> &[CardInstance] {
        &self.cards
    }

    /// Top card without drawing it.
    #[must_use]
    pub fn peek(&self) -> Option<&CardInstance> {
        self.cards.last()
    }

    /// The bound deck snapshot.
    #[must_use]
    pub fn deck(&self) -> &DeckList {
        &self.source
    }

    /// Shuffle RNG state, for reproducing a battle.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Subscribe to pile changes.
    pub fn subscribe(&mut self, callback: impl FnMut(&DrawPileEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    /// Remove a subscription.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }
}
