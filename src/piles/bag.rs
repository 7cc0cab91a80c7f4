//! Unordered card bags: the hand and the discard pile.
//!
//! Both piles have the same shape, so they share one type. Every mutation
//! emits `PileEvent::CardsChanged` with full before and after snapshots;
//! the backing `im::Vector` makes those snapshots O(1).

use im::Vector;

use crate::cards::CardInstance;
use crate::core::entity::InstanceId;
use crate::events::{ListenerId, Listeners, PileEvent};

/// A bag of card instances with change notifications.
#[derive(Debug, Default)]
pub struct CardBag {
    cards: Vector<CardInstance>,
    listeners: Listeners<PileEvent>,
}

/// The player's hand.
pub type Hand = CardBag;

/// The discard pile.
pub type Discard = CardBag;

impl CardBag {
    /// Create an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card.
    pub fn add_card(&mut self, card: CardInstance) {
        let before = self.cards.clone();
        self.cards.push_back(card);
        self.notify(before);
    }

    /// Add several cards under a single notification. No-op when empty.
    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = CardInstance>) {
        let before = self.cards.clone();
        self.cards.extend(cards);
        if self.cards.len() != before.len() {
            self.notify(before);
        }
    }

    /// Remove the card with `id`. Returns `None` (and stays silent) if absent.
    pub fn remove_card(&mut self, id: InstanceId) -> Option<CardInstance> {
        let index = self.cards.iter().position(|c| c.id == id)?;
        let before = self.cards.clone();
        let card = self.cards.remove(index);
        self.notify(before);
        Some(card)
    }

    /// Remove and return every card. No-op when already empty.
    pub fn clear(&mut self) -> Vector<CardInstance> {
        if self.cards.is_empty() {
            return Vector::new();
        }
        let before = std::mem::take(&mut self.cards);
        self.notify(before.clone());
        before
    }

    /// Remove cards from the newest end until at most `limit` remain.
    ///
    /// Returns the removed cards, oldest first.
    pub fn truncate(&mut self, limit: usize) -> Vector<CardInstance> {
        if self.cards.len() <= limit {
            return Vector::new();
        }
        let before = self.cards.clone();
        let removed = self.cards.split_off(limit);
        self.notify(before);
        removed
    }

    /// Read-only view of the cards, oldest first.
    #[must_use]
    pub fn cards(&self) -> &Vector<CardInstance> {
        &self.cards
    }

    /// Look up a card by id.
    #[must_use]
    pub fn get(&self, id: InstanceId) -> Option<&CardInstance> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Check if a card is in the bag.
    #[must_use]
    pub fn contains(&self, id: InstanceId) -> bool {
        self.get(id).is_some()
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Subscribe to content changes.
    pub fn subscribe(&mut self, callback: impl FnMut(&PileEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    /// Remove a subscription.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn notify(&mut self, before: Vector<CardInstance>) {
        self.listeners.emit(&PileEvent::CardsChanged {
            before,
            after: self.cards.clone(),
        });
    }
}
