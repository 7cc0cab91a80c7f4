//! Deck: the build-time recipe multiset.
//!
//! A `Deck` maps each recipe to a positive count and remembers the order in
//! which recipes were first added, so materializing it into a draw pile is
//! deterministic for a given seed.
//!
//! Battle code never mutates a deck. A draw pile binds a `DeckList`, a
//! structurally shared snapshot of the entries that is O(1) to take.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardRecipe;
use crate::events::{DeckEvent, ListenerId, Listeners};

/// A player's deck.
///
/// ```
/// use card_battle::cards::CardRecipe;
/// use card_battle::piles::Deck;
///
/// let fireball = CardRecipe::new("Fireball", 2);
/// let mut deck = Deck::new("Starter");
/// deck.add_card(&fireball);
/// deck.add_card(&fireball);
///
/// assert_eq!(deck.count(&fireball), 2);
/// assert_eq!(deck.total_count(), 2);
/// ```
#[derive(Debug)]
pub struct Deck {
    name: String,

    /// Recipes in first-insertion order.
    order: Vec<CardRecipe>,

    /// Counts, always >= 1 for every key.
    counts: FxHashMap<CardRecipe, u32>,

    listeners: Listeners<DeckEvent>,
}

impl Deck {
    /// Create an empty deck.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            order: Vec::new(),
            counts: FxHashMap::default(),
            listeners: Listeners::new(),
        }
    }

    /// Create a deck from `(recipe, count)` pairs. Zero counts are skipped.
    pub fn with_cards(
        name: impl Into<String>,
        cards: impl IntoIterator<Item = (CardRecipe, u32)>,
    ) -> Self {
        let mut deck = Self::new(name);
        for (recipe, count) in cards {
            if count == 0 {
                continue;
            }
            match deck.counts.get_mut(&recipe) {
                Some(existing) => *existing = existing.saturating_add(count),
                None => {
                    deck.order.push(recipe.clone());
                    deck.counts.insert(recipe, count);
                }
            }
        }
        deck
    }

    /// Deck name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the deck.
    pub fn rename(&mut self, name: impl Into<String>) {
        let old = std::mem::replace(&mut self.name, name.into());
        self.listeners.emit(&DeckEvent::NameChanged {
            old,
            new: self.name.clone(),
        });
    }

    /// Add one copy of `recipe`. The count saturates at `u32::MAX`.
    pub fn add_card(&mut self, recipe: &CardRecipe) {
        let old_count = self.count(recipe);
        let new_count = old_count.saturating_add(1);

        if old_count == 0 {
            self.order.push(recipe.clone());
        }
        self.counts.insert(recipe.clone(), new_count);

        self.listeners.emit(&DeckEvent::CardCountChanged {
            recipe: recipe.clone(),
            old_count,
            new_count,
        });
    }

    /// Remove one copy of `recipe`. No-op if the deck has none.
    pub fn remove_card(&mut self, recipe: &CardRecipe) {
        let Some(&old_count) = self.counts.get(recipe) else {
            return;
        };

        let new_count = old_count - 1;
        if new_count == 0 {
            self.counts.remove(recipe);
            self.order.retain(|r| r != recipe);
        } else {
            self.counts.insert(recipe.clone(), new_count);
        }

        self.listeners.emit(&DeckEvent::CardCountChanged {
            recipe: recipe.clone(),
            old_count,
            new_count,
        });
    }

    /// Copies of `recipe` in the deck.
    #[must_use]
    pub fn count(&self, recipe: &CardRecipe) -> u32 {
        self.counts.get(recipe).copied().unwrap_or(0)
    }

    /// Total number of cards.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.counts.values().map(|&c| c as usize).sum()
    }

    /// Check if the deck holds any copy of `recipe`.
    #[must_use]
    pub fn contains(&self, recipe: &CardRecipe) -> bool {
        self.counts.contains_key(recipe)
    }

    /// Number of distinct recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the deck has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Recipes in first-insertion order.
    pub fn recipes(&self) -> impl Iterator<Item = &CardRecipe> {
        self.order.iter()
    }

    /// `(recipe, count)` pairs in first-insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&CardRecipe, u32)> {
        self.order.iter().map(|r| (r, self.count(r)))
    }

    /// Snapshot the current entries.
    #[must_use]
    pub fn list(&self) -> DeckList {
        DeckList {
            entries: self.entries().map(|(r, c)| (r.clone(), c)).collect(),
        }
    }

    /// Subscribe to deck changes.
    pub fn subscribe(&mut self, callback: impl FnMut(&DeckEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    /// Remove a subscription.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

/// Immutable snapshot of a deck's `(recipe, count)` entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckList {
    entries: Vector<(CardRecipe, u32)>,
}

impl DeckList {
    /// Entries in deck order.
    pub fn iter(&self) -> impl Iterator<Item = &(CardRecipe, u32)> {
        self.entries.iter()
    }

    /// Total number of cards.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.entries.iter().map(|(_, c)| *c as usize).sum()
    }

    /// Check if the snapshot has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<&Deck> for DeckList {
    fn from(deck: &Deck) -> Self {
        deck.list()
    }
}
