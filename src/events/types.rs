//! Event enums, one closed set per entity kind.
//!
//! Events carry data only. A subscriber knows which entity it subscribed
//! to, so events never point back at their source.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::battle::Turn;
use crate::cards::{CardInstance, CardRecipe};

/// Deck change notifications.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckEvent {
    /// The deck was renamed.
    NameChanged { old: String, new: String },

    /// A recipe's count changed. `new_count` is 0 when the entry was removed.
    CardCountChanged {
        recipe: CardRecipe,
        old_count: u32,
        new_count: u32,
    },
}

impl DeckEvent {
    /// Count change for `CardCountChanged`, `None` otherwise.
    #[must_use]
    pub fn count_delta(&self) -> Option<i64> {
        match self {
            DeckEvent::CardCountChanged {
                old_count,
                new_count,
                ..
            } => Some(i64::from(*new_count) - i64::from(*old_count)),
            DeckEvent::NameChanged { .. } => None,
        }
    }
}

/// Draw pile notifications. Each carries the resulting pile size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawPileEvent {
    /// The pile was reordered.
    Shuffled { remaining: usize },

    /// A card was removed from the top.
    CardDrawn { remaining: usize },

    /// The pile was rebuilt from the deck.
    Reset { remaining: usize },
}

impl DrawPileEvent {
    /// Pile size after the change.
    #[must_use]
    pub fn remaining(&self) -> usize {
        match *self {
            DrawPileEvent::Shuffled { remaining }
            | DrawPileEvent::CardDrawn { remaining }
            | DrawPileEvent::Reset { remaining } => remaining,
        }
    }
}

/// Hand and discard notifications.
///
/// Snapshots are persistent vectors, so cloning them into an event is O(1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PileEvent {
    /// Contents changed; full before and after snapshots.
    CardsChanged {
        before: Vector<CardInstance>,
        after: Vector<CardInstance>,
    },
}

/// Combatant notifications.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatantEvent {
    /// HP changed (never fired for a no-op assignment).
    HpChanged { old: i64, new: i64 },

    /// Mana changed (never fired for a no-op assignment).
    ManaChanged { old: i64, new: i64 },

    /// The combatant was renamed.
    NameChanged { old: String, new: String },
}

impl CombatantEvent {
    /// Signed change for HP and mana events. Positive means gain.
    #[must_use]
    pub fn delta(&self) -> Option<i64> {
        match self {
            CombatantEvent::HpChanged { old, new } | CombatantEvent::ManaChanged { old, new } => {
                Some(new - old)
            }
            CombatantEvent::NameChanged { .. } => None,
        }
    }
}

/// Battle-level notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// Control passed to the other side.
    TurnChanged { turn: Turn, turn_number: u32 },

    /// The battle ended. Fired exactly once per battle.
    Ended { player_won: bool },
}
