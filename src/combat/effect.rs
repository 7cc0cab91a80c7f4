//! Status effects attached to combatants.
//!
//! The engine tracks only names and durations. What an effect does is up
//! to the `BattleHooks` implementation that reads it.

use serde::{Deserialize, Serialize};

/// A timed status effect.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusEffect {
    /// Effect name, e.g. "Poison".
    pub name: String,

    /// Turns left before the effect expires.
    pub remaining_turns: u32,
}

impl StatusEffect {
    /// Create an effect lasting `turns` ticks.
    #[must_use]
    pub fn new(name: impl Into<String>, turns: u32) -> Self {
        Self {
            name: name.into(),
            remaining_turns: turns,
        }
    }

    /// Count down one turn. Returns `true` once the effect has expired.
    pub fn tick(&mut self) -> bool {
        self.remaining_turns = self.remaining_turns.saturating_sub(1);
        self.is_expired()
    }

    /// Check if no turns remain.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining_turns == 0
    }
}
