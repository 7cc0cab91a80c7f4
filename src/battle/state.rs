//! Battle state: combatants, turn and termination status.

use serde::{Deserialize, Serialize};

use crate::combat::Combatant;

/// Whose turn it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Turn {
    #[default]
    Player,
    Enemy,
}

impl Turn {
    /// The other side.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Turn::Player => Turn::Enemy,
            Turn::Enemy => Turn::Player,
        }
    }
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Turn::Player => write!(f, "player turn"),
            Turn::Enemy => write!(f, "enemy turn"),
        }
    }
}

/// Whether the battle is still running. `Over` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BattleStatus {
    #[default]
    Active,
    Over { player_won: bool },
}

impl BattleStatus {
    /// Check if the battle has ended.
    #[must_use]
    pub fn is_over(self) -> bool {
        matches!(self, BattleStatus::Over { .. })
    }

    /// `Some(player_won)` once over.
    #[must_use]
    pub fn player_won(self) -> Option<bool> {
        match self {
            BattleStatus::Active => None,
            BattleStatus::Over { player_won } => Some(player_won),
        }
    }
}

/// Everything about a battle except the card piles.
#[derive(Debug)]
pub struct BattleState {
    pub(crate) player: Combatant,
    pub(crate) enemies: Vec<Combatant>,
    pub(crate) turn: Turn,
    pub(crate) turn_number: u32,
    pub(crate) status: BattleStatus,
}

impl BattleState {
    /// Start on the player's first turn.
    pub fn new(player: Combatant, enemies: Vec<Combatant>) -> Self {
        Self {
            player,
            enemies,
            turn: Turn::Player,
            turn_number: 1,
            status: BattleStatus::Active,
        }
    }

    #[must_use]
    pub fn player(&self) -> &Combatant {
        &self.player
    }

    #[must_use]
    pub fn enemies(&self) -> &[Combatant] {
        &self.enemies
    }

    #[must_use]
    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Starts at 1, increments each time control returns to the player.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn status(&self) -> BattleStatus {
        self.status
    }

    /// Termination predicate, ignoring the current status.
    ///
    /// Player death is checked first, so a simultaneous wipe is a loss.
    /// Returns `Some(player_won)` when a terminal condition holds.
    #[must_use]
    pub fn outcome(&self) -> Option<bool> {
        if self.player.hp() <= 0 {
            return Some(false);
        }
        if self.enemies.iter().all(|e| e.hp() <= 0) {
            return Some(true);
        }
        None
    }
}
