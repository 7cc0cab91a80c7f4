//! Battle configuration types.
//!
//! Embedders configure a battle at startup by providing:
//! - `CombatantConfig`: Starting stats for the player and each enemy
//! - `BattleConfig`: Combatants plus turn-cycle parameters
//!
//! Both types deserialize with serde defaults, so a partial document such as
//! `{"seed": 7, "enemies": [{"name": "Slime", "hp": 20, "max_hp": 20}]}`
//! is a complete configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("battle needs at least one enemy")]
    NoEnemies,

    #[error("combatant '{name}' has max_hp {max_hp}, must be at least 1")]
    InvalidMaxHp { name: String, max_hp: i64 },

    #[error("combatant '{name}' has negative max_mana {max_mana}")]
    InvalidMaxMana { name: String, max_mana: i64 },

    #[error("mana_per_turn must not be negative (got {0})")]
    NegativeManaPerTurn(i64),

    #[error("hand_limit must be at least 1 when set")]
    ZeroHandLimit,
}

/// Starting stats for one combatant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatantConfig {
    /// Display name.
    pub name: String,

    /// Starting HP (clamped into `[0, max_hp]` on construction).
    pub hp: i64,

    /// Maximum HP.
    pub max_hp: i64,

    /// Starting mana. Ignored for enemies.
    pub mana: i64,

    /// Maximum mana. Ignored for enemies.
    pub max_mana: i64,

    /// Damage dealt per enemy action. Ignored for the player.
    pub attack: i64,
}

impl Default for CombatantConfig {
    fn default() -> Self {
        Self {
            name: "Player".to_string(),
            hp: 100,
            max_hp: 100,
            mana: 0,
            max_mana: 10,
            attack: 0,
        }
    }
}

impl CombatantConfig {
    /// Create a configuration with full HP and no mana.
    pub fn new(name: impl Into<String>, max_hp: i64) -> Self {
        Self {
            name: name.into(),
            hp: max_hp,
            max_hp,
            mana: 0,
            max_mana: 0,
            attack: 0,
        }
    }

    /// Set starting HP.
    #[must_use]
    pub fn with_hp(mut self, hp: i64) -> Self {
        self.hp = hp;
        self
    }

    /// Set starting and maximum mana.
    #[must_use]
    pub fn with_mana(mut self, mana: i64, max_mana: i64) -> Self {
        self.mana = mana;
        self.max_mana = max_mana;
        self
    }

    /// Set attack power.
    #[must_use]
    pub fn with_attack(mut self, attack: i64) -> Self {
        self.attack = attack;
        self
    }

    /// Check stat ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_hp < 1 {
            return Err(ConfigError::InvalidMaxHp {
                name: self.name.clone(),
                max_hp: self.max_hp,
            });
        }
        if self.max_mana < 0 {
            return Err(ConfigError::InvalidMaxMana {
                name: self.name.clone(),
                max_mana: self.max_mana,
            });
        }
        Ok(())
    }
}

/// Complete battle configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Cards drawn by `deal_opening_hand`.
    pub opening_hand: usize,

    /// Cards drawn at the start of each player turn.
    pub draws_per_turn: usize,

    /// Piles are reset at player-turn start when the draw pile holds at
    /// most this many cards.
    pub low_pile_threshold: usize,

    /// Mana gained at the start of each player turn.
    pub mana_per_turn: i64,

    /// Restore mana to max at player-turn start instead of adding.
    pub refill_mana: bool,

    /// Maximum hand size kept at player-turn end. `None` for unlimited.
    pub hand_limit: Option<usize>,

    /// Shuffle seed. `None` picks a non-deterministic seed.
    pub seed: Option<u64>,

    /// The player.
    pub player: CombatantConfig,

    /// Enemies, in display order.
    pub enemies: Vec<CombatantConfig>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            opening_hand: 5,
            draws_per_turn: 1,
            low_pile_threshold: 0,
            mana_per_turn: 1,
            refill_mana: false,
            hand_limit: None,
            seed: None,
            player: CombatantConfig::default(),
            enemies: Vec::new(),
        }
    }
}

impl BattleConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_opening_hand(mut self, cards: usize) -> Self {
        self.opening_hand = cards;
        self
    }

    /// Set cards drawn per player turn.
    #[must_use]
    pub fn with_draws_per_turn(mut self, cards: usize) -> Self {
        self.draws_per_turn = cards;
        self
    }

    /// Set the low-pile reset threshold.
    #[must_use]
    pub fn with_low_pile_threshold(mut self, threshold: usize) -> Self {
        self.low_pile_threshold = threshold;
        self
    }

    /// Set mana gained per player turn.
    #[must_use]
    pub fn with_mana_per_turn(mut self, mana: i64) -> Self {
        self.mana_per_turn = mana;
        self
    }

    /// Refill mana at the start of each player turn.
    #[must_use]
    pub fn refilling_mana(mut self) -> Self {
        self.refill_mana = true;
        self
    }

    /// Set the hand limit.
    #[must_use]
    pub fn with_hand_limit(mut self, limit: usize) -> Self {
        self.hand_limit = Some(limit);
        self
    }

    /// Set the player.
    #[must_use]
    pub fn with_player(mut self, player: CombatantConfig) -> Self {
        self.player = player;
        self
    }

    /// Add an enemy.
    #[must_use]
    pub fn with_enemy(mut self, enemy: CombatantConfig) -> Self {
        self.enemies.push(enemy);
        self
    }

    /// Check every rule, returning the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enemies.is_empty() {
            return Err(ConfigError::NoEnemies);
        }
        if self.mana_per_turn < 0 {
            return Err(ConfigError::NegativeManaPerTurn(self.mana_per_turn));
        }
        if self.hand_limit == Some(0) {
            return Err(ConfigError::ZeroHandLimit);
        }

        self.player.validate()?;
        for enemy in &self.enemies {
            enemy.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slime() -> CombatantConfig {
        CombatantConfig::new("Slime", 20).with_attack(3)
    }

    #[test]
    fn test_default_player_stats() {
        let player = CombatantConfig::default();
        assert_eq!(player.name, "Player");
        assert_eq!((player.hp, player.max_hp), (100, 100));
        assert_eq!((player.mana, player.max_mana), (0, 10));
    }

    #[test]
    fn test_builder() {
        let config = BattleConfig::new()
            .with_seed(9)
            .with_opening_hand(3)
            .with_draws_per_turn(2)
            .with_hand_limit(7)
            .with_enemy(slime());

        assert_eq!(config.seed, Some(9));
        assert_eq!(config.opening_hand, 3);
        assert_eq!(config.draws_per_turn, 2);
        assert_eq!(config.hand_limit, Some(7));
        assert_eq!(config.enemies.len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_enemy() {
        assert_eq!(BattleConfig::new().validate(), Err(ConfigError::NoEnemies));
    }

    #[test]
    fn test_validate_rejects_bad_stats() {
        let config = BattleConfig::new().with_enemy(CombatantConfig::new("Ghost", 0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMaxHp { max_hp: 0, .. })
        ));

        let config = BattleConfig::new()
            .with_enemy(slime())
            .with_player(CombatantConfig::new("Hero", 50).with_mana(0, -1));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMaxMana { max_mana: -1, .. })
        ));

        let config = BattleConfig::new().with_enemy(slime()).with_mana_per_turn(-2);
        assert_eq!(config.validate(), Err(ConfigError::NegativeManaPerTurn(-2)));

        let config = BattleConfig::new().with_enemy(slime()).with_hand_limit(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroHandLimit));
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::InvalidMaxHp {
            name: "Ghost".to_string(),
            max_hp: 0,
        };
        assert_eq!(err.to_string(), "combatant 'Ghost' has max_hp 0, must be at least 1");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{"seed": 7, "enemies": [{"name": "Slime", "hp": 20, "max_hp": 20}]}"#;
        let config: BattleConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.opening_hand, 5);
        assert_eq!(config.player, CombatantConfig::default());
        assert_eq!(config.enemies[0].name, "Slime");
        assert_eq!(config.enemies[0].max_mana, 10); // defaulted field
        assert!(config.validate().is_ok());
    }
}
