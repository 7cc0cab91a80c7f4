//! Combatants - HP and mana bearing battle participants.
//!
//! One type covers both roles. Enemies have `max_mana == 0`, so every mana
//! operation on them clamps to zero and never notifies; players have an
//! `attack` of zero unless a hook gives them one.
//!
//! ## Clamping
//!
//! Out-of-range assignments are corrected, never rejected:
//! - `0 <= hp <= max_hp` and `0 <= mana <= max_mana` after every call
//! - `max_hp >= 1`, `max_mana >= 0`
//!
//! Change events fire only when the clamped value differs from the old one.

use serde::{Deserialize, Serialize};

use super::effect::StatusEffect;
use crate::core::config::CombatantConfig;
use crate::events::{CombatantEvent, ListenerId, Listeners};

/// Which side a combatant fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatantKind {
    Player,
    Enemy,
}

/// A battle participant.
///
/// ```
/// use card_battle::combat::Combatant;
///
/// let mut player = Combatant::player("Hero", 10, 100, 1, 10);
///
/// assert_eq!(player.take_damage(15), 0);
/// assert!(player.is_dead());
/// assert!(!player.consume_mana(2));
/// assert_eq!(player.mana(), 1);
/// ```
#[derive(Debug)]
pub struct Combatant {
    kind: CombatantKind,
    name: String,
    hp: i64,
    max_hp: i64,
    mana: i64,
    max_mana: i64,
    attack: i64,
    effects: Vec<StatusEffect>,
    listeners: Listeners<CombatantEvent>,
}

impl Combatant {
    /// Create a player. Stats are clamped into range.
    pub fn player(name: impl Into<String>, hp: i64, max_hp: i64, mana: i64, max_mana: i64) -> Self {
        let max_hp = max_hp.max(1);
        let max_mana = max_mana.max(0);
        Self {
            kind: CombatantKind::Player,
            name: name.into(),
            hp: hp.clamp(0, max_hp),
            max_hp,
            mana: mana.clamp(0, max_mana),
            max_mana,
            attack: 0,
            effects: Vec::new(),
            listeners: Listeners::new(),
        }
    }

    /// Create an enemy with no mana pool. Stats are clamped into range.
    pub fn enemy(name: impl Into<String>, hp: i64, max_hp: i64, attack: i64) -> Self {
        let mut enemy = Self::player(name, hp, max_hp, 0, 0);
        enemy.kind = CombatantKind::Enemy;
        enemy.attack = attack;
        enemy
    }

    /// The stock player: 100/100 HP, 0/10 mana.
    pub fn default_player() -> Self {
        Self::player("Player", 100, 100, 0, 10)
    }

    /// Build a combatant of `kind` from configuration.
    pub fn from_config(kind: CombatantKind, config: &CombatantConfig) -> Self {
        match kind {
            CombatantKind::Player => {
                let mut player = Self::player(
                    config.name.clone(),
                    config.hp,
                    config.max_hp,
                    config.mana,
                    config.max_mana,
                );
                player.attack = config.attack;
                player
            }
            CombatantKind::Enemy => {
                Self::enemy(config.name.clone(), config.hp, config.max_hp, config.attack)
            }
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn kind(&self) -> CombatantKind {
        self.kind
    }

    #[must_use]
    pub fn is_player(&self) -> bool {
        self.kind == CombatantKind::Player
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn hp(&self) -> i64 {
        self.hp
    }

    #[must_use]
    pub fn max_hp(&self) -> i64 {
        self.max_hp
    }

    #[must_use]
    pub fn mana(&self) -> i64 {
        self.mana
    }

    #[must_use]
    pub fn max_mana(&self) -> i64 {
        self.max_mana
    }

    /// Damage dealt per enemy action.
    #[must_use]
    pub fn attack(&self) -> i64 {
        self.attack
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    // === Mutation ===

    /// Rename. Always notifies.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let old = std::mem::replace(&mut self.name, name.into());
        self.listeners.emit(&CombatantEvent::NameChanged {
            old,
            new: self.name.clone(),
        });
    }

    /// Set HP, clamped to `[0, max_hp]`.
    pub fn set_hp(&mut self, hp: i64) {
        let old = self.hp;
        self.hp = hp.clamp(0, self.max_hp);
        if self.hp != old {
            self.listeners.emit(&CombatantEvent::HpChanged { old, new: self.hp });
        }
    }

    /// Lose `amount` HP. Negative amounts heal. Returns the resulting HP.
    pub fn take_damage(&mut self, amount: i64) -> i64 {
        self.set_hp(self.hp.saturating_sub(amount));
        self.hp
    }

    /// Gain `amount` HP. Negative amounts damage. Returns the resulting HP.
    pub fn heal(&mut self, amount: i64) -> i64 {
        self.set_hp(self.hp.saturating_add(amount));
        self.hp
    }

    /// Set max HP (at least 1). Re-clamps current HP if it now exceeds it.
    pub fn set_max_hp(&mut self, max_hp: i64) {
        self.max_hp = max_hp.max(1);
        if self.hp > self.max_hp {
            self.set_hp(self.hp);
        }
    }

    /// Set mana, clamped to `[0, max_mana]`.
    pub fn set_mana(&mut self, mana: i64) {
        let old = self.mana;
        self.mana = mana.clamp(0, self.max_mana);
        if self.mana != old {
            self.listeners.emit(&CombatantEvent::ManaChanged {
                old,
                new: self.mana,
            });
        }
    }

    /// Set max mana (at least 0). Re-clamps current mana if it now exceeds it.
    pub fn set_max_mana(&mut self, max_mana: i64) {
        self.max_mana = max_mana.max(0);
        if self.mana > self.max_mana {
            self.set_mana(self.mana);
        }
    }

    /// Gain one mana. Returns the resulting mana.
    pub fn add_mana(&mut self) -> i64 {
        self.set_mana(self.mana.saturating_add(1));
        self.mana
    }

    /// Drop mana to zero. Returns the resulting mana.
    pub fn reset_mana(&mut self) -> i64 {
        self.set_mana(0);
        self.mana
    }

    /// Spend `cost` mana. Returns `false`, changing nothing, if short.
    #[must_use = "an unaffordable cost leaves mana untouched"]
    pub fn consume_mana(&mut self, cost: i64) -> bool {
        if self.mana < cost {
            return false;
        }
        self.set_mana(self.mana.saturating_sub(cost));
        true
    }

    // === Effects ===

    /// Attach a status effect.
    pub fn add_effect(&mut self, effect: StatusEffect) {
        self.effects.push(effect);
    }

    /// Active status effects.
    #[must_use]
    pub fn effects(&self) -> &[StatusEffect] {
        &self.effects
    }

    /// Check for an active effect by name.
    #[must_use]
    pub fn has_effect(&self, name: &str) -> bool {
        self.effects.iter().any(|e| e.name == name)
    }

    /// Count every effect down one turn and drop the expired ones.
    ///
    /// Returns the number of effects removed.
    pub fn tick_effects(&mut self) -> usize {
        let before = self.effects.len();
        self.effects.retain_mut(|e| !e.tick());
        before - self.effects.len()
    }

    // === Listeners ===

    /// Subscribe to HP, mana and name changes.
    pub fn subscribe(&mut self, callback: impl FnMut(&CombatantEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    /// Remove a subscription.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }
}
