//! Combat state: combatants and their status effects.
//!
//! ## Key Types
//!
//! - `Combatant`: HP/mana/name with clamped mutation and change events
//! - `CombatantKind`: Player or enemy role
//! - `StatusEffect`: Named, timed effect (durations only)

pub mod combatant;
pub mod effect;

pub use combatant::{Combatant, CombatantKind};
pub use effect::StatusEffect;
