//! Core engine types: instance ids, RNG, configuration.
//!
//! These are the building blocks shared by every other module. Nothing here
//! knows about piles or combatants.

pub mod entity;
pub mod rng;
pub mod config;

pub use entity::{IdAllocator, InstanceId};
pub use rng::{GameRng, GameRngState};
pub use config::{BattleConfig, CombatantConfig, ConfigError};
