//! The battle: turn machine, termination and turn hooks.
//!
//! ## Key Types
//!
//! - `BattleEngine`: Owns combatants and piles, drives turns and card plays
//! - `BattleState`: Combatants, current turn, turn number, status
//! - `BattleHooks`: Extension points around each turn flip and card play
//! - `StandardTurn`: Stock hooks (mana gain, draws, enemy attacks)
//!
//! ## Termination
//!
//! After each command the engine checks, in order: the player is at 0 HP
//! (loss), then every enemy is at 0 HP (win). The first result is final.

pub mod engine;
pub mod hooks;
pub mod state;

pub use engine::{BattleEngine, PlayOutcome};
pub use hooks::{BattleHooks, NoHooks, StandardTurn, TurnContext};
pub use state::{BattleState, BattleStatus, Turn};
