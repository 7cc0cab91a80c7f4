//! # card-battle
//!
//! A turn-based card battle engine: a player with HP and mana fights one
//! or more enemies by drawing and playing cards built from a deck.
//!
//! ## Design Principles
//!
//! 1. **Observable State**: Decks, piles and combatants publish typed change
//!    events to subscribers, so a UI can stay in sync without polling.
//!
//! 2. **Total Commands**: Battle commands never fail. Out-of-range or
//!    post-battle commands are ignored; HP and mana are clamped.
//!
//! 3. **Card Conservation**: Cards only move between draw pile, hand and
//!    discard. Their total never changes during a battle.
//!
//! ## Architecture
//!
//! - **Persistent Snapshots**: Pile events carry before/after views as
//!   `im` vectors, cloned in O(1).
//!
//! - **Deterministic Shuffles**: Seeded ChaCha RNG. Identical seeds give
//!   identical draw orders.
//!
//! ## Modules
//!
//! - `core`: Instance IDs, RNG, configuration
//! - `cards`: Card recipes and instances
//! - `events`: Listener registries and event enums
//! - `piles`: Deck, draw pile, hand and discard
//! - `combat`: Combatants and status effects
//! - `battle`: Turn machine, termination and hooks

pub mod core;
pub mod cards;
pub mod events;
pub mod piles;
pub mod combat;
pub mod battle;

// Re-export commonly used types
pub use crate::core::{
    BattleConfig, CombatantConfig, ConfigError,
    GameRng, GameRngState,
    IdAllocator, InstanceId,
};

pub use crate::cards::{CardInstance, CardRecipe};

pub use crate::events::{
    BattleEvent, CombatantEvent, DeckEvent, DrawPileEvent, PileEvent,
    ListenerId, Listeners,
};

pub use crate::piles::{CardBag, CardPiles, Deck, DeckList, Discard, DrawPile, DrawnCards, Hand};

pub use crate::combat::{Combatant, CombatantKind, StatusEffect};

pub use crate::battle::{
    BattleEngine, BattleHooks, BattleState, BattleStatus,
    NoHooks, PlayOutcome, StandardTurn, Turn, TurnContext,
};
