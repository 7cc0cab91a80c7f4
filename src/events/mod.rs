//! State-change notifications.
//!
//! ## Key Types
//!
//! - `Listeners<E>`: Callback registry owned by each observable entity
//! - `ListenerId`: Subscription handle
//! - `DeckEvent`, `DrawPileEvent`, `PileEvent`, `CombatantEvent`,
//!   `BattleEvent`: The closed event set for each entity kind
//!
//! Presentation code subscribes and re-renders; it never mutates engine
//! state from inside a callback.

pub mod listeners;
pub mod types;

pub use listeners::{ListenerId, Listeners};
pub use types::{BattleEvent, CombatantEvent, DeckEvent, DrawPileEvent, PileEvent};
