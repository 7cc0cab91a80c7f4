//! Card piles: where cards live before and during a battle.
//!
//! ## Key Types
//!
//! - `Deck`: Build-time recipe counts, owned by the player profile
//! - `DeckList`: Immutable snapshot of a deck bound by a draw pile
//! - `DrawPile`: Shuffled stack materialized from a deck
//! - `CardBag` (`Hand`, `Discard`): Unordered bags with snapshot events
//! - `CardPiles`: The three battle piles, moved as one unit

pub mod bag;
pub mod deck;
pub mod draw_pile;
pub mod flow;

pub use bag::{CardBag, Discard, Hand};
pub use deck::{Deck, DeckList};
pub use draw_pile::{DrawPile, DrawnCards};
pub use flow::CardPiles;
