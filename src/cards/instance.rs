//! Card instances - physical card tokens.
//!
//! A `CardInstance` exists once a deck's recipe counts are materialized into
//! a draw pile. From then on it moves between draw pile, hand and discard
//! carrying the same `InstanceId`.

use serde::{Deserialize, Serialize};

use super::recipe::CardRecipe;
use crate::core::entity::InstanceId;

/// A drawable card token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique id, assigned at materialization.
    pub id: InstanceId,

    /// The recipe this card was built from.
    pub recipe: CardRecipe,
}

impl CardInstance {
    /// Create a card instance.
    #[must_use]
    pub fn new(id: InstanceId, recipe: CardRecipe) -> Self {
        Self { id, recipe }
    }

    /// Card name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.recipe.name
    }

    /// Mana cost.
    #[must_use]
    pub fn cost(&self) -> u32 {
        self.recipe.cost
    }

    /// Check whether this card was built from `recipe`.
    #[must_use]
    pub fn is_copy_of(&self, recipe: &CardRecipe) -> bool {
        &self.recipe == recipe
    }
}
