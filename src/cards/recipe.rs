//! Card recipes - static card data.
//!
//! `CardRecipe` is the immutable template a card is built from. "Fireball"
//! costs 2 and shows `fireball.png` - that is part of the recipe. Which
//! physical copy sits in the hand is instance data, see `CardInstance`.

use serde::{Deserialize, Serialize};

/// Static card template.
///
/// Equality and hashing are by field values, so two recipes built from the
/// same data are the same deck key.
///
/// ## Example
///
/// ```
/// use card_battle::cards::CardRecipe;
///
/// let fireball = CardRecipe::new("Fireball", 2)
///     .with_art("fireball.png")
///     .with_description("Deal 6 damage.");
///
/// assert_eq!(fireball.cost, 2);
/// assert_eq!(fireball, CardRecipe::new("Fireball", 2)
///     .with_art("fireball.png")
///     .with_description("Deal 6 damage."));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardRecipe {
    /// Card name.
    pub name: String,

    /// Mana cost.
    pub cost: u32,

    /// Art reference (an image file name; never loaded by the engine).
    pub art_ref: String,

    /// Rules text.
    pub description: String,
}

impl CardRecipe {
    /// Create a recipe with no art or description.
    #[must_use]
    pub fn new(name: impl Into<String>, cost: u32) -> Self {
        Self {
            name: name.into(),
            cost,
            art_ref: String::new(),
            description: String::new(),
        }
    }

    /// Set the art reference (builder pattern).
    #[must_use]
    pub fn with_art(mut self, art_ref: impl Into<String>) -> Self {
        self.art_ref = art_ref.into();
        self
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sample recipe for previews and tests.
    #[must_use]
    pub fn sample() -> Self {
        Self::new("Sample Card", 3)
            .with_art("sample.png")
            .with_description("A sample card describing its effect and traits.")
    }

    /// Recipe with every field empty.
    #[must_use]
    pub fn empty() -> Self {
        Self::new("", 0)
    }
}

impl std::fmt::Display for CardRecipe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.cost)
    }
}
