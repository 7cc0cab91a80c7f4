//! Card system: recipes and instances.
//!
//! ## Key Types
//!
//! - `CardRecipe`: Immutable template (name, cost, art, description)
//! - `CardInstance`: A physical token built from a recipe, with an id

pub mod recipe;
pub mod instance;

pub use recipe::CardRecipe;
pub use instance::CardInstance;
