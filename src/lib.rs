//! Chonky Recipes: a personal recipe vault.
//!
//! Recipes are kept as one JSON array under a single key of a key-value
//! store. The [`RecipeStore`] owns that collection; [`filter`] searches it.

pub mod domain;
pub use domain::{
    Config, Difficulty, Recipe, RecipeDraft, RecipePatch, ValidationError, filter::filter,
};

/// Persistence, import and export of the recipe collection.
pub mod storage;
pub use storage::{FileStore, ImportError, MemoryStore, RecipeStore, StoreError};
