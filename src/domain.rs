//! Domain models for the recipe vault.
//!
//! This module contains the recipe entity, its create/update payloads and
//! their validation, the search filter, and configuration.

mod config;
pub use config::{Config, ConfigError};

mod difficulty;
pub use difficulty::Difficulty;

pub(crate) mod draft;
pub use draft::{RecipeDraft, RecipePatch, ValidationError};

/// Free-text search over recipes.
pub mod filter;

/// The recipe entity and its serialized form.
pub mod recipe;
pub use recipe::Recipe;
