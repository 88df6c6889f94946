//! Create and update payloads, and the normalization rules they share.

use non_empty_string::NonEmptyString;
use nonempty::NonEmpty;

use crate::domain::Difficulty;

/// A recipe payload is missing required content, or carries a value outside
/// its allowed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The title is empty after trimming.
    #[error("recipe title must not be empty")]
    EmptyTitle,

    /// No ingredient survives trimming and blank removal.
    #[error("recipe must have at least one ingredient")]
    NoIngredients,

    /// The instructions are empty after trimming.
    #[error("recipe instructions must not be empty")]
    EmptyInstructions,

    /// The difficulty label is not one of the known values.
    #[error("unknown difficulty '{0}' (expected Quickie, Gourmet or Comfort Food)")]
    UnknownDifficulty(String),
}

/// Everything needed to create a recipe, minus the store-assigned id and
/// creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    /// The user-facing name.
    pub title: String,
    /// Ingredient lines, in order.
    pub ingredients: Vec<String>,
    /// Free-text method.
    pub instructions: String,
    /// Search tags, in order.
    pub tags: Vec<String>,
    /// Effort classification.
    pub difficulty: Difficulty,
    /// Optional cover image URL.
    pub cover_image: Option<String>,
    /// Optional gallery image URLs.
    pub images: Option<Vec<String>>,
    /// Optional favorite flag.
    pub is_favorite: Option<bool>,
}

impl RecipeDraft {
    /// Creates a draft with the required fields and no tags, images or
    /// favorite flag.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        ingredients: Vec<String>,
        instructions: impl Into<String>,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            title: title.into(),
            ingredients,
            instructions: instructions.into(),
            tags: Vec::new(),
            difficulty,
            cover_image: None,
            images: None,
            is_favorite: None,
        }
    }

    /// Replaces the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Sets the cover image URL.
    #[must_use]
    pub fn with_cover_image(mut self, url: impl Into<String>) -> Self {
        self.cover_image = Some(url.into());
        self
    }

    /// Sets the gallery image URLs.
    #[must_use]
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = Some(images);
        self
    }

    /// Validates and normalizes the draft.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the title, ingredients or
    /// instructions are empty after normalization.
    pub(crate) fn validate(self) -> Result<ValidDraft, ValidationError> {
        let title = required_text(&self.title).ok_or(ValidationError::EmptyTitle)?;
        let ingredients = normalize_ingredients(self.ingredients)?;
        let instructions =
            required_text(&self.instructions).ok_or(ValidationError::EmptyInstructions)?;

        Ok(ValidDraft {
            title,
            ingredients,
            instructions,
            tags: normalize_list(self.tags),
            difficulty: self.difficulty,
            cover_image: self.cover_image.as_deref().and_then(normalize_url),
            images: self.images.and_then(normalize_images),
            is_favorite: self.is_favorite,
        })
    }
}

/// A draft that has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidDraft {
    pub(crate) title: NonEmptyString,
    pub(crate) ingredients: NonEmpty<String>,
    pub(crate) instructions: NonEmptyString,
    pub(crate) tags: Vec<String>,
    pub(crate) difficulty: Difficulty,
    pub(crate) cover_image: Option<String>,
    pub(crate) images: Option<Vec<String>>,
    pub(crate) is_favorite: Option<bool>,
}

/// A partial update.
///
/// Each `Some` field replaces the stored value; `None` fields are left
/// untouched. For the optional recipe fields, `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipePatch {
    /// New title.
    pub title: Option<String>,
    /// New ingredient list.
    pub ingredients: Option<Vec<String>>,
    /// New instructions.
    pub instructions: Option<String>,
    /// New tags.
    pub tags: Option<Vec<String>>,
    /// New difficulty.
    pub difficulty: Option<Difficulty>,
    /// New cover image, or `Some(None)` to remove it.
    pub cover_image: Option<Option<String>>,
    /// New gallery, or `Some(None)` to remove it.
    pub images: Option<Option<Vec<String>>>,
    /// New favorite flag, or `Some(None)` to unset it.
    pub is_favorite: Option<Option<bool>>,
}

impl RecipePatch {
    /// A patch that only replaces the tags.
    #[must_use]
    pub fn tags(tags: Vec<String>) -> Self {
        Self {
            tags: Some(tags),
            ..Self::default()
        }
    }

    /// A patch that only sets the favorite flag.
    #[must_use]
    pub fn favorite(is_favorite: bool) -> Self {
        Self {
            is_favorite: Some(Some(is_favorite)),
            ..Self::default()
        }
    }

    /// Whether the patch supplies no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Normalizes the supplied fields with the same rules as
    /// [`RecipeDraft`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if a supplied required field would
    /// become empty.
    pub(crate) fn validate(self) -> Result<Self, ValidationError> {
        let title = self
            .title
            .map(|title| required_text(&title).ok_or(ValidationError::EmptyTitle))
            .transpose()?
            .map(|title| title.as_str().to_owned());
        let ingredients = self
            .ingredients
            .map(normalize_ingredients)
            .transpose()?
            .map(Vec::from);
        let instructions = self
            .instructions
            .map(|text| required_text(&text).ok_or(ValidationError::EmptyInstructions))
            .transpose()?
            .map(|text| text.as_str().to_owned());

        Ok(Self {
            title,
            ingredients,
            instructions,
            tags: self.tags.map(normalize_list),
            difficulty: self.difficulty,
            cover_image: self
                .cover_image
                .map(|url| url.as_deref().and_then(normalize_url)),
            images: self.images.map(|images| images.and_then(normalize_images)),
            is_favorite: self.is_favorite,
        })
    }
}

fn required_text(text: &str) -> Option<NonEmptyString> {
    NonEmptyString::new(text.trim().to_string()).ok()
}

fn normalize_ingredients(ingredients: Vec<String>) -> Result<NonEmpty<String>, ValidationError> {
    NonEmpty::from_vec(normalize_list(ingredients)).ok_or(ValidationError::NoIngredients)
}

/// Trims every entry and drops the blank ones.
pub(crate) fn normalize_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn normalize_url(url: &str) -> Option<String> {
    let url = url.trim();
    (!url.is_empty()).then(|| url.to_string())
}

fn normalize_images(images: Vec<String>) -> Option<Vec<String>> {
    let images = normalize_list(images);
    (!images.is_empty()).then_some(images)
}
