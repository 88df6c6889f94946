use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Difficulty, RecipePatch, draft::ValidDraft};

/// A single dish in the vault.
///
/// Recipes are created by the store, which assigns the id and the creation
/// time. Neither changes afterwards.
///
/// The serialized form is a JSON object with `camelCase` field names in
/// declaration order. Absent optional fields are omitted rather than written
/// as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RecipeRecord")]
pub struct Recipe {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) ingredients: Vec<String>,
    pub(crate) instructions: String,
    pub(crate) tags: Vec<String>,
    pub(crate) difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) is_favorite: Option<bool>,
    #[serde(serialize_with = "timestamp::serialize")]
    pub(crate) created_at: DateTime<Utc>,
}

impl Recipe {
    pub(crate) fn new(id: String, created_at: DateTime<Utc>, draft: ValidDraft) -> Self {
        Self {
            id,
            title: draft.title.as_str().to_owned(),
            ingredients: draft.ingredients.into(),
            instructions: draft.instructions.as_str().to_owned(),
            tags: draft.tags,
            difficulty: draft.difficulty,
            cover_image: draft.cover_image,
            images: draft.images,
            is_favorite: draft.is_favorite,
            created_at,
        }
    }

    /// The store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The user-facing name.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Ingredient lines, in the order they were entered.
    #[must_use]
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Free-text method.
    #[must_use]
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Search tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Effort classification.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Cover image URL, if any.
    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.cover_image.as_deref()
    }

    /// Gallery image URLs. Empty when there is no gallery.
    #[must_use]
    pub fn images(&self) -> &[String] {
        self.images.as_deref().unwrap_or_default()
    }

    /// Whether the recipe is marked as a favorite. Unset counts as `false`.
    #[must_use]
    pub fn is_favorite(&self) -> bool {
        self.is_favorite.unwrap_or(false)
    }

    /// When the recipe was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Merges a validated patch. Fields the patch does not supply are kept.
    pub(crate) fn apply(&mut self, patch: RecipePatch) {
        let RecipePatch {
            title,
            ingredients,
            instructions,
            tags,
            difficulty,
            cover_image,
            images,
            is_favorite,
        } = patch;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(ingredients) = ingredients {
            self.ingredients = ingredients;
        }
        if let Some(instructions) = instructions {
            self.instructions = instructions;
        }
        if let Some(tags) = tags {
            self.tags = tags;
        }
        if let Some(difficulty) = difficulty {
            self.difficulty = difficulty;
        }
        if let Some(cover_image) = cover_image {
            self.cover_image = cover_image;
        }
        if let Some(images) = images {
            self.images = images;
        }
        if let Some(is_favorite) = is_favorite {
            self.is_favorite = is_favorite;
        }
    }

    /// Plain-text rendering for sharing or copying to the clipboard.
    #[must_use]
    pub fn share_text(&self) -> String {
        let ingredients: String = self
            .ingredients
            .iter()
            .map(|ingredient| format!("• {ingredient}\n"))
            .collect();
        format!(
            "Check out this recipe: {}\n\nIngredients:\n{ingredients}\nInstructions:\n{}",
            self.title, self.instructions
        )
    }
}

/// The accepted serialized shapes of a recipe.
///
/// Older payloads carry a single `image` instead of `coverImage`. It is read
/// as the cover image when no `coverImage` is present, and never written.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeRecord {
    id: String,
    title: String,
    ingredients: Vec<String>,
    instructions: String,
    #[serde(default)]
    tags: Vec<String>,
    difficulty: Difficulty,
    #[serde(default)]
    cover_image: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    images: Option<Vec<String>>,
    #[serde(default)]
    is_favorite: Option<bool>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    created_at: DateTime<Utc>,
}

impl From<RecipeRecord> for Recipe {
    fn from(record: RecipeRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            ingredients: record.ingredients,
            instructions: record.instructions,
            tags: record.tags,
            difficulty: record.difficulty,
            cover_image: record.cover_image.or(record.image),
            images: record.images,
            is_favorite: record.is_favorite,
            created_at: record.created_at,
        }
    }
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix, e.g.
/// `2024-05-01T18:30:00.000Z`.
pub(crate) mod timestamp {
    use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Drops precision below a millisecond, so a value survives a round trip
    /// through its serialized form unchanged.
    pub(crate) fn truncate(ts: DateTime<Utc>) -> DateTime<Utc> {
        ts.trunc_subsecs(3)
    }

    pub(crate) fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub(crate) fn serialize<S: Serializer>(
        ts: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
