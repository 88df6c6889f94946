//! Parsing of import payloads.
//!
//! An import payload is a JSON array of recipe-like objects, typically a file
//! produced by a collection export. Only the shape of the array is checked
//! here; turning elements into recipes is left to the store.

use serde::Deserialize;
use serde_json::Value;

use crate::{
    domain::{Difficulty, RecipeDraft},
    storage::StoreError,
};

/// An import payload could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The payload is not valid JSON.
    #[error("import file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The payload is JSON, but not an array.
    #[error("import file must contain a JSON array of recipes")]
    NotAnArray,

    /// An element of the array is not an object.
    #[error("element {index} of the import file is not a recipe object")]
    NotAnObject {
        /// Position of the offending element.
        index: usize,
    },

    /// Saving an imported recipe failed.
    #[error("failed to save imported recipe: {0}")]
    Store(#[from] StoreError),
}

/// Parses `raw` into one entry per array element.
///
/// Elements lacking a title, ingredients or instructions come back as
/// `None`, so the caller can skip them.
///
/// # Errors
///
/// Fails without yielding anything if `raw` is not a JSON array of objects.
pub(crate) fn parse_payload(raw: &str) -> Result<Vec<Option<RecipeDraft>>, ImportError> {
    let Value::Array(elements) = serde_json::from_str::<Value>(raw)? else {
        return Err(ImportError::NotAnArray);
    };

    if let Some(index) = elements.iter().position(|element| !element.is_object()) {
        return Err(ImportError::NotAnObject { index });
    }

    Ok(elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            let draft = ImportedRecipe::deserialize(element)
                .map_err(|e| e.to_string())
                .and_then(ImportedRecipe::into_draft);
            draft
                .inspect_err(|reason| tracing::debug!("Skipping element {index}: {reason}"))
                .ok()
        })
        .collect())
}

/// The fields an imported element may carry.
///
/// `id` and `createdAt` are ignored: imported recipes get fresh ones.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedRecipe {
    title: Option<String>,
    ingredients: Option<Vec<String>>,
    instructions: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    difficulty: Option<String>,
    cover_image: Option<String>,
    image: Option<String>,
    images: Option<Vec<String>>,
    is_favorite: Option<bool>,
}

impl ImportedRecipe {
    fn into_draft(self) -> Result<RecipeDraft, String> {
        let title = self
            .title
            .filter(|title| !title.is_empty())
            .ok_or("missing title")?;
        let ingredients = self
            .ingredients
            .filter(|ingredients| !ingredients.is_empty())
            .ok_or("missing ingredients")?;
        let instructions = self
            .instructions
            .filter(|instructions| !instructions.is_empty())
            .ok_or("missing instructions")?;
        let difficulty = self
            .difficulty
            .ok_or("missing difficulty")?
            .parse::<Difficulty>()
            .map_err(|e| e.to_string())?;

        Ok(RecipeDraft {
            title,
            ingredients,
            instructions,
            tags: self.tags,
            difficulty,
            cover_image: self.cover_image.or(self.image),
            images: self.images,
            is_favorite: self.is_favorite,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(parse_payload("{not json"), Err(ImportError::Parse(_))));
    }

    #[test]
    fn rejects_non_array() {
        assert!(matches!(
            parse_payload(r#"{"title": "A"}"#),
            Err(ImportError::NotAnArray)
        ));
    }

    #[test]
    fn rejects_non_object_elements() {
        let error = parse_payload(r#"[{"title": "A"}, 3]"#).unwrap_err();
        assert!(matches!(error, ImportError::NotAnObject { index: 1 }));
    }

    #[test]
    fn empty_array_is_fine() {
        assert!(parse_payload("[]").unwrap().is_empty());
    }

    #[test]
    fn incomplete_elements_are_none() {
        let entries = parse_payload(
            r#"[
                {"title": "A", "ingredients": ["x"], "instructions": "y", "tags": [], "difficulty": "Quickie"},
                {"title": "B"},
                {"title": "", "ingredients": ["x"], "instructions": "y", "difficulty": "Quickie"},
                {"title": "C", "ingredients": [], "instructions": "y", "difficulty": "Quickie"},
                {"title": "D", "ingredients": ["x"], "instructions": "y", "difficulty": "Impossible"},
                {"title": 5, "ingredients": ["x"], "instructions": "y", "difficulty": "Quickie"}
            ]"#,
        )
        .unwrap();

        assert_eq!(entries.len(), 6);
        assert!(entries[0].is_some());
        assert!(entries[1..].iter().all(Option::is_none));
    }

    #[test]
    fn carries_optional_fields_and_legacy_image() {
        let entries = parse_payload(
            r#"[{
                "id": "ignored",
                "createdAt": "2020-01-01T00:00:00.000Z",
                "title": "Stew",
                "ingredients": ["beef"],
                "instructions": "Slow cook.",
                "tags": ["winter"],
                "difficulty": "Comfort Food",
                "image": "https://example.com/stew.jpg",
                "isFavorite": true
            }]"#,
        )
        .unwrap();

        let draft = entries.into_iter().next().flatten().unwrap();
        assert_eq!(draft.title, "Stew");
        assert_eq!(draft.difficulty, Difficulty::ComfortFood);
        assert_eq!(draft.tags, vec!["winter".to_string()]);
        assert_eq!(
            draft.cover_image.as_deref(),
            Some("https://example.com/stew.jpg")
        );
        assert_eq!(draft.is_favorite, Some(true));
    }
}
