//! Free-text search over a recipe collection.

use crate::Recipe;

/// Returns the recipes matching `term`, in their original order.
///
/// A recipe matches when `term` is a case-insensitive substring of its
/// title, of one of its tags, or of one of its ingredients. An empty term
/// matches everything.
#[must_use]
pub fn filter<'a>(recipes: &'a [Recipe], term: &str) -> Vec<&'a Recipe> {
    let needle = term.to_lowercase();
    recipes
        .iter()
        .filter(|recipe| matches_lowercase(recipe, &needle))
        .collect()
}

fn matches_lowercase(recipe: &Recipe, needle: &str) -> bool {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

    needle.is_empty()
        || contains(recipe.title())
        || recipe.tags().iter().any(|tag| contains(tag))
        || recipe.ingredients().iter().any(|ingredient| contains(ingredient))
}
