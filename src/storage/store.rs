//! The recipe store.
//!
//! The [`RecipeStore`] owns the persisted recipe collection. The whole
//! collection lives as a JSON array under a single key of a
//! [`KeyValueStore`], and every mutation rewrites that key in full.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    Recipe,
    domain::{Config, RecipeDraft, RecipePatch, ValidationError, recipe::timestamp},
    storage::{
        Clock, IdSource, KeyValueStore, StorageError, SystemClock, UuidIds,
        export::{Deliver, EXPORT_ALL_FILENAME, Export, ExportError},
        import::{ImportError, parse_payload},
    },
};

/// Default key under which the collection is stored.
pub const DEFAULT_STORAGE_KEY: &str = "chonky-recipes";

const MAX_ID_ATTEMPTS: usize = 8;

/// A mutation of the store failed. Nothing was persisted.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The supplied recipe data is invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The key-value backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The collection could not be serialized.
    #[error("failed to serialize recipe collection: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The id source kept producing ids that are empty or already in use.
    #[error("could not allocate a unique recipe id after {0} attempts")]
    IdsExhausted(usize),
}

/// The stored collection could not be read.
///
/// [`RecipeStore::list_all`] never returns this; it treats an unreadable
/// collection as empty.
#[derive(Debug, thiserror::Error)]
pub enum StorageReadError {
    /// Nothing has been stored yet.
    #[error("no recipes stored under '{0}'")]
    Missing(String),

    /// The backend could not be read.
    #[error(transparent)]
    Backend(#[from] StorageError),

    /// The stored value is not a JSON array.
    #[error("stored recipe collection is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One element of the stored array.
///
/// Elements that do not decode as a [`Recipe`] are kept verbatim, so a
/// rewrite of the collection never drops them.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Entry {
    Recipe(Recipe),
    Unreadable(Value),
}

impl Entry {
    fn decode(index: usize, value: Value) -> Self {
        Recipe::deserialize(&value).map_or_else(
            |e| {
                tracing::warn!("Ignoring unreadable recipe at index {index}: {e}");
                Self::Unreadable(value)
            },
            Self::Recipe,
        )
    }

    fn id(&self) -> Option<&str> {
        match self {
            Self::Recipe(recipe) => Some(&recipe.id),
            Self::Unreadable(value) => value.get("id").and_then(Value::as_str),
        }
    }

    fn into_recipe(self) -> Option<Recipe> {
        match self {
            Self::Recipe(recipe) => Some(recipe),
            Self::Unreadable(_) => None,
        }
    }

    fn recipe_mut(&mut self, id: &str) -> Option<&mut Recipe> {
        match self {
            Self::Recipe(recipe) if recipe.id == id => Some(recipe),
            _ => None,
        }
    }
}

/// The sole owner of the persisted recipe collection.
///
/// The store is generic over where the collection lives (`S`), how ids are
/// made (`I`) and what time it is (`C`), so independent instances can run
/// side by side against in-memory fakes.
#[derive(Debug)]
pub struct RecipeStore<S, I = UuidIds, C = SystemClock> {
    storage: S,
    ids: I,
    clock: C,
    key: String,
    export_all_filename: String,
}

impl<S: KeyValueStore> RecipeStore<S> {
    /// Opens a store using random UUIDs and the system clock.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_sources(storage, UuidIds, SystemClock)
    }
}

impl<S, I, C> RecipeStore<S, I, C>
where
    S: KeyValueStore,
    I: IdSource,
    C: Clock,
{
    /// Opens a store with explicit id and time sources.
    #[must_use]
    pub fn with_sources(storage: S, ids: I, clock: C) -> Self {
        Self {
            storage,
            ids,
            clock,
            key: DEFAULT_STORAGE_KEY.to_string(),
            export_all_filename: EXPORT_ALL_FILENAME.to_string(),
        }
    }

    /// Applies the storage key and export file name from `config`.
    #[must_use]
    pub fn with_config(mut self, config: &Config) -> Self {
        config.storage_key().clone_into(&mut self.key);
        config
            .export_all_filename()
            .clone_into(&mut self.export_all_filename);
        self
    }

    /// The key the collection is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying key-value backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the stored collection, reporting why it could not be read.
    ///
    /// Elements that are not valid recipes are left out and logged.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is stored, the backend fails, or the
    /// stored value is not a JSON array.
    pub fn load(&self) -> Result<Vec<Recipe>, StorageReadError> {
        Ok(self
            .load_entries()?
            .into_iter()
            .filter_map(Entry::into_recipe)
            .collect())
    }

    fn load_entries(&self) -> Result<Vec<Entry>, StorageReadError> {
        let raw = self
            .storage
            .get(&self.key)?
            .ok_or_else(|| StorageReadError::Missing(self.key.clone()))?;
        let values: Vec<Value> = serde_json::from_str(&raw)?;
        Ok(values
            .into_iter()
            .enumerate()
            .map(|(index, value)| Entry::decode(index, value))
            .collect())
    }

    /// Returns every recipe, oldest first.
    ///
    /// An empty, unreadable or corrupted collection yields an empty list, and
    /// elements that are not valid recipes are left out. Failures are logged,
    /// never returned.
    #[must_use]
    pub fn list_all(&self) -> Vec<Recipe> {
        self.load().unwrap_or_else(|e| {
            report_read_error(&e);
            Vec::new()
        })
    }

    /// Looks up a recipe by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Recipe> {
        self.list_all().into_iter().find(|recipe| recipe.id == id)
    }

    /// Validates `draft`, stamps it with a fresh id and the current time,
    /// appends it and persists the collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if the draft has an empty title,
    /// no ingredients or empty instructions. The collection is unchanged.
    pub fn create(&mut self, draft: RecipeDraft) -> Result<Recipe, StoreError> {
        let draft = draft.validate()?;

        let mut entries = self.load_for_write()?;
        let id = self.fresh_id(&entries)?;
        let recipe = Recipe::new(id, timestamp::truncate(self.clock.now()), draft);

        entries.push(Entry::Recipe(recipe.clone()));
        self.persist(&entries)?;

        tracing::debug!("Created recipe {} ({})", recipe.id, recipe.title);
        Ok(recipe)
    }

    /// Merges `patch` into the recipe with the given id and persists the
    /// collection.
    ///
    /// Fields the patch does not supply are left as they are. An unknown id
    /// is not an error; nothing happens.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if the patch would blank a required
    /// field.
    pub fn update(&mut self, id: &str, patch: RecipePatch) -> Result<(), StoreError> {
        let patch = patch.validate()?;

        let mut entries = self.load_for_write()?;
        let Some(recipe) = entries.iter_mut().find_map(|entry| entry.recipe_mut(id)) else {
            tracing::debug!("Not updating unknown recipe {id}");
            return Ok(());
        };
        recipe.apply(patch);

        self.persist(&entries)?;
        tracing::debug!("Updated recipe {id}");
        Ok(())
    }

    /// Flips the favorite flag of a recipe.
    ///
    /// Returns the new value, or `None` if there is no such recipe.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<Option<bool>, StoreError> {
        let Some(current) = self.get(id) else {
            return Ok(None);
        };
        let favorite = !current.is_favorite();
        self.update(id, RecipePatch::favorite(favorite))?;
        Ok(Some(favorite))
    }

    /// Removes the recipe with the given id and persists the collection.
    ///
    /// Deleting an unknown id writes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let mut entries = self.load_for_write()?;
        let before = entries.len();
        entries.retain(|entry| !matches!(entry, Entry::Recipe(recipe) if recipe.id == id));

        if entries.len() == before {
            tracing::debug!("Not deleting unknown recipe {id}");
            return Ok(());
        }
        self.persist(&entries)?;
        tracing::debug!("Deleted recipe {id}");
        Ok(())
    }

    /// Exports a single recipe as `{sanitized-title}.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or delivery fails.
    pub fn export_one<D: Deliver + ?Sized>(
        &self,
        recipe: &Recipe,
        delivery: &mut D,
    ) -> Result<Export, ExportError> {
        let export = Export::one(recipe)?;
        export.deliver(delivery)?;
        Ok(export)
    }

    /// Exports `recipes` as one JSON array under the configured file name.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or delivery fails.
    pub fn export_all<D: Deliver + ?Sized>(
        &self,
        recipes: &[Recipe],
        delivery: &mut D,
    ) -> Result<Export, ExportError> {
        let export = Export::all(recipes, self.export_all_filename.as_str())?;
        export.deliver(delivery)?;
        Ok(export)
    }

    /// Imports recipes from a JSON array, returning how many were created.
    ///
    /// Every usable element goes through [`create`](Self::create), so it gets
    /// a fresh id and creation time. Elements without a title, ingredients or
    /// instructions, or that fail validation, are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error without importing anything if `raw` is not a JSON
    /// array of objects. A storage failure part way through stops the
    /// import; recipes created before it are kept.
    pub fn import_many(&mut self, raw: &str) -> Result<usize, ImportError> {
        let drafts = parse_payload(raw)?;
        let total = drafts.len();
        let mut imported = 0;

        for draft in drafts.into_iter().flatten() {
            match self.create(draft) {
                Ok(_) => imported += 1,
                Err(StoreError::Validation(e)) => {
                    tracing::debug!("Skipping invalid imported recipe: {e}");
                }
                Err(e) => return Err(e.into()),
            }
        }

        if imported < total {
            tracing::warn!("Skipped {} of {total} imported recipes", total - imported);
        }
        Ok(imported)
    }

    /// Loads the collection ahead of a rewrite.
    ///
    /// A missing value, or one that is not a JSON array at all, starts a
    /// fresh collection. Unreadable elements of an array are carried along
    /// untouched. A backend failure aborts the mutation.
    fn load_for_write(&self) -> Result<Vec<Entry>, StoreError> {
        match self.load_entries() {
            Ok(entries) => Ok(entries),
            Err(StorageReadError::Backend(e)) => Err(e.into()),
            Err(e) => {
                report_read_error(&e);
                Ok(Vec::new())
            }
        }
    }

    fn persist(&mut self, entries: &[Entry]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(entries)?;
        self.storage.set(&self.key, &raw)?;
        Ok(())
    }

    fn fresh_id(&mut self, entries: &[Entry]) -> Result<String, StoreError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if !id.is_empty() && !entries.iter().any(|entry| entry.id() == Some(id.as_str())) {
                return Ok(id);
            }
            tracing::warn!("Id source produced unusable id '{id}', retrying");
        }
        Err(StoreError::IdsExhausted(MAX_ID_ATTEMPTS))
    }
}

fn report_read_error(error: &StorageReadError) {
    match error {
        StorageReadError::Missing(key) => {
            tracing::debug!("No recipes stored under '{key}' yet");
        }
        e => tracing::warn!("Error loading recipes: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::{
        domain::Difficulty,
        storage::{FixedClock, MemoryStore},
    };

    #[derive(Debug, Default)]
    struct Counter(u32);

    impl IdSource for Counter {
        fn next_id(&mut self) -> String {
            self.0 += 1;
            self.0.to_string()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn store() -> RecipeStore<MemoryStore, Counter, FixedClock> {
        RecipeStore::with_sources(MemoryStore::new(), Counter::default(), FixedClock(now()))
    }

    fn draft(title: &str) -> RecipeDraft {
        RecipeDraft::new(
            title,
            vec!["x".to_string()],
            "y",
            Difficulty::Quickie,
        )
    }

    fn raw(store: &RecipeStore<MemoryStore, Counter, FixedClock>) -> Option<String> {
        store.storage().get(DEFAULT_STORAGE_KEY).unwrap()
    }

    #[test]
    fn empty_store_lists_nothing() {
        assert!(store().list_all().is_empty());
    }

    #[test]
    fn created_recipe_is_listed_with_fresh_id_and_timestamp() {
        let mut store = store();
        let draft = draft("Spicy Tofu")
            .with_tags(vec!["vegan".to_string()])
            .with_cover_image("https://example.com/tofu.jpg");

        let created = store.create(draft).unwrap();

        assert_eq!(created.id(), "1");
        assert_eq!(created.created_at(), now());
        assert_eq!(created.title(), "Spicy Tofu");
        assert_eq!(created.tags(), ["vegan".to_string()]);
        assert_eq!(created.cover_image(), Some("https://example.com/tofu.jpg"));
        assert_eq!(store.list_all(), vec![created]);
    }

    #[test]
    fn round_trip_with_system_clock_and_uuids() {
        let mut store = RecipeStore::new(MemoryStore::new());
        let created = store.create(draft("Soup")).unwrap();

        assert!(!created.id().is_empty());
        assert_eq!(store.list_all(), vec![created]);
    }

    #[test]
    fn collection_keeps_insertion_order() {
        let mut store = store();
        for title in ["C", "A", "B"] {
            store.create(draft(title)).unwrap();
        }

        let titles: Vec<_> = store
            .list_all()
            .iter()
            .map(|recipe| recipe.title().to_string())
            .collect();
        assert_eq!(titles, ["C", "A", "B"]);
    }

    #[test]
    fn blank_title_is_rejected_and_nothing_is_written() {
        let mut store = store();
        store.create(draft("Keep")).unwrap();
        let before = raw(&store);

        let error = store.create(draft("")).unwrap_err();

        assert!(matches!(
            error,
            StoreError::Validation(ValidationError::EmptyTitle)
        ));
        assert_eq!(raw(&store), before);
    }

    #[test]
    fn ingredients_are_normalized_on_create() {
        let mut store = store();
        let draft = RecipeDraft::new(
            "T",
            vec![String::new(), " Egg ".to_string(), String::new()],
            "I",
            Difficulty::Gourmet,
        );

        let created = store.create(draft).unwrap();

        assert_eq!(created.ingredients(), ["Egg".to_string()]);
        assert_eq!(store.list_all()[0].ingredients(), ["Egg".to_string()]);
    }

    #[test]
    fn duplicate_ids_are_never_assigned() {
        let mut ids = ["a", "a", "b"].into_iter().map(String::from);
        let mut store = RecipeStore::with_sources(
            MemoryStore::new(),
            move || ids.next().unwrap_or_default(),
            FixedClock(now()),
        );

        let first = store.create(draft("One")).unwrap();
        let second = store.create(draft("Two")).unwrap();

        assert_eq!(first.id(), "a");
        assert_eq!(second.id(), "b");
    }

    #[test]
    fn exhausted_id_source_fails() {
        let mut store =
            RecipeStore::with_sources(MemoryStore::new(), String::new, FixedClock(now()));

        let error = store.create(draft("One")).unwrap_err();

        assert!(matches!(error, StoreError::IdsExhausted(_)));
        assert!(store.list_all().is_empty());
    }

    #[test]
    fn update_merges_only_supplied_fields() {
        let mut store = store();
        let original = store.create(draft("Stew")).unwrap();
        store.create(draft("Other")).unwrap();

        store
            .update(original.id(), RecipePatch::tags(vec!["winter".to_string()]))
            .unwrap();

        let updated = store.get(original.id()).unwrap();
        assert_eq!(updated.tags(), ["winter".to_string()]);
        assert_eq!(updated.id(), original.id());
        assert_eq!(updated.created_at(), original.created_at());
        assert_eq!(updated.title(), original.title());
        assert_eq!(updated.ingredients(), original.ingredients());
        assert_eq!(updated.instructions(), original.instructions());
        assert_eq!(updated.difficulty(), original.difficulty());
        assert_eq!(store.list_all()[1].title(), "Other");
    }

    #[test]
    fn update_unknown_id_is_a_no_op() {
        let mut store = store();
        store.create(draft("Stew")).unwrap();
        let before = store.list_all();

        store
            .update("missing", RecipePatch::tags(vec!["x".to_string()]))
            .unwrap();

        assert_eq!(store.list_all(), before);
    }

    #[test]
    fn invalid_update_is_rejected_before_mutation() {
        let mut store = store();
        let recipe = store.create(draft("Stew")).unwrap();
        let before = raw(&store);

        let patch = RecipePatch {
            title: Some("  ".to_string()),
            ..RecipePatch::default()
        };
        let error = store.update(recipe.id(), patch).unwrap_err();

        assert!(matches!(
            error,
            StoreError::Validation(ValidationError::EmptyTitle)
        ));
        assert_eq!(raw(&store), before);
    }

    #[test]
    fn toggle_favorite_flips_flag() {
        let mut store = store();
        let recipe = store.create(draft("Pie")).unwrap();

        assert_eq!(store.toggle_favorite(recipe.id()).unwrap(), Some(true));
        assert!(store.get(recipe.id()).unwrap().is_favorite());
        assert_eq!(store.toggle_favorite(recipe.id()).unwrap(), Some(false));
        assert_eq!(store.toggle_favorite("missing").unwrap(), None);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut store = store();
        let keep = store.create(draft("Keep")).unwrap();
        let gone = store.create(draft("Gone")).unwrap();

        store.delete(gone.id()).unwrap();
        let once = store.list_all();
        store.delete(gone.id()).unwrap();

        assert_eq!(store.list_all(), once);
        assert_eq!(once, vec![keep]);
    }

    #[test]
    fn malformed_storage_lists_as_empty() {
        let mut storage = MemoryStore::new();
        storage.set(DEFAULT_STORAGE_KEY, "{ not json").unwrap();
        let store = RecipeStore::with_sources(storage, Counter::default(), FixedClock(now()));

        assert!(store.list_all().is_empty());
        assert!(matches!(store.load(), Err(StorageReadError::Malformed(_))));
    }

    const MIXED_COLLECTION: &str = concat!(
        r#"[{"id":"a","title":"Soup","ingredients":["water"],"instructions":"Boil.","tags":[],"difficulty":"Quickie","createdAt":"2024-01-01T00:00:00.000Z"},"#,
        r#"{"id":"legacy","title":"Old Pie","ingredients":["apples"],"instructions":"Bake.","tags":[],"createdAt":"2019-01-01T00:00:00.000Z"},"#,
        r#"{"id":"b","title":"Stew","ingredients":["beef"],"instructions":"Simmer.","tags":[],"difficulty":"Comfort Food","createdAt":"2024-01-02T00:00:00.000Z"}]"#,
    );

    fn mixed_store() -> RecipeStore<MemoryStore, Counter, FixedClock> {
        let mut storage = MemoryStore::new();
        storage.set(DEFAULT_STORAGE_KEY, MIXED_COLLECTION).unwrap();
        RecipeStore::with_sources(storage, Counter::default(), FixedClock(now()))
    }

    #[test]
    fn unreadable_elements_are_skipped_when_listing() {
        let store = mixed_store();

        let ids: Vec<_> = store
            .list_all()
            .iter()
            .map(|recipe| recipe.id().to_string())
            .collect();

        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn delete_of_unknown_id_writes_nothing() {
        let mut store = mixed_store();

        store.delete("unknown").unwrap();

        assert_eq!(raw(&store).as_deref(), Some(MIXED_COLLECTION));
    }

    #[test]
    fn delete_of_unknown_id_leaves_malformed_storage_alone() {
        let mut storage = MemoryStore::new();
        storage.set(DEFAULT_STORAGE_KEY, "{ not json").unwrap();
        let mut store = RecipeStore::with_sources(storage, Counter::default(), FixedClock(now()));

        store.delete("unknown").unwrap();

        assert_eq!(raw(&store).as_deref(), Some("{ not json"));
    }

    #[test]
    fn unreadable_elements_survive_rewrites() {
        let mut store = mixed_store();

        store.create(draft("New")).unwrap();
        store.delete("a").unwrap();
        store
            .update("b", RecipePatch::tags(vec!["winter".to_string()]))
            .unwrap();

        let stored: Vec<Value> = serde_json::from_str(&raw(&store).unwrap()).unwrap();
        let ids: Vec<_> = stored.iter().map(|value| value["id"].clone()).collect();
        assert_eq!(ids, ["legacy", "b", "1"]);
        assert_eq!(stored[0]["title"], "Old Pie");
        assert!(stored[0].get("difficulty").is_none());
        assert_eq!(store.list_all().len(), 2);
    }

    #[test]
    fn ids_of_unreadable_elements_are_not_reused() {
        let mut ids = ["legacy", "fresh"].into_iter().map(String::from);
        let mut storage = MemoryStore::new();
        storage.set(DEFAULT_STORAGE_KEY, MIXED_COLLECTION).unwrap();
        let mut store = RecipeStore::with_sources(
            storage,
            move || ids.next().unwrap_or_default(),
            FixedClock(now()),
        );

        let created = store.create(draft("New")).unwrap();

        assert_eq!(created.id(), "fresh");
    }

    #[test]
    fn malformed_storage_is_replaced_on_write() {
        let mut storage = MemoryStore::new();
        storage.set(DEFAULT_STORAGE_KEY, r#"{"not": "an array"}"#).unwrap();
        let mut store = RecipeStore::with_sources(storage, Counter::default(), FixedClock(now()));

        let created = store.create(draft("Fresh")).unwrap();

        assert_eq!(store.list_all(), vec![created]);
    }

    #[test]
    fn reads_collections_written_by_earlier_versions() {
        let mut storage = MemoryStore::new();
        storage
            .set(
                DEFAULT_STORAGE_KEY,
                r#"[{"id":"1700000000000","title":"Old","ingredients":["x"],"instructions":"y","tags":[],"difficulty":"Gourmet","image":"https://example.com/a.jpg","createdAt":"2023-11-14T22:13:20.000Z"}]"#,
            )
            .unwrap();
        let store = RecipeStore::new(storage);

        let recipes = store.list_all();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].cover_image(), Some("https://example.com/a.jpg"));
    }

    #[test]
    fn persisted_format_omits_absent_optionals() {
        let mut store = store();
        store.create(draft("Plain")).unwrap();

        assert_eq!(
            raw(&store).unwrap(),
            r#"[{"id":"1","title":"Plain","ingredients":["x"],"instructions":"y","tags":[],"difficulty":"Quickie","createdAt":"2024-03-01T12:00:00.000Z"}]"#
        );
    }

    #[test]
    fn config_selects_key() {
        let mut config = Config::default();
        config.set_storage_key("elsewhere").unwrap();
        let mut store = store().with_config(&config);

        store.create(draft("Moved")).unwrap();

        assert_eq!(store.key(), "elsewhere");
        assert!(store.storage().get("elsewhere").unwrap().is_some());
        assert!(store.storage().get(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn import_skips_elements_missing_required_fields() {
        let mut store = store();

        let count = store
            .import_many(
                r#"[{"title":"A","ingredients":["x"],"instructions":"y","tags":[],"difficulty":"Quickie"},{"title":"B"}]"#,
            )
            .unwrap();

        assert_eq!(count, 1);
        let recipes = store.list_all();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title(), "A");
    }

    #[test]
    fn import_assigns_fresh_ids_and_timestamps() {
        let mut store = store();
        store.create(draft("Existing")).unwrap();

        let count = store
            .import_many(
                r#"[{"id":"1","createdAt":"2001-01-01T00:00:00.000Z","title":"A","ingredients":["x"],"instructions":"y","tags":[],"difficulty":"Gourmet"}]"#,
            )
            .unwrap();

        assert_eq!(count, 1);
        let imported = &store.list_all()[1];
        assert_eq!(imported.id(), "2");
        assert_eq!(imported.created_at(), now());
    }

    #[test]
    fn import_skips_elements_that_fail_validation() {
        let mut store = store();

        let count = store
            .import_many(
                r#"[{"title":"Blank","ingredients":["  "],"instructions":"y","difficulty":"Quickie"}]"#,
            )
            .unwrap();

        assert_eq!(count, 0);
        assert!(store.list_all().is_empty());
    }

    #[test]
    fn structurally_invalid_import_changes_nothing() {
        let mut store = store();
        store.create(draft("Existing")).unwrap();
        let before = raw(&store);

        assert!(matches!(
            store.import_many(r#"{"title":"A"}"#),
            Err(ImportError::NotAnArray)
        ));
        assert!(matches!(
            store.import_many(
                r#"[{"title":"A","ingredients":["x"],"instructions":"y","difficulty":"Quickie"}, "oops"]"#
            ),
            Err(ImportError::NotAnObject { index: 1 })
        ));
        assert!(matches!(store.import_many("nope"), Err(ImportError::Parse(_))));
        assert_eq!(raw(&store), before);
    }

    #[test]
    fn export_round_trips_through_import() {
        let mut source = store();
        source.create(draft("A")).unwrap();
        source.create(draft("B").with_tags(vec!["t".to_string()])).unwrap();
        let mut delivered: Vec<Export> = Vec::new();

        let export = source
            .export_all(&source.list_all(), &mut delivered)
            .unwrap();

        assert_eq!(export.filename, EXPORT_ALL_FILENAME);
        assert_eq!(delivered, vec![export.clone()]);

        let mut target = store();
        let text = String::from_utf8(export.contents).unwrap();
        assert_eq!(target.import_many(&text).unwrap(), 2);
        assert_eq!(target.list_all()[1].tags(), ["t".to_string()]);
    }

    #[test]
    fn export_one_uses_sanitized_title() {
        let mut store = store();
        let recipe = store.create(draft("Mom's Famous Chili!")).unwrap();
        let mut delivered: Vec<Export> = Vec::new();

        let export = store.export_one(&recipe, &mut delivered).unwrap();

        assert_eq!(export.filename, "moms_famous_chili_.json");
        assert_eq!(delivered.len(), 1);
    }
}
