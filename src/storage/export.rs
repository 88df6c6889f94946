//! Export of recipes as downloadable JSON files.

use std::{io, path::PathBuf, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use crate::Recipe;

/// Default file name for a whole-collection export.
pub const EXPORT_ALL_FILENAME: &str = "chonky-recipes.json";

static APOSTROPHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("['\u{2019}]").expect("static regex is valid"));

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-z0-9]").expect("static regex is valid"));

/// A serialized export, ready to be handed to a [`Deliver`] implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    /// The suggested file name.
    pub filename: String,
    /// Pretty-printed JSON.
    pub contents: Vec<u8>,
}

/// Failure to produce or deliver an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The recipes could not be serialized.
    #[error("failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The delivery mechanism rejected the file.
    #[error("failed to deliver '{filename}': {source}")]
    Delivery {
        /// The file being delivered.
        filename: String,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

impl Export {
    /// Serializes a single recipe. The file name is derived from its title.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn one(recipe: &Recipe) -> Result<Self, ExportError> {
        Self::new(format!("{}.json", sanitize_title(recipe.title())), recipe)
    }

    /// Serializes a list of recipes under a fixed file name.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn all(recipes: &[Recipe], filename: impl Into<String>) -> Result<Self, ExportError> {
        Self::new(filename.into(), recipes)
    }

    fn new<T: Serialize + ?Sized>(filename: String, value: &T) -> Result<Self, ExportError> {
        // serde_json's pretty printer indents with two spaces
        let contents = serde_json::to_vec_pretty(value)?;
        Ok(Self { filename, contents })
    }

    /// Hands the export to a delivery mechanism.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails.
    pub fn deliver<D: Deliver + ?Sized>(&self, delivery: &mut D) -> Result<(), ExportError> {
        delivery
            .deliver(self)
            .map_err(|source| ExportError::Delivery {
                filename: self.filename.clone(),
                source,
            })?;
        tracing::debug!("Delivered export {}", self.filename);
        Ok(())
    }
}

/// Lowercases `title` and replaces every character outside `[a-z0-9]` with
/// `_`, except apostrophes, which are dropped.
///
/// The apostrophe rule departs from a plain character-class replacement.
/// That would turn `"Mom's Famous Chili!"` into `"mom_s_famous_chili_"`,
/// while the documented export name for it is `"moms_famous_chili_"`. The
/// documented name wins; both `'` and `’` are removed before replacing.
#[must_use]
pub fn sanitize_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let without_apostrophes = APOSTROPHES.replace_all(&lowered, "");
    UNSAFE_FILENAME_CHARS
        .replace_all(&without_apostrophes, "_")
        .into_owned()
}

/// Something that turns an [`Export`] into a file the user can keep.
pub trait Deliver {
    /// Delivers the export.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be delivered.
    fn deliver(&mut self, export: &Export) -> io::Result<()>;
}

/// Collects exports in memory.
impl Deliver for Vec<Export> {
    fn deliver(&mut self, export: &Export) -> io::Result<()> {
        self.push(export.clone());
        Ok(())
    }
}

/// Writes exports as files in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryDelivery {
    dir: PathBuf,
}

impl DirectoryDelivery {
    /// Delivers into `dir`, creating it if needed.
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Where the file for `export` ends up.
    #[must_use]
    pub fn path_for(&self, export: &Export) -> PathBuf {
        self.dir.join(&export.filename)
    }
}

impl Deliver for DirectoryDelivery {
    fn deliver(&mut self, export: &Export) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(export), &export.contents)
    }
}
