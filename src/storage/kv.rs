//! Key-value persistence ports.
//!
//! The recipe store keeps its whole collection under a single key. Anything
//! that can get and set strings by key can back it.

use std::{collections::HashMap, io, path::PathBuf};

/// A failure of the underlying key-value backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading the value for a key failed.
    #[error("failed to read key '{key}': {source}")]
    Read {
        /// The key being read.
        key: String,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// Writing the value for a key failed.
    #[error("failed to write key '{key}': {source}")]
    Write {
        /// The key being written.
        key: String,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

/// String storage addressed by key.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// An in-process store. Nothing outlives the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A store keeping one `<key>.json` file per key in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `root`.
    ///
    /// The directory is created on the first write.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let write = || -> io::Result<()> {
            std::fs::create_dir_all(&self.root)?;
            // staged next to the target, then renamed over it
            let tmp = path.with_extension("json.tmp");
            std::fs::write(&tmp, value)?;
            std::fs::rename(&tmp, &path)
        };
        write().map_err(|source| StorageError::Write {
            key: key.to_string(),
            source,
        })?;
        tracing::trace!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}
