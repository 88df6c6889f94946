use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::storage::{DEFAULT_STORAGE_KEY, export::EXPORT_ALL_FILENAME};

/// Configuration for a recipe vault.
///
/// Stored as TOML in `config.toml` at the root of the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The key under which the whole recipe collection is stored.
    storage_key: String,

    /// File name used when exporting the whole collection.
    export_all_filename: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            export_all_filename: default_export_all_filename(),
        }
    }
}

/// Failure to read or write a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Read(#[source] std::io::Error),

    /// The file is not valid configuration TOML.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The file could not be written.
    #[error("failed to write config file: {0}")]
    Write(#[source] std::io::Error),

    /// A key was set to an empty value.
    #[error("'{0}' must not be empty")]
    EmptyValue(&'static str),
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        Ok(toml::from_str(&content)?)
    }

    /// Loads the configuration, falling back to the defaults if the file is
    /// missing or invalid.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config from {}: {e}", path.display());
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(ConfigError::Write)
    }

    /// The key holding the recipe collection.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// The file name for whole-collection exports.
    #[must_use]
    pub fn export_all_filename(&self) -> &str {
        &self.export_all_filename
    }

    /// Sets the storage key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank.
    pub fn set_storage_key(&mut self, key: &str) -> Result<(), ConfigError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::EmptyValue("storage_key"));
        }
        key.clone_into(&mut self.storage_key);
        Ok(())
    }

    /// Sets the file name used for whole-collection exports.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank.
    pub fn set_export_all_filename(&mut self, name: &str) -> Result<(), ConfigError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyValue("export_all_filename"));
        }
        name.clone_into(&mut self.export_all_filename);
        Ok(())
    }
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_export_all_filename() -> String {
    EXPORT_ALL_FILENAME.to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_storage_key")]
        storage_key: String,

        #[serde(default = "default_export_all_filename")]
        export_all_filename: String,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                storage_key,
                export_all_filename,
            } => Self {
                storage_key,
                export_all_filename,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            storage_key: config.storage_key,
            export_all_filename: config.export_all_filename,
        }
    }
}
