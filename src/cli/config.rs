use std::path::Path;

use chonky::Config;
use clap::ValueEnum;
use tracing::instrument;

use super::{config_path, terminal::Colorize};

#[derive(Debug, clap::Parser)]
/// Show or modify vault configuration
///
/// Configuration is stored in config.toml in the vault directory.
///
/// Available configuration keys:
///   `storage_key`          Key the recipe collection is stored under
///   `export_all_filename`  File name for whole-vault exports
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show all configuration values
    Show,

    /// Get a specific configuration value
    Get {
        /// Configuration key to retrieve
        key: Key,
    },

    /// Set a configuration value
    ///
    /// Example:
    ///   chonky config set export-all-filename backup.json
    Set {
        /// Configuration key to set
        key: Key,

        /// Value to set
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
enum Key {
    #[value(alias = "storage-key")]
    StorageKey,
    #[value(alias = "export-all-filename")]
    ExportAllFilename,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let path = config_path(root);

        match self.command {
            ConfigCommand::Show => {
                let config = load(&path)?;
                println!("Configuration:");
                println!("  storage_key: {}", config.storage_key());
                println!("  export_all_filename: {}", config.export_all_filename());
            }
            ConfigCommand::Get { key } => println!("{}", get(&load(&path)?, key)),
            ConfigCommand::Set { key, value } => {
                let mut config = load(&path)?;
                match key {
                    Key::StorageKey => config.set_storage_key(&value)?,
                    Key::ExportAllFilename => config.set_export_all_filename(&value)?,
                }
                std::fs::create_dir_all(root)?;
                config.save(&path)?;
                println!(
                    "{} {} = {}",
                    "Set".success(),
                    key_name(key),
                    get(&config, key)
                );
            }
        }
        Ok(())
    }
}

/// Loads the configuration, using the defaults when there is no file yet.
///
/// An existing but unreadable file is an error here, so it is never
/// silently overwritten.
fn load(path: &Path) -> anyhow::Result<Config> {
    if path.exists() {
        Ok(Config::load(path)?)
    } else {
        Ok(Config::default())
    }
}

fn get(config: &Config, key: Key) -> &str {
    match key {
        Key::StorageKey => config.storage_key(),
        Key::ExportAllFilename => config.export_all_filename(),
    }
}

const fn key_name(key: Key) -> &'static str {
    match key {
        Key::StorageKey => "storage_key",
        Key::ExportAllFilename => "export_all_filename",
    }
}
