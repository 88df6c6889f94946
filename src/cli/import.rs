use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::instrument;

use super::{open_store, terminal::Colorize};

/// Command arguments for `chonky import`.
#[derive(Debug, Parser)]
pub struct Command {
    /// A JSON file holding an array of recipes
    file: PathBuf,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let raw = std::fs::read_to_string(&self.file)
            .with_context(|| format!("failed to read {}", self.file.display()))?;

        let mut store = open_store(root);
        let count = store.import_many(&raw)?;

        println!(
            "{}",
            format!("Successfully imported {count} recipes").success()
        );
        Ok(())
    }
}
