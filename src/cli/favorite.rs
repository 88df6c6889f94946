use std::path::Path;

use clap::Parser;
use tracing::instrument;

use super::{find_recipe, open_store, terminal::Colorize};

/// Command arguments for `chonky favorite`.
#[derive(Debug, Parser)]
pub struct Command {
    /// Recipe id, or a unique prefix of one
    id: String,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut store = open_store(root);
        let recipe = find_recipe(&store, &self.id)?;

        let Some(favorite) = store.toggle_favorite(recipe.id())? else {
            anyhow::bail!("Recipe {} not found", self.id);
        };

        if favorite {
            println!("{} {}", "♥ Favorited".success(), recipe.title());
        } else {
            println!("{} {}", "Unfavorited".dim(), recipe.title());
        }
        Ok(())
    }
}
