use std::path::Path;

use clap::Parser;
use dialoguer::Confirm;
use tracing::instrument;

use super::{find_recipe, open_store, terminal::Colorize};

/// Command arguments for `chonky delete`.
#[derive(Debug, Parser)]
pub struct Command {
    /// Recipe id, or a unique prefix of one
    id: String,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    yes: bool,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut store = open_store(root);
        let recipe = find_recipe(&store, &self.id)?;

        if !self.yes {
            let confirmed = Confirm::new()
                .with_prompt(format!("Delete '{}'?", recipe.title()))
                .default(false)
                .interact()?;
            if !confirmed {
                println!("Cancelled");
                return Ok(());
            }
        }

        store.delete(recipe.id())?;
        println!("{} {}", "Deleted".success(), recipe.title());
        Ok(())
    }
}
