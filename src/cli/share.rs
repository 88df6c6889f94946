use std::path::Path;

use clap::Parser;
use tracing::instrument;

use super::{find_recipe, open_store};

/// Command arguments for `chonky share`.
#[derive(Debug, Parser)]
pub struct Command {
    /// Recipe id, or a unique prefix of one
    id: String,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root);
        let recipe = find_recipe(&store, &self.id)?;
        println!("{}", recipe.share_text());
        Ok(())
    }
}
