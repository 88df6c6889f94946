use std::path::{Path, PathBuf};

use chonky::storage::DirectoryDelivery;
use clap::Parser;
use tracing::instrument;

use super::{find_recipe, open_store, terminal::Colorize};

/// Command arguments for `chonky export`.
#[derive(Debug, Parser)]
pub struct Command {
    /// Recipe id, or a unique prefix of one. Exports every recipe if omitted.
    id: Option<String>,

    /// Directory to write the export into
    #[arg(long, short, default_value = ".")]
    out: PathBuf,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root);
        let mut delivery = DirectoryDelivery::new(self.out);

        let export = if let Some(id) = &self.id {
            let recipe = find_recipe(&store, id)?;
            store.export_one(&recipe, &mut delivery)?
        } else {
            let recipes = store.list_all();
            let export = store.export_all(&recipes, &mut delivery)?;
            tracing::info!("Exported {} recipes", recipes.len());
            export
        };

        println!(
            "{} {}",
            "Exported".success(),
            delivery.path_for(&export).display()
        );
        Ok(())
    }
}
