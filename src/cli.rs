use std::path::{Path, PathBuf};

mod add;
mod config;
mod delete;
mod export;
mod favorite;
mod import;
mod list;
mod share;
mod show;
mod terminal;
mod update;

use chonky::{Config, Difficulty, FileStore, Recipe, RecipeStore};
use clap::ArgAction;

/// Parse a difficulty at the CLI boundary.
///
/// Accepts the canonical labels in any case, with `-` or `_` standing in
/// for the space, so `comfort-food` means `Comfort Food`.
fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    let wanted = s.trim().replace(['-', '_'], " ");
    Difficulty::ALL
        .into_iter()
        .find(|difficulty| difficulty.as_str().eq_ignore_ascii_case(&wanted))
        .ok_or_else(|| {
            format!("unknown difficulty '{s}' (expected quickie, gourmet or comfort-food)")
        })
}

/// Location of the configuration file inside the data directory.
fn config_path(root: &Path) -> PathBuf {
    root.join("config.toml")
}

/// Opens the recipe store kept in `root`, honouring its configuration.
fn open_store(root: &Path) -> RecipeStore<FileStore> {
    let config = Config::load_or_default(&config_path(root));
    RecipeStore::new(FileStore::new(root.to_path_buf())).with_config(&config)
}

/// Finds a recipe by full id or by a unique id prefix.
fn find_recipe(store: &RecipeStore<FileStore>, id: &str) -> anyhow::Result<Recipe> {
    let recipes = store.list_all();
    if let Some(recipe) = recipes.iter().find(|recipe| recipe.id() == id) {
        return Ok(recipe.clone());
    }

    let mut candidates = recipes.into_iter().filter(|recipe| recipe.id().starts_with(id));
    match (candidates.next(), candidates.next()) {
        (Some(recipe), None) => Ok(recipe),
        (None, _) => anyhow::bail!("Recipe {id} not found"),
        (Some(_), Some(_)) => anyhow::bail!("Recipe id prefix '{id}' is ambiguous"),
    }
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    /// The directory holding the recipe vault
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command.unwrap_or_default().run(self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// List recipes, optionally filtered by a search term (default)
    List(list::Command),

    /// Show a recipe in full
    Show(show::Command),

    /// Add a new recipe
    Add(add::Command),

    /// Change fields of an existing recipe
    Update(update::Command),

    /// Toggle the favorite flag of a recipe
    Favorite(favorite::Command),

    /// Delete a recipe
    Delete(delete::Command),

    /// Export one recipe, or the whole vault, as JSON
    Export(export::Command),

    /// Import recipes from a JSON file
    Import(import::Command),

    /// Print a recipe as shareable plain text
    Share(share::Command),

    /// Show or modify configuration settings
    Config(config::Command),
}

impl Default for Command {
    fn default() -> Self {
        Self::List(list::Command::default())
    }
}

impl Command {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::List(command) => command.run(&root)?,
            Self::Show(command) => command.run(&root)?,
            Self::Add(command) => command.run(&root)?,
            Self::Update(command) => command.run(&root)?,
            Self::Favorite(command) => command.run(&root)?,
            Self::Delete(command) => command.run(&root)?,
            Self::Export(command) => command.run(&root)?,
            Self::Import(command) => command.run(&root)?,
            Self::Share(command) => command.run(&root)?,
            Self::Config(command) => command.run(&root)?,
        }
        Ok(())
    }
}
