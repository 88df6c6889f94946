use std::path::Path;

use chonky::{Difficulty, Recipe, filter};
use clap::{Parser, ValueEnum};
use tracing::instrument;

use super::{
    open_store, parse_difficulty,
    terminal::{self, Colorize},
};

const MIN_TITLE_WIDTH: usize = 12;
const BADGE_WIDTH: usize = 16;

/// Command arguments for `chonky list`.
#[derive(Debug, Default, Parser)]
pub struct Command {
    /// Case-insensitive search over titles, tags and ingredients.
    #[arg(short, long, value_name = "TERM", default_value = "")]
    search: String,

    /// Show only favorites.
    #[arg(long)]
    favorites: bool,

    /// Show only recipes of this difficulty.
    #[arg(long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Print only recipe ids, one per line.
    #[arg(long, short, conflicts_with = "output")]
    quiet: bool,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root);
        let recipes = store.list_all();
        let selected = self.select(&recipes);

        if self.quiet {
            for recipe in &selected {
                println!("{}", recipe.id());
            }
            return Ok(());
        }

        match self.output {
            OutputFormat::Table => print_table(&selected, recipes.len()),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&selected)?),
        }
        Ok(())
    }

    fn select<'a>(&self, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
        filter(recipes, &self.search)
            .into_iter()
            .filter(|recipe| !self.favorites || recipe.is_favorite())
            .filter(|recipe| {
                self.difficulty
                    .is_none_or(|difficulty| recipe.difficulty() == difficulty)
            })
            .collect()
    }
}

fn print_table(recipes: &[&Recipe], total: usize) {
    if total == 0 {
        println!("{}", "No recipes yet. Add one with `chonky add`.".dim());
        return;
    }
    if recipes.is_empty() {
        println!("{}", "No recipes match.".dim());
        return;
    }

    // id prefix, marker, badge and separators
    let prefix_width = 8 + 1 + 1 + 1 + BADGE_WIDTH + 1;
    let title_width = terminal::terminal_width().map_or(usize::MAX, |width| {
        width.saturating_sub(prefix_width).max(MIN_TITLE_WIDTH)
    });

    for recipe in recipes {
        let tags = if recipe.tags().is_empty() {
            String::new()
        } else {
            format!("  #{}", recipe.tags().join(" #")).dim()
        };
        println!(
            "{} {} {} {}{tags}",
            short_id(recipe.id()).dim(),
            terminal::favorite_marker(recipe.is_favorite()),
            terminal::difficulty_badge(recipe.difficulty(), BADGE_WIDTH),
            terminal::truncate(recipe.title(), title_width),
        );
    }
    println!(
        "\n{}",
        format!("{} of {total} recipes", recipes.len()).dim()
    );
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
