use std::path::Path;

use chonky::Recipe;
use clap::{Parser, ValueEnum};
use tracing::instrument;

use super::{
    find_recipe, open_store,
    terminal::{self, Colorize},
};

/// Command arguments for `chonky show`.
#[derive(Debug, Parser)]
pub struct Command {
    /// Recipe id, or a unique prefix of one
    id: String,

    /// Output format (default: pretty).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root);
        let recipe = find_recipe(&store, &self.id)?;

        match self.output {
            OutputFormat::Pretty => print!("{}", render(&recipe)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&recipe)?),
        }
        Ok(())
    }
}

fn render(recipe: &Recipe) -> String {
    let mut lines = vec![
        format!(
            "{} {}",
            terminal::favorite_marker(recipe.is_favorite()),
            recipe.title()
        ),
        format!(
            "  {}  {}",
            terminal::difficulty_badge(recipe.difficulty(), 0),
            format!("added {}", recipe.created_at().format("%Y-%m-%d")).dim()
        ),
    ];
    if !recipe.tags().is_empty() {
        lines.push(format!("  #{}", recipe.tags().join(" #")).dim());
    }

    lines.push(String::new());
    lines.push("Ingredients:".to_string());
    lines.extend(recipe.ingredients().iter().map(|i| format!("  • {i}")));

    lines.push(String::new());
    lines.push("Instructions:".to_string());
    lines.extend(recipe.instructions().lines().map(|l| format!("  {l}")));

    if let Some(cover) = recipe.cover_image() {
        lines.push(String::new());
        lines.push(format!("Cover: {cover}").dim());
    }
    if !recipe.images().is_empty() {
        lines.push(format!("Gallery: {} image(s)", recipe.images().len()).dim());
        lines.extend(recipe.images().iter().map(|url| format!("  {url}").dim()));
    }

    lines.push(String::new());
    lines.push(format!("id: {}", recipe.id()).dim());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
