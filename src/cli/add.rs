use std::path::Path;

use chonky::{Difficulty, RecipeDraft};
use clap::Parser;
use tracing::instrument;

use super::{open_store, parse_difficulty, terminal::Colorize};

/// Command arguments for `chonky add`.
#[derive(Debug, Parser)]
pub struct Command {
    /// The recipe title
    #[arg(long, short)]
    title: String,

    /// An ingredient line (repeat for each ingredient)
    #[arg(long = "ingredient", short, required = true)]
    ingredients: Vec<String>,

    /// Preparation steps
    #[arg(long, short = 'n')]
    instructions: String,

    /// Difficulty: quickie, gourmet or comfort-food
    #[arg(long, short, value_parser = parse_difficulty)]
    difficulty: Difficulty,

    /// Tags, comma separated or repeated
    #[arg(long = "tag", value_delimiter = ',')]
    tags: Vec<String>,

    /// Cover image URL
    #[arg(long)]
    cover_image: Option<String>,

    /// Gallery image URL (repeat for each image)
    #[arg(long = "image")]
    images: Vec<String>,

    /// Mark the recipe as a favorite
    #[arg(long)]
    favorite: bool,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut store = open_store(root);
        let recipe = store.create(self.into_draft())?;

        tracing::info!("Added recipe {}", recipe.id());
        println!(
            "{} {} {}",
            "Added".success(),
            recipe.title(),
            format!("({})", recipe.id()).dim()
        );
        Ok(())
    }

    fn into_draft(self) -> RecipeDraft {
        let mut draft = RecipeDraft::new(
            self.title,
            self.ingredients,
            self.instructions,
            self.difficulty,
        )
        .with_tags(self.tags)
        .with_images(self.images);
        if let Some(url) = self.cover_image {
            draft = draft.with_cover_image(url);
        }
        if self.favorite {
            draft.is_favorite = Some(true);
        }
        draft
    }
}
