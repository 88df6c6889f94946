use std::path::Path;

use chonky::{Difficulty, RecipePatch};
use clap::Parser;
use tracing::instrument;

use super::{find_recipe, open_store, parse_difficulty, terminal::Colorize};

/// Command arguments for `chonky update`.
#[derive(Debug, Parser)]
pub struct Command {
    /// Recipe id, or a unique prefix of one
    id: String,

    /// New title
    #[arg(long, short)]
    title: Option<String>,

    /// Replacement ingredient list (repeat for each ingredient)
    #[arg(long = "ingredient", short)]
    ingredients: Vec<String>,

    /// New preparation steps
    #[arg(long, short = 'n')]
    instructions: Option<String>,

    /// New difficulty: quickie, gourmet or comfort-food
    #[arg(long, short, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// Replacement tags, comma separated or repeated
    #[arg(long = "tag", value_delimiter = ',', conflicts_with = "clear_tags")]
    tags: Vec<String>,

    /// Remove all tags
    #[arg(long)]
    clear_tags: bool,

    /// New cover image URL
    #[arg(long, conflicts_with = "clear_cover_image")]
    cover_image: Option<String>,

    /// Remove the cover image
    #[arg(long)]
    clear_cover_image: bool,

    /// Replacement gallery (repeat for each image)
    #[arg(long = "image", conflicts_with = "clear_images")]
    images: Vec<String>,

    /// Remove the gallery
    #[arg(long)]
    clear_images: bool,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut store = open_store(root);
        let recipe = find_recipe(&store, &self.id)?;

        let patch = self.into_patch();
        if patch.is_empty() {
            println!("{}", "Nothing to update.".warning());
            return Ok(());
        }

        store.update(recipe.id(), patch)?;
        println!("{} {}", "Updated".success(), recipe.title());
        Ok(())
    }

    fn into_patch(self) -> RecipePatch {
        let tags = if self.clear_tags {
            Some(Vec::new())
        } else {
            non_empty(self.tags)
        };
        let cover_image = if self.clear_cover_image {
            Some(None)
        } else {
            self.cover_image.map(Some)
        };
        let images = if self.clear_images {
            Some(None)
        } else {
            non_empty(self.images).map(Some)
        };

        RecipePatch {
            title: self.title,
            ingredients: non_empty(self.ingredients),
            instructions: self.instructions,
            tags,
            difficulty: self.difficulty,
            cover_image,
            images,
            is_favorite: None,
        }
    }
}

fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    (!items.is_empty()).then_some(items)
}
