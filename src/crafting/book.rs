//! Recipe book - the fixed recipe table loaded at startup

use std::path::Path;

use thiserror::Error;
use tracing::info;

use super::recipe::Recipe;
use crate::item::CardRegistry;

/// Errors raised while loading or validating recipes
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("recipe {index} has no input cards")]
    EmptyRecipe { index: usize },

    #[error("recipe {index} references unknown card '{card}'")]
    UnknownCard { index: usize, card: String },

    #[error("failed to read recipes: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse recipes: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ordered recipe table
///
/// Lookups scan in table order and the first matching recipe wins.
#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// Built-in recipes matching `CardRegistry::create_default`
    pub fn create_default() -> Self {
        Self::new(vec![
            Recipe::new(["test", "test"], "tester"),
            Recipe::new(["test", "tester"], "toolkit"),
            Recipe::new(["tester", "toolkit"], "workbench"),
        ])
    }

    /// Load recipes from a JSON array
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, RecipeError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let book = Self::from_json(&content)?;
        info!(
            path = %path.as_ref().display(),
            recipes = book.len(),
            "loaded recipes"
        );
        Ok(book)
    }

    pub fn from_json(json: &str) -> Result<Self, RecipeError> {
        let recipes: Vec<Recipe> = serde_json::from_str(json)?;
        Ok(Self::new(recipes))
    }

    /// Check every recipe against the card registry
    pub fn validate(&self, registry: &CardRegistry) -> Result<(), RecipeError> {
        for (index, recipe) in self.recipes.iter().enumerate() {
            if recipe.cards.is_empty() {
                return Err(RecipeError::EmptyRecipe { index });
            }

            let unknown = recipe
                .cards
                .iter()
                .chain(std::iter::once(&recipe.result))
                .find(|card| !registry.exists(card));

            if let Some(card) = unknown {
                return Err(RecipeError::UnknownCard {
                    index,
                    card: card.clone(),
                });
            }
        }
        Ok(())
    }

    /// First recipe whose inputs are exactly `types`
    pub fn find_match<S: AsRef<str>>(&self, types: &[S]) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.matches(types))
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
