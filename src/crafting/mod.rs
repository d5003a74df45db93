// Crafting module
//
// Recipes and the recipe book used to match cards in the combination area.

pub mod book;
pub mod recipe;

pub use book::{RecipeBook, RecipeError};
pub use recipe::Recipe;
