// Combination area module
//
// Free-form workspace where single cards are laid out before crafting.

pub mod area;

pub use area::{CombinationArea, PlacedCard};
