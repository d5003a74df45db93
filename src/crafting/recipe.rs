//! Crafting recipes - multisets of input card types producing one card

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A recipe that turns a set of input cards into one result card
///
/// Input order does not matter but multiplicity does: `["a", "a"]` needs
/// two `a` cards and is not satisfied by `["a"]` or `["a", "b"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Input card types, as a multiset
    pub cards: Vec<String>,
    /// Card type produced
    pub result: String,
}

impl Recipe {
    pub fn new<I, S>(cards: I, result: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cards: cards.into_iter().map(Into::into).collect(),
            result: result.into(),
        }
    }

    /// Check whether `types` is exactly this recipe's input multiset
    pub fn matches<S: AsRef<str>>(&self, types: &[S]) -> bool {
        if self.cards.len() != types.len() {
            return false;
        }

        let wanted = count_types(self.cards.iter().map(String::as_str));
        let offered = count_types(types.iter().map(AsRef::as_ref));

        wanted == offered
    }
}

/// Frequency of each card type
fn count_types<'a>(types: impl Iterator<Item = &'a str>) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for card_type in types {
        *counts.entry(card_type).or_insert(0) += 1;
    }
    counts
}
