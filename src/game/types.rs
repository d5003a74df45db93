// Outcomes and snapshots produced by the card table

use serde::{Deserialize, Serialize};

use crate::combination::PlacedCard;
use crate::drag::DragSource;
use crate::geometry::Point;
use crate::item::{CardId, CardStack};

pub const NO_MATCH_MESSAGE: &str = "These cards cannot be combined!";

/// Where a dropped card ended up
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// Left the combination area and joined (or started) an inventory stack
    MovedToInventory { stack_id: CardId },

    /// Dropped back on the inventory it came from, now at `index`
    ReturnedToInventory { index: usize },

    /// Dropped from the inventory onto the combination area under a fresh id
    PlacedInCombination { card_id: CardId, position: Point },

    /// Moved within the combination area
    MovedInCombination { card_id: CardId, position: Point },

    /// Dropped outside every zone, or refused; back where it started
    Restored { source: DragSource },
}

/// Result of pressing "combine"
#[derive(Debug, Clone, PartialEq)]
pub enum CraftOutcome {
    Crafted {
        result: String,

        /// Inventory stack that received the result
        stack_id: CardId,

        /// Combination cards used up
        consumed: Vec<CardId>,
        message: String,
    },

    /// No recipe matched; the cards stay where they are
    NoMatch { message: String },
}

impl CraftOutcome {
    /// Status line to show the player
    pub fn message(&self) -> &str {
        match self {
            CraftOutcome::Crafted { message, .. } | CraftOutcome::NoMatch { message } => message,
        }
    }

    pub fn is_crafted(&self) -> bool {
        matches!(self, CraftOutcome::Crafted { .. })
    }
}

/// Serializable copy of everything on the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub inventory: Vec<CardStack>,
    pub combination: Vec<PlacedCard>,

    /// Next id the allocator hands out
    pub next_id: CardId,
}
