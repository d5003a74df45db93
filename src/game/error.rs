use thiserror::Error;

use crate::crafting::RecipeError;
use crate::drag::DragError;
use crate::inventory::InventoryError;
use crate::item::{CardId, IdsExhausted, RegistryError};

/// Everything that can go wrong on the card table
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Drag(#[from] DragError),

    #[error(transparent)]
    Recipe(#[from] RecipeError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Ids(#[from] IdsExhausted),

    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotError),

    /// No card with this id in the combination area
    #[error("no combination card with id {0}")]
    UnknownCard(CardId),

    /// Crafting needs exactly two cards in the combination area
    #[error("combining needs exactly two cards, found {found}")]
    NeedTwoCards { found: usize },
}

/// Ways a snapshot can break the table's rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("more than one inventory stack of '{0}'")]
    DuplicateStack(String),

    #[error("card id {0} used more than once")]
    DuplicateId(CardId),

    #[error("{stacks} stacks exceed the inventory capacity of {capacity}")]
    OverCapacity { stacks: usize, capacity: usize },

    #[error("card id {0} leaves no room for new ids")]
    IdOutOfRange(CardId),
}
