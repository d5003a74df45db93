use thiserror::Error;

use crate::item::{CardId, IdsExhausted};

/// Errors that can occur during inventory operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// No stack with this id
    #[error("no inventory stack with id {0}")]
    UnknownStack(CardId),

    /// Stack index out of bounds
    #[error("invalid stack index: {0}")]
    InvalidIndex(usize),

    /// A new stack would exceed the slot capacity
    #[error("inventory is full")]
    InventoryFull,

    /// No fresh id left for a new stack or split card
    #[error(transparent)]
    Ids(#[from] IdsExhausted),
}
