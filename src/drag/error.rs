use thiserror::Error;

use crate::item::CardId;

/// Errors raised by the drag coordinator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DragError {
    /// A second drag was started while one is in flight
    #[error("card {card_id} is already being dragged")]
    AlreadyDragging { card_id: CardId },

    /// A drop or cancel arrived with no drag in flight
    #[error("no drag in progress")]
    NotDragging,

    /// Pointer-down landed on no card
    #[error("no card under the pointer at ({x}, {y})")]
    NothingToGrab { x: f32, y: f32 },
}
