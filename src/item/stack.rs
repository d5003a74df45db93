use serde::{Deserialize, Serialize};

use super::id::{CardId, IdAllocator, IdsExhausted};

/// A card type with a quantity, as held in one inventory slot
///
/// Stacks are unbounded: any number of identical cards aggregate under a
/// single entry. A stack with quantity 1 is a plain card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStack {
    /// Unique id of this stack
    pub id: CardId,

    /// Type id in the CardRegistry
    pub card_type: String,

    /// How many cards (always at least 1 while in an inventory)
    pub quantity: u32,
}

impl CardStack {
    /// Creates a new card stack
    pub fn new(id: CardId, card_type: impl Into<String>, quantity: u32) -> Self {
        CardStack {
            id,
            card_type: card_type.into(),
            quantity,
        }
    }

    /// Creates a single card
    pub fn unit(id: CardId, card_type: impl Into<String>) -> Self {
        Self::new(id, card_type, 1)
    }

    /// Adds cards to this stack
    pub fn add(&mut self, amount: u32) {
        self.quantity = self.quantity.saturating_add(amount);
    }

    /// Splits a single card off this stack under a fresh id
    ///
    /// Returns None when only one card is left; the caller moves the whole
    /// stack in that case. The stack is untouched if no id is left.
    ///
    /// # Example
    /// ```
    /// use card_stacking::item::{CardStack, IdAllocator};
    ///
    /// let mut ids = IdAllocator::above([1]).unwrap();
    /// let mut stack = CardStack::new(1, "test", 3);
    /// let unit = stack.split_one(&mut ids).unwrap().unwrap();
    /// assert_eq!(stack.quantity, 2);
    /// assert_eq!(unit.quantity, 1);
    /// assert_eq!(unit.id, 2);
    /// ```
    pub fn split_one(&mut self, ids: &mut IdAllocator) -> Result<Option<CardStack>, IdsExhausted> {
        if self.quantity <= 1 {
            return Ok(None);
        }

        let id = ids.next_id()?;
        self.quantity -= 1;
        Ok(Some(CardStack::unit(id, self.card_type.clone())))
    }

    /// Returns true if this stack is a single card
    pub fn is_unit(&self) -> bool {
        self.quantity == 1
    }

    /// Returns true if this stack is empty
    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }
}
