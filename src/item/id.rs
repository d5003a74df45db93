use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a stack or placed card.
pub type CardId = u32;

/// Every id up to `CardId::MAX` has been handed out or reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("card ids exhausted")]
pub struct IdsExhausted;

/// Hands out card ids that are unique across the whole table.
///
/// Ids are never reused, even after the card they named is consumed.
/// `CardId::MAX` is never handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next: CardId,
}

impl IdAllocator {
    /// Starts allocating at 1.
    pub fn new() -> Self {
        IdAllocator { next: 1 }
    }

    /// Starts allocating above every id in `existing`.
    pub fn above(existing: impl IntoIterator<Item = CardId>) -> Result<Self, IdsExhausted> {
        let mut ids = Self::new();
        for id in existing {
            ids.observe(id)?;
        }
        Ok(ids)
    }

    pub fn next_id(&mut self) -> Result<CardId, IdsExhausted> {
        if self.next == CardId::MAX {
            return Err(IdsExhausted);
        }
        let id = self.next;
        self.next += 1;
        Ok(id)
    }

    /// Makes sure `id` will never be handed out.
    pub fn observe(&mut self, id: CardId) -> Result<(), IdsExhausted> {
        if id >= self.next {
            self.next = id.checked_add(1).ok_or(IdsExhausted)?;
        }
        Ok(())
    }

    /// The id the next call to `next_id` returns.
    pub fn peek(&self) -> CardId {
        self.next
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_above_existing_ids() {
        let mut ids = IdAllocator::above([3, 7, 2]).unwrap();
        assert_eq!(ids.next_id(), Ok(8));
        assert_eq!(ids.next_id(), Ok(9));

        ids.observe(4).unwrap();
        assert_eq!(ids.peek(), 10);
        ids.observe(20).unwrap();
        assert_eq!(ids.next_id(), Ok(21));
    }

    #[test]
    fn top_of_range_is_refused() {
        assert_eq!(IdAllocator::above([CardId::MAX]), Err(IdsExhausted));

        let mut ids = IdAllocator::above([CardId::MAX - 2]).unwrap();
        assert_eq!(ids.next_id(), Ok(CardId::MAX - 1));
        assert_eq!(ids.next_id(), Err(IdsExhausted));
        assert_eq!(ids.peek(), CardId::MAX);
    }
}
