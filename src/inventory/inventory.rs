use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::InventoryError;
use crate::item::{CardId, CardStack, IdAllocator};

/// Ordered list of card stacks
///
/// Stack order is grid order: index 0 is the top-left slot. Cards of the
/// same type aggregate into one stack, so lookups by type find at most one
/// entry in normal play.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    stacks: Vec<CardStack>,

    /// Maximum number of stacks (None = unbounded)
    capacity: Option<usize>,
}

impl Inventory {
    /// Creates a new empty inventory
    pub fn new(capacity: Option<usize>) -> Self {
        Inventory {
            stacks: Vec::new(),
            capacity,
        }
    }

    /// Creates an inventory holding the given stacks in order
    ///
    /// The capacity is not enforced against the initial stacks.
    pub fn with_stacks(stacks: Vec<CardStack>, capacity: Option<usize>) -> Self {
        Inventory { stacks, capacity }
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Returns true if no new stack can be added
    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.stacks.len() >= cap)
    }

    pub fn stacks(&self) -> &[CardStack] {
        &self.stacks
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardStack> {
        self.stacks.iter()
    }

    pub fn get(&self, index: usize) -> Option<&CardStack> {
        self.stacks.get(index)
    }

    /// Counts how many cards of a type are in the inventory
    pub fn count(&self, card_type: &str) -> u32 {
        self.stacks
            .iter()
            .filter(|stack| stack.card_type == card_type)
            .map(|stack| stack.quantity)
            .sum()
    }

    /// Total number of cards across all stacks
    pub fn total_units(&self) -> u32 {
        self.stacks.iter().map(|stack| stack.quantity).sum()
    }

    pub fn find_by_type(&self, card_type: &str) -> Option<&CardStack> {
        self.stacks.iter().find(|stack| stack.card_type == card_type)
    }

    /// Index of the stack with this id
    pub fn position_of(&self, id: CardId) -> Option<usize> {
        self.stacks.iter().position(|stack| stack.id == id)
    }

    fn position_of_type(&self, card_type: &str) -> Option<usize> {
        self.stacks
            .iter()
            .position(|stack| stack.card_type == card_type)
    }

    /// Returns true if a card of this type can be added without error
    pub fn can_accept(&self, card_type: &str) -> bool {
        self.position_of_type(card_type).is_some() || !self.is_full()
    }

    /// Adds one card of a type
    ///
    /// Merges into the existing stack of that type, or appends a new
    /// single-card stack. Returns the id of the stack that received it.
    pub fn add_unit(
        &mut self,
        card_type: &str,
        ids: &mut IdAllocator,
    ) -> Result<CardId, InventoryError> {
        self.add_cards(card_type, 1, ids)
    }

    /// Adds `quantity` cards of a type, merging when possible
    pub fn add_cards(
        &mut self,
        card_type: &str,
        quantity: u32,
        ids: &mut IdAllocator,
    ) -> Result<CardId, InventoryError> {
        if let Some(index) = self.position_of_type(card_type) {
            let stack = &mut self.stacks[index];
            stack.add(quantity);
            return Ok(stack.id);
        }

        if self.is_full() {
            return Err(InventoryError::InventoryFull);
        }

        let stack = CardStack::new(ids.next_id()?, card_type, quantity);
        let id = stack.id;
        self.stacks.push(stack);
        Ok(id)
    }

    /// Takes one card out of a stack
    ///
    /// A stack with more than one card is split: it keeps its id and
    /// position and the returned card gets a fresh id. A single card is
    /// removed outright. Also returns the index the stack occupied.
    pub fn take_unit(
        &mut self,
        stack_id: CardId,
        ids: &mut IdAllocator,
    ) -> Result<(CardStack, usize), InventoryError> {
        let index = self
            .position_of(stack_id)
            .ok_or(InventoryError::UnknownStack(stack_id))?;

        let card = match self.stacks[index].split_one(ids)? {
            Some(unit) => unit,
            None => self.stacks.remove(index),
        };

        debug!(stack_id, card_id = card.id, index, "took card from inventory");
        Ok((card, index))
    }

    /// Puts a card taken with `take_unit` back into the inventory
    ///
    /// A single card merges into an existing stack of its type. Anything
    /// else is inserted at `index`, clamped to the end of the list. Returns
    /// the index of the stack that now holds the card.
    ///
    /// Capacity is not checked: taking the card either left a stack of its
    /// type behind or freed the slot it goes back into.
    pub fn restore_unit(&mut self, card: CardStack, index: usize) -> usize {
        if card.is_unit() {
            if let Some(existing) = self.position_of_type(&card.card_type) {
                self.stacks[existing].add(1);
                return existing;
            }
        }

        let index = index.min(self.stacks.len());
        self.stacks.insert(index, card);
        index
    }

    /// Moves a stack to another position
    ///
    /// Returns false (and does nothing) when `from == to` or `to` is past
    /// the last stack.
    pub fn move_stack(&mut self, from: usize, to: usize) -> Result<bool, InventoryError> {
        if from >= self.stacks.len() {
            return Err(InventoryError::InvalidIndex(from));
        }
        if from == to || to >= self.stacks.len() {
            return Ok(false);
        }

        let stack = self.stacks.remove(from);
        self.stacks.insert(to, stack);
        Ok(true)
    }

    /// Sorts stacks by quantity, highest first
    ///
    /// The sort is stable, so equal quantities keep their relative order.
    pub fn sort_by_quantity(&mut self) {
        self.stacks.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Inventory, IdAllocator) {
        let inventory = Inventory::with_stacks(
            vec![CardStack::new(1, "test", 5), CardStack::new(2, "tester", 1)],
            Some(4),
        );
        (inventory, IdAllocator::above([1, 2]).unwrap())
    }

    #[test]
    fn take_unit_splits_larger_stacks() {
        let (mut inv, mut ids) = sample();

        let (card, index) = inv.take_unit(1, &mut ids).unwrap();
        assert_eq!(index, 0);
        assert_eq!(card.id, 3);
        assert_eq!(card.quantity, 1);
        assert_eq!(inv.count("test"), 4);
        assert_eq!(inv.len(), 2);
    }

    #[test]
    fn take_unit_removes_single_cards() {
        let (mut inv, mut ids) = sample();

        let (card, index) = inv.take_unit(2, &mut ids).unwrap();
        assert_eq!(index, 1);
        assert_eq!(card.id, 2);
        assert_eq!(inv.len(), 1);
        assert!(inv.find_by_type("tester").is_none());
    }

    #[test]
    fn take_unit_unknown_stack() {
        let (mut inv, mut ids) = sample();
        assert_eq!(
            inv.take_unit(99, &mut ids),
            Err(InventoryError::UnknownStack(99))
        );
    }

    #[test]
    fn add_unit_merges_or_appends() {
        let (mut inv, mut ids) = sample();

        assert_eq!(inv.add_unit("tester", &mut ids).unwrap(), 2);
        assert_eq!(inv.count("tester"), 2);

        let new_id = inv.add_unit("toolkit", &mut ids).unwrap();
        assert_eq!(new_id, 3);
        assert_eq!(inv.get(2).unwrap().card_type, "toolkit");
    }

    #[test]
    fn add_unit_respects_capacity_for_new_stacks_only() {
        let mut ids = IdAllocator::new();
        let mut inv = Inventory::new(Some(1));
        inv.add_unit("test", &mut ids).unwrap();

        assert_eq!(
            inv.add_unit("tester", &mut ids),
            Err(InventoryError::InventoryFull)
        );
        assert!(inv.add_unit("test", &mut ids).is_ok());
        assert_eq!(inv.count("test"), 2);
        assert!(inv.can_accept("test"));
        assert!(!inv.can_accept("tester"));
    }

    #[test]
    fn restore_unit_merges_back_into_split_stack() {
        let (mut inv, mut ids) = sample();
        let (card, _) = inv.take_unit(1, &mut ids).unwrap();

        assert_eq!(inv.restore_unit(card, 7), 0);
        assert_eq!(inv.count("test"), 5);
        assert_eq!(inv.len(), 2);
    }

    #[test]
    fn restore_unit_inserts_at_clamped_index() {
        let (mut inv, mut ids) = sample();
        let (card, _) = inv.take_unit(2, &mut ids).unwrap();

        assert_eq!(inv.restore_unit(card, 0), 0);
        assert_eq!(inv.get(0).unwrap().id, 2);

        let (card, _) = inv.take_unit(2, &mut ids).unwrap();
        assert_eq!(inv.restore_unit(card, 40), 1);
    }

    #[test]
    fn move_stack_reorders() {
        let (mut inv, mut ids) = sample();
        inv.add_unit("toolkit", &mut ids).unwrap();

        assert!(inv.move_stack(0, 2).unwrap());
        let order: Vec<_> = inv.iter().map(|s| s.card_type.as_str()).collect();
        assert_eq!(order, ["tester", "toolkit", "test"]);

        assert!(!inv.move_stack(1, 1).unwrap());
        assert!(!inv.move_stack(1, 3).unwrap());
        assert_eq!(inv.move_stack(5, 0), Err(InventoryError::InvalidIndex(5)));
    }

    #[test]
    fn take_unit_without_ids_leaves_stack() {
        let mut inv = Inventory::with_stacks(vec![CardStack::new(1, "test", 2)], None);
        let mut ids = IdAllocator::above([CardId::MAX - 1]).unwrap();

        assert!(matches!(
            inv.take_unit(1, &mut ids),
            Err(InventoryError::Ids(_))
        ));
        assert_eq!(inv.count("test"), 2);
    }

    #[test]
    fn sort_by_quantity_is_stable() {
        let mut inv = Inventory::with_stacks(
            vec![
                CardStack::new(1, "a", 1),
                CardStack::new(2, "b", 3),
                CardStack::new(3, "c", 1),
                CardStack::new(4, "d", 7),
            ],
            None,
        );
        inv.sort_by_quantity();
        let order: Vec<_> = inv.iter().map(|s| s.id).collect();
        assert_eq!(order, [4, 2, 1, 3]);
    }
}
