//! The card table: inventory, combination area and the drag between them
//!
//! `CardTable` owns every card in the game and is the only place cards move
//! between collections. A drag lifts exactly one card out of its source on
//! pointer-down and puts it into exactly one destination on pointer-up, so
//! the number of cards on the table only changes when a recipe is crafted.

use tracing::{debug, info, warn};

use std::collections::HashSet;

use super::error::{GameError, SnapshotError};
use super::types::{CraftOutcome, DropOutcome, NO_MATCH_MESSAGE, TableSnapshot};
use crate::combination::{CombinationArea, PlacedCard};
use crate::config::GameConfig;
use crate::crafting::RecipeBook;
use crate::drag::{
    DragCoordinator, DragError, DragSource, DragState, Layout, ZoneKind, drop_index,
    relative_position,
};
use crate::geometry::Point;
use crate::inventory::{Inventory, InventoryError};
use crate::item::{CardId, CardRegistry, IdAllocator};

pub struct CardTable {
    registry: CardRegistry,
    recipes: RecipeBook,
    layout: Layout,
    inventory: Inventory,
    combination: CombinationArea,
    drag: DragCoordinator,
    ids: IdAllocator,
}

impl CardTable {
    /// Creates a table with an empty inventory and combination area
    pub fn new(
        registry: CardRegistry,
        recipes: RecipeBook,
        layout: Layout,
        inventory_capacity: Option<usize>,
    ) -> Self {
        CardTable {
            registry,
            recipes,
            layout,
            inventory: Inventory::new(inventory_capacity),
            combination: CombinationArea::new(),
            drag: DragCoordinator::new(),
            ids: IdAllocator::new(),
        }
    }

    /// Builds a table from config: loads card data and recipes, then fills
    /// the starting inventory
    pub fn from_config(config: &GameConfig) -> Result<Self, GameError> {
        let registry = match &config.cards_path {
            Some(path) => CardRegistry::load_from_file(path)?,
            None => CardRegistry::create_default(),
        };
        let recipes = match &config.recipes_path {
            Some(path) => RecipeBook::load_from_file(path)?,
            None => RecipeBook::create_default(),
        };
        recipes.validate(&registry)?;

        let mut table = Self::new(
            registry,
            recipes,
            config.layout.clone(),
            config.inventory_capacity(),
        );

        for stack in &config.starting_inventory {
            if stack.quantity == 0 {
                continue;
            }
            if !table.registry.exists(&stack.card_type) {
                warn!(card_type = %stack.card_type, "starting inventory names an unknown card");
            }
            table.give(&stack.card_type, stack.quantity)?;
        }

        Ok(table)
    }

    // ======================================================================
    // Accessors
    // ======================================================================

    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    pub fn recipes(&self) -> &RecipeBook {
        &self.recipes
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn combination(&self) -> &CombinationArea {
        &self.combination
    }

    /// The card currently under the pointer, if any
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.active()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Every card on the table, counting the one in flight
    pub fn total_units(&self) -> u32 {
        let in_flight = self.drag.active().map_or(0, |drag| drag.card.quantity);
        self.inventory.total_units() + self.combination.len() as u32 + in_flight
    }

    /// Adds cards straight into the inventory
    pub fn give(&mut self, card_type: &str, quantity: u32) -> Result<CardId, GameError> {
        self.drag.ensure_idle()?;
        Ok(self.inventory.add_cards(card_type, quantity, &mut self.ids)?)
    }

    // ======================================================================
    // Dragging
    // ======================================================================

    /// Lifts one card off an inventory stack
    ///
    /// `offset` is the pointer position relative to the card's top-left
    /// corner, kept so the card lands where it is drawn.
    pub fn begin_drag_from_inventory(
        &mut self,
        stack_id: CardId,
        pointer: Point,
        offset: Point,
    ) -> Result<&DragState, GameError> {
        self.drag.ensure_idle()?;

        let (card, index) = self.inventory.take_unit(stack_id, &mut self.ids)?;
        let drag = DragState::new(card, DragSource::Inventory { index }, pointer, offset);
        Ok(self.drag.begin(drag)?)
    }

    /// Lifts a card out of the combination area
    pub fn begin_drag_from_combination(
        &mut self,
        card_id: CardId,
        pointer: Point,
        offset: Point,
    ) -> Result<&DragState, GameError> {
        self.drag.ensure_idle()?;

        let placed = self
            .combination
            .remove(card_id)
            .ok_or(GameError::UnknownCard(card_id))?;
        let source = DragSource::Combination {
            position: placed.position,
        };
        let drag = DragState::new(placed.to_unit(), source, pointer, offset);
        Ok(self.drag.begin(drag)?)
    }

    /// Starts a drag from whatever card is under the pointer
    ///
    /// Combination cards are checked first since that area is drawn as a
    /// free-form layer; within it the most recently placed card wins.
    pub fn pointer_down(&mut self, pointer: Point) -> Result<&DragState, GameError> {
        self.drag.ensure_idle()?;

        if let Some(card) = self.layout.combination_card_at(pointer, &self.combination) {
            let card_id = card.id;
            let offset = pointer - self.layout.combination_card_rect(card).origin();
            return self.begin_drag_from_combination(card_id, pointer, offset);
        }

        if let Some(index) = self
            .layout
            .inventory_index_at(pointer, self.inventory.len())
        {
            let stack_id = self.inventory.stacks()[index].id;
            let offset = pointer - self.layout.inventory_card_rect(index).origin();
            return self.begin_drag_from_inventory(stack_id, pointer, offset);
        }

        Err(DragError::NothingToGrab {
            x: pointer.x,
            y: pointer.y,
        }
        .into())
    }

    /// Follows the pointer; returns false when nothing is being dragged
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        self.drag.update(pointer)
    }

    /// Drops the dragged card at `pointer`
    pub fn pointer_up(&mut self, pointer: Point) -> Result<DropOutcome, GameError> {
        self.drag.update(pointer);
        let drag = self.drag.finish()?;

        let outcome = match self.layout.zone_at(pointer) {
            Some(ZoneKind::Inventory) => self.drop_on_inventory(drag, pointer),
            Some(ZoneKind::Combination) => self.drop_on_combination(drag, pointer),
            None => {
                debug!(card_id = drag.card.id, "dropped outside every zone");
                self.restore_source(drag)
            }
        };

        debug!(?outcome, "drag finished");
        Ok(outcome)
    }

    /// Abandons the drag and puts the card back where it came from
    pub fn cancel_drag(&mut self) -> Result<DropOutcome, GameError> {
        let drag = self.drag.finish()?;
        Ok(self.restore_source(drag))
    }

    fn drop_on_inventory(&mut self, drag: DragState, pointer: Point) -> DropOutcome {
        if drag.is_from_combination() {
            return match self.inventory.add_unit(&drag.card.card_type, &mut self.ids) {
                Ok(stack_id) => DropOutcome::MovedToInventory { stack_id },
                Err(e) => {
                    warn!(card_id = drag.card.id, "inventory refused card: {}", e);
                    self.restore_source(drag)
                }
            };
        }

        let target = drop_index(pointer, &self.layout.inventory_bounds(), &self.layout.grid);
        let index = self.inventory.restore_unit(drag.card, target);
        DropOutcome::ReturnedToInventory { index }
    }

    fn drop_on_combination(&mut self, drag: DragState, pointer: Point) -> DropOutcome {
        let position = relative_position(
            pointer,
            &self.layout.combination,
            drag.offset,
            self.layout.grid.container_border,
        );

        if drag.is_from_combination() {
            let card_id = drag.card.id;
            self.combination
                .place(PlacedCard::new(card_id, drag.card.card_type, position));
            DropOutcome::MovedInCombination { card_id, position }
        } else {
            let card_id = match self.ids.next_id() {
                Ok(id) => id,
                Err(e) => {
                    warn!(card_id = drag.card.id, "combination refused card: {}", e);
                    return self.restore_source(drag);
                }
            };
            self.combination
                .place(PlacedCard::new(card_id, drag.card.card_type, position));
            DropOutcome::PlacedInCombination { card_id, position }
        }
    }

    fn restore_source(&mut self, drag: DragState) -> DropOutcome {
        match drag.source {
            DragSource::Inventory { index } => {
                self.inventory.restore_unit(drag.card, index);
            }
            DragSource::Combination { position } => {
                self.combination
                    .place(PlacedCard::new(drag.card.id, drag.card.card_type, position));
            }
        }
        DropOutcome::Restored {
            source: drag.source,
        }
    }

    // ======================================================================
    // Inventory housekeeping
    //
    // None of these run while a card is in flight.
    // ======================================================================

    /// Moves an inventory stack to another slot
    pub fn move_inventory_stack(&mut self, from: usize, to: usize) -> Result<bool, GameError> {
        self.drag.ensure_idle()?;
        Ok(self.inventory.move_stack(from, to)?)
    }

    /// Sorts the inventory by quantity, highest first
    pub fn sort_inventory(&mut self) -> Result<(), GameError> {
        self.drag.ensure_idle()?;
        self.inventory.sort_by_quantity();
        Ok(())
    }

    /// Sends every combination card back to the inventory
    ///
    /// Cards the inventory can't take stay in the area. Returns how many
    /// cards went back.
    pub fn clear_combination(&mut self) -> Result<usize, GameError> {
        self.drag.ensure_idle()?;

        let mut returned = 0;
        for card in self.combination.drain() {
            match self.inventory.add_unit(&card.card_type, &mut self.ids) {
                Ok(_) => returned += 1,
                Err(e) => {
                    warn!(card_id = card.id, "card stays in combination area: {}", e);
                    self.combination.place(card);
                }
            }
        }
        Ok(returned)
    }

    // ======================================================================
    // Crafting
    // ======================================================================

    /// Tries to craft the two cards lying in the combination area
    ///
    /// On a match both cards are consumed and one result card is added to
    /// the inventory. Without a match nothing changes.
    pub fn combine(&mut self) -> Result<CraftOutcome, GameError> {
        self.drag.ensure_idle()?;

        let found = self.combination.len();
        if found != 2 {
            return Err(GameError::NeedTwoCards { found });
        }

        let types = self.combination.card_types();
        let Some(result) = self
            .recipes
            .find_match(&types)
            .map(|recipe| recipe.result.clone())
        else {
            info!(?types, "no recipe matches");
            return Ok(CraftOutcome::NoMatch {
                message: NO_MATCH_MESSAGE.to_string(),
            });
        };

        if !self.inventory.can_accept(&result) {
            return Err(InventoryError::InventoryFull.into());
        }

        let consumed: Vec<CardId> = self.combination.drain().iter().map(|card| card.id).collect();
        let stack_id = self.inventory.add_unit(&result, &mut self.ids)?;
        let message = format!("Created {}!", self.registry.display_name(&result));

        info!(%result, ?consumed, stack_id, "crafted card");
        Ok(CraftOutcome::Crafted {
            result,
            stack_id,
            consumed,
            message,
        })
    }

    // ======================================================================
    // Snapshots
    // ======================================================================

    /// Copies the table state, cancelling any drag first
    pub fn snapshot(&mut self) -> TableSnapshot {
        if let Ok(outcome) = self.cancel_drag() {
            debug!(?outcome, "drag cancelled for snapshot");
        }

        TableSnapshot {
            inventory: self.inventory.stacks().to_vec(),
            combination: self.combination.cards().to_vec(),
            next_id: self.ids.peek(),
        }
    }

    /// Replaces the table state with a snapshot
    ///
    /// The snapshot is checked in full before anything changes: one stack
    /// per card type, ids unique across both collections, no more stacks
    /// than the inventory holds, and room left for fresh ids. Empty stacks
    /// are dropped. Any drag in flight is discarded with the old state.
    pub fn restore(&mut self, snapshot: TableSnapshot) -> Result<(), GameError> {
        let stacks: Vec<_> = snapshot
            .inventory
            .into_iter()
            .filter(|stack| {
                if stack.is_empty() {
                    warn!(stack_id = stack.id, "skipping empty stack in snapshot");
                }
                !stack.is_empty()
            })
            .collect();

        if let Some(capacity) = self.inventory.capacity() {
            if stacks.len() > capacity {
                return Err(SnapshotError::OverCapacity {
                    stacks: stacks.len(),
                    capacity,
                }
                .into());
            }
        }

        let mut types = HashSet::new();
        for stack in &stacks {
            if !types.insert(stack.card_type.as_str()) {
                return Err(SnapshotError::DuplicateStack(stack.card_type.clone()).into());
            }
        }

        let mut seen = HashSet::new();
        let ids = stacks
            .iter()
            .map(|stack| stack.id)
            .chain(snapshot.combination.iter().map(|card| card.id));
        for id in ids {
            if !seen.insert(id) {
                return Err(SnapshotError::DuplicateId(id).into());
            }
        }

        let mut ids = IdAllocator::above(seen.iter().copied())
            .map_err(|_| SnapshotError::IdOutOfRange(CardId::MAX))?;
        if snapshot.next_id == CardId::MAX {
            return Err(SnapshotError::IdOutOfRange(snapshot.next_id).into());
        }
        ids.observe(snapshot.next_id.saturating_sub(1))?;

        self.drag = DragCoordinator::new();
        self.inventory = Inventory::with_stacks(stacks, self.inventory.capacity());
        self.combination = CombinationArea::with_cards(snapshot.combination);
        self.ids = ids;

        info!(
            stacks = self.inventory.len(),
            combination = self.combination.len(),
            "table restored"
        );
        Ok(())
    }
}
