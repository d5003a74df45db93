use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::DragError;
use crate::geometry::Point;
use crate::item::CardStack;

/// Where the dragged card came from, with enough detail to put it back
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DragSource {
    /// Lifted from the inventory stack at `index`
    Inventory { index: usize },

    /// Lifted from the combination area, where it sat at `position`
    Combination { position: Point },
}

/// A card in flight under the pointer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    /// The single card being carried
    pub card: CardStack,
    pub source: DragSource,

    /// Pointer position when the drag began
    pub start: Point,

    /// Latest pointer position
    pub current: Point,

    /// Pointer position relative to the card's top-left corner
    pub offset: Point,
}

impl DragState {
    pub fn new(card: CardStack, source: DragSource, pointer: Point, offset: Point) -> Self {
        DragState {
            card,
            source,
            start: pointer,
            current: pointer,
            offset,
        }
    }

    pub fn is_from_combination(&self) -> bool {
        matches!(self.source, DragSource::Combination { .. })
    }

    /// Top-left corner of the floating preview card
    pub fn preview_origin(&self) -> Point {
        self.current - self.offset
    }
}

/// Tracks the single drag that may be in flight
///
/// Only the bookkeeping lives here; moving the card out of and back into
/// its collections is the table's job.
#[derive(Debug, Clone, Default)]
pub struct DragCoordinator {
    active: Option<DragState>,
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&DragState> {
        self.active.as_ref()
    }

    /// Fails if a drag is already in flight
    pub fn ensure_idle(&self) -> Result<(), DragError> {
        match &self.active {
            Some(drag) => Err(DragError::AlreadyDragging {
                card_id: drag.card.id,
            }),
            None => Ok(()),
        }
    }

    pub fn begin(&mut self, drag: DragState) -> Result<&DragState, DragError> {
        self.ensure_idle()?;
        debug!(card_id = drag.card.id, source = ?drag.source, "drag started");
        Ok(&*self.active.insert(drag))
    }

    /// Follows the pointer; returns false when nothing is being dragged
    pub fn update(&mut self, pointer: Point) -> bool {
        match &mut self.active {
            Some(drag) => {
                drag.current = pointer;
                true
            }
            None => false,
        }
    }

    /// Ends the drag, handing back the card to be placed
    pub fn finish(&mut self) -> Result<DragState, DragError> {
        self.active.take().ok_or(DragError::NotDragging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag() -> DragState {
        DragState::new(
            CardStack::unit(3, "test"),
            DragSource::Inventory { index: 0 },
            Point::new(50.0, 60.0),
            Point::new(10.0, 20.0),
        )
    }

    #[test]
    fn only_one_drag_at_a_time() {
        let mut coordinator = DragCoordinator::new();
        coordinator.begin(drag()).unwrap();

        assert_eq!(
            coordinator.begin(drag()).unwrap_err(),
            DragError::AlreadyDragging { card_id: 3 }
        );
        assert!(coordinator.is_dragging());
    }

    #[test]
    fn update_moves_preview() {
        let mut coordinator = DragCoordinator::new();
        assert!(!coordinator.update(Point::new(1.0, 1.0)));

        coordinator.begin(drag()).unwrap();
        assert!(coordinator.update(Point::new(100.0, 100.0)));

        let active = coordinator.active().unwrap();
        assert_eq!(active.start, Point::new(50.0, 60.0));
        assert_eq!(active.preview_origin(), Point::new(90.0, 80.0));
    }

    #[test]
    fn finish_clears_state() {
        let mut coordinator = DragCoordinator::new();
        assert_eq!(coordinator.finish(), Err(DragError::NotDragging));

        coordinator.begin(drag()).unwrap();
        let finished = coordinator.finish().unwrap();
        assert_eq!(finished.card.id, 3);
        assert!(!coordinator.is_dragging());
    }
}
