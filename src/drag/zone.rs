use serde::{Deserialize, Serialize};

use super::grid::{GridConfig, grid_position};
use crate::combination::{CombinationArea, PlacedCard};
use crate::geometry::{Point, Rect};

/// The two places a dragged card can land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneKind {
    Inventory,
    Combination,
}

/// A screen rectangle that accepts drops
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropZone {
    pub kind: ZoneKind,
    pub bounds: Rect,
}

/// First zone whose bounds contain `point`, if any
pub fn detect_drop_zone(point: Point, zones: &[DropZone]) -> Option<&DropZone> {
    zones.iter().find(|zone| zone.bounds.contains_point(point))
}

/// Screen placement of the inventory grid and the combination area
///
/// The inventory container is sized from the grid config; only its
/// top-left corner is configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub grid: GridConfig,
    pub inventory_origin: Point,
    pub combination: Rect,

    /// Size of a card face in pixels
    pub card_size: Point,
}

impl Default for Layout {
    fn default() -> Self {
        let grid = GridConfig::default();
        let inventory = grid.container_size();
        Layout {
            grid,
            inventory_origin: Point::ZERO,
            combination: Rect::new(inventory.x + 32.0, 0.0, 400.0, inventory.y),
            card_size: Point::new(96.0, 128.0),
        }
    }
}

impl Layout {
    /// Screen bounds of the inventory container
    pub fn inventory_bounds(&self) -> Rect {
        let size = self.grid.container_size();
        Rect::new(self.inventory_origin.x, self.inventory_origin.y, size.x, size.y)
    }

    /// Drop zones in hit-test order
    pub fn zones(&self) -> [DropZone; 2] {
        [
            DropZone {
                kind: ZoneKind::Inventory,
                bounds: self.inventory_bounds(),
            },
            DropZone {
                kind: ZoneKind::Combination,
                bounds: self.combination,
            },
        ]
    }

    pub fn zone_at(&self, point: Point) -> Option<ZoneKind> {
        detect_drop_zone(point, &self.zones()).map(|zone| zone.kind)
    }

    /// Screen rectangle of the card drawn in inventory slot `index`
    pub fn inventory_card_rect(&self, index: usize) -> Rect {
        let local = grid_position(index, self.grid.cards_per_row, &self.grid);
        let origin = self.inventory_origin + local;
        Rect::new(origin.x, origin.y, self.card_size.x, self.card_size.y)
    }

    /// Index of the inventory card under `point`
    ///
    /// Only the first `stack_count` slots hold cards; gaps between slots
    /// and empty slots return None.
    pub fn inventory_index_at(&self, point: Point, stack_count: usize) -> Option<usize> {
        (0..stack_count).find(|&index| self.inventory_card_rect(index).contains_point(point))
    }

    /// Inner origin of the combination area (inside its border)
    pub fn combination_inner_origin(&self) -> Point {
        let border = self.grid.container_border;
        self.combination.origin() + Point::new(border, border)
    }

    /// Screen rectangle of a card lying in the combination area
    pub fn combination_card_rect(&self, card: &PlacedCard) -> Rect {
        let origin = self.combination_inner_origin() + card.position;
        Rect::new(origin.x, origin.y, self.card_size.x, self.card_size.y)
    }

    /// Topmost combination card under a screen point
    pub fn combination_card_at<'a>(
        &self,
        point: Point,
        area: &'a CombinationArea,
    ) -> Option<&'a PlacedCard> {
        if !self.combination.contains_point(point) {
            return None;
        }
        area.topmost_at(point - self.combination_inner_origin(), self.card_size)
    }
}
