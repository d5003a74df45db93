//! Inventory grid arithmetic
//!
//! The inventory is drawn as a fixed grid of equally sized slots separated
//! by a gap. These helpers convert between a stack's list index and its
//! pixel position, and back from a drop point to a list index.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Dimensions of the inventory grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub slot_width: f32,
    pub slot_height: f32,
    pub slot_gap: f32,
    pub cards_per_row: usize,

    /// Visible rows; together with `cards_per_row` this bounds the slot count
    pub rows: usize,

    /// Border drawn around free-placement containers
    pub container_border: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            slot_width: 100.0,
            slot_height: 132.0,
            slot_gap: 8.0,
            cards_per_row: 8,
            rows: 3,
            container_border: 2.0,
        }
    }
}

impl GridConfig {
    /// Number of visible slots
    pub fn slot_count(&self) -> usize {
        self.cards_per_row * self.rows
    }

    /// Pixel size of a container holding `cols` × `rows` slots
    pub fn container_size_for(&self, cols: usize, rows: usize) -> Point {
        let cols = cols as f32;
        let rows = rows as f32;
        Point::new(
            2.0 * self.slot_gap + cols * self.slot_width + (cols - 1.0) * self.slot_gap,
            2.0 * self.slot_gap + rows * self.slot_height + (rows - 1.0) * self.slot_gap,
        )
    }

    /// Pixel size of the inventory container
    pub fn container_size(&self) -> Point {
        self.container_size_for(self.cards_per_row, self.rows)
    }
}

/// Top-left corner of slot `index` inside the grid container
pub fn grid_position(index: usize, cols: usize, config: &GridConfig) -> Point {
    let cols = cols.max(1);
    let row = (index / cols) as f32;
    let col = (index % cols) as f32;

    Point::new(
        config.slot_gap + col * (config.slot_width + config.slot_gap),
        config.slot_gap + row * (config.slot_height + config.slot_gap),
    )
}

/// List index for a drop at `drop` over the grid container
///
/// The column is clamped to the row width; the row only to zero, so a drop
/// below the last stack yields an index past the end of the list.
pub fn drop_index(drop: Point, container: &Rect, config: &GridConfig) -> usize {
    let relative = drop - container.origin();
    let max_col = config.cards_per_row.saturating_sub(1) as f32;

    let col = ((relative.x - config.slot_gap) / (config.slot_width + config.slot_gap))
        .round()
        .clamp(0.0, max_col) as usize;

    let row = ((relative.y - config.slot_gap) / (config.slot_height + config.slot_gap))
        .round()
        .max(0.0) as usize;

    row * config.cards_per_row + col
}

/// Where a dropped card's top-left corner lands inside a bordered container
pub fn relative_position(drop: Point, container: &Rect, offset: Point, border: f32) -> Point {
    Point::new(
        drop.x - container.left() - offset.x - border,
        drop.y - container.top() - offset.y - border,
    )
}

/// Result of fitting a grid into a container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSize {
    pub cols: usize,
    pub rows: usize,
    pub total_slots: usize,
    pub actual_width: f32,
    pub actual_height: f32,
}

/// Largest grid that fits in `width` × `height`, never smaller than 1×1
pub fn optimal_grid_size(width: f32, height: f32, config: &GridConfig) -> GridSize {
    let fit = |space: f32, slot: f32| -> usize {
        let count = ((space - config.slot_gap) / (slot + config.slot_gap)).floor();
        if count >= 1.0 { count as usize } else { 1 }
    };

    let cols = fit(width, config.slot_width);
    let rows = fit(height, config.slot_height);
    let actual = config.container_size_for(cols, rows);

    GridSize {
        cols,
        rows,
        total_slots: cols * rows,
        actual_width: actual.x,
        actual_height: actual.y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> Rect {
        let config = GridConfig::default();
        let size = config.container_size();
        Rect::new(100.0, 50.0, size.x, size.y)
    }

    #[test]
    fn default_container_size() {
        let size = GridConfig::default().container_size();
        assert_eq!(size, Point::new(872.0, 428.0));
        assert_eq!(GridConfig::default().slot_count(), 24);
    }

    #[test]
    fn grid_position_wraps_rows() {
        let config = GridConfig::default();
        assert_eq!(grid_position(0, 8, &config), Point::new(8.0, 8.0));
        assert_eq!(grid_position(3, 8, &config), Point::new(332.0, 8.0));
        assert_eq!(grid_position(9, 8, &config), Point::new(116.0, 148.0));
    }

    #[test]
    fn drop_index_rounds_to_nearest_slot() {
        let config = GridConfig::default();
        let container = container();

        // Slot 0 starts at (8, 8) inside the container.
        assert_eq!(drop_index(Point::new(108.0, 58.0), &container, &config), 0);
        // Slot 2 starts at x = 224.
        assert_eq!(drop_index(Point::new(100.0 + 230.0, 60.0), &container, &config), 2);
        // Second row starts at y = 148.
        assert_eq!(drop_index(Point::new(108.0, 50.0 + 150.0), &container, &config), 8);
    }

    #[test]
    fn drop_index_clamps_columns_but_not_rows() {
        let config = GridConfig::default();
        let container = container();

        assert_eq!(drop_index(Point::new(0.0, 0.0), &container, &config), 0);
        assert_eq!(drop_index(Point::new(5000.0, 58.0), &container, &config), 7);
        // Far below the grid: row 10.
        assert_eq!(drop_index(Point::new(108.0, 50.0 + 1408.0), &container, &config), 80);
    }

    #[test]
    fn relative_position_subtracts_offset_and_border() {
        let container = Rect::new(900.0, 10.0, 400.0, 400.0);
        let pos = relative_position(
            Point::new(1000.0, 110.0),
            &container,
            Point::new(20.0, 30.0),
            2.0,
        );
        assert_eq!(pos, Point::new(78.0, 68.0));
    }

    #[test]
    fn optimal_grid_size_fits_and_has_minimum() {
        let config = GridConfig::default();

        let size = optimal_grid_size(872.0, 428.0, &config);
        assert_eq!((size.cols, size.rows, size.total_slots), (8, 3, 24));
        assert_eq!((size.actual_width, size.actual_height), (872.0, 428.0));

        let tiny = optimal_grid_size(10.0, 10.0, &config);
        assert_eq!((tiny.cols, tiny.rows, tiny.total_slots), (1, 1, 1));
        assert_eq!(tiny.actual_width, 116.0);
    }
}
