// Drag and drop module
//
// This module covers everything between pointer-down and pointer-up:
// - Grid arithmetic for the inventory layout
// - Drop zones and screen layout with hit testing
// - The single in-flight drag and its origin

pub mod error;
pub mod grid;
pub mod state;
pub mod zone;

pub use error::DragError;
pub use grid::{GridConfig, GridSize, drop_index, grid_position, optimal_grid_size, relative_position};
pub use state::{DragCoordinator, DragSource, DragState};
pub use zone::{DropZone, Layout, ZoneKind, detect_drop_zone};
