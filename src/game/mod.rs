// Game module - The card table and everything it reports back
//
// This module contains:
// - table.rs: CardTable, which owns every card and moves them between areas
// - types.rs: Drop and craft outcomes, table snapshots
// - error.rs: GameError, wrapping the per-module errors, and SnapshotError

pub mod error;
pub mod table;
pub mod types;

pub use error::{GameError, SnapshotError};
pub use table::CardTable;
pub use types::{CraftOutcome, DropOutcome, NO_MATCH_MESSAGE, TableSnapshot};
