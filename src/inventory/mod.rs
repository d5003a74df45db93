// Inventory module
//
// The ordered stack list shown in the inventory grid, and its errors.

pub mod error;
pub mod inventory;

// Re-export main types
pub use error::InventoryError;
pub use inventory::Inventory;
