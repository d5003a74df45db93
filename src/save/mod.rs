//! Save/Load system
//!
//! Table snapshots are written as JSON to one of five slots, plus
//! timestamped autosaves.
//!
//! # Architecture
//!
//! - `types`: Save data structures and error types
//! - `manager`: SaveManager for file operations
//!
//! # Example Usage
//!
//! ```ignore
//! let mut save_manager = SaveManager::new(config.save_directory())?;
//!
//! let save = SaveFile::new(table.snapshot(), SaveType::Manual, 1);
//! save_manager.save_game(&save)?;
//!
//! let loaded = save_manager.load_game(1)?;
//! table.restore(loaded.table)?;
//! ```

pub mod manager;
pub mod types;

pub use manager::{SaveFileInfo, SaveManager};
pub use types::*;
