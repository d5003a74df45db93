//! Save data types
//!
//! Save files are pretty-printed JSON so they stay readable and easy to
//! patch by hand.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use thiserror::Error;

use crate::game::TableSnapshot;

/// Current save file version
pub const CURRENT_SAVE_VERSION: u32 = 1;

/// Number of save slots
pub const SAVE_SLOTS: u8 = 5;

/// The root save file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub timestamp: SystemTime,
    pub metadata: SaveMetadata,
    pub table: TableSnapshot,
}

impl SaveFile {
    /// Wraps a snapshot in a save file stamped with the current time
    pub fn new(table: TableSnapshot, save_type: SaveType, save_slot: u8) -> Self {
        SaveFile {
            version: CURRENT_SAVE_VERSION,
            timestamp: SystemTime::now(),
            metadata: SaveMetadata {
                game_version: env!("CARGO_PKG_VERSION").to_string(),
                save_type,
                save_slot,
            },
            table,
        }
    }
}

/// Metadata about the save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub game_version: String,
    pub save_type: SaveType,
    pub save_slot: u8,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SaveType {
    Manual,
    Auto,
}

/// Error types for save/load operations
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid save version: {0}")]
    InvalidVersion(u32),

    #[error("No save in slot {0}")]
    SlotEmpty(u8),

    #[error("Save slot {0} out of range 1-{max}", max = SAVE_SLOTS)]
    InvalidSlot(u8),
}
