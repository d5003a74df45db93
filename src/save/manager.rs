//! Save manager for handling save/load operations
//!
//! This module provides the SaveManager struct which handles:
//! - Writing table snapshots to slot files
//! - Reading them back with a version check
//! - Autosave timing and cleanup of old autosaves

use super::types::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, info};

pub struct SaveManager {
    save_directory: PathBuf,
    current_save_slot: u8,
    autosave_interval: Duration,
    last_autosave: Option<SystemTime>,
}

impl SaveManager {
    /// Creates a new SaveManager with the given save directory
    ///
    /// The save directory will be created if it doesn't exist.
    pub fn new(save_directory: impl AsRef<Path>) -> Result<Self, SaveError> {
        let save_dir = save_directory.as_ref().to_path_buf();

        if !save_dir.exists() {
            fs::create_dir_all(&save_dir)?;
            debug!(path = %save_dir.display(), "created save directory");
        }

        Ok(SaveManager {
            save_directory: save_dir,
            current_save_slot: 1,
            autosave_interval: Duration::from_secs(300), // 5 minutes
            last_autosave: None,
        })
    }

    /// Sets the current save slot (1-5)
    pub fn set_save_slot(&mut self, slot: u8) -> Result<(), SaveError> {
        self.current_save_slot = check_slot(slot)?;
        Ok(())
    }

    pub fn save_slot(&self) -> u8 {
        self.current_save_slot
    }

    /// Writes a save file, returning where it went
    ///
    /// Manual saves overwrite `slot_N.json`; autosaves get a timestamped
    /// name so several can coexist.
    pub fn save_game(&mut self, save_file: &SaveFile) -> Result<PathBuf, SaveError> {
        let slot = check_slot(save_file.metadata.save_slot)?;
        let filename = self.generate_filename(save_file.metadata.save_type, slot);
        let filepath = self.save_directory.join(&filename);

        let json = serde_json::to_string_pretty(save_file)?;
        fs::write(&filepath, json)?;

        if save_file.metadata.save_type == SaveType::Auto {
            self.last_autosave = Some(SystemTime::now());
        }

        info!(path = %filepath.display(), "game saved");
        Ok(filepath)
    }

    /// Load a save file from a specific slot
    pub fn load_game(&self, slot: u8) -> Result<SaveFile, SaveError> {
        let slot = check_slot(slot)?;
        if !self.save_exists(slot) {
            return Err(SaveError::SlotEmpty(slot));
        }
        self.load_game_by_filename(&slot_filename(slot))
    }

    /// Load a save file by filename
    pub fn load_game_by_filename(&self, filename: &str) -> Result<SaveFile, SaveError> {
        let filepath = self.save_directory.join(filename);

        let json = fs::read_to_string(&filepath)?;
        let save_file: SaveFile = serde_json::from_str(&json)?;

        if save_file.version > CURRENT_SAVE_VERSION {
            return Err(SaveError::InvalidVersion(save_file.version));
        }

        info!(path = %filepath.display(), "game loaded");
        Ok(save_file)
    }

    /// Check if autosave is needed
    pub fn should_autosave(&self) -> bool {
        if let Some(last_save) = self.last_autosave {
            if let Ok(elapsed) = SystemTime::now().duration_since(last_save) {
                return elapsed >= self.autosave_interval;
            }
        }
        true // Save if we've never autosaved
    }

    /// List all readable save files, newest first
    pub fn list_saves(&self) -> Result<Vec<SaveFileInfo>, SaveError> {
        let mut saves = Vec::new();

        for entry in fs::read_dir(&self.save_directory)? {
            let path = entry?.path();

            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|f| f.to_str()) else {
                continue;
            };

            match self.load_game_by_filename(filename) {
                Ok(save_file) => saves.push(SaveFileInfo {
                    filename: filename.to_string(),
                    timestamp: save_file.timestamp,
                    metadata: save_file.metadata,
                }),
                Err(e) => debug!(filename, "skipping unreadable save: {}", e),
            }
        }

        saves.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(saves)
    }

    fn generate_filename(&self, save_type: SaveType, slot: u8) -> String {
        match save_type {
            SaveType::Manual => slot_filename(slot),
            SaveType::Auto => {
                let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
                format!("autosave_slot{}_{}.json", slot, timestamp)
            }
        }
    }

    /// Delete old autosaves, keeping only the N most recent per slot
    pub fn cleanup_autosaves(&self, keep_count: usize) -> Result<usize, SaveError> {
        let mut removed = 0;

        for slot in 1..=SAVE_SLOTS {
            let prefix = format!("autosave_slot{}_", slot);

            let mut autosaves: Vec<_> = fs::read_dir(&self.save_directory)?
                .filter_map(|entry| entry.ok())
                .filter(|entry| {
                    entry
                        .file_name()
                        .to_str()
                        .is_some_and(|s| s.starts_with(&prefix))
                })
                .collect();

            // Timestamped names sort oldest first
            autosaves.sort_by_key(|entry| std::cmp::Reverse(entry.file_name()));

            for entry in autosaves.iter().skip(keep_count) {
                fs::remove_file(entry.path())?;
                removed += 1;
            }
        }

        if removed > 0 {
            debug!(removed, "cleaned up autosaves");
        }
        Ok(removed)
    }

    /// Check if a save file exists for a given slot
    pub fn save_exists(&self, slot: u8) -> bool {
        self.save_directory.join(slot_filename(slot)).exists()
    }
}

fn slot_filename(slot: u8) -> String {
    format!("slot_{}.json", slot)
}

fn check_slot(slot: u8) -> Result<u8, SaveError> {
    if (1..=SAVE_SLOTS).contains(&slot) {
        Ok(slot)
    } else {
        Err(SaveError::InvalidSlot(slot))
    }
}

#[derive(Debug, Clone)]
pub struct SaveFileInfo {
    pub filename: String,
    pub timestamp: SystemTime,
    pub metadata: SaveMetadata,
}
