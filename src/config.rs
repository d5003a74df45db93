//! Game configuration
//!
//! Everything tunable without recompiling lives in one JSON file
//! (`assets/config/game.json` by default). Missing fields take their
//! defaults, so a config file only needs the values it changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::drag::Layout;

pub const DEFAULT_CONFIG_PATH: &str = "assets/config/game.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A stack the inventory starts with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingStack {
    #[serde(rename = "type")]
    pub card_type: String,
    pub quantity: u32,
}

impl StartingStack {
    pub fn new(card_type: impl Into<String>, quantity: u32) -> Self {
        StartingStack {
            card_type: card_type.into(),
            quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Screen placement of the inventory grid and combination area
    pub layout: Layout,

    /// Card definitions; the built-in set is used when None
    pub cards_path: Option<PathBuf>,

    /// Recipe table; the built-in table is used when None
    pub recipes_path: Option<PathBuf>,

    pub starting_inventory: Vec<StartingStack>,

    /// Cap the number of stacks at the visible grid slots
    pub limit_inventory_to_grid: bool,

    /// Where save files go; defaults to ~/.card_stacking/saves
    pub save_directory: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            layout: Layout::default(),
            cards_path: None,
            recipes_path: None,
            starting_inventory: vec![StartingStack::new("test", 5), StartingStack::new("tester", 1)],
            limit_inventory_to_grid: true,
            save_directory: None,
        }
    }
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the config, falling back to defaults when it can't be read
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using default config", e);
                Self::default()
            }
        }
    }

    /// Maximum number of inventory stacks
    pub fn inventory_capacity(&self) -> Option<usize> {
        self.limit_inventory_to_grid
            .then(|| self.layout.grid.slot_count())
    }

    pub fn save_directory(&self) -> PathBuf {
        self.save_directory.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .map(|p| p.join(".card_stacking/saves"))
                .unwrap_or_else(|| PathBuf::from("./saves"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let json = r#"{
            "starting_inventory": [{ "type": "toolkit", "quantity": 2 }],
            "layout": { "grid": { "rows": 4 } }
        }"#;
        let config: GameConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.starting_inventory, [StartingStack::new("toolkit", 2)]);
        assert_eq!(config.layout.grid.rows, 4);
        assert_eq!(config.layout.grid.cards_per_row, 8);
        assert_eq!(config.inventory_capacity(), Some(32));
        assert_eq!(config.layout.card_size, Layout::default().card_size);
    }

    #[test]
    fn unlimited_inventory() {
        let config = GameConfig {
            limit_inventory_to_grid: false,
            ..GameConfig::default()
        };
        assert_eq!(config.inventory_capacity(), None);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameConfig::load_from_file("does/not/exist.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert_eq!(
            GameConfig::load_or_default("does/not/exist.json"),
            GameConfig::default()
        );
    }

    #[test]
    fn explicit_save_directory_wins() {
        let config = GameConfig {
            save_directory: Some(PathBuf::from("/tmp/cards")),
            ..GameConfig::default()
        };
        assert_eq!(config.save_directory(), PathBuf::from("/tmp/cards"));
    }
}
