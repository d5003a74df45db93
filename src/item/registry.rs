use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use super::definition::CardDefinition;

/// Errors raised while building the card registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("card '{0}' already registered")]
    Duplicate(String),

    #[error("failed to read card data: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse card data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Central registry of all card definitions
///
/// This is the single source of truth for what card types exist. Stacks,
/// placed cards and recipes only carry the type id and look the rest up here.
#[derive(Debug, Clone)]
pub struct CardRegistry {
    cards: HashMap<String, CardDefinition>,
}

impl CardRegistry {
    /// Creates a new empty registry
    pub fn new() -> Self {
        CardRegistry {
            cards: HashMap::new(),
        }
    }

    /// Creates a registry with the built-in card set
    pub fn create_default() -> Self {
        let mut registry = Self::new();
        registry.register_base_cards();
        registry
    }

    /// Loads a registry from a JSON array of card definitions
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let registry = Self::from_json(&content)?;
        info!(
            path = %path.as_ref().display(),
            cards = registry.len(),
            "loaded card definitions"
        );
        Ok(registry)
    }

    /// Parses a registry from a JSON array of card definitions
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let definitions: Vec<CardDefinition> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(definition)?;
        }
        Ok(registry)
    }

    /// Registers a new card definition
    ///
    /// Returns an error if a card with this id already exists.
    pub fn register(&mut self, card: CardDefinition) -> Result<(), RegistryError> {
        if self.cards.contains_key(&card.id) {
            return Err(RegistryError::Duplicate(card.id));
        }

        self.cards.insert(card.id.clone(), card);
        Ok(())
    }

    /// Gets a card definition by type id
    pub fn get(&self, id: &str) -> Option<&CardDefinition> {
        self.cards.get(id)
    }

    /// Returns true if a card with this type id exists
    pub fn exists(&self, id: &str) -> bool {
        self.cards.contains_key(id)
    }

    /// Name to show for a card type, falling back to the raw id
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|def| def.name.as_str()).unwrap_or(id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    // ======================================================================
    // Built-in cards
    // ======================================================================

    fn register_base_cards(&mut self) {
        let base = [
            CardDefinition::new("test", "Test", "Wrench", "#2563eb"),
            CardDefinition::new("tester", "Tester", "Hammer", "#dc2626"),
            CardDefinition::new("toolkit", "Toolkit", "Wrench", "#16a34a"),
            CardDefinition::new("workbench", "Workbench", "Hammer", "#92400e"),
        ];

        // Base ids are distinct.
        for card in base {
            self.cards.insert(card.id.clone(), card);
        }
    }
}

impl Default for CardRegistry {
    fn default() -> Self {
        Self::create_default()
    }
}
