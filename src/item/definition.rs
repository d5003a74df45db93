use serde::{Deserialize, Serialize};

/// The blueprint for a card type
///
/// This holds the static data shared by every card of one type. Think of
/// it as the "class" and CardStack / PlacedCard as the "instances".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier, used as the card type everywhere else
    pub id: String,

    /// Display name shown on the card face
    pub name: String,

    /// Icon name (resolved by whatever front-end draws the card)
    #[serde(default)]
    pub icon: String,

    /// Icon tint, any CSS-style color string
    #[serde(default)]
    pub color: String,
}

impl CardDefinition {
    /// Creates a new card definition
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        CardDefinition {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            color: color.into(),
        }
    }
}
