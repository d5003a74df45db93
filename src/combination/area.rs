use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::item::{CardId, CardStack};

/// A single card lying in the combination area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedCard {
    pub id: CardId,
    pub card_type: String,

    /// Top-left corner relative to the area's inner origin
    pub position: Point,
}

impl PlacedCard {
    pub fn new(id: CardId, card_type: impl Into<String>, position: Point) -> Self {
        PlacedCard {
            id,
            card_type: card_type.into(),
            position,
        }
    }

    /// This card as a single-card stack, keeping its id
    pub fn to_unit(&self) -> CardStack {
        CardStack::unit(self.id, self.card_type.clone())
    }
}

/// Free-placement workspace for crafting
///
/// Holds individual cards, never stacks. The order of `cards` is the
/// placement order, so later cards are drawn on top of earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinationArea {
    cards: Vec<PlacedCard>,
}

impl CombinationArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards(cards: Vec<PlacedCard>) -> Self {
        CombinationArea { cards }
    }

    /// Puts a card on top of the area
    pub fn place(&mut self, card: PlacedCard) {
        self.cards.push(card);
    }

    /// Lifts a card out of the area
    pub fn remove(&mut self, card_id: CardId) -> Option<PlacedCard> {
        let index = self.cards.iter().position(|card| card.id == card_id)?;
        Some(self.cards.remove(index))
    }

    pub fn get(&self, card_id: CardId) -> Option<&PlacedCard> {
        self.cards.iter().find(|card| card.id == card_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedCard> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[PlacedCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Types of every card in the area, in placement order
    pub fn card_types(&self) -> Vec<&str> {
        self.cards.iter().map(|card| card.card_type.as_str()).collect()
    }

    /// Topmost card whose face (of `card_size`) covers `point`
    ///
    /// `point` is relative to the area's inner origin.
    pub fn topmost_at(&self, point: Point, card_size: Point) -> Option<&PlacedCard> {
        self.cards.iter().rev().find(|card| {
            point.x >= card.position.x
                && point.x <= card.position.x + card_size.x
                && point.y >= card.position.y
                && point.y <= card.position.y + card_size.y
        })
    }

    /// Empties the area, returning its cards in placement order
    pub fn drain(&mut self) -> Vec<PlacedCard> {
        std::mem::take(&mut self.cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> CombinationArea {
        CombinationArea::with_cards(vec![
            PlacedCard::new(10, "test", Point::new(0.0, 0.0)),
            PlacedCard::new(11, "tester", Point::new(50.0, 20.0)),
        ])
    }

    #[test]
    fn remove_and_place() {
        let mut area = area();

        let card = area.remove(10).unwrap();
        assert_eq!(card.card_type, "test");
        assert_eq!(area.len(), 1);
        assert!(area.remove(10).is_none());

        area.place(card);
        assert_eq!(area.card_types(), ["tester", "test"]);
    }

    #[test]
    fn topmost_at_prefers_last_placed() {
        let area = area();
        let size = Point::new(96.0, 128.0);

        assert_eq!(area.topmost_at(Point::new(60.0, 30.0), size).unwrap().id, 11);
        assert_eq!(area.topmost_at(Point::new(10.0, 10.0), size).unwrap().id, 10);
        assert!(area.topmost_at(Point::new(300.0, 10.0), size).is_none());
    }

    #[test]
    fn drain_empties() {
        let mut area = area();
        let cards = area.drain();
        assert_eq!(cards.len(), 2);
        assert!(area.is_empty());
    }

    #[test]
    fn to_unit_keeps_id() {
        let unit = PlacedCard::new(4, "test", Point::ZERO).to_unit();
        assert_eq!(unit, CardStack::unit(4, "test"));
    }
}
