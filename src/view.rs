//! Text rendering of the card table
//!
//! Draws the inventory grid row by row, the combination area as a list of
//! placed cards, and the card held by the pointer.

use std::fmt::Write;

use crate::game::CardTable;

/// Renders the whole table as text
pub fn render_table(table: &CardTable) -> String {
    let mut out = String::new();
    render_inventory(table, &mut out);
    render_combination(table, &mut out);
    render_held_card(table, &mut out);
    out
}

fn render_inventory(table: &CardTable, out: &mut String) {
    let inventory = table.inventory();
    let grid = &table.layout().grid;

    let capacity = match inventory.capacity() {
        Some(cap) => cap.to_string(),
        None => "unlimited".to_string(),
    };
    let _ = writeln!(
        out,
        "Inventory ({} stacks, {} cards, capacity {})",
        inventory.len(),
        inventory.total_units(),
        capacity
    );

    if inventory.is_empty() {
        let _ = writeln!(out, "  (empty)");
        return;
    }

    let cols = grid.cards_per_row.max(1);
    for (row, chunk) in inventory.stacks().chunks(cols).enumerate() {
        let cells: Vec<String> = chunk
            .iter()
            .enumerate()
            .map(|(col, stack)| {
                let name = table.registry().display_name(&stack.card_type);
                format!("[{}] {} x{} #{}", row * cols + col, name, stack.quantity, stack.id)
            })
            .collect();
        let _ = writeln!(out, "  {}", cells.join("  "));
    }
}

fn render_combination(table: &CardTable, out: &mut String) {
    let area = table.combination();
    let _ = writeln!(out, "Combination area ({} cards)", area.len());

    for card in area.iter() {
        let rect = table.layout().combination_card_rect(card);
        let _ = writeln!(
            out,
            "  {} #{} at ({}, {}) screen ({}, {})",
            table.registry().display_name(&card.card_type),
            card.id,
            card.position.x,
            card.position.y,
            rect.x,
            rect.y
        );
    }
}

fn render_held_card(table: &CardTable, out: &mut String) {
    if let Some(drag) = table.drag() {
        let preview = drag.preview_origin();
        let _ = writeln!(
            out,
            "Holding {} #{} at ({}, {})",
            table.registry().display_name(&drag.card.card_type),
            drag.card.id,
            preview.x,
            preview.y
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crafting::RecipeBook;
    use crate::drag::Layout;
    use crate::geometry::Point;
    use crate::item::CardRegistry;

    #[test]
    fn renders_inventory_and_held_card() {
        let mut table = CardTable::new(
            CardRegistry::create_default(),
            RecipeBook::create_default(),
            Layout::default(),
            Some(24),
        );
        table.give("test", 5).unwrap();
        table.give("tester", 1).unwrap();

        let text = render_table(&table);
        assert!(text.contains("Inventory (2 stacks, 6 cards, capacity 24)"));
        assert!(text.contains("[0] Test x5 #1  [1] Tester x1 #2"));
        assert!(text.contains("Combination area (0 cards)"));
        assert!(!text.contains("Holding"));

        table.pointer_down(Point::new(20.0, 20.0)).unwrap();
        let text = render_table(&table);
        assert!(text.contains("Test x4"));
        assert!(text.contains("Holding Test #3 at (8, 8)"));
    }
}
