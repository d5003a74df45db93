//! End-to-end flows through the card table, driven the way the front end
//! drives it: pointer events in screen coordinates.

use card_stacking::config::{DEFAULT_CONFIG_PATH, GameConfig, StartingStack};
use card_stacking::drag::{DragSource, ZoneKind};
use card_stacking::game::{CardTable, CraftOutcome, DropOutcome, GameError, NO_MATCH_MESSAGE};
use card_stacking::geometry::Point;
use card_stacking::input_system::{GameAction, InputSystem};
use card_stacking::inventory::InventoryError;
use card_stacking::save::{SaveFile, SaveManager, SaveType};

fn shipped_table() -> CardTable {
    let config = GameConfig::load_from_file(DEFAULT_CONFIG_PATH).unwrap();
    CardTable::from_config(&config).unwrap()
}

/// Screen point on the face of inventory slot `index`
fn slot(table: &CardTable, index: usize) -> Point {
    table.layout().inventory_card_rect(index).origin() + Point::new(20.0, 20.0)
}

/// Screen point inside the combination area
fn combination(table: &CardTable, x: f32, y: f32) -> Point {
    table.layout().combination.origin() + Point::new(x, y)
}

/// Drags the card in inventory slot `index` into the combination area
fn drag_to_combination(table: &mut CardTable, index: usize, x: f32, y: f32) -> DropOutcome {
    let from = slot(table, index);
    let to = combination(table, x, y);
    table.pointer_down(from).unwrap();
    table.pointer_move(to);
    table.pointer_up(to).unwrap()
}

fn slot_of(table: &CardTable, card_type: &str) -> usize {
    let stack = table.inventory().find_by_type(card_type).unwrap();
    table.inventory().position_of(stack.id).unwrap()
}

#[test]
fn shipped_config_loads() {
    let table = shipped_table();

    assert_eq!(table.registry().len(), 4);
    assert_eq!(table.recipes().len(), 3);
    assert_eq!(table.inventory().capacity(), Some(24));

    let start: Vec<_> = table
        .inventory()
        .iter()
        .map(|stack| (stack.card_type.as_str(), stack.quantity))
        .collect();
    assert_eq!(start, [("test", 5), ("tester", 1)]);
}

#[test]
fn craft_chain_up_to_workbench() {
    let mut table = shipped_table();

    // test + test -> tester
    drag_to_combination(&mut table, 0, 30.0, 30.0);
    drag_to_combination(&mut table, 0, 150.0, 30.0);
    let outcome = table.combine().unwrap();
    assert_eq!(outcome.message(), "Created Tester!");
    assert_eq!(table.inventory().count("tester"), 2);

    // test + tester -> toolkit
    drag_to_combination(&mut table, 0, 30.0, 30.0);
    drag_to_combination(&mut table, 1, 150.0, 30.0);
    let outcome = table.combine().unwrap();
    assert_eq!(outcome.message(), "Created Toolkit!");

    // tester + toolkit -> workbench
    let tester = slot_of(&table, "tester");
    drag_to_combination(&mut table, tester, 30.0, 30.0);
    let toolkit = slot_of(&table, "toolkit");
    drag_to_combination(&mut table, toolkit, 150.0, 30.0);
    match table.combine().unwrap() {
        CraftOutcome::Crafted { result, consumed, .. } => {
            assert_eq!(result, "workbench");
            assert_eq!(consumed.len(), 2);
        }
        other => panic!("expected a craft, got {:?}", other),
    }

    let totals: Vec<_> = table
        .inventory()
        .iter()
        .map(|stack| (stack.card_type.as_str(), stack.quantity))
        .collect();
    assert_eq!(totals, [("test", 2), ("workbench", 1)]);
    assert_eq!(table.total_units(), 3);
}

#[test]
fn failed_combination_keeps_cards_until_cleared() {
    let mut table = shipped_table();
    table.give("workbench", 1).unwrap();

    drag_to_combination(&mut table, 0, 30.0, 30.0);
    let workbench = table.inventory().len() - 1;
    drag_to_combination(&mut table, workbench, 150.0, 30.0);

    let outcome = table.combine().unwrap();
    assert!(!outcome.is_crafted());
    assert_eq!(outcome.message(), NO_MATCH_MESSAGE);
    assert_eq!(table.combination().len(), 2);

    assert_eq!(table.clear_combination().unwrap(), 2);
    assert_eq!(table.inventory().count("test"), 5);
    assert_eq!(table.inventory().count("workbench"), 1);
}

#[test]
fn combine_with_wrong_card_count() {
    let mut table = shipped_table();
    drag_to_combination(&mut table, 0, 30.0, 30.0);
    drag_to_combination(&mut table, 0, 130.0, 30.0);
    drag_to_combination(&mut table, 0, 230.0, 30.0);

    assert!(matches!(
        table.combine(),
        Err(GameError::NeedTwoCards { found: 3 })
    ));
    assert_eq!(table.combination().len(), 3);
}

#[test]
fn dropping_in_the_gutter_restores_the_card() {
    let mut table = shipped_table();
    let gutter = Point::new(888.0, 100.0);
    assert_eq!(table.layout().zone_at(gutter), None);

    table.pointer_down(slot(&table, 1)).unwrap();
    assert_eq!(table.inventory().len(), 1);

    let outcome = table.pointer_up(gutter).unwrap();
    assert_eq!(
        outcome,
        DropOutcome::Restored {
            source: DragSource::Inventory { index: 1 }
        }
    );
    assert_eq!(table.inventory().get(1).unwrap().card_type, "tester");
}

#[test]
fn combination_card_follows_the_pointer() {
    let mut table = shipped_table();
    drag_to_combination(&mut table, 0, 60.0, 60.0);
    let card = table.combination().cards()[0].clone();

    let grab = table.layout().combination_card_rect(&card).origin() + Point::new(30.0, 40.0);
    table.pointer_down(grab).unwrap();
    assert!(table.combination().is_empty());

    let target = grab + Point::new(100.0, 50.0);
    assert_eq!(table.layout().zone_at(target), Some(ZoneKind::Combination));
    let outcome = table.pointer_up(target).unwrap();

    assert_eq!(
        outcome,
        DropOutcome::MovedInCombination {
            card_id: card.id,
            position: card.position + Point::new(100.0, 50.0),
        }
    );
}

#[test]
fn full_inventory_refuses_new_stacks() {
    let config = GameConfig {
        starting_inventory: vec![StartingStack::new("test", 3), StartingStack::new("tester", 2)],
        layout: {
            let mut layout = GameConfig::default().layout;
            layout.grid.cards_per_row = 2;
            layout.grid.rows = 1;
            layout
        },
        ..GameConfig::default()
    };
    let mut table = CardTable::from_config(&config).unwrap();
    assert_eq!(table.inventory().capacity(), Some(2));

    // Both stacks stay behind, so the toolkit has nowhere to go.
    drag_to_combination(&mut table, 0, 30.0, 30.0);
    drag_to_combination(&mut table, 1, 150.0, 30.0);
    let err = table.combine().unwrap_err();
    assert!(matches!(
        err,
        GameError::Inventory(InventoryError::InventoryFull)
    ));
    assert_eq!(table.combination().len(), 2);
    assert_eq!(table.total_units(), 5);
}

#[test]
fn save_round_trip_through_slots() {
    let dir = tempfile::tempdir().unwrap();
    let mut saves = SaveManager::new(dir.path()).unwrap();

    let mut table = shipped_table();
    drag_to_combination(&mut table, 0, 30.0, 30.0);
    table.pointer_down(slot(&table, 0)).unwrap();

    let save = SaveFile::new(table.snapshot(), SaveType::Manual, 3);
    saves.save_game(&save).unwrap();
    assert!(!table.is_dragging());

    let mut fresh = shipped_table();
    fresh.restore(saves.load_game(3).unwrap().table).unwrap();

    assert_eq!(fresh.inventory(), table.inventory());
    assert_eq!(fresh.combination(), table.combination());
    assert_eq!(fresh.total_units(), 6);
}

#[test]
fn typed_commands_drive_the_table() {
    let input = InputSystem::new();
    let mut table = shipped_table();

    let script = ["down 20 20", "move 500 200", "up 1000 100", "show"];
    for line in script {
        match input.parse_line(line).unwrap().unwrap() {
            GameAction::PointerDown(p) => {
                table.pointer_down(p).unwrap();
            }
            GameAction::PointerMove(p) => {
                assert!(table.pointer_move(p));
            }
            GameAction::PointerUp(p) => {
                table.pointer_up(p).unwrap();
            }
            GameAction::Show => {}
            other => panic!("unexpected action {:?}", other),
        }
    }

    assert_eq!(table.combination().len(), 1);
    assert_eq!(table.inventory().count("test"), 4);
}
