//! card-stacking - A card stacking and crafting table
//!
//! Main executable: a line-driven front end over the card table

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};

use card_stacking::config::{DEFAULT_CONFIG_PATH, GameConfig};
use card_stacking::game::{CardTable, CraftOutcome, DropOutcome};
use card_stacking::input_system::{GameAction, HELP, InputSystem};
use card_stacking::save::{SaveFile, SaveManager, SaveType};
use card_stacking::view::render_table;

/// Autosaves kept per slot
const AUTOSAVES_KEPT: usize = 3;

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    info!("Starting card-stacking v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(std::env::args().skip(1));

    let mut config = GameConfig::load_or_default(&cli.config_path);
    if let Some(dir) = cli.save_dir {
        config.save_directory = Some(dir);
    }

    let mut table = CardTable::from_config(&config).context("failed to set up the card table")?;

    let save_dir = config.save_directory();
    let mut saves = SaveManager::new(&save_dir)
        .with_context(|| format!("failed to open save directory {}", save_dir.display()))?;

    if cli.continue_game {
        match saves.load_game(1) {
            Ok(save) => match table.restore(save.table) {
                Ok(()) => println!("Loaded slot 1"),
                Err(e) => println!("Slot 1 is unusable ({}), starting a new table", e),
            },
            Err(e) => println!("No save to continue ({}), starting a new table", e),
        }
    }

    println!("{}", render_table(&table));
    println!("Type 'help' for commands.");

    let input = InputSystem::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read input")?;

        let action = match input.parse_line(&line) {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        if action == GameAction::Quit {
            break;
        }

        execute(action, &mut table, &mut saves);

        // Snapshots cancel drags, so never autosave mid-drag
        if !cli.no_autosave && !table.is_dragging() && saves.should_autosave() {
            autosave(&mut table, &mut saves);
        }
    }

    if !cli.no_autosave {
        autosave(&mut table, &mut saves);
    }

    info!("Shutting down");
    Ok(())
}

/// Runs one action and prints what happened
///
/// Game errors are reported to the player, never fatal.
fn execute(action: GameAction, table: &mut CardTable, saves: &mut SaveManager) {
    match action {
        GameAction::PointerDown(point) => match table.pointer_down(point) {
            Ok(drag) => {
                let card = drag.card.clone();
                println!(
                    "Picked up {} #{}",
                    table.registry().display_name(&card.card_type),
                    card.id
                );
            }
            Err(e) => println!("{}", e),
        },
        GameAction::PointerMove(point) => {
            if !table.pointer_move(point) {
                println!("Not holding a card");
            }
        }
        GameAction::PointerUp(point) => match table.pointer_up(point) {
            Ok(outcome) => println!("{}", describe_drop(&outcome)),
            Err(e) => println!("{}", e),
        },
        GameAction::CancelDrag => match table.cancel_drag() {
            Ok(outcome) => println!("{}", describe_drop(&outcome)),
            Err(e) => println!("{}", e),
        },
        GameAction::Combine => match table.combine() {
            Ok(CraftOutcome::Crafted { message, .. }) => println!("{}", message),
            Ok(CraftOutcome::NoMatch { message }) => println!("{}", message),
            Err(e) => println!("{}", e),
        },
        GameAction::ClearCombination => match table.clear_combination() {
            Ok(returned) => println!("Returned {} card(s) to the inventory", returned),
            Err(e) => println!("{}", e),
        },
        GameAction::SortInventory => match table.sort_inventory() {
            Ok(()) => println!("Inventory sorted"),
            Err(e) => println!("{}", e),
        },
        GameAction::MoveStack { from, to } => match table.move_inventory_stack(from, to) {
            Ok(true) => println!("Moved stack {} to {}", from, to),
            Ok(false) => println!("Nothing to move"),
            Err(e) => println!("{}", e),
        },
        GameAction::Show => print!("{}", render_table(table)),
        GameAction::SaveGame(slot) => {
            let slot = slot.unwrap_or_else(|| saves.save_slot());
            let save = SaveFile::new(table.snapshot(), SaveType::Manual, slot);
            match saves.set_save_slot(slot).and_then(|_| saves.save_game(&save)) {
                Ok(path) => println!("Saved to {}", path.display()),
                Err(e) => println!("Save failed: {}", e),
            }
        }
        GameAction::LoadGame(slot) => {
            let slot = slot.unwrap_or_else(|| saves.save_slot());
            match saves.load_game(slot) {
                Ok(save) => match table.restore(save.table) {
                    Ok(()) => println!("Loaded slot {}", slot),
                    Err(e) => println!("Load failed: {}", e),
                },
                Err(e) => println!("Load failed: {}", e),
            }
        }
        GameAction::ListSaves => match saves.list_saves() {
            Ok(list) if list.is_empty() => println!("No saves"),
            Ok(list) => {
                for save in list {
                    let time: chrono::DateTime<chrono::Local> = save.timestamp.into();
                    println!(
                        "  {} ({:?}, {})",
                        save.filename,
                        save.metadata.save_type,
                        time.format("%Y-%m-%d %H:%M:%S")
                    );
                }
            }
            Err(e) => println!("Could not list saves: {}", e),
        },
        GameAction::Help => println!("{}", HELP),
        GameAction::Quit => {}
    }
}

fn describe_drop(outcome: &DropOutcome) -> String {
    match outcome {
        DropOutcome::MovedToInventory { stack_id } => {
            format!("Moved to inventory stack #{}", stack_id)
        }
        DropOutcome::ReturnedToInventory { index } => format!("Placed in inventory slot {}", index),
        DropOutcome::PlacedInCombination { card_id, position }
        | DropOutcome::MovedInCombination { card_id, position } => format!(
            "Card #{} now at ({}, {}) in the combination area",
            card_id, position.x, position.y
        ),
        DropOutcome::Restored { .. } => "Card returned to where it came from".to_string(),
    }
}

fn autosave(table: &mut CardTable, saves: &mut SaveManager) {
    let save = SaveFile::new(table.snapshot(), SaveType::Auto, saves.save_slot());
    if let Err(e) = saves.save_game(&save) {
        warn!("Autosave failed: {}", e);
        return;
    }
    if let Err(e) = saves.cleanup_autosaves(AUTOSAVES_KEPT) {
        warn!("Autosave cleanup failed: {}", e);
    }
}

#[derive(Debug)]
struct CliOptions {
    config_path: PathBuf,
    save_dir: Option<PathBuf>,
    continue_game: bool,
    no_autosave: bool,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            save_dir: None,
            continue_game: false,
            no_autosave: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config_path = PathBuf::from(path);
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--save-dir" => {
                    if let Some(path) = args.next() {
                        opts.save_dir = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--save-dir requires a directory path");
                    }
                }
                "--continue" => opts.continue_game = true,
                "--no-autosave" => opts.no_autosave = true,
                other => warn!(arg = %other, "ignoring unknown argument"),
            }
        }

        opts
    }
}
