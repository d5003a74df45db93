use thiserror::Error;

use crate::geometry::Point;

/// Actions the player can perform at the card table
///
/// This enum represents all possible high-level actions that can be
/// triggered by input. It decouples input parsing from action execution.
#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    // === Pointer ===
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    CancelDrag,

    // === Table ===
    Combine,
    ClearCombination,
    SortInventory,
    MoveStack { from: usize, to: usize },
    Show,

    // === Saves ===
    SaveGame(Option<u8>),
    LoadGame(Option<u8>),
    ListSaves,

    // === System ===
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{value}' is not a valid {kind}")]
    InvalidNumber { value: String, kind: &'static str },

    #[error("'{command}' takes no more arguments, got '{extra}'")]
    TrailingInput { command: &'static str, extra: String },
}

/// Usage text for the `help` command
pub const HELP: &str = "\
Commands:
  down X Y        press the pointer at (X, Y), picking up the card there
  move X Y        drag the held card to (X, Y)
  up X Y          release the held card at (X, Y)
  cancel          put the held card back where it came from
  combine         craft the two cards in the combination area
  clear           return every combination card to the inventory
  sort            sort inventory stacks by quantity
  reorder FROM TO move the inventory stack at FROM to slot TO
  show            print the table
  save [SLOT]     save to a slot (1-5)
  load [SLOT]     load from a slot (1-5)
  saves           list save files
  help            show this text
  quit            leave the game";

/// InputSystem turns text commands into GameActions
///
/// Input processing happens in phases:
/// 1. Split the line into a command word and arguments
/// 2. Parse the arguments the command expects
/// 3. Reject anything left over
/// 4. Return the action to the game loop for execution
#[derive(Debug, Default)]
pub struct InputSystem;

impl InputSystem {
    pub fn new() -> Self {
        InputSystem
    }

    /// Parses one line of input
    ///
    /// Blank lines yield `Ok(None)`. Command words are case-insensitive.
    pub fn parse_line(&self, line: &str) -> Result<Option<GameAction>, InputError> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(None);
        };

        let action = match command.to_ascii_lowercase().as_str() {
            "down" => GameAction::PointerDown(parse_point("down", &mut words)?),
            "move" => GameAction::PointerMove(parse_point("move", &mut words)?),
            "up" => GameAction::PointerUp(parse_point("up", &mut words)?),
            "cancel" => GameAction::CancelDrag,
            "combine" => GameAction::Combine,
            "clear" => GameAction::ClearCombination,
            "sort" => GameAction::SortInventory,
            "reorder" => {
                let from = parse_required("reorder", "FROM TO", "slot index", &mut words)?;
                let to = parse_required("reorder", "FROM TO", "slot index", &mut words)?;
                GameAction::MoveStack { from, to }
            }
            "show" => GameAction::Show,
            "save" => GameAction::SaveGame(parse_optional("save slot", &mut words)?),
            "load" => GameAction::LoadGame(parse_optional("save slot", &mut words)?),
            "saves" => GameAction::ListSaves,
            "help" | "?" => GameAction::Help,
            "quit" | "exit" => GameAction::Quit,
            _ => return Err(InputError::UnknownCommand(command.to_string())),
        };

        if let Some(extra) = words.next() {
            return Err(InputError::TrailingInput {
                command: command_name(&action),
                extra: extra.to_string(),
            });
        }

        Ok(Some(action))
    }
}

fn command_name(action: &GameAction) -> &'static str {
    match action {
        GameAction::PointerDown(_) => "down",
        GameAction::PointerMove(_) => "move",
        GameAction::PointerUp(_) => "up",
        GameAction::CancelDrag => "cancel",
        GameAction::Combine => "combine",
        GameAction::ClearCombination => "clear",
        GameAction::SortInventory => "sort",
        GameAction::MoveStack { .. } => "reorder",
        GameAction::Show => "show",
        GameAction::SaveGame(_) => "save",
        GameAction::LoadGame(_) => "load",
        GameAction::ListSaves => "saves",
        GameAction::Help => "help",
        GameAction::Quit => "quit",
    }
}

fn parse_point<'a>(
    command: &'static str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<Point, InputError> {
    let x = parse_required(command, "X Y", "coordinate", words)?;
    let y = parse_required(command, "X Y", "coordinate", words)?;
    Ok(Point::new(x, y))
}

fn parse_required<'a, T: std::str::FromStr>(
    command: &'static str,
    expected: &'static str,
    kind: &'static str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<T, InputError> {
    let word = words
        .next()
        .ok_or(InputError::MissingArgument { command, expected })?;
    parse_number(word, kind)
}

fn parse_optional<'a, T: std::str::FromStr>(
    kind: &'static str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<Option<T>, InputError> {
    words.next().map(|word| parse_number(word, kind)).transpose()
}

fn parse_number<T: std::str::FromStr>(word: &str, kind: &'static str) -> Result<T, InputError> {
    word.parse().map_err(|_| InputError::InvalidNumber {
        value: word.to_string(),
        kind,
    })
}
