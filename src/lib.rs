//! card_stacking - Inventory, combination area and crafting for a card
//! stacking game
//!
//! Cards live either in the inventory, aggregated into one stack per type,
//! or loose in the combination area. A single drag at a time moves one card
//! between them, and two cards in the combination area can be crafted into
//! a new one.
//!
//! # Modules
//!
//! - `item`: card definitions, the registry and stacks
//! - `inventory`: the ordered stack store
//! - `combination`: free-placement crafting area
//! - `drag`: grid math, drop zones and the drag coordinator
//! - `crafting`: recipes and matching
//! - `game`: `CardTable`, which ties the pieces together
//! - `save`: JSON save slots
//! - `config`, `input_system`, `view`: front-end support

pub mod combination;
pub mod config;
pub mod crafting;
pub mod drag;
pub mod game;
pub mod geometry;
pub mod input_system;
pub mod inventory;
pub mod item;
pub mod save;
pub mod view;
