//! Delve - Turn-Based Dungeon Adventure Library
//!
//! This module exposes the game engine for the binaries, tests and the
//! headless simulator.

pub mod character;
pub mod combat;
pub mod console;
pub mod core;
pub mod events;
pub mod history;
pub mod riddle;
pub mod session;
pub mod utils;

pub use crate::character::{Character, CharacterError, Enemy, Player};
pub use crate::core::config::GameConfig;
pub use crate::core::dice::{Dice, RngDice};
pub use crate::session::{Session, SessionOutcome, SessionSummary};
