//! Turn-based battles between the player and one enemy.

#![allow(unused_imports)]

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
