//! Game constants, configuration and the random source.

#![allow(unused_imports)]

pub mod config;
pub mod constants;
pub mod dice;

pub use config::*;
pub use constants::*;
pub use dice::*;
