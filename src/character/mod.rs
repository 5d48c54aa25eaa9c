//! Player and enemy characters.

#![allow(unused_imports)]

pub mod types;

pub use types::*;
