//! Riddle providers: the trivia web service and an offline bank.

#![allow(unused_imports)]

pub mod bank;
pub mod open_trivia;
pub mod types;

pub use bank::{answer_key, RiddleBank};
pub use open_trivia::OpenTriviaProvider;
pub use types::*;
