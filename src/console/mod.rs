//! Line-based input and output used by the game loop.
//!
//! The engine only ever asks a [`Prompt`] and shows text with a [`Tone`], so
//! the terminal, tests and the headless simulator can all drive a session.

use std::io;

pub mod scripted;
pub mod terminal;

pub use scripted::ScriptedConsole;
pub use terminal::TerminalConsole;

/// A question put to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    PlayerName,
    BattleAction { enemy: String },
    RiddleAnswer { question: String },
    NextRoom,
}

impl Prompt {
    pub fn text(&self) -> String {
        match self {
            Prompt::PlayerName => "What's your name, brave adventurer? ".to_string(),
            Prompt::BattleAction { .. } => {
                "Do you want to attack or run away? (attack/run): ".to_string()
            }
            Prompt::RiddleAnswer { question } => format!("Riddle: {} (true/false): ", question),
            Prompt::NextRoom => "Do you want to move to the next room? (y/n): ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Ordinary status line.
    Plain,
    /// Bordered announcement.
    Banner,
    /// Bordered bad news.
    Danger,
}

pub trait Console {
    /// Reads one answer. `Ok(None)` means input is closed.
    fn ask(&mut self, prompt: &Prompt) -> io::Result<Option<String>>;

    fn show(&mut self, text: &str, tone: Tone);

    fn say(&mut self, text: &str) {
        self.show(text, Tone::Plain);
    }

    fn announce(&mut self, text: &str) {
        self.show(text, Tone::Banner);
    }

    fn warn(&mut self, text: &str) {
        self.show(text, Tone::Danger);
    }
}
