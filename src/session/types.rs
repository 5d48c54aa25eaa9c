use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;

use crate::character::CharacterError;
use crate::core::constants::{EXIT_DEFEAT, EXIT_VICTORY, EXIT_WITHDRAWAL};

/// Errors that end play inside a session.
///
/// Only [`SessionError::Io`] leaves [`crate::session::Session::run`]; the
/// others are translated into an outcome at the session boundary.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Terminal(#[from] CharacterError),
    #[error("console error: {0}")]
    Io(#[from] io::Error),
    #[error("input closed")]
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    /// Reached the dungeon exit alive.
    Victory,
    Defeat,
    /// Left the dungeon by choice while alive.
    Withdrawal,
}

impl SessionOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            SessionOutcome::Victory => EXIT_VICTORY,
            SessionOutcome::Withdrawal => EXIT_WITHDRAWAL,
            SessionOutcome::Defeat => EXIT_DEFEAT,
        }
    }
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionOutcome::Victory => "victory",
            SessionOutcome::Defeat => "defeat",
            SessionOutcome::Withdrawal => "withdrawal",
        };
        f.pad(label)
    }
}

/// Everything worth remembering about a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub player_name: String,
    pub outcome: SessionOutcome,
    pub rooms_explored: u32,
    pub final_health: u32,
    #[serde(default)]
    pub battles_won: u32,
    #[serde(default)]
    pub battles_lost: u32,
    #[serde(default)]
    pub escapes: u32,
    #[serde(default)]
    pub riddles_solved: u32,
    #[serde(default)]
    pub riddles_failed: u32,
    /// Riddle rooms that went quiet because no riddle could be fetched.
    #[serde(default)]
    pub riddles_skipped: u32,
    #[serde(default)]
    pub treasures_found: u32,
    #[serde(default)]
    pub unknown_events: u32,
    pub finished_at: DateTime<Utc>,
}

impl SessionSummary {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            outcome: SessionOutcome::Withdrawal,
            rooms_explored: 0,
            final_health: 0,
            battles_won: 0,
            battles_lost: 0,
            escapes: 0,
            riddles_solved: 0,
            riddles_failed: 0,
            riddles_skipped: 0,
            treasures_found: 0,
            unknown_events: 0,
            finished_at: Utc::now(),
        }
    }
}
