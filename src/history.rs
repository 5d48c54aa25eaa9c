//! Record of finished sessions, kept in `~/.delve/history.json`.

use serde::{Deserialize, Serialize};
use std::io;

use crate::core::constants::{HISTORY_CAPACITY, HISTORY_FILE};
use crate::session::{SessionOutcome, SessionSummary};
use crate::utils::persistence::{load_json_or_default, save_json, DataDir};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunHistory {
    #[serde(default)]
    pub runs: Vec<SessionSummary>,
}

impl RunHistory {
    pub fn load() -> Self {
        load_json_or_default(HISTORY_FILE)
    }

    pub fn save(&self) -> io::Result<()> {
        save_json(HISTORY_FILE, self)
    }

    pub fn load_from(dir: &DataDir) -> Self {
        dir.load_or_default(HISTORY_FILE)
    }

    pub fn save_to(&self, dir: &DataDir) -> io::Result<()> {
        dir.save(HISTORY_FILE, self)
    }

    /// Appends a run, dropping the oldest beyond capacity.
    pub fn record(&mut self, summary: SessionSummary) {
        self.runs.push(summary);
        if self.runs.len() > HISTORY_CAPACITY {
            let excess = self.runs.len() - HISTORY_CAPACITY;
            self.runs.drain(..excess);
        }
    }

    pub fn count(&self, outcome: SessionOutcome) -> usize {
        self.runs.iter().filter(|r| r.outcome == outcome).count()
    }

    pub fn deepest_run(&self) -> Option<&SessionSummary> {
        self.runs.iter().max_by_key(|r| r.rooms_explored)
    }

    /// One line per run, newest first.
    pub fn lines(&self) -> Vec<String> {
        self.runs
            .iter()
            .rev()
            .map(|r| {
                format!(
                    "{}  {:<12} {:<10} rooms: {:>3}  health: {:>3}  won: {}  fled: {}",
                    r.finished_at.format("%Y-%m-%d %H:%M"),
                    r.player_name,
                    r.outcome,
                    r.rooms_explored,
                    r.final_health,
                    r.battles_won,
                    r.escapes
                )
            })
            .collect()
    }
}
