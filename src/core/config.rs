//! Game settings.
//!
//! Defaults are overlaid by `~/.delve/config.json` and then by command-line
//! flags. Every field carries `#[serde(default)]` so older or partial config
//! files keep loading.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::constants::{
    CONFIG_FILE, DEFAULT_EXIT_AFTER_ROOMS, DEFAULT_RIDDLE_TIMEOUT_SECS, PLAYER_BASE_HEALTH,
};
use crate::utils::persistence::load_json_or_default;

fn default_player_health() -> u32 {
    PLAYER_BASE_HEALTH
}

fn default_exit_after_rooms() -> Option<u32> {
    Some(DEFAULT_EXIT_AFTER_ROOMS)
}

fn default_riddle_timeout_secs() -> u64 {
    DEFAULT_RIDDLE_TIMEOUT_SECS
}

fn default_color() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_player_health")]
    pub player_health: u32,
    /// Rooms to survive before the exit is found. `None` plays until death or
    /// withdrawal.
    #[serde(default = "default_exit_after_rooms")]
    pub exit_after_rooms: Option<u32>,
    #[serde(default = "default_riddle_timeout_secs")]
    pub riddle_timeout_secs: u64,
    /// Use the built-in riddle bank instead of the trivia web service.
    #[serde(default)]
    pub offline: bool,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_color")]
    pub color: bool,
    /// Event tags played in order before random rooms begin.
    #[serde(default)]
    pub scripted_events: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_health: default_player_health(),
            exit_after_rooms: default_exit_after_rooms(),
            riddle_timeout_secs: default_riddle_timeout_secs(),
            offline: false,
            seed: None,
            color: default_color(),
            scripted_events: Vec::new(),
        }
    }
}

impl GameConfig {
    /// Loads `~/.delve/config.json`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load() -> Self {
        load_json_or_default(CONFIG_FILE)
    }

    pub fn riddle_timeout(&self) -> Duration {
        Duration::from_secs(self.riddle_timeout_secs)
    }

    /// Applies command-line flags on top of the loaded settings.
    ///
    /// Unknown flags and missing or malformed values are reported as errors.
    pub fn apply_args<S: AsRef<str>>(&mut self, args: &[S]) -> Result<(), String> {
        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_ref();
            match flag {
                "--seed" => self.seed = Some(parse_value(args, &mut i, flag)?),
                "--rooms" => match parse_value(args, &mut i, flag)? {
                    0 => return Err("--rooms must be at least 1".to_string()),
                    rooms => self.exit_after_rooms = Some(rooms),
                },
                "--health" => self.player_health = parse_value(args, &mut i, flag)?,
                "--timeout" => self.riddle_timeout_secs = parse_value(args, &mut i, flag)?,
                "--endless" => self.exit_after_rooms = None,
                "--offline" => self.offline = true,
                "--no-color" => self.color = false,
                other => return Err(format!("Unknown argument: {}", other)),
            }
            i += 1;
        }
        Ok(())
    }
}

fn parse_value<S: AsRef<str>, T: std::str::FromStr>(
    args: &[S],
    i: &mut usize,
    flag: &str,
) -> Result<T, String> {
    *i += 1;
    let raw = args
        .get(*i)
        .map(|s| s.as_ref())
        .ok_or_else(|| format!("{} requires a value", flag))?;
    raw.parse()
        .map_err(|_| format!("{} requires a number, got '{}'", flag, raw))
}
