// Player
pub const PLAYER_BASE_HEALTH: u32 = 100;
pub const PLAYER_ATTACK_MIN: u32 = 5;
pub const PLAYER_ATTACK_MAX: u32 = 15;
pub const DEFAULT_PLAYER_NAME: &str = "Adventurer";

// Enemy attack rolls land in [strength - spread, strength], floored at 0
pub const ENEMY_ATTACK_SPREAD: u32 = 5;

// Enemy roster: (name, health, strength)
pub const ENEMY_ROSTER: [(&str, u32, u32); 4] = [
    ("Orc", 50, 15),
    ("Skeleton", 40, 12),
    ("Goblin", 30, 10),
    ("Dark Magician", 75, 20),
];

// Room rewards and penalties (inclusive ranges)
pub const TREASURE_HEAL_MIN: u32 = 10;
pub const TREASURE_HEAL_MAX: u32 = 30;
pub const RIDDLE_REWARD_MIN: u32 = 10;
pub const RIDDLE_REWARD_MAX: u32 = 30;
pub const RIDDLE_PENALTY_MIN: u32 = 10;
pub const RIDDLE_PENALTY_MAX: u32 = 20;

// Session progression
pub const DEFAULT_EXIT_AFTER_ROOMS: u32 = 10;

// Riddle provider
pub const OPEN_TRIVIA_URL: &str = "https://opentdb.com/api.php?amount=1&type=boolean";
pub const DEFAULT_RIDDLE_TIMEOUT_SECS: u64 = 5;

// Persistence
pub const DATA_DIR_NAME: &str = ".delve";
pub const CONFIG_FILE: &str = "config.json";
pub const HISTORY_FILE: &str = "history.json";
pub const HISTORY_CAPACITY: usize = 50;

// Process exit codes per session outcome
pub const EXIT_VICTORY: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_WITHDRAWAL: i32 = 2;
pub const EXIT_DEFEAT: i32 = 3;
