use std::str::FromStr;

/// What the player does on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleAction {
    Attack,
    Run,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown battle action '{0}'")]
pub struct ParseActionError(pub String);

impl FromStr for BattleAction {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "attack" => Ok(BattleAction::Attack),
            "run" => Ok(BattleAction::Run),
            _ => Err(ParseActionError(s.trim().to_string())),
        }
    }
}

/// Something that happened during a single turn, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatEvent {
    /// Player's roll against the enemy.
    PlayerHit { damage: u32 },
    /// Enemy's simultaneous counter-roll.
    EnemyHit { damage: u32 },
    EscapeSucceeded,
    EscapeFailed,
    /// Enemy attack after a failed escape; the player gets no swing.
    EnemyFreeHit { damage: u32 },
    EnemyDefeated,
    PlayerDefeated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Escaped,
}

/// Result of resolving one action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnResult {
    pub events: Vec<CombatEvent>,
    /// Health the player actually lost this turn.
    pub player_health_lost: u32,
    /// Health the enemy actually lost this turn.
    pub enemy_health_lost: u32,
    /// Set when the turn ended the battle.
    pub outcome: Option<BattleOutcome>,
}

/// Summary of a finished battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleReport {
    pub enemy_name: String,
    pub outcome: BattleOutcome,
    /// Turns that consumed an action. Rejected input does not count.
    pub turns: u32,
    pub damage_dealt: u32,
    pub damage_taken: u32,
}
