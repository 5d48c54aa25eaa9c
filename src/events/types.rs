use std::fmt;
use std::str::FromStr;

use crate::combat::BattleReport;

/// What a room holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomEvent {
    Battle,
    Riddle,
    Treasure,
    Nothing,
}

impl RoomEvent {
    pub const ALL: [RoomEvent; 4] = [
        RoomEvent::Battle,
        RoomEvent::Riddle,
        RoomEvent::Treasure,
        RoomEvent::Nothing,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            RoomEvent::Battle => "battle",
            RoomEvent::Riddle => "riddle",
            RoomEvent::Treasure => "treasure",
            RoomEvent::Nothing => "nothing",
        }
    }
}

impl fmt::Display for RoomEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event '{0}'")]
pub struct UnknownEvent(pub String);

impl FromStr for RoomEvent {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        RoomEvent::ALL
            .into_iter()
            .find(|event| event.tag() == tag)
            .ok_or_else(|| UnknownEvent(s.trim().to_string()))
    }
}

/// How a room played out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomOutcome {
    Battle(BattleReport),
    RiddleSolved { healed: u32 },
    RiddleFailed { damage: u32 },
    /// The provider could not supply a riddle; the room stays quiet.
    RiddleSkipped,
    Treasure { healed: u32 },
    Nothing,
    /// An event tag nobody handles. Nothing changes.
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for event in RoomEvent::ALL {
            assert_eq!(event.tag().parse::<RoomEvent>(), Ok(event));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(" Treasure ".parse(), Ok(RoomEvent::Treasure));
        assert_eq!("BATTLE".parse(), Ok(RoomEvent::Battle));
    }

    #[test]
    fn test_parse_unknown_tag() {
        assert_eq!(
            "dragon".parse::<RoomEvent>(),
            Err(UnknownEvent("dragon".to_string()))
        );
    }
}
