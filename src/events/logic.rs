use super::types::*;
use crate::character::{Character, Enemy, Player};
use crate::combat::run_battle;
use crate::console::{Console, Prompt};
use crate::core::constants::*;
use crate::core::dice::Dice;
use crate::riddle::RiddleProvider;
use crate::session::SessionError;

/// Draws the next room's event, uniformly and independently of earlier rooms.
pub fn generate_event(dice: &mut dyn Dice) -> RoomEvent {
    RoomEvent::ALL[dice.pick(RoomEvent::ALL.len())]
}

/// Draws a fresh enemy from the roster.
pub fn generate_enemy(dice: &mut dyn Dice) -> Enemy {
    let (name, health, strength) = ENEMY_ROSTER[dice.pick(ENEMY_ROSTER.len())];
    Enemy::new(name, health, strength)
}

/// Heals the player by a treasure roll. Returns the amount healed.
pub fn find_treasure(player: &mut Player, dice: &mut dyn Dice) -> u32 {
    let amount = dice.roll(TREASURE_HEAL_MIN, TREASURE_HEAL_MAX);
    player.heal(amount)
}

/// Poses a riddle from `riddles` and rewards or punishes the answer.
///
/// A provider failure leaves the room quiet rather than failing the session.
pub fn solve_riddle(
    player: &mut Player,
    riddles: &mut dyn RiddleProvider,
    dice: &mut dyn Dice,
    console: &mut dyn Console,
) -> Result<RoomOutcome, SessionError> {
    let riddle = match riddles.fetch() {
        Ok(riddle) => riddle,
        Err(err) => {
            tracing::warn!(%err, "no riddle available, room stays quiet");
            console.say("A voice whispers in the dark, but the words fade away. You keep moving...");
            return Ok(RoomOutcome::RiddleSkipped);
        }
    };

    console.announce(
        "You've encountered a magical riddle. Solve it to be rewarded. Fail, and you'll be punished.",
    );
    let prompt = Prompt::RiddleAnswer {
        question: riddle.question.clone(),
    };
    let typed = console.ask(&prompt)?.ok_or(SessionError::InputClosed)?;

    if riddle.is_correct(&typed) {
        console.announce("Correct! You receive a health reward.");
        let healed = player.heal(dice.roll(RIDDLE_REWARD_MIN, RIDDLE_REWARD_MAX));
        Ok(RoomOutcome::RiddleSolved { healed })
    } else {
        console.warn("Incorrect. You suffer a penalty.");
        let damage = player.take_damage(dice.roll(RIDDLE_PENALTY_MIN, RIDDLE_PENALTY_MAX))?;
        Ok(RoomOutcome::RiddleFailed { damage })
    }
}

/// Plays one room's event against the player.
pub fn resolve_room(
    event: RoomEvent,
    player: &mut Player,
    riddles: &mut dyn RiddleProvider,
    dice: &mut dyn Dice,
    console: &mut dyn Console,
) -> Result<RoomOutcome, SessionError> {
    tracing::debug!(%event, "resolving room");
    match event {
        RoomEvent::Battle => {
            let enemy = generate_enemy(dice);
            let report = run_battle(player, enemy, dice, console)?;
            Ok(RoomOutcome::Battle(report))
        }
        RoomEvent::Riddle => solve_riddle(player, riddles, dice, console),
        RoomEvent::Treasure => {
            console.announce("You found a treasure! You recover some health.");
            let healed = find_treasure(player, dice);
            Ok(RoomOutcome::Treasure { healed })
        }
        RoomEvent::Nothing => {
            console.announce("Nothing happens in this room. You keep moving...");
            Ok(RoomOutcome::Nothing)
        }
    }
}

/// Like [`resolve_room`] but starts from an event tag.
///
/// Tags that name no event are reported and leave the player untouched.
pub fn resolve_tagged_room(
    tag: &str,
    player: &mut Player,
    riddles: &mut dyn RiddleProvider,
    dice: &mut dyn Dice,
    console: &mut dyn Console,
) -> Result<RoomOutcome, SessionError> {
    match tag.parse::<RoomEvent>() {
        Ok(event) => resolve_room(event, player, riddles, dice, console),
        Err(UnknownEvent(tag)) => {
            tracing::warn!(%tag, "unknown event tag");
            console.say("Unknown event!");
            Ok(RoomOutcome::Unknown(tag))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::BattleOutcome;
    use crate::console::ScriptedConsole;
    use crate::core::dice::{MockDice, RngDice};
    use crate::riddle::{MockRiddleProvider, ProviderError, Riddle};

    fn riddle_provider(answer: bool) -> MockRiddleProvider {
        let mut riddles = MockRiddleProvider::new();
        riddles
            .expect_fetch()
            .returning(move || Ok(Riddle::new("Is the sky blue?", answer)));
        riddles
    }

    fn failing_provider() -> MockRiddleProvider {
        let mut riddles = MockRiddleProvider::new();
        riddles
            .expect_fetch()
            .returning(|| Err(ProviderError::Unavailable("timed out".to_string())));
        riddles
    }

    #[test]
    fn test_generate_event_is_uniform() {
        let mut dice = RngDice::seeded(2024);
        let mut counts = [0u32; 4];
        for _ in 0..4000 {
            let event = generate_event(&mut dice);
            let index = RoomEvent::ALL.iter().position(|e| *e == event).unwrap();
            counts[index] += 1;
        }
        for count in counts {
            assert!(count > 850 && count < 1150, "counts = {:?}", counts);
        }
    }

    #[test]
    fn test_generate_enemy_uses_roster() {
        let mut dice = MockDice::new();
        dice.expect_pick().times(1).return_const(3usize);
        let enemy = generate_enemy(&mut dice);
        assert_eq!(enemy.name(), "Dark Magician");
        assert_eq!(enemy.health(), 75);
        assert_eq!(enemy.strength, 20);
    }

    #[test]
    fn test_generate_enemy_gives_fresh_instances() {
        let mut dice = MockDice::new();
        dice.expect_pick().return_const(2usize);
        let mut first = generate_enemy(&mut dice);
        first.take_damage(25).unwrap();
        let second = generate_enemy(&mut dice);
        assert_eq!(second.health(), 30);
    }

    #[test]
    fn test_treasure_heals_in_range() {
        let mut dice = RngDice::seeded(8);
        for _ in 0..200 {
            let mut player = Player::new("Hero");
            let healed = find_treasure(&mut player, &mut dice);
            assert!((10..=30).contains(&healed));
            assert_eq!(player.health(), 100 + healed);
        }
    }

    #[test]
    fn test_riddle_correct_answer_heals() {
        let mut player = Player::new("Hero");
        let mut riddles = riddle_provider(true);
        let mut dice = MockDice::new();
        dice.expect_roll()
            .withf(|low, high| *low == 10 && *high == 30)
            .return_const(17u32);
        let mut console = ScriptedConsole::new(["TRUE"]);

        let outcome = solve_riddle(&mut player, &mut riddles, &mut dice, &mut console).unwrap();

        assert_eq!(outcome, RoomOutcome::RiddleSolved { healed: 17 });
        assert_eq!(player.health(), 117);
        assert_eq!(
            console.asked()[0],
            Prompt::RiddleAnswer {
                question: "Is the sky blue?".to_string()
            }
        );
    }

    #[test]
    fn test_riddle_wrong_answer_hurts() {
        let mut player = Player::new("Hero");
        let mut riddles = riddle_provider(true);
        let mut dice = MockDice::new();
        dice.expect_roll()
            .withf(|low, high| *low == 10 && *high == 20)
            .return_const(12u32);
        let mut console = ScriptedConsole::new(["false"]);

        let outcome = solve_riddle(&mut player, &mut riddles, &mut dice, &mut console).unwrap();

        assert_eq!(outcome, RoomOutcome::RiddleFailed { damage: 12 });
        assert_eq!(player.health(), 88);
    }

    #[test]
    fn test_riddle_penalty_floors_at_zero() {
        let mut player = Player::with_health("Hero", 7);
        let mut riddles = riddle_provider(false);
        let mut dice = MockDice::new();
        dice.expect_roll().return_const(20u32);
        let mut console = ScriptedConsole::new(["true"]);

        let outcome = solve_riddle(&mut player, &mut riddles, &mut dice, &mut console).unwrap();

        assert_eq!(outcome, RoomOutcome::RiddleFailed { damage: 7 });
        assert_eq!(player.health(), 0);
    }

    #[test]
    fn test_riddle_non_boolean_answer_is_wrong() {
        let mut player = Player::new("Hero");
        let mut riddles = riddle_provider(true);
        let mut dice = MockDice::new();
        dice.expect_roll()
            .withf(|low, high| *low == 10 && *high == 20)
            .times(1)
            .return_const(15u32);
        let mut console = ScriptedConsole::new(["no"]);

        let outcome = solve_riddle(&mut player, &mut riddles, &mut dice, &mut console).unwrap();

        assert_eq!(outcome, RoomOutcome::RiddleFailed { damage: 15 });
        assert_eq!(player.health(), 85);
        assert_eq!(console.asked().len(), 1);
        assert!(console.saw("Incorrect."));
    }

    #[test]
    fn test_provider_failure_leaves_room_quiet() {
        let mut player = Player::new("Hero");
        let mut riddles = failing_provider();
        let mut dice = MockDice::new();
        dice.expect_roll().never();
        let mut console = ScriptedConsole::default();

        let outcome = solve_riddle(&mut player, &mut riddles, &mut dice, &mut console).unwrap();

        assert_eq!(outcome, RoomOutcome::RiddleSkipped);
        assert_eq!(player.health(), 100);
        assert!(console.asked().is_empty());
    }

    #[test]
    fn test_resolve_nothing_room() {
        let mut player = Player::new("Hero");
        let mut riddles = MockRiddleProvider::new();
        let mut dice = MockDice::new();
        let mut console = ScriptedConsole::default();

        let outcome = resolve_room(
            RoomEvent::Nothing,
            &mut player,
            &mut riddles,
            &mut dice,
            &mut console,
        )
        .unwrap();

        assert_eq!(outcome, RoomOutcome::Nothing);
        assert_eq!(player.health(), 100);
        assert!(console.saw("Nothing happens in this room"));
    }

    #[test]
    fn test_resolve_battle_room_escape() {
        let mut player = Player::new("Hero");
        let mut riddles = MockRiddleProvider::new();
        let mut dice = MockDice::new();
        dice.expect_pick().return_const(2usize);
        dice.expect_coin_flip().return_const(true);
        let mut console = ScriptedConsole::new(["run"]);

        let outcome = resolve_room(
            RoomEvent::Battle,
            &mut player,
            &mut riddles,
            &mut dice,
            &mut console,
        )
        .unwrap();

        match outcome {
            RoomOutcome::Battle(report) => {
                assert_eq!(report.enemy_name, "Goblin");
                assert_eq!(report.outcome, BattleOutcome::Escaped);
            }
            other => panic!("expected battle, got {:?}", other),
        }
        assert_eq!(player.health(), 100);
    }

    #[test]
    fn test_unknown_tag_changes_nothing() {
        let mut player = Player::new("Hero");
        let mut riddles = MockRiddleProvider::new();
        let mut dice = MockDice::new();
        let mut console = ScriptedConsole::default();

        let outcome =
            resolve_tagged_room("dragon", &mut player, &mut riddles, &mut dice, &mut console)
                .unwrap();

        assert_eq!(outcome, RoomOutcome::Unknown("dragon".to_string()));
        assert_eq!(player.health(), 100);
        assert!(console.saw("Unknown event!"));
    }

    #[test]
    fn test_tagged_treasure_room() {
        let mut player = Player::new("Hero");
        let mut riddles = MockRiddleProvider::new();
        let mut dice = MockDice::new();
        dice.expect_roll().return_const(25u32);
        let mut console = ScriptedConsole::default();

        let outcome =
            resolve_tagged_room("Treasure", &mut player, &mut riddles, &mut dice, &mut console)
                .unwrap();

        assert_eq!(outcome, RoomOutcome::Treasure { healed: 25 });
        assert_eq!(player.health(), 125);
    }
}
