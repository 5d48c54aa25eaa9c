use super::types::*;
use crate::character::{Character, CharacterError, Enemy, Player};
use crate::console::{Console, Prompt};
use crate::core::dice::Dice;
use crate::session::SessionError;

/// Resolves one action against the enemy.
///
/// Both combatants must be alive on entry. On attack both sides roll and
/// apply damage simultaneously; the enemy's death is checked before the
/// player's. A failed run gives the enemy a free hit without ending the
/// battle.
pub fn resolve_turn(
    player: &mut Player,
    enemy: &mut Enemy,
    action: BattleAction,
    dice: &mut dyn Dice,
) -> Result<TurnResult, CharacterError> {
    let mut result = TurnResult::default();

    match action {
        BattleAction::Attack => {
            let player_damage = player.attack(dice);
            let enemy_damage = enemy.attack(dice);

            result.enemy_health_lost = enemy.take_damage(player_damage)?;
            result.player_health_lost = player.take_damage(enemy_damage)?;
            result.events.push(CombatEvent::PlayerHit {
                damage: player_damage,
            });
            result.events.push(CombatEvent::EnemyHit {
                damage: enemy_damage,
            });

            if !enemy.is_alive() {
                result.events.push(CombatEvent::EnemyDefeated);
                result.outcome = Some(BattleOutcome::Victory);
            } else if !player.is_alive() {
                result.events.push(CombatEvent::PlayerDefeated);
                result.outcome = Some(BattleOutcome::Defeat);
            }
        }
        BattleAction::Run => {
            if dice.coin_flip() {
                result.events.push(CombatEvent::EscapeSucceeded);
                result.outcome = Some(BattleOutcome::Escaped);
                return Ok(result);
            }

            result.events.push(CombatEvent::EscapeFailed);
            let enemy_damage = enemy.attack(dice);
            result.player_health_lost = player.take_damage(enemy_damage)?;
            result.events.push(CombatEvent::EnemyFreeHit {
                damage: enemy_damage,
            });

            if !player.is_alive() {
                result.events.push(CombatEvent::PlayerDefeated);
                result.outcome = Some(BattleOutcome::Defeat);
            }
        }
    }

    Ok(result)
}

/// Text shown for a combat event.
pub fn describe_event(event: &CombatEvent, enemy_name: &str) -> String {
    match event {
        CombatEvent::PlayerHit { damage } => {
            format!("You deal {} damage to the {}.", damage, enemy_name)
        }
        CombatEvent::EnemyHit { damage } => {
            format!("The {} deals {} damage to you.", enemy_name, damage)
        }
        CombatEvent::EscapeSucceeded => "You manage to escape the enemy!".to_string(),
        CombatEvent::EscapeFailed => "You can't escape, the enemy blocks your path.".to_string(),
        CombatEvent::EnemyFreeHit { damage } => format!(
            "The {} attacks you and deals {} damage.",
            enemy_name, damage
        ),
        CombatEvent::EnemyDefeated => format!("You have defeated the {}!", enemy_name),
        CombatEvent::PlayerDefeated => format!("The {} has defeated you...", enemy_name),
    }
}

/// Reads actions until a valid one arrives. Invalid input costs no turn.
fn read_action(console: &mut dyn Console, enemy_name: &str) -> Result<BattleAction, SessionError> {
    let prompt = Prompt::BattleAction {
        enemy: enemy_name.to_string(),
    };
    loop {
        let line = console.ask(&prompt)?.ok_or(SessionError::InputClosed)?;
        match line.parse::<BattleAction>() {
            Ok(action) => return Ok(action),
            Err(err) => {
                tracing::debug!(%err, "rejected battle input");
                console.say("Invalid action. You must choose to either attack or run.");
            }
        }
    }
}

/// Plays a battle to its end, asking the console for each action.
///
/// The enemy is consumed: it does not outlive the battle.
pub fn run_battle(
    player: &mut Player,
    mut enemy: Enemy,
    dice: &mut dyn Dice,
    console: &mut dyn Console,
) -> Result<BattleReport, SessionError> {
    console.announce(&format!("You are facing a {}!", enemy.name()));

    let mut report = BattleReport {
        enemy_name: enemy.name().to_string(),
        outcome: BattleOutcome::Defeat,
        turns: 0,
        damage_dealt: 0,
        damage_taken: 0,
    };

    while player.is_alive() && enemy.is_alive() {
        console.say(&player.to_string());
        let action = read_action(console, &report.enemy_name)?;
        let turn = resolve_turn(player, &mut enemy, action, dice)?;

        report.turns += 1;
        report.damage_dealt += turn.enemy_health_lost;
        report.damage_taken += turn.player_health_lost;
        tracing::debug!(
            turn = report.turns,
            ?action,
            player_health = player.health(),
            enemy_health = enemy.health(),
            "battle turn resolved"
        );

        for event in &turn.events {
            let text = describe_event(event, &report.enemy_name);
            match event {
                CombatEvent::PlayerDefeated => console.warn(&text),
                _ => console.announce(&text),
            }
        }

        if let Some(outcome) = turn.outcome {
            report.outcome = outcome;
            return Ok(report);
        }
    }

    // Only reachable if a combatant entered the battle already dead.
    report.outcome = if player.is_alive() {
        BattleOutcome::Victory
    } else {
        BattleOutcome::Defeat
    };
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{ScriptedConsole, Tone};
    use crate::core::dice::{MockDice, RngDice};

    /// Dice whose rolls always land on `value` and whose coin shows `coin`.
    fn fixed_dice(value: u32, coin: bool) -> MockDice {
        let mut dice = MockDice::new();
        dice.expect_roll().returning(move |_, _| value);
        dice.expect_coin_flip().return_const(coin);
        dice.expect_pick().return_const(0usize);
        dice
    }

    #[test]
    fn test_attack_trades_damage() {
        let mut player = Player::new("Hero");
        let mut enemy = Enemy::new("Goblin", 30, 10);
        let mut dice = fixed_dice(8, true);

        let turn = resolve_turn(&mut player, &mut enemy, BattleAction::Attack, &mut dice).unwrap();

        assert_eq!(player.health(), 92);
        assert_eq!(enemy.health(), 22);
        assert_eq!(
            turn.events,
            vec![
                CombatEvent::PlayerHit { damage: 8 },
                CombatEvent::EnemyHit { damage: 8 }
            ]
        );
        assert_eq!(turn.outcome, None);
    }

    #[test]
    fn test_attack_kills_enemy_first() {
        // Both drop to 0 on the same turn: victory wins the tie.
        let mut player = Player::with_health("Hero", 5);
        let mut enemy = Enemy::new("Goblin", 5, 10);
        let mut dice = fixed_dice(10, true);

        let turn = resolve_turn(&mut player, &mut enemy, BattleAction::Attack, &mut dice).unwrap();

        assert_eq!(turn.outcome, Some(BattleOutcome::Victory));
        assert!(!player.is_alive());
        assert_eq!(turn.player_health_lost, 5);
    }

    #[test]
    fn test_attack_player_defeated() {
        let mut player = Player::with_health("Hero", 4);
        let mut enemy = Enemy::new("Orc", 50, 15);
        let mut dice = fixed_dice(12, true);

        let turn = resolve_turn(&mut player, &mut enemy, BattleAction::Attack, &mut dice).unwrap();

        assert_eq!(turn.outcome, Some(BattleOutcome::Defeat));
        assert_eq!(player.health(), 0);
        assert_eq!(enemy.health(), 38);
        assert_eq!(turn.events.last(), Some(&CombatEvent::PlayerDefeated));
    }

    #[test]
    fn test_successful_run_leaves_health_unchanged() {
        let mut player = Player::with_health("Hero", 60);
        let mut enemy = Enemy::new("Orc", 50, 15);
        let mut dice = MockDice::new();
        dice.expect_coin_flip().times(1).return_const(true);
        dice.expect_roll().never();

        let turn = resolve_turn(&mut player, &mut enemy, BattleAction::Run, &mut dice).unwrap();

        assert_eq!(turn.outcome, Some(BattleOutcome::Escaped));
        assert_eq!(player.health(), 60);
        assert_eq!(enemy.health(), 50);
    }

    #[test]
    fn test_failed_run_gives_free_hit() {
        let mut player = Player::with_health("Hero", 60);
        let mut enemy = Enemy::new("Orc", 50, 15);
        let mut dice = MockDice::new();
        dice.expect_coin_flip().times(1).return_const(false);
        dice.expect_roll()
            .withf(|low, high| *low == 10 && *high == 15)
            .times(1)
            .return_const(13u32);

        let turn = resolve_turn(&mut player, &mut enemy, BattleAction::Run, &mut dice).unwrap();

        assert_eq!(turn.outcome, None);
        assert_eq!(player.health(), 47);
        assert_eq!(enemy.health(), 50);
        assert_eq!(
            turn.events,
            vec![
                CombatEvent::EscapeFailed,
                CombatEvent::EnemyFreeHit { damage: 13 }
            ]
        );
    }

    #[test]
    fn test_resolve_turn_on_dead_player_is_terminal() {
        let mut player = Player::with_health("Hero", 0);
        let mut enemy = Enemy::new("Orc", 50, 15);
        let mut dice = fixed_dice(10, false);

        let err = resolve_turn(&mut player, &mut enemy, BattleAction::Run, &mut dice).unwrap_err();
        assert!(matches!(err, CharacterError::TerminalState { .. }));
    }

    #[test]
    fn test_run_battle_until_victory() {
        let mut player = Player::new("Hero");
        let enemy = Enemy::new("Goblin", 30, 10);
        let mut dice = RngDice::seeded(99);
        let mut console = ScriptedConsole::new(std::iter::repeat("attack").take(20));

        let report = run_battle(&mut player, enemy, &mut dice, &mut console).unwrap();

        assert_eq!(report.outcome, BattleOutcome::Victory);
        assert_eq!(report.damage_dealt, 30);
        assert_eq!(player.health(), 100 - report.damage_taken);
        assert!(console.saw("You are facing a Goblin!"));
        assert!(console.saw("You have defeated the Goblin!"));
    }

    #[test]
    fn test_invalid_input_is_reprompted_without_turn() {
        let mut player = Player::new("Hero");
        let enemy = Enemy::new("Goblin", 30, 10);
        let mut dice = fixed_dice(5, true);
        let mut console = ScriptedConsole::new(["dance", "hide", "RUN"]);

        let report = run_battle(&mut player, enemy, &mut dice, &mut console).unwrap();

        assert_eq!(report.outcome, BattleOutcome::Escaped);
        assert_eq!(report.turns, 1);
        assert_eq!(player.health(), 100);
        assert_eq!(console.asked().len(), 3);
        let rejections = console
            .output()
            .iter()
            .filter(|(line, _)| line.starts_with("Invalid action"))
            .count();
        assert_eq!(rejections, 2);
    }

    #[test]
    fn test_defeat_is_shown_as_danger() {
        let mut player = Player::with_health("Hero", 10);
        let enemy = Enemy::new("Dark Magician", 75, 20);
        let mut dice = fixed_dice(20, false);
        let mut console = ScriptedConsole::new(["attack"]);

        let report = run_battle(&mut player, enemy, &mut dice, &mut console).unwrap();

        assert_eq!(report.outcome, BattleOutcome::Defeat);
        assert!(console
            .output()
            .iter()
            .any(|(line, tone)| *tone == Tone::Danger && line.contains("has defeated you")));
    }

    #[test]
    fn test_closed_input_mid_battle() {
        let mut player = Player::new("Hero");
        let enemy = Enemy::new("Goblin", 30, 10);
        let mut dice = fixed_dice(5, false);
        let mut console = ScriptedConsole::new(["run"]);

        let err = run_battle(&mut player, enemy, &mut dice, &mut console).unwrap_err();
        assert!(matches!(err, SessionError::InputClosed));
        assert_eq!(player.health(), 95);
    }
}
