use chrono::Utc;
use std::collections::VecDeque;
use std::io;

use super::types::*;
use crate::character::{Character, Player};
use crate::combat::BattleOutcome;
use crate::console::{Console, Prompt};
use crate::core::config::GameConfig;
use crate::core::constants::DEFAULT_PLAYER_NAME;
use crate::core::dice::Dice;
use crate::events::{generate_event, resolve_room, resolve_tagged_room, RoomOutcome};
use crate::riddle::RiddleProvider;

/// True for answers that mean "keep going".
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// One trip through the dungeon.
///
/// The session owns the player for its whole lifetime and borrows its
/// collaborators, so callers pick the dice, riddle source and console.
pub struct Session<'a> {
    config: GameConfig,
    dice: &'a mut dyn Dice,
    riddles: &'a mut dyn RiddleProvider,
    console: &'a mut dyn Console,
}

impl<'a> Session<'a> {
    pub fn new(
        config: GameConfig,
        dice: &'a mut dyn Dice,
        riddles: &'a mut dyn RiddleProvider,
        console: &'a mut dyn Console,
    ) -> Self {
        Self {
            config,
            dice,
            riddles,
            console,
        }
    }

    /// Asks for the player's name, then plays.
    pub fn run(&mut self) -> io::Result<SessionSummary> {
        self.console.say("Welcome to the Dungeon of Adventure!");
        let name = self
            .console
            .ask(&Prompt::PlayerName)?
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string());
        let player = Player::with_health(name, self.config.player_health);
        self.run_with_player(player)
    }

    /// Plays rooms until the player dies, withdraws or finds the exit.
    ///
    /// Only console I/O failures escape; every other error is turned into an
    /// outcome here.
    pub fn run_with_player(&mut self, mut player: Player) -> io::Result<SessionSummary> {
        let span = tracing::info_span!("session", player = %player.name());
        let _guard = span.enter();
        tracing::info!(health = player.health(), exit_after = ?self.config.exit_after_rooms, "session started");

        let mut summary = SessionSummary::new(player.name());
        let mut scripted: VecDeque<String> = self.config.scripted_events.iter().cloned().collect();

        self.console.announce(&format!(
            "Welcome, {}! Your adventure begins now...",
            player.name().to_uppercase()
        ));
        self.console.announce(
            "You are in a dark dungeon and must pass through different rooms to find the exit.",
        );

        let outcome = loop {
            summary.rooms_explored += 1;

            let room = match scripted.pop_front() {
                Some(tag) => resolve_tagged_room(
                    &tag,
                    &mut player,
                    &mut *self.riddles,
                    &mut *self.dice,
                    &mut *self.console,
                ),
                None => {
                    let event = generate_event(&mut *self.dice);
                    resolve_room(
                        event,
                        &mut player,
                        &mut *self.riddles,
                        &mut *self.dice,
                        &mut *self.console,
                    )
                }
            };

            match room {
                Ok(outcome) => record_room(&mut summary, &outcome),
                Err(SessionError::Terminal(err)) => {
                    tracing::warn!(%err, "terminal state reached");
                    self.console.warn("You have been defeated in the dungeon... Better luck next time!");
                    break SessionOutcome::Defeat;
                }
                Err(SessionError::InputClosed) => {
                    tracing::info!("input closed, leaving the dungeon");
                    break if player.is_alive() {
                        SessionOutcome::Withdrawal
                    } else {
                        SessionOutcome::Defeat
                    };
                }
                Err(SessionError::Io(err)) => return Err(err),
            }

            self.console.say(&player.to_string());

            if !player.is_alive() {
                self.console
                    .warn("You have been defeated in the dungeon... Better luck next time!");
                break SessionOutcome::Defeat;
            }

            if let Some(limit) = self.config.exit_after_rooms {
                if summary.rooms_explored >= limit {
                    break SessionOutcome::Victory;
                }
            }

            match self.console.ask(&Prompt::NextRoom)? {
                Some(answer) if is_affirmative(&answer) => continue,
                _ => {
                    self.console.say(
                        "You decide not to move forward and leave the dungeon. See you in the next adventure!",
                    );
                    break SessionOutcome::Withdrawal;
                }
            }
        };

        match outcome {
            SessionOutcome::Victory => self
                .console
                .announce("You have found the exit of the dungeon! Congratulations!"),
            SessionOutcome::Defeat => self.console.say("GAME OVER."),
            SessionOutcome::Withdrawal => {}
        }

        summary.outcome = outcome;
        summary.final_health = player.health();
        summary.finished_at = Utc::now();
        tracing::info!(
            %outcome,
            rooms = summary.rooms_explored,
            health = summary.final_health,
            "session finished"
        );
        Ok(summary)
    }
}

fn record_room(summary: &mut SessionSummary, outcome: &RoomOutcome) {
    match outcome {
        RoomOutcome::Battle(report) => match report.outcome {
            BattleOutcome::Victory => summary.battles_won += 1,
            BattleOutcome::Defeat => summary.battles_lost += 1,
            BattleOutcome::Escaped => summary.escapes += 1,
        },
        RoomOutcome::RiddleSolved { .. } => summary.riddles_solved += 1,
        RoomOutcome::RiddleFailed { .. } => summary.riddles_failed += 1,
        RoomOutcome::RiddleSkipped => summary.riddles_skipped += 1,
        RoomOutcome::Treasure { .. } => summary.treasures_found += 1,
        RoomOutcome::Nothing => {}
        RoomOutcome::Unknown(_) => summary.unknown_events += 1,
    }
}
