use std::fmt;

use crate::core::constants::*;
use crate::core::dice::Dice;

/// Damage was applied to a character that is already dead.
///
/// This is a game-over signal, not an ordinary failure: the session loop
/// turns it into a defeat.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CharacterError {
    #[error("Game Over: {name} is already dead")]
    TerminalState { name: String },
}

/// Name and health shared by every character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vitals {
    pub name: String,
    pub health: u32,
}

impl Vitals {
    pub fn new(name: impl Into<String>, health: u32) -> Self {
        Self {
            name: name.into(),
            health,
        }
    }
}

pub trait Character {
    fn vitals(&self) -> &Vitals;
    fn vitals_mut(&mut self) -> &mut Vitals;

    /// Damage dealt by one attack.
    fn attack(&self, dice: &mut dyn Dice) -> u32;

    fn name(&self) -> &str {
        &self.vitals().name
    }

    fn health(&self) -> u32 {
        self.vitals().health
    }

    fn is_alive(&self) -> bool {
        self.vitals().health > 0
    }

    /// Subtracts `damage`, clamping at 0. Returns the health actually lost.
    fn take_damage(&mut self, damage: u32) -> Result<u32, CharacterError> {
        let vitals = self.vitals_mut();
        if vitals.health == 0 {
            return Err(CharacterError::TerminalState {
                name: vitals.name.clone(),
            });
        }
        let lost = damage.min(vitals.health);
        vitals.health -= lost;
        Ok(lost)
    }

    /// Adds `amount` with no upper cap. Dead characters stay dead.
    fn heal(&mut self, amount: u32) -> u32 {
        let vitals = self.vitals_mut();
        if vitals.health == 0 {
            return 0;
        }
        let before = vitals.health;
        vitals.health = vitals.health.saturating_add(amount);
        vitals.health - before
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub vitals: Vitals,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_health(name, PLAYER_BASE_HEALTH)
    }

    pub fn with_health(name: impl Into<String>, health: u32) -> Self {
        Self {
            vitals: Vitals::new(name, health),
        }
    }
}

impl Character for Player {
    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    fn attack(&self, dice: &mut dyn Dice) -> u32 {
        dice.roll(PLAYER_ATTACK_MIN, PLAYER_ATTACK_MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    pub vitals: Vitals,
    pub strength: u32,
}

impl Enemy {
    pub fn new(name: impl Into<String>, health: u32, strength: u32) -> Self {
        Self {
            vitals: Vitals::new(name, health),
            strength,
        }
    }

    /// Inclusive damage range. The low end is floored at 0 for weak enemies.
    pub fn attack_range(&self) -> (u32, u32) {
        (
            self.strength.saturating_sub(ENEMY_ATTACK_SPREAD),
            self.strength,
        )
    }
}

impl Character for Enemy {
    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    fn attack(&self, dice: &mut dyn Dice) -> u32 {
        let (low, high) = self.attack_range();
        dice.roll(low, high)
    }
}

impl fmt::Display for Vitals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} has ❤️ {} health points.", self.name, self.health)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.vitals, f)
    }
}

impl fmt::Display for Enemy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.vitals, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dice::{MockDice, RngDice};

    #[test]
    fn test_player_defaults_to_full_health() {
        let player = Player::new("Hero");
        assert_eq!(player.name(), "Hero");
        assert_eq!(player.health(), 100);
        assert!(player.is_alive());
    }

    #[test]
    fn test_player_attack_range() {
        let player = Player::new("Hero");
        let mut dice = RngDice::seeded(1);
        for _ in 0..1000 {
            let damage = player.attack(&mut dice);
            assert!((5..=15).contains(&damage), "damage = {}", damage);
        }
    }

    #[test]
    fn test_enemy_attack_range() {
        let enemy = Enemy::new("Goblin", 30, 10);
        let mut dice = RngDice::seeded(2);
        for _ in 0..1000 {
            let damage = enemy.attack(&mut dice);
            assert!((5..=10).contains(&damage), "damage = {}", damage);
        }
    }

    #[test]
    fn test_weak_enemy_attack_floor_is_zero() {
        let rat = Enemy::new("Rat", 5, 3);
        assert_eq!(rat.attack_range(), (0, 3));

        let mut dice = MockDice::new();
        dice.expect_roll()
            .withf(|low, high| *low == 0 && *high == 3)
            .times(1)
            .return_const(0u32);
        assert_eq!(rat.attack(&mut dice), 0);
    }

    #[test]
    fn test_take_damage_subtracts() {
        let mut player = Player::new("Hero");
        assert_eq!(player.take_damage(10), Ok(10));
        assert_eq!(player.health(), 90);

        let mut enemy = Enemy::new("Goblin", 30, 10);
        enemy.take_damage(15).unwrap();
        assert_eq!(enemy.health(), 15);
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        for (health, damage) in [(1u32, 0u32), (10, 9), (10, 10), (10, 11), (50, 500)] {
            let mut enemy = Enemy::new("Orc", health, 15);
            enemy.take_damage(damage).unwrap();
            assert_eq!(enemy.health(), health.saturating_sub(damage));
        }
    }

    #[test]
    fn test_lethal_damage_kills() {
        let mut player = Player::new("Hero");
        assert_eq!(player.take_damage(100), Ok(100));
        assert!(!player.is_alive());

        let mut enemy = Enemy::new("Goblin", 30, 10);
        assert_eq!(enemy.take_damage(100), Ok(30));
        assert!(!enemy.is_alive());
    }

    #[test]
    fn test_damage_on_dead_character_is_terminal() {
        let mut enemy = Enemy::new("Goblin", 30, 10);
        enemy.take_damage(30).unwrap();

        let err = enemy.take_damage(5).unwrap_err();
        assert_eq!(
            err,
            CharacterError::TerminalState {
                name: "Goblin".to_string()
            }
        );
        assert_eq!(enemy.health(), 0);
    }

    #[test]
    fn test_heal_has_no_cap() {
        let mut player = Player::new("Hero");
        assert_eq!(player.heal(30), 30);
        assert_eq!(player.health(), 130);
    }

    #[test]
    fn test_heal_does_not_resurrect() {
        let mut player = Player::with_health("Hero", 5);
        player.take_damage(5).unwrap();
        assert_eq!(player.heal(20), 0);
        assert!(!player.is_alive());
    }

    #[test]
    fn test_display_status_line() {
        let player = Player::with_health("Hero", 42);
        assert_eq!(player.to_string(), "Hero has ❤️ 42 health points.");
    }
}
