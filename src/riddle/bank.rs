//! Built-in riddles for offline play and the simulator.

use super::types::{ProviderError, Riddle, RiddleProvider};
use crate::core::dice::Dice;

const RIDDLES: [(&str, bool); 16] = [
    ("The Great Wall of China is visible from the Moon with the naked eye.", false),
    ("An octopus has three hearts.", true),
    ("Lightning never strikes the same place twice.", false),
    ("Venus is the hottest planet in the Solar System.", true),
    ("Bats are blind.", false),
    ("A group of crows is called a murder.", true),
    ("Goldfish have a memory span of only three seconds.", false),
    ("Sound travels faster in water than in air.", true),
    ("Humans use only ten percent of their brains.", false),
    ("Honey never spoils if kept sealed.", true),
    ("Mount Everest is the tallest mountain measured from base to peak.", false),
    ("The Amazon River flows into the Atlantic Ocean.", true),
    ("Bulls are enraged by the colour red.", false),
    ("Diamonds are made of carbon.", true),
    ("Napoleon Bonaparte was unusually short for his time.", false),
    ("Sharks existed before trees.", true),
];

/// Correct answer for a question in the bank.
pub fn answer_key(question: &str) -> Option<bool> {
    RIDDLES
        .iter()
        .find(|(q, _)| *q == question)
        .map(|(_, answer)| *answer)
}

/// Draws from a fixed list of true/false questions.
pub struct RiddleBank<D> {
    dice: D,
}

impl<D: Dice> RiddleBank<D> {
    pub fn new(dice: D) -> Self {
        Self { dice }
    }
}

impl<D: Dice> RiddleProvider for RiddleBank<D> {
    fn fetch(&mut self) -> Result<Riddle, ProviderError> {
        let (question, answer) = RIDDLES[self.dice.pick(RIDDLES.len())];
        Ok(Riddle::new(question, answer))
    }
}
