//! Injectable source of randomness.
//!
//! Every rule that rolls goes through [`Dice`] so that sessions can be
//! replayed from a seed and tests can force exact outcomes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[cfg_attr(test, mockall::automock)]
pub trait Dice {
    /// Uniform roll in `[low, high]`, both inclusive.
    fn roll(&mut self, low: u32, high: u32) -> u32;

    /// Fair 50/50 draw.
    fn coin_flip(&mut self) -> bool;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// [`Dice`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngDice<R> {
    rng: R,
}

impl<R: Rng> RngDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDice<ChaCha8Rng> {
    /// Reproducible dice for replays, the simulator and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl RngDice<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Dice for RngDice<R> {
    fn roll(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}
