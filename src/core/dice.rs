//! Seedable two-die roller
//!
//! The roller is an injected collaborator of the engine rather than a global
//! RNG so a given seed yields a reproducible sequence of rolls.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The outcome of rolling both dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub d1: u8,
    pub d2: u8,
}

impl DiceRoll {
    pub fn new(d1: u8, d2: u8) -> Self {
        DiceRoll { d1, d2 }
    }

    pub fn sum(&self) -> u8 {
        self.d1 + self.d2
    }

    /// Is `sector` a legal choice for this roll? The chosen sector must be
    /// one of die1, die2, or die1+die2.
    pub fn permits(&self, sector: u8) -> bool {
        sector == self.d1 || sector == self.d2 || sector == self.sum()
    }

    /// Apply a roll boost to both dice, capped at the die face maximum.
    pub fn boosted(self, boost: u8) -> DiceRoll {
        if boost == 0 {
            return self;
        }
        DiceRoll {
            d1: (self.d1 + boost).min(6),
            d2: (self.d2 + boost).min(6),
        }
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}]", self.d1, self.d2)
    }
}

/// Produces pseudo-random die pairs from a seedable generator.
///
/// Uses the same ChaCha12 generator as deck shuffling so a fixed seed makes
/// an entire game reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiceRoller {
    rng: ChaCha12Rng,
}

impl DiceRoller {
    pub fn from_seed(seed: u64) -> Self {
        DiceRoller {
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    /// Roll both dice. Each die is uniform over 1-6; never fails.
    pub fn roll(&mut self) -> DiceRoll {
        DiceRoll {
            d1: self.rng.gen_range(1..=6),
            d2: self.rng.gen_range(1..=6),
        }
    }
}
