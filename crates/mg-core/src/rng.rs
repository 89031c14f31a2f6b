//! Random number generation
//!
//! Every decision that rolls dice goes through [`RandomSource`], so
//! controllers can be driven by a seeded [`GameRng`] in play and by a
//! [`ScriptedRng`] in tests.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of randomness handed to every controller call.
pub trait RandomSource {
    /// Uniform value in `0..n`. Returns 0 if `n` is 0.
    fn rn2(&mut self, n: u32) -> u32;

    /// Uniform value in `0.0..1.0`.
    fn unit(&mut self) -> f64 {
        self.rn2(10_000) as f64 / 10_000.0
    }

    /// Returns true with probability 1/n
    fn one_in(&mut self, n: u32) -> bool {
        self.rn2(n) == 0
    }

    /// Uniform value in the half-open range `lo..hi`. Returns `lo` when empty.
    fn range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        lo + self.rn2((hi - lo) as u32) as i32
    }

    /// Returns true with probability `p`
    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Pick an index into a collection of `len` elements
    fn choose_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.rn2(len as u32) as usize)
        }
    }
}

/// Game random number generator
///
/// Wraps ChaCha8Rng for reproducible random number generation.
/// Only the seed is serialized; a restored world replays from its seed.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(GameRng::new(seed))
    }
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    fn unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Replays a fixed list of rolls.
///
/// Each `rn2(n)` call pops the next value and reduces it modulo `n`; once the
/// script runs dry every roll is 0. `unit()` consumes a roll as per-mille.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    rolls: VecDeque<u32>,
}

impl ScriptedRng {
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    /// Queue more rolls at the end of the script
    pub fn push(&mut self, roll: u32) {
        self.rolls.push_back(roll);
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RandomSource for ScriptedRng {
    fn rn2(&mut self, n: u32) -> u32 {
        let roll = self.rolls.pop_front().unwrap_or(0);
        if n == 0 { 0 } else { roll % n }
    }

    fn unit(&mut self) -> f64 {
        let roll = self.rolls.pop_front().unwrap_or(0);
        (roll % 1000) as f64 / 1000.0
    }
}
