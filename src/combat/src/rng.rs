// src/combat/src/rng.rs
//! Random sources for enemy selection and damage rolls.
//!
//! Combat never touches a global RNG: every roll goes through a
//! [`RandomSource`], so games can be seeded and tests can script each roll.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

pub trait RandomSource {
    /// Uniform integer in `low..=high`.
    fn roll_range(&mut self, low: u32, high: u32) -> u32;

    /// `true` with the given probability.
    fn chance(&mut self, probability: f64) -> bool;
}

/// 确定性 RNG（PCG32），相同种子产生相同序列
#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: Pcg32,
    seed: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    /// 使用随机种子创建
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRng {
    fn roll_range(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..=high)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }
}

/// Replays queued rolls in order.
///
/// Integer rolls are clamped into the requested range. An exhausted queue
/// yields the low end of the range and `false` for chance rolls.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    ints: VecDeque<u32>,
    chances: VecDeque<bool>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rolls(ints: impl IntoIterator<Item = u32>, chances: impl IntoIterator<Item = bool>) -> Self {
        Self {
            ints: ints.into_iter().collect(),
            chances: chances.into_iter().collect(),
        }
    }

    /// Rolls not consumed yet, as (ints, chances).
    pub fn remaining(&self) -> (usize, usize) {
        (self.ints.len(), self.chances.len())
    }
}

impl RandomSource for ScriptedRng {
    fn roll_range(&mut self, low: u32, high: u32) -> u32 {
        self.ints.pop_front().map_or(low, |v| v.clamp(low, high.max(low)))
    }

    fn chance(&mut self, _probability: f64) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }
}
