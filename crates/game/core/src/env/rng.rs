//! Dice abstraction for every random roll in the party rules.
//!
//! Combat, loot, and room generation never touch a global RNG. They receive a
//! [`Dice`] so the runtime can plug in a thread RNG, a seeded generator, or a
//! scripted test double.
//!
//! # Ranges
//!
//! All ranges are half-open: `range(8, 20)` yields a value in `8..20`.

use core::sync::atomic::{AtomicU64, Ordering};

/// Source of random rolls shared by concurrent attack tasks.
pub trait Dice: Send + Sync {
    /// Generate a random u32 value.
    fn next_u32(&self) -> u32;

    /// Generate a random value in `[min, max)`. Returns `min` when the range is empty.
    fn range(&self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        min + (self.next_u32() % (max - min))
    }

    /// Roll a percentage check: true with `percent`% probability.
    fn chance(&self, percent: u32) -> bool {
        self.range(0, 100) < percent
    }

    /// Pick an index in `0..len`. Returns 0 for an empty slice.
    fn pick(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.range(0, len as u32) as usize
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// Seeded and counter-advanced: every roll mixes the seed with a monotonically
/// increasing counter, so concurrent callers never share a state word and the
/// generator is `Sync` without a lock. The sequence depends on how tasks
/// interleave, so it is reproducible per roll order, not per run.
#[derive(Debug)]
pub struct PcgDice {
    seed: u64,
    counter: AtomicU64,
}

impl PcgDice {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            counter: AtomicU64::new(0),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl Dice for PcgDice {
    fn next_u32(&self) -> u32 {
        let roll = self.counter.fetch_add(1, Ordering::Relaxed);
        let state = Self::pcg_step(mix_seed(self.seed, roll));
        Self::pcg_output(state)
    }
}

/// Mix the base seed with a roll counter (SplitMix64-style avalanche).
fn mix_seed(seed: u64, roll: u64) -> u64 {
    let mut hash = seed ^ roll.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_half_open() {
        let dice = PcgDice::new(7);
        for _ in 0..1_000 {
            let roll = dice.range(8, 20);
            assert!((8..20).contains(&roll));
        }
    }

    #[test]
    fn empty_range_returns_min() {
        let dice = PcgDice::new(1);
        assert_eq!(dice.range(5, 5), 5);
        assert_eq!(dice.range(9, 3), 9);
        assert_eq!(dice.pick(0), 0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = PcgDice::new(42);
        let b = PcgDice::new(42);
        let left: Vec<u32> = (0..16).map(|_| a.next_u32()).collect();
        let right: Vec<u32> = (0..16).map(|_| b.next_u32()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn chance_extremes() {
        let dice = PcgDice::new(3);
        assert!((0..100).all(|_| !dice.chance(0)));
        assert!((0..100).all(|_| dice.chance(100)));
    }
}
