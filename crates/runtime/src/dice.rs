//! Entropy sources for the runtime.
use std::sync::Arc;

use game_core::{Dice, PcgDice};
use rand::{Rng, RngCore};

/// Dice backed by the calling thread's RNG.
///
/// Each roll borrows `rand::thread_rng()`, so the type itself is `Send + Sync`
/// and can be shared by every attack task of a round.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDice;

impl Dice for ThreadDice {
    fn next_u32(&self) -> u32 {
        rand::thread_rng().next_u32()
    }

    fn range(&self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..max)
    }
}

/// Seeded dice when a seed is configured, thread dice otherwise.
pub fn shared_dice(seed: Option<u64>) -> Arc<dyn Dice> {
    match seed {
        Some(seed) => Arc::new(PcgDice::new(seed)),
        None => Arc::new(ThreadDice),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_dice_respects_bounds() {
        let dice = ThreadDice;
        for _ in 0..1_000 {
            assert!((30..50).contains(&dice.range(30, 50)));
        }
        assert_eq!(dice.range(7, 7), 7);
    }
}
