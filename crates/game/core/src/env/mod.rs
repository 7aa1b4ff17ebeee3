//! Environment seams the rules depend on.
//!
//! Currently this is only randomness: every roll goes through [`Dice`] so the
//! runtime decides where entropy comes from.
mod rng;

pub use rng::{Dice, PcgDice};
