//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use game_core::{ArchetypeKind, Dice};
use runtime::{ActorHandle, ActorId, RuntimeConfig, RuntimeContext};

/// Scripted dice: every range roll clamps `value` into the range, every
/// percentage check returns `chance`, and every pick selects the first entry.
#[derive(Debug, Clone, Copy)]
pub struct FixedDice {
    pub value: u32,
    pub chance: bool,
}

impl FixedDice {
    pub const PLAIN: Self = Self {
        value: 15,
        chance: false,
    };

    pub const LUCKY: Self = Self {
        value: 15,
        chance: true,
    };
}

impl Dice for FixedDice {
    fn next_u32(&self) -> u32 {
        self.value
    }

    fn range(&self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.value.clamp(min, max - 1)
    }

    fn chance(&self, _percent: u32) -> bool {
        self.chance
    }

    fn pick(&self, _len: usize) -> usize {
        0
    }
}

pub fn scripted_context(dice: FixedDice) -> RuntimeContext {
    scripted_context_with(RuntimeConfig::default(), dice)
}

pub fn scripted_context_with(config: RuntimeConfig, dice: FixedDice) -> RuntimeContext {
    RuntimeContext::with_dice(config, Arc::new(dice))
}

pub fn knights(names: &[&str]) -> Vec<ActorHandle> {
    names
        .iter()
        .map(|name| ActorHandle::new(*name, ArchetypeKind::Knight))
        .collect()
}

pub fn no_rest() -> HashSet<ActorId> {
    HashSet::new()
}
