use std::sync::atomic::{AtomicBool, Ordering};

use game_core::{Dice, Equipment, EquipmentKind, PotionKind};
use serde::Serialize;

use crate::actor::ActorHandle;

const CHEST_GOLD: std::ops::Range<u32> = 50..150;

/// What one visit to a chest produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "loot", rename_all = "snake_case")]
pub enum ChestLoot {
    Gold { amount: u32 },
    Equipment { item: Equipment },
    Potions { kind: PotionKind, quantity: u32 },
    /// Someone else opened it first.
    AlreadyLooted,
    /// The roll was an item but the actor had no room for it.
    InventoryFull,
}

/// A treasure chest that can be opened exactly once.
#[derive(Debug, Default)]
pub struct Chest {
    opened: AtomicBool,
}

impl Chest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_opened(&self) -> bool {
        self.opened.load(Ordering::Acquire)
    }

    pub fn description(&self) -> &'static str {
        if self.is_opened() {
            "The chest is already open and empty."
        } else {
            "An ornate chest gleams in the torchlight."
        }
    }

    /// Opens the chest for `actor`; later callers find it empty.
    pub fn open(&self, actor: &ActorHandle, dice: &dyn Dice) -> ChestLoot {
        actor.log_event(format!("{} enters a chamber with an ornate chest!", actor.name()));
        if self.opened.swap(true, Ordering::AcqRel) {
            actor.log_event("The chest is already looted!");
            return ChestLoot::AlreadyLooted;
        }

        let loot = match dice.pick(3) {
            0 => {
                let amount = dice.range(CHEST_GOLD.start, CHEST_GOLD.end);
                actor.add_gold(amount);
                actor.log_event(format!("Found {amount} gold!"));
                ChestLoot::Gold { amount }
            }
            1 => {
                let item = Equipment::new(EquipmentKind::random(dice), actor.level());
                match actor.give_equipment(item) {
                    Ok(()) => {
                        actor.collect_item();
                        actor.log_event(format!("Found: {item}"));
                        ChestLoot::Equipment { item }
                    }
                    Err(err) => {
                        actor.log_event(format!("Found {}, but {err}.", item.kind));
                        ChestLoot::InventoryFull
                    }
                }
            }
            _ => {
                let kind = PotionKind::random(dice);
                let quantity = dice.range(1, 3);
                match actor.give_potion(kind, quantity) {
                    Ok(()) => {
                        actor.collect_item();
                        actor.log_event(format!("Found: {kind} x{quantity}"));
                        ChestLoot::Potions { kind, quantity }
                    }
                    Err(err) => {
                        actor.log_event(format!("Found {kind}, but {err}."));
                        ChestLoot::InventoryFull
                    }
                }
            }
        };
        tracing::debug!(target: "runtime::rooms", actor = %actor.name(), ?loot, "chest opened");
        loot
    }
}

#[cfg(test)]
mod tests {
    use game_core::{ArchetypeKind, PcgDice};

    use super::*;

    #[test]
    fn second_opener_finds_nothing() {
        let dice = PcgDice::new(3);
        let chest = Chest::new();
        let first = ActorHandle::new("Theron", ArchetypeKind::Knight);
        let second = ActorHandle::new("Arcanis", ArchetypeKind::Wizard);

        assert_ne!(chest.open(&first, &dice), ChestLoot::AlreadyLooted);
        assert_eq!(chest.open(&second, &dice), ChestLoot::AlreadyLooted);
        assert!(chest.is_opened());
        assert!(second.log().last().unwrap().contains("already looted"));
    }
}
