//! Room layout for a floor.
//!
//! A floor owns one batch of [`GameConfig::ROOMS_PER_FLOOR`] room descriptors
//! and offers the party [`GameConfig::ROOM_OPTIONS`] choices at a time. Both
//! containers are fixed-capacity so a batch can be swapped in one assignment.

use arrayvec::ArrayVec;
use strum::Display;

use crate::config::GameConfig;
use crate::env::Dice;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoomKind {
    #[strum(to_string = "Treasure Chest")]
    Chest,
    #[strum(to_string = "Combat Room")]
    Combat,
    #[strum(to_string = "Shop")]
    Shop,
}

impl RoomKind {
    pub const fn description(self) -> &'static str {
        match self {
            Self::Chest => "A mysterious chest awaits...",
            Self::Combat => "Enemies lurk in the shadows!",
            Self::Shop => "A wandering merchant has set up shop.",
        }
    }
}

pub type RoomBatch = ArrayVec<RoomKind, { GameConfig::ROOMS_PER_FLOOR }>;
pub type RoomOptions = ArrayVec<RoomKind, { GameConfig::ROOM_OPTIONS }>;

/// Kind of boss floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Milestone {
    /// Every fifth floor before the last.
    Floor(u32),
    Final,
}

impl GameConfig {
    /// Boss floors bypass room generation.
    pub fn milestone(&self, floor: u32) -> Option<Milestone> {
        if floor == self.max_floors {
            Some(Milestone::Final)
        } else if self.is_milestone(floor) {
            Some(Milestone::Floor(floor))
        } else {
            None
        }
    }
}

/// Percent chance that a floor's batch contains the shop.
const SHOP_CHANCE: u32 = 60;

/// Builds a fresh batch: at most one slot becomes the shop, the rest are
/// chest or combat with equal odds.
pub fn generate_rooms(dice: &dyn Dice) -> RoomBatch {
    let shop_slot = dice
        .chance(SHOP_CHANCE)
        .then(|| dice.pick(GameConfig::ROOMS_PER_FLOOR));
    (0..GameConfig::ROOMS_PER_FLOOR)
        .map(|slot| {
            if shop_slot == Some(slot) {
                RoomKind::Shop
            } else if dice.chance(50) {
                RoomKind::Chest
            } else {
                RoomKind::Combat
            }
        })
        .collect()
}

/// Picks the options offered for one choice.
///
/// At most one chest and one shop; the shop only when still available. A roll
/// that would break either rule falls back to combat.
pub fn room_options(shop_available: bool, dice: &dyn Dice) -> RoomOptions {
    let mut options = RoomOptions::new();
    let mut chest = false;
    let mut shop = false;
    while !options.is_full() {
        let kind = match dice.pick(3) {
            0 if !chest => {
                chest = true;
                RoomKind::Chest
            }
            2 if shop_available && !shop => {
                shop = true;
                RoomKind::Shop
            }
            _ => RoomKind::Combat,
        };
        options.push(kind);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgDice;

    #[test]
    fn batches_never_hold_two_shops() {
        let dice = PcgDice::new(99);
        for _ in 0..500 {
            let batch = generate_rooms(&dice);
            assert!(batch.is_full());
            let shops = batch.iter().filter(|kind| **kind == RoomKind::Shop).count();
            assert!(shops <= 1);
        }
    }

    #[test]
    fn options_respect_limits() {
        let dice = PcgDice::new(4);
        for _ in 0..500 {
            let options = room_options(true, &dice);
            assert_eq!(options.len(), GameConfig::ROOM_OPTIONS);
            assert!(options.iter().filter(|kind| **kind == RoomKind::Chest).count() <= 1);
            assert!(options.iter().filter(|kind| **kind == RoomKind::Shop).count() <= 1);

            let options = room_options(false, &dice);
            assert!(!options.contains(&RoomKind::Shop));
        }
    }

    #[test]
    fn milestone_kinds() {
        let config = GameConfig::default();
        assert_eq!(config.milestone(4), None);
        assert_eq!(config.milestone(5), Some(Milestone::Floor(5)));
        assert_eq!(config.milestone(10), Some(Milestone::Floor(10)));
        assert_eq!(config.milestone(15), Some(Milestone::Final));
    }
}
