//! Regular enemies and room keepers.

use game_core::Dice;

pub const ENEMY_ROSTER: [&str; 6] = ["Goblin", "Orc", "Troll", "Skeleton", "Wraith", "Drake"];

/// Keeper of the per-floor shop.
pub const SHOPKEEPER: &str = "Eldric";

pub fn random_enemy_name(dice: &dyn Dice) -> &'static str {
    ENEMY_ROSTER[dice.pick(ENEMY_ROSTER.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::PcgDice;

    #[test]
    fn names_come_from_roster() {
        let dice = PcgDice::new(8);
        for _ in 0..100 {
            assert!(ENEMY_ROSTER.contains(&random_enemy_name(&dice)));
        }
    }
}
