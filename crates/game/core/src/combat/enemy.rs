//! Regular encounter opponents.

use crate::env::Dice;

/// An enemy generated once per encounter.
///
/// Health only changes through [`Enemy::take_damage`], which the encounter
/// calls once per round with the summed damage of every hero.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    name: String,
    max_health: u32,
    health: u32,
    attack: u32,
}

impl Enemy {
    pub const BASE_HEALTH: u32 = 50;
    pub const HEALTH_PER_FLOOR: u32 = 20;
    /// Exclusive upper bound of the random health bonus.
    pub const HEALTH_SPREAD: u32 = 30;
    pub const BASE_ATTACK: u32 = 5;
    /// Exclusive upper bound of the per-hit attack bonus.
    pub const ATTACK_SPREAD: u32 = 8;

    pub fn new(name: impl Into<String>, max_health: u32, attack: u32) -> Self {
        Self {
            name: name.into(),
            max_health,
            health: max_health,
            attack,
        }
    }

    /// `max_health = 50 + 20·floor + [0, 30)`, `attack = 5 + floor`.
    pub fn generate(floor: u32, name: impl Into<String>, dice: &dyn Dice) -> Self {
        let max_health = Self::BASE_HEALTH
            + Self::HEALTH_PER_FLOOR * floor
            + dice.range(0, Self::HEALTH_SPREAD);
        Self::new(name, max_health, Self::BASE_ATTACK + floor)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn attack(&self) -> u32 {
        self.attack
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Subtracts damage, clamping at zero. Returns the remaining health.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    /// One hit: `attack + [0, 8)`.
    pub fn roll_hit(&self, dice: &dyn Dice) -> u32 {
        self.attack + dice.range(0, Self::ATTACK_SPREAD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgDice;

    #[test]
    fn generation_scales_with_floor() {
        let dice = PcgDice::new(11);
        for floor in 1..=15 {
            let enemy = Enemy::generate(floor, "Goblin", &dice);
            let min = 50 + 20 * floor;
            assert!((min..min + 30).contains(&enemy.max_health()));
            assert_eq!(enemy.health(), enemy.max_health());
            assert_eq!(enemy.attack(), 5 + floor);
        }
    }

    #[test]
    fn damage_clamps_at_zero() {
        let mut enemy = Enemy::new("Troll", 40, 7);
        assert_eq!(enemy.take_damage(25), 15);
        assert!(!enemy.is_defeated());
        assert_eq!(enemy.take_damage(100), 0);
        assert!(enemy.is_defeated());
    }
}
