//! Fixed content tables.

mod bosses;
mod roster;

pub use bosses::{FINAL_BOSS, GARTH, ZEPHYR, boss_for};
pub use roster::{ENEMY_ROSTER, SHOPKEEPER, random_enemy_name};
