//! Non-combat rooms: treasure chests, the floor shop, and party rest.

mod chest;
mod rest;
mod shop;

pub use chest::{Chest, ChestLoot};
pub use rest::{REST_HEAL, party_rest};
pub use shop::{HEALING_PRICE, Shop, ShopOutcome};
