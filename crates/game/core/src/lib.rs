//! Party rules and data types shared by the runtime and the driver.
//!
//! `game-core` defines the canonical rules (actor vitals, archetypes, combat
//! formulas, inventory) as plain data with `&mut self` mutators. It never
//! locks, spawns, or sleeps: the `runtime` crate layers concurrency on top and
//! supplies randomness through [`env::Dice`].
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod floor;
pub mod report;
pub mod state;

pub use combat::{
    Boss, BossProfile, BossRewards, Enemy, EnemyAttack, Strike, StrikeKind, enemy_attack,
    hero_strike,
};
pub use config::GameConfig;
pub use env::{Dice, PcgDice};
pub use error::{ErrorSeverity, GameError, InventoryError};
pub use floor::{Milestone, RoomBatch, RoomKind, RoomOptions};
pub use report::{PartyTotals, RankEntry, RunSummary};
pub use state::{
    AbilityOutcome, AbilitySpec, ActorSnapshot, ActorState, ActorStatus, ArchetypeKind,
    ArchetypeProfile, ArchetypeStats, Buff, BuffBonuses, BuffStat, DamageOutcome, Equipment,
    EquipmentKind, Inventory, PotionEffect, PotionKind,
};
