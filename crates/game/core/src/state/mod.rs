//! Canonical party state types.
//!
//! Everything here is plain data with `&mut self` mutators. Synchronization is
//! layered on by the runtime, one lock per actor and one per inventory.
mod actor;
mod archetype;
mod buff;
mod inventory;
mod items;

pub use actor::{AbilityOutcome, ActorSnapshot, ActorState, ActorStatus, DamageOutcome};
pub use archetype::{AbilitySpec, ArchetypeKind, ArchetypeProfile, ArchetypeStats};
pub use buff::{Buff, BuffBonuses, BuffStat};
pub use inventory::Inventory;
pub use items::{Equipment, EquipmentKind, PotionEffect, PotionKind};
