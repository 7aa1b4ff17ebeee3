//! Combat resolution rules.
//!
//! Pure functions over [`ActorState`](crate::state::ActorState) and the
//! opponent types defined here. Nothing in this module locks or awaits; the
//! runtime calls these under the relevant actor lock and owns the ordering.
//!
//! # Core Functions
//!
//! - [`hero_strike`]: archetype-specific damage contribution for one round
//! - [`enemy_attack`]: dodge roll, guard and armor mitigation, damage
//! - [`Enemy::generate`]: floor-scaled enemy for a regular encounter
//! - [`Boss`]: milestone opponent built from a [`BossProfile`]

mod boss;
mod enemy;
mod strike;

pub use boss::{Boss, BossProfile, BossRewards};
pub use enemy::Enemy;
pub use strike::{
    EnemyAttack, HERO_BASE_DAMAGE, Strike, StrikeKind, dodge_chance, enemy_attack, hero_strike,
    mitigation,
};
