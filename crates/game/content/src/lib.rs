//! Static game content and loaders.
//!
//! This crate houses the fixed content tables the runtime draws from:
//! - Milestone bosses (floor 5, floor 10, and the final floor)
//! - The regular enemy roster
//! - Shopkeeper and chest narration
//!
//! and the TOML loader for [`game_core::GameConfig`].
//!
//! Content is consumed by the runtime and never appears in actor state.

pub mod tables;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use tables::{
    ENEMY_ROSTER, FINAL_BOSS, GARTH, SHOPKEEPER, ZEPHYR, boss_for, random_enemy_name,
};

#[cfg(feature = "loaders")]
pub use loaders::ConfigLoader;
