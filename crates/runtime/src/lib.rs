//! Concurrent runtime for a dungeon party run.
//!
//! This crate turns the pure rules of `game-core` into a live run: actors
//! are shared handles mutated from many tasks, regular fights fan out one
//! attack task per hero behind a per-round barrier, and floors, rooms and
//! bosses are driven through async controllers. Consumers subscribe to the
//! [`EventBus`] to follow the run.
//!
//! Modules are organized by responsibility:
//! - [`actor`] hosts shared actor handles and supervised buff timers
//! - [`encounter`] is the arena where the party meets a regular enemy
//! - [`boss`] plays sequential milestone fights
//! - [`floor`] tracks the current floor, its rooms, and the shop
//! - [`rooms`] resolves chests, shop visits, and party rest
//! - [`party`] owns the roster and runs the intro tasks
//! - [`events`] provides the topic-based event bus
pub mod actor;
pub mod boss;
pub mod config;
pub mod context;
pub mod dice;
pub mod encounter;
pub mod error;
pub mod events;
pub mod floor;
pub mod party;
pub mod rooms;

pub use actor::{ActorHandle, ActorId, BuffTimers};
pub use boss::{BossEncounter, BossRound};
pub use config::RuntimeConfig;
pub use context::RuntimeContext;
pub use dice::{ThreadDice, shared_dice};
pub use encounter::{Encounter, EncounterOutcome, EncounterStatus, JoinOutcome};
pub use error::{Result, RuntimeError};
pub use events::{EncounterEvent, Event, EventBus, FloorEvent, NarrationEvent, Topic};
pub use floor::FloorController;
pub use party::{DEFAULT_ROSTER, Party};
pub use rooms::{Chest, ChestLoot, HEALING_PRICE, REST_HEAL, Shop, ShopOutcome, party_rest};
