//! Shared actor handles.
//!
//! [`ActorHandle`] wraps one [`game_core::ActorState`] and one
//! [`game_core::Inventory`] behind separate mutexes, plus the supervised
//! timers that revert ability buffs.

mod handle;
mod timers;

pub use handle::{ActorHandle, ActorId};
pub use timers::BuffTimers;
