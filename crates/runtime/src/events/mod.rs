//! Engine events: narration lines, encounter lifecycle and floor progress.
//!
//! Publishing never fails. An event on a topic with no receivers is dropped.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{EncounterEvent, FloorEvent, NarrationEvent};
