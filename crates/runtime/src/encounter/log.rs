//! Shared narration log of one encounter.

use std::sync::{Mutex, PoisonError};

use crate::actor::ActorHandle;
use crate::events::{EventBus, NarrationEvent};

/// Accepts concurrent appends from attack tasks.
///
/// Every line lands in three places: this log, the private log of each
/// actor in the audience, and the narration topic of the event bus.
#[derive(Debug)]
pub(crate) struct SharedLog {
    floor: u32,
    lines: Mutex<Vec<String>>,
    events: EventBus,
}

impl SharedLog {
    pub(crate) fn new(floor: u32, events: EventBus) -> Self {
        Self {
            floor,
            lines: Mutex::new(Vec::new()),
            events,
        }
    }

    pub(crate) fn narrate(&self, line: impl Into<String>, audience: &[ActorHandle]) {
        let line = line.into();
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.clone());
        for actor in audience {
            actor.log_direct(line.clone());
        }
        self.events.publish(NarrationEvent::new(self.floor, line));
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap_or_else(PoisonError::into_inner))
    }
}
