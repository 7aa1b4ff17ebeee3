//! Broadcast bus that fans engine events out by topic.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{EncounterEvent, FloorEvent, NarrationEvent};

/// Channel an event travels on.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Shared narration lines from encounters and boss fights
    Narration,
    /// Encounter and boss lifecycle
    Encounter,
    /// Floor progression and the shop
    Floor,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Narration, Topic::Encounter, Topic::Floor];
}

/// Any event the engine publishes; serialized with its topic as the tag.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "topic", content = "event")]
pub enum Event {
    Narration(NarrationEvent),
    Encounter(EncounterEvent),
    Floor(FloorEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Narration(_) => Topic::Narration,
            Event::Encounter(_) => Topic::Encounter,
            Event::Floor(_) => Topic::Floor,
        }
    }
}

impl From<NarrationEvent> for Event {
    fn from(event: NarrationEvent) -> Self {
        Event::Narration(event)
    }
}

impl From<EncounterEvent> for Event {
    fn from(event: EncounterEvent) -> Self {
        Event::Encounter(event)
    }
}

impl From<FloorEvent> for Event {
    fn from(event: FloorEvent) -> Self {
        Event::Floor(event)
    }
}

/// One broadcast channel per topic, created up front.
struct Channels {
    narration: broadcast::Sender<Event>,
    encounter: broadcast::Sender<Event>,
    floor: broadcast::Sender<Event>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Narration => &self.narration,
            Topic::Encounter => &self.encounter,
            Topic::Floor => &self.floor,
        }
    }
}

/// Cloneable handle to the per-topic channels.
///
/// A subscriber only sees events published after it subscribed, and a slow
/// subscriber lags instead of blocking publishers.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Bus with room for 256 undelivered events per topic.
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                narration: broadcast::channel(capacity).0,
                encounter: broadcast::channel(capacity).0,
                floor: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Sends `event` on the channel of its topic.
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();
        if self.channels.get(topic).send(event).is_err() {
            tracing::trace!(target: "runtime::events", ?topic, "no subscribers");
        }
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.get(topic).subscribe()
    }

    /// One receiver per requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn routes_by_topic() {
        let bus = EventBus::new();
        let mut floor = bus.subscribe(Topic::Floor);
        let mut narration = bus.subscribe(Topic::Narration);

        bus.publish(FloorEvent::Advanced { floor: 2 });
        bus.publish(NarrationEvent::new(2, "The torches flicker."));

        assert!(matches!(
            floor.recv().await.unwrap(),
            Event::Floor(FloorEvent::Advanced { floor: 2 })
        ));
        let Event::Narration(line) = narration.recv().await.unwrap() else {
            panic!("expected narration");
        };
        assert_eq!(line.line, "The torches flicker.");
        assert!(floor.try_recv().is_err());
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        let bus = EventBus::with_capacity(1);
        bus.publish(FloorEvent::GameOver { floor: 1 });
    }
}
