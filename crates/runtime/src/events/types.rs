//! Event types for different topics.

use game_core::RoomKind;
use serde::Serialize;

use crate::encounter::EncounterOutcome;

/// One line of shared narration.
#[derive(Debug, Clone, Serialize)]
pub struct NarrationEvent {
    pub floor: u32,
    pub line: String,
}

impl NarrationEvent {
    pub fn new(floor: u32, line: impl Into<String>) -> Self {
        Self {
            floor,
            line: line.into(),
        }
    }
}

/// Encounter and boss lifecycle.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EncounterEvent {
    Started {
        floor: u32,
        enemy: String,
        enemy_health: u32,
        participants: Vec<String>,
    },
    RoundCompleted {
        floor: u32,
        round: u32,
        damage: u32,
        enemy_health: u32,
    },
    Resolved {
        floor: u32,
        outcome: EncounterOutcome,
    },
    BossAppeared {
        floor: u32,
        boss: String,
        health: u32,
        attack: u32,
    },
    BossDefeated {
        floor: u32,
        boss: String,
    },
    PartyFallen {
        floor: u32,
    },
}

/// Floor progression.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FloorEvent {
    RoomsGenerated { floor: u32, rooms: Vec<RoomKind> },
    ShopVisited { floor: u32, actor: String },
    Advanced { floor: u32 },
    GameOver { floor: u32 },
}
