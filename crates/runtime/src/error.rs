//! Unified error type surfaced by the runtime API.
//!
//! Domain refusals (no mana, shop closed, actor resting) are narration and
//! typed outcomes, not errors. What remains here are coordination failures
//! and misuse of the run lifecycle.
use thiserror::Error;
use tokio::task::JoinError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("attack task join failed")]
    AttackTask(#[source] JoinError),

    #[error("intro task join failed")]
    IntroTask(#[source] JoinError),

    #[error("encounter on floor {floor} aborted: {reason}")]
    EncounterAborted { floor: u32, reason: String },

    #[error("no boss guards floor {floor}")]
    MissingBoss { floor: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("the game is already over")]
    GameOver,
}
