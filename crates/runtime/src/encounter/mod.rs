//! Encounter arena: a rendezvous where actors join one shared fight.
//!
//! An encounter moves `Forming -> Active -> Resolved`. Joins are accepted
//! while forming; the first join that observes the quorum flips a one-shot
//! guard and spawns the round loop on the tokio runtime. Waiters observe the
//! status through a `watch` channel.

mod log;
mod round;

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use game_core::Enemy;
use serde::Serialize;
use tokio::sync::watch;

use crate::actor::{ActorHandle, ActorId};
use crate::context::RuntimeContext;
use crate::error::{Result, RuntimeError};
use crate::events::EncounterEvent;

pub(crate) use log::SharedLog;

/// Terminal result of an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum EncounterOutcome {
    /// Enemy defeated; `gold` is the sum of every living hero's reward roll.
    Victory { gold: u32 },
    /// Every participant fell.
    Wipe,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EncounterStatus {
    Forming,
    Active { round: u32 },
    Resolved { outcome: EncounterOutcome },
    /// The round loop failed internally; see [`RuntimeError::EncounterAborted`].
    Aborted { reason: String },
}

impl EncounterStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved { .. } | Self::Aborted { .. })
    }
}

/// Result of [`Encounter::enter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Added; quorum not reached yet.
    Joined,
    /// Added, and this join started the round loop.
    Started,
    /// The actor chose to rest and sits this fight out.
    Resting,
    Defeated,
    AlreadyJoined,
    /// The round loop is already running or finished.
    Closed,
}

pub(crate) struct EncounterInner {
    floor: u32,
    quorum: usize,
    resting: HashSet<ActorId>,
    enemy: Mutex<Enemy>,
    participants: Mutex<Vec<ActorHandle>>,
    started: AtomicBool,
    status: watch::Sender<EncounterStatus>,
    last_gold: AtomicU32,
    log: SharedLog,
    ctx: RuntimeContext,
}

impl EncounterInner {
    fn enemy(&self) -> Enemy {
        self.enemy
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn participants(&self) -> Vec<ActorHandle> {
        self.participants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Cloneable handle to one combat encounter.
#[derive(Clone)]
pub struct Encounter {
    inner: Arc<EncounterInner>,
}

impl Encounter {
    /// Generates a floor-scaled enemy from the content roster.
    ///
    /// Actors in `resting` are turned away by [`enter`](Self::enter).
    pub fn new(floor: u32, resting: impl IntoIterator<Item = ActorId>, ctx: RuntimeContext) -> Self {
        let name = game_content::random_enemy_name(ctx.dice());
        let enemy = Enemy::generate(floor, name, ctx.dice());
        Self::with_enemy(floor, enemy, resting, ctx)
    }

    pub fn with_enemy(
        floor: u32,
        enemy: Enemy,
        resting: impl IntoIterator<Item = ActorId>,
        ctx: RuntimeContext,
    ) -> Self {
        let (status, _) = watch::channel(EncounterStatus::Forming);
        let quorum = ctx.config().game.party_size.max(1);
        tracing::debug!(
            target: "runtime::encounter",
            floor,
            enemy = enemy.name(),
            enemy_health = enemy.max_health(),
            quorum,
            "encounter created"
        );
        Self {
            inner: Arc::new(EncounterInner {
                floor,
                quorum,
                resting: resting.into_iter().collect(),
                log: SharedLog::new(floor, ctx.events().clone()),
                enemy: Mutex::new(enemy),
                participants: Mutex::new(Vec::new()),
                started: AtomicBool::new(false),
                status,
                last_gold: AtomicU32::new(0),
                ctx,
            }),
        }
    }

    /// Registers `actor` as a participant.
    ///
    /// Must be called from within a tokio runtime: the join that reaches the
    /// quorum spawns the round loop and returns without waiting for it.
    pub fn enter(&self, actor: &ActorHandle) -> JoinOutcome {
        let inner = &self.inner;
        if !actor.is_alive() {
            actor.log_event(format!(
                "{} is defeated and cannot join the battle.",
                actor.name()
            ));
            return JoinOutcome::Defeated;
        }
        if inner.resting.contains(&actor.id()) {
            actor.log_event(format!("{} is resting and sits this fight out.", actor.name()));
            return JoinOutcome::Resting;
        }

        let joined = {
            let mut participants = inner
                .participants
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if inner.started.load(Ordering::Acquire) {
                None
            } else if participants.iter().any(|p| p.ptr_eq(actor)) {
                Some(None)
            } else {
                participants.push(actor.clone());
                Some(Some(participants.clone()))
            }
        };

        let audience = match joined {
            None => {
                actor.log_event("The battle has already begun.");
                return JoinOutcome::Closed;
            }
            Some(None) => {
                actor.log_event(format!("{} is already in the fight.", actor.name()));
                return JoinOutcome::AlreadyJoined;
            }
            Some(Some(audience)) => audience,
        };

        let enemy = inner.enemy();
        inner.log.narrate(
            format!("{} enters the battle against {}!", actor.name(), enemy.name()),
            &audience,
        );
        tracing::debug!(
            target: "runtime::encounter",
            floor = inner.floor,
            actor = %actor.name(),
            participants = audience.len(),
            quorum = inner.quorum,
            "participant joined"
        );

        if audience.len() >= inner.quorum && self.try_start() {
            JoinOutcome::Started
        } else {
            JoinOutcome::Joined
        }
    }

    /// Starts the round loop with whoever has joined, below quorum if needed.
    ///
    /// Returns false when the loop already started or nobody joined.
    pub fn begin(&self) -> bool {
        let has_participants = !self
            .inner
            .participants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty();
        has_participants && self.try_start()
    }

    /// One-shot: only the caller that flips the guard spawns the loop.
    fn try_start(&self) -> bool {
        if self
            .inner
            .started
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        let inner = &self.inner;
        let enemy = inner.enemy();
        let participants = inner.participants();
        inner
            .status
            .send_replace(EncounterStatus::Active { round: 0 });
        inner.ctx.events().publish(EncounterEvent::Started {
            floor: inner.floor,
            enemy: enemy.name().to_owned(),
            enemy_health: enemy.health(),
            participants: participants.iter().map(|p| p.name().to_owned()).collect(),
        });
        tracing::info!(
            target: "runtime::encounter",
            floor = inner.floor,
            enemy = enemy.name(),
            participants = participants.len(),
            "round loop starting"
        );

        tokio::spawn(round::run(Arc::clone(inner)));
        true
    }

    /// Waits until the encounter reaches a terminal status.
    ///
    /// Never returns for an encounter that was not started.
    pub async fn wait_resolved(&self) -> Result<EncounterOutcome> {
        let floor = self.inner.floor;
        let mut status = self.inner.status.subscribe();
        let terminal = status
            .wait_for(EncounterStatus::is_terminal)
            .await
            .map_err(|_| RuntimeError::EncounterAborted {
                floor,
                reason: "status channel closed".into(),
            })?
            .clone();
        match terminal {
            EncounterStatus::Resolved { outcome } => Ok(outcome),
            EncounterStatus::Aborted { reason } => {
                Err(RuntimeError::EncounterAborted { floor, reason })
            }
            EncounterStatus::Forming | EncounterStatus::Active { .. } => {
                Err(RuntimeError::EncounterAborted {
                    floor,
                    reason: "resolved without outcome".into(),
                })
            }
        }
    }

    /// Bypass path for a skipped fight: one roll, applied to every living
    /// member of `roster`. Does not touch the encounter status.
    pub fn apply_equal_damage_to_all(&self, roster: &[ActorHandle]) -> u32 {
        let inner = &self.inner;
        let enemy = inner.enemy();
        let damage = enemy.roll_hit(inner.ctx.dice());
        let living: Vec<ActorHandle> = roster.iter().filter(|a| a.is_alive()).cloned().collect();

        inner.log.narrate(
            format!("{} catches the party off guard!", enemy.name()),
            &living,
        );
        for actor in &living {
            actor.take_damage(damage);
            inner.log.narrate(
                format!("{} hits {} for {damage} damage!", enemy.name(), actor.name()),
                &living,
            );
        }
        tracing::debug!(
            target: "runtime::encounter",
            floor = inner.floor,
            damage,
            targets = living.len(),
            "bypass damage applied"
        );
        damage
    }

    pub fn floor(&self) -> u32 {
        self.inner.floor
    }

    pub fn quorum(&self) -> usize {
        self.inner.quorum
    }

    pub fn status(&self) -> EncounterStatus {
        self.inner.status.borrow().clone()
    }

    /// Gold total of the last victory, zero before one.
    pub fn last_gold_earned(&self) -> u32 {
        self.inner.last_gold.load(Ordering::Acquire)
    }

    pub fn enemy(&self) -> Enemy {
        self.inner.enemy()
    }

    pub fn participants(&self) -> Vec<ActorHandle> {
        self.inner.participants()
    }

    pub fn log(&self) -> Vec<String> {
        self.inner.log.lines()
    }

    pub fn take_log(&self) -> Vec<String> {
        self.inner.log.take()
    }
}

impl std::fmt::Debug for Encounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encounter")
            .field("floor", &self.inner.floor)
            .field("quorum", &self.inner.quorum)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}
