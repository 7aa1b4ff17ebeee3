//! The adventuring party and its intro tasks.

use std::time::Duration;

use game_core::report::summarize;
use game_core::{ActorSnapshot, ArchetypeKind, RunSummary};
use tokio::task::JoinSet;

use crate::actor::ActorHandle;
use crate::context::RuntimeContext;
use crate::error::{Result, RuntimeError};

/// Names and archetypes of the default party, in turn order.
pub const DEFAULT_ROSTER: [(&str, ArchetypeKind); 3] = [
    ("Theron", ArchetypeKind::Knight),
    ("Shadowblade", ArchetypeKind::Thief),
    ("Arcanis", ArchetypeKind::Wizard),
];

#[derive(Debug, Clone)]
pub struct Party {
    members: Vec<ActorHandle>,
    ctx: RuntimeContext,
}

impl Party {
    pub fn new(ctx: RuntimeContext, members: Vec<ActorHandle>) -> Self {
        Self { members, ctx }
    }

    /// Knight, Thief and Wizard with the configured buff time scale.
    pub fn default_roster(ctx: RuntimeContext) -> Self {
        let scale = ctx.config().buff_time_scale;
        let members = DEFAULT_ROSTER
            .iter()
            .map(|(name, kind)| ActorHandle::with_buff_scale(*name, *kind, scale))
            .collect();
        Self::new(ctx, members)
    }

    /// Runs one intro task per member and returns once all of them logged.
    ///
    /// Each task waits `intro_delay` plus a random share of `intro_jitter`.
    pub async fn start_adventure(&self) -> Result<()> {
        let config = self.ctx.config();
        let base = config.intro_delay;
        let jitter_ms = u32::try_from(config.intro_jitter.as_millis()).unwrap_or(u32::MAX);

        let mut intros = JoinSet::new();
        for actor in self.members.iter().cloned() {
            let delay = base + Duration::from_millis(self.ctx.dice().range(0, jitter_ms).into());
            intros.spawn(async move {
                tokio::time::sleep(delay).await;
                actor.log_event(format!("{}, {}", actor.name(), actor.kind().intro_line()));
            });
        }
        while let Some(joined) = intros.join_next().await {
            joined.map_err(RuntimeError::IntroTask)?;
        }
        tracing::info!(
            target: "runtime::party",
            members = self.members.len(),
            "party entered the dungeon"
        );
        Ok(())
    }

    pub fn members(&self) -> &[ActorHandle] {
        &self.members
    }

    pub fn living(&self) -> Vec<ActorHandle> {
        self.members.iter().filter(|a| a.is_alive()).cloned().collect()
    }

    pub fn is_wiped(&self) -> bool {
        !self.members.iter().any(ActorHandle::is_alive)
    }

    pub fn snapshots(&self) -> Vec<ActorSnapshot> {
        self.members.iter().map(ActorHandle::snapshot).collect()
    }

    /// Totals and rankings over the surviving members.
    pub fn summary(&self) -> RunSummary {
        summarize(&self.snapshots())
    }

    pub fn context(&self) -> &RuntimeContext {
        &self.ctx
    }
}
