//! The encounter round loop.
//!
//! Each round launches one attack task per living participant and barrier-waits
//! on all of them before the enemy's health changes, so no task ever observes
//! a partial sum of the round's damage.

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::sync::PoisonError;

use tokio::task::JoinSet;

use crate::actor::ActorHandle;
use crate::error::{Result, RuntimeError};
use crate::events::EncounterEvent;

use super::{EncounterInner, EncounterOutcome, EncounterStatus};

const VICTORY_EXPERIENCE: u32 = 50;
const VICTORY_GOLD: std::ops::Range<u32> = 30..50;

pub(super) async fn run(inner: Arc<EncounterInner>) {
    let status = match play(&inner).await {
        Ok(outcome) => {
            tracing::info!(
                target: "runtime::encounter",
                floor = inner.floor,
                ?outcome,
                "encounter resolved"
            );
            inner.ctx.events().publish(EncounterEvent::Resolved {
                floor: inner.floor,
                outcome,
            });
            EncounterStatus::Resolved { outcome }
        }
        Err(err) => {
            tracing::error!(
                target: "runtime::encounter",
                floor = inner.floor,
                error = %err,
                "round loop failed"
            );
            EncounterStatus::Aborted {
                reason: err.to_string(),
            }
        }
    };
    inner.status.send_replace(status);
}

async fn play(inner: &Arc<EncounterInner>) -> Result<EncounterOutcome> {
    let mut round = 0;
    loop {
        round += 1;
        let roster = inner.participants();
        let living: Vec<ActorHandle> = roster.iter().filter(|a| a.is_alive()).cloned().collect();

        if living.is_empty() {
            inner
                .log
                .narrate("*** THE PARTY HAS BEEN WIPED OUT ***", &roster);
            return Ok(EncounterOutcome::Wipe);
        }

        inner.status.send_replace(EncounterStatus::Active { round });
        inner.log.narrate(format!("--- Round {round} ---"), &roster);

        let damage = attack_round(inner, &roster, &living).await?;
        inner
            .log
            .narrate(format!(">>> Total Damage Dealt: {damage} <<<"), &roster);

        let enemy = {
            let mut enemy = inner.enemy.lock().unwrap_or_else(PoisonError::into_inner);
            enemy.take_damage(damage);
            enemy.clone()
        };
        inner.ctx.events().publish(EncounterEvent::RoundCompleted {
            floor: inner.floor,
            round,
            damage,
            enemy_health: enemy.health(),
        });
        tracing::debug!(
            target: "runtime::encounter",
            floor = inner.floor,
            round,
            damage,
            enemy_health = enemy.health(),
            "round damage applied"
        );

        if enemy.is_defeated() {
            return Ok(distribute_rewards(inner, &roster, enemy.name()));
        }

        // Enemy counter-attack against one random living participant.
        let targets: Vec<&ActorHandle> = roster.iter().filter(|a| a.is_alive()).collect();
        let dice = inner.ctx.dice();
        if let Some(target) = targets.get(dice.pick(targets.len())) {
            let attack = target.defend(&enemy, dice);
            for line in &attack.lines {
                inner.log.narrate(line.as_str(), &roster);
            }
        }

        inner.log.narrate("--- Party Status ---", &roster);
        for actor in &roster {
            let snapshot = actor.snapshot();
            let line = if snapshot.is_alive() {
                snapshot.status_line()
            } else {
                format!("{}: DEFEATED", snapshot.name)
            };
            inner.log.narrate(line, &roster);
        }
        inner.log.narrate(
            format!("{}: {}/{} HP", enemy.name(), enemy.health(), enemy.max_health()),
            &roster,
        );
    }
}

/// Spawns one strike per living participant and sums them after all finish.
async fn attack_round(
    inner: &Arc<EncounterInner>,
    roster: &[ActorHandle],
    living: &[ActorHandle],
) -> Result<u32> {
    let enemy_name: Arc<str> = inner.enemy().name().into();
    let audience: Arc<[ActorHandle]> = roster.into();
    let mut tasks = JoinSet::new();

    for actor in living.iter().cloned() {
        let inner = Arc::clone(inner);
        let audience = Arc::clone(&audience);
        let enemy_name = Arc::clone(&enemy_name);
        tasks.spawn(async move {
            let dice = inner.ctx.shared_dice();
            let Some(strike) = actor.strike(&enemy_name, dice.as_ref()) else {
                return 0;
            };
            for line in strike.lines {
                inner.log.narrate(line, &audience);
            }
            strike.damage
        });
    }

    let mut total = 0;
    while let Some(joined) = tasks.join_next().await {
        total += joined.map_err(RuntimeError::AttackTask)?;
    }
    Ok(total)
}

fn distribute_rewards(
    inner: &EncounterInner,
    roster: &[ActorHandle],
    enemy_name: &str,
) -> EncounterOutcome {
    inner
        .log
        .narrate(format!("*** {enemy_name} HAS BEEN DEFEATED! ***"), roster);

    let dice = inner.ctx.dice();
    let mut total = 0;
    for actor in roster.iter().filter(|a| a.is_alive()) {
        let gold = dice.range(VICTORY_GOLD.start, VICTORY_GOLD.end);
        actor.add_experience_silent(VICTORY_EXPERIENCE);
        actor.add_gold_silent(gold);
        actor.win_battle();
        total += gold;
        inner.log.narrate(
            format!("{} gained {VICTORY_EXPERIENCE} experience.", actor.name()),
            roster,
        );
    }

    inner.last_gold.store(total, Ordering::Release);
    inner
        .log
        .narrate(format!("Gained {total} gold total!"), roster);
    EncounterOutcome::Victory { gold: total }
}
