//! Milestone boss fights.
//!
//! Unlike regular encounters a boss fight is sequential: heroes strike one
//! after another and the boss answers each surviving hit, so no barrier or
//! task fan-out is involved.

use game_content::boss_for;
use game_core::{Boss, Milestone};
use serde::Serialize;

use crate::actor::ActorHandle;
use crate::context::RuntimeContext;
use crate::encounter::SharedLog;
use crate::error::{Result, RuntimeError};
use crate::events::EncounterEvent;

/// Result of one boss round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BossRound {
    /// Both sides still stand.
    Continue,
    Defeated,
    /// Every hero is down.
    Fallen,
}

impl BossRound {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Continue)
    }
}

#[derive(Debug)]
pub struct BossEncounter {
    boss: Boss,
    floor: u32,
    log: SharedLog,
    ctx: RuntimeContext,
}

impl BossEncounter {
    /// Boss guarding `milestone`, fought on `floor`.
    ///
    /// Fails once the game is over or when no boss guards the milestone.
    pub fn for_milestone(floor: u32, milestone: Milestone, ctx: RuntimeContext) -> Result<Self> {
        if !ctx.is_game_active() {
            return Err(RuntimeError::GameOver);
        }
        let profile = boss_for(milestone).ok_or(RuntimeError::MissingBoss { floor })?;
        Ok(Self::new(floor, Boss::new(profile), ctx))
    }

    pub fn new(floor: u32, boss: Boss, ctx: RuntimeContext) -> Self {
        Self {
            log: SharedLog::new(floor, ctx.events().clone()),
            boss,
            floor,
            ctx,
        }
    }

    pub fn boss(&self) -> &Boss {
        &self.boss
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    /// Narrates the boss banner and story to `roster`.
    pub fn entrance(&self, roster: &[ActorHandle]) -> Vec<String> {
        let lines = self.boss.entrance();
        for line in &lines {
            self.log.narrate(line.as_str(), roster);
        }
        self.ctx.events().publish(EncounterEvent::BossAppeared {
            floor: self.floor,
            boss: self.boss.name().to_owned(),
            health: self.boss.max_health(),
            attack: self.boss.attack(),
        });
        tracing::info!(
            target: "runtime::boss",
            floor = self.floor,
            boss = self.boss.name(),
            health = self.boss.max_health(),
            attack = self.boss.attack(),
            "boss appeared"
        );
        lines
    }

    /// Plays one sequential round.
    ///
    /// The defeat check runs after every hit; heroes later in the order do
    /// not act once the boss is down.
    pub fn battle_round(&mut self, roster: &[ActorHandle]) -> BossRound {
        if self.boss.is_defeated() {
            return BossRound::Defeated;
        }
        if !roster.iter().any(ActorHandle::is_alive) {
            self.log.narrate("*** THE HEROES HAVE FALLEN ***", roster);
            return BossRound::Fallen;
        }

        let dice = self.ctx.dice();
        self.log
            .narrate(format!("{} attacks!", self.boss.name()), roster);
        for actor in roster {
            if !actor.is_alive() {
                continue;
            }
            let damage = self.boss.receive_hit(dice);
            self.log.narrate(
                format!("{} strikes for {damage} damage!", actor.name()),
                roster,
            );
            if self.boss.is_defeated() {
                self.reward(roster);
                return BossRound::Defeated;
            }

            let counter = self.boss.roll_counter(dice);
            actor.take_damage(counter);
            self.log.narrate(
                format!(
                    "{} counterattacks {} for {counter} damage!",
                    self.boss.name(),
                    actor.name()
                ),
                roster,
            );
        }

        self.log.narrate("--- Hero Status ---", roster);
        for actor in roster {
            let snapshot = actor.snapshot();
            let line = if snapshot.is_alive() {
                snapshot.status_line()
            } else {
                format!("{}: DEFEATED", snapshot.name)
            };
            self.log.narrate(line, roster);
        }
        self.log.narrate(self.boss.status_line(), roster);

        if roster.iter().any(ActorHandle::is_alive) {
            BossRound::Continue
        } else {
            self.log.narrate("*** THE HEROES HAVE FALLEN ***", roster);
            BossRound::Fallen
        }
    }

    fn reward(&self, roster: &[ActorHandle]) {
        self.log.narrate(
            format!("*** {} HAS BEEN DEFEATED! ***", self.boss.name().to_uppercase()),
            roster,
        );
        let rewards = Boss::REWARDS;
        for actor in roster.iter().filter(|a| a.is_alive()) {
            actor.add_experience(rewards.experience);
            actor.add_gold(rewards.gold);
            actor.win_battle();
        }
        tracing::info!(
            target: "runtime::boss",
            floor = self.floor,
            boss = self.boss.name(),
            "boss defeated"
        );
    }

    /// Plays rounds until the fight ends or the game is switched off.
    ///
    /// Returns `Continue` only when the game went inactive mid-fight.
    pub async fn run_to_completion(&mut self, roster: &[ActorHandle]) -> BossRound {
        let mut result = BossRound::Continue;
        while self.ctx.is_game_active() {
            result = self.battle_round(roster);
            if result.is_terminal() {
                break;
            }
            tokio::task::yield_now().await;
        }

        let floor = self.floor;
        match result {
            BossRound::Defeated => self.ctx.events().publish(EncounterEvent::BossDefeated {
                floor,
                boss: self.boss.name().to_owned(),
            }),
            BossRound::Fallen => {
                tracing::info!(target: "runtime::boss", floor, "party fallen");
                self.ctx.set_game_active(false);
                self.ctx.events().publish(EncounterEvent::PartyFallen { floor });
            }
            BossRound::Continue => {}
        }
        result
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lines()
    }

    pub fn take_log(&self) -> Vec<String> {
        self.log.take()
    }
}
